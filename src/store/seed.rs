/*
 * Responsibility
 * - development 用のデモデータ (本番は空の store で起動)
 */
use crate::store::{NewPost, NewUser, SocialStore, StoreError};

/// A store preloaded with the demo data set. Every seeded password is
/// "123456" (hashed with bcrypt, cost 4, so demo logins stay fast).
pub fn demo() -> Result<SocialStore, StoreError> {
    let store = SocialStore::new();

    let fong = store.create_user(NewUser {
        email: "fong@test.com".to_string(),
        password_hash: "$2b$04$wcwaquqi5ea1Ho0aKwkZ0e51/RUkg6SGxaumo8fxzILDmcrv4OBIO".to_string(),
        name: Some("Fong".to_string()),
        age: Some(23),
        height: Some(175.0),
        weight: Some(60.0),
    })?;
    let kevin = store.create_user(NewUser {
        email: "kevin@test.com".to_string(),
        password_hash: "$2b$04$uy73IdY9HVZrIENuLwZ3k./0azDvlChLyY1ht/73N4YfEZntgChbe".to_string(),
        name: Some("Kevin".to_string()),
        age: Some(40),
        height: Some(160.0),
        weight: Some(40.0),
    })?;
    let mary = store.create_user(NewUser {
        email: "mary@test.com".to_string(),
        password_hash: "$2b$04$UmERaT7uP4hRqmlheiRHbOwGEhskNw05GHYucU73JRf8LgWaqWpTy".to_string(),
        name: Some("Mary".to_string()),
        age: Some(18),
        height: Some(185.0),
        weight: Some(100.0),
    })?;

    store.add_friend(fong.id, kevin.id)?;
    store.add_friend(fong.id, mary.id)?;

    let first = store.create_post(NewPost {
        author_id: fong.id,
        title: "Hello World".to_string(),
        body: Some("This is my first post".to_string()),
    })?;
    let second = store.create_post(NewPost {
        author_id: kevin.id,
        title: "Nice Day".to_string(),
        body: Some("Hello My Friend!".to_string()),
    })?;

    store.toggle_like(first.id, fong.id)?;
    store.toggle_like(first.id, kevin.id)?;
    store.toggle_like(second.id, fong.id)?;

    Ok(store)
}
