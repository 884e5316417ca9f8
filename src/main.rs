/*
 * Responsibility
 * - tokio runtime 軌道
 * - app::run() の呼び出し（ロジックは置かない）
 */
use anyhow::Result;

use social_api::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
