/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 */
pub mod auth;
pub mod cors;
pub mod guard;
