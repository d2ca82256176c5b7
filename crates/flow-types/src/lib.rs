pub mod events;
pub mod models;
pub mod prefs;

use uuid::Uuid;

/// The viewing user. Chat rows and message bubbles are laid out relative to it.
pub const CURRENT_USER_ID: Uuid = Uuid::from_u128(1);
