//! Record types for Trello API responses
//!
//! These mirror the JSON Trello returns and enforce nothing: every field is
//! defaulted when missing, `null` reads as the field's default, loosely
//! specified fields stay as raw JSON, and unknown fields are kept in
//! `extra`.

mod action;
mod board;
mod card;
mod checklist;
mod list;
mod token;

pub use action::{Comment, CommentData};
pub use board::Board;
pub use card::{Card, Label};
pub use checklist::{CheckItem, Checklist};
pub use list::List;
pub use token::Token;

use serde::{Deserialize, Deserializer};

/// Deserialize a value that Trello may send as `null`, mapping it to `T::default()`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
