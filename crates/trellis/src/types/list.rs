//! List records

use super::nullable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A list on a board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct List {
    /// List ID
    pub id: String,

    /// List name
    #[serde(deserialize_with = "nullable")]
    pub name: String,

    /// Board the list belongs to
    #[serde(deserialize_with = "nullable")]
    pub id_board: String,

    /// Position on the board
    #[serde(deserialize_with = "nullable")]
    pub pos: f64,

    /// Whether the list is archived
    #[serde(deserialize_with = "nullable")]
    pub closed: bool,

    /// Whether the member is subscribed
    pub subscribed: Option<bool>,

    /// Fields not modeled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
