//! Checklist records

use super::nullable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A checklist on a card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Checklist {
    /// Checklist ID
    pub id: String,

    /// Checklist name
    #[serde(deserialize_with = "nullable")]
    pub name: String,

    /// Board the checklist belongs to
    #[serde(deserialize_with = "nullable")]
    pub id_board: String,

    /// Card the checklist belongs to
    #[serde(deserialize_with = "nullable")]
    pub id_card: String,

    /// Position on the card
    #[serde(deserialize_with = "nullable")]
    pub pos: f64,

    /// Items in the checklist
    #[serde(deserialize_with = "nullable")]
    pub check_items: Vec<CheckItem>,

    /// Fields not modeled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Checklist {
    /// Number of items in the `complete` state.
    pub fn completed(&self) -> usize {
        self.check_items.iter().filter(|item| item.is_complete()).count()
    }
}

/// One item of a checklist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckItem {
    /// Item ID
    pub id: String,

    /// Item text
    #[serde(deserialize_with = "nullable")]
    pub name: String,

    /// `complete` or `incomplete`
    #[serde(deserialize_with = "nullable")]
    pub state: String,

    /// Checklist the item belongs to
    #[serde(deserialize_with = "nullable")]
    pub id_checklist: String,

    /// Emoji and other data referenced by the name
    pub name_data: Value,

    /// Position in the checklist
    #[serde(deserialize_with = "nullable")]
    pub pos: f64,

    /// Fields not modeled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CheckItem {
    /// Whether the item is checked off.
    pub fn is_complete(&self) -> bool {
        self.state == "complete"
    }
}
