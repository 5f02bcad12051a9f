//! Board records

use super::nullable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A Trello board, as returned by `/1/members/{id}/boards`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Board {
    /// Board ID
    pub id: String,

    /// Board name
    #[serde(deserialize_with = "nullable")]
    pub name: String,

    /// Full URL of the board
    #[serde(deserialize_with = "nullable")]
    pub url: String,

    /// Short URL of the board
    #[serde(deserialize_with = "nullable")]
    pub short_url: String,

    /// Short link code
    #[serde(deserialize_with = "nullable")]
    pub short_link: String,

    /// Markdown description
    #[serde(deserialize_with = "nullable")]
    pub desc: String,

    /// Emoji and other data referenced by the description
    pub desc_data: Value,

    /// Whether the board is closed
    #[serde(deserialize_with = "nullable")]
    pub closed: bool,

    /// Whether the member has a pending invitation
    pub invited: Option<bool>,

    /// Whether the member starred the board
    pub starred: Option<bool>,

    /// Whether the member is subscribed
    pub subscribed: Option<bool>,

    /// Whether the board is pinned
    pub pinned: Value,

    /// Owning workspace ID
    pub id_organization: Option<String>,

    /// Object and attachment limits
    pub limits: Value,

    /// Pending invitations
    pub invitations: Value,

    /// Enabled power-ups
    #[serde(deserialize_with = "nullable")]
    pub power_ups: Vec<Value>,

    /// Tag IDs
    #[serde(deserialize_with = "nullable")]
    pub id_tags: Vec<Value>,

    /// When plugins were disabled
    pub date_plugin_disable: Option<String>,

    /// Label color to label name
    #[serde(deserialize_with = "nullable")]
    pub label_names: HashMap<String, String>,

    /// Timestamp of the last activity
    pub date_last_activity: Option<String>,

    /// Timestamp of the member's last view
    pub date_last_view: Option<String>,

    /// Fields not modeled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
