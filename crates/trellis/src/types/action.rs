//! Comment actions

use super::nullable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A `commentCard` action, as returned by the `actions` endpoints filtered
/// to comments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Comment {
    /// Action ID
    pub id: String,

    /// Member who wrote the comment
    #[serde(deserialize_with = "nullable")]
    pub id_member_creator: String,

    /// Comment payload
    #[serde(deserialize_with = "nullable")]
    pub data: CommentData,

    /// Action type, `commentCard` for comments
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub action_type: String,

    /// When the comment was posted
    pub date: Option<String>,

    /// Fields not modeled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `data` object of a comment action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentData {
    /// Comment text
    #[serde(deserialize_with = "nullable")]
    pub text: String,

    /// When the comment was last edited
    pub date_last_edited: Option<String>,

    /// Board, card and list references
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
