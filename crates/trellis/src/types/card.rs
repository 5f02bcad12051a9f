//! Card and label records

use super::nullable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A card, as returned by `/1/boards/{id}/cards` and `/1/lists/{id}/cards`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Card {
    /// Card ID
    pub id: String,

    /// Card title
    #[serde(deserialize_with = "nullable")]
    pub name: String,

    /// Full URL of the card
    #[serde(deserialize_with = "nullable")]
    pub url: String,

    /// Short URL of the card
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

    /// Checklist item states
    pub check_item_states: Value,

    /// Whether the card is archived
    #[serde(deserialize_with = "nullable")]
    pub closed: bool,

    /// Whether the member is subscribed
    pub subscribed: Option<bool>,

    /// Timestamp of the last activity
    pub date_last_activity: Option<String>,

    /// Board the card belongs to
    #[serde(deserialize_with = "nullable")]
    pub id_board: String,

    /// List the card belongs to
    #[serde(deserialize_with = "nullable")]
    pub id_list: String,

    /// Board-local sequence number
    #[serde(deserialize_with = "nullable")]
    pub id_short: u64,

    /// Attachment used as the cover
    pub id_attachment_cover: Option<String>,

    /// Applied label IDs
    #[serde(deserialize_with = "nullable")]
    pub id_labels: Vec<String>,

    /// Checklist IDs
    #[serde(deserialize_with = "nullable")]
    pub id_checklists: Vec<String>,

    /// Assigned member IDs
    #[serde(deserialize_with = "nullable")]
    pub id_members: Vec<String>,

    /// Members who voted on the card
    #[serde(deserialize_with = "nullable")]
    pub id_members_voted: Vec<Value>,

    /// Applied labels
    #[serde(deserialize_with = "nullable")]
    pub labels: Vec<Label>,

    /// Whether the cover was picked manually
    #[serde(deserialize_with = "nullable")]
    pub manual_cover_attachment: bool,

    /// Position in the list
    #[serde(deserialize_with = "nullable")]
    pub pos: f64,

    /// Whether the due date is marked complete
    #[serde(deserialize_with = "nullable")]
    pub due_complete: bool,

    /// Due date
    pub due: Option<String>,

    /// Fields not modeled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A label applied to a card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Label {
    /// Label ID
    pub id: String,

    /// Label name, often empty
    #[serde(deserialize_with = "nullable")]
    pub name: String,

    /// Board the label belongs to
    #[serde(deserialize_with = "nullable")]
    pub id_board: String,

    /// Label color; `None` for colorless labels
    pub color: Option<String>,

    /// Number of cards using the label
    pub uses: Option<u64>,

    /// Fields not modeled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_with_labels() {
        let card: Card = serde_json::from_value(json!({
            "id": "c1",
            "name": "Write release notes",
            "idBoard": "b1",
            "idList": "l1",
            "idShort": 12,
            "idLabels": ["lab1"],
            "labels": [{"id": "lab1", "idBoard": "b1", "name": "", "color": "green"}],
            "pos": 65535.5,
            "due": null,
            "dueComplete": false,
            "badges": {"comments": 2}
        }))
        .unwrap();

        assert_eq!(card.id_short, 12);
        assert_eq!(card.labels.len(), 1);
        assert_eq!(card.labels[0].color.as_deref(), Some("green"));
        assert_eq!(card.labels[0].uses, None);
        assert_eq!(card.pos, 65535.5);
        assert_eq!(card.due, None);
        assert_eq!(card.extra["badges"]["comments"], 2);
    }

    #[test]
    fn test_card_null_collections() {
        let card: Card = serde_json::from_value(json!({
            "id": "c2",
            "idMembers": null,
            "labels": null
        }))
        .unwrap();

        assert!(card.id_members.is_empty());
        assert!(card.labels.is_empty());
    }
}
