//! API token records

use super::nullable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An API token granted by a member, as returned by `/1/members/{id}/tokens`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Token {
    /// Token ID
    pub id: String,

    /// Name of the application the token was issued to
    #[serde(deserialize_with = "nullable")]
    pub identifier: String,

    /// Member who granted the token
    #[serde(deserialize_with = "nullable")]
    pub id_member: String,

    /// Creation timestamp
    pub date_created: Option<String>,

    /// Expiry timestamp; `None` for tokens that never expire
    pub date_expires: Option<String>,

    /// Granted permissions
    #[serde(deserialize_with = "nullable")]
    pub permissions: Vec<Value>,

    /// Fields not modeled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_never_expires() {
        let token: Token = serde_json::from_value(json!({
            "id": "t1",
            "identifier": "Power-Up",
            "idMember": "m1",
            "dateCreated": "2020-01-01T00:00:00.000Z",
            "dateExpires": null,
            "permissions": [{"idModel": "*", "modelType": "Board", "read": true, "write": false}]
        }))
        .unwrap();

        assert_eq!(token.identifier, "Power-Up");
        assert_eq!(token.id_member, "m1");
        assert_eq!(token.date_expires, None);
        assert_eq!(token.permissions.len(), 1);
        assert_eq!(token.permissions[0]["modelType"], "Board");
    }
}
