//! List endpoints, under `/1/lists`

use super::Resource;
use crate::{
    client::{Client, Options},
    error::Result,
    types::Card,
};

/// List endpoints.
#[derive(Debug, Clone)]
pub struct Lists {
    client: Client,
}

impl Lists {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the cards in a list.
    pub async fn cards(&self, list_id: &str, options: Option<Options>) -> Result<Vec<Card>> {
        self.client.get_cards_on_list(list_id, options).await
    }
}

impl Resource for Lists {
    fn client(&self) -> &Client {
        &self.client
    }
}
