//! Card endpoints, under `/1/cards`

use super::Resource;
use crate::{
    client::{Client, Options},
    error::Result,
    types::{Checklist, Comment},
};

/// Card endpoints.
#[derive(Debug, Clone)]
pub struct Cards {
    client: Client,
}

impl Cards {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the checklists on a card.
    pub async fn checklists(
        &self,
        card_id: &str,
        options: Option<Options>,
    ) -> Result<Vec<Checklist>> {
        self.client.get_checklists_on_card(card_id, options).await
    }

    /// List the comments on a card.
    pub async fn comments(&self, card_id: &str) -> Result<Vec<Comment>> {
        self.client.get_comments_on_card(card_id, None).await
    }
}

impl Resource for Cards {
    fn client(&self) -> &Client {
        &self.client
    }
}
