//! Board endpoints, under `/1/boards`

use super::Resource;
use crate::{
    client::{Client, Options},
    error::Result,
    types::{Card, Checklist, Comment, List},
};

/// Board endpoints.
#[derive(Debug, Clone)]
pub struct Boards {
    client: Client,
}

impl Boards {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the lists on a board.
    pub async fn lists(&self, board_id: &str, options: Option<Options>) -> Result<Vec<List>> {
        self.client.get_lists(board_id, options).await
    }

    /// List the cards on a board.
    pub async fn cards(&self, board_id: &str, options: Option<Options>) -> Result<Vec<Card>> {
        self.client.get_cards(board_id, options).await
    }

    /// List the checklists on a board.
    pub async fn checklists(
        &self,
        board_id: &str,
        options: Option<Options>,
    ) -> Result<Vec<Checklist>> {
        self.client.get_checklists(board_id, options).await
    }

    /// List the comments on all cards of a board.
    pub async fn comments(&self, board_id: &str) -> Result<Vec<Comment>> {
        self.client.get_comments(board_id, None).await
    }
}

impl Resource for Boards {
    fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{client_answering_empty, paths};

    #[tokio::test]
    async fn test_board_paths() {
        let (client, transport) = client_answering_empty(4);
        let boards = client.boards();

        boards.lists("b1", None).await.unwrap();
        boards.cards("b1", None).await.unwrap();
        boards.checklists("b1", None).await.unwrap();
        boards.comments("b1").await.unwrap();

        assert_eq!(
            paths(&transport),
            vec![
                "/1/boards/b1/lists",
                "/1/boards/b1/cards",
                "/1/boards/b1/checklists",
                "/1/boards/b1/actions",
            ]
        );
        assert_eq!(
            transport.calls()[3].request.query().get("filter"),
            Some("commentCard")
        );
    }
}
