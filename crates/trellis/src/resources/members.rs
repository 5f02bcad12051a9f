//! Member endpoints, under `/1/members`

use super::Resource;
use crate::{
    client::{Client, Options},
    error::Result,
    types::{Board, Token},
};

/// Member endpoints.
///
/// A member ID of `"me"` refers to the member owning the token.
#[derive(Debug, Clone)]
pub struct Members {
    client: Client,
}

impl Members {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the API tokens a member has granted.
    pub async fn tokens(&self, member_id: &str) -> Result<Vec<Token>> {
        self.client.get_tokens(member_id, None).await
    }

    /// List the boards a member belongs to.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use trellis::Client;
    /// # async fn example(client: Client) -> trellis::Result<()> {
    /// let open: Vec<_> = client
    ///     .members()
    ///     .boards("me", None)
    ///     .await?
    ///     .into_iter()
    ///     .filter(|board| !board.closed)
    ///     .collect();
    /// # Ok(())
    /// # }
    /// ```
    pub async fn boards(&self, member_id: &str, options: Option<Options>) -> Result<Vec<Board>> {
        self.client.get_boards(member_id, options).await
    }
}

impl Resource for Members {
    fn client(&self) -> &Client {
        &self.client
    }
}
