use anyhow::Result;

use super::super::Container;
use super::{format_turn, thinking_spinner};

/// One-shot question: a throwaway session, one turn, printed reply.
pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, prompt: String) -> Result<String> {
        let session = self.container.start_session_use_case().execute().await?;

        let spinner = thinking_spinner();
        let result = self
            .container
            .send_message_use_case()
            .execute(session.id(), &prompt)
            .await;
        spinner.finish_and_clear();

        self.container
            .end_session_use_case()
            .execute(session.id())
            .await?;

        let (_, turn) = result?;
        Ok(format_turn(&turn))
    }
}
