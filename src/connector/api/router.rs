use std::sync::Arc;

use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, ChatController, ServeController};

pub struct Router {
    container: Arc<Container>,
}

impl Router {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Serve { port, public } => {
                ServeController::new(self.container.clone())
                    .serve(port, public)
                    .await
            }
            Commands::Ask { prompt } => AskController::new(&self.container).ask(prompt).await,
            Commands::Chat => ChatController::new(&self.container).chat().await,
        }
    }
}
