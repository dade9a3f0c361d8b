use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::connector::adapter::web;

use super::super::Container;

pub struct ServeController {
    container: Arc<Container>,
}

impl ServeController {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }

    /// Runs the web UI until Ctrl-C.
    pub async fn serve(&self, port: u16, public: bool) -> Result<String> {
        let ip = if public {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        };
        let addr = SocketAddr::new(ip, port);

        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested");
                trigger.cancel();
            }
        });

        info!("Serving model {}", self.container.model_name());
        web::serve(self.container.clone(), addr, shutdown).await?;
        Ok("Server stopped.".to_string())
    }
}
