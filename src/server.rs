//! Connection acceptor
//!
//! Binds the listening socket, owns the shared room registry, and spawns
//! one session task per accepted connection with no admission control.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::error::ServerError;
use crate::handler::handle_connection;
use crate::registry::Registry;

/// The chat relay server
pub struct Server {
    listener: TcpListener,
    registry: Arc<Registry>,
}

impl Server {
    /// Bind the listener and create the room registry
    pub async fn bind(addr: &str, max_rooms: usize) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr).await?;
        info!(
            "chat relay listening on {} with {} rooms",
            listener.local_addr()?,
            max_rooms
        );
        Ok(Self {
            listener,
            registry: Arc::new(Registry::new(max_rooms)),
        })
    }

    /// The address the listener is bound to
    ///
    /// Mainly for tests that bind port 0.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever
    ///
    /// Each connection gets an independent session task; sessions interact
    /// only through the registry. A failure of the listening socket itself
    /// propagates and takes the process down; session outcomes never do.
    pub async fn run(self) -> Result<(), ServerError> {
        loop {
            let (stream, addr) = self.listener.accept().await?;
            info!("new connection from {}", addr);
            let registry = Arc::clone(&self.registry);
            tokio::spawn(handle_connection(stream, registry));
        }
    }
}
