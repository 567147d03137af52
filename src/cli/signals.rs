//! OS signal handling for the forwarding loop

use tokio::sync::mpsc;
use tracing::info;

/// Signals the forwarding loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwarderSignal {
    /// Stop after the current cycle (SIGINT/SIGTERM)
    Shutdown,
}

/// Listens for SIGINT and SIGTERM and forwards them over a channel.
///
/// The sender is exposed so other tasks can request a shutdown too.
pub struct SignalHandler {
    sender: mpsc::Sender<ForwarderSignal>,
    receiver: mpsc::Receiver<ForwarderSignal>,
}

impl SignalHandler {
    /// Create a handler and start listening for OS signals
    #[cfg(unix)]
    pub fn new() -> Result<Self, std::io::Error> {
        use tokio::signal::unix::{signal, SignalKind};

        let handler = Self::detached();

        let tx_int = handler.sender.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            info!("Received SIGINT, shutting down");
            let _ = tx_int.send(ForwarderSignal::Shutdown).await;
        });

        let tx_term = handler.sender.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            info!("Received SIGTERM, shutting down");
            let _ = tx_term.send(ForwarderSignal::Shutdown).await;
        });

        Ok(handler)
    }

    #[cfg(not(unix))]
    pub fn new() -> Result<Self, std::io::Error> {
        let handler = Self::detached();

        let tx = handler.sender.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl+C, shutting down");
                let _ = tx.send(ForwarderSignal::Shutdown).await;
            }
        });

        Ok(handler)
    }

    /// A handler that only receives what is sent through [`Self::sender`]
    pub fn detached() -> Self {
        let (sender, receiver) = mpsc::channel(4);
        Self { sender, receiver }
    }

    pub fn sender(&self) -> mpsc::Sender<ForwarderSignal> {
        self.sender.clone()
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<ForwarderSignal> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sender_delivers_shutdown() {
        let mut handler = SignalHandler::detached();
        handler.sender().send(ForwarderSignal::Shutdown).await.unwrap();

        assert_eq!(handler.recv().await, Some(ForwarderSignal::Shutdown));
    }

    #[tokio::test]
    async fn installs_os_handlers() {
        assert!(SignalHandler::new().is_ok());
    }
}
