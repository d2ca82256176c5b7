use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use flow_catalog::Catalog;
use flow_types::events::Intent;

/// Signals that flow up from screens to the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// A user intent left a view; there is no backend to deliver it to
    Intent(Intent),
    /// A story viewer finished or was closed and its overlay should go away
    StoryClosed,
}

/// Everything a screen needs from above, passed down explicitly.
#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<Catalog>,
    events: mpsc::UnboundedSender<ShellEvent>,
}

impl AppContext {
    pub fn new(catalog: Arc<Catalog>) -> (Self, mpsc::UnboundedReceiver<ShellEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (Self { catalog, events }, rx)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn emit(&self, event: ShellEvent) {
        debug!("Shell event: {:?}", event);
        // The receiver lives as long as the shell; a send after shutdown is harmless.
        let _ = self.events.send(event);
    }

    pub fn intent(&self, intent: Intent) {
        self.emit(ShellEvent::Intent(intent));
    }
}
