//! User-facing notifications
//!
//! The controller reports outcomes on a broadcast channel; the embedding UI
//! subscribes and renders them as toasts.

use tokio::sync::broadcast;

// Messages shown to the user
pub const MSG_LOAD_FAILED: &str = "No se pudieron cargar los trabajos";
pub const MSG_REORDER_OK: &str = "Orden de trabajos actualizado";
pub const MSG_REORDER_FAILED: &str = "No se pudo actualizar el orden";
pub const MSG_CREATE_OK: &str = "Trabajo creado";
pub const MSG_CREATE_FAILED: &str = "No se pudo crear el trabajo";
pub const MSG_UPDATE_OK: &str = "Trabajo actualizado";
pub const MSG_UPDATE_FAILED: &str = "No se pudo actualizar el trabajo";
pub const MSG_DELETE_OK: &str = "Trabajo eliminado";
pub const MSG_DELETE_FAILED: &str = "No se pudo eliminar el trabajo";
pub const MSG_DUPLICATE_OK: &str = "Trabajo duplicado";
pub const MSG_DUPLICATE_FAILED: &str = "No se pudo duplicar el trabajo";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Broadcast sender wrapper
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.send(NotificationKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(NotificationKind::Error, message.into());
    }

    fn send(&self, kind: NotificationKind, message: String) {
        tracing::debug!(?kind, %message, "Notification");
        // No subscribers is fine
        let _ = self.tx.send(Notification { kind, message });
    }
}
