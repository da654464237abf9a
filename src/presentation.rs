//! Contract with the presentation layer.
//!
//! The engine never renders anything. It hands the presenter the store to
//! redraw, user-facing notices, and the composed training outcome.

use crate::roster::CollectionStore;
use std::fmt;
use std::sync::Mutex;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A user-facing message produced by an engine operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Info => write!(f, "{}", self.message),
            Severity::Warning => write!(f, "Warning: {}", self.message),
            Severity::Error => write!(f, "Error: {}", self.message),
        }
    }
}

pub trait Presenter: Send + Sync {
    /// The store changed and should be redrawn
    fn render(&self, store: &CollectionStore);
    fn notify(&self, notice: &Notice);
    /// Dispatch a composed message to its audience (the GM in the host)
    fn broadcast(&self, message: &str);
}

/// Presenter that only writes to the tracing subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn render(&self, store: &CollectionStore) {
        info!(trainer = %store.trainer(), members = store.members().count(), "Roster changed");
    }

    fn notify(&self, notice: &Notice) {
        match notice.severity {
            Severity::Info => info!("{}", notice.message),
            Severity::Warning => warn!("{}", notice.message),
            Severity::Error => error!("{}", notice.message),
        }
    }

    fn broadcast(&self, message: &str) {
        info!(message, "Broadcast");
    }
}

/// Presenter that keeps everything it receives, for callers that reply with text
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    notices: Mutex<Vec<Notice>>,
    broadcasts: Mutex<Vec<String>>,
    renders: Mutex<usize>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take and clear the recorded notices
    pub fn drain_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Take and clear the recorded broadcasts
    pub fn drain_broadcasts(&self) -> Vec<String> {
        std::mem::take(&mut *self.broadcasts.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn render_count(&self) -> usize {
        *self.renders.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Presenter for RecordingPresenter {
    fn render(&self, _store: &CollectionStore) {
        *self.renders.lock().unwrap_or_else(|e| e.into_inner()) += 1;
    }

    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice.clone());
    }

    fn broadcast(&self, message: &str) {
        self.broadcasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
