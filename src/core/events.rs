//! Lifecycle events published to whoever drives a rename session.
//!
//! The core never calls back into presentation code directly. It publishes
//! [`SessionEvent`]s to an [`EventSink`]; a tokio channel sender is the usual
//! sink, and [`NullSink`] discards everything.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

use crate::rename::executor::RenameSummary;
use crate::rename::types::{AnalysisResult, RenameMap};

/// Everything a front end may want to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum SessionEvent {
    /// An example was added or changed (`Some`) or removed (`None`)
    ExampleUpdated {
        /// Original file name of the example
        name: String,
        /// New desired name, `None` when the example was removed
        new_name: Option<String>,
    },
    /// Inference has started
    AnalysisStarted,
    /// Inference produced a result
    AnalysisCompleted(AnalysisResult),
    /// Inference failed; carries a displayable message
    AnalysisFailed(String),
    /// Renaming on disk has started
    RenameStarted,
    /// Renaming finished; individual entries may still have failed
    RenameCompleted(RenameSummary),
    /// Renaming could not run at all
    RenameFailed(String),
    /// The history cursor now points at a different map (`None` when empty)
    CurrentResultChanged(Option<RenameMap>),
}

/// Receiver side of session notifications.
pub trait EventSink: Send + Sync {
    /// Deliver one event. Must not block.
    fn emit(&self, event: SessionEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, event: SessionEvent) {
        trace!("dropping event {:?}", event);
    }
}

impl EventSink for UnboundedSender<SessionEvent> {
    fn emit(&self, event: SessionEvent) {
        // a closed receiver just means nobody is listening any more
        let _ = self.send(event);
    }
}

/// Convenience: a channel-backed sink and the receiver that drains it.
pub fn channel() -> (Arc<dyn EventSink>, UnboundedReceiver<SessionEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Arc::new(tx), rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_sink_delivers_in_order() {
        let (sink, mut rx) = channel();
        sink.emit(SessionEvent::AnalysisStarted);
        sink.emit(SessionEvent::AnalysisFailed("boom".into()));

        assert_eq!(rx.try_recv().unwrap(), SessionEvent::AnalysisStarted);
        assert_eq!(
            rx.try_recv().unwrap(),
            SessionEvent::AnalysisFailed("boom".into())
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_receiver_does_not_panic() {
        let (sink, rx) = channel();
        drop(rx);
        sink.emit(SessionEvent::RenameStarted);
        NullSink.emit(SessionEvent::RenameStarted);
    }

    #[test]
    fn events_serialize_with_tag() {
        let value = serde_json::to_value(SessionEvent::ExampleUpdated {
            name: "a.txt".into(),
            new_name: None,
        })
        .unwrap();
        assert_eq!(value["event"], "example_updated");
        assert_eq!(value["data"]["name"], "a.txt");

        let value = serde_json::to_value(SessionEvent::AnalysisFailed("x".into())).unwrap();
        assert_eq!(value["data"], "x");
    }
}
