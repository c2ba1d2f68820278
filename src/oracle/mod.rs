//! Naming-pattern oracle - infers a rename rule from user examples
//!
//! The oracle turns a file list plus a handful of rename examples into a
//! prompt, asks the inference service for a mapping, and parses the reply
//! back into a complete [`RenameMap`](crate::rename::RenameMap).
//!
//! Key properties:
//! - Requests are refused locally when there are no files or no examples
//! - Replies are parsed leniently (JSON array first, pattern scan second)
//! - The resulting map always contains every input file
//! - `AnalysisStarted` is followed by exactly one of `AnalysisCompleted` or
//!   `AnalysisFailed` for every call

pub mod backend;
pub mod parse;
pub mod prompt;
pub mod types;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::core::config::InferenceConfig;
use crate::core::errors::{NamewiseError, Result};
use crate::core::events::{EventSink, NullSink, SessionEvent};
use crate::core::files::FileRecord;
use crate::rename::types::{AnalysisResult, Example};

pub use backend::{CompletionBackend, HttpCompletionBackend};
pub use parse::{complete_rename_map, parse_json_array, parse_rename_pairs, scan_pairs};
pub use prompt::{build_prompt, build_request, SYSTEM_PROMPT};
pub use types::{
    ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatResponseMessage, ParseStrategy,
    RenamePair, ResponseFormat,
};

/// Infers rename maps through a [`CompletionBackend`].
pub struct PatternOracle {
    config: InferenceConfig,
    backend: Arc<dyn CompletionBackend>,
    events: Arc<dyn EventSink>,
}

impl PatternOracle {
    /// Create an oracle talking HTTP to the configured endpoint
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let backend = HttpCompletionBackend::new(&config)?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    /// Create an oracle with a custom transport
    pub fn with_backend(config: InferenceConfig, backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            config,
            backend,
            events: Arc::new(NullSink),
        }
    }

    /// Publish lifecycle events to `events`
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Inference settings in use
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Infer a rename map for `files` from `examples`.
    pub async fn analyze(&self, files: &[FileRecord], examples: &[Example]) -> Result<AnalysisResult> {
        self.analyze_with_cancel(files, examples, &CancellationToken::new())
            .await
    }

    /// Like [`analyze`](Self::analyze), ending with [`NamewiseError::Cancelled`]
    /// if `cancel` fires before the service answers.
    pub async fn analyze_with_cancel(
        &self,
        files: &[FileRecord],
        examples: &[Example],
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult> {
        self.events.emit(SessionEvent::AnalysisStarted);

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(NamewiseError::Cancelled),
            outcome = self.run(files, examples) => outcome,
        };

        match &outcome {
            Ok(result) => {
                info!(
                    "analysis complete: {} of {} files get new names",
                    result.changed_count(),
                    result.rename_map().len()
                );
                self.events
                    .emit(SessionEvent::AnalysisCompleted(result.clone()));
            }
            Err(err) => {
                info!("analysis failed: {err}");
                self.events.emit(SessionEvent::AnalysisFailed(err.to_string()));
            }
        }
        outcome
    }

    async fn run(&self, files: &[FileRecord], examples: &[Example]) -> Result<AnalysisResult> {
        if files.is_empty() {
            return Err(NamewiseError::insufficient_input("no files to analyze"));
        }
        if examples.is_empty() {
            return Err(NamewiseError::insufficient_input(
                "no naming examples; provide at least one example",
            ));
        }

        let prompt = build_prompt(files, examples);
        let request = build_request(&self.config, prompt);
        debug!(
            "requesting pattern for {} files from {} examples",
            files.len(),
            examples.len()
        );

        let content = self.backend.complete(&request).await?;
        let (pairs, strategy) = parse_rename_pairs(&content)?;
        debug!("recovered {} pairs via {:?}", pairs.len(), strategy);

        let rename_map = complete_rename_map(files, &pairs);
        Ok(AnalysisResult::new(rename_map, content))
    }
}

#[cfg(test)]
mod tests;
