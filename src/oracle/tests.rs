use super::*;
use crate::core::events;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

enum Reply {
    Content(&'static str),
    Unauthorized,
    Unavailable,
    Hang,
}

struct ScriptedBackend {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl ScriptedBackend {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match self.reply {
            Reply::Content(text) => Ok(text.to_string()),
            Reply::Unauthorized => Err(NamewiseError::authentication("401 Unauthorized")),
            Reply::Unavailable => Err(NamewiseError::service_unavailable("connection refused")),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            }
        }
    }
}

fn files(names: &[&str]) -> Vec<FileRecord> {
    names
        .iter()
        .map(|n| FileRecord {
            name: n.to_string(),
            path: PathBuf::from("/data").join(n),
            is_folder: false,
        })
        .collect()
}

fn examples() -> Vec<Example> {
    vec![Example::new("a.txt", "doc_a.txt")]
}

fn oracle(backend: Arc<ScriptedBackend>) -> PatternOracle {
    PatternOracle::with_backend(InferenceConfig::default(), backend)
}

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        seen.push(event);
    }
    seen
}

#[tokio::test]
async fn analyze_returns_complete_map() {
    let backend = ScriptedBackend::new(Reply::Content(
        r#"Here you go: [{"original_name": "a.txt", "new_name": "doc_a.txt"}, {"original_name": "b.txt", "new_name": "doc_b.txt"}]"#,
    ));
    let inputs = files(&["a.txt", "b.txt", "c.txt"]);

    let result = oracle(backend.clone())
        .analyze(&inputs, &examples())
        .await
        .unwrap();

    let keys: Vec<_> = result.rename_map().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a.txt", "b.txt", "c.txt"]);
    assert_eq!(result.new_name_for("b.txt"), Some("doc_b.txt"));
    assert_eq!(result.new_name_for("c.txt"), Some("c.txt"));
    assert!(result.raw_response().starts_with("Here you go"));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn request_uses_configured_model_and_prompt() {
    let backend = ScriptedBackend::new(Reply::Content("[]"));
    let config = InferenceConfig {
        model: "deepseek-chat".to_string(),
        ..InferenceConfig::default()
    };
    PatternOracle::with_backend(config, backend.clone())
        .analyze(&files(&["a.txt", "z.txt"]), &examples())
        .await
        .unwrap();

    let request = backend.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.model, "deepseek-chat");
    assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
    assert!(request.messages[1].content.contains("- z.txt"));
    assert_eq!(request.response_format, ResponseFormat::json_object());
}

#[tokio::test]
async fn empty_inputs_fail_without_calling_service() {
    let backend = ScriptedBackend::new(Reply::Content("[]"));
    let oracle = oracle(backend.clone());

    let err = oracle.analyze(&[], &examples()).await.unwrap_err();
    assert!(matches!(err, NamewiseError::InsufficientInput { .. }));

    let err = oracle.analyze(&files(&["a.txt"]), &[]).await.unwrap_err();
    assert!(matches!(err, NamewiseError::InsufficientInput { .. }));

    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn precondition_failure_still_emits_started_then_failed() {
    let (sink, mut rx) = events::channel();
    let oracle = oracle(ScriptedBackend::new(Reply::Content("[]"))).with_events(sink);

    let _ = oracle.analyze(&[], &examples()).await;

    let seen = drain(&mut rx);
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], SessionEvent::AnalysisStarted);
    assert!(matches!(seen[1], SessionEvent::AnalysisFailed(_)));
}

#[tokio::test]
async fn success_emits_started_then_completed() {
    let (sink, mut rx) = events::channel();
    let oracle = oracle(ScriptedBackend::new(Reply::Content(
        r#"[{"original_name": "a.txt", "new_name": "x.txt"}]"#,
    )))
    .with_events(sink);

    let result = oracle.analyze(&files(&["a.txt"]), &examples()).await.unwrap();

    let seen = drain(&mut rx);
    assert_eq!(
        seen,
        vec![
            SessionEvent::AnalysisStarted,
            SessionEvent::AnalysisCompleted(result)
        ]
    );
}

#[tokio::test]
async fn service_errors_pass_through() {
    let err = oracle(ScriptedBackend::new(Reply::Unauthorized))
        .analyze(&files(&["a.txt"]), &examples())
        .await
        .unwrap_err();
    assert!(matches!(err, NamewiseError::Authentication { .. }));

    let err = oracle(ScriptedBackend::new(Reply::Unavailable))
        .analyze(&files(&["a.txt"]), &examples())
        .await
        .unwrap_err();
    assert!(matches!(err, NamewiseError::ServiceUnavailable { .. }));
}

#[tokio::test]
async fn prose_only_reply_is_unparseable_with_raw_text() {
    let err = oracle(ScriptedBackend::new(Reply::Content(
        "I'm not sure what pattern you want.",
    )))
    .analyze(&files(&["a.txt"]), &examples())
    .await
    .unwrap_err();

    assert_eq!(err.raw_response(), Some("I'm not sure what pattern you want."));
}

#[tokio::test]
async fn fallback_scan_feeds_completion() {
    let result = oracle(ScriptedBackend::new(Reply::Content(
        r#"noise {"original_name": "a.txt", "new_name": "b.txt"} noise"#,
    )))
    .analyze(&files(&["a.txt", "c.txt"]), &examples())
    .await
    .unwrap();

    assert_eq!(result.new_name_for("a.txt"), Some("b.txt"));
    assert_eq!(result.new_name_for("c.txt"), Some("c.txt"));
}

#[tokio::test]
async fn cancellation_ends_with_cancelled_failure() {
    let (sink, mut rx) = events::channel();
    let oracle = oracle(ScriptedBackend::new(Reply::Hang)).with_events(sink);
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = oracle
        .analyze_with_cancel(&files(&["a.txt"]), &examples(), &token)
        .await
        .unwrap_err();

    assert!(matches!(err, NamewiseError::Cancelled));
    let seen = drain(&mut rx);
    assert_eq!(seen[0], SessionEvent::AnalysisStarted);
    assert_eq!(seen[1], SessionEvent::AnalysisFailed("Analysis cancelled".into()));
}
