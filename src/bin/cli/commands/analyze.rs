//! Pattern inference command.

use owo_colors::OwoColorize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cli::args::AnalyzeArgs;
use crate::cli::context::{load_configuration, GlobalOptions, SessionContext};
use crate::cli::output::{display_mapping, spinner};
use namewise::core::events;
use namewise::{FileRegistry, NamewiseError};

/// Infer a mapping for the given paths and store it as the current result.
pub async fn analyze_command(args: AnalyzeArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let mut config = load_configuration(options.config.as_deref())?;
    if let Some(model) = args.model {
        config.inference.model = model;
    }
    if !config.inference.is_api_configured() {
        warn!("no API key configured; the request will be refused");
    }

    let mut files = FileRegistry::new();
    files.add_paths(&args.paths);
    if files.is_empty() {
        anyhow::bail!("No files found in the given paths");
    }

    let mut ctx = SessionContext::open_with(options, config)?;
    let (sink, mut rx) = events::channel();
    ctx.session = ctx.session.with_events(sink);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let pb = spinner(&format!(
        "Inferring names for {} files from {} examples...",
        files.len(),
        ctx.session.examples().len()
    ))?;
    let outcome = ctx
        .session
        .analyze_with_cancel(&files.list(), &cancel)
        .await
        .cloned();
    pb.finish_and_clear();

    // failures reach the user through the returned error; events are only logged
    while let Ok(event) = rx.try_recv() {
        debug!("session event: {}", serde_json::to_string(&event)?);
    }

    let result = match outcome {
        Ok(result) => result,
        Err(NamewiseError::InsufficientInput { message }) => {
            eprintln!(
                "{}",
                "💡 Tip: add an example first with 'namewise examples add <original> <new>'".dimmed()
            );
            anyhow::bail!(message);
        }
        Err(err) => {
            if let Some(raw) = err.raw_response() {
                eprintln!("{}", "Raw response:".dimmed());
                eprintln!("{}", raw.dimmed());
            }
            return Err(err.into());
        }
    };

    ctx.save()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(result.rename_map())?);
    } else {
        display_mapping(&result);
        println!(
            "{}",
            "💡 Review, tweak with 'namewise edit', then 'namewise apply <paths>'".dimmed()
        );
    }
    Ok(())
}
