//! Rename execution command.

use owo_colors::OwoColorize;

use crate::cli::args::ApplyArgs;
use crate::cli::context::{GlobalOptions, SessionContext};
use crate::cli::output::{display_plan, display_summary};
use namewise::rename::RenameExecutor;
use namewise::FileRegistry;

/// Apply (or preview) the current mapping on the given paths.
pub async fn apply_command(args: ApplyArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let mut ctx = SessionContext::open(options)?;
    if args.backup {
        let executor =
            RenameExecutor::new().with_backup_dir(ctx.config.rename.backup_directory.clone());
        ctx.session = ctx.session.with_executor(executor);
    }

    let mut files = FileRegistry::new();
    files.add_paths(&args.paths);

    if args.dry_run {
        let plan = ctx.session.plan(&files)?;
        display_plan(&plan);
        return Ok(());
    }

    println!("{}", "🚚 Renaming files...".bright_blue().bold());
    let summary = ctx.session.apply(&files)?;
    display_summary(&summary);

    if !summary.is_clean() {
        anyhow::bail!("{} renames failed", summary.errors.len());
    }
    Ok(())
}
