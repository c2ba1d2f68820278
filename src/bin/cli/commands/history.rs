//! History navigation and manual edits.

use owo_colors::OwoColorize;

use crate::cli::args::{EditArgs, HistoryCommand};
use crate::cli::context::{GlobalOptions, SessionContext};
use crate::cli::output::{display_history, display_mapping, display_position};

/// Run a `history` subcommand.
pub async fn history_command(command: HistoryCommand, options: &GlobalOptions) -> anyhow::Result<()> {
    let mut ctx = SessionContext::open(options)?;

    match command {
        HistoryCommand::Show => {
            display_history(ctx.session.history());
            if let Some(current) = ctx.session.current() {
                println!();
                println!("{}", "Current mapping".bright_blue().bold());
                display_mapping(current);
            }
            return Ok(());
        }
        HistoryCommand::Previous => {
            if ctx.session.previous().is_none() {
                println!("{}", "Already at the oldest mapping".yellow());
                return Ok(());
            }
        }
        HistoryCommand::Next => {
            if ctx.session.next().is_none() {
                println!("{}", "Already at the newest mapping".yellow());
                return Ok(());
            }
        }
        HistoryCommand::Clear => {
            ctx.session.clear_history();
            ctx.save()?;
            println!("{}", "🗑  History cleared".bright_green().bold());
            return Ok(());
        }
    }

    ctx.save()?;
    display_position(ctx.session.history());
    if let Some(current) = ctx.session.current() {
        display_mapping(current);
    }
    Ok(())
}

/// Override one name of the current mapping.
pub async fn edit_command(args: EditArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let mut ctx = SessionContext::open(options)?;
    ctx.session.edit_current(&args.original, &args.new)?;
    ctx.save()?;

    println!(
        "{} {} → {}",
        "✏️  Mapping updated:".bright_green().bold(),
        args.original,
        args.new.cyan()
    );
    println!(
        "{}",
        "💡 Undo with 'namewise history previous'".dimmed()
    );
    Ok(())
}
