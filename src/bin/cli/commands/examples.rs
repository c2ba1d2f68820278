//! Example registry commands.

use owo_colors::OwoColorize;

use crate::cli::args::ExamplesCommand;
use crate::cli::context::{GlobalOptions, SessionContext};
use crate::cli::output::display_examples;

/// Run an `examples` subcommand and persist the result.
pub async fn examples_command(command: ExamplesCommand, options: &GlobalOptions) -> anyhow::Result<()> {
    let mut ctx = SessionContext::open(options)?;

    match command {
        ExamplesCommand::Add { original, new } => {
            if !ctx.session.add_example(&original, &new) {
                anyhow::bail!("Example names must not be empty");
            }
            println!(
                "{} {} → {}",
                "✅ Example saved:".bright_green().bold(),
                original,
                new.cyan()
            );
        }
        ExamplesCommand::Prepare { name } => {
            let example = ctx.session.prepare_example(&name)?;
            println!(
                "{} {} (edit it with 'namewise examples add {} <new>')",
                "📝 Example prepared:".bright_blue().bold(),
                example.original_name,
                example.original_name
            );
        }
        ExamplesCommand::Remove { original } => {
            if !ctx.session.remove_example(&original) {
                anyhow::bail!("No example for '{}'", original);
            }
            println!("{} {}", "🗑  Example removed:".bright_green().bold(), original);
        }
        ExamplesCommand::List => {
            display_examples(&ctx.session.examples());
            return Ok(());
        }
        ExamplesCommand::Clear => {
            ctx.session.clear_examples();
            println!("{}", "🗑  All examples removed".bright_green().bold());
        }
    }

    ctx.save()
}
