//! Terminal display helpers
//!
//! Tables, spinners and summaries shared by the command implementations.

use std::time::Duration;

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use namewise::rename::{PlannedRename, RenameSummary, SkipReason};
use namewise::{AnalysisResult, Example, RenameHistory};

/// Spinner shown while waiting on the inference service.
pub fn spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let pb = if Term::stderr().is_term() {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(ProgressStyle::with_template("{spinner:.blue} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

#[derive(Tabled)]
struct ExampleRow {
    #[tabled(rename = "Original")]
    original: String,
    #[tabled(rename = "New")]
    new: String,
}

/// Print the example registry.
pub fn display_examples(examples: &[Example]) {
    if examples.is_empty() {
        println!("{}", "No examples yet. Add one with 'namewise examples add <original> <new>'.".dimmed());
        return;
    }

    let rows = examples.iter().map(|e| ExampleRow {
        original: e.original_name.clone(),
        new: e.new_name.clone(),
    });
    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
}

#[derive(Tabled)]
struct MappingRow {
    #[tabled(rename = "Original")]
    original: String,
    #[tabled(rename = "Proposed")]
    proposed: String,
    #[tabled(rename = "")]
    marker: String,
}

/// Print a mapping, highlighting names that change.
pub fn display_mapping(result: &AnalysisResult) {
    let rows = result.rename_map().iter().map(|(original, proposed)| MappingRow {
        original: original.clone(),
        proposed: proposed.clone(),
        marker: if original == proposed {
            String::new()
        } else {
            "✎".to_string()
        },
    });
    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
    println!(
        "{} {} of {} files get new names",
        "📋".dimmed(),
        result.changed_count().to_string().bright_cyan().bold(),
        result.rename_map().len()
    );
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "")]
    cursor: String,
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Files")]
    files: usize,
    #[tabled(rename = "Changed")]
    changed: usize,
}

/// Print every history entry with the cursor marked.
pub fn display_history(history: &RenameHistory) {
    if history.is_empty() {
        println!("{}", "History is empty. Run 'namewise analyze <paths>' first.".dimmed());
        return;
    }

    let current = history.current_index();
    let rows = history
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| HistoryRow {
            cursor: if index as i64 == current {
                "▶".to_string()
            } else {
                String::new()
            },
            index,
            created: entry
                .created_at()
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            files: entry.rename_map().len(),
            changed: entry.changed_count(),
        });
    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
}

/// Print the position of the cursor after a navigation command.
pub fn display_position(history: &RenameHistory) {
    println!(
        "{} {}/{}{}{}",
        "📍 Position".bright_blue().bold(),
        history.current_index() + 1,
        history.len(),
        if history.can_go_back() { "  ◀ previous" } else { "" },
        if history.can_go_forward() { "  next ▶" } else { "" },
    );
}

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// Print a dry-run plan.
pub fn display_plan(plan: &[PlannedRename]) {
    if plan.is_empty() {
        println!("{}", "Nothing to rename.".dimmed());
        return;
    }

    let rows = plan.iter().map(|p| PlanRow {
        from: p.source.display().to_string(),
        to: p.destination.display().to_string(),
        note: if p.suffixed {
            "name taken, suffixed".to_string()
        } else {
            String::new()
        },
    });
    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
    println!(
        "{} {} files would be renamed",
        "🔍 Dry run:".bright_blue().bold(),
        plan.len()
    );
}

/// Print the outcome of an apply run.
pub fn display_summary(summary: &RenameSummary) {
    for renamed in &summary.renamed {
        println!(
            "  {} {} → {}",
            style("✓").green(),
            renamed.from.display(),
            renamed.to.display()
        );
    }
    for failure in &summary.errors {
        println!(
            "  {} {}: {}",
            style("✗").red(),
            failure.original_name,
            failure.message
        );
    }

    let unresolved = summary
        .skipped
        .iter()
        .filter(|(_, reason)| *reason != SkipReason::Unchanged)
        .count();

    println!();
    println!(
        "{} {} renamed, {} failed, {} skipped ({} not found)",
        if summary.is_clean() {
            "✅ Done:".bright_green().bold().to_string()
        } else {
            "⚠️  Done with errors:".yellow().bold().to_string()
        },
        summary.success_count,
        summary.errors.len(),
        summary.skipped.len(),
        unresolved
    );
}
