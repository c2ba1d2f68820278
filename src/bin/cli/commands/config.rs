//! Configuration management commands.
//!
//! Initialization, validation, and printing of the default configuration.

use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use crate::cli::args::{InitConfigArgs, ValidateConfigArgs};
use crate::cli::context::load_configuration;
use namewise::NamewiseConfig;

/// Row type for configuration tables.
#[derive(Tabled)]
struct SettingRow {
    setting: String,
    value: String,
}

impl SettingRow {
    fn new(setting: &str, value: impl ToString) -> Self {
        Self {
            setting: setting.to_string(),
            value: value.to_string(),
        }
    }
}

/// Print default configuration in YAML format
pub async fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default namewise configuration".dimmed());
    println!("{}", "# Save this to .namewise.yml and customize as needed".dimmed());
    println!(
        "{}",
        "# The API key is best supplied through NAMEWISE_API_KEY".dimmed()
    );
    println!();

    let yaml_output = serde_yaml::to_string(&NamewiseConfig::default())?;
    println!("{}", yaml_output);

    Ok(())
}

/// Initialize a configuration file with defaults
pub async fn init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Configuration file already exists: {}. Use --force to overwrite or choose a different name with --output",
            args.output.display()
        ));
    }

    let yaml_content = serde_yaml::to_string(&NamewiseConfig::default())?;
    tokio::fs::write(&args.output, yaml_content).await?;

    println!(
        "{} {}",
        "✅ Configuration saved to:".bright_green().bold(),
        args.output.display().to_string().cyan()
    );
    println!();
    println!("{}", "📝 Next steps:".bright_blue().bold());
    println!("   1. Export NAMEWISE_API_KEY with your inference service key");
    println!(
        "   2. Run with: {}",
        format!("namewise --config {} analyze <paths>", args.output.display()).cyan()
    );
    println!();
    println!("{}", "🔧 Key settings you can customize:".bright_blue().bold());

    let rows = vec![
        SettingRow::new("inference.api_url", "Chat-completions endpoint (OpenAI compatible)"),
        SettingRow::new("inference.model", "Model used for pattern inference"),
        SettingRow::new("inference.temperature", "Sampling temperature (default: 0.3)"),
        SettingRow::new("rename.backup_originals", "Copy files aside before renaming"),
        SettingRow::new("session.max_history", "Results kept in history (0 = all)"),
    ];
    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);

    Ok(())
}

/// Validate a namewise configuration file
pub async fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "🔍 Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let config = match load_configuration(Some(&args.config)) {
        Ok(config) => {
            println!("{}", "✅ Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {:#}", "❌ Configuration validation failed:".red(), e);
            println!();
            println!("{}", "🔧 Common issues:".bright_blue().bold());
            println!("   • Check YAML syntax (indentation, colons, quotes)");
            println!("   • api_url must start with http:// or https://");
            println!("   • temperature must be between 0.0 and 2.0");
            println!();
            println!(
                "{}",
                "💡 Tip: Use 'namewise print-default-config' to see valid format".dimmed()
            );
            return Err(anyhow::anyhow!("Configuration validation failed: {:#}", e));
        }
    };

    let mut rows = vec![
        SettingRow::new("Endpoint", &config.inference.api_url),
        SettingRow::new("Model", &config.inference.model),
        SettingRow::new(
            "API Key",
            if config.inference.is_api_configured() {
                "configured"
            } else {
                "missing"
            },
        ),
    ];
    if args.detailed {
        rows.extend([
            SettingRow::new("Temperature", config.inference.temperature),
            SettingRow::new("Timeout (s)", config.inference.timeout_secs),
            SettingRow::new("Backups", config.rename.backup_originals),
            SettingRow::new("Backup Directory", config.rename.backup_directory.display()),
            SettingRow::new(
                "History Limit",
                match config.session.max_history {
                    0 => "unlimited".to_string(),
                    n => n.to_string(),
                },
            ),
            SettingRow::new("Session File", config.session.resolve_session_file().display()),
        ]);
    }

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);

    if !config.inference.is_api_configured() {
        println!();
        println!(
            "{}",
            "💡 Set NAMEWISE_API_KEY before running 'namewise analyze'".dimmed()
        );
    }

    Ok(())
}
