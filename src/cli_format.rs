use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use streamline_rbac::{RbacError, Result};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a value as pretty JSON
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(RbacError::from)?;
    println!("{}", rendered);
    Ok(())
}

/// Print a list: one item per line in text mode, a JSON array otherwise
pub(crate) fn print_list<T>(format: OutputFormat, title: &str, items: &[T]) -> Result<()>
where
    T: Serialize + std::fmt::Display,
{
    match format {
        OutputFormat::Json => print_json(items),
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{} {}", title.bold(), "(none found)".dimmed());
                return Ok(());
            }
            println!("{} ({})", title.bold(), items.len());
            for item in items {
                println!("  {}", item);
            }
            Ok(())
        }
    }
}

/// Print a one-line success message in text mode
pub(crate) fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}
