use colored::Colorize;

use streamline_rbac::error::{ErrorHint, ScopeError};
use streamline_rbac::RbacError;

/// Structured error information for user-friendly error display
struct ErrorInfo {
    /// What happened
    what: String,
    /// How to fix it
    fix: Option<String>,
}

/// Print the error followed by its hint
pub(crate) fn print_error_hint(e: &RbacError) {
    let info = ErrorInfo {
        what: match e {
            RbacError::Scope(ScopeError::MissingClusterId(kind)) => {
                format!("The {} id is not configured", kind)
            }
            RbacError::Transport(t) => match t.status_code() {
                Some(status) => format!("MDS answered with HTTP {}", status),
                None => e.to_string(),
            },
            _ => e.to_string(),
        },
        fix: e.hint(),
    };

    eprintln!("{} {}", "Error:".red().bold(), e);
    eprintln!();
    eprintln!("  {} {}", "What:".cyan().bold(), info.what);
    if let Some(fix) = &info.fix {
        eprintln!("  {} {}", "Fix:".cyan().bold(), fix);
    }
    eprintln!();
}
