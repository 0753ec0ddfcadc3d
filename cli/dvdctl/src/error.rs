//! Error handling and display for the CLI.

use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("API error: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        request_id: Option<String>,
        details: Vec<(String, String)>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("No film titled '{0}'")]
    TitleNotFound(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create an API error from response details.
    pub fn api(
        status: u16,
        code: impl Into<String>,
        message: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        Self::Api {
            status,
            code: code.into(),
            message: message.into(),
            request_id,
            details: Vec::new(),
        }
    }

    /// Attach per-field validation messages.
    pub fn with_details(mut self, fields: Vec<(String, String)>) -> Self {
        if let Self::Api { details, .. } = &mut self {
            *details = fields;
        }
        self
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    let Some(cli_err) = err.downcast_ref::<CliError>() else {
        return;
    };

    if let CliError::Api {
        request_id,
        details,
        ..
    } = cli_err
    {
        for (field, message) in details {
            eprintln!("  {}: {}", field.bold(), message);
        }
        if let Some(request_id) = request_id {
            eprintln!("\nRequest ID: {}", request_id);
        }
    }

    if let Some(hint) = hint(cli_err) {
        eprintln!("\n{}", format!("Hint: {hint}").yellow());
    }
}

fn hint(err: &CliError) -> Option<&'static str> {
    match err {
        CliError::TitleNotFound(_) => Some("Titles are matched exactly, including case."),
        CliError::Network(_) => {
            Some("Check that the catalog API is running and the API URL is correct.")
        }
        CliError::Api { status: 404, .. } => {
            Some("List the catalog with `dvd films list` to see existing film IDs.")
        }
        CliError::Api { .. } | CliError::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_hint_only_for_title_lookups() {
        let by_title = CliError::TitleNotFound("Heat".to_string());
        assert_eq!(hint(&by_title), Some("Titles are matched exactly, including case."));

        let unknown_id = CliError::api(404, "film_not_found", "No film matches 'x'", None);
        let id_hint = hint(&unknown_id).unwrap();
        assert!(!id_hint.contains("Titles"));
    }

    #[test]
    fn test_no_hint_for_validation_errors() {
        let err = CliError::api(422, "validation_failed", "Film record failed validation", None);
        assert_eq!(hint(&err), None);
    }
}
