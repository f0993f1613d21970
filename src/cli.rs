//! Command-line interface definitions for Myanmar News Digest.
//!
//! The run itself takes no parameters: the target date, keywords and source
//! list are fixed. Deployment settings (LLM config, mail credentials) are read
//! from environment variables, with long flags as overrides.

use clap::Parser;

/// Deployment settings for a digest run.
///
/// # Examples
///
/// ```sh
/// EMAIL_SENDER=me@gmail.com GMAIL_APP_PASSWORD=... \
///   EMAIL_RECIPIENTS=a@example.com,b@example.com myanmar_news_digest
///
/// # Render only, print the HTML
/// DIGEST_DRY_RUN=true myanmar_news_digest
/// ```
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to the LLM config.yaml file
    #[arg(long, env = "AWFUL_AJ_CONFIG")]
    pub config: Option<String>,

    /// Address the digest is sent from; also the SMTP login
    #[arg(long, env = "EMAIL_SENDER", required_unless_present = "dry_run")]
    pub sender: Option<String>,

    /// SMTP password (an app password for Gmail)
    #[arg(long, env = "GMAIL_APP_PASSWORD", hide_env_values = true, required_unless_present = "dry_run")]
    pub password: Option<String>,

    /// Comma-separated recipient addresses
    #[arg(
        long,
        env = "EMAIL_RECIPIENTS",
        value_delimiter = ',',
        required_unless_present = "dry_run"
    )]
    pub recipients: Vec<String>,

    /// SMTP submission host (implicit TLS on port 465)
    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// Render the digest and print it instead of sending
    #[arg(long, env = "DIGEST_DRY_RUN")]
    pub dry_run: bool,
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("config", &self.config)
            .field("sender", &self.sender)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("recipients", &self.recipients)
            .field("smtp_host", &self.smtp_host)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "myanmar_news_digest",
            "--sender",
            "me@example.com",
            "--password",
            "secret",
            "--recipients",
            "a@example.com,b@example.com",
        ])
        .unwrap();

        assert_eq!(cli.sender.as_deref(), Some("me@example.com"));
        assert_eq!(cli.recipients, vec!["a@example.com", "b@example.com"]);
        assert_eq!(cli.smtp_host, "smtp.gmail.com");
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_dry_run_needs_no_credentials() {
        let cli = Cli::try_parse_from(["myanmar_news_digest", "--dry-run"]).unwrap();
        assert!(cli.dry_run);
        assert!(cli.recipients.is_empty());
    }

    #[test]
    fn test_cli_debug_redacts_password() {
        let cli = Cli::try_parse_from([
            "myanmar_news_digest",
            "--dry-run",
            "--password",
            "hunter2",
        ])
        .unwrap();
        let shown = format!("{cli:?}");
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("<redacted>"));
    }
}
