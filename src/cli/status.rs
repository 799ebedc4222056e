//! Status command implementation

use colored::Colorize;

use crate::auth::{AuthClient, PRIVILEGED_ROLE};
use crate::cli::args::GlobalOptions;
use crate::cli::context::{open_session, session_path};
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};
use crate::session::Session;

/// Run the status command to display configuration and session status.
///
/// Purely local; no request is made.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "actctl Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!("Config file: {}", config_path.display().to_string().cyan());

    let config = match Config::load_from(config_path) {
        Ok(config) => Some(config),
        Err(Error::Config(ConfigError::NotFound)) => None,
        Err(e) => return Err(e),
    };

    println!();

    if let Some(url) = opts.api_url_ref() {
        println!("{} API URL: {} {}", "✓".green(), url, "(override)".dimmed());
    } else if let Some(url) = config.as_ref().and_then(|c| c.api_url.as_deref()) {
        println!("{} API URL: {}", "✓".green(), url);
    } else {
        println!("{} API URL not configured", "✗".red());
        println!("  → Run 'actctl init' to configure");
    }

    if let Some(config) = &config {
        println!(
            "{} Request timeout: {}s",
            "○".dimmed(),
            config.request_timeout_secs
        );
    }

    let session = open_session(opts);
    if let Some(path) = session_path(opts) {
        println!("{} Session file: {}", "○".dimmed(), path.display());
    }
    print_session(&session);

    println!();
    Ok(())
}

fn print_session(session: &Session) {
    let auth = AuthClient::new(session.clone());

    if auth.is_authenticated() {
        let name = auth
            .get_user()
            .map(|u| u.display_name())
            .unwrap_or_else(|| "unknown user".to_string());
        println!("{} Signed in as {}", "✓".green(), name.bold());
    } else if session.token().is_some() {
        println!(
            "{} Stored session lacks the {} role",
            "⚠".yellow(),
            PRIVILEGED_ROLE
        );
        println!("  → Run 'actctl login' to sign in again");
    } else {
        println!("{} Not signed in", "○".dimmed());
        println!("  → Run 'actctl login' to sign in");
    }
}
