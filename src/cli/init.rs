//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::cli::login::sign_in;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the API base URL, saves the config and offers to sign in.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to actctl!".bold().green());
    println!("Let's point actctl at your admin API.\n");

    let mut config = Config::load_or_default_at(opts.config_ref())?;
    let theme = ColorfulTheme::default();

    let suggested = opts
        .api_url
        .clone()
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| "https://".to_string());

    let entered: String = Input::with_theme(&theme)
        .with_prompt("API base URL")
        .with_initial_text(suggested)
        .interact_text()?;

    // Validates the scheme and normalizes the trailing slash
    let api_url = config.api_url(Some(&entered))?;
    config.api_url = Some(api_url);
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    let sign_in_now = Confirm::with_theme(&theme)
        .with_prompt("Sign in now?")
        .default(true)
        .interact()?;

    if sign_in_now {
        let email: String = Input::with_theme(&theme)
            .with_prompt("Email")
            .interact_text()?;
        let password = Password::with_theme(&theme)
            .with_prompt("Password")
            .interact()?;

        // Config is on disk now, so the context picks up the new URL
        let ctx = CommandContext::unguarded(&GlobalOptions {
            api_url: None,
            ..opts.clone()
        })?;
        let user = sign_in(&ctx, email, password).await?;
        println!(
            "{} Signed in as {}",
            "✓".green(),
            user.display_name().bold()
        );
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "actctl status".cyan());
    println!("  {} - List activation codes", "actctl activation list".cyan());

    Ok(())
}
