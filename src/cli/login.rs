//! Session commands: login, logout, whoami

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use serde_json::json;

use crate::auth::{AuthClient, SignInWithPasswordParams};
use crate::cli::args::GlobalOptions;
use crate::cli::context::open_session;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::UserRecord;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::output::json::print_json;
use crate::output::table::format_details;

/// Sign in, prompting for whatever was not supplied
pub async fn login(
    opts: &GlobalOptions,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::unguarded(opts)?;

    let email = match email {
        Some(email) => email,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    let user = sign_in(&ctx, email, password).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&user_summary(&user))?,
        OutputFormat::Table => {
            eprintln!(
                "{} Signed in as {}",
                "✓".green(),
                user.display_name().bold()
            );
        }
    }
    Ok(())
}

/// Sign in with the context's client, behind a spinner
pub async fn sign_in(ctx: &CommandContext, email: String, password: String) -> Result<UserRecord> {
    let params = SignInWithPasswordParams { email, password };
    let user = ctx.progress.spin(
        "Signing in...",
        ctx.auth.sign_in_with_password(ctx.client.as_ref(), &params),
    )
    .await?;
    Ok(user)
}

/// Remove the stored session. Works without config or network.
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let auth = AuthClient::new(open_session(opts));
    let was_signed_in = auth.is_authenticated();
    auth.sign_out()?;

    if was_signed_in {
        eprintln!("{} Signed out", "✓".green());
    } else {
        eprintln!("Not signed in.");
    }
    Ok(())
}

/// Show the signed-in user from the local session
pub fn whoami(opts: &GlobalOptions) -> Result<()> {
    let config = Config::load_or_default_at(opts.config_ref())?;
    let auth = AuthClient::new(open_session(opts));

    let Some(user) = auth.get_user() else {
        return Err(ApiError::NotSignedIn.into());
    };

    match opts.resolve_format(&config) {
        OutputFormat::Json => print_json(&user_summary(&user))?,
        OutputFormat::Table => println!("{}", format_details(&user_details(&user))),
    }
    Ok(())
}

/// User fields safe to print; never the token
fn user_summary(user: &UserRecord) -> serde_json::Value {
    json!({
        "id": user.id,
        "email": user.email,
        "name": user.display_name(),
        "role": user.role,
    })
}

fn user_details(user: &UserRecord) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Name", user.display_name())];
    if let Some(email) = &user.email {
        rows.push(("Email", email.clone()));
    }
    if let Some(id) = &user.id {
        rows.push(("User ID", id.clone()));
    }
    rows.push(("Role", user.role.clone()));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_details_skip_missing_fields() {
        let user: UserRecord =
            serde_json::from_str(r#"{"token":"t","role":"superadmin","email":"a@b.c"}"#).unwrap();
        let rows = user_details(&user);

        let keys: Vec<&str> = rows.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["Name", "Email", "Role"]);
        assert_eq!(rows[0].1, "a@b.c");
    }

    #[test]
    fn test_summary_omits_token() {
        let user: UserRecord =
            serde_json::from_str(r#"{"token":"secret","role":"superadmin"}"#).unwrap();
        let summary = user_summary(&user);

        assert!(summary.get("token").is_none());
        assert_eq!(summary["role"], "superadmin");
    }
}
