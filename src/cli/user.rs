//! User commands

use chrono::Utc;
use log::debug;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::ActivationApi;
use crate::error::Result;
use crate::models::summarize_users;
use crate::output::Formattable;

/// Run the user list command
pub async fn list(opts: &GlobalOptions, limit: Option<usize>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let records = ctx.progress.spin("Loading users...", ctx.client.list_activations()).await?;

    let mut users = summarize_users(&records, Utc::now());
    debug!("Derived {} users from {} codes", users.len(), records.len());

    if let Some(limit) = limit {
        users.truncate(limit);
    }
    users.print(ctx.format)
}
