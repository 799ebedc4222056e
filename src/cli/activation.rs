//! Activation code commands

use std::path::Path;

use chrono::{DateTime, Utc};
use colored::Colorize;
use dialoguer::{Confirm, Select, theme::ColorfulTheme};
use log::debug;
use serde_json::json;

use crate::cli::args::GlobalOptions;
use crate::cli::qr::write_image;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::ActivationApi;
use crate::client::models::{
    ActivationRecord, ActivationStatus, ExpiryOffset, GenerateActivationRequest, StatusAction,
};
use crate::error::{Error, Result};
use crate::models::{ActivationDisplay, GeneratedDisplay};
use crate::output::Formattable;
use crate::output::formatters::format_date;
use crate::output::json::print_json;

/// List activation codes
pub async fn list(
    opts: &GlobalOptions,
    status: Option<ActivationStatus>,
    limit: Option<usize>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let records = ctx.progress.spin("Loading activation codes...", ctx.client.list_activations()).await?;
    debug!("Fetched {} activation codes", records.len());

    let rows = select_rows(&records, status, limit, Utc::now());
    rows.print(ctx.format)
}

/// Rows for `list`, filtered on effective status
fn select_rows(
    records: &[ActivationRecord],
    status: Option<ActivationStatus>,
    limit: Option<usize>,
    now: DateTime<Utc>,
) -> Vec<ActivationDisplay> {
    records
        .iter()
        .filter(|r| status.is_none_or(|s| r.effective_status(now) == s))
        .take(limit.unwrap_or(usize::MAX))
        .map(|r| ActivationDisplay::at(r, now))
        .collect()
}

/// Generate a new code
pub async fn generate(
    opts: &GlobalOptions,
    duration: Option<ExpiryOffset>,
    qr_out: Option<&Path>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let request = duration
        .map(GenerateActivationRequest::for_duration)
        .unwrap_or_default();

    let generated = ctx.progress.spin(
        "Generating activation code...",
        ctx.client.generate_activation(&request),
    )
    .await?;

    if let Some(path) = qr_out {
        write_image(&ctx, &generated.qr_code, path).await?;
        eprintln!("{} QR code written to {}", "✓".green(), path.display());
    }

    let display = GeneratedDisplay::from(generated);
    match ctx.format {
        OutputFormat::Json => print_json(&display)?,
        OutputFormat::Table => {
            eprintln!("{} Activation code generated", "✓".green());
            vec![display.for_table()].print(ctx.format)?;
        }
    }
    Ok(())
}

/// Suspend or reactivate a code
pub async fn change_status(opts: &GlobalOptions, needle: &str, action: StatusAction) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let (record, target, message) = ctx.progress.spin(
        "Updating status...",
        apply_status_action(ctx.client.as_ref(), needle, action, Utc::now()),
    )
    .await?;

    match ctx.format {
        OutputFormat::Json => print_json(&json!({
            "id": record.id,
            "code": record.code,
            "status": target,
            "message": message,
        }))?,
        OutputFormat::Table => {
            eprintln!(
                "{} {} is now {} ({})",
                "✓".green(),
                record.code.bold(),
                target,
                message
            );
        }
    }
    Ok(())
}

/// Validate `action` against the record's current status, then send it.
///
/// Returns the record as it was, the new status and the server message.
pub async fn apply_status_action(
    api: &dyn ActivationApi,
    needle: &str,
    action: StatusAction,
    now: DateTime<Utc>,
) -> Result<(ActivationRecord, ActivationStatus, String)> {
    let Some(target) = action.target_status() else {
        return Err(Error::Other(format!(
            "'{}' does not change status",
            action.label()
        )));
    };

    let record = find_record(api, needle).await?;
    ensure_allowed(&record, action, now)?;

    let message = api.update_status(&record.id, target).await?;
    Ok((record, target, message))
}

/// Extend a code's expiry
pub async fn extend(
    opts: &GlobalOptions,
    needle: &str,
    duration: Option<ExpiryOffset>,
    yes: bool,
    dry_run: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let now = Utc::now();

    let record = ctx.progress.spin("Loading activation code...", find_record(ctx.client.as_ref(), needle))
        .await?;
    ensure_allowed(&record, StatusAction::ExtendExpiration, now)?;

    let duration = match duration {
        Some(d) => d,
        None => prompt_duration()?,
    };
    let new_expiry = projected_expiry(&record, duration);

    if dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
        eprintln!("Would extend {} by {}", record.code.bold(), duration);
        eprintln!("  Current expiry: {}", format_date(record.expires_at));
        eprintln!("  New expiry:     {}", new_expiry);
        return Ok(());
    }

    if !yes {
        eprintln!(
            "Extend {} by {}? Expiry moves from {} to {}.",
            record.code.bold(),
            duration,
            format_date(record.expires_at),
            new_expiry
        );
        let confirm = Confirm::new()
            .with_prompt("Confirm extension?")
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let message = ctx.progress.spin(
        "Extending expiration...",
        ctx.client.extend_expiration(&record.id, duration),
    )
    .await?;

    match ctx.format {
        OutputFormat::Json => print_json(&json!({
            "id": record.id,
            "code": record.code,
            "offset": duration.offset,
            "unit": duration.unit,
            "message": message,
        }))?,
        OutputFormat::Table => eprintln!("{} {}", "✓".green(), message),
    }
    Ok(())
}

fn prompt_duration() -> Result<ExpiryOffset> {
    let labels: Vec<String> = ExpiryOffset::PRESETS.iter().map(|p| p.to_string()).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Extend by")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(ExpiryOffset::PRESETS[index])
}

/// Where the expiry should land; the server has the final word
fn projected_expiry(record: &ActivationRecord, duration: ExpiryOffset) -> String {
    duration
        .apply(record.expires_at)
        .map(format_date)
        .unwrap_or_else(|| "out of range".to_string())
}

/// Find a record by ID or code
pub async fn find_record(api: &dyn ActivationApi, needle: &str) -> Result<ActivationRecord> {
    api.list_activations()
        .await?
        .into_iter()
        .find(|r| r.matches(needle))
        .ok_or_else(|| Error::Other(format!("No activation code matches '{}'", needle)))
}

fn ensure_allowed(record: &ActivationRecord, action: StatusAction, now: DateTime<Utc>) -> Result<()> {
    let status = record.effective_status(now);
    if status.allows(action) {
        return Ok(());
    }

    let allowed = status
        .available_actions()
        .iter()
        .map(|a| a.label())
        .collect::<Vec<_>>()
        .join(", ");
    Err(Error::Other(format!(
        "Cannot {} {}: it is {} (allowed: {})",
        action.label(),
        record.code,
        status,
        allowed
    )))
}
