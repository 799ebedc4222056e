//! User display models
//!
//! There is no user endpoint; accounts are derived from activation owners.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use super::common::or_dash;
use crate::client::models::{ActivationRecord, ActivationStatus};
use crate::output::formatters::format_date;

/// Account row for `user list`.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "USER ID")]
    pub id: String,

    #[tabled(rename = "USERNAME")]
    pub username: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    /// Codes owned by the account
    #[tabled(rename = "CODES")]
    pub codes: usize,

    /// Codes currently usable
    #[tabled(rename = "ACTIVE")]
    pub active: usize,

    #[tabled(rename = "LATEST EXPIRY")]
    pub latest_expiry: String,
}

/// One row per owning user, sorted by email.
///
/// Codes without an owner are skipped.
pub fn summarize_users(records: &[ActivationRecord], now: DateTime<Utc>) -> Vec<UserDisplay> {
    struct Tally<'a> {
        username: &'a str,
        email: &'a str,
        codes: usize,
        active: usize,
        latest: DateTime<Utc>,
    }

    let mut by_user: BTreeMap<&str, Tally> = BTreeMap::new();
    for record in records {
        let Some(user) = record.user.as_ref() else {
            continue;
        };

        let tally = by_user.entry(user.id.as_str()).or_insert(Tally {
            username: &user.username,
            email: &user.email,
            codes: 0,
            active: 0,
            latest: record.expires_at,
        });
        tally.codes += 1;
        if record.effective_status(now) == ActivationStatus::Active {
            tally.active += 1;
        }
        tally.latest = tally.latest.max(record.expires_at);
    }

    let mut rows: Vec<UserDisplay> = by_user
        .into_iter()
        .map(|(id, t)| UserDisplay {
            id: id.to_string(),
            username: or_dash(Some(t.username)),
            email: or_dash(Some(t.email)),
            codes: t.codes,
            active: t.active,
            latest_expiry: format_date(t.latest),
        })
        .collect();

    rows.sort_by(|a, b| a.email.cmp(&b.email).then_with(|| a.id.cmp(&b.id)));
    rows
}
