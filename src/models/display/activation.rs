//! Activation code display models

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use super::common::{or_dash, truncate_string};
use crate::client::models::{ActivationRecord, GeneratedActivation};
use crate::output::formatters::{format_date, format_relative};

/// Activation code row for `activation list`.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ActivationDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "CODE")]
    pub code: String,

    /// Status after accounting for lapsed expiry
    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "OWNER")]
    pub owner: String,

    #[tabled(rename = "EXPIRES")]
    pub expires: String,

    #[tabled(rename = "REMAINING")]
    #[serde(skip)]
    pub remaining: String,

    /// Actions an operator can take from here
    #[tabled(rename = "ACTIONS")]
    pub actions: String,

    #[tabled(skip)]
    pub expires_at: DateTime<Utc>,
}

impl ActivationDisplay {
    /// Build a row as of `now`
    pub fn at(record: &ActivationRecord, now: DateTime<Utc>) -> Self {
        let status = record.effective_status(now);
        let actions = status
            .available_actions()
            .iter()
            .map(|a| a.label())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            id: record.id.clone(),
            code: record.code.clone(),
            status: status.to_string(),
            owner: or_dash(record.user.as_ref().map(|u| u.email.as_str())),
            expires: format_date(record.expires_at),
            remaining: format_relative(record.expires_at, now),
            actions,
            expires_at: record.expires_at,
        }
    }
}

/// Result of `activation generate`.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct GeneratedDisplay {
    #[tabled(rename = "CODE")]
    pub code: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    /// QR image source, shortened for tables
    #[tabled(rename = "QR")]
    #[serde(rename = "qrCode")]
    pub qr: String,
}

impl From<GeneratedActivation> for GeneratedDisplay {
    fn from(generated: GeneratedActivation) -> Self {
        Self {
            code: generated.code,
            email: or_dash(Some(&generated.email)),
            qr: generated.qr_code,
        }
    }
}

impl GeneratedDisplay {
    /// Copy with the QR source cut to fit a table cell
    pub fn for_table(&self) -> Self {
        Self {
            qr: truncate_string(&self.qr, 40),
            ..self.clone()
        }
    }
}
