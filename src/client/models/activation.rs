//! Activation code models and status rules

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Hours in one billing month as the server counts it
const HOURS_PER_MONTH: u64 = 24 * 30;

/// Hours in one billing year
const HOURS_PER_YEAR: u64 = 24 * 365;

/// Activation code record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRecord {
    /// Record ID
    #[serde(rename = "_id")]
    pub id: String,

    /// Activation code string
    pub code: String,

    /// When the subscription lapses
    pub expires_at: DateTime<Utc>,

    /// Status as stored by the server
    pub status: ActivationStatus,

    /// ID of the admin who generated the code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    /// Owning user
    #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user: Option<ActivationUser>,
}

impl ActivationRecord {
    /// Status after accounting for time: an ACTIVE code past its expiry is EXPIRED.
    pub fn effective_status(&self, now: DateTime<Utc>) -> ActivationStatus {
        if self.status == ActivationStatus::Active && self.expires_at <= now {
            ActivationStatus::Expired
        } else {
            self.status
        }
    }

    /// Whether `needle` names this record by ID or code
    pub fn matches(&self, needle: &str) -> bool {
        self.id == needle || self.code.eq_ignore_ascii_case(needle)
    }
}

/// User that owns an activation code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationUser {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

/// Activation status.
///
/// Sent uppercase; accepted from the server in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivationStatus {
    Active,
    Expired,
    Suspended,
    Closed,
    Deactivated,
}

impl ActivationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivationStatus::Active => "ACTIVE",
            ActivationStatus::Expired => "EXPIRED",
            ActivationStatus::Suspended => "SUSPENDED",
            ActivationStatus::Closed => "CLOSED",
            ActivationStatus::Deactivated => "DEACTIVATED",
        }
    }

    /// Actions an operator may take on a code in this status
    pub fn available_actions(self) -> &'static [StatusAction] {
        use StatusAction::*;
        match self {
            ActivationStatus::Active => &[Suspend, ExtendExpiration],
            ActivationStatus::Suspended => &[Reactivate, ExtendExpiration],
            ActivationStatus::Deactivated => &[Reactivate, ExtendExpiration],
            ActivationStatus::Closed => &[Reactivate],
            ActivationStatus::Expired => &[ExtendExpiration],
        }
    }

    pub fn allows(self, action: StatusAction) -> bool {
        self.available_actions().contains(&action)
    }
}

impl fmt::Display for ActivationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(ActivationStatus::Active),
            "EXPIRED" => Ok(ActivationStatus::Expired),
            "SUSPENDED" => Ok(ActivationStatus::Suspended),
            "CLOSED" => Ok(ActivationStatus::Closed),
            "DEACTIVATED" => Ok(ActivationStatus::Deactivated),
            _ => Err(format!("unknown activation status '{}'", s)),
        }
    }
}

impl<'de> Deserialize<'de> for ActivationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Operator action on an activation code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    /// ACTIVE → SUSPENDED
    Suspend,
    /// SUSPENDED | CLOSED | DEACTIVATED → ACTIVE
    Reactivate,
    /// Push the expiry date out; not a status change
    ExtendExpiration,
}

impl StatusAction {
    /// Status the server is asked to set, for actions that change status
    pub fn target_status(self) -> Option<ActivationStatus> {
        match self {
            StatusAction::Suspend => Some(ActivationStatus::Suspended),
            StatusAction::Reactivate => Some(ActivationStatus::Active),
            StatusAction::ExtendExpiration => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusAction::Suspend => "suspend",
            StatusAction::Reactivate => "reactivate",
            StatusAction::ExtendExpiration => "extend",
        }
    }
}

/// Unit of an expiry offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryUnit {
    #[serde(rename = "months")]
    Months,
    #[serde(rename = "year")]
    Year,
}

impl ExpiryUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpiryUnit::Months => "months",
            ExpiryUnit::Year => "year",
        }
    }
}

/// Subscription length such as "3 months" or "1 year"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryOffset {
    pub offset: u32,
    pub unit: ExpiryUnit,
}

impl ExpiryOffset {
    /// Durations offered by the console
    pub const PRESETS: [ExpiryOffset; 4] = [
        ExpiryOffset::months(1),
        ExpiryOffset::months(3),
        ExpiryOffset::months(9),
        ExpiryOffset::years(1),
    ];

    pub const fn months(offset: u32) -> Self {
        Self {
            offset,
            unit: ExpiryUnit::Months,
        }
    }

    pub const fn years(offset: u32) -> Self {
        Self {
            offset,
            unit: ExpiryUnit::Year,
        }
    }

    /// Length in hours, as sent in `expiresIn`
    pub fn hours(&self) -> u64 {
        let per_unit = match self.unit {
            ExpiryUnit::Months => HOURS_PER_MONTH,
            ExpiryUnit::Year => HOURS_PER_YEAR,
        };
        u64::from(self.offset) * per_unit
    }

    /// Plan value as the server knows it: "3 months", "1 year"
    pub fn plan_value(&self) -> String {
        format!("{} {}", self.offset, self.unit.as_str())
    }

    /// Calendar date this offset lands on when applied to `from`
    pub fn apply(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = match self.unit {
            ExpiryUnit::Months => self.offset,
            ExpiryUnit::Year => self.offset.checked_mul(12)?,
        };
        from.checked_add_months(Months::new(months))
    }
}

impl Default for ExpiryOffset {
    fn default() -> Self {
        ExpiryOffset::months(1)
    }
}

impl fmt::Display for ExpiryOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match (self.unit, self.offset) {
            (ExpiryUnit::Months, 1) => "Month",
            (ExpiryUnit::Months, _) => "Months",
            (ExpiryUnit::Year, 1) => "Year",
            (ExpiryUnit::Year, _) => "Years",
        };
        write!(f, "{} {}", self.offset, unit)
    }
}

impl FromStr for ExpiryOffset {
    type Err = String;

    /// Accepts "3 months", "1 year", "2 years" and the short forms "3m", "1y".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let split_at = normalized
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(normalized.len());
        let (number, unit) = normalized.split_at(split_at);

        let offset: u32 = number
            .parse()
            .map_err(|_| format!("invalid duration '{}': expected e.g. '3 months'", s))?;
        if offset == 0 {
            return Err(format!("invalid duration '{}': must be at least 1", s));
        }

        let unit = match unit.trim() {
            "m" | "month" | "months" => ExpiryUnit::Months,
            "y" | "year" | "years" => ExpiryUnit::Year,
            other => {
                return Err(format!(
                    "invalid duration unit '{}': use months or year",
                    other
                ));
            }
        };

        Ok(Self { offset, unit })
    }
}

/// Body of a generate call; absent fields are omitted
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateActivationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,

    /// Lifetime in hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

impl GenerateActivationRequest {
    pub fn for_duration(duration: ExpiryOffset) -> Self {
        Self {
            plan: Some(duration.plan_value()),
            expires_in: Some(duration.hours()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_none() && self.expires_in.is_none()
    }
}

/// Newly generated activation code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedActivation {
    pub code: String,

    /// QR image for the code, usually a data URL
    pub qr_code: String,

    pub email: String,
}

/// Body of a status update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub activation_id: String,
    pub status: ActivationStatus,
}

/// Body of an expiry extension
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendExpirationRequest {
    pub activation_id: String,
    pub offset: u32,
    pub unit: ExpiryUnit,
}
