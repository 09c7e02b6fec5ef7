//! Derived Status
//!
//! Display-only status computed from the stored status, a deadline date and
//! today's date. `today` is always passed in; nothing here reads the clock.

use chrono::NaiveDate;

use crate::domain::Entity;

/// Lookahead for the expiring-soon flag
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

/// Chip colour for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Error,
    Neutral,
}

impl Tone {
    pub fn color(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Info => "info",
            Tone::Warning => "warning",
            Tone::Error => "error",
            Tone::Neutral => "default",
        }
    }
}

/// Colour for any raw status label across the eleven kinds
pub fn status_tone(label: &str) -> Tone {
    match label {
        "Completed" | "Paid" | "Active" | "Compliant" | "Passed" | "Approved" | "Available" => Tone::Success,
        "Scheduled" | "Pending" | "Draft" | "In Transit" => Tone::Info,
        "In Progress" | "Partially Paid" | "On Leave" | "Maintenance" => Tone::Warning,
        "Cancelled" | "Expired" | "Revoked" | "Non-Compliant" | "Failed" | "Rejected" | "Terminated"
        | "Overdue" => Tone::Error,
        _ => Tone::Neutral,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineKind {
    /// Target date passed without a terminal status
    Overdue,
    /// Validity window ended
    Expiry,
}

impl DeadlineKind {
    pub fn override_label(&self) -> &'static str {
        match self {
            DeadlineKind::Overdue => "Overdue",
            DeadlineKind::Expiry => "Expired",
        }
    }
}

/// Which date drives the override, and which statuses are immune to it
pub struct DeadlineRule<T> {
    pub field: &'static str,
    pub date: fn(&T) -> Option<NaiveDate>,
    pub kind: DeadlineKind,
    pub terminal: &'static [&'static str],
}

impl<T> DeadlineRule<T> {
    pub fn is_terminal(&self, status: &str) -> bool {
        self.terminal.iter().any(|t| *t == status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedStatus {
    pub label: String,
    pub tone: Tone,
    /// True when the label differs from the stored status
    pub overridden: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeadlineFlags {
    /// Override applied: past the date and not terminal
    pub overdue: bool,
    /// Past the date, regardless of status
    pub expired: bool,
    pub expiring_soon: bool,
    pub days_remaining: Option<i64>,
}

pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

pub fn deadline_flags<T: Entity>(record: &T, rule: Option<&DeadlineRule<T>>, today: NaiveDate) -> DeadlineFlags {
    let Some(rule) = rule else {
        return DeadlineFlags::default();
    };
    let Some(date) = (rule.date)(record) else {
        return DeadlineFlags::default();
    };
    let terminal = record.status().map_or(false, |s| rule.is_terminal(s));
    let days = days_until(date, today);
    let expired = days < 0;

    DeadlineFlags {
        overdue: expired && !terminal,
        expired,
        expiring_soon: !expired && !terminal && days > 0 && days <= EXPIRING_WINDOW_DAYS,
        days_remaining: Some(days),
    }
}

pub fn derive_status<T: Entity>(record: &T, rule: Option<&DeadlineRule<T>>, today: NaiveDate) -> DerivedStatus {
    let raw = record.status().unwrap_or_default();
    let flags = deadline_flags(record, rule, today);

    match rule {
        Some(rule) if flags.overdue => DerivedStatus {
            label: rule.kind.override_label().to_string(),
            tone: Tone::Error,
            overridden: true,
        },
        _ => DerivedStatus {
            label: raw.to_string(),
            tone: status_tone(raw),
            overridden: false,
        },
    }
}
