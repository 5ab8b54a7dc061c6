//! Warranty lifecycle rules.
//!
//! Every surface that shows a warranty (appliance list, detail view, stats,
//! admin CLI) derives it through this module, so the date semantics live in
//! exactly one place.
//!
//! # Rules
//!
//! - End date = purchase date + N calendar months. Day-of-month is preserved
//!   and clamped to the last day of shorter months (Jan 31 + 1 month is the
//!   last day of February).
//! - A warranty is [`WarrantyStatus::Expired`] only once "today" is strictly
//!   after the end date. On the end date itself it is still
//!   [`WarrantyStatus::ExpiringSoon`].
//! - Within [`EXPIRING_SOON_DAYS`] days of the end date the status is
//!   [`WarrantyStatus::ExpiringSoon`], otherwise [`WarrantyStatus::Active`].
//!
//! All comparisons are made on civil dates. Callers holding an instant reduce
//! it to its UTC date first (see [`warranty_status_at`]).

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of days before the end date during which a warranty counts as
/// expiring soon (inclusive).
pub const EXPIRING_SOON_DAYS: i64 = 30;

/// Label returned by [`format_display_date`] for unparsable input.
pub const UNKNOWN_DATE: &str = "Unknown";

/// Derived warranty classification. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarrantyStatus {
    Active,
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
    Expired,
}

impl WarrantyStatus {
    /// Human-readable label, as shown by the clients.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
        }
    }
}

impl fmt::Display for WarrantyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns the last covered day of a warranty.
///
/// `months` must be positive; that is enforced where the value enters the
/// system, not here. Dates past the end of the representable calendar
/// saturate at [`NaiveDate::MAX`].
pub fn warranty_end_date(purchase_date: NaiveDate, months: u32) -> NaiveDate {
    purchase_date
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Classifies a warranty relative to the given civil date.
pub fn warranty_status_on(purchase_date: NaiveDate, months: u32, today: NaiveDate) -> WarrantyStatus {
    let end_date = warranty_end_date(purchase_date, months);

    if today > end_date {
        return WarrantyStatus::Expired;
    }

    let days_until_expiry = end_date.signed_duration_since(today).num_days();
    if days_until_expiry <= EXPIRING_SOON_DAYS {
        WarrantyStatus::ExpiringSoon
    } else {
        WarrantyStatus::Active
    }
}

/// Classifies a warranty relative to an instant, using its UTC date.
pub fn warranty_status_at(purchase_date: NaiveDate, months: u32, now: DateTime<Utc>) -> WarrantyStatus {
    warranty_status_on(purchase_date, months, now.date_naive())
}

/// Classifies a warranty relative to the current UTC date.
pub fn warranty_status(purchase_date: NaiveDate, months: u32) -> WarrantyStatus {
    warranty_status_at(purchase_date, months, Utc::now())
}

/// Renders a date string as a short label such as `Jan 31, 2024`.
///
/// Accepts `YYYY-MM-DD` dates and RFC 3339 timestamps. Anything else yields
/// [`UNKNOWN_DATE`] rather than an error, since the input usually comes
/// straight from stored user data. Callers holding a parsed date use
/// [`format_date_label`].
pub fn format_display_date(value: &str) -> String {
    let value = value.trim();

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        });

    match date {
        Some(date) => format_date_label(date),
        None => UNKNOWN_DATE.to_string(),
    }
}

/// Short label for an already parsed date.
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Status bucket selector used by the listing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Expiring,
    Expired,
}

impl StatusFilter {
    /// Returns true if a record with `status` belongs in this bucket.
    pub fn matches(self, status: WarrantyStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status == WarrantyStatus::Active,
            Self::Expiring => status == WarrantyStatus::ExpiringSoon,
            Self::Expired => status == WarrantyStatus::Expired,
        }
    }
}

/// Anything carrying the two inputs of the warranty rule.
pub trait WarrantyTerms {
    fn purchase_date(&self) -> NaiveDate;
    fn warranty_duration_months(&self) -> u32;

    fn warranty_end_date(&self) -> NaiveDate {
        warranty_end_date(self.purchase_date(), self.warranty_duration_months())
    }

    fn warranty_status_on(&self, today: NaiveDate) -> WarrantyStatus {
        warranty_status_on(self.purchase_date(), self.warranty_duration_months(), today)
    }
}

impl WarrantyTerms for (NaiveDate, u32) {
    fn purchase_date(&self) -> NaiveDate {
        self.0
    }

    fn warranty_duration_months(&self) -> u32 {
        self.1
    }
}

/// Per-bucket counts over a collection of warranties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WarrantySummary {
    pub total: usize,
    pub active: usize,
    pub expiring: usize,
    pub expired: usize,
}

impl WarrantySummary {
    /// Counts how many records fall into each status bucket on `today`.
    pub fn tally<'a, T, I>(records: I, today: NaiveDate) -> Self
    where
        T: WarrantyTerms + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        records
            .into_iter()
            .fold(Self::default(), |mut summary, record| {
                summary.record(record.warranty_status_on(today));
                summary
            })
    }

    /// Adds a single already-computed status.
    pub fn record(&mut self, status: WarrantyStatus) {
        self.total += 1;
        match status {
            WarrantyStatus::Active => self.active += 1,
            WarrantyStatus::ExpiringSoon => self.expiring += 1,
            WarrantyStatus::Expired => self.expired += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_date_is_deterministic() {
        let purchase = date(2023, 6, 15);
        assert_eq!(
            warranty_end_date(purchase, 24),
            warranty_end_date(purchase, 24)
        );
        assert_eq!(warranty_end_date(purchase, 24), date(2025, 6, 15));
    }

    #[test]
    fn test_end_date_clamps_to_leap_february() {
        assert_eq!(warranty_end_date(date(2024, 1, 31), 1), date(2024, 2, 29));
    }

    #[test]
    fn test_end_date_clamps_to_common_february() {
        assert_eq!(warranty_end_date(date(2024, 1, 31), 13), date(2025, 2, 28));
    }

    #[test]
    fn test_end_date_clamps_to_thirty_day_month() {
        assert_eq!(warranty_end_date(date(2024, 8, 31), 1), date(2024, 9, 30));
    }

    #[test]
    fn test_end_date_saturates_far_future() {
        assert_eq!(warranty_end_date(NaiveDate::MAX, 12), NaiveDate::MAX);
    }

    #[test]
    fn test_status_on_end_date_is_expiring_soon() {
        let today = date(2025, 3, 10);
        let purchase = date(2024, 3, 10);
        assert_eq!(warranty_end_date(purchase, 12), today);
        assert_eq!(
            warranty_status_on(purchase, 12, today),
            WarrantyStatus::ExpiringSoon
        );
    }

    #[test]
    fn test_status_day_after_end_date_is_expired() {
        let purchase = date(2024, 3, 10);
        let today = date(2025, 3, 11);
        assert_eq!(warranty_status_on(purchase, 12, today), WarrantyStatus::Expired);
    }

    #[test]
    fn test_status_25_days_out_is_expiring_soon() {
        let today = date(2025, 1, 1);
        let purchase = (today + Duration::days(25)) - Months::new(12);
        assert_eq!(warranty_end_date(purchase, 12), today + Duration::days(25));
        assert_eq!(
            warranty_status_on(purchase, 12, today),
            WarrantyStatus::ExpiringSoon
        );
    }

    #[test]
    fn test_status_30_days_out_is_expiring_soon() {
        let today = date(2025, 1, 1);
        let purchase = (today + Duration::days(30)) - Months::new(12);
        assert_eq!(
            warranty_status_on(purchase, 12, today),
            WarrantyStatus::ExpiringSoon
        );
    }

    #[test]
    fn test_status_31_days_out_is_active() {
        let today = date(2025, 1, 1);
        let purchase = (today + Duration::days(31)) - Months::new(12);
        assert_eq!(warranty_end_date(purchase, 12), today + Duration::days(31));
        assert_eq!(warranty_status_on(purchase, 12, today), WarrantyStatus::Active);
    }

    #[test]
    fn test_status_at_uses_utc_date_not_time_of_day() {
        let purchase = date(2024, 3, 10);
        let late_on_end_date = Utc.with_ymd_and_hms(2025, 3, 10, 23, 59, 59).unwrap();
        assert_eq!(
            warranty_status_at(purchase, 12, late_on_end_date),
            WarrantyStatus::ExpiringSoon
        );
    }

    #[test]
    fn test_status_without_instant_uses_current_date() {
        let today = Utc::now().date_naive();
        assert_eq!(warranty_status(today, 24), WarrantyStatus::Active);
    }

    #[test]
    fn test_summary_counts_buckets() {
        let today = date(2025, 1, 1);
        let records = vec![
            (date(2024, 6, 1), 24u32),
            (date(2024, 12, 1), 12),
            (date(2024, 1, 20), 12),
            (date(2020, 1, 1), 12),
        ];

        let statuses: Vec<_> = records.iter().map(|r| r.warranty_status_on(today)).collect();
        assert_eq!(
            statuses,
            vec![
                WarrantyStatus::Active,
                WarrantyStatus::Active,
                WarrantyStatus::ExpiringSoon,
                WarrantyStatus::Expired,
            ]
        );

        let summary = WarrantySummary::tally(&records, today);
        assert_eq!(
            summary,
            WarrantySummary {
                total: 4,
                active: 2,
                expiring: 1,
                expired: 1,
            }
        );
    }

    #[test]
    fn test_summary_of_empty_collection() {
        let records: Vec<(NaiveDate, u32)> = Vec::new();
        assert_eq!(
            WarrantySummary::tally(&records, date(2025, 1, 1)),
            WarrantySummary::default()
        );
    }

    #[test]
    fn test_status_filter_matches() {
        assert!(StatusFilter::All.matches(WarrantyStatus::Expired));
        assert!(StatusFilter::Active.matches(WarrantyStatus::Active));
        assert!(!StatusFilter::Active.matches(WarrantyStatus::ExpiringSoon));
        assert!(StatusFilter::Expiring.matches(WarrantyStatus::ExpiringSoon));
        assert!(StatusFilter::Expired.matches(WarrantyStatus::Expired));
        assert!(!StatusFilter::Expired.matches(WarrantyStatus::Active));
    }

    #[test]
    fn test_status_serializes_as_client_labels() {
        assert_eq!(
            serde_json::to_string(&WarrantyStatus::ExpiringSoon).unwrap(),
            "\"Expiring Soon\""
        );
        assert_eq!(WarrantyStatus::Active.to_string(), "Active");
    }

    #[test]
    fn test_format_display_date_unparsable() {
        assert_eq!(format_display_date("not a date"), "Unknown");
        assert_eq!(format_display_date(""), "Unknown");
        assert_eq!(format_display_date("2024-02-30"), "Unknown");
    }

    #[test]
    fn test_format_display_date_iso_date() {
        let label = format_display_date("2024-01-31");
        assert!(!label.is_empty());
        assert_eq!(label, "Jan 31, 2024");
    }

    #[test]
    fn test_format_display_date_rfc3339() {
        assert_eq!(format_display_date("2024-03-05T10:00:00Z"), "Mar 5, 2024");
    }
}
