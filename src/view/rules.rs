//! Per-Entity Display Rules
//!
//! Deadline rule, default column sort and summary stats for each kind.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::derive::{deadline_flags, days_until, DeadlineKind, DeadlineRule, EXPIRING_WINDOW_DAYS};
use super::sort::SortSpec;
use super::stats::{count_where, Stat};
use crate::domain::*;

/// Display-derivation rules for one entity kind
pub trait Derive: Entity {
    /// Date that drives the Overdue/Expired override, if any
    fn deadline() -> Option<DeadlineRule<Self>> {
        None
    }

    /// Column the table sorts by before the user picks one
    fn default_sort() -> Option<SortSpec> {
        None
    }

    /// Summary cards over the full list
    fn stats(records: &[Self], today: NaiveDate) -> Vec<Stat>;
}

fn overdue_count<T: Derive>(records: &[T], today: NaiveDate) -> usize {
    let rule = T::deadline();
    count_where(records, |r| deadline_flags(r, rule.as_ref(), today).overdue)
}

fn expiring_count<T: Derive>(records: &[T], today: NaiveDate) -> usize {
    let rule = T::deadline();
    count_where(records, |r| deadline_flags(r, rule.as_ref(), today).expiring_soon)
}

fn expired_count<T: Derive>(records: &[T], today: NaiveDate) -> usize {
    let rule = T::deadline();
    count_where(records, |r| deadline_flags(r, rule.as_ref(), today).expired)
}

impl Derive for Audit {
    fn deadline() -> Option<DeadlineRule<Self>> {
        Some(DeadlineRule {
            field: "scheduled_date",
            date: |a: &Audit| a.scheduled_date,
            kind: DeadlineKind::Overdue,
            terminal: &["Completed", "Cancelled"],
        })
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("scheduled_date"))
    }

    fn stats(records: &[Self], today: NaiveDate) -> Vec<Stat> {
        vec![
            Stat::count("Total audits", records.len()),
            Stat::count("Scheduled", count_where(records, |a| a.status == AuditStatus::Scheduled)),
            Stat::count("In progress", count_where(records, |a| a.status == AuditStatus::InProgress)),
            Stat::count("Completed", count_where(records, |a| a.status == AuditStatus::Completed)),
            Stat::count("Overdue", overdue_count(records, today)),
            Stat::average("Average score", records.iter().filter_map(|a| a.score)),
        ]
    }
}

impl Derive for Bill {
    fn deadline() -> Option<DeadlineRule<Self>> {
        Some(DeadlineRule {
            field: "due_date",
            date: |b: &Bill| b.due_date,
            kind: DeadlineKind::Overdue,
            terminal: &["Paid", "Cancelled"],
        })
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("due_date"))
    }

    fn stats(records: &[Self], today: NaiveDate) -> Vec<Stat> {
        let billed: f64 = records
            .iter()
            .filter(|b| b.status != BillStatus::Cancelled)
            .map(|b| b.amount)
            .sum();
        let paid: f64 = records
            .iter()
            .map(|b| match b.status {
                BillStatus::Paid => b.amount,
                BillStatus::Cancelled => 0.0,
                _ => b.paid_amount.unwrap_or(0.0),
            })
            .sum();
        vec![
            Stat::count("Total bills", records.len()),
            Stat::amount("Total billed", billed),
            Stat::amount("Collected", paid),
            Stat::amount("Outstanding", records.iter().map(Bill::outstanding).sum()),
            Stat::count("Overdue", overdue_count(records, today)),
        ]
    }
}

impl Derive for Certification {
    fn deadline() -> Option<DeadlineRule<Self>> {
        Some(DeadlineRule {
            field: "expiry_date",
            date: |c: &Certification| c.expiry_date,
            kind: DeadlineKind::Expiry,
            terminal: &["Expired", "Revoked"],
        })
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("expiry_date"))
    }

    fn stats(records: &[Self], today: NaiveDate) -> Vec<Stat> {
        let rule = Self::deadline();
        let active = count_where(records, |c| {
            c.status == CertificationStatus::Active && !deadline_flags(c, rule.as_ref(), today).expired
        });
        vec![
            Stat::count("Total certifications", records.len()),
            Stat::count("Active", active),
            Stat::count("Expiring soon", expiring_count(records, today)),
            Stat::count("Expired", expired_count(records, today)),
        ]
    }
}

impl Derive for ComplianceRecord {
    fn deadline() -> Option<DeadlineRule<Self>> {
        Some(DeadlineRule {
            field: "due_date",
            date: |c: &ComplianceRecord| c.due_date,
            kind: DeadlineKind::Overdue,
            terminal: &["Compliant"],
        })
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("due_date"))
    }

    fn stats(records: &[Self], today: NaiveDate) -> Vec<Stat> {
        let compliant = count_where(records, |c| c.status == ComplianceStatus::Compliant);
        vec![
            Stat::count("Total records", records.len()),
            Stat::count("Compliant", compliant),
            Stat::count("Non-compliant", count_where(records, |c| c.status == ComplianceStatus::NonCompliant)),
            Stat::count("Overdue", overdue_count(records, today)),
            Stat::percent("Compliance rate", compliant, records.len()),
        ]
    }
}

impl Derive for Document {
    fn deadline() -> Option<DeadlineRule<Self>> {
        Some(DeadlineRule {
            field: "expiry_date",
            date: |d: &Document| d.expiry_date,
            kind: DeadlineKind::Expiry,
            terminal: &["Archived", "Expired"],
        })
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("issue_date"))
    }

    fn stats(records: &[Self], today: NaiveDate) -> Vec<Stat> {
        vec![
            Stat::count("Total documents", records.len()),
            Stat::count("Active", count_where(records, |d| d.status == DocumentStatus::Active)),
            Stat::count("Expiring soon", expiring_count(records, today)),
            Stat::count("Expired", expired_count(records, today)),
        ]
    }
}

impl Derive for Employee {
    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("name"))
    }

    fn stats(records: &[Self], _today: NaiveDate) -> Vec<Stat> {
        let departments: BTreeSet<&str> = records
            .iter()
            .map(|e| e.department.as_str())
            .filter(|d| !d.is_empty())
            .collect();
        vec![
            Stat::count("Total employees", records.len()),
            Stat::count("Active", count_where(records, |e| e.status == EmployeeStatus::Active)),
            Stat::count("On leave", count_where(records, |e| e.status == EmployeeStatus::OnLeave)),
            Stat::count("Departments", departments.len()),
            Stat::amount(
                "Monthly payroll",
                records
                    .iter()
                    .filter(|e| e.status != EmployeeStatus::Terminated)
                    .filter_map(|e| e.salary)
                    .sum(),
            ),
        ]
    }
}

impl Derive for Fleet {
    fn deadline() -> Option<DeadlineRule<Self>> {
        Some(DeadlineRule {
            field: "next_service_date",
            date: |f: &Fleet| f.next_service_date,
            kind: DeadlineKind::Overdue,
            terminal: &["Retired"],
        })
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("next_service_date"))
    }

    fn stats(records: &[Self], today: NaiveDate) -> Vec<Stat> {
        let insurance_expiring = count_where(records, |f| {
            f.status != FleetStatus::Retired
                && f.insurance_expiry.map_or(false, |d| {
                    let days = days_until(d, today);
                    days > 0 && days <= EXPIRING_WINDOW_DAYS
                })
        });
        vec![
            Stat::count("Total vehicles", records.len()),
            Stat::count("Available", count_where(records, |f| f.status == FleetStatus::Available)),
            Stat::count("In maintenance", count_where(records, |f| f.status == FleetStatus::Maintenance)),
            Stat::count("Service overdue", overdue_count(records, today)),
            Stat::count("Insurance expiring", insurance_expiring),
        ]
    }
}

impl Derive for MilkEntry {
    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("date"))
    }

    fn stats(records: &[Self], today: NaiveDate) -> Vec<Stat> {
        let todays: Vec<&MilkEntry> = records.iter().filter(|m| m.date == Some(today)).collect();
        vec![
            Stat::count("Entries", records.len()),
            Stat::amount("Total litres", records.iter().map(|m| m.quantity).sum()),
            Stat::amount("Total amount", records.iter().map(MilkEntry::effective_amount).sum()),
            Stat::average("Average fat %", records.iter().filter_map(|m| m.fat_content)),
            Stat::amount("Litres today", todays.iter().map(|m| m.quantity).sum()),
        ]
    }
}

impl Derive for QualityTest {
    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("test_date"))
    }

    fn stats(records: &[Self], _today: NaiveDate) -> Vec<Stat> {
        let passed = count_where(records, |t| t.result == TestResult::Passed);
        let failed = count_where(records, |t| t.result == TestResult::Failed);
        vec![
            Stat::count("Total tests", records.len()),
            Stat::count("Passed", passed),
            Stat::count("Failed", failed),
            Stat::percent("Pass rate", passed, passed + failed),
            Stat::average("Average pH", records.iter().filter_map(|t| t.ph)),
        ]
    }
}

impl Derive for CustomerReview {
    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("review_date"))
    }

    fn stats(records: &[Self], _today: NaiveDate) -> Vec<Stat> {
        vec![
            Stat::count("Total reviews", records.len()),
            Stat::average("Average rating", records.iter().map(|r| r.rating as f64)),
            Stat::count("Pending", count_where(records, |r| r.status == ReviewStatus::Pending)),
            Stat::count("Approved", count_where(records, |r| r.status == ReviewStatus::Approved)),
            Stat::count("Rejected", count_where(records, |r| r.status == ReviewStatus::Rejected)),
        ]
    }
}

impl Derive for GroupMessage {
    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("sent_at"))
    }

    fn stats(records: &[Self], _today: NaiveDate) -> Vec<Stat> {
        let groups: BTreeSet<&str> = records.iter().map(|m| m.group_name.as_str()).collect();
        vec![
            Stat::count("Messages", records.len()),
            Stat::count("Groups", groups.len()),
            Stat::count("Urgent", count_where(records, |m| m.priority == MessagePriority::Urgent)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::stats::{find, StatValue};
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn bills() -> Vec<Bill> {
        serde_json::from_value(json!([
            {"id": "BIL0001", "amount": 1000.0, "status": "Paid", "due_date": "2024-06-01"},
            {"id": "BIL0002", "amount": 500.0, "paid_amount": 200.0, "status": "Partially Paid", "due_date": "2024-06-10"},
            {"id": "BIL0003", "amount": 300.0, "status": "Pending", "due_date": "2024-07-01"},
            {"id": "BIL0004", "amount": 50.0, "status": "Cancelled", "due_date": "2024-05-01"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_bill_stats() {
        let stats = Bill::stats(&bills(), today());
        assert_eq!(find(&stats, "Total bills"), Some(&StatValue::Count(4)));
        assert_eq!(find(&stats, "Total billed"), Some(&StatValue::Amount(1800.0)));
        assert_eq!(find(&stats, "Collected"), Some(&StatValue::Amount(1200.0)));
        assert_eq!(find(&stats, "Outstanding"), Some(&StatValue::Amount(600.0)));
        assert_eq!(find(&stats, "Overdue"), Some(&StatValue::Count(1)));
    }

    #[test]
    fn test_quality_pass_rate_ignores_pending() {
        let tests: Vec<QualityTest> = serde_json::from_value(json!([
            {"id": 1, "result": "Passed", "ph": 6.6},
            {"id": 2, "result": "Failed", "ph": 6.8},
            {"id": 3, "result": "Passed"},
            {"id": 4, "result": "Pending"}
        ]))
        .unwrap();
        let stats = QualityTest::stats(&tests, today());
        assert_eq!(find(&stats, "Pass rate").map(|v| v.to_string()).as_deref(), Some("66.7%"));
        assert_eq!(find(&stats, "Average pH").map(|v| v.to_string()).as_deref(), Some("6.7"));
    }

    #[test]
    fn test_fleet_service_and_insurance() {
        let fleet: Vec<Fleet> = serde_json::from_value(json!([
            {"id": "FLT0001", "status": "Available", "next_service_date": "2024-06-01", "insurance_expiry": "2024-07-01"},
            {"id": "FLT0002", "status": "Retired", "next_service_date": "2024-01-01", "insurance_expiry": "2024-06-20"},
            {"id": "FLT0003", "status": "In Transit", "next_service_date": "2024-09-01"}
        ]))
        .unwrap();
        let stats = Fleet::stats(&fleet, today());
        assert_eq!(find(&stats, "Service overdue"), Some(&StatValue::Count(1)));
        assert_eq!(find(&stats, "Insurance expiring"), Some(&StatValue::Count(1)));
    }

    #[test]
    fn test_milk_totals_use_rate_when_amount_missing() {
        let entries: Vec<MilkEntry> = serde_json::from_value(json!([
            {"id": 1, "shift": "Morning", "quantity": 10.0, "rate": 40.0, "fat_content": 4.0, "date": "2024-06-15"},
            {"id": 2, "shift": "Evening", "quantity": 5.0, "amount": 250.0, "fat_content": 5.0, "date": "2024-06-14"}
        ]))
        .unwrap();
        let stats = MilkEntry::stats(&entries, today());
        assert_eq!(find(&stats, "Total litres"), Some(&StatValue::Amount(15.0)));
        assert_eq!(find(&stats, "Total amount"), Some(&StatValue::Amount(650.0)));
        assert_eq!(find(&stats, "Average fat %"), Some(&StatValue::Average(Some(4.5))));
        assert_eq!(find(&stats, "Litres today"), Some(&StatValue::Amount(10.0)));
    }

    #[test]
    fn test_certification_counts() {
        let certs: Vec<Certification> = serde_json::from_value(json!([
            {"id": "CER0001", "status": "Active", "expiry_date": "2024-07-01"},
            {"id": "CER0002", "status": "Active", "expiry_date": "2024-06-01"},
            {"id": "CER0003", "status": "Active", "expiry_date": "2025-06-01"}
        ]))
        .unwrap();
        let stats = Certification::stats(&certs, today());
        assert_eq!(find(&stats, "Active"), Some(&StatValue::Count(2)));
        assert_eq!(find(&stats, "Expiring soon"), Some(&StatValue::Count(1)));
        assert_eq!(find(&stats, "Expired"), Some(&StatValue::Count(1)));
    }
}
