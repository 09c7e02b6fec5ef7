//! Per-Entity Field Tables
//!
//! One static rule table per kind. Field names match the record's serde
//! names; choice lists come straight from the status enums.

use super::rules::{record_code, FieldKind, FieldRule, EMAIL, PHONE};
use crate::domain::*;

/// Form rules for one entity kind
pub trait Schema: Entity {
    const FIELDS: &'static [FieldRule];
}

const fn money(max: f64) -> FieldKind {
    FieldKind::Number { min: 0.0, max }
}

impl Schema for Audit {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::optional("id", "Audit ID", record_code("Audit ID must look like AUD0001")),
        FieldRule::required("audit_type", "Audit type", FieldKind::Text),
        FieldRule::required("auditor", "Auditor", FieldKind::Text),
        FieldRule::optional("department", "Department", FieldKind::Text),
        FieldRule::required("scheduled_date", "Scheduled date", FieldKind::Date),
        FieldRule::optional("completed_date", "Completed date", FieldKind::Date).not_before("scheduled_date"),
        FieldRule::required("status", "Status", FieldKind::Choice(AuditStatus::ALLOWED)),
        FieldRule::optional("score", "Score", FieldKind::Number { min: 0.0, max: 100.0 }),
        FieldRule::optional("findings", "Findings", FieldKind::Text),
    ];
}

impl Schema for Bill {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::optional("id", "Bill ID", record_code("Bill ID must look like BIL0001")),
        FieldRule::required("customer_name", "Customer name", FieldKind::Text),
        FieldRule::optional("customer_phone", "Customer phone", PHONE),
        FieldRule::required("bill_date", "Bill date", FieldKind::Date),
        FieldRule::required("due_date", "Due date", FieldKind::Date).not_before("bill_date"),
        FieldRule::required("amount", "Amount", money(10_000_000.0)),
        FieldRule::optional("paid_amount", "Paid amount", money(10_000_000.0)),
        FieldRule::required("status", "Status", FieldKind::Choice(BillStatus::ALLOWED)),
        FieldRule::optional("notes", "Notes", FieldKind::Text),
    ];
}

impl Schema for Certification {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::optional("id", "Certification ID", record_code("Certification ID must look like CER0001")),
        FieldRule::required("name", "Name", FieldKind::Text),
        FieldRule::required("certificate_number", "Certificate number", FieldKind::Text),
        FieldRule::required("issuing_authority", "Issuing authority", FieldKind::Text),
        FieldRule::required("issue_date", "Issue date", FieldKind::Date),
        FieldRule::required("expiry_date", "Expiry date", FieldKind::Date).not_before("issue_date"),
        FieldRule::required("status", "Status", FieldKind::Choice(CertificationStatus::ALLOWED)),
        FieldRule::optional("notes", "Notes", FieldKind::Text),
    ];
}

impl Schema for ComplianceRecord {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::optional("id", "Compliance ID", record_code("Compliance ID must look like CMP0001")),
        FieldRule::required("regulation", "Regulation", FieldKind::Text),
        FieldRule::required("category", "Category", FieldKind::Text),
        FieldRule::required("responsible_person", "Responsible person", FieldKind::Text),
        FieldRule::optional("inspection_date", "Inspection date", FieldKind::Date),
        FieldRule::required("due_date", "Due date", FieldKind::Date).not_before("inspection_date"),
        FieldRule::required("status", "Status", FieldKind::Choice(ComplianceStatus::ALLOWED)),
        FieldRule::optional("remarks", "Remarks", FieldKind::Text),
    ];
}

impl Schema for Document {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::optional("id", "Document ID", record_code("Document ID must look like DOC0001")),
        FieldRule::required("title", "Title", FieldKind::Text),
        FieldRule::required("category", "Category", FieldKind::Text),
        FieldRule::optional("owner", "Owner", FieldKind::Text),
        FieldRule::optional("issue_date", "Issue date", FieldKind::Date),
        FieldRule::optional("expiry_date", "Expiry date", FieldKind::Date).not_before("issue_date"),
        FieldRule::required("status", "Status", FieldKind::Choice(DocumentStatus::ALLOWED)),
        FieldRule::optional(
            "file_url",
            "File URL",
            FieldKind::Pattern { regex: r"^https?://\S+$", message: "File URL must start with http:// or https://" },
        ),
    ];
}

impl Schema for Employee {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::optional("id", "Employee ID", record_code("Employee ID must look like EMP0001")),
        FieldRule::required("name", "Name", FieldKind::Text),
        FieldRule::required("email", "Email", EMAIL),
        FieldRule::required("phone", "Phone", PHONE),
        FieldRule::required("department", "Department", FieldKind::Text),
        FieldRule::required("position", "Position", FieldKind::Text),
        FieldRule::required("join_date", "Join date", FieldKind::Date),
        FieldRule::optional("salary", "Salary", money(10_000_000.0)),
        FieldRule::required("status", "Status", FieldKind::Choice(EmployeeStatus::ALLOWED)),
    ];
}

impl Schema for Fleet {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::optional("id", "Vehicle ID", record_code("Vehicle ID must look like FLT0001")),
        FieldRule::required(
            "vehicle_number",
            "Vehicle number",
            FieldKind::Pattern {
                regex: r"^[A-Z]{2}[ -]?\d{1,2}[ -]?[A-Z]{1,3}[ -]?\d{1,4}$",
                message: "Vehicle number must look like MH12AB1234",
            },
        ),
        FieldRule::required("vehicle_type", "Vehicle type", FieldKind::Text),
        FieldRule::required("driver_name", "Driver", FieldKind::Text),
        FieldRule::optional("capacity_liters", "Capacity (L)", FieldKind::Number { min: 0.0, max: 50_000.0 }),
        FieldRule::optional("last_service_date", "Last service", FieldKind::Date),
        FieldRule::optional("next_service_date", "Next service", FieldKind::Date).not_before("last_service_date"),
        FieldRule::optional("insurance_expiry", "Insurance expiry", FieldKind::Date),
        FieldRule::required("status", "Status", FieldKind::Choice(FleetStatus::ALLOWED)),
    ];
}

impl Schema for MilkEntry {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::optional("id", "Entry ID", record_code("Entry ID must look like MLK0001")),
        FieldRule::required("farmer_id", "Farmer ID", record_code("Farmer ID must look like FRM0001")),
        FieldRule::required("farmer_name", "Farmer name", FieldKind::Text),
        FieldRule::required("date", "Date", FieldKind::Date),
        FieldRule::required("shift", "Shift", FieldKind::Choice(Shift::ALLOWED)),
        FieldRule::required("quantity", "Quantity", FieldKind::Number { min: 0.0, max: 10_000.0 }),
        FieldRule::optional("fat_content", "Fat %", FieldKind::Number { min: 0.0, max: 10.0 }),
        FieldRule::optional("snf", "SNF %", FieldKind::Number { min: 0.0, max: 15.0 }),
        FieldRule::optional("rate", "Rate", FieldKind::Number { min: 0.0, max: 1000.0 }),
        FieldRule::optional("amount", "Amount", money(10_000_000.0)),
    ];
}

impl Schema for QualityTest {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::optional("id", "Test ID", record_code("Test ID must look like QTS0001")),
        FieldRule::required("sample_id", "Sample ID", FieldKind::Text),
        FieldRule::optional("batch_number", "Batch number", FieldKind::Text),
        FieldRule::required("test_date", "Test date", FieldKind::Date),
        FieldRule::required("ph", "pH", FieldKind::Number { min: 6.0, max: 8.0 }),
        FieldRule::optional("fat_content", "Fat %", FieldKind::Number { min: 0.0, max: 10.0 }),
        FieldRule::optional("snf", "SNF %", FieldKind::Number { min: 0.0, max: 15.0 }),
        FieldRule::optional("bacteria_count", "Bacteria count", FieldKind::Integer { min: 0, max: 10_000_000 }),
        FieldRule::required("tested_by", "Tested by", FieldKind::Text),
        FieldRule::required("result", "Result", FieldKind::Choice(TestResult::ALLOWED)),
        FieldRule::optional("remarks", "Remarks", FieldKind::Text),
    ];
}

impl Schema for CustomerReview {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::optional("id", "Review ID", record_code("Review ID must look like REV0001")),
        FieldRule::required("customer_name", "Customer name", FieldKind::Text),
        FieldRule::optional("email", "Email", EMAIL),
        FieldRule::required("product", "Product", FieldKind::Text),
        FieldRule::required("rating", "Rating", FieldKind::Integer { min: 1, max: 5 }),
        FieldRule::optional("comment", "Comment", FieldKind::Text),
        FieldRule::optional("review_date", "Review date", FieldKind::Date),
        FieldRule::required("status", "Status", FieldKind::Choice(ReviewStatus::ALLOWED)),
    ];
}

impl Schema for GroupMessage {
    const FIELDS: &'static [FieldRule] = &[
        FieldRule::optional("id", "Message ID", record_code("Message ID must look like MSG0001")),
        FieldRule::required("group_name", "Group", FieldKind::Text),
        FieldRule::required("sender", "Sender", FieldKind::Text),
        FieldRule::required("content", "Message", FieldKind::Text),
        FieldRule::required("priority", "Priority", FieldKind::Choice(MessagePriority::ALLOWED)),
    ];
}
