//! Domain Layer
//!
//! Record types for the eleven dashboard collections and core abstractions.
//! This layer has NO I/O (serde and chrono only).

pub mod calendar;
mod entity;
mod status;

mod audit;
mod bill;
mod certification;
mod compliance;
mod document;
mod employee;
mod fleet;
mod group_message;
mod milk_entry;
mod quality_test;
mod review;

pub use entity::{Entity, EntityKind, FieldErrors, RecordId, SyncError, SyncResult};
pub use status::{
    AuditStatus, BillStatus, CertificationStatus, ComplianceStatus, DocumentStatus,
    EmployeeStatus, FleetStatus, MessagePriority, ReviewStatus, Shift, TestResult,
};

pub use audit::Audit;
pub use bill::Bill;
pub use certification::Certification;
pub use compliance::ComplianceRecord;
pub use document::Document;
pub use employee::Employee;
pub use fleet::Fleet;
pub use group_message::GroupMessage;
pub use milk_entry::MilkEntry;
pub use quality_test::QualityTest;
pub use review::CustomerReview;
