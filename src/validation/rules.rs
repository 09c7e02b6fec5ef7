//! Field Rules
//!
//! Declarative per-field validation: required, format, numeric range,
//! allowed values, and date ordering against a paired field.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    /// Must match `regex` (anchored by the pattern itself)
    Pattern { regex: &'static str, message: &'static str },
    Number { min: f64, max: f64 },
    Integer { min: i64, max: i64 },
    Date,
    Choice(&'static [&'static str]),
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Number { .. } | FieldKind::Integer { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    /// Earlier date field this date must not precede
    pub not_before: Option<&'static str>,
}

impl FieldRule {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, required: true, kind, not_before: None }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, required: false, kind, not_before: None }
    }

    pub const fn not_before(self, earlier: &'static str) -> Self {
        Self { not_before: Some(earlier), ..self }
    }
}

pub const PHONE: FieldKind = FieldKind::Pattern {
    regex: r"^\d{10}$",
    message: "Phone number must be 10 digits",
};

pub const EMAIL: FieldKind = FieldKind::Pattern {
    regex: r"^\S+@\S+\.\S+$",
    message: "Enter a valid email address",
};

/// Three letters then four digits, e.g. AUD0001
pub const fn record_code(message: &'static str) -> FieldKind {
    FieldKind::Pattern { regex: r"^[A-Z]{3}\d{4}$", message }
}
