//! Status enums
//!
//! Every status enum has a fixed allowed-value set. Values outside the set are
//! kept verbatim in `Other` so a record from a newer backend still loads.

/// Declare a status enum with its wire labels
macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            /// Allowed wire values, in display order
            pub const ALLOWED: &'static [&'static str] = &[$($label),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(s) => s,
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                let known = match s.as_str() {
                    $($label => Some($name::$variant),)+
                    _ => None,
                };
                known.unwrap_or_else(|| $name::Other(s))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name::from(s.to_string())
            }
        }

        impl From<$name> for String {
            fn from(status: $name) -> String {
                match status {
                    $name::Other(s) => s,
                    other => other.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

status_enum!(AuditStatus {
    Scheduled => "Scheduled",
    InProgress => "In Progress",
    Completed => "Completed",
    Cancelled => "Cancelled",
});

status_enum!(BillStatus {
    Pending => "Pending",
    Paid => "Paid",
    PartiallyPaid => "Partially Paid",
    Cancelled => "Cancelled",
});

status_enum!(CertificationStatus {
    Active => "Active",
    Pending => "Pending",
    Expired => "Expired",
    Revoked => "Revoked",
});

status_enum!(ComplianceStatus {
    Pending => "Pending",
    InProgress => "In Progress",
    Compliant => "Compliant",
    NonCompliant => "Non-Compliant",
});

status_enum!(DocumentStatus {
    Active => "Active",
    Draft => "Draft",
    Archived => "Archived",
    Expired => "Expired",
});

status_enum!(EmployeeStatus {
    Active => "Active",
    OnLeave => "On Leave",
    Inactive => "Inactive",
    Terminated => "Terminated",
});

status_enum!(FleetStatus {
    Available => "Available",
    InTransit => "In Transit",
    Maintenance => "Maintenance",
    Retired => "Retired",
});

status_enum!(
    /// Collection shift for a milk entry
    Shift {
        Morning => "Morning",
        Evening => "Evening",
    }
);

status_enum!(TestResult {
    Pending => "Pending",
    Passed => "Passed",
    Failed => "Failed",
});

status_enum!(ReviewStatus {
    Pending => "Pending",
    Approved => "Approved",
    Rejected => "Rejected",
});

status_enum!(MessagePriority {
    Normal => "Normal",
    High => "High",
    Urgent => "Urgent",
});
