//! Form Validation
//!
//! Declarative rule tables per entity, the validator that applies them, and
//! the raw form state that becomes a request payload.

mod form;
mod rules;
mod schemas;
mod validator;

pub use form::FormState;
pub use rules::{record_code, FieldKind, FieldRule, EMAIL, PHONE};
pub use schemas::Schema;
pub use validator::FormValidator;
