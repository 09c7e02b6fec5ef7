//! Form Validator
//!
//! Applies a rule table incrementally (one field on change) or exhaustively
//! (every field on submit). Errors are keyed by field name.

use regex::Regex;
use std::collections::HashMap;

use super::form::FormState;
use super::rules::{FieldKind, FieldRule};
use super::schemas::Schema;
use crate::domain::calendar::parse_date;
use crate::domain::FieldErrors;

pub struct FormValidator {
    rules: &'static [FieldRule],
    patterns: HashMap<&'static str, Regex>,
}

impl FormValidator {
    pub fn new(rules: &'static [FieldRule]) -> Self {
        let mut patterns = HashMap::new();
        for rule in rules {
            if let FieldKind::Pattern { regex, .. } = rule.kind {
                match Regex::new(regex) {
                    Ok(re) => {
                        patterns.insert(rule.name, re);
                    }
                    Err(e) => log::error!("Bad pattern for {}: {}", rule.name, e),
                }
            }
        }
        Self { rules, patterns }
    }

    pub fn for_entity<T: Schema>() -> Self {
        Self::new(T::FIELDS)
    }

    pub fn rules(&self) -> &'static [FieldRule] {
        self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&'static FieldRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Error message for one field, or `None` when it is valid
    pub fn validate_field(&self, name: &str, form: &FormState) -> Option<String> {
        let rule = self.rule(name)?;
        let value = form.get(name).trim();

        if value.is_empty() {
            return rule.required.then(|| format!("{} is required", rule.label));
        }

        match rule.kind {
            FieldKind::Text => {}
            FieldKind::Pattern { message, .. } => {
                if let Some(re) = self.patterns.get(rule.name) {
                    if !re.is_match(value) {
                        return Some(message.to_string());
                    }
                }
            }
            FieldKind::Number { min, max } => match value.parse::<f64>() {
                Ok(n) if n.is_finite() => {
                    if n < min || n > max {
                        return Some(format!("{} must be between {} and {}", rule.label, min, max));
                    }
                }
                _ => return Some(format!("{} must be a number", rule.label)),
            },
            FieldKind::Integer { min, max } => match value.parse::<i64>() {
                Ok(n) => {
                    if n < min || n > max {
                        return Some(format!("{} must be between {} and {}", rule.label, min, max));
                    }
                }
                Err(_) => return Some(format!("{} must be a whole number", rule.label)),
            },
            FieldKind::Date => {
                if parse_date(value).is_none() {
                    return Some(format!("{} must be a valid date", rule.label));
                }
            }
            FieldKind::Choice(allowed) => {
                if !allowed.iter().any(|a| *a == value) {
                    return Some(format!("{} must be one of: {}", rule.label, allowed.join(", ")));
                }
            }
        }

        self.check_order(rule, value, form)
    }

    /// The later date must not precede its paired earlier date
    fn check_order(&self, rule: &FieldRule, value: &str, form: &FormState) -> Option<String> {
        let earlier_name = rule.not_before?;
        let later = parse_date(value)?;
        let earlier = parse_date(form.get(earlier_name))?;
        if later < earlier {
            let earlier_label = self.rule(earlier_name).map_or(earlier_name, |r| r.label);
            return Some(format!("{} cannot be before {}", rule.label, earlier_label));
        }
        None
    }

    /// Re-validate after `name` changed: the field itself plus any date that
    /// must not precede it
    pub fn on_change(&self, form: &FormState, errors: &mut FieldErrors, name: &str) {
        errors.set(name, self.validate_field(name, form));
        for dependent in self.rules.iter().filter(|r| r.not_before == Some(name)) {
            let touched = !form.get(dependent.name).trim().is_empty() || errors.get(dependent.name).is_some();
            if touched {
                errors.set(dependent.name, self.validate_field(dependent.name, form));
            }
        }
    }

    /// Every rule, as on submit
    pub fn validate_all(&self, form: &FormState) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for rule in self.rules {
            errors.set(rule.name, self.validate_field(rule.name, form));
        }
        errors
    }
}
