//! Aggregate Stats
//!
//! Summary cards computed over the full, unfiltered list.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    Count(usize),
    Amount(f64),
    /// `None` when there is nothing to average
    Average(Option<f64>),
    Percent(Option<f64>),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{}", n),
            StatValue::Amount(v) => write!(f, "{:.2}", v),
            StatValue::Average(Some(v)) => write!(f, "{:.1}", v),
            StatValue::Percent(Some(v)) => write!(f, "{:.1}%", v),
            StatValue::Average(None) | StatValue::Percent(None) => f.write_str("-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub label: &'static str,
    pub value: StatValue,
}

impl Stat {
    pub fn count(label: &'static str, n: usize) -> Self {
        Self { label, value: StatValue::Count(n) }
    }

    pub fn amount(label: &'static str, v: f64) -> Self {
        Self { label, value: StatValue::Amount(v) }
    }

    pub fn average(label: &'static str, values: impl IntoIterator<Item = f64>) -> Self {
        Self { label, value: StatValue::Average(mean(values)) }
    }

    pub fn percent(label: &'static str, part: usize, whole: usize) -> Self {
        let value = (whole > 0).then(|| part as f64 * 100.0 / whole as f64);
        Self { label, value: StatValue::Percent(value) }
    }
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.into_iter().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Count records for which `pred` holds
pub fn count_where<T>(records: &[T], pred: impl Fn(&T) -> bool) -> usize {
    records.iter().filter(|r| pred(r)).count()
}

pub fn find<'a>(stats: &'a [Stat], label: &str) -> Option<&'a StatValue> {
    stats.iter().find(|s| s.label == label).map(|s| &s.value)
}
