//! Validation of standard 5-field cron expressions.
//!
//! `minute hour day-of-month month day-of-week`. Each field is a comma list of
//! `*`, `N` or `N-M`, each optionally followed by `/step`. Months accept
//! `JAN`..`DEC` and weekdays `SUN`..`SAT` (case-insensitive); weekday `7` is
//! Sunday. The expression is only checked, never evaluated: the server runs it.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CronError {
    #[error("cron expression is empty")]
    Empty,

    #[error("expected 5 fields, got {0}")]
    FieldCount(usize),

    #[error("invalid {field} field '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("{field} value {value} out of range {min}-{max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

struct FieldSpec {
    name: &'static str,
    min: u32,
    max: u32,
    names: &'static [&'static str],
}

const MONTH_NAMES: [&str; 12] = ["JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC"];
const WEEKDAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

const FIELDS: [FieldSpec; 5] = [
    FieldSpec { name: "minute", min: 0, max: 59, names: &[] },
    FieldSpec { name: "hour", min: 0, max: 23, names: &[] },
    FieldSpec { name: "day-of-month", min: 1, max: 31, names: &[] },
    FieldSpec { name: "month", min: 1, max: 12, names: &MONTH_NAMES },
    FieldSpec { name: "day-of-week", min: 0, max: 7, names: &WEEKDAY_NAMES },
];

impl FieldSpec {
    fn invalid(&self, value: &str) -> CronError {
        CronError::InvalidField {
            field: self.name,
            value: value.to_string(),
        }
    }

    fn value(&self, raw: &str) -> Result<u32, CronError> {
        let value = match raw.parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                let upper = raw.to_ascii_uppercase();
                let index = self
                    .names
                    .iter()
                    .position(|name| *name == upper)
                    .ok_or_else(|| self.invalid(raw))?;
                // Month names are 1-based, weekday names 0-based.
                index as u32 + self.min
            }
        };

        if value < self.min || value > self.max {
            return Err(CronError::OutOfRange {
                field: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }

    fn check_item(&self, item: &str) -> Result<(), CronError> {
        let (range, step) = match item.split_once('/') {
            Some((range, step)) => (range, Some(step)),
            None => (item, None),
        };

        if let Some(step) = step {
            let step: u32 = step.parse().map_err(|_| self.invalid(item))?;
            if step == 0 || step > self.max {
                return Err(self.invalid(item));
            }
        }

        if range == "*" {
            return Ok(());
        }

        match range.split_once('-') {
            Some((start, end)) => {
                let start = self.value(start)?;
                let end = self.value(end)?;
                if start > end {
                    return Err(self.invalid(item));
                }
            }
            None => {
                self.value(range)?;
            }
        }
        Ok(())
    }

    fn check(&self, field: &str) -> Result<(), CronError> {
        for item in field.split(',') {
            if item.is_empty() {
                return Err(self.invalid(field));
            }
            self.check_item(item)?;
        }
        Ok(())
    }
}

/// A cron expression that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpression(String);

impl CronExpression {
    pub fn parse(expr: &str) -> Result<Self, CronError> {
        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(CronError::Empty);
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != FIELDS.len() {
            return Err(CronError::FieldCount(fields.len()));
        }

        for (spec, field) in FIELDS.iter().zip(&fields) {
            spec.check(field)?;
        }

        Ok(Self(fields.join(" ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CronExpression {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `expr` is a valid 5-field cron expression.
pub fn is_valid_cron(expr: &str) -> bool {
    CronExpression::parse(expr).is_ok()
}
