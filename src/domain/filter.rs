//! Query-string filtering of listed records
//!
//! List endpoints accept arbitrary `field=value` pairs in the query string.
//! Each record type declares which fields may be filtered on and exposes them
//! as typed [`FieldValue`]s; a [`RecordFilter`] built from the query map then
//! keeps only the records matching every constraint.
//!
//! Matching rules:
//! - a value that parses as a finite number is compared numerically
//! - anything else is compared as a case-insensitive string
//! - null fields never match
//! - an empty filter keeps every record

use chrono::NaiveDate;

use crate::domain::DomainError;

/// A typed view of one filterable field on a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Integer(i64),
    Flag(bool),
    Date(Option<NaiveDate>),
}

/// Records that can be narrowed by a [`RecordFilter`]
pub trait Filterable {
    /// Field names accepted as filter keys
    const FILTER_FIELDS: &'static [&'static str];

    /// Returns the value of an allowed field, `None` for any other name
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

#[derive(Debug, Clone, PartialEq)]
enum Expected {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Constraint {
    field: String,
    expected: Expected,
}

/// A conjunction of field constraints parsed from a query string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    constraints: Vec<Constraint>,
}

impl RecordFilter {
    /// A filter that keeps every record
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a filter for record type `T` from query parameters
    ///
    /// Fails with [`DomainError::InvalidFilter`] when a key is not one of
    /// `T::FILTER_FIELDS`.
    pub fn for_records<'q, T, I>(query: I) -> Result<Self, DomainError>
    where
        T: Filterable,
        I: IntoIterator<Item = (&'q String, &'q String)>,
    {
        Self::from_query(query, T::FILTER_FIELDS)
    }

    /// Build a filter from query parameters against an explicit allow-list
    pub fn from_query<'q, I>(query: I, allowed: &[&str]) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (&'q String, &'q String)>,
    {
        let mut constraints = Vec::new();

        for (key, value) in query {
            if !allowed.contains(&key.as_str()) {
                return Err(DomainError::invalid_filter(format!(
                    "Unknown filter field '{}'. Allowed fields: {}",
                    key,
                    allowed.join(", ")
                )));
            }

            let expected = match parse_number(value) {
                Some(number) => Expected::Number(number),
                None => Expected::Text(value.to_lowercase()),
            };

            constraints.push(Constraint {
                field: key.clone(),
                expected,
            });
        }

        // Query maps have no stable order; sort so equal queries compare equal
        constraints.sort_by(|a, b| a.field.cmp(&b.field));

        Ok(Self { constraints })
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// True when `record` satisfies every constraint
    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        self.constraints.iter().all(|constraint| {
            record
                .field(&constraint.field)
                .is_some_and(|value| value_matches(value, &constraint.expected))
        })
    }

    /// Keep only the records matching this filter, preserving order
    pub fn apply<T: Filterable>(&self, records: Vec<T>) -> Vec<T> {
        if self.is_empty() {
            return records;
        }

        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn value_matches(value: FieldValue<'_>, expected: &Expected) -> bool {
    match (value, expected) {
        (FieldValue::Integer(actual), Expected::Number(number)) => actual as f64 == *number,
        (FieldValue::Integer(_), Expected::Text(_)) => false,
        (FieldValue::Text(Some(actual)), Expected::Number(number)) => {
            parse_number(actual) == Some(*number)
        }
        (FieldValue::Text(Some(actual)), Expected::Text(text)) => actual.to_lowercase() == *text,
        (FieldValue::Flag(actual), Expected::Text(text)) => {
            text == if actual { "true" } else { "false" }
        }
        (FieldValue::Flag(actual), Expected::Number(number)) => {
            f64::from(u8::from(actual)) == *number
        }
        (FieldValue::Date(Some(actual)), Expected::Text(text)) => {
            actual.format("%Y-%m-%d").to_string() == *text
        }
        (FieldValue::Date(Some(_)), Expected::Number(_)) => false,
        (FieldValue::Text(None), _) | (FieldValue::Date(None), _) => false,
    }
}
