//! Scan predicates understood by every store adapter.

use serde_json::Value;

use super::Record;

/// Boolean clauses over record attributes, combined with AND.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Attribute equals the value exactly.
    Eq(String, Value),
    /// A list attribute holds the element, or a string attribute holds the
    /// substring. Case-sensitive.
    Contains(String, String),
    /// Every clause holds. An empty list matches everything.
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq(attribute.into(), value.into())
    }

    pub fn contains(attribute: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::Contains(attribute.into(), needle.into())
    }

    /// Matches every record.
    pub fn all() -> Self {
        Self::And(Vec::new())
    }

    /// AND this clause with another, flattening nested conjunctions.
    pub fn and(self, other: Filter) -> Self {
        let mut clauses = match self {
            Self::And(clauses) => clauses,
            clause => vec![clause],
        };
        match other {
            Self::And(more) => clauses.extend(more),
            clause => clauses.push(clause),
        }
        Self::And(clauses)
    }

    /// Evaluate the predicate against a record.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Eq(attribute, value) => record.get(attribute) == Some(value),
            Self::Contains(attribute, needle) => match record.get(attribute) {
                Some(Value::Array(items)) => items.iter().any(|item| item.as_str() == Some(needle.as_str())),
                Some(Value::String(text)) => text.contains(needle.as_str()),
                _ => false,
            },
            Self::And(clauses) => clauses.iter().all(|clause| clause.matches(record)),
        }
    }
}
