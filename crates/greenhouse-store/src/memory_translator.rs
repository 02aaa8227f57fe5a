//! Criteria translation for the in-memory document store.
//!
//! Filters become a predicate over JSON documents and sorts become a
//! comparator chain. Semantics follow the PostgreSQL translator closely
//! enough that tests against either store agree:
//!
//! - a missing or `null` field satisfies only `NotEquals`;
//! - `Equals` compares numbers numerically and strings case-sensitively;
//! - `Like` is a case-insensitive substring match on the textual form;
//! - ordering operators only compare values of the same JSON type;
//! - missing fields sort last ascending and first descending.

use std::cmp::Ordering;

use greenhouse_core::criteria::{
    CriteriaTranslator, Filter, FilterOperator, FilterValue, Sort, SortDirection,
};
use greenhouse_core::error::DomainError;
use serde_json::Value;

/// Translator producing [`MemoryFilter`] and [`MemorySort`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryCriteriaTranslator;

impl CriteriaTranslator for MemoryCriteriaTranslator {
    type Filter = MemoryFilter;
    type Sort = MemorySort;

    fn translate_filters(&self, filters: &[Filter]) -> Result<MemoryFilter, DomainError> {
        Ok(MemoryFilter {
            clauses: filters.to_vec(),
        })
    }

    fn translate_sorts(&self, sorts: &[Sort]) -> Result<MemorySort, DomainError> {
        Ok(MemorySort {
            keys: sorts.to_vec(),
        })
    }
}

/// Conjunction of filters evaluated against a JSON document.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilter {
    clauses: Vec<Filter>,
}

impl MemoryFilter {
    /// Whether the document satisfies every clause.
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause_matches(clause, lookup(document, &clause.path())))
    }
}

/// Ordered sort keys evaluated against JSON documents.
#[derive(Debug, Clone, Default)]
pub struct MemorySort {
    keys: Vec<Sort>,
}

impl MemorySort {
    /// Compares two documents key by key; `Equal` if every key ties.
    #[must_use]
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for key in &self.keys {
            let path = key.path();
            let ordering = compare_values(lookup(a, &path), lookup(b, &path));
            let ordering = match key.direction() {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Whether there are no sort keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Resolves a dotted path; `null` counts as absent.
fn lookup<'a>(document: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(document, |current, segment| current.get(segment))
        .filter(|v| !v.is_null())
}

fn clause_matches(clause: &Filter, field: Option<&Value>) -> bool {
    let Some(field) = field else {
        return clause.operator() == FilterOperator::NotEquals;
    };
    let expected = clause.value();
    match clause.operator() {
        FilterOperator::Equals => scalar_eq(field, expected),
        FilterOperator::NotEquals => !scalar_eq(field, expected),
        FilterOperator::Like => text_of(field).is_some_and(|text| {
            text.to_lowercase()
                .contains(&expected.as_text().to_lowercase())
        }),
        FilterOperator::GreaterThan => scalar_cmp(field, expected) == Some(Ordering::Greater),
        FilterOperator::GreaterThanOrEqual => matches!(
            scalar_cmp(field, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        FilterOperator::LessThan => scalar_cmp(field, expected) == Some(Ordering::Less),
        FilterOperator::LessThanOrEqual => matches!(
            scalar_cmp(field, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
    }
}

fn scalar_eq(field: &Value, expected: &FilterValue) -> bool {
    scalar_cmp(field, expected) == Some(Ordering::Equal)
}

fn scalar_cmp(field: &Value, expected: &FilterValue) -> Option<Ordering> {
    match (field, expected) {
        (Value::String(actual), FilterValue::String(wanted)) => Some(actual.as_str().cmp(wanted)),
        (Value::Bool(actual), FilterValue::Boolean(wanted)) => Some(actual.cmp(wanted)),
        (Value::Number(actual), FilterValue::Integer(_) | FilterValue::Float(_)) => {
            let wanted = expected.to_json().as_f64()?;
            actual.as_f64()?.partial_cmp(&wanted)
        }
        _ => None,
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Cross-type rank mirroring `jsonb` ordering, with absent values last.
fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        Some(Value::String(_)) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::Bool(_)) => 2,
        Some(Value::Array(_)) => 3,
        Some(Value::Object(_)) => 4,
        Some(Value::Null) | None => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
