//! Criteria translation for the PostgreSQL document store.
//!
//! Documents live in a `body JSONB` column. Field paths are always sent as
//! bound `text[]` parameters and addressed with `#>` / `#>>`, so a
//! criteria can never inject SQL. Values are bound as `jsonb` so that
//! `jsonb` equality and ordering rules apply (numbers compare numerically).

use greenhouse_core::criteria::{
    CriteriaTranslator, Filter, FilterOperator, FilterValue, Sort, SortDirection,
};
use greenhouse_core::error::DomainError;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{Postgres, QueryBuilder};

/// Translator producing [`PgFilter`] and [`PgSort`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PgCriteriaTranslator;

impl CriteriaTranslator for PgCriteriaTranslator {
    type Filter = PgFilter;
    type Sort = PgSort;

    fn translate_filters(&self, filters: &[Filter]) -> Result<PgFilter, DomainError> {
        let predicates = filters
            .iter()
            .map(|f| PgPredicate {
                path: owned_path(&f.path()),
                operator: f.operator(),
                value: f.value().clone(),
            })
            .collect();
        Ok(PgFilter { predicates })
    }

    fn translate_sorts(&self, sorts: &[Sort]) -> Result<PgSort, DomainError> {
        let keys = sorts
            .iter()
            .map(|s| (owned_path(&s.path()), s.direction()))
            .collect();
        Ok(PgSort { keys })
    }
}

#[derive(Debug, Clone)]
struct PgPredicate {
    path: Vec<String>,
    operator: FilterOperator,
    value: FilterValue,
}

/// Conjunction of predicates over `body`.
#[derive(Debug, Clone, Default)]
pub struct PgFilter {
    predicates: Vec<PgPredicate>,
}

impl PgFilter {
    /// Appends ` AND <predicate>` for every predicate. The builder must
    /// already hold a `WHERE` clause.
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for predicate in &self.predicates {
            qb.push(" AND ");
            push_predicate(qb, predicate);
        }
    }

    /// Number of predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether there are no predicates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Ordered sort keys over `body`.
#[derive(Debug, Clone, Default)]
pub struct PgSort {
    keys: Vec<(Vec<String>, SortDirection)>,
}

impl PgSort {
    /// Appends the `ORDER BY` clause. Insertion time is the final key, so
    /// unsorted queries come back in natural (insertion) order.
    pub fn push_order_by(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" ORDER BY ");
        for (path, direction) in &self.keys {
            // Stored `null` becomes SQL NULL so it sorts with missing keys.
            qb.push("NULLIF(body #> ");
            qb.push_bind(path.clone());
            qb.push("::text[], 'null'::jsonb)");
            qb.push(match direction {
                SortDirection::Asc => " ASC NULLS LAST, ",
                SortDirection::Desc => " DESC NULLS FIRST, ",
            });
        }
        qb.push("created_at ASC");
    }
}

fn owned_path(path: &[&str]) -> Vec<String> {
    path.iter().map(|s| (*s).to_owned()).collect()
}

fn push_json_path(qb: &mut QueryBuilder<'_, Postgres>, path: &[String]) {
    qb.push("(body #> ");
    qb.push_bind(path.to_vec());
    qb.push("::text[])");
}

fn push_text_path(qb: &mut QueryBuilder<'_, Postgres>, path: &[String]) {
    qb.push("(body #>> ");
    qb.push_bind(path.to_vec());
    qb.push("::text[])");
}

fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &PgPredicate) {
    let value: Value = predicate.value.to_json();
    match predicate.operator {
        FilterOperator::Equals => {
            push_json_path(qb, &predicate.path);
            qb.push(" = ");
            qb.push_bind(Json(value));
            qb.push("::jsonb");
        }
        FilterOperator::NotEquals => {
            push_json_path(qb, &predicate.path);
            qb.push(" IS DISTINCT FROM ");
            qb.push_bind(Json(value));
            qb.push("::jsonb");
        }
        FilterOperator::Like => {
            push_text_path(qb, &predicate.path);
            qb.push(" ILIKE ");
            qb.push_bind(like_pattern(&predicate.value.as_text()));
        }
        FilterOperator::GreaterThan
        | FilterOperator::GreaterThanOrEqual
        | FilterOperator::LessThan
        | FilterOperator::LessThanOrEqual => {
            let comparison = match predicate.operator {
                FilterOperator::GreaterThan => " > ",
                FilterOperator::GreaterThanOrEqual => " >= ",
                FilterOperator::LessThan => " < ",
                _ => " <= ",
            };
            // Only values of the same JSON type are comparable.
            qb.push("(jsonb_typeof");
            push_json_path(qb, &predicate.path);
            qb.push(" = ");
            qb.push_bind(json_type(&value));
            qb.push(" AND ");
            push_json_path(qb, &predicate.path);
            qb.push(comparison);
            qb.push_bind(Json(value));
            qb.push("::jsonb)");
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `%needle%` with `LIKE` metacharacters escaped.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenhouse_core::criteria::Criteria;

    fn base() -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new("SELECT body FROM documents WHERE TRUE")
    }

    #[test]
    fn test_empty_criteria_only_orders_by_insertion_time() {
        let query = PgCriteriaTranslator.translate(&Criteria::default()).unwrap();
        let mut qb = base();

        query.filter.push_conditions(&mut qb);
        query.sort.push_order_by(&mut qb);

        assert_eq!(
            qb.sql(),
            "SELECT body FROM documents WHERE TRUE ORDER BY created_at ASC"
        );
    }

    #[test]
    fn test_equals_binds_path_and_jsonb_value() {
        let filter = PgCriteriaTranslator
            .translate_filters(&[Filter::new("status", FilterOperator::Equals, "PLANTED").unwrap()])
            .unwrap();
        let mut qb = base();

        filter.push_conditions(&mut qb);

        assert_eq!(
            qb.sql(),
            "SELECT body FROM documents WHERE TRUE AND (body #> $1::text[]) = $2::jsonb"
        );
    }

    #[test]
    fn test_like_uses_ilike_on_text_form() {
        let filter = PgCriteriaTranslator
            .translate_filters(&[Filter::new("name", FilterOperator::Like, "basil").unwrap()])
            .unwrap();
        let mut qb = base();

        filter.push_conditions(&mut qb);

        assert!(qb.sql().ends_with("AND (body #>> $1::text[]) ILIKE $2"));
    }

    #[test]
    fn test_range_operator_guards_on_json_type() {
        let filter = PgCriteriaTranslator
            .translate_filters(&[
                Filter::new("capacity", FilterOperator::GreaterThanOrEqual, 3_i64).unwrap(),
            ])
            .unwrap();
        let mut qb = base();

        filter.push_conditions(&mut qb);

        assert!(qb.sql().ends_with(
            "AND (jsonb_typeof(body #> $1::text[]) = $2 AND (body #> $3::text[]) >= $4::jsonb)"
        ));
    }

    #[test]
    fn test_not_equals_matches_missing_fields() {
        let filter = PgCriteriaTranslator
            .translate_filters(&[Filter::new("status", FilterOperator::NotEquals, "DEAD").unwrap()])
            .unwrap();
        let mut qb = base();

        filter.push_conditions(&mut qb);

        assert!(qb.sql().contains("IS DISTINCT FROM $2::jsonb"));
    }

    #[test]
    fn test_sorts_are_emitted_in_order_before_insertion_time() {
        let sort = PgCriteriaTranslator
            .translate_sorts(&[
                Sort::new("status", SortDirection::Asc).unwrap(),
                Sort::new("capacity", SortDirection::Desc).unwrap(),
            ])
            .unwrap();
        let mut qb = base();

        sort.push_order_by(&mut qb);

        assert!(qb.sql().ends_with(
            " ORDER BY NULLIF(body #> $1::text[], 'null'::jsonb) ASC NULLS LAST, \
             NULLIF(body #> $2::text[], 'null'::jsonb) DESC NULLS FIRST, created_at ASC"
        ));
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
        assert_eq!(like_pattern("basil"), "%basil%");
    }

    #[test]
    fn test_translate_counts_predicates() {
        let criteria = Criteria::default()
            .with_filter(Filter::new("a", FilterOperator::Equals, 1_i64).unwrap())
            .with_filter(Filter::new("b", FilterOperator::Like, "x").unwrap());

        let query = PgCriteriaTranslator.translate(&criteria).unwrap();

        assert_eq!(query.filter.len(), 2);
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 10);
    }
}
