//! Storage-independent query description.
//!
//! A [`Criteria`] is an ordered list of filters (combined with AND), an
//! ordered list of sort keys and a pagination setting. Datastore adapters turn
//! it into a native query through a [`CriteriaTranslator`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 10;

/// Comparison applied by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    /// Exact equality.
    Equals,
    /// Exact inequality; also matches documents missing the field.
    NotEquals,
    /// Case-insensitive substring match.
    Like,
    /// Strictly greater than.
    GreaterThan,
    /// Greater than or equal.
    GreaterThanOrEqual,
    /// Strictly less than.
    LessThan,
    /// Less than or equal.
    LessThanOrEqual,
}

impl FilterOperator {
    /// The transport spelling of the operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "EQUALS",
            Self::NotEquals => "NOT_EQUALS",
            Self::Like => "LIKE",
            Self::GreaterThan => "GT",
            Self::GreaterThanOrEqual => "GTE",
            Self::LessThan => "LT",
            Self::LessThanOrEqual => "LTE",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EQUALS" | "EQ" => Ok(Self::Equals),
            "NOT_EQUALS" | "NE" => Ok(Self::NotEquals),
            "LIKE" => Ok(Self::Like),
            "GT" | "GREATER_THAN" => Ok(Self::GreaterThan),
            "GTE" | "GREATER_THAN_OR_EQUAL" => Ok(Self::GreaterThanOrEqual),
            "LT" | "LESS_THAN" => Ok(Self::LessThan),
            "LTE" | "LESS_THAN_OR_EQUAL" => Ok(Self::LessThanOrEqual),
            _ => Err(DomainError::InvalidFilterOperator(s.to_owned())),
        }
    }
}

/// Scalar value compared against a document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Boolean literal.
    Boolean(bool),
    /// Integer literal.
    Integer(i64),
    /// Floating point literal.
    Float(f64),
    /// String literal.
    String(String),
}

impl FilterValue {
    /// The value as JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::Integer(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Value::from(*f),
            Self::String(s) => serde_json::Value::String(s.clone()),
        }
    }

    /// The value rendered as text, as used by substring matching.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Boolean(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => s.clone(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// A single `field <operator> value` constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    field: String,
    operator: FilterOperator,
    value: FilterValue,
}

impl Filter {
    /// Creates a filter.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the field name is malformed.
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Result<Self, DomainError> {
        let field = field.into();
        validate_field(&field)?;
        Ok(Self {
            field,
            operator,
            value: value.into(),
        })
    }

    /// The (possibly dotted) field path.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The field path split into segments.
    #[must_use]
    pub fn path(&self) -> Vec<&str> {
        self.field.split('.').collect()
    }

    /// The comparison operator.
    #[must_use]
    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// The value to compare against.
    #[must_use]
    pub fn value(&self) -> &FilterValue {
        &self.value
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(DomainError::validation(format!(
                "invalid sort direction {s:?}, expected ASC or DESC"
            ))),
        }
    }
}

/// A single sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sort {
    field: String,
    direction: SortDirection,
}

impl Sort {
    /// Creates a sort key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the field name is malformed.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Result<Self, DomainError> {
        let field = field.into();
        validate_field(&field)?;
        Ok(Self { field, direction })
    }

    /// The (possibly dotted) field path.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The field path split into segments.
    #[must_use]
    pub fn path(&self) -> Vec<&str> {
        self.field.split('.').collect()
    }

    /// The sort direction.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Page selection. Both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page: u32,
    per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Creates a pagination setting.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either value is zero.
    pub fn new(page: u32, per_page: u32) -> Result<Self, DomainError> {
        if page == 0 {
            return Err(DomainError::validation("page must be at least 1"));
        }
        if per_page == 0 {
            return Err(DomainError::validation("per_page must be at least 1"));
        }
        Ok(Self { page, per_page })
    }

    /// 1-based page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of matching items to skip: `(page - 1) * per_page`.
    #[must_use]
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

/// A complete query description.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Criteria {
    filters: Vec<Filter>,
    sorts: Vec<Sort>,
    pagination: Pagination,
}

impl Criteria {
    /// Creates a criteria. Empty filters and sorts mean "no constraint".
    #[must_use]
    pub fn new(filters: Vec<Filter>, sorts: Vec<Sort>, pagination: Pagination) -> Self {
        Self {
            filters,
            sorts,
            pagination,
        }
    }

    /// Filters, combined with AND.
    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Sort keys in priority order.
    #[must_use]
    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    /// Page selection.
    #[must_use]
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Returns a copy with a filter appended.
    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Returns a copy with a sort key appended.
    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Returns a copy with the pagination replaced.
    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }
}

/// Transport form of a filter, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterRequest {
    /// Field path.
    pub field: String,
    /// Operator spelling, e.g. `EQUALS`.
    pub operator: String,
    /// Value to compare against.
    pub value: FilterValue,
}

/// Transport form of a sort key, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct SortRequest {
    /// Field path.
    pub field: String,
    /// `ASC` or `DESC`; ascending when omitted.
    #[serde(default)]
    pub direction: Option<String>,
}

/// Transport form of a criteria, as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CriteriaRequest {
    /// Filters.
    #[serde(default)]
    pub filters: Vec<FilterRequest>,
    /// Sort keys.
    #[serde(default)]
    pub sorts: Vec<SortRequest>,
    /// Page number; 1 when omitted.
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size; 10 when omitted.
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl TryFrom<CriteriaRequest> for Criteria {
    type Error = DomainError;

    fn try_from(request: CriteriaRequest) -> Result<Self, Self::Error> {
        let filters = request
            .filters
            .into_iter()
            .map(|f| Filter::new(f.field, f.operator.parse()?, f.value))
            .collect::<Result<Vec<_>, _>>()?;
        let sorts = request
            .sorts
            .into_iter()
            .map(|s| {
                let direction = match s.direction.as_deref() {
                    Some(raw) => raw.parse()?,
                    None => SortDirection::Asc,
                };
                Sort::new(s.field, direction)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let pagination = Pagination::new(
            request.page.unwrap_or(DEFAULT_PAGE),
            request.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )?;
        Ok(Self::new(filters, sorts, pagination))
    }
}

/// A criteria translated into datastore-native pieces.
#[derive(Debug, Clone)]
pub struct TranslatedQuery<F, S> {
    /// Native filter.
    pub filter: F,
    /// Native sort clause.
    pub sort: S,
    /// Rows to skip.
    pub skip: u64,
    /// Maximum rows to return.
    pub limit: u64,
}

/// Turns a [`Criteria`] into a datastore-native query.
pub trait CriteriaTranslator {
    /// Native filter representation.
    type Filter;
    /// Native sort representation.
    type Sort;

    /// Translates the filters (AND semantics).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFilterOperator` if a filter uses an
    /// operator this datastore cannot express.
    fn translate_filters(&self, filters: &[Filter]) -> Result<Self::Filter, DomainError>;

    /// Translates the sort keys, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a sort key cannot be expressed.
    fn translate_sorts(&self, sorts: &[Sort]) -> Result<Self::Sort, DomainError>;

    /// Translates the whole criteria.
    ///
    /// # Errors
    ///
    /// Propagates errors from `translate_filters` and `translate_sorts`.
    fn translate(
        &self,
        criteria: &Criteria,
    ) -> Result<TranslatedQuery<Self::Filter, Self::Sort>, DomainError> {
        Ok(TranslatedQuery {
            filter: self.translate_filters(criteria.filters())?,
            sort: self.translate_sorts(criteria.sorts())?,
            skip: criteria.pagination().skip(),
            limit: criteria.pagination().limit(),
        })
    }
}

fn validate_field(field: &str) -> Result<(), DomainError> {
    let valid = !field.is_empty()
        && field.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
    if valid {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "invalid field name {field:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_has_first_page_of_ten() {
        let criteria = Criteria::default();

        assert!(criteria.filters().is_empty());
        assert!(criteria.sorts().is_empty());
        assert_eq!(criteria.pagination().page(), 1);
        assert_eq!(criteria.pagination().per_page(), 10);
        assert_eq!(criteria.pagination().skip(), 0);
    }

    #[test]
    fn test_skip_is_previous_pages_times_page_size() {
        let pagination = Pagination::new(3, 10).unwrap();

        assert_eq!(pagination.skip(), 20);
        assert_eq!(pagination.limit(), 10);
    }

    #[test]
    fn test_pagination_rejects_zero() {
        assert!(matches!(
            Pagination::new(0, 10),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            Pagination::new(1, 0),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_operator_parsing_is_case_insensitive() {
        assert_eq!("equals".parse::<FilterOperator>().unwrap(), FilterOperator::Equals);
        assert_eq!("LIKE".parse::<FilterOperator>().unwrap(), FilterOperator::Like);
        assert_eq!("gte".parse::<FilterOperator>().unwrap(), FilterOperator::GreaterThanOrEqual);
    }

    #[test]
    fn test_unknown_operator_fails_fast() {
        let result = "BETWEEN".parse::<FilterOperator>();

        match result {
            Err(DomainError::InvalidFilterOperator(op)) => assert_eq!(op, "BETWEEN"),
            other => panic!("expected InvalidFilterOperator, got {other:?}"),
        }
    }

    #[test]
    fn test_filter_rejects_malformed_field() {
        let result = Filter::new("name; DROP TABLE", FilterOperator::Equals, "x");

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_dotted_field_is_split_into_path() {
        let filter = Filter::new("dimensions.unit", FilterOperator::Equals, "METERS").unwrap();

        assert_eq!(filter.path(), vec!["dimensions", "unit"]);
    }

    #[test]
    fn test_request_with_defaults_converts_to_default_criteria() {
        let request: CriteriaRequest = serde_json::from_value(serde_json::json!({})).unwrap();

        let criteria = Criteria::try_from(request).unwrap();

        assert_eq!(criteria, Criteria::default());
    }

    #[test]
    fn test_request_converts_filters_sorts_and_pagination() {
        // Arrange
        let request: CriteriaRequest = serde_json::from_value(serde_json::json!({
            "filters": [
                { "field": "status", "operator": "EQUALS", "value": "PLANTED" },
                { "field": "capacity", "operator": "GT", "value": 4 }
            ],
            "sorts": [{ "field": "name", "direction": "desc" }, { "field": "capacity" }],
            "page": 2,
            "per_page": 5
        }))
        .unwrap();

        // Act
        let criteria = Criteria::try_from(request).unwrap();

        // Assert
        assert_eq!(criteria.filters().len(), 2);
        assert_eq!(criteria.filters()[0].operator(), FilterOperator::Equals);
        assert_eq!(criteria.filters()[0].value(), &FilterValue::from("PLANTED"));
        assert_eq!(criteria.filters()[1].value(), &FilterValue::Integer(4));
        assert_eq!(criteria.sorts()[0].direction(), SortDirection::Desc);
        assert_eq!(criteria.sorts()[1].direction(), SortDirection::Asc);
        assert_eq!(criteria.pagination().skip(), 5);
    }

    #[test]
    fn test_request_with_unknown_operator_is_rejected() {
        let request: CriteriaRequest = serde_json::from_value(serde_json::json!({
            "filters": [{ "field": "status", "operator": "REGEX", "value": "x" }]
        }))
        .unwrap();

        let result = Criteria::try_from(request);

        assert!(matches!(result, Err(DomainError::InvalidFilterOperator(_))));
    }

    #[test]
    fn test_request_with_bad_direction_is_rejected() {
        let request: CriteriaRequest = serde_json::from_value(serde_json::json!({
            "sorts": [{ "field": "name", "direction": "sideways" }]
        }))
        .unwrap();

        assert!(matches!(
            Criteria::try_from(request),
            Err(DomainError::Validation(_))
        ));
    }
}
