use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::{CoreError, Result, Value};
use crate::keys::ProfileKey;
use crate::models::Conference;

/// Conference fields that filters and sorts may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    Name,
    City,
    Topic,
    Month,
    MaxAttendees,
    SeatsAvailable,
}

impl QueryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::City => "CITY",
            Self::Topic => "TOPIC",
            Self::Month => "MONTH",
            Self::MaxAttendees => "MAX_ATTENDEES",
            Self::SeatsAvailable => "SEATS_AVAILABLE",
        }
    }
}

impl FromStr for QueryField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NAME" => Ok(Self::Name),
            "CITY" => Ok(Self::City),
            "TOPIC" => Ok(Self::Topic),
            "MONTH" => Ok(Self::Month),
            "MAX_ATTENDEES" => Ok(Self::MaxAttendees),
            "SEATS_AVAILABLE" => Ok(Self::SeatsAvailable),
            _ => Err(CoreError::UnknownQueryField(s.to_string())),
        }
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Filter operators. Everything except `Eq` counts as an inequality and is
/// subject to the store's one-inequality-field restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl FilterOp {
    pub fn is_inequality(self) -> bool {
        !matches!(self, Self::Eq)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Lt => "LT",
            Self::LtEq => "LTEQ",
            Self::Gt => "GT",
            Self::GtEq => "GTEQ",
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Lt => ordering == Ordering::Less,
            Self::LtEq => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::GtEq => ordering != Ordering::Less,
        }
    }
}

impl FromStr for FilterOp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "EQ" | "=" | "==" => Ok(Self::Eq),
            "NE" | "!=" | "<>" => Ok(Self::Ne),
            "LT" | "<" => Ok(Self::Lt),
            "LTEQ" | "<=" => Ok(Self::LtEq),
            "GT" | ">" => Ok(Self::Gt),
            "GTEQ" | ">=" => Ok(Self::GtEq),
            _ => Err(CoreError::UnknownOperator(s.to_string())),
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One `(field, operator, value)` criterion.
#[derive(Debug, Clone)]
pub struct Filter {
    pub field: QueryField,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(field: QueryField, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field,
            op,
            value: value.into(),
        }
    }

    fn matches(&self, conference: &Conference) -> Result<bool> {
        match field_value(conference, self.field) {
            FieldValue::One(value) => self.matches_value(&value),
            // List fields match when any element satisfies the predicate.
            FieldValue::Many(values) => {
                for value in values {
                    if self.matches_value(&value)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    fn matches_value(&self, value: &Value) -> Result<bool> {
        // A record that lacks the property never matches.
        if value.is_null() {
            return Ok(false);
        }
        let ordering = value.compare(&self.value)?;
        Ok(self.op.accepts(ordering))
    }
}

enum FieldValue {
    One(Value),
    Many(Vec<Value>),
}

fn field_value(conference: &Conference, field: QueryField) -> FieldValue {
    match field {
        QueryField::Name => FieldValue::One(conference.name().into()),
        QueryField::City => FieldValue::One(
            conference
                .city()
                .map(Value::from)
                .unwrap_or(Value::Null),
        ),
        QueryField::Topic => FieldValue::Many(
            conference
                .topics()
                .iter()
                .map(|t| Value::from(t.as_str()))
                .collect(),
        ),
        QueryField::Month => FieldValue::One(
            conference
                .month()
                .map(Value::from)
                .unwrap_or(Value::Null),
        ),
        QueryField::MaxAttendees => FieldValue::One(
            conference
                .max_attendees()
                .map(Value::from)
                .unwrap_or(Value::Null),
        ),
        QueryField::SeatsAvailable => FieldValue::One(
            conference
                .seats_available()
                .map(Value::from)
                .unwrap_or(Value::Null),
        ),
    }
}

/// Sort key for one conference under one field. List fields sort by their
/// smallest element; missing values sort last (NULL-last ordering).
fn sort_value(conference: &Conference, field: QueryField) -> Value {
    match field_value(conference, field) {
        FieldValue::One(value) => value,
        FieldValue::Many(values) => values
            .into_iter()
            .reduce(|min, v| {
                match v.compare(&min) {
                    Ok(Ordering::Less) => v,
                    _ => min,
                }
            })
            .unwrap_or(Value::Null),
    }
}

/// Declarative conference query.
///
/// Collects criteria and an optional sort field, then validates them into
/// an executable [`QueryPlan`]:
///
/// ```
/// use confcentral::query::{ConferenceQuery, Filter, FilterOp, QueryField};
///
/// let plan = ConferenceQuery::new()
///     .filter(Filter::new(QueryField::City, FilterOp::Eq, "London"))
///     .filter(Filter::new(QueryField::Month, FilterOp::Gt, 5i64))
///     .order_by(QueryField::Name)
///     .build()
///     .unwrap();
/// // MONTH carries the inequality, so it leads the sort order.
/// assert_eq!(plan.sort_fields()[0], QueryField::Month);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConferenceQuery {
    filters: Vec<Filter>,
    sort: Option<QueryField>,
}

impl ConferenceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, field: QueryField) -> Self {
        self.sort = Some(field);
        self
    }

    /// Validates the criteria into a plan.
    ///
    /// Equality filters keep their input order. At most one field may carry
    /// inequality operators (several inequality filters on the *same* field
    /// form a range and are fine); a second distinct field fails with
    /// `InvalidFilterCombination`. The store requires an inequality field to
    /// be sorted first, so when one is present it always leads the sort
    /// order and the requested sort (or the `NAME` default) follows it.
    pub fn build(self) -> Result<QueryPlan> {
        let mut equality = Vec::new();
        let mut inequality = Vec::new();
        let mut inequality_field: Option<QueryField> = None;

        for filter in self.filters {
            if filter.op.is_inequality() {
                match inequality_field {
                    Some(existing) if existing != filter.field => {
                        return Err(CoreError::InvalidFilterCombination {
                            first: existing.to_string(),
                            second: filter.field.to_string(),
                        });
                    }
                    _ => inequality_field = Some(filter.field),
                }
                inequality.push(filter);
            } else {
                equality.push(filter);
            }
        }

        let mut sort = Vec::new();
        if let Some(field) = inequality_field {
            sort.push(field);
        }
        let secondary = self.sort.unwrap_or(QueryField::Name);
        if !sort.contains(&secondary) {
            sort.push(secondary);
        }

        Ok(QueryPlan {
            equality,
            inequality,
            sort,
        })
    }
}

/// A validated, executable query.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    equality: Vec<Filter>,
    inequality: Vec<Filter>,
    sort: Vec<QueryField>,
}

impl QueryPlan {
    /// Equality criteria, in input order.
    pub fn equality_filters(&self) -> &[Filter] {
        &self.equality
    }

    /// Inequality criteria; all reference the same field.
    pub fn inequality_filters(&self) -> &[Filter] {
        &self.inequality
    }

    pub fn sort_fields(&self) -> &[QueryField] {
        &self.sort
    }

    pub fn matches(&self, conference: &Conference) -> Result<bool> {
        for filter in self.equality.iter().chain(self.inequality.iter()) {
            if !filter.matches(conference)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Filters and sorts an already-materialized record set.
    ///
    /// This is how the in-memory reference store executes a plan; a remote
    /// store would translate the plan into its native query instead.
    pub fn apply(&self, records: Vec<Conference>) -> Result<Vec<Conference>> {
        let mut matched = Vec::new();
        for record in records {
            if self.matches(&record)? {
                matched.push(record);
            }
        }

        let mut keyed: Vec<(Vec<Value>, Conference)> = matched
            .into_iter()
            .map(|c| {
                let key: Vec<Value> = self.sort.iter().map(|f| sort_value(&c, *f)).collect();
                (key, c)
            })
            .collect();
        // Sort keys for one field are always same-typed, so compare cannot
        // mismatch here.
        keyed.sort_by(|(a, _), (b, _)| {
            a.iter()
                .zip(b.iter())
                .map(|(x, y)| x.compare(y).unwrap_or(Ordering::Equal))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        Ok(keyed.into_iter().map(|(_, c)| c).collect())
    }
}

/// Result of a conference query: the matching records plus the distinct
/// organizer profile keys they reference, so callers can batch-prefetch
/// organizer profiles instead of looking them up one at a time.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub conferences: Vec<Conference>,
    pub organizer_keys: Vec<ProfileKey>,
}

impl QueryOutcome {
    pub fn from_conferences(conferences: Vec<Conference>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let mut organizer_keys = Vec::new();
        for conference in &conferences {
            let key = conference.organizer_key();
            if seen.insert(key.clone()) {
                organizer_keys.push(key);
            }
        }
        Self {
            conferences,
            organizer_keys,
        }
    }
}
