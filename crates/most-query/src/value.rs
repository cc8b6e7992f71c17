//! Literal values and their rendering into the filter grammar.
//!
//! Every right-hand operand of a clause, and every literal argument of a
//! filter function, is carried as a [`QueryValue`] and rendered with
//! [`QueryValue::serialize`]:
//!
//! | Value | Rendered as |
//! |-------|-------------|
//! | `Null` | `null` |
//! | `Bool` | `true` / `false` |
//! | `Integer` / `Unsigned` | `42`, `18446744073709551615` |
//! | `Number` | `1.5` |
//! | `DateTime` | `'2015-07-29 14:05:09.042'` |
//! | `List` | `1,2,3` (elements only, no brackets) |
//! | `Field` | `name` (bare identifier) |
//! | `Text` | `'O\'Reilly'` |

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{QueryError, QueryResult};

/// Fixed-width format used for date/time literals.
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// =============================================================================
// Field references
// =============================================================================

/// A reference to a field of the target model.
///
/// A field reference renders as a bare identifier, so it can be compared
/// against another field instead of a literal:
///
/// ```rust
/// use most_query::{ClientDataQueryable, Field};
///
/// let query = ClientDataQueryable::new("Order")
///     .where_("orderDate")
///     .lower_than(Field::new("paymentDueDate").unwrap());
///
/// assert_eq!(query.to_filter().as_deref(), Some("orderDate lt paymentDueDate"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field(String);

impl Field {
    /// Creates a field reference.
    ///
    /// Fails when the name is empty or whitespace only.
    pub fn new(name: impl Into<String>) -> QueryResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(QueryError::InvalidArgument {
                argument: "name",
                reason: "field name cannot be empty".to_string(),
            });
        }
        Ok(Self(name))
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Query values
// =============================================================================

/// A literal value that can appear in a filter expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryValue {
    /// The `null` literal.
    #[default]
    Null,
    /// A boolean literal.
    Bool(bool),
    /// A signed integer literal.
    Integer(i64),
    /// An unsigned integer literal beyond the signed range.
    Unsigned(u64),
    /// A floating-point literal.
    Number(f64),
    /// A date/time literal, rendered in local wall-clock time.
    DateTime(NaiveDateTime),
    /// A list of values, rendered comma-separated.
    List(Vec<QueryValue>),
    /// A field reference, rendered as a bare identifier.
    Field(Field),
    /// A string literal, rendered quoted and escaped.
    Text(String),
}

impl QueryValue {
    /// Renders this value into the filter grammar.
    pub fn serialize(&self) -> String {
        match self {
            QueryValue::Null => "null".to_string(),
            QueryValue::Bool(b) => b.to_string(),
            QueryValue::Integer(n) => n.to_string(),
            QueryValue::Unsigned(n) => n.to_string(),
            QueryValue::Number(n) => format_number(*n),
            QueryValue::DateTime(dt) => format!("'{}'", dt.format(DATE_TIME_FORMAT)),
            QueryValue::List(items) => items
                .iter()
                .map(QueryValue::serialize)
                .collect::<Vec<_>>()
                .join(","),
            QueryValue::Field(field) => field.name().to_string(),
            QueryValue::Text(s) => quote(s),
        }
    }

    /// Returns true if this value is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, QueryValue::List(_))
    }

    /// Returns the list elements, or this value as a single-element slice.
    pub fn as_elements(&self) -> &[QueryValue] {
        match self {
            QueryValue::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Escapes a string and wraps it in single quotes.
///
/// ```rust
/// assert_eq!(most_query::quote("it's"), r"'it\'s'");
/// ```
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\u{1a}' => out.push_str("\\Z"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        // -0 renders as 0
        "0".to_string()
    } else {
        n.to_string()
    }
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for QueryValue {
                fn from(n: $t) -> Self {
                    QueryValue::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<isize> for QueryValue {
    fn from(n: isize) -> Self {
        // isize is at most 64 bits on supported targets
        QueryValue::Integer(n as i64)
    }
}

impl From<u64> for QueryValue {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(QueryValue::Unsigned(n), QueryValue::Integer)
    }
}

impl From<usize> for QueryValue {
    fn from(n: usize) -> Self {
        QueryValue::from(n as u64)
    }
}

impl From<f32> for QueryValue {
    fn from(n: f32) -> Self {
        QueryValue::Number(f64::from(n))
    }
}

impl From<f64> for QueryValue {
    fn from(n: f64) -> Self {
        QueryValue::Number(n)
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Bool(b)
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Text(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Text(s)
    }
}

impl From<&String> for QueryValue {
    fn from(s: &String) -> Self {
        QueryValue::Text(s.clone())
    }
}

impl From<char> for QueryValue {
    fn from(c: char) -> Self {
        QueryValue::Text(c.to_string())
    }
}

impl From<Field> for QueryValue {
    fn from(field: Field) -> Self {
        QueryValue::Field(field)
    }
}

impl From<NaiveDateTime> for QueryValue {
    fn from(dt: NaiveDateTime) -> Self {
        QueryValue::DateTime(dt)
    }
}

impl From<NaiveDate> for QueryValue {
    fn from(date: NaiveDate) -> Self {
        QueryValue::DateTime(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for QueryValue {
    fn from(dt: DateTime<Tz>) -> Self {
        QueryValue::DateTime(dt.naive_local())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Null, Into::into)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(items: Vec<T>) -> Self {
        QueryValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<QueryValue>, const N: usize> From<[T; N]> for QueryValue {
    fn from(items: [T; N]) -> Self {
        QueryValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<QueryValue>> From<&[T]> for QueryValue {
    fn from(items: &[T]) -> Self {
        QueryValue::List(items.iter().cloned().map(Into::into).collect())
    }
}

/// Coerces an untyped JSON value. Objects have no literal form and are
/// rendered as their JSON text.
impl From<serde_json::Value> for QueryValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => QueryValue::Null,
            Value::Bool(b) => QueryValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    QueryValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    QueryValue::Unsigned(u)
                } else {
                    QueryValue::Number(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => QueryValue::Text(s),
            Value::Array(items) => QueryValue::List(items.into_iter().map(Into::into).collect()),
            object @ Value::Object(_) => QueryValue::Text(object.to_string()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
