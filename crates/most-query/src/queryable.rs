//! Fluent filter expression builder.
//!
//! [`ClientDataQueryable`] turns a left-to-right chain of calls into a
//! filter string. Operand calls (`where_`, `and`, `or` and the function
//! helpers) stage a pending clause; comparison calls (`equal`, `gt`, ...)
//! fold the staged clause into the active filter.
//!
//! Clauses joined by the same logical operator stay flat. When the logical
//! operator changes, everything accumulated so far is wrapped in one group:
//!
//! ```rust
//! use most_query::ClientDataQueryable;
//!
//! let query = ClientDataQueryable::new("Person")
//!     .where_("a").eq(1)
//!     .and("b").eq(2)
//!     .or("c").eq(3);
//!
//! assert_eq!(query.to_filter().as_deref(), Some("(a eq 1 and b eq 2) or c eq 3"));
//! ```

use std::mem;

use tracing::{debug, trace};

use crate::error::QueryResult;
use crate::functions::FilterFunction;
use crate::operator::{ComparisonOperator, LogicalOperator};
use crate::params::QueryParams;
use crate::value::{Field, QueryValue};

/// Top value meaning "no limit".
pub const TOP_ALL: i64 = -1;

/// Clause state staged by operand calls and consumed by the next fold.
#[derive(Debug, Clone, Default, PartialEq)]
struct PendingClause {
    left: Option<String>,
    operator: Option<ComparisonOperator>,
    right: Option<QueryValue>,
    logical: Option<LogicalOperator>,
}

/// A query under construction against one model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientDataQueryable {
    model: String,
    filter: Option<String>,
    prepared: Option<String>,
    select: Vec<String>,
    group_by: Vec<String>,
    order_by: Vec<String>,
    expand: Vec<String>,
    top: Option<i64>,
    skip: Option<u64>,
    inline_count: Option<bool>,
    array: Option<bool>,
    pending: PendingClause,
    last_logical: Option<LogicalOperator>,
    /// The active filter came in as raw text; its top-level operator is unknown.
    opaque: bool,
}

impl ClientDataQueryable {
    /// Creates an empty query against `model`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Returns the target model.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Retargets the query to another model.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    /// Returns a field reference for comparisons against another field.
    pub fn field(name: impl Into<String>) -> QueryResult<Field> {
        Field::new(name)
    }

    // =========================================================================
    // Operands
    // =========================================================================

    /// Starts a new filter on `field`, discarding the active filter.
    ///
    /// A prepared filter is kept. The remembered logical operator used for
    /// grouping is reset, so the next `and`/`or` never wraps prior clauses.
    pub fn where_(mut self, field: impl Into<String>) -> Self {
        self.filter = None;
        self.opaque = false;
        self.last_logical = None;
        self.pending = PendingClause {
            left: Some(field.into()),
            ..Default::default()
        };
        self
    }

    /// Joins the next clause on `field` with `and`.
    pub fn and(mut self, field: impl Into<String>) -> Self {
        self.pending.left = Some(field.into());
        self.and_next()
    }

    /// Joins the next clause on `field` with `or`.
    pub fn or(mut self, field: impl Into<String>) -> Self {
        self.pending.left = Some(field.into());
        self.or_next()
    }

    /// Joins the next clause with `and`, keeping the staged operand.
    pub fn and_next(mut self) -> Self {
        self.pending.logical = Some(LogicalOperator::And);
        self
    }

    /// Joins the next clause with `or`, keeping the staged operand.
    pub fn or_next(mut self) -> Self {
        self.pending.logical = Some(LogicalOperator::Or);
        self
    }

    // =========================================================================
    // Comparisons
    // =========================================================================

    /// Folds `left eq value`. A list value folds a membership test instead.
    pub fn equal(self, value: impl Into<QueryValue>) -> Self {
        let value = value.into();
        let operator = if value.is_list() {
            ComparisonOperator::In
        } else {
            ComparisonOperator::Equal
        };
        self.compare(operator, value)
    }

    /// Alias of [`equal`](Self::equal).
    #[allow(clippy::should_implement_trait)]
    pub fn eq(self, value: impl Into<QueryValue>) -> Self {
        self.equal(value)
    }

    /// Folds `left ne value`. A list value folds a non-membership test instead.
    pub fn not_equal(self, value: impl Into<QueryValue>) -> Self {
        let value = value.into();
        let operator = if value.is_list() {
            ComparisonOperator::NotIn
        } else {
            ComparisonOperator::NotEqual
        };
        self.compare(operator, value)
    }

    /// Alias of [`not_equal`](Self::not_equal).
    #[allow(clippy::should_implement_trait)]
    pub fn ne(self, value: impl Into<QueryValue>) -> Self {
        self.not_equal(value)
    }

    /// Folds `left gt value`.
    pub fn greater_than(self, value: impl Into<QueryValue>) -> Self {
        self.compare(ComparisonOperator::GreaterThan, value.into())
    }

    /// Alias of [`greater_than`](Self::greater_than).
    pub fn gt(self, value: impl Into<QueryValue>) -> Self {
        self.greater_than(value)
    }

    /// Folds `left ge value`.
    pub fn greater_or_equal(self, value: impl Into<QueryValue>) -> Self {
        self.compare(ComparisonOperator::GreaterOrEqual, value.into())
    }

    /// Alias of [`greater_or_equal`](Self::greater_or_equal).
    pub fn ge(self, value: impl Into<QueryValue>) -> Self {
        self.greater_or_equal(value)
    }

    /// Folds `left lt value`.
    pub fn lower_than(self, value: impl Into<QueryValue>) -> Self {
        self.compare(ComparisonOperator::LowerThan, value.into())
    }

    /// Alias of [`lower_than`](Self::lower_than).
    pub fn lt(self, value: impl Into<QueryValue>) -> Self {
        self.lower_than(value)
    }

    /// Folds `left le value`.
    pub fn lower_or_equal(self, value: impl Into<QueryValue>) -> Self {
        self.compare(ComparisonOperator::LowerOrEqual, value.into())
    }

    /// Alias of [`lower_or_equal`](Self::lower_or_equal).
    pub fn le(self, value: impl Into<QueryValue>) -> Self {
        self.lower_or_equal(value)
    }

    /// Folds `(left eq v1 or left eq v2 ...)`.
    pub fn is_in(self, values: impl Into<QueryValue>) -> Self {
        self.compare(ComparisonOperator::In, values.into())
    }

    /// Folds `(left ne v1 and left ne v2 ...)`.
    pub fn not_in(self, values: impl Into<QueryValue>) -> Self {
        self.compare(ComparisonOperator::NotIn, values.into())
    }

    /// Folds `indexof(left,value) ge 0`.
    pub fn contains(self, value: impl Into<QueryValue>) -> Self {
        let value = value.into().serialize();
        self.wrap_left(|left| FilterFunction::IndexOf.call(&[left, value]))
            .compare(ComparisonOperator::GreaterOrEqual, QueryValue::from(0))
    }

    /// Folds `(left ge low and left le high)` as a single clause.
    pub fn between(mut self, low: impl Into<QueryValue>, high: impl Into<QueryValue>) -> Self {
        let pending = mem::take(&mut self.pending);
        match pending.left.filter(|left| !left.is_empty()) {
            Some(left) => {
                let expr = format!(
                    "({left} ge {} and {left} le {})",
                    low.into().serialize(),
                    high.into().serialize()
                );
                self.append(expr, pending.logical.unwrap_or_default());
            }
            None => trace!(model = %self.model, "between without operand ignored"),
        }
        self
    }

    fn compare(mut self, operator: ComparisonOperator, value: QueryValue) -> Self {
        self.pending.operator = Some(operator);
        self.pending.right = Some(value);
        self.fold();
        self
    }

    /// Folds the pending clause into the active filter and clears it.
    fn fold(&mut self) {
        let pending = mem::take(&mut self.pending);
        let left = pending.left.filter(|left| !left.is_empty());
        let (Some(left), Some(operator)) = (left, pending.operator) else {
            trace!(model = %self.model, "fold without operand ignored");
            return;
        };
        let right = pending.right.unwrap_or_default();
        let expr = clause(&left, operator, &right);
        self.append(expr, pending.logical.unwrap_or_default());
    }

    fn append(&mut self, expr: String, logical: LogicalOperator) {
        let combined = match self.filter.take() {
            None => expr,
            Some(existing) => {
                let last = *self.last_logical.get_or_insert(logical);
                let combined = if last == logical && !self.opaque {
                    format!("{existing} {logical} {expr}")
                } else {
                    format!("({existing}) {logical} {expr}")
                };
                self.last_logical = Some(logical);
                combined
            }
        };
        debug!(model = %self.model, filter = %combined, "clause folded");
        self.filter = Some(combined);
        self.opaque = false;
    }

    // =========================================================================
    // Raw filters
    // =========================================================================

    /// Replaces the active filter with an already-rendered expression.
    ///
    /// Blank text leaves the query unchanged.
    pub fn filter(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            return self;
        }
        self.filter = Some(text);
        self.last_logical = None;
        self.opaque = true;
        self
    }

    /// Combines the active filter with `(text)` using `and`.
    pub fn and_also(self, text: impl Into<String>) -> Self {
        self.splice(text.into(), LogicalOperator::And)
    }

    /// Combines the active filter with `(text)` using `or`.
    pub fn or_else(self, text: impl Into<String>) -> Self {
        self.splice(text.into(), LogicalOperator::Or)
    }

    fn splice(mut self, text: String, logical: LogicalOperator) -> Self {
        if text.trim().is_empty() {
            return self;
        }
        match self.filter.take() {
            Some(existing) => {
                self.filter = Some(format!("({existing}) {logical} ({text})"));
                self.last_logical = Some(logical);
                self.opaque = false;
            }
            None => {
                self.filter = Some(text);
                self.last_logical = None;
                self.opaque = true;
            }
        }
        self
    }

    /// Commits the active filter into the prepared filter.
    ///
    /// Both are combined with `and` when read; the active filter starts over
    /// and the remembered logical operator used for grouping is reset.
    pub fn prepare(mut self) -> Self {
        if let Some(filter) = self.filter.take() {
            let prepared = match self.prepared.take() {
                Some(prepared) => format!("({prepared}) and ({filter})"),
                None => filter,
            };
            debug!(model = %self.model, prepared = %prepared, "filter prepared");
            self.prepared = Some(prepared);
            self.last_logical = None;
            self.opaque = false;
        }
        self
    }

    /// Returns the full filter: the prepared and active filters joined by `and`.
    pub fn to_filter(&self) -> Option<String> {
        match (&self.prepared, &self.filter) {
            (Some(prepared), Some(filter)) => Some(format!("({prepared}) and ({filter})")),
            (Some(prepared), None) => Some(prepared.clone()),
            (None, Some(filter)) => Some(filter.clone()),
            (None, None) => None,
        }
    }

    /// Returns the active filter.
    pub fn active_filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Returns the prepared filter.
    pub fn prepared_filter(&self) -> Option<&str> {
        self.prepared.as_deref()
    }

    // =========================================================================
    // Function helpers
    // =========================================================================

    /// Replaces the operand with `indexof(left,value)`.
    pub fn index_of(self, value: impl Into<QueryValue>) -> Self {
        let value = value.into().serialize();
        self.wrap_left(|left| FilterFunction::IndexOf.call(&[left, value]))
    }

    /// Replaces the operand with `startswith(left,value)`.
    pub fn starts_with(self, value: impl Into<QueryValue>) -> Self {
        let value = value.into().serialize();
        self.wrap_left(|left| FilterFunction::StartsWith.call(&[left, value]))
    }

    /// Replaces the operand with `endswith(left,value)`.
    pub fn ends_with(self, value: impl Into<QueryValue>) -> Self {
        let value = value.into().serialize();
        self.wrap_left(|left| FilterFunction::EndsWith.call(&[left, value]))
    }

    /// Replaces the operand with `substringof(value,left)`.
    pub fn substring_of(self, value: impl Into<QueryValue>) -> Self {
        let value = value.into().serialize();
        self.wrap_left(|left| FilterFunction::SubstringOf.call(&[value, left]))
    }

    /// Replaces the operand with `substring(left,pos,length)`.
    pub fn substring(self, pos: usize, length: usize) -> Self {
        self.wrap_left(|left| {
            FilterFunction::Substring.call(&[left, pos.to_string(), length.to_string()])
        })
    }

    /// Replaces the operand with `substring(left,pos)`.
    pub fn substring_from(self, pos: usize) -> Self {
        self.wrap_left(|left| FilterFunction::Substring.call(&[left, pos.to_string()]))
    }

    /// Replaces the operand with `length(left)`.
    pub fn length(self) -> Self {
        self.apply(FilterFunction::Length)
    }

    /// Replaces the operand with `tolower(left)`.
    pub fn to_lower(self) -> Self {
        self.apply(FilterFunction::ToLower)
    }

    /// Replaces the operand with `toupper(left)`.
    pub fn to_upper(self) -> Self {
        self.apply(FilterFunction::ToUpper)
    }

    /// Replaces the operand with `trim(left)`.
    pub fn trim(self) -> Self {
        self.apply(FilterFunction::Trim)
    }

    /// Replaces the operand with `concat(left,v1,v2...)`.
    pub fn concat<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<QueryValue>,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.into().serialize()).collect();
        self.wrap_left(|left| {
            let mut args = Vec::with_capacity(values.len() + 1);
            args.push(left);
            args.extend(values);
            FilterFunction::Concat.call(&args)
        })
    }

    /// Replaces the operand with `day(left)`.
    pub fn day(self) -> Self {
        self.apply(FilterFunction::Day)
    }

    /// Replaces the operand with `hour(left)`.
    pub fn hour(self) -> Self {
        self.apply(FilterFunction::Hour)
    }

    /// Replaces the operand with `minute(left)`.
    pub fn minute(self) -> Self {
        self.apply(FilterFunction::Minute)
    }

    /// Replaces the operand with `month(left)`.
    pub fn month(self) -> Self {
        self.apply(FilterFunction::Month)
    }

    /// Replaces the operand with `second(left)`.
    pub fn second(self) -> Self {
        self.apply(FilterFunction::Second)
    }

    /// Replaces the operand with `year(left)`.
    pub fn year(self) -> Self {
        self.apply(FilterFunction::Year)
    }

    /// Replaces the operand with `round(left)`.
    pub fn round(self) -> Self {
        self.apply(FilterFunction::Round)
    }

    /// Replaces the operand with `floor(left)`.
    pub fn floor(self) -> Self {
        self.apply(FilterFunction::Floor)
    }

    fn apply(self, function: FilterFunction) -> Self {
        self.wrap_left(|left| function.call(&[left]))
    }

    fn wrap_left<F>(mut self, f: F) -> Self
    where
        F: FnOnce(String) -> String,
    {
        match self.pending.left.take().filter(|left| !left.is_empty()) {
            Some(left) => self.pending.left = Some(f(left)),
            None => trace!(model = %self.model, "function without operand ignored"),
        }
        self
    }

    // =========================================================================
    // Paging and shape
    // =========================================================================

    /// Limits the number of results. Any negative count means no limit.
    pub fn take(mut self, n: i64) -> Self {
        self.top = Some(if n < 0 { TOP_ALL } else { n });
        self
    }

    /// Skips the first `n` results.
    pub fn skip(mut self, n: u64) -> Self {
        self.skip = Some(n);
        self
    }

    /// Requests every result.
    pub fn all(self) -> Self {
        self.take(TOP_ALL)
    }

    /// Requests the first match only.
    pub fn first(self) -> Self {
        self.take(1).skip(0)
    }

    /// Sets the projected fields.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the grouping fields.
    pub fn group<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the expanded associations.
    pub fn expand<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Orders by `field` ascending, replacing any previous ordering.
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = vec![field.into()];
        self
    }

    /// Orders by `field` descending, replacing any previous ordering.
    pub fn order_by_descending(mut self, field: impl Into<String>) -> Self {
        self.order_by = vec![format!("{} desc", field.into())];
        self
    }

    /// Adds `field` ascending to the ordering.
    pub fn then_by(mut self, field: impl Into<String>) -> Self {
        self.order_by.push(field.into());
        self
    }

    /// Adds `field` descending to the ordering.
    pub fn then_by_descending(mut self, field: impl Into<String>) -> Self {
        self.order_by.push(format!("{} desc", field.into()));
        self
    }

    /// Requests paging metadata along with the results.
    pub fn inline_count(mut self, flag: bool) -> Self {
        self.inline_count = Some(flag);
        self
    }

    /// Alias of [`inline_count`](Self::inline_count).
    pub fn paged(self, flag: bool) -> Self {
        self.inline_count(flag)
    }

    /// Marks the expected result shape as a bare array.
    pub fn as_array(mut self, flag: bool) -> Self {
        self.array = Some(flag);
        self
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Returns an independent query holding only the query controls, with
    /// the prepared and active filters merged into one filter.
    pub fn copy(&self) -> Self {
        let (last_logical, opaque) = match (&self.prepared, &self.filter) {
            (None, _) => (self.last_logical, self.opaque),
            (Some(_), Some(_)) => (Some(LogicalOperator::And), false),
            (Some(_), None) => (None, true),
        };
        Self {
            model: self.model.clone(),
            filter: self.to_filter(),
            prepared: None,
            select: self.select.clone(),
            group_by: self.group_by.clone(),
            order_by: self.order_by.clone(),
            expand: self.expand.clone(),
            top: self.top,
            skip: self.skip,
            inline_count: self.inline_count,
            array: self.array,
            pending: PendingClause::default(),
            last_logical,
            opaque,
        }
    }

    /// Projects the query into its request parameters.
    pub fn params(&self) -> QueryParams {
        QueryParams {
            model: self.model.clone(),
            array: self.array,
            filter: self.to_filter(),
            select: join(&self.select),
            group_by: join(&self.group_by),
            order_by: join(&self.order_by),
            expand: join(&self.expand),
            top: self.top,
            skip: self.skip,
            inline_count: self.inline_count.filter(|&flag| flag),
        }
    }
}

fn join(fields: &[String]) -> Option<String> {
    if fields.is_empty() {
        None
    } else {
        Some(fields.join(","))
    }
}

/// Renders one clause.
fn clause(left: &str, operator: ComparisonOperator, right: &QueryValue) -> String {
    match operator {
        ComparisonOperator::In => {
            membership(left, ComparisonOperator::Equal, LogicalOperator::Or, right)
        }
        ComparisonOperator::NotIn => {
            membership(left, ComparisonOperator::NotEqual, LogicalOperator::And, right)
        }
        _ => format!("{left} {operator} {}", right.serialize()),
    }
}

fn membership(
    left: &str,
    operator: ComparisonOperator,
    joiner: LogicalOperator,
    values: &QueryValue,
) -> String {
    let elements = values.as_elements();
    if elements.is_empty() {
        // x in () never matches; x nin () always does
        return (joiner == LogicalOperator::And).to_string();
    }
    let terms = elements
        .iter()
        .map(|value| format!("{left} {operator} {}", value.serialize()))
        .collect::<Vec<_>>()
        .join(&format!(" {joiner} "));
    format!("({terms})")
}
