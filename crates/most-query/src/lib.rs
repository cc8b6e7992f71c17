//! # most-query
//!
//! A fluent builder for OData-style filter expressions and query parameters,
//! as consumed by MOST Web Framework data services.
//!
//! This crate provides:
//! - **Query Builder**: Accumulate comparison clauses into a filter string
//!   with correct grouping, without building an expression tree
//! - **Literal Serializer**: Render strings, numbers, dates, lists and field
//!   references into the filter grammar
//! - **Parameter Projection**: Flatten a query into `$filter`, `$select`,
//!   `$orderby`, `$top`, ... wire parameters
//!
//! ## Usage
//!
//! ```rust
//! use most_query::ClientDataQueryable;
//!
//! let query = ClientDataQueryable::new("Person")
//!     .where_("familyName").equal("O'Brien")
//!     .and("age").greater_or_equal(18)
//!     .select(["id", "givenName", "familyName"])
//!     .order_by("familyName")
//!     .then_by_descending("age")
//!     .take(25);
//!
//! assert_eq!(
//!     query.to_filter().as_deref(),
//!     Some(r"familyName eq 'O\'Brien' and age ge 18")
//! );
//!
//! let params = query.params();
//! assert_eq!(params.select.as_deref(), Some("id,givenName,familyName"));
//! assert_eq!(params.order_by.as_deref(), Some("familyName,age desc"));
//! assert_eq!(params.top, Some(25));
//! ```
//!
//! ## Filter Grammar Quick Reference
//!
//! | Builder call | Renders |
//! |--------------|---------|
//! | `.where_("a").eq(1)` | `a eq 1` |
//! | `.where_("a").ne("x")` | `a ne 'x'` |
//! | `.where_("a").gt(1)` / `ge` / `lt` / `le` | `a gt 1` |
//! | `.where_("a").eq([1, 2])` | `(a eq 1 or a eq 2)` |
//! | `.where_("a").ne([1, 2])` | `(a ne 1 and a ne 2)` |
//! | `.where_("a").to_lower().eq("x")` | `tolower(a) eq 'x'` |
//! | `.where_("a").starts_with("x").eq(true)` | `startswith(a,'x') eq true` |
//! | `.where_("a").year().eq(2015)` | `year(a) eq 2015` |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod functions;
mod operator;
mod params;
mod queryable;
pub mod text;
mod value;

pub use error::{QueryError, QueryResult};
pub use functions::FilterFunction;
pub use operator::{ComparisonOperator, LogicalOperator};
pub use params::QueryParams;
pub use queryable::{ClientDataQueryable, TOP_ALL};
pub use value::{quote, Field, QueryValue};
