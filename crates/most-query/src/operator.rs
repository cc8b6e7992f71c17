//! Comparison and logical operators of the filter grammar.

use std::fmt;

/// Comparison operators that terminate a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    /// Equal: `eq`
    Equal,
    /// Not equal: `ne`
    NotEqual,
    /// Greater than: `gt`
    GreaterThan,
    /// Greater than or equal: `ge`
    GreaterOrEqual,
    /// Lower than: `lt`
    LowerThan,
    /// Lower than or equal: `le`
    LowerOrEqual,
    /// Membership, expanded to an `or` of `eq` clauses.
    In,
    /// Non-membership, expanded to an `and` of `ne` clauses.
    NotIn,
}

impl ComparisonOperator {
    /// Returns the operator code.
    pub fn code(self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "eq",
            ComparisonOperator::NotEqual => "ne",
            ComparisonOperator::GreaterThan => "gt",
            ComparisonOperator::GreaterOrEqual => "ge",
            ComparisonOperator::LowerThan => "lt",
            ComparisonOperator::LowerOrEqual => "le",
            ComparisonOperator::In => "in",
            ComparisonOperator::NotIn => "nin",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Logical operators that join clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogicalOperator {
    /// Conjunction: `and`
    #[default]
    And,
    /// Disjunction: `or`
    Or,
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperator::And => f.write_str("and"),
            LogicalOperator::Or => f.write_str("or"),
        }
    }
}
