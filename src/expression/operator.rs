use aws_sdk_dynamodb::types::ComparisonOperator;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Comparison operator of a key condition or filter clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `attr = val`
    Eq,
    /// `attr <> val`
    Ne,
    /// `attr < val`
    Lt,
    /// `attr <= val`
    Le,
    /// `attr > val`
    Gt,
    /// `attr >= val`
    Ge,
    /// Single-bound `BETWEEN`, rendered as `attr = val`.
    ///
    /// Use the two-bound `*_between_bounds` builder calls for a real range.
    Between,
    /// `contains(attr, val)`
    Contains,
    /// `NOT contains(attr, val)`
    NotContains,
    /// `begins_with(attr, val)`
    BeginsWith,
}

impl Operator {
    /// Every supported operator
    pub const ALL: [Operator; 10] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Lt,
        Operator::Le,
        Operator::Gt,
        Operator::Ge,
        Operator::Between,
        Operator::Contains,
        Operator::NotContains,
        Operator::BeginsWith,
    ];

    /// Upper-case wire name of the operator
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "EQ",
            Operator::Ne => "NE",
            Operator::Lt => "LT",
            Operator::Le => "LE",
            Operator::Gt => "GT",
            Operator::Ge => "GE",
            Operator::Between => "BETWEEN",
            Operator::Contains => "CONTAINS",
            Operator::NotContains => "NOT_CONTAINS",
            Operator::BeginsWith => "BEGINS_WITH",
        }
    }

    /// Render the sub-expression for a placeholder token
    ///
    /// The token names both placeholders: `#token` for the attribute name and
    /// `:token` for the value.
    ///
    /// ```
    /// use dynamo_builder::Operator;
    ///
    /// assert_eq!(Operator::Ge.render("Age"), "#Age >= :Age");
    /// assert_eq!(Operator::BeginsWith.render("Name"), "begins_with(#Name, :Name)");
    /// ```
    pub fn render(self, token: &str) -> String {
        self.render_with(&format!("#{token}"), &format!(":{token}"))
    }

    /// Render the sub-expression for explicit name and value placeholders
    pub fn render_with(self, name: &str, value: &str) -> String {
        match self {
            Operator::Eq | Operator::Between => format!("{name} = {value}"),
            Operator::Ne => format!("{name} <> {value}"),
            Operator::Lt => format!("{name} < {value}"),
            Operator::Le => format!("{name} <= {value}"),
            Operator::Gt => format!("{name} > {value}"),
            Operator::Ge => format!("{name} >= {value}"),
            Operator::Contains => format!("contains({name}, {value})"),
            Operator::NotContains => format!("NOT contains({name}, {value})"),
            Operator::BeginsWith => format!("begins_with({name}, {value})"),
        }
    }

    /// Whether the operator may constrain a sort key in a key condition
    pub fn is_sort_key_operator(self) -> bool {
        matches!(
            self,
            Operator::Eq
                | Operator::Lt
                | Operator::Le
                | Operator::Gt
                | Operator::Ge
                | Operator::BeginsWith
        )
    }
}

impl From<Operator> for ComparisonOperator {
    fn from(operator: Operator) -> Self {
        match operator {
            Operator::Eq => ComparisonOperator::Eq,
            Operator::Ne => ComparisonOperator::Ne,
            Operator::Lt => ComparisonOperator::Lt,
            Operator::Le => ComparisonOperator::Le,
            Operator::Gt => ComparisonOperator::Gt,
            Operator::Ge => ComparisonOperator::Ge,
            Operator::Between => ComparisonOperator::Between,
            Operator::Contains => ComparisonOperator::Contains,
            Operator::NotContains => ComparisonOperator::NotContains,
            Operator::BeginsWith => ComparisonOperator::BeginsWith,
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EQ" => Ok(Operator::Eq),
            "NE" => Ok(Operator::Ne),
            "LT" => Ok(Operator::Lt),
            "LE" => Ok(Operator::Le),
            "GT" => Ok(Operator::Gt),
            "GE" => Ok(Operator::Ge),
            "BETWEEN" => Ok(Operator::Between),
            "CONTAINS" => Ok(Operator::Contains),
            "NOT_CONTAINS" => Ok(Operator::NotContains),
            // older callers spell it without the S
            "BEGINS_WITH" | "BEGIN_WITH" => Ok(Operator::BeginsWith),
            other => Err(Error::InvalidOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
