use std::fmt;

/// Boolean filter expression tree
///
/// Clauses are folded left to right: each new clause is joined to everything
/// before it with `AND` when mandatory and `OR` when optional. Rendering
/// parenthesizes a child whose connective differs from its parent's, so the
/// evaluation order never depends on DynamoDB's operator precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpr {
    /// A single rendered comparison such as `#Name = :Name`
    Leaf(String),
    /// Both sides must hold
    And(Box<FilterExpr>, Box<FilterExpr>),
    /// Either side may hold
    Or(Box<FilterExpr>, Box<FilterExpr>),
}

impl FilterExpr {
    /// Join `clause` onto this expression
    pub fn join(self, clause: FilterExpr, mandatory: bool) -> FilterExpr {
        if mandatory {
            FilterExpr::And(Box::new(self), Box::new(clause))
        } else {
            FilterExpr::Or(Box::new(self), Box::new(clause))
        }
    }

    /// Fold `(leaf, mandatory)` pairs into a tree
    ///
    /// The first clause's flag is ignored since there is nothing to join it to.
    /// Returns `None` when there are no clauses.
    pub fn fold<I>(clauses: I) -> Option<FilterExpr>
    where
        I: IntoIterator<Item = (FilterExpr, bool)>,
    {
        clauses
            .into_iter()
            .fold(None, |acc: Option<FilterExpr>, (clause, mandatory)| {
                Some(match acc {
                    Some(expr) => expr.join(clause, mandatory),
                    None => clause,
                })
            })
    }

    fn connective(&self) -> Option<&'static str> {
        match self {
            FilterExpr::Leaf(_) => None,
            FilterExpr::And(..) => Some("AND"),
            FilterExpr::Or(..) => Some("OR"),
        }
    }

    fn fmt_child(&self, parent: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.connective() {
            Some(connective) if connective != parent => write!(f, "({self})"),
            _ => write!(f, "{self}"),
        }
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpr::Leaf(expr) => f.write_str(expr),
            FilterExpr::And(l, r) | FilterExpr::Or(l, r) => {
                let connective = self.connective().unwrap_or_default();
                l.fmt_child(connective, f)?;
                write!(f, " {connective} ")?;
                r.fmt_child(connective, f)
            }
        }
    }
}
