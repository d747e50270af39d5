//! Key condition and filter expression assembly
//!
//! [`ExpressionBuilder`] collects key conditions and filter clauses and renders
//! them into what a Query or Scan request needs: an expression string plus the
//! `#name` and `:value` placeholder mappings.
//!
//! ```
//! use dynamo_builder::ExpressionBuilder;
//!
//! let rendered = ExpressionBuilder::new()
//!     .must_equal("Name", "Pedro")?
//!     .must_equal("LastName", "Pacheco")?
//!     .could_equal("Age", 26)?
//!     .render();
//!
//! assert_eq!(
//!     rendered.expression,
//!     "(#Name = :Name AND #LastName = :LastName) OR #Age = :Age"
//! );
//! assert_eq!(rendered.names["#Age"], "Age");
//! # Ok::<(), dynamo_builder::Error>(())
//! ```

/// Generates the `must_*` / `could_*` filter shorthands on any type with
/// `add_filter` and `add_between_filter` methods.
macro_rules! filter_shorthands {
    () => {
        filter_shorthands! {
            /// Mandatory `attr = value` filter
            must_equal => Eq, true;
            /// Mandatory `attr <> value` filter
            must_not_equal => Ne, true;
            /// Mandatory `attr < value` filter
            must_less => Lt, true;
            /// Mandatory `attr <= value` filter
            must_less_equal => Le, true;
            /// Mandatory `attr > value` filter
            must_greater => Gt, true;
            /// Mandatory `attr >= value` filter
            must_greater_equal => Ge, true;
            /// Mandatory single-bound `BETWEEN` filter, rendered as `attr = value`
            must_between => Between, true;
            /// Mandatory `contains(attr, value)` filter
            must_contain => Contains, true;
            /// Mandatory `NOT contains(attr, value)` filter
            must_not_contain => NotContains, true;
            /// Mandatory `begins_with(attr, value)` filter
            must_begin_with => BeginsWith, true;
            /// Optional `attr = value` filter
            could_equal => Eq, false;
            /// Optional `attr <> value` filter
            could_not_equal => Ne, false;
            /// Optional `attr < value` filter
            could_less => Lt, false;
            /// Optional `attr <= value` filter
            could_less_equal => Le, false;
            /// Optional `attr > value` filter
            could_greater => Gt, false;
            /// Optional `attr >= value` filter
            could_greater_equal => Ge, false;
            /// Optional single-bound `BETWEEN` filter, rendered as `attr = value`
            could_between => Between, false;
            /// Optional `contains(attr, value)` filter
            could_contain => Contains, false;
            /// Optional `NOT contains(attr, value)` filter
            could_not_contain => NotContains, false;
            /// Optional `begins_with(attr, value)` filter
            could_begin_with => BeginsWith, false;
        }

        /// Mandatory `attr BETWEEN low AND high` filter
        pub fn must_between_bounds<L, H>(
            self,
            attribute: &str,
            low: L,
            high: H,
        ) -> Result<Self, $crate::Error>
        where
            L: ::serde::Serialize,
            H: ::serde::Serialize,
        {
            self.add_between_filter(true, attribute, low, high)
        }

        /// Optional `attr BETWEEN low AND high` filter
        pub fn could_between_bounds<L, H>(
            self,
            attribute: &str,
            low: L,
            high: H,
        ) -> Result<Self, $crate::Error>
        where
            L: ::serde::Serialize,
            H: ::serde::Serialize,
        {
            self.add_between_filter(false, attribute, low, high)
        }
    };
    ($($(#[$doc:meta])* $name:ident => $operator:ident, $mandatory:literal;)+) => {
        $(
            $(#[$doc])*
            pub fn $name<V: ::serde::Serialize>(
                self,
                attribute: &str,
                value: V,
            ) -> Result<Self, $crate::Error> {
                self.add_filter($crate::Operator::$operator, $mandatory, attribute, value)
            }
        )+
    };
}

mod builder;
mod operator;
mod tree;

pub use builder::{
    Condition, ExpressionBuilder, FilterClause, RenderedExpression, placeholder_token,
};
pub use operator::Operator;
pub use tree::FilterExpr;
