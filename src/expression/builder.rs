use aws_sdk_dynamodb::types::{AttributeValue, Condition as KeyCondition};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::{FilterExpr, Operator};
use crate::error::Error;
use crate::value::Value;

/// Prefix of key condition placeholders, keeping them apart from filter ones
const KEY_PREFIX: &str = "k_";

/// Derive the placeholder token for an attribute name
///
/// Placeholders may only contain ASCII letters, digits and underscores, so
/// every other character is replaced with `_`. Distinct attributes can share a
/// token; [`ExpressionBuilder`] then appends `_1`, `_2` and so on.
///
/// ```
/// use dynamo_builder::expression::placeholder_token;
///
/// assert_eq!(placeholder_token("LastName")?, "LastName");
/// assert_eq!(placeholder_token("created-at")?, "created_at");
/// # Ok::<(), dynamo_builder::Error>(())
/// ```
pub fn placeholder_token(attribute: &str) -> Result<String, Error> {
    if attribute.is_empty() {
        return Err(Error::Validation(
            "attribute name must not be empty".to_string(),
        ));
    }

    Ok(attribute
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect())
}

/// A comparison bound to an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Real attribute name
    pub attribute: String,
    /// Comparison operator
    pub operator: Operator,
    /// Bound values: one, or two for a ranged `BETWEEN`
    pub values: Vec<Value>,
}

impl Condition {
    /// Single-value condition
    pub fn new(attribute: impl Into<String>, operator: Operator, value: Value) -> Self {
        Self {
            attribute: attribute.into(),
            operator,
            values: vec![value],
        }
    }

    /// Two-bound `BETWEEN` condition
    pub fn between(attribute: impl Into<String>, low: Value, high: Value) -> Self {
        Self {
            attribute: attribute.into(),
            operator: Operator::Between,
            values: vec![low, high],
        }
    }

    fn is_ranged(&self) -> bool {
        self.operator == Operator::Between && self.values.len() == 2
    }

    /// Value placeholders this condition binds for `token`
    pub fn value_placeholders(&self, token: &str) -> Vec<String> {
        if self.is_ranged() {
            vec![format!(":{token}_low"), format!(":{token}_high")]
        } else {
            vec![format!(":{token}")]
        }
    }

    /// Render against `#token` and the placeholders of [`Self::value_placeholders`]
    pub fn render(&self, token: &str) -> String {
        if self.is_ranged() {
            format!("#{token} BETWEEN :{token}_low AND :{token}_high")
        } else {
            self.operator.render(token)
        }
    }

    fn bind(&self, token: &str, rendered: &mut RenderedExpression) {
        let _ = rendered
            .names
            .insert(format!("#{token}"), self.attribute.clone());
        for (placeholder, value) in self.value_placeholders(token).into_iter().zip(&self.values) {
            let _ = rendered.values.insert(placeholder, value.clone().into());
        }
    }
}

/// A filter condition tagged mandatory (joined with `AND`) or optional (`OR`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    /// The condition
    pub condition: Condition,
    /// Whether the clause joins the previous ones with `AND`
    pub mandatory: bool,
    /// Placeholder token allocated for the clause (`#token`, `:token`)
    pub token: String,
}

/// An expression string together with its placeholder mappings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedExpression {
    /// Expression string, empty when nothing was added
    pub expression: String,
    /// `#placeholder` to attribute name
    pub names: HashMap<String, String>,
    /// `:placeholder` to attribute value
    pub values: HashMap<String, AttributeValue>,
}

impl RenderedExpression {
    /// Whether there is no expression to send
    ///
    /// Callers must omit the expression parameter entirely in that case;
    /// DynamoDB rejects empty expression strings.
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }

    /// The expression, or `None` when empty
    pub fn expression(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.expression.clone())
    }

    /// Fold the placeholder mappings of `other` into this one
    ///
    /// Fails with [`Error::DuplicateAttribute`] when a placeholder is bound to
    /// two different attributes or values.
    pub fn merge_bindings(&mut self, other: RenderedExpression) -> Result<(), Error> {
        for (placeholder, name) in other.names {
            match self.names.get(&placeholder) {
                Some(existing) if *existing != name => {
                    return Err(Error::DuplicateAttribute(placeholder));
                }
                _ => {
                    let _ = self.names.insert(placeholder, name);
                }
            }
        }

        for (placeholder, value) in other.values {
            if self.values.contains_key(&placeholder) {
                return Err(Error::DuplicateAttribute(placeholder));
            }
            let _ = self.values.insert(placeholder, value);
        }

        Ok(())
    }
}

/// A key condition with its allocated placeholder token
#[derive(Debug, Clone, PartialEq, Eq)]
struct KeyBinding {
    condition: Condition,
    token: String,
    sort_key: bool,
}

/// Accumulates key conditions and filter clauses for one request
///
/// Every mutating call consumes the builder and hands it back on success, so a
/// failed call drops the half-built request. Placeholders for key conditions
/// and filters come from one registry, so the rendered mappings never clash.
#[derive(Debug, Clone, Default)]
pub struct ExpressionBuilder {
    key_conditions: Vec<KeyBinding>,
    clauses: Vec<FilterClause>,
    placeholders: HashSet<String>,
}

impl ExpressionBuilder {
    /// Empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the partition key equality condition
    ///
    /// Fails with [`Error::DuplicateKeyCondition`] if `attribute` already has
    /// one, with [`Error::Validation`] if another attribute is already the
    /// partition key, and with [`Error::UnsupportedType`] for boolean values,
    /// which can't be part of a key.
    pub fn add_key_condition<V: Serialize>(self, attribute: &str, value: V) -> Result<Self, Error> {
        let value = key_value(&value)?;
        self.push_key_condition(Condition::new(attribute, Operator::Eq, value), false)
    }

    /// Register a range condition on the sort key
    ///
    /// Accepts `EQ`, `LT`, `LE`, `GT`, `GE` and `BEGINS_WITH`; use
    /// [`Self::add_sort_key_between`] for a two-bound range. A query takes a
    /// single sort key condition.
    pub fn add_sort_key_condition<V: Serialize>(
        self,
        operator: Operator,
        attribute: &str,
        value: V,
    ) -> Result<Self, Error> {
        if !operator.is_sort_key_operator() {
            return Err(Error::InvalidOperator(operator.to_string()));
        }
        let value = key_value(&value)?;
        self.push_key_condition(Condition::new(attribute, operator, value), true)
    }

    /// Register a `BETWEEN low AND high` condition on the sort key
    pub fn add_sort_key_between<L: Serialize, H: Serialize>(
        self,
        attribute: &str,
        low: L,
        high: H,
    ) -> Result<Self, Error> {
        let condition = Condition::between(attribute, key_value(&low)?, key_value(&high)?);
        self.push_key_condition(condition, true)
    }

    fn push_key_condition(mut self, condition: Condition, sort_key: bool) -> Result<Self, Error> {
        let base = format!("{KEY_PREFIX}{}", placeholder_token(&condition.attribute)?);

        if self
            .key_conditions
            .iter()
            .any(|existing| existing.condition.attribute == condition.attribute)
        {
            return Err(Error::DuplicateKeyCondition(condition.attribute));
        }
        if self.key_conditions.iter().any(|existing| existing.sort_key == sort_key) {
            let role = if sort_key { "sort" } else { "partition" };
            return Err(Error::Validation(format!(
                "key condition on `{}`: a query takes a single {role} key condition",
                condition.attribute
            )));
        }

        let token = self.allocate(&base, &condition);
        self.key_conditions.push(KeyBinding {
            condition,
            token,
            sort_key,
        });
        Ok(self)
    }

    /// Register a filter clause
    ///
    /// `value` is coerced into a [`Value`]; anything other than a string,
    /// number or boolean fails with [`Error::UnsupportedType`]. Filtering the
    /// same attribute twice fails with [`Error::DuplicateAttribute`].
    pub fn add_filter<V: Serialize>(
        self,
        operator: Operator,
        mandatory: bool,
        attribute: &str,
        value: V,
    ) -> Result<Self, Error> {
        let value = Value::coerce(&value)?;
        self.push_clause(Condition::new(attribute, operator, value), mandatory)
    }

    /// Register a two-bound `attr BETWEEN low AND high` filter clause
    pub fn add_between_filter<L: Serialize, H: Serialize>(
        self,
        mandatory: bool,
        attribute: &str,
        low: L,
        high: H,
    ) -> Result<Self, Error> {
        let condition = Condition::between(attribute, Value::coerce(&low)?, Value::coerce(&high)?);
        self.push_clause(condition, mandatory)
    }

    /// Register an already-built condition as a filter clause
    pub fn push_clause(mut self, condition: Condition, mandatory: bool) -> Result<Self, Error> {
        let base = placeholder_token(&condition.attribute)?;

        if self
            .clauses
            .iter()
            .any(|clause| clause.condition.attribute == condition.attribute)
        {
            return Err(Error::DuplicateAttribute(condition.attribute));
        }

        let token = self.allocate(&base, &condition);
        self.clauses.push(FilterClause {
            condition,
            mandatory,
            token,
        });
        Ok(self)
    }

    /// Reserve the first free token derived from `base`: `base`, then `base_1`,
    /// `base_2` and so on
    fn allocate(&mut self, base: &str, condition: &Condition) -> String {
        let placeholders_for = |token: &str| {
            let mut all = condition.value_placeholders(token);
            all.push(format!("#{token}"));
            all
        };

        let mut token = base.to_string();
        let mut suffix = 0usize;
        while placeholders_for(&token)
            .iter()
            .any(|p| self.placeholders.contains(p))
        {
            suffix += 1;
            token = format!("{base}_{suffix}");
        }

        self.placeholders.extend(placeholders_for(&token));
        token
    }

    filter_shorthands!();

    /// Whether any key condition was registered
    pub fn has_key_conditions(&self) -> bool {
        !self.key_conditions.is_empty()
    }

    /// Whether the partition key condition was registered
    pub fn has_partition_key_condition(&self) -> bool {
        self.key_conditions.iter().any(|binding| !binding.sort_key)
    }

    /// Whether any filter clause was registered
    pub fn has_filters(&self) -> bool {
        !self.clauses.is_empty()
    }

    /// Registered filter clauses, in insertion order
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// Filter clauses folded into an expression tree
    pub fn filter_tree(&self) -> Option<FilterExpr> {
        FilterExpr::fold(self.clauses.iter().map(|clause| {
            (FilterExpr::Leaf(clause.condition.render(&clause.token)), clause.mandatory)
        }))
    }

    /// Render the filter expression and its placeholder mappings
    ///
    /// With no filters added this is an empty string and empty mappings.
    pub fn render(&self) -> RenderedExpression {
        let mut rendered = RenderedExpression {
            expression: self
                .filter_tree()
                .map(|tree| tree.to_string())
                .unwrap_or_default(),
            ..Default::default()
        };

        for clause in &self.clauses {
            clause.condition.bind(&clause.token, &mut rendered);
        }

        rendered
    }

    /// Render the key conditions as a `KeyConditionExpression`
    ///
    /// Placeholders carry a `k_` prefix: `#k_pk = :k_pk`.
    pub fn render_key_condition(&self) -> RenderedExpression {
        let mut rendered = RenderedExpression::default();
        let mut parts = Vec::with_capacity(self.key_conditions.len());

        for binding in &self.key_conditions {
            parts.push(binding.condition.render(&binding.token));
            binding.condition.bind(&binding.token, &mut rendered);
        }

        rendered.expression = parts.join(" AND ");
        rendered
    }

    /// The key conditions as an attribute-to-condition mapping
    ///
    /// `add_key_condition("pk", "User")` yields
    /// `{"pk": {EQ, [S("User")]}}`.
    pub fn key_conditions(&self) -> Result<HashMap<String, KeyCondition>, Error> {
        self.key_conditions
            .iter()
            .map(|binding| -> Result<(String, KeyCondition), Error> {
                let condition = &binding.condition;
                let sdk_condition = KeyCondition::builder()
                    .comparison_operator(condition.operator.into())
                    .set_attribute_value_list(Some(
                        condition.values.iter().cloned().map(Into::into).collect(),
                    ))
                    .build()?;
                Ok((condition.attribute.clone(), sdk_condition))
            })
            .collect()
    }
}

fn key_value<V: Serialize + ?Sized>(value: &V) -> Result<Value, Error> {
    let value = Value::coerce(value)?;
    if !value.is_key_type() {
        return Err(Error::UnsupportedType(format!(
            "{} values cannot be part of a key",
            value.type_name()
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::ComparisonOperator;

    #[test]
    fn test_empty_render() {
        let rendered = ExpressionBuilder::new().render();
        assert_eq!(rendered.expression, "");
        assert!(rendered.names.is_empty());
        assert!(rendered.values.is_empty());
        assert!(rendered.is_empty());
        assert_eq!(rendered.expression(), None);
    }

    #[test]
    fn test_single_filter() {
        let rendered = ExpressionBuilder::new()
            .must_equal("Name", "Pedro")
            .unwrap()
            .render();

        assert_eq!(rendered.expression, "#Name = :Name");
        assert_eq!(rendered.names["#Name"], "Name");
        assert_eq!(rendered.values[":Name"], AttributeValue::S("Pedro".into()));
    }

    #[test]
    fn test_mandatory_then_optional_joins_with_or() {
        let rendered = ExpressionBuilder::new()
            .must_equal("Name", "Pedro")
            .unwrap()
            .could_equal("Age", 26)
            .unwrap()
            .render();

        assert_eq!(rendered.expression, "#Name = :Name OR #Age = :Age");
        assert_eq!(rendered.values[":Age"], AttributeValue::N("26".into()));
    }

    #[test]
    fn test_two_mandatory_join_with_and() {
        let rendered = ExpressionBuilder::new()
            .must_equal("Name", "Pedro")
            .unwrap()
            .must_not_equal("LastName", "Pacheco")
            .unwrap()
            .render();

        assert_eq!(rendered.expression, "#Name = :Name AND #LastName <> :LastName");
        assert_eq!(rendered.names.len(), 2);
        assert_eq!(rendered.values.len(), 2);
    }

    #[test]
    fn test_first_clause_flag_has_no_effect() {
        let optional_first = ExpressionBuilder::new()
            .could_equal("Name", "Pedro")
            .unwrap()
            .must_equal("LastName", "Pacheco")
            .unwrap()
            .render();

        assert_eq!(
            optional_first.expression,
            "#Name = :Name AND #LastName = :LastName"
        );
    }

    #[test]
    fn test_mixed_clauses_are_grouped() {
        let rendered = ExpressionBuilder::new()
            .could_equal("A", 1)
            .unwrap()
            .could_equal("B", 2)
            .unwrap()
            .must_greater("C", 3)
            .unwrap()
            .render();

        assert_eq!(rendered.expression, "(#A = :A OR #B = :B) AND #C > :C");
    }

    #[test]
    fn test_duplicate_filter_attribute_fails() {
        let err = ExpressionBuilder::new()
            .must_equal("Name", "Pedro")
            .unwrap()
            .could_equal("Name", "Juan")
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateAttribute(ref a) if a == "Name"));
    }

    #[test]
    fn test_sanitized_token_clash_gets_suffix() {
        let rendered = ExpressionBuilder::new()
            .must_equal("created-at", 1)
            .unwrap()
            .must_equal("created_at", 2)
            .unwrap()
            .render();

        assert_eq!(
            rendered.expression,
            "#created_at = :created_at AND #created_at_1 = :created_at_1"
        );
        assert_eq!(rendered.names["#created_at"], "created-at");
        assert_eq!(rendered.names["#created_at_1"], "created_at");
        assert_eq!(rendered.values[":created_at_1"], AttributeValue::N("2".into()));
    }

    #[test]
    fn test_non_ascii_names_stay_distinct() {
        let rendered = ExpressionBuilder::new()
            .must_equal("名前", "x")
            .unwrap()
            .could_equal("名字", "y")
            .unwrap()
            .render();

        assert_eq!(rendered.expression, "#__ = :__ OR #___1 = :___1");
        assert_eq!(rendered.names["#__"], "名前");
        assert_eq!(rendered.names["#___1"], "名字");
        assert_eq!(rendered.values[":___1"], AttributeValue::S("y".into()));
    }

    #[test]
    fn test_between_placeholder_clash_gets_suffix() {
        let rendered = ExpressionBuilder::new()
            .must_equal("age_low", 1)
            .unwrap()
            .must_between_bounds("age", 10, 20)
            .unwrap()
            .render();

        assert_eq!(
            rendered.expression,
            "#age_low = :age_low AND #age_1 BETWEEN :age_1_low AND :age_1_high"
        );
        assert_eq!(rendered.values.len(), 3);
    }

    #[test]
    fn test_filter_named_like_key_placeholder() {
        let builder = ExpressionBuilder::new()
            .add_key_condition("pk", "User")
            .unwrap()
            .must_equal("k_pk", "x")
            .unwrap();

        let mut merged = builder.render_key_condition();
        let filter = builder.render();
        assert_eq!(filter.expression, "#k_pk_1 = :k_pk_1");
        merged.merge_bindings(filter).unwrap();
        assert_eq!(merged.names["#k_pk"], "pk");
        assert_eq!(merged.names["#k_pk_1"], "k_pk");
    }

    #[test]
    fn test_unsupported_filter_value() {
        let err = ExpressionBuilder::new()
            .must_contain("Tags", vec!["a", "b"])
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
    }

    #[test]
    fn test_empty_attribute_name() {
        let err = ExpressionBuilder::new().must_equal("", "x").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_single_bound_between_renders_as_equality() {
        let rendered = ExpressionBuilder::new()
            .must_between("Age", 30)
            .unwrap()
            .render();
        assert_eq!(rendered.expression, "#Age = :Age");
    }

    #[test]
    fn test_two_bound_between() {
        let rendered = ExpressionBuilder::new()
            .must_equal("Name", "Pedro")
            .unwrap()
            .could_between_bounds("Age", 18, 30)
            .unwrap()
            .render();

        assert_eq!(
            rendered.expression,
            "#Name = :Name OR #Age BETWEEN :Age_low AND :Age_high"
        );
        assert_eq!(rendered.values[":Age_low"], AttributeValue::N("18".into()));
        assert_eq!(rendered.values[":Age_high"], AttributeValue::N("30".into()));
        assert_eq!(rendered.names["#Age"], "Age");
    }

    #[test]
    fn test_function_filters() {
        let rendered = ExpressionBuilder::new()
            .must_begin_with("Name", "Pe")
            .unwrap()
            .must_not_contain("Tags", "archived")
            .unwrap()
            .render();

        assert_eq!(
            rendered.expression,
            "begins_with(#Name, :Name) AND NOT contains(#Tags, :Tags)"
        );
    }

    #[test]
    fn test_add_filter_with_parsed_operator() {
        let operator: Operator = "GE".parse().unwrap();
        let rendered = ExpressionBuilder::new()
            .add_filter(operator, true, "Score", 9.5)
            .unwrap()
            .render();
        assert_eq!(rendered.expression, "#Score >= :Score");
        assert_eq!(rendered.values[":Score"], AttributeValue::N("9.5".into()));
    }

    #[test]
    fn test_key_condition_mapping() {
        let builder = ExpressionBuilder::new()
            .add_key_condition("pk", "User")
            .unwrap();
        let conditions = builder.key_conditions().unwrap();

        assert_eq!(conditions.len(), 1);
        let condition = &conditions["pk"];
        assert_eq!(condition.comparison_operator(), &ComparisonOperator::Eq);
        assert_eq!(
            condition.attribute_value_list(),
            &[AttributeValue::S("User".into())]
        );
    }

    #[test]
    fn test_duplicate_key_condition_fails() {
        let err = ExpressionBuilder::new()
            .add_key_condition("pk", "User")
            .unwrap()
            .add_key_condition("pk", "Admin")
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateKeyCondition(ref a) if a == "pk"));
    }

    #[test]
    fn test_bool_key_condition_fails() {
        let err = ExpressionBuilder::new()
            .add_key_condition("pk", true)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
    }

    #[test]
    fn test_at_most_two_key_conditions() {
        let err = ExpressionBuilder::new()
            .add_key_condition("pk", "User")
            .unwrap()
            .add_sort_key_condition(Operator::BeginsWith, "sk", "2024")
            .unwrap()
            .add_key_condition("other", "x")
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_single_sort_key_condition() {
        let err = ExpressionBuilder::new()
            .add_sort_key_condition(Operator::Lt, "sk", "5")
            .unwrap()
            .add_sort_key_condition(Operator::Gt, "other", "1")
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref msg) if msg.contains("sort")));
    }

    #[test]
    fn test_single_partition_key_condition() {
        let err = ExpressionBuilder::new()
            .add_key_condition("pk", "User")
            .unwrap()
            .add_key_condition("tenant", "acme")
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref msg) if msg.contains("partition")));
    }

    #[test]
    fn test_partition_key_condition_presence() {
        let sort_only = ExpressionBuilder::new()
            .add_sort_key_condition(Operator::Lt, "sk", "5")
            .unwrap();
        assert!(sort_only.has_key_conditions());
        assert!(!sort_only.has_partition_key_condition());

        let full = sort_only.add_key_condition("pk", "User").unwrap();
        assert!(full.has_partition_key_condition());
    }

    #[test]
    fn test_render_key_condition() {
        let rendered = ExpressionBuilder::new()
            .add_key_condition("pk", "User")
            .unwrap()
            .add_sort_key_condition(Operator::BeginsWith, "sk", "order#")
            .unwrap()
            .render_key_condition();

        assert_eq!(
            rendered.expression,
            "#k_pk = :k_pk AND begins_with(#k_sk, :k_sk)"
        );
        assert_eq!(rendered.names["#k_pk"], "pk");
        assert_eq!(rendered.values[":k_sk"], AttributeValue::S("order#".into()));
    }

    #[test]
    fn test_sort_key_between() {
        let builder = ExpressionBuilder::new()
            .add_key_condition("pk", "User")
            .unwrap()
            .add_sort_key_between("sk", "a", "m")
            .unwrap();

        assert_eq!(
            builder.render_key_condition().expression,
            "#k_pk = :k_pk AND #k_sk BETWEEN :k_sk_low AND :k_sk_high"
        );
        let conditions = builder.key_conditions().unwrap();
        assert_eq!(
            conditions["sk"].comparison_operator(),
            &ComparisonOperator::Between
        );
        assert_eq!(conditions["sk"].attribute_value_list().len(), 2);
    }

    #[test]
    fn test_invalid_sort_key_operator() {
        let err = ExpressionBuilder::new()
            .add_sort_key_condition(Operator::Contains, "sk", "x")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOperator(ref op) if op == "CONTAINS"));
    }

    #[test]
    fn test_merge_bindings_detects_clash() {
        let key = ExpressionBuilder::new()
            .add_key_condition("pk", "User")
            .unwrap()
            .render_key_condition();
        let filter = ExpressionBuilder::new()
            .must_equal("k_pk", "x")
            .unwrap()
            .render();

        let mut merged = key.clone();
        assert!(matches!(
            merged.merge_bindings(filter),
            Err(Error::DuplicateAttribute(_))
        ));

        let filter = ExpressionBuilder::new()
            .must_equal("Name", "Pedro")
            .unwrap()
            .render();
        let mut merged = key;
        merged.merge_bindings(filter).unwrap();
        assert_eq!(merged.names.len(), 2);
        assert_eq!(merged.values.len(), 2);
        assert_eq!(merged.expression, "#k_pk = :k_pk");
    }
}
