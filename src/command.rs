use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemOutput;
use aws_sdk_dynamodb::operation::delete_item::builders::DeleteItemFluentBuilder;
use aws_sdk_dynamodb::operation::put_item::PutItemOutput;
use aws_sdk_dynamodb::operation::put_item::builders::PutItemFluentBuilder;
use aws_sdk_dynamodb::operation::query::QueryOutput;
use aws_sdk_dynamodb::operation::query::builders::QueryFluentBuilder;
use aws_sdk_dynamodb::operation::scan::ScanOutput;
use aws_sdk_dynamodb::operation::scan::builders::ScanFluentBuilder;
use aws_sdk_dynamodb::types::{AttributeValue, Select};
use aws_smithy_types_convert::stream::PaginationStreamExt;
use futures_util::TryStreamExt;
use serde::{Serialize, de::DeserializeOwned};
use serde_dynamo::{from_item, from_items, to_item};
use std::collections::HashMap;
use tokio_stream::Stream;
use tracing::debug;

use crate::error::Error;
use crate::expression::{ExpressionBuilder, Operator};
use crate::value::Value;
use crate::{require_name, resolve_client};

/// Builder for a single item-access request against one table
///
/// Collects key conditions, filters and item attributes through chained
/// calls, then is consumed by exactly one execute call. Nothing is assembled
/// into an SDK request until then.
///
/// # Example
///
/// ```rust,no_run
/// use dynamo_builder::{CommandBuilder, Error};
///
/// async fn example() -> Result<(), Error> {
///     let output = CommandBuilder::new("TestTable")?
///         .must_equal("Name", "Pedro")?
///         .could_equal("Age", 26)?
///         .execute_scan()
///         .await?;
///
///     println!("scanned {} items", output.scanned_count());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    table_name: String,
    index_name: Option<String>,
    client: Option<Client>,
    expression: ExpressionBuilder,
    item: HashMap<String, AttributeValue>,
    limit: Option<u16>,
    scan_index_forward: Option<bool>,
    consistent_read: Option<bool>,
}

impl CommandBuilder {
    /// Start a request against `table_name`
    ///
    /// Fails with [`Error::Validation`] if the name is empty.
    pub fn new(table_name: impl Into<String>) -> Result<Self, Error> {
        let table_name = table_name.into();
        require_name("table name", &table_name)?;

        Ok(Self {
            table_name,
            index_name: None,
            client: None,
            expression: ExpressionBuilder::new(),
            item: HashMap::new(),
            limit: None,
            scan_index_forward: None,
            consistent_read: None,
        })
    }

    /// Send with this client instead of the global one
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Query or scan a secondary index instead of the base table
    pub fn index_name(mut self, index_name: impl Into<String>) -> Result<Self, Error> {
        let index_name = index_name.into();
        require_name("index name", &index_name)?;
        self.index_name = Some(index_name);
        Ok(self)
    }

    /// Maximum number of items evaluated per page
    pub fn limit(mut self, limit: u16) -> Result<Self, Error> {
        if limit == 0 {
            return Err(Error::Validation("limit must be at least 1".to_string()));
        }
        self.limit = Some(limit);
        Ok(self)
    }

    /// Sort key order of query results, ascending when `true`
    pub fn scan_index_forward(mut self, forward: bool) -> Self {
        self.scan_index_forward = Some(forward);
        self
    }

    /// Request strongly consistent reads
    pub fn consistent_read(mut self, consistent: bool) -> Self {
        self.consistent_read = Some(consistent);
        self
    }

    /// Table the request targets
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Conditions and filters collected so far
    pub fn expression(&self) -> &ExpressionBuilder {
        &self.expression
    }

    /// Item attributes collected so far
    pub fn attributes(&self) -> &HashMap<String, AttributeValue> {
        &self.item
    }

    fn map_expression<F>(mut self, f: F) -> Result<Self, Error>
    where
        F: FnOnce(ExpressionBuilder) -> Result<ExpressionBuilder, Error>,
    {
        self.expression = f(self.expression)?;
        Ok(self)
    }

    /// Register the partition key condition, see [`ExpressionBuilder::add_key_condition`]
    pub fn add_key_condition<V: Serialize>(self, attribute: &str, value: V) -> Result<Self, Error> {
        self.map_expression(|e| e.add_key_condition(attribute, value))
    }

    /// Register a sort key range condition, see [`ExpressionBuilder::add_sort_key_condition`]
    pub fn add_sort_key_condition<V: Serialize>(
        self,
        operator: Operator,
        attribute: &str,
        value: V,
    ) -> Result<Self, Error> {
        self.map_expression(|e| e.add_sort_key_condition(operator, attribute, value))
    }

    /// Register a two-bound sort key condition
    pub fn add_sort_key_between<L: Serialize, H: Serialize>(
        self,
        attribute: &str,
        low: L,
        high: H,
    ) -> Result<Self, Error> {
        self.map_expression(|e| e.add_sort_key_between(attribute, low, high))
    }

    /// Register a filter clause, see [`ExpressionBuilder::add_filter`]
    pub fn add_filter<V: Serialize>(
        self,
        operator: Operator,
        mandatory: bool,
        attribute: &str,
        value: V,
    ) -> Result<Self, Error> {
        self.map_expression(|e| e.add_filter(operator, mandatory, attribute, value))
    }

    /// Register a two-bound `BETWEEN` filter clause
    pub fn add_between_filter<L: Serialize, H: Serialize>(
        self,
        mandatory: bool,
        attribute: &str,
        low: L,
        high: H,
    ) -> Result<Self, Error> {
        self.map_expression(|e| e.add_between_filter(mandatory, attribute, low, high))
    }

    filter_shorthands!();

    /// Add an item attribute, written by `put_item` or used as the key by `delete_item`
    ///
    /// Fails with [`Error::DuplicateAttribute`] if `name` was already added.
    pub fn add_attribute<V: Serialize>(mut self, name: &str, value: V) -> Result<Self, Error> {
        require_name("attribute name", name)?;
        let value = Value::coerce(&value)?;
        self.insert_attribute(name.to_string(), value.into())?;
        Ok(self)
    }

    /// Add every attribute of a serializable record
    ///
    /// Unlike [`Self::add_attribute`] this accepts nested lists and maps, since
    /// the record is stored as-is.
    pub fn add_item<T: Serialize>(mut self, item: &T) -> Result<Self, Error> {
        let attributes: HashMap<String, AttributeValue> = to_item(item)?;
        for (name, value) in attributes {
            self.insert_attribute(name, value)?;
        }
        Ok(self)
    }

    fn insert_attribute(&mut self, name: String, value: AttributeValue) -> Result<(), Error> {
        if self.item.contains_key(&name) {
            return Err(Error::DuplicateAttribute(name));
        }
        let _ = self.item.insert(name, value);
        Ok(())
    }

    fn reject_key_conditions(&self, operation: &str) -> Result<(), Error> {
        if self.expression.has_key_conditions() {
            return Err(Error::Validation(format!(
                "key conditions only apply to queries, not {operation}"
            )));
        }
        Ok(())
    }

    fn require_item(&self, operation: &str) -> Result<(), Error> {
        if self.item.is_empty() {
            return Err(Error::Validation(format!(
                "{operation} needs at least one attribute"
            )));
        }
        Ok(())
    }

    /// Assemble the Query request without sending it
    ///
    /// Fails with [`Error::Validation`] when no partition key condition was
    /// registered.
    pub fn build_query(self, client: &Client) -> Result<QueryFluentBuilder, Error> {
        if !self.expression.has_partition_key_condition() {
            return Err(Error::Validation(
                "a query needs a partition key condition, add it with add_key_condition"
                    .to_string(),
            ));
        }
        if !self.item.is_empty() {
            return Err(Error::Validation(
                "item attributes only apply to put and delete".to_string(),
            ));
        }

        let mut bindings = self.expression.render_key_condition();
        let key_condition = std::mem::take(&mut bindings.expression);
        let filter = self.expression.render();
        let filter_expression = filter.expression();
        bindings.merge_bindings(filter)?;

        // Secondary indexes only hold the attributes projected onto them
        let select = if self.index_name.is_some() {
            Select::AllProjectedAttributes
        } else {
            Select::AllAttributes
        };

        debug!(
            table = %self.table_name,
            index = ?self.index_name,
            key_condition = %key_condition,
            filter = ?filter_expression,
            "building query"
        );

        Ok(client
            .query()
            .table_name(self.table_name)
            .set_index_name(self.index_name)
            .select(select)
            .key_condition_expression(key_condition)
            .set_filter_expression(filter_expression)
            .set_expression_attribute_names(non_empty(bindings.names))
            .set_expression_attribute_values(non_empty(bindings.values))
            .set_limit(self.limit.map(i32::from))
            .set_scan_index_forward(self.scan_index_forward)
            .set_consistent_read(self.consistent_read))
    }

    /// Assemble the Scan request without sending it
    pub fn build_scan(self, client: &Client) -> Result<ScanFluentBuilder, Error> {
        self.reject_key_conditions("scans")?;
        if !self.item.is_empty() {
            return Err(Error::Validation(
                "item attributes only apply to put and delete".to_string(),
            ));
        }

        let filter = self.expression.render();

        debug!(
            table = %self.table_name,
            index = ?self.index_name,
            filter = %filter.expression,
            "building scan"
        );

        Ok(client
            .scan()
            .table_name(self.table_name)
            .set_index_name(self.index_name)
            .set_filter_expression(filter.expression())
            .set_expression_attribute_names(non_empty(filter.names))
            .set_expression_attribute_values(non_empty(filter.values))
            .set_limit(self.limit.map(i32::from))
            .set_consistent_read(self.consistent_read))
    }

    /// Assemble the PutItem request without sending it
    ///
    /// Filters become the request's condition expression.
    pub fn build_put_item(self, client: &Client) -> Result<PutItemFluentBuilder, Error> {
        self.reject_key_conditions("put_item")?;
        self.require_item("put_item")?;

        let condition = self.expression.render();

        debug!(
            table = %self.table_name,
            attributes = self.item.len(),
            condition = %condition.expression,
            "building put_item"
        );

        Ok(client
            .put_item()
            .table_name(self.table_name)
            .set_item(Some(self.item))
            .set_condition_expression(condition.expression())
            .set_expression_attribute_names(non_empty(condition.names))
            .set_expression_attribute_values(non_empty(condition.values)))
    }

    /// Assemble the DeleteItem request without sending it
    ///
    /// The added attributes form the key; filters become the condition expression.
    pub fn build_delete_item(self, client: &Client) -> Result<DeleteItemFluentBuilder, Error> {
        self.reject_key_conditions("delete_item")?;
        self.require_item("delete_item")?;

        let condition = self.expression.render();

        debug!(
            table = %self.table_name,
            key_attributes = self.item.len(),
            condition = %condition.expression,
            "building delete_item"
        );

        Ok(client
            .delete_item()
            .table_name(self.table_name)
            .set_key(Some(self.item))
            .set_condition_expression(condition.expression())
            .set_expression_attribute_names(non_empty(condition.names))
            .set_expression_attribute_values(non_empty(condition.values)))
    }

    /// Run the query and return the raw SDK output (one page)
    pub async fn execute_query(mut self) -> Result<QueryOutput, Error> {
        let client = resolve_client(self.client.take()).await;
        Ok(self.build_query(&client)?.send().await?)
    }

    /// Run the query and decode the items of the first page into `T`
    pub async fn execute_query_as<T: DeserializeOwned>(self) -> Result<Vec<T>, Error> {
        let output = self.execute_query().await?;
        Ok(from_items(output.items.unwrap_or_default())?)
    }

    /// Run the scan and return the raw SDK output (one page)
    pub async fn execute_scan(mut self) -> Result<ScanOutput, Error> {
        let client = resolve_client(self.client.take()).await;
        Ok(self.build_scan(&client)?.send().await?)
    }

    /// Run the scan and decode the items of the first page into `T`
    pub async fn execute_scan_as<T: DeserializeOwned>(self) -> Result<Vec<T>, Error> {
        let output = self.execute_scan().await?;
        Ok(from_items(output.items.unwrap_or_default())?)
    }

    /// Stream every item matching the query, following pagination
    pub async fn query_stream<T: DeserializeOwned>(
        mut self,
    ) -> Result<impl Stream<Item = Result<T, Error>>, Error> {
        let client = resolve_client(self.client.take()).await;

        Ok(self
            .build_query(&client)?
            .into_paginator()
            .items()
            .send()
            .into_stream_03x()
            .map_err(Into::into)
            .and_then(|item| async move { from_item(item).map_err(Into::into) }))
    }

    /// Stream every item matching the scan, following pagination
    pub async fn scan_stream<T: DeserializeOwned>(
        mut self,
    ) -> Result<impl Stream<Item = Result<T, Error>>, Error> {
        let client = resolve_client(self.client.take()).await;

        Ok(self
            .build_scan(&client)?
            .into_paginator()
            .items()
            .send()
            .into_stream_03x()
            .map_err(Into::into)
            .and_then(|item| async move { from_item(item).map_err(Into::into) }))
    }

    /// Write the collected attributes as an item, replacing any existing one
    pub async fn put_item(mut self) -> Result<PutItemOutput, Error> {
        let client = resolve_client(self.client.take()).await;
        Ok(self.build_put_item(&client)?.send().await?)
    }

    /// Delete the item whose key is the collected attributes
    pub async fn delete_item(mut self) -> Result<DeleteItemOutput, Error> {
        let client = resolve_client(self.client.take()).await;
        Ok(self.build_delete_item(&client)?.send().await?)
    }
}

fn non_empty<V>(map: HashMap<String, V>) -> Option<HashMap<String, V>> {
    (!map.is_empty()).then_some(map)
}
