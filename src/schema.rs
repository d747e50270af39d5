use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::operation::create_table::builders::CreateTableFluentBuilder;
use aws_sdk_dynamodb::operation::delete_table::builders::DeleteTableFluentBuilder;
use aws_sdk_dynamodb::operation::update_table::builders::UpdateTableFluentBuilder;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, CreateGlobalSecondaryIndexAction, GlobalSecondaryIndex,
    GlobalSecondaryIndexUpdate, KeySchemaElement, KeyType, Projection, ProjectionType,
    ProvisionedThroughput, ScalarAttributeType, TableDescription,
};
use tracing::{debug, warn};

use crate::error::Error;
use crate::{require_name, resolve_client};

/// Default read and write capacity units
const DEFAULT_CAPACITY_UNITS: i64 = 10;

#[derive(Debug, Clone)]
struct SecondaryIndex {
    index_name: String,
    attribute_name: String,
    projection_type: ProjectionType,
}

/// Builder for table management requests
///
/// # Example
///
/// ```rust,no_run
/// use dynamo_builder::{Error, KeyType, ProjectionType, ScalarAttributeType, TableBuilder};
///
/// async fn example() -> Result<(), Error> {
///     TableBuilder::new("TestTable2")?
///         .add_schema("pk", KeyType::Hash)?
///         .add_schema("sk", KeyType::Range)?
///         .add_definition("pk", ScalarAttributeType::S)?
///         .add_definition("sk", ScalarAttributeType::S)?
///         .add_definition("Name", ScalarAttributeType::S)?
///         .set_provisioned_throughput(1, 1)?
///         .add_secondary_index("TestIndex", "Name", KeyType::Range, ProjectionType::All)?
///         .create_table()
///         .await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TableBuilder {
    table_name: String,
    client: Option<Client>,
    schema: Vec<(String, KeyType)>,
    definitions: Vec<(String, ScalarAttributeType)>,
    secondary_indexes: Vec<SecondaryIndex>,
    read_capacity_units: i64,
    write_capacity_units: i64,
}

impl TableBuilder {
    /// Start a request for `table_name`
    pub fn new(table_name: impl Into<String>) -> Result<Self, Error> {
        let table_name = table_name.into();
        require_name("table name", &table_name)?;

        Ok(Self {
            table_name,
            client: None,
            schema: Vec::new(),
            definitions: Vec::new(),
            secondary_indexes: Vec::new(),
            read_capacity_units: DEFAULT_CAPACITY_UNITS,
            write_capacity_units: DEFAULT_CAPACITY_UNITS,
        })
    }

    /// Send with this client instead of the global one
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Add a key schema element
    ///
    /// `key_type` accepts [`KeyType`] or its wire name (`"HASH"`, `"RANGE"`).
    pub fn add_schema(
        mut self,
        attribute_name: &str,
        key_type: impl Into<KeyType>,
    ) -> Result<Self, Error> {
        require_name("key attribute name", attribute_name)?;
        let key_type = key_type.into();

        if !matches!(key_type, KeyType::Hash | KeyType::Range) {
            return Err(Error::Validation(format!(
                "unknown key type `{}`",
                key_type.as_str()
            )));
        }
        if self.schema.iter().any(|(name, _)| name == attribute_name) {
            return Err(Error::DuplicateAttribute(attribute_name.to_string()));
        }
        if self.schema.iter().any(|(_, kind)| *kind == key_type) {
            return Err(Error::Validation(format!(
                "the key schema already has a {} element",
                key_type.as_str()
            )));
        }

        self.schema.push((attribute_name.to_string(), key_type));
        Ok(self)
    }

    /// Add an attribute definition
    ///
    /// Every key attribute, of the table or of an index, needs one.
    pub fn add_definition(
        mut self,
        attribute_name: &str,
        attribute_type: impl Into<ScalarAttributeType>,
    ) -> Result<Self, Error> {
        require_name("attribute name", attribute_name)?;
        let attribute_type = attribute_type.into();

        if !matches!(
            attribute_type,
            ScalarAttributeType::S | ScalarAttributeType::N | ScalarAttributeType::B
        ) {
            return Err(Error::Validation(format!(
                "unknown attribute type `{}`",
                attribute_type.as_str()
            )));
        }
        if self.definitions.iter().any(|(name, _)| name == attribute_name) {
            return Err(Error::DuplicateAttribute(attribute_name.to_string()));
        }

        self.definitions
            .push((attribute_name.to_string(), attribute_type));
        Ok(self)
    }

    /// Add a global secondary index keyed on the table's HASH key and `attribute_name`
    ///
    /// The table's HASH element must be registered first. The index shares the
    /// table's provisioned throughput as it stands when the request is sent.
    pub fn add_secondary_index(
        mut self,
        index_name: &str,
        attribute_name: &str,
        key_type: impl Into<KeyType>,
        projection_type: impl Into<ProjectionType>,
    ) -> Result<Self, Error> {
        require_name("index name", index_name)?;
        require_name("index attribute name", attribute_name)?;

        if self.hash_key().is_none() {
            return Err(Error::Validation(format!(
                "index `{index_name}` needs the table's HASH key, add it with add_schema first"
            )));
        }
        let key_type = key_type.into();
        if key_type != KeyType::Range {
            return Err(Error::Validation(format!(
                "index `{index_name}` attribute must be a RANGE key, got `{}`",
                key_type.as_str()
            )));
        }
        let projection_type = projection_type.into();
        if !matches!(projection_type, ProjectionType::All | ProjectionType::KeysOnly) {
            return Err(Error::Validation(format!(
                "unsupported projection type `{}`",
                projection_type.as_str()
            )));
        }
        if self
            .secondary_indexes
            .iter()
            .any(|index| index.index_name == index_name)
        {
            return Err(Error::DuplicateAttribute(index_name.to_string()));
        }

        self.secondary_indexes.push(SecondaryIndex {
            index_name: index_name.to_string(),
            attribute_name: attribute_name.to_string(),
            projection_type,
        });
        Ok(self)
    }

    /// Set the read and write capacity units of the table and its indexes
    pub fn set_provisioned_throughput(
        mut self,
        read_capacity_units: i64,
        write_capacity_units: i64,
    ) -> Result<Self, Error> {
        if read_capacity_units < 1 || write_capacity_units < 1 {
            return Err(Error::Validation(
                "capacity units must be at least 1".to_string(),
            ));
        }
        self.read_capacity_units = read_capacity_units;
        self.write_capacity_units = write_capacity_units;
        Ok(self)
    }

    /// Table the request targets
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn hash_key(&self) -> Option<&str> {
        self.schema
            .iter()
            .find(|(_, kind)| *kind == KeyType::Hash)
            .map(|(name, _)| name.as_str())
    }

    fn throughput(&self) -> Result<ProvisionedThroughput, Error> {
        Ok(ProvisionedThroughput::builder()
            .read_capacity_units(self.read_capacity_units)
            .write_capacity_units(self.write_capacity_units)
            .build()?)
    }

    fn definition(&self, attribute_name: &str) -> Result<AttributeDefinition, Error> {
        let (_, attribute_type) = self
            .definitions
            .iter()
            .find(|(name, _)| name == attribute_name)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "key attribute `{attribute_name}` has no attribute definition"
                ))
            })?;

        Ok(AttributeDefinition::builder()
            .attribute_name(attribute_name)
            .attribute_type(attribute_type.clone())
            .build()?)
    }

    fn index_key_schema(&self, index: &SecondaryIndex) -> Result<Vec<KeySchemaElement>, Error> {
        let hash_key = self.hash_key().ok_or_else(|| {
            Error::Validation(format!("index `{}` needs a HASH key", index.index_name))
        })?;

        Ok(vec![
            key_element(hash_key, KeyType::Hash)?,
            key_element(&index.attribute_name, KeyType::Range)?,
        ])
    }

    /// Key attributes in first-use order, table keys before index keys
    fn key_attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let all = self
            .schema
            .iter()
            .map(|(name, _)| name.as_str())
            .chain(self.secondary_indexes.iter().map(|i| i.attribute_name.as_str()));
        for name in all {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Assemble the CreateTable request without sending it
    ///
    /// Fails with [`Error::Validation`] when the key schema has no HASH
    /// element, a key attribute lacks a definition, or a definition is not used
    /// by any key.
    pub fn build_create_table(self, client: &Client) -> Result<CreateTableFluentBuilder, Error> {
        if self.hash_key().is_none() {
            return Err(Error::Validation(format!(
                "table `{}` needs a HASH key",
                self.table_name
            )));
        }

        let key_attributes = self.key_attributes();
        if let Some((unused, _)) = self
            .definitions
            .iter()
            .find(|(name, _)| !key_attributes.contains(&name.as_str()))
        {
            return Err(Error::Validation(format!(
                "attribute definition `{unused}` is not used by any key"
            )));
        }

        let mut builder = client
            .create_table()
            .table_name(&self.table_name)
            .provisioned_throughput(self.throughput()?);

        for (name, key_type) in &self.schema {
            builder = builder.key_schema(key_element(name, key_type.clone())?);
        }
        for name in &key_attributes {
            builder = builder.attribute_definitions(self.definition(name)?);
        }
        for index in &self.secondary_indexes {
            let gsi = GlobalSecondaryIndex::builder()
                .index_name(&index.index_name)
                .set_key_schema(Some(self.index_key_schema(index)?))
                .projection(projection(index))
                .provisioned_throughput(self.throughput()?)
                .build()?;
            builder = builder.global_secondary_indexes(gsi);
        }

        debug!(
            table = %self.table_name,
            keys = self.schema.len(),
            indexes = self.secondary_indexes.len(),
            "building create_table"
        );

        Ok(builder)
    }

    /// Assemble the UpdateTable request without sending it
    ///
    /// Sends the provisioned throughput, and creates every registered
    /// secondary index on the existing table.
    pub fn build_update_table(self, client: &Client) -> Result<UpdateTableFluentBuilder, Error> {
        let mut builder = client
            .update_table()
            .table_name(&self.table_name)
            .provisioned_throughput(self.throughput()?);

        let mut defined: Vec<&str> = Vec::new();
        for index in &self.secondary_indexes {
            let action = CreateGlobalSecondaryIndexAction::builder()
                .index_name(&index.index_name)
                .set_key_schema(Some(self.index_key_schema(index)?))
                .projection(projection(index))
                .provisioned_throughput(self.throughput()?)
                .build()?;
            builder = builder.global_secondary_index_updates(
                GlobalSecondaryIndexUpdate::builder().create(action).build(),
            );

            for name in [self.hash_key(), Some(index.attribute_name.as_str())]
                .into_iter()
                .flatten()
            {
                if !defined.contains(&name) {
                    builder = builder.attribute_definitions(self.definition(name)?);
                    defined.push(name);
                }
            }
        }

        debug!(
            table = %self.table_name,
            read_capacity_units = self.read_capacity_units,
            write_capacity_units = self.write_capacity_units,
            new_indexes = self.secondary_indexes.len(),
            "building update_table"
        );

        Ok(builder)
    }

    /// Assemble the DeleteTable request without sending it
    pub fn build_delete_table(self, client: &Client) -> DeleteTableFluentBuilder {
        debug!(table = %self.table_name, "building delete_table");
        client.delete_table().table_name(self.table_name)
    }

    /// Create the table
    ///
    /// Returns `None` if the table already exists.
    pub async fn create_table(mut self) -> Result<Option<TableDescription>, Error> {
        let client = resolve_client(self.client.take()).await;
        let table_name = self.table_name.clone();

        match self.build_create_table(&client)?.send().await {
            Ok(output) => Ok(output.table_description),
            Err(e) => {
                let err = Error::from(e);
                if err.is_table_already_exists() {
                    warn!(table = %table_name, "table already exists, skipping creation");
                    return Ok(None);
                }
                Err(err)
            }
        }
    }

    /// Update the table's throughput and add its new secondary indexes
    pub async fn update_table(mut self) -> Result<Option<TableDescription>, Error> {
        let client = resolve_client(self.client.take()).await;
        let output = self.build_update_table(&client)?.send().await?;
        Ok(output.table_description)
    }

    /// Delete the table
    pub async fn delete_table(mut self) -> Result<Option<TableDescription>, Error> {
        let client = resolve_client(self.client.take()).await;
        let output = self.build_delete_table(&client).send().await?;
        Ok(output.table_description)
    }
}

fn key_element(attribute_name: &str, key_type: KeyType) -> Result<KeySchemaElement, Error> {
    Ok(KeySchemaElement::builder()
        .attribute_name(attribute_name)
        .key_type(key_type)
        .build()?)
}

fn projection(index: &SecondaryIndex) -> Projection {
    Projection::builder()
        .projection_type(index.projection_type.clone())
        .build()
}
