use aws_sdk_dynamodb::error::BuildError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::delete_table::DeleteTableError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_table::UpdateTableError;
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_runtime_api::http::Response;
use serde_dynamo::Error as SerdeDynamoError;

type DynamoQueryError = SdkError<QueryError, Response>;
type DynamoScanError = SdkError<ScanError, Response>;
type DynamoPutError = SdkError<PutItemError, Response>;
type DynamoDeleteItemError = SdkError<DeleteItemError, Response>;
type DynamoCreateTableError = SdkError<CreateTableError, Response>;
type DynamoUpdateTableError = SdkError<UpdateTableError, Response>;
type DynamoDeleteTableError = SdkError<DeleteTableError, Response>;

/// Errors raised while building or executing a DynamoDB request
///
/// The first five variants are raised synchronously while a request is being
/// assembled, before anything touches the network. They signal a mistake in
/// request construction and are never worth retrying. The remaining variants
/// wrap whatever the SDK returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field is missing or empty
    #[error("invalid request: {0}")]
    Validation(String),
    /// A key condition was registered twice for the same attribute
    #[error("key condition for attribute `{0}` is already registered")]
    DuplicateKeyCondition(String),
    /// An attribute (or its placeholder) was bound twice in the same request
    #[error("attribute `{0}` is already bound in this request")]
    DuplicateAttribute(String),
    /// The value has no string, number or boolean representation
    #[error("unsupported attribute value type: {0}")]
    UnsupportedType(String),
    /// The operator name is not one of the supported comparison operators
    #[error("invalid operator `{0}`")]
    InvalidOperator(String),
    /// Serde DynamoDB serialization/deserialization error
    #[error("DynamoDB serialization error: {0}")]
    SerdeDynamo(#[from] SerdeDynamoError),
    /// DynamoDB request builder error
    #[error("DynamoDB request builder error: {0}")]
    BuildError(#[from] BuildError),
    /// DynamoDB Query operation error
    #[error("DynamoDB Query operation failed: {0}")]
    Query(#[from] DynamoQueryError),
    /// DynamoDB Scan operation error
    #[error("DynamoDB Scan operation failed: {0}")]
    Scan(#[from] DynamoScanError),
    /// DynamoDB PutItem operation error
    #[error("DynamoDB PutItem operation failed: {0}")]
    PutItem(#[from] DynamoPutError),
    /// DynamoDB DeleteItem operation error
    #[error("DynamoDB DeleteItem operation failed: {0}")]
    DeleteItem(#[from] DynamoDeleteItemError),
    /// DynamoDB CreateTable operation error
    #[error("DynamoDB CreateTable operation failed: {0}")]
    CreateTable(#[from] DynamoCreateTableError),
    /// DynamoDB UpdateTable operation error
    #[error("DynamoDB UpdateTable operation failed: {0}")]
    UpdateTable(#[from] DynamoUpdateTableError),
    /// DynamoDB DeleteTable operation error
    #[error("DynamoDB DeleteTable operation failed: {0}")]
    DeleteTable(#[from] DynamoDeleteTableError),
}

impl Error {
    /// Check if the error was raised while assembling the request
    ///
    /// Build-time errors indicate a programming mistake; the builder that
    /// produced them is gone and a new request has to be constructed.
    ///
    /// # Example
    /// ```
    /// use dynamo_builder::{CommandBuilder, Error};
    ///
    /// let err = CommandBuilder::new("").unwrap_err();
    /// assert!(err.is_build_time_error());
    /// ```
    pub fn is_build_time_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_)
                | Error::DuplicateKeyCondition(_)
                | Error::DuplicateAttribute(_)
                | Error::UnsupportedType(_)
                | Error::InvalidOperator(_)
        )
    }

    /// Check if the error is a serialization/deserialization error
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::SerdeDynamo(_))
    }

    /// Check if the error came back from the DynamoDB SDK
    ///
    /// Returns `true` for request builder errors and every operation error.
    pub fn is_dynamodb_error(&self) -> bool {
        !self.is_build_time_error() && !self.is_serialization_error()
    }

    /// Check if a CreateTable call failed because the table already exists
    pub fn is_table_already_exists(&self) -> bool {
        matches!(self, Error::CreateTable(e) if matches!(
            e.as_service_error(),
            Some(CreateTableError::ResourceInUseException(_))
        ))
    }
}
