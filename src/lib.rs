//! # DynamoDB Request Builders
//!
//! Fluent builders for DynamoDB requests on top of `aws-sdk-dynamodb`:
//! - Filter expressions from mandatory (`AND`) and optional (`OR`) clauses
//! - Key conditions for queries, including sort key ranges
//! - Placeholder management for attribute names and values
//! - Put, delete, query and scan execution with typed decoding
//! - Table creation, update and deletion with secondary indexes
//!
//! ## Features
//!
//! - **Validated early**: duplicate attributes, unsupported value types and
//!   unknown operators are rejected while the request is built, before any
//!   network call
//! - **Unambiguous filters**: clauses form an explicit expression tree, and
//!   mixed `AND`/`OR` chains are rendered with parentheses
//! - **Typed results**: decode items into any `serde` type with `serde_dynamo`
//! - **Async-first**: built on `tokio` and `aws-sdk-dynamodb`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dynamo_builder::{CommandBuilder, Error};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Sample {
//!     #[serde(rename = "pk")]
//!     id: String,
//!     #[serde(rename = "sk")]
//!     id_value: String,
//!     #[serde(rename = "Name")]
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     // Put an item
//!     CommandBuilder::new("TestTable")?
//!         .add_attribute("pk", "User")?
//!         .add_attribute("sk", "3")?
//!         .add_attribute("Name", "Anne")?
//!         .put_item()
//!         .await?;
//!
//!     // Query a partition with filters
//!     let samples: Vec<Sample> = CommandBuilder::new("TestTable")?
//!         .add_key_condition("pk", "User")?
//!         .must_equal("Name", "Pedro")?
//!         .must_equal("LastName", "Pacheco")?
//!         .could_equal("Age", 26)?
//!         .execute_query_as()
//!         .await?;
//!
//!     println!("{samples:?}");
//!     Ok(())
//! }
//! ```
#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_results,
    unreachable_code,
    unused_mut
)]

mod error;
pub use error::Error;

mod value;
pub use value::Value;

#[macro_use]
pub mod expression;

/// Item access requests: query, scan, put and delete
pub mod command;

/// Table management requests: create, update and delete
pub mod schema;

// Re-export main types for convenience
pub use command::CommandBuilder;
pub use expression::{ExpressionBuilder, FilterExpr, Operator, RenderedExpression};
pub use schema::TableBuilder;

// Re-export aws-config types for configuration
pub use aws_config::{
    BehaviorVersion, Region, SdkConfig, defaults,
    meta::region::{ProvideRegion, RegionProviderChain},
    retry::{RetryConfig, RetryMode},
    timeout::TimeoutConfig,
};

// Re-export aws-types for advanced configuration
pub use aws_types::sdk_config::Builder as SdkConfigBuilder;

// SDK types that appear in builder signatures
pub use aws_sdk_dynamodb::types::{KeyType, ProjectionType, ScalarAttributeType};

use aws_sdk_dynamodb::Client as DynamoDbClient;
use tokio::sync::OnceCell;

/// Global DynamoDB client instance
static GLOBAL_CLIENT: OnceCell<DynamoDbClient> = OnceCell::const_new();

/// Endpoint used when `AWS_PROFILE=localstack`
const LOCALSTACK_ENDPOINT: &str = "http://127.0.0.1:4566";

/// Default SDK configuration
///
/// Used by `dynamodb_client()` when nothing was initialized explicitly:
/// - Adaptive retry mode with 3 max attempts
/// - Exponential backoff starting at 1 second
/// - Connect timeout: 3 seconds
/// - Read timeout: 20 seconds
/// - Operation timeout: 60 seconds
/// - LocalStack support via AWS_PROFILE=localstack
async fn aws_config_defaults() -> SdkConfig {
    use std::time::Duration;

    let timeout_config = TimeoutConfig::builder()
        .connect_timeout(Duration::from_secs(3))
        .read_timeout(Duration::from_secs(20))
        .operation_timeout(Duration::from_secs(60))
        .build();

    let mut loader = defaults(BehaviorVersion::latest())
        .retry_config(
            RetryConfig::adaptive()
                .with_max_attempts(3)
                .with_initial_backoff(Duration::from_secs(1)),
        )
        .timeout_config(timeout_config);

    if std::env::var("AWS_PROFILE").unwrap_or_default() == "localstack" {
        tracing::debug!(endpoint = LOCALSTACK_ENDPOINT, "using LocalStack endpoint");
        loader = loader.endpoint_url(LOCALSTACK_ENDPOINT);
    }

    loader.load().await
}

/// Initialize the global DynamoDB client with a custom AWS config
///
/// Has no effect if the client was already initialized.
///
/// # Example
///
/// ```rust,no_run
/// #[tokio::main]
/// async fn main() {
///     let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
///         .region(aws_config::Region::new("us-west-2"))
///         .load()
///         .await;
///     dynamo_builder::init(&config).await;
/// }
/// ```
pub async fn init(config: &SdkConfig) {
    let _ = GLOBAL_CLIENT
        .get_or_init(|| async { DynamoDbClient::new(config) })
        .await;
}

/// Initialize the global DynamoDB client with a custom client instance
///
/// Useful for testing or when you need fine-grained control over client
/// configuration. A single builder can also be pointed at a client with
/// [`CommandBuilder::with_client`] or [`TableBuilder::with_client`].
pub async fn init_with_client(client: DynamoDbClient) {
    let _ = GLOBAL_CLIENT.get_or_init(|| async { client }).await;
}

/// Get a reference to the global DynamoDB client
///
/// Automatically initializes the client with the defaults of
/// `aws_config_defaults` if [`init`] or [`init_with_client`] was not called
/// first.
pub async fn dynamodb_client() -> &'static DynamoDbClient {
    GLOBAL_CLIENT
        .get_or_init(|| async {
            let config = aws_config_defaults().await;
            DynamoDbClient::new(&config)
        })
        .await
}

/// Resolve the client a builder should send with
pub(crate) async fn resolve_client(explicit: Option<DynamoDbClient>) -> DynamoDbClient {
    match explicit {
        Some(client) => client,
        None => dynamodb_client().await.clone(),
    }
}

/// Reject empty table, index and attribute names
pub(crate) fn require_name(kind: &str, name: &str) -> Result<(), Error> {
    if name.trim().is_empty() {
        return Err(Error::Validation(format!("{kind} must not be empty")));
    }
    Ok(())
}
