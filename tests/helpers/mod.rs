//! Test helpers and fixtures for the request builder tests
//!
//! Offline tests assemble requests against a client that never sends; live
//! tests talk to LocalStack (`AWS_PROFILE=localstack`).
pub mod fixtures;

pub use dynamo_builder::{
    CommandBuilder, Error, KeyType, ProjectionType, ScalarAttributeType, TableBuilder,
};
pub use serde::{Deserialize, Serialize};

#[allow(unused_imports)]
pub use fixtures::{Sample, SampleRecord};

use aws_sdk_dynamodb::Client;
use dynamo_builder::{BehaviorVersion, Region};
use tokio::sync::OnceCell;

/// Ensure DynamoDB client is initialized for tests
static TEST_INIT: OnceCell<()> = OnceCell::const_new();

/// Initialize DynamoDB client for tests (idempotent)
#[allow(dead_code)]
pub async fn init_test_client() {
    TEST_INIT
        .get_or_init(|| async {
            // Trigger auto-initialization
            let _ = dynamo_builder::dynamodb_client().await;
        })
        .await;
}

/// Client for assembling requests without sending them
#[allow(dead_code)]
pub fn offline_client() -> Client {
    let config = aws_sdk_dynamodb::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .build();
    Client::from_conf(config)
}

/// Generate a unique table name for isolation
#[allow(dead_code)]
pub fn unique_table_name(name: &str) -> String {
    format!("{}_{}", name, rusty_ulid::generate_ulid_string().to_lowercase())
}

/// Create the `pk`/`sk` sample table with a `Name` index
///
/// Safe to call multiple times.
#[allow(dead_code)]
pub async fn setup_sample_table(table_name: &str) -> Result<(), Error> {
    init_test_client().await;

    let _ = TableBuilder::new(table_name)?
        .add_schema("pk", KeyType::Hash)?
        .add_schema("sk", KeyType::Range)?
        .add_definition("pk", ScalarAttributeType::S)?
        .add_definition("sk", ScalarAttributeType::S)?
        .add_definition("Name", ScalarAttributeType::S)?
        .set_provisioned_throughput(1, 1)?
        .add_secondary_index("TestIndex", "Name", KeyType::Range, ProjectionType::All)?
        .create_table()
        .await?;

    Ok(())
}

/// Put a sample row
#[allow(dead_code)]
pub async fn put_sample(table_name: &str, sample: &Sample) -> Result<(), Error> {
    let _ = CommandBuilder::new(table_name)?
        .add_item(sample)?
        .put_item()
        .await?;
    Ok(())
}

/// Drop a table created by [`setup_sample_table`]
#[allow(dead_code)]
pub async fn teardown_table(table_name: &str) {
    let _ = TableBuilder::new(table_name)
        .expect("valid table name")
        .delete_table()
        .await;
}
