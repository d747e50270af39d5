//! Common test fixtures and data structures

use super::{Deserialize, Serialize};

/// Row of the sample table; field names map onto attributes with `rename`
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Sample {
    #[serde(rename = "pk")]
    pub id: String,
    #[serde(rename = "sk")]
    pub id_value: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "Age")]
    pub age: u32,
}

#[allow(dead_code)]
impl Sample {
    pub fn new(sk: &str, name: &str, last_name: &str, age: u32) -> Self {
        Self {
            id: "User".to_string(),
            id_value: sk.to_string(),
            name: name.to_string(),
            last_name: last_name.to_string(),
            age,
        }
    }
}

/// Projection of [`Sample`] onto its partition key and name
#[allow(dead_code)]
#[derive(Deserialize, PartialEq, Debug, Clone)]
pub struct SampleRecord {
    #[serde(rename = "pk")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
}
