// src/github/schema.rs
// Schema introspection: the names and descriptions of every GraphQL type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{GatewayError, GithubClient};

const SCHEMA_QUERY: &str = r#"
query {
  __schema {
    types {
      name
      description
    }
  }
}
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub types: Vec<SchemaType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaType {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SchemaData {
    #[serde(rename = "__schema")]
    schema: Schema,
}

impl GithubClient {
    /// Returns the schema's type list as pretty-printed JSON.
    pub async fn fetch_schema(&self) -> Result<String, GatewayError> {
        let data: SchemaData = self.query(SCHEMA_QUERY, Value::Null).await?;
        Ok(serde_json::to_string_pretty(&data.schema)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::client::{decode_envelope, envelope_from};
    use serde_json::json;

    #[test]
    fn test_decode_schema() {
        let envelope = envelope_from(json!({ "data": { "__schema": { "types": [
            { "name": "Repository", "description": "A repository contains the content for a project." },
            { "name": "Boolean", "description": null }
        ] } } }));
        let data: SchemaData = decode_envelope(envelope).unwrap();
        assert_eq!(data.schema.types.len(), 2);
        assert_eq!(data.schema.types[0].name, "Repository");
        assert!(data.schema.types[1].description.is_none());

        let pretty = serde_json::to_string_pretty(&data.schema).unwrap();
        assert!(pretty.contains("\"name\": \"Boolean\""));
    }
}
