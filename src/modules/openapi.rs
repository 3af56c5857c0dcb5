//! Shared pieces of the modules' OpenAPI fragments.

use serde_json::{json, Value};

pub fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": schema }
        }
    })
}

pub fn error_response(description: &str) -> Value {
    json_response(description, json!({ "$ref": "#/components/schemas/ErrorResponse" }))
}

pub fn no_content(description: &str) -> Value {
    json!({ "description": description })
}
