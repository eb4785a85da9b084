use jsonschema::{Draft, JSONSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, ToolError};

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validate an argument mapping against a tool's declared schema.
///
/// Tools call this before issuing any network or library call; a mapping
/// that fails here never reaches the backing service.
pub fn validate_arguments(tool_name: &str, schema: &Value, arguments: &Value) -> Result<()> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|err| {
            ToolError::Validation(format!(
                "Failed to prepare `{}` argument schema for validation: {}",
                tool_name, err
            ))
        })?;

    if let Err(errors) = validator.validate(arguments) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "arguments failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(ToolError::Validation(format!(
            "Arguments for `{}` do not match its declared schema: {}",
            tool_name, detail_str
        )));
    }

    Ok(())
}

/// Validate an argument mapping and decode it into the tool's typed
/// parameter struct, reporting the offending path on decode failure.
pub fn parse_arguments<T>(tool_name: &str, schema: &Value, arguments: &Value) -> Result<T>
where
    T: DeserializeOwned,
{
    validate_arguments(tool_name, schema, arguments)?;

    let raw = arguments.to_string();
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let params = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() {
            "<root>".to_string()
        } else {
            path
        };
        ToolError::Validation(format!(
            "failed to decode arguments for `{}` at {}: {}",
            tool_name, location, err
        ))
    })?;

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct EchoParams {
        message: String,
        #[serde(default)]
        repeat: Option<u32>,
    }

    fn echo_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "message": {"type": "string"},
                "repeat": {"type": "integer", "minimum": 1}
            },
            "required": ["message"]
        })
    }

    #[test]
    fn accepts_a_conforming_mapping() {
        let args = json!({"message": "hi", "repeat": 2});
        let params: EchoParams = parse_arguments("echo", &echo_schema(), &args).unwrap();
        assert_eq!(params.message, "hi");
        assert_eq!(params.repeat, Some(2));
    }

    #[test]
    fn rejects_a_missing_required_argument() {
        let args = json!({"repeat": 2});
        let err = validate_arguments("echo", &echo_schema(), &args).unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
        assert!(err.to_string().contains("echo"));
    }

    #[test]
    fn rejects_a_mistyped_argument() {
        let args = json!({"message": 42});
        let err = validate_arguments("echo", &echo_schema(), &args).unwrap_err();
        assert!(err.to_string().contains("<root>") || err.to_string().contains("/message"));
    }

    #[test]
    fn rejects_an_out_of_range_argument() {
        let args = json!({"message": "hi", "repeat": 0});
        assert!(validate_arguments("echo", &echo_schema(), &args).is_err());
    }
}
