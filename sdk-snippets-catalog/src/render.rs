//! Retrieval chunks: the text and metadata a search index stores per entry.
//!
//! Embedding and uploading happen elsewhere; this module only renders.

use serde::Serialize;

use crate::types::{ExampleEntry, ParameterMap};

/// SDK generation label used when none is configured.
pub const DEFAULT_SDK_VERSION: &str = "v3";

/// Stable chunk identifier, e.g. `lambda_invoke_v3`.
pub fn label(entry: &ExampleEntry, sdk_version: &str) -> String {
    format!("{}_{}_{}", entry.service, entry.method, sdk_version)
}

/// Embedding-ready text for one entry.
pub fn chunk_text(entry: &ExampleEntry, sdk_version: &str) -> String {
    let params = if entry.parameters.is_empty() {
        "See code example for parameters".to_string()
    } else {
        entry
            .parameters
            .iter()
            .map(|p| format!("- {}: {}", p.name, p.description))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let text = format!(
        "AWS {service_upper} {method} Method (SDK {sdk_version})\n\
         \n\
         Description: {description}\n\
         \n\
         {version_upper} Code Example:\n\
         {code}\n\
         \n\
         Parameters:\n\
         {params}\n\
         \n\
         Package: {package}\n\
         Service: {service}\n\
         Method: {method}\n\
         SDK Version: {sdk_version}",
        service_upper = entry.service.to_uppercase(),
        version_upper = sdk_version.to_uppercase(),
        method = entry.method,
        description = entry.description,
        code = entry.code.trim(),
        package = entry.package,
        service = entry.service,
    );
    text.trim().to_string()
}

/// Metadata stored next to a chunk's vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkMetadata {
    pub service: String,
    pub method: String,
    pub sdk_version: String,
    pub package: String,
    pub description: String,
    pub code: String,
    /// Parameters as a JSON object string in declaration order; index
    /// metadata must be flat.
    pub parameters: String,
    pub label: String,
}

/// One exportable chunk: identifier, text to embed, and flat metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkRecord {
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
}

impl ChunkRecord {
    pub fn new(entry: &ExampleEntry, sdk_version: &str) -> serde_json::Result<Self> {
        let parameters = serde_json::to_string(&ParameterMap(&entry.parameters))?;
        let id = label(entry, sdk_version);

        Ok(Self {
            id: id.clone(),
            text: chunk_text(entry, sdk_version),
            metadata: ChunkMetadata {
                service: entry.service.clone(),
                method: entry.method.clone(),
                sdk_version: sdk_version.to_string(),
                package: entry.package.clone(),
                description: entry.description.clone(),
                code: entry.code.clone(),
                parameters,
                label: id,
            },
        })
    }

    /// One JSON Lines row.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoke() -> ExampleEntry {
        ExampleEntry::new("lambda", "invoke")
            .with_description("Invokes a Lambda function")
            .with_code("import { LambdaClient } from \"@aws-sdk/client-lambda\";\n")
            .with_parameter("FunctionName", "Name of the function")
            .with_parameter("Payload", "JSON payload")
            .with_package("@aws-sdk/client-lambda")
    }

    #[test]
    fn label_joins_key_and_version() {
        assert_eq!(label(&invoke(), "v3"), "lambda_invoke_v3");
    }

    #[test]
    fn chunk_text_layout() {
        let text = chunk_text(&invoke(), "v3");
        assert!(text.starts_with("AWS LAMBDA invoke Method (SDK v3)\n\nDescription: Invokes"));
        assert!(text.contains("V3 Code Example:\nimport { LambdaClient }"));
        assert!(text.contains(
            "Parameters:\n- FunctionName: Name of the function\n- Payload: JSON payload\n"
        ));
        assert!(text.ends_with("Method: invoke\nSDK Version: v3"));
    }

    #[test]
    fn chunk_text_without_parameters() {
        let mut entry = invoke();
        entry.parameters.clear();
        let text = chunk_text(&entry, "v3");
        assert!(text.contains("Parameters:\nSee code example for parameters\n"));
    }

    #[test]
    fn record_metadata_keeps_parameter_order() {
        let record = ChunkRecord::new(&invoke(), "v3").unwrap();
        assert_eq!(record.id, "lambda_invoke_v3");
        assert_eq!(record.metadata.label, record.id);
        assert_eq!(
            record.metadata.parameters,
            r#"{"FunctionName":"Name of the function","Payload":"JSON payload"}"#
        );

        let line = record.to_json_line().unwrap();
        assert!(!line.contains('\n'));
        assert!(line.starts_with("{\"id\":\"lambda_invoke_v3\""));
    }
}
