use crate::detection::transform_detection;
use crate::mapping::FieldMapper;
use serde::Deserialize;
use serde_yml::Value;

const DETECTION: &str = "detection";
const DOCUMENT_SEPARATOR: &str = "---\n";

/// Returns a rewritten copy of a rule document. Only a `detection` mapping is
/// touched; every other entry is carried over as it is.
pub fn transform_rule(document: &Value, mapper: &FieldMapper) -> Value {
    let mut result = document.clone();
    if let Some(detection) = result.get_mut(DETECTION) {
        if detection.is_mapping() {
            *detection = transform_detection(detection, mapper);
        }
    }
    result
}

/// Parse all documents of a YAML stream (separated by ---), skipping empty ones
pub fn parse_rule_documents(yaml: &str) -> Result<Vec<Value>, serde_yml::Error> {
    let mut documents = vec![];
    for document in serde_yml::Deserializer::from_str(yaml) {
        let value = Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }
        documents.push(value);
    }
    Ok(documents)
}

/// Serialize documents into a single YAML stream, keeping mapping key order
pub fn rule_documents_to_yaml(documents: &[Value]) -> Result<String, serde_yml::Error> {
    let mut result = String::new();
    for (i, document) in documents.iter().enumerate() {
        if i > 0 {
            result.push_str(DOCUMENT_SEPARATOR);
        }
        result.push_str(&serde_yml::to_string(document)?);
    }
    Ok(result)
}

/// Parse, rewrite and re-serialize a complete YAML stream
pub fn transform_rules_yaml(yaml: &str, mapper: &FieldMapper) -> Result<String, serde_yml::Error> {
    let documents: Vec<Value> = parse_rule_documents(yaml)?
        .iter()
        .map(|document| transform_rule(document, mapper))
        .collect();
    rule_documents_to_yaml(&documents)
}
