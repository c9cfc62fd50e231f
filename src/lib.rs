#![forbid(unsafe_code)]
//! `sigma-ecs` rewrites Sigma rules to Elastic Common Schema field names and
//! lowercases detection values of caseless fields.

pub mod batch;
mod config;
mod detection;
mod error;
mod mapping;
mod rule;
mod value;

pub use batch::{collect_rule_files, process_file, transform_directory, BatchSummary, RuleFile};
pub use config::MappingConfig;
pub use detection::transform_detection;
pub use error::TransformError;
pub use mapping::{CaselessMatch, FieldMapper, CASELESS_FIELDS, FIELD_MAP};
pub use rule::{parse_rule_documents, rule_documents_to_yaml, transform_rule, transform_rules_yaml};
pub use value::{lower_tokens, TokenValue};

/// Parse a single rule document from a YAML string
pub fn rule_from_yaml(yaml: &str) -> Result<serde_yml::Value, serde_yml::Error> {
    serde_yml::from_str(yaml)
}

/// Translate a field name with the built-in table
pub fn map_field_name(name: &str) -> String {
    FieldMapper::default().map_field_name(name).to_string()
}
