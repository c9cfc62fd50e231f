use crate::error::TransformError;
use crate::mapping::{CaselessMatch, FieldMapper};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

fn default_inherit() -> bool {
    true
}

/// User supplied field mapping, read from YAML:
///
/// ```yaml
/// fields:
///   TargetFilename: file.path
/// caseless:
///   - file.path
/// caseless_match: full-key
/// inherit_defaults: true
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingConfig {
    #[serde(default)]
    pub fields: HashMap<String, String>,
    #[serde(default)]
    pub caseless: Vec<String>,
    #[serde(default)]
    pub caseless_match: Option<CaselessMatch>,
    /// Extend the built-in table instead of replacing it
    #[serde(default = "default_inherit")]
    pub inherit_defaults: bool,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            fields: HashMap::new(),
            caseless: vec![],
            caseless_match: None,
            inherit_defaults: true,
        }
    }
}

impl MappingConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(yaml)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TransformError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TransformError::io(path, e))?;
        Self::from_yaml(&text).map_err(|source| TransformError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn into_mapper(self) -> FieldMapper {
        let mut mapper = if self.inherit_defaults {
            let mut mapper = FieldMapper::default();
            mapper.extend(self.fields, self.caseless);
            mapper
        } else {
            FieldMapper::new(self.fields, self.caseless)
        };
        if let Some(caseless_match) = self.caseless_match {
            mapper = mapper.with_caseless_match(caseless_match);
        }
        mapper
    }
}
