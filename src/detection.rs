use crate::mapping::FieldMapper;
use crate::value::lower_tokens;
use serde_yml::{Mapping, Value};
use tracing::{debug, warn};

const CONDITION: &str = "condition";

fn is_condition(name: &Value) -> bool {
    name.as_str()
        .is_some_and(|s| s.eq_ignore_ascii_case(CONDITION))
}

fn transform_selection(selection: &Mapping, mapper: &FieldMapper) -> Mapping {
    let mut result = Mapping::with_capacity(selection.len());
    for (key, value) in selection {
        let Some(field_key) = key.as_str() else {
            warn!("Keeping non-string field key {:?} unchanged", key);
            result.insert(key.clone(), value.clone());
            continue;
        };

        let mapped_key = mapper.map_field_key(field_key);
        let value = if mapper.is_caseless(&mapped_key) {
            lower_tokens(value)
        } else {
            value.clone()
        };
        debug!(from = field_key, to = %mapped_key, "Mapped field");
        result.insert(Value::String(mapped_key), value);
    }
    result
}

/// Rewrites a detection block: every selection map has its field names
/// translated and, for caseless fields, its values lowercased. The condition
/// and non-map selections (keyword lists) are copied verbatim.
///
/// Anything that is not a mapping is returned unchanged.
pub fn transform_detection(detection: &Value, mapper: &FieldMapper) -> Value {
    let Some(selections) = detection.as_mapping() else {
        return detection.clone();
    };

    let mut result = Mapping::with_capacity(selections.len());
    for (name, body) in selections {
        let body = match body {
            Value::Mapping(selection) if !is_condition(name) => {
                Value::Mapping(transform_selection(selection, mapper))
            }
            _ => body.clone(),
        };
        result.insert(name.clone(), body);
    }
    Value::Mapping(result)
}
