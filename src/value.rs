use serde_yml::Value;

/// A detection value as seen by the caseless pass.
///
/// Only strings and sequences take part in lowercasing; everything else,
/// including nested mappings, is carried through as [`TokenValue::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Text(String),
    Sequence(Vec<TokenValue>),
    Other(Value),
}

impl From<Value> for TokenValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Sequence(seq) => {
                let mut result = Vec::with_capacity(seq.len());
                for item in seq {
                    result.push(Self::from(item));
                }
                Self::Sequence(result)
            }
            other => Self::Other(other),
        }
    }
}

impl From<TokenValue> for Value {
    fn from(value: TokenValue) -> Self {
        match value {
            TokenValue::Text(s) => Value::String(s),
            TokenValue::Sequence(seq) => Value::Sequence(seq.into_iter().map(Value::from).collect()),
            TokenValue::Other(v) => v,
        }
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl TokenValue {
    /// Lowercases every string reachable through sequences
    pub fn into_lowercase(self) -> Self {
        match self {
            Self::Text(s) => Self::Text(s.to_lowercase()),
            Self::Sequence(seq) => {
                Self::Sequence(seq.into_iter().map(Self::into_lowercase).collect())
            }
            Self::Other(v) => Self::Other(v),
        }
    }
}

/// Returns the caseless form of a YAML value: strings lowercased, sequences
/// lowercased element-wise, anything else unchanged.
pub fn lower_tokens(value: &Value) -> Value {
    TokenValue::from(value.clone()).into_lowercase().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yml::from_str(s).unwrap()
    }

    #[test]
    fn test_lower_string() {
        assert_eq!(
            lower_tokens(&Value::from("Powershell.EXE -Enc")),
            Value::from("powershell.exe -enc")
        );
    }

    #[test]
    fn test_lower_nested_sequence() {
        let value = yaml("['A.EXE', ['B.Dll', 'C'], 5]");
        assert_eq!(lower_tokens(&value), yaml("['a.exe', ['b.dll', 'c'], 5]"));
    }

    #[test]
    fn test_mapping_not_lowered() {
        let value = yaml("- Keep: UPPER\n- LOWER_ME");
        assert_eq!(lower_tokens(&value), yaml("- Keep: UPPER\n- lower_me"));

        let value = yaml("Keep: UPPER");
        assert_eq!(lower_tokens(&value), value);
    }

    #[test]
    fn test_scalars_pass_through() {
        for value in [yaml("42"), yaml("true"), yaml("1.5"), Value::Null] {
            assert_eq!(lower_tokens(&value), value);
        }
    }

    #[test]
    fn test_lowering_is_idempotent() {
        let values = [
            Value::from("MiXeD Case"),
            yaml("['ÄÖÜ', 'İstanbul', 'ǅ', 'x']"),
            yaml("[['DEEP', ['DEEPER']]]"),
        ];
        for value in values {
            let once = lower_tokens(&value);
            assert_eq!(lower_tokens(&once), once, "{:?}", value);
        }
    }

    #[test]
    fn test_token_value_conversion() {
        let token = TokenValue::from(yaml("['a', 1]"));
        assert_eq!(
            token,
            TokenValue::Sequence(vec![
                TokenValue::from("a"),
                TokenValue::Other(Value::from(1))
            ])
        );
        assert_eq!(Value::from(token), yaml("['a', 1]"));
    }
}
