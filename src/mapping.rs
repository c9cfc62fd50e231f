use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use strum::{Display, EnumString};

/// Sigma field name -> ECS field path
pub const FIELD_MAP: &[(&str, &str)] = &[
    ("CommandLine", "process.command_line"),
    ("Image", "process.executable"),
    ("Executable", "process.executable"),
    ("ProcessId", "process.pid"),
    ("ParentProcessId", "process.parent.pid"),
    ("ParentImage", "process.parent.executable"),
    ("ParentCommandLine", "process.parent.command_line"),
    ("ProcessName", "process.name"),
    ("ParentProcessName", "process.parent.name"),
    ("User", "user.name"),
    ("UserId", "user.id"),
    ("Hostname", "host.hostname"),
    ("HostName", "host.name"),
    ("FileName", "file.name"),
    ("FilePath", "file.path"),
    ("FileExt", "file.extension"),
    ("FileDirectory", "file.directory"),
    ("DestinationIp", "destination.ip"),
    ("DestinationPort", "destination.port"),
    ("SourceIp", "source.ip"),
    ("SourcePort", "source.port"),
    ("Protocol", "network.protocol"),
    ("EventType", "event.type"),
    ("EventAction", "event.action"),
];

/// ECS fields whose detection values are lowercased
pub const CASELESS_FIELDS: &[&str] = &[
    "process.command_line",
    "process.executable",
    "process.parent.executable",
    "file.path",
    "file.name",
    "user.name",
];

/// How a mapped key is tested against the caseless set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CaselessMatch {
    /// The full mapped key (operator suffix included) or its first dotted segment
    #[default]
    FullKey,
    /// Only the first dotted segment of the mapped key
    FirstSegment,
}

/// Immutable field translation table plus the caseless set.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    fields: HashMap<String, String>,
    caseless: HashSet<String>,
    caseless_match: CaselessMatch,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(
            FIELD_MAP
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
            CASELESS_FIELDS.iter().map(|f| f.to_string()),
        )
    }
}

impl FieldMapper {
    pub fn new<F, C>(fields: F, caseless: C) -> Self
    where
        F: IntoIterator<Item = (String, String)>,
        C: IntoIterator<Item = String>,
    {
        Self {
            fields: fields.into_iter().collect(),
            caseless: caseless.into_iter().collect(),
            caseless_match: CaselessMatch::default(),
        }
    }

    pub fn with_caseless_match(mut self, caseless_match: CaselessMatch) -> Self {
        self.caseless_match = caseless_match;
        self
    }

    pub(crate) fn extend<F, C>(&mut self, fields: F, caseless: C)
    where
        F: IntoIterator<Item = (String, String)>,
        C: IntoIterator<Item = String>,
    {
        self.fields.extend(fields);
        self.caseless.extend(caseless);
    }

    pub fn caseless_match(&self) -> CaselessMatch {
        self.caseless_match
    }

    /// Number of entries in the translation table
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Translates a field name. Exact, case-sensitive match; unknown names are
    /// returned as they are.
    pub fn map_field_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.fields.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Translates a field expression such as `Image|endswith`. Only the part
    /// before the first `|` is translated, the rest is kept verbatim.
    pub fn map_field_key(&self, key: &str) -> String {
        match key.split_once('|') {
            Some((base, suffix)) => format!("{}|{}", self.map_field_name(base), suffix),
            None => self.map_field_name(key).to_string(),
        }
    }

    /// Whether values for an already mapped key must be lowercased
    pub fn is_caseless(&self, mapped_key: &str) -> bool {
        let first_segment = mapped_key.split('.').next().unwrap_or(mapped_key);
        match self.caseless_match {
            CaselessMatch::FullKey => {
                self.caseless.contains(mapped_key) || self.caseless.contains(first_segment)
            }
            CaselessMatch::FirstSegment => self.caseless.contains(first_segment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_every_table_entry_maps() {
        let mapper = FieldMapper::default();
        for (sigma, ecs) in FIELD_MAP {
            assert_eq!(mapper.map_field_name(sigma), *ecs);
        }
        assert_eq!(mapper.len(), FIELD_MAP.len());
    }

    #[test]
    fn test_unknown_names_pass_through() {
        let mapper = FieldMapper::default();
        for name in ["OriginalFileName", "commandline", "COMMANDLINE", "", "process.pid"] {
            assert_eq!(mapper.map_field_name(name), name);
        }
    }

    #[test]
    fn test_mapping_is_idempotent_for_defaults() {
        let mapper = FieldMapper::default();
        for (sigma, _) in FIELD_MAP {
            let once = mapper.map_field_name(sigma);
            assert_eq!(mapper.map_field_name(once), once);
        }
    }

    #[test]
    fn test_map_field_key_keeps_suffix() {
        let mapper = FieldMapper::default();
        assert_eq!(
            mapper.map_field_key("Image|endswith"),
            "process.executable|endswith"
        );
        assert_eq!(
            mapper.map_field_key("CommandLine|contains|all"),
            "process.command_line|contains|all"
        );
        assert_eq!(mapper.map_field_key("Image|"), "process.executable|");
        assert_eq!(mapper.map_field_key("|contains"), "|contains");
        assert_eq!(mapper.map_field_key("Unknown|re"), "Unknown|re");
        assert_eq!(mapper.map_field_key("User"), "user.name");
    }

    #[test]
    fn test_caseless_full_key() {
        let mapper = FieldMapper::default();
        assert!(mapper.is_caseless("process.command_line"));
        assert!(mapper.is_caseless("user.name"));
        assert!(!mapper.is_caseless("process.executable|endswith"));
        assert!(!mapper.is_caseless("process.pid"));
        assert!(!mapper.is_caseless("process"));
    }

    #[test]
    fn test_caseless_first_segment_only() {
        let mapper = FieldMapper::default().with_caseless_match(CaselessMatch::FirstSegment);
        // The default set only holds dotted paths, so nothing dotted ever matches
        for field in CASELESS_FIELDS {
            assert!(!mapper.is_caseless(field), "{}", field);
        }

        let mapper = FieldMapper::new(Vec::<(String, String)>::new(), vec!["process".to_string()])
            .with_caseless_match(CaselessMatch::FirstSegment);
        assert!(mapper.is_caseless("process.command_line"));
        assert!(mapper.is_caseless("process.executable|endswith"));
        assert!(!mapper.is_caseless("file.name"));
    }

    #[test]
    fn test_caseless_segment_entry_in_full_key_mode() {
        let mapper = FieldMapper::new(Vec::<(String, String)>::new(), vec!["file".to_string()]);
        assert!(mapper.is_caseless("file.path"));
        assert!(mapper.is_caseless("file.name|endswith"));
    }

    #[test]
    fn test_caseless_match_from_str() {
        assert_eq!(
            CaselessMatch::from_str("full-key").unwrap(),
            CaselessMatch::FullKey
        );
        assert_eq!(
            CaselessMatch::from_str("first-segment").unwrap(),
            CaselessMatch::FirstSegment
        );
        assert!(CaselessMatch::from_str("whatever").is_err());
        assert_eq!(CaselessMatch::FirstSegment.to_string(), "first-segment");
    }
}
