use crate::error::TransformError;
use crate::mapping::FieldMapper;
use crate::rule::{parse_rule_documents, rule_documents_to_yaml, transform_rule};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const RULE_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// A rule file and the place its rewritten copy goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFile {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub files: usize,
    pub documents: usize,
}

pub fn is_rule_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            RULE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Lists every YAML file below `src` together with its mirrored path below
/// `dst`. Files are returned in file name order.
pub fn collect_rule_files(src: &Path, dst: &Path) -> Result<Vec<RuleFile>, TransformError> {
    if !src.is_dir() {
        return Err(TransformError::MissingInput(src.to_path_buf()));
    }

    let mut files = vec![];
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_rule_file(path) {
            continue;
        }
        let relative = path
            .strip_prefix(src)
            .unwrap_or_else(|_| Path::new(entry.file_name()));
        files.push(RuleFile {
            input: path.to_path_buf(),
            output: dst.join(relative),
        });
    }
    Ok(files)
}

/// Rewrites a single rule file. Returns the number of documents written.
pub fn process_file(
    input: &Path,
    output: &Path,
    mapper: &FieldMapper,
) -> Result<usize, TransformError> {
    let yaml = fs::read_to_string(input).map_err(|e| TransformError::io(input, e))?;
    let documents = parse_rule_documents(&yaml).map_err(|source| TransformError::Yaml {
        path: input.to_path_buf(),
        source,
    })?;

    let transformed: Vec<_> = documents
        .iter()
        .map(|document| transform_rule(document, mapper))
        .collect();
    let serialized =
        rule_documents_to_yaml(&transformed).map_err(|source| TransformError::Serialize {
            path: output.to_path_buf(),
            source,
        })?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|e| TransformError::io(parent, e))?;
    }
    fs::write(output, serialized).map_err(|e| TransformError::io(output, e))?;

    debug!(
        input = %input.display(),
        output = %output.display(),
        documents = transformed.len(),
        "Rewrote rule file"
    );
    Ok(transformed.len())
}

/// Mirrors the rule tree below `src` into `dst`, rewriting every YAML file.
///
/// `on_file` is called before each file is processed. The first failing file
/// aborts the batch.
pub fn transform_directory<F>(
    src: &Path,
    dst: &Path,
    mapper: &FieldMapper,
    mut on_file: F,
) -> Result<BatchSummary, TransformError>
where
    F: FnMut(&RuleFile),
{
    if !src.is_dir() {
        return Err(TransformError::MissingInput(src.to_path_buf()));
    }
    fs::create_dir_all(dst).map_err(|e| TransformError::io(dst, e))?;

    let mut summary = BatchSummary::default();
    for file in collect_rule_files(src, dst)? {
        on_file(&file);
        summary.documents += process_file(&file.input, &file.output, mapper)?;
        summary.files += 1;
    }
    Ok(summary)
}
