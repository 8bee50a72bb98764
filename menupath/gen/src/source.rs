//! Where schema documents come from.
//!
//! The generator does not care whether entries were captured from a live
//! session or read from a dump; both arrive as a [`SchemaDocument`] through
//! the [`SchemaSource`] trait.

use std::fs;
use std::path::{Path, PathBuf};

use menupath_define::{RawEntry, SchemaDocument};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;
use yaml_rust2::{Yaml, YamlLoader};

use crate::errors::GeneratorError;

/// Supplies one schema document.
pub trait SchemaSource {
    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;

    /// Produces the document.
    ///
    /// ## Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    fn load(&self) -> Result<SchemaDocument, GeneratorError>;
}

/// Serialization formats accepted for schema dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Yaml,
}

impl SchemaFormat {
    /// Picks the format from a file extension (`json`, `yaml`, `yml`).
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::UnsupportedFormat` for anything else.
    pub fn from_path(path: &Path) -> Result<Self, GeneratorError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(GeneratorError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parses a schema document from text.
///
/// Nesting depth is unbounded: JSON is read with the recursion limit
/// disabled and YAML by an iterative loader. The resulting tree is then
/// decoded through a deserializer that grows the stack on demand.
///
/// ## Errors
///
/// Returns `GeneratorError::ParseError` when the text is not a valid
/// document in the given format.
pub fn parse_document(text: &str, format: SchemaFormat) -> Result<SchemaDocument, GeneratorError> {
    let value = match format {
        SchemaFormat::Json => parse_json(text)?,
        SchemaFormat::Yaml => yaml_to_json(parse_yaml(text)?)?,
    };
    document_from_value(value).map_err(|e| GeneratorError::ParseError(e.to_string()))
}

/// Top-level object form of a dump.
///
/// Decoded explicitly rather than through an untagged enum, which would
/// buffer the whole tree and decode it again without stack growth.
#[derive(Deserialize)]
struct FullDocument {
    #[serde(default)]
    root: Option<String>,
    #[serde(default)]
    doc: String,
    entries: Vec<RawEntry>,
}

fn document_from_value(value: JsonValue) -> Result<SchemaDocument, serde_json::Error> {
    if value.is_array() {
        let entries = Vec::<RawEntry>::deserialize(serde_stacker::Deserializer::new(value))?;
        return Ok(SchemaDocument {
            root: None,
            doc: String::new(),
            entries,
        });
    }

    let full = FullDocument::deserialize(serde_stacker::Deserializer::new(value))?;
    Ok(SchemaDocument {
        root: full.root,
        doc: full.doc,
        entries: full.entries,
    })
}

fn parse_json(text: &str) -> Result<JsonValue, GeneratorError> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = JsonValue::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .map_err(|e| GeneratorError::ParseError(e.to_string()))?;
    deserializer
        .end()
        .map_err(|e| GeneratorError::ParseError(e.to_string()))?;
    Ok(value)
}

fn parse_yaml(text: &str) -> Result<Yaml, GeneratorError> {
    let documents =
        YamlLoader::load_from_str(text).map_err(|e| GeneratorError::ParseError(e.to_string()))?;
    Ok(documents.into_iter().next().unwrap_or(Yaml::Null))
}

fn yaml_to_json(yaml: Yaml) -> Result<JsonValue, GeneratorError> {
    let value = match yaml {
        Yaml::Null => JsonValue::Null,
        Yaml::Boolean(b) => JsonValue::Bool(b),
        Yaml::Integer(i) => JsonValue::Number(i.into()),
        Yaml::Real(text) => text
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(JsonValue::Number)
            .ok_or_else(|| GeneratorError::ParseError(format!("invalid YAML number: {text}")))?,
        Yaml::String(s) => JsonValue::String(s),
        Yaml::Array(items) => JsonValue::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Yaml::Hash(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Integer(i) => i.to_string(),
                    Yaml::Boolean(b) => b.to_string(),
                    other => {
                        return Err(GeneratorError::ParseError(format!(
                            "unsupported YAML key: {other:?}"
                        )));
                    }
                };
                object.insert(key, yaml_to_json(value)?);
            }
            JsonValue::Object(object)
        }
        Yaml::Alias(_) => {
            return Err(GeneratorError::ParseError("YAML aliases are not supported".to_string()));
        }
        Yaml::BadValue => return Err(GeneratorError::ParseError("bad YAML value".to_string())),
    };
    Ok(value)
}

/// A JSON or YAML dump on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<SchemaDocument, GeneratorError> {
        let format = SchemaFormat::from_path(&self.path)?;
        let text = fs::read_to_string(&self.path).map_err(|e| GeneratorError::ReadError {
            path: self.path.display().to_string(),
            source: e,
        })?;
        debug!(path = %self.path.display(), ?format, bytes = text.len(), "read schema dump");
        parse_document(&text, format)
    }
}

/// A document already held in memory, e.g. captured from a live session.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    document: SchemaDocument,
}

impl InMemorySource {
    pub fn new(document: SchemaDocument) -> Self {
        Self { document }
    }
}

impl SchemaSource for InMemorySource {
    fn describe(&self) -> String {
        format!("in-memory schema ({} top-level entries)", self.document.entries.len())
    }

    fn load(&self) -> Result<SchemaDocument, GeneratorError> {
        Ok(self.document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn format_from_extension() {
        assert_eq!(SchemaFormat::from_path(Path::new("a.json")).unwrap(), SchemaFormat::Json);
        assert_eq!(SchemaFormat::from_path(Path::new("a.YML")).unwrap(), SchemaFormat::Yaml);
        assert!(matches!(
            SchemaFormat::from_path(Path::new("a.toml")),
            Err(GeneratorError::UnsupportedFormat(_))
        ));
        assert!(SchemaFormat::from_path(Path::new("schema")).is_err());
    }

    #[test]
    fn file_source_reads_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meshing.json");
        fs::write(
            &path,
            r#"{"root": "Meshing", "entries": [{"name": "file", "children": [{"name": "exit"}]}]}"#,
        )
        .unwrap();

        let document = FileSource::new(&path).load().unwrap();
        assert_eq!(document.root.as_deref(), Some("Meshing"));
        assert_eq!(document.entries[0].children[0].name, "exit");
    }

    #[test]
    fn file_source_reads_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meshing.yaml");
        fs::write(
            &path,
            "- name: file\n  doc: File operations.\n  children:\n    - name: read-case\n      arity: 1\n",
        )
        .unwrap();

        let document = FileSource::new(&path).load().unwrap();
        assert!(document.root.is_none());
        assert_eq!(document.entries[0].doc, "File operations.");
        assert_eq!(document.entries[0].children[0].arity, Some(1));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = FileSource::new(dir.path().join("absent.json")).load().unwrap_err();
        assert!(matches!(err, GeneratorError::ReadError { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = parse_document(r#"{"entries": [{"doc": "no name"}]}"#, SchemaFormat::Json).unwrap_err();
        assert!(matches!(err, GeneratorError::ParseError(_)));
    }

    fn deep_json(depth: usize) -> String {
        let mut text = String::from(r#"{"root": "Deep", "entries": ["#);
        for level in 0..depth {
            text.push_str(&format!(r#"{{"name": "level{level}", "children": ["#));
        }
        text.push_str(r#"{"name": "leaf"}"#);
        for _ in 0..depth {
            text.push_str("]}");
        }
        text.push_str("]}");
        text
    }

    fn deep_yaml(depth: usize) -> String {
        let mut text = String::from("root: Deep\nentries:\n");
        for level in 0..depth {
            let pad = "  ".repeat(level);
            text.push_str(&format!("{pad}- name: level{level}\n{pad}  children:\n"));
        }
        text.push_str(&format!("{}- name: leaf\n", "  ".repeat(depth)));
        text
    }

    fn nesting(document: &SchemaDocument) -> usize {
        let mut depth = 0;
        let mut level = &document.entries;
        while let Some(entry) = level.first() {
            depth += 1;
            level = &entry.children;
        }
        depth
    }

    #[test]
    fn deeply_nested_json_is_accepted() {
        let document = parse_document(&deep_json(300), SchemaFormat::Json).unwrap();
        assert_eq!(nesting(&document), 301);
    }

    #[test]
    fn deeply_nested_yaml_is_accepted() {
        let document = parse_document(&deep_yaml(200), SchemaFormat::Yaml).unwrap();
        assert_eq!(document.root.as_deref(), Some("Deep"));
        assert_eq!(nesting(&document), 201);
    }

    #[test]
    fn trailing_json_is_parse_error() {
        let err = parse_document(r#"[{"name": "exit"}] []"#, SchemaFormat::Json).unwrap_err();
        assert!(matches!(err, GeneratorError::ParseError(_)));
    }

    #[test]
    fn object_without_entries_is_parse_error() {
        let err = parse_document(r#"{"root": "Meshing"}"#, SchemaFormat::Json).unwrap_err();
        assert!(matches!(err, GeneratorError::ParseError(_)));
    }

    #[test]
    fn in_memory_source_returns_document() {
        let document = SchemaDocument {
            root: None,
            doc: String::new(),
            entries: vec![RawEntry::command("exit")],
        };
        let source = InMemorySource::new(document.clone());
        assert_eq!(source.load().unwrap(), document);
        assert!(source.describe().contains("1 top-level"));
    }
}
