use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::LoadError;
use super::model::{
    ControlRecord, DatasetBundle, MappingRecord, PathNode, PathRecord, PathSubject,
    RequirementRecord, TechniqueRecord,
};

pub const CONTROLS_FILE: &str = "sample_nist_controls.csv";
pub const TECHNIQUES_FILE: &str = "sample_mitre_techniques.csv";
pub const REQUIREMENTS_FILE: &str = "sample_ai_rmf_mapping.csv";
pub const MAPPINGS_FILE: &str = "sample_nist_mitre_mapping.csv";
pub const PATHS_FILE: &str = "sample_graphrag_paths.json";

/// Every file a complete bundle is read from.
pub const REQUIRED_FILES: [&str; 5] = [
    CONTROLS_FILE,
    TECHNIQUES_FILE,
    REQUIREMENTS_FILE,
    MAPPINGS_FILE,
    PATHS_FILE,
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and validate all five datasets from `dir`.
///
/// Fails on the first missing file, missing column, malformed record or
/// violated invariant; a bundle is only returned when every dataset is valid.
pub fn load(dir: &Path) -> Result<DatasetBundle, LoadError> {
    let controls = load_table::<ControlRecord>(dir)?;
    let techniques = load_table::<TechniqueRecord>(dir)?;
    let requirements = load_table::<RequirementRecord>(dir)?;
    let mappings = load_table::<MappingRecord>(dir)?;
    let paths = load_paths(&dir.join(PATHS_FILE))?;

    let bundle = DatasetBundle {
        source_dir: dir.to_path_buf(),
        controls,
        techniques,
        requirements,
        mappings,
        paths,
    };
    log::info!(
        "Loaded dataset bundle from {}: {} controls, {} techniques, {} requirements, {} mappings, {} paths",
        dir.display(),
        bundle.controls.len(),
        bundle.techniques.len(),
        bundle.requirements.len(),
        bundle.mappings.len(),
        bundle.paths.len()
    );
    Ok(bundle)
}

// ---------------------------------------------------------------------------
// CSV tables
// ---------------------------------------------------------------------------

/// A row type read from one of the fixed-schema CSV files.
pub trait TabularRecord: DeserializeOwned {
    const FILE_NAME: &'static str;
    /// Header columns that must be present; extra columns are ignored.
    const COLUMNS: &'static [&'static str];

    /// Identifier that must be unique within the table.
    fn key(&self) -> String;

    fn validate(&self) -> Result<(), String>;
}

impl TabularRecord for ControlRecord {
    const FILE_NAME: &'static str = CONTROLS_FILE;
    const COLUMNS: &'static [&'static str] = &[
        "control_id",
        "family",
        "title",
        "description",
        "priority",
        "fkgl_score",
    ];

    fn key(&self) -> String {
        self.control_id.clone()
    }

    fn validate(&self) -> Result<(), String> {
        require_text("control_id", &self.control_id)?;
        require_text("family", &self.family)?;
        if !self.fkgl_score.is_finite() {
            return Err(format!("fkgl_score {} is not a finite number", self.fkgl_score));
        }
        Ok(())
    }
}

impl TabularRecord for TechniqueRecord {
    const FILE_NAME: &'static str = TECHNIQUES_FILE;
    const COLUMNS: &'static [&'static str] =
        &["technique_id", "name", "tactic", "description", "platforms"];

    fn key(&self) -> String {
        self.technique_id.clone()
    }

    fn validate(&self) -> Result<(), String> {
        require_text("technique_id", &self.technique_id)?;
        require_text("tactic", &self.tactic)
    }
}

impl TabularRecord for RequirementRecord {
    const FILE_NAME: &'static str = REQUIREMENTS_FILE;
    const COLUMNS: &'static [&'static str] = &[
        "requirement_id",
        "function",
        "category",
        "subcategory",
        "description",
        "related_controls",
    ];

    fn key(&self) -> String {
        self.requirement_id.clone()
    }

    fn validate(&self) -> Result<(), String> {
        require_text("requirement_id", &self.requirement_id)?;
        require_text("function", &self.function)?;
        require_text("category", &self.category)
    }
}

impl TabularRecord for MappingRecord {
    const FILE_NAME: &'static str = MAPPINGS_FILE;
    const COLUMNS: &'static [&'static str] = &[
        "nist_control_id",
        "mitre_technique_id",
        "mapping_type",
        "mapping_confidence",
    ];

    fn key(&self) -> String {
        format!("{} -> {}", self.nist_control_id, self.mitre_technique_id)
    }

    fn validate(&self) -> Result<(), String> {
        require_text("nist_control_id", &self.nist_control_id)?;
        require_text("mitre_technique_id", &self.mitre_technique_id)?;
        require_unit_interval("mapping_confidence", self.mapping_confidence)
    }
}

/// Read `dir/T::FILE_NAME`, check its header, then deserialize and validate every row.
pub fn load_table<T: TabularRecord>(dir: &Path) -> Result<Vec<T>, LoadError> {
    let path = dir.join(T::FILE_NAME);
    let file = File::open(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path.clone(),
            source,
        })?
        .clone();
    if let Some(column) = T::COLUMNS
        .iter()
        .copied()
        .find(|col| !headers.iter().any(|h| h == *col))
    {
        return Err(LoadError::MissingColumn { path, column });
    }

    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for (i, result) in reader.deserialize::<T>().enumerate() {
        let record_no = i + 1;
        let row = result.map_err(|source| LoadError::Csv {
            path: path.clone(),
            source,
        })?;
        row.validate().map_err(|reason| LoadError::InvalidRecord {
            path: path.clone(),
            record: record_no,
            reason,
        })?;
        let key = row.key();
        if !seen.insert(key.clone()) {
            return Err(LoadError::DuplicateId { path, id: key });
        }
        rows.push(row);
    }

    log::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON path records
// ---------------------------------------------------------------------------

/// On-disk shape of a path record, before the subject and length are resolved.
///
/// ```json
/// {
///   "query": "Which controls mitigate phishing?",
///   "nist_controls": ["AT-2", "SI-4"],
///   "mitre_techniques": ["T1566"],
///   "reasoning": "...",
///   "confidence": 0.87,
///   "path_length": 3,
///   "path": [{ "node": "T1566", "label": "Phishing", "type": "Technique" }, ...]
/// }
/// ```
#[derive(Debug, Deserialize)]
struct RawPath {
    query: Option<String>,
    source: Option<String>,
    target: Option<String>,
    nist_controls: Vec<String>,
    mitre_techniques: Vec<String>,
    reasoning: String,
    confidence: f64,
    path_length: Option<usize>,
    path: Option<Vec<PathNode>>,
}

impl TryFrom<RawPath> for PathRecord {
    type Error = String;

    fn try_from(raw: RawPath) -> Result<Self, String> {
        let subject = match (raw.query, raw.source, raw.target) {
            (Some(query), _, _) if !query.trim().is_empty() => PathSubject::Query { query },
            (_, Some(source), Some(target)) => PathSubject::Endpoints { source, target },
            _ => return Err("needs either 'query' or both 'source' and 'target'".to_string()),
        };

        require_unit_interval("confidence", raw.confidence)?;

        let nodes = raw.path.unwrap_or_default();
        let path_length = match (raw.path_length, nodes.len()) {
            (Some(declared), 0) => declared,
            (None, 0) => return Err("needs 'path_length' or a non-empty 'path'".to_string()),
            (Some(declared), actual) if declared != actual => {
                return Err(format!(
                    "path_length is {declared} but path has {actual} nodes"
                ))
            }
            (_, actual) => actual,
        };

        Ok(PathRecord {
            subject,
            nist_controls: raw.nist_controls,
            mitre_techniques: raw.mitre_techniques,
            reasoning: raw.reasoning,
            confidence: raw.confidence,
            path_length,
            nodes,
        })
    }
}

/// Read the top-level JSON array of path records.
pub fn load_paths(path: &Path) -> Result<Vec<PathRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Vec<RawPath> =
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| {
            LoadError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(i, rec)| {
            PathRecord::try_from(rec).map_err(|reason| LoadError::InvalidRecord {
                path: path.to_path_buf(),
                record: i + 1,
                reason,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Read {} path records from {}", records.len(), path.display());
    Ok(records)
}

/// Paths of all required files under `dir` that do not exist.
pub fn missing_files(dir: &Path) -> Vec<PathBuf> {
    REQUIRED_FILES
        .iter()
        .map(|name| dir.join(name))
        .filter(|p| !p.is_file())
        .collect()
}

// -- validation helpers --

fn require_text(column: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("'{column}' is empty"))
    } else {
        Ok(())
    }
}

fn require_unit_interval(column: &str, value: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("'{column}' is {value}, expected a value in [0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawPath {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn path_length_is_derived_from_nodes() {
        let record = PathRecord::try_from(raw(
            r#"{
                "source": "AC-2", "target": "T1078",
                "nist_controls": ["AC-2"], "mitre_techniques": ["T1078"],
                "reasoning": "r", "confidence": 0.5,
                "path": [
                    {"node": "AC-2", "label": "Account Management", "type": "Control"},
                    {"node": "T1078", "label": "Valid Accounts", "type": "Technique"}
                ]
            }"#,
        ))
        .unwrap();
        assert_eq!(record.path_length, 2);
        assert_eq!(record.nodes[1].kind, "Technique");
        assert_eq!(record.nist_controls, ["AC-2"]);
    }

    #[test]
    fn declared_length_must_match_nodes() {
        let err = PathRecord::try_from(raw(
            r#"{
                "query": "q", "nist_controls": [], "mitre_techniques": [],
                "reasoning": "r", "confidence": 0.5, "path_length": 3,
                "path": [{"node": "AC-2", "label": "Account Management", "type": "Control"}]
            }"#,
        ))
        .unwrap_err();
        assert!(err.contains("path_length is 3"), "{err}");
    }

    #[test]
    fn subject_is_required() {
        let err = PathRecord::try_from(raw(
            r#"{"source": "AC-2", "nist_controls": [], "mitre_techniques": [],
                "reasoning": "r", "confidence": 0.5, "path_length": 1}"#,
        ))
        .unwrap_err();
        assert!(err.contains("'query'"), "{err}");
    }

    #[test]
    fn confidence_outside_unit_interval_is_rejected() {
        let err = PathRecord::try_from(raw(
            r#"{"query": "q", "nist_controls": [], "mitre_techniques": [],
                "reasoning": "r", "confidence": 1.2, "path_length": 1}"#,
        ))
        .unwrap_err();
        assert!(err.contains("[0, 1]"), "{err}");
    }

    #[test]
    fn mapping_key_covers_both_endpoints() {
        let mapping = MappingRecord {
            nist_control_id: "SI-4".into(),
            mitre_technique_id: "T1059".into(),
            mapping_type: "detects".into(),
            mapping_confidence: 0.7,
        };
        assert_eq!(mapping.key(), "SI-4 -> T1059");
        assert!(mapping.validate().is_ok());
    }
}
