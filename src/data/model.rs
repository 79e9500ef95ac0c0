use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field addressing
// ---------------------------------------------------------------------------

/// A record with named categorical fields that views can filter and group on.
///
/// Each dataset exposes its own `CategoryField` enum so a renamed column is a
/// compile error rather than a silent empty filter.
pub trait Categorized {
    type CategoryField: Copy;

    fn category(&self, field: Self::CategoryField) -> &str;
}

/// A record with named numeric fields that views can range-filter and bucket.
pub trait Scored {
    type ScoreField: Copy;

    fn score(&self, field: Self::ScoreField) -> f64;
}

// ---------------------------------------------------------------------------
// ControlRecord – one row of the NIST SP 800-53 control catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlRecord {
    pub control_id: String,
    pub family: String,
    pub title: String,
    pub description: String,
    pub priority: String,
    /// Flesch-Kincaid grade level of the control text.
    pub fkgl_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCategory {
    Family,
    Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlScore {
    Fkgl,
}

impl Categorized for ControlRecord {
    type CategoryField = ControlCategory;

    fn category(&self, field: ControlCategory) -> &str {
        match field {
            ControlCategory::Family => &self.family,
            ControlCategory::Priority => &self.priority,
        }
    }
}

impl Scored for ControlRecord {
    type ScoreField = ControlScore;

    fn score(&self, field: ControlScore) -> f64 {
        match field {
            ControlScore::Fkgl => self.fkgl_score,
        }
    }
}

// ---------------------------------------------------------------------------
// TechniqueRecord – one row of the MITRE ATT&CK technique catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechniqueRecord {
    pub technique_id: String,
    pub name: String,
    pub tactic: String,
    pub description: String,
    /// Semicolon-separated platform list, e.g. `Windows;Linux`.
    pub platforms: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechniqueCategory {
    Tactic,
}

impl Categorized for TechniqueRecord {
    type CategoryField = TechniqueCategory;

    fn category(&self, field: TechniqueCategory) -> &str {
        match field {
            TechniqueCategory::Tactic => &self.tactic,
        }
    }
}

impl TechniqueRecord {
    pub fn platform_list(&self) -> impl Iterator<Item = &str> {
        split_list(&self.platforms)
    }
}

// ---------------------------------------------------------------------------
// RequirementRecord – one row of the AI RMF requirement table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementRecord {
    pub requirement_id: String,
    /// AI RMF core function: GOVERN, MAP, MEASURE or MANAGE.
    pub function: String,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    /// Semicolon-separated NIST control ids.
    pub related_controls: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementCategory {
    Function,
    Category,
}

impl Categorized for RequirementRecord {
    type CategoryField = RequirementCategory;

    fn category(&self, field: RequirementCategory) -> &str {
        match field {
            RequirementCategory::Function => &self.function,
            RequirementCategory::Category => &self.category,
        }
    }
}

impl RequirementRecord {
    pub fn related_control_ids(&self) -> impl Iterator<Item = &str> {
        split_list(&self.related_controls)
    }
}

// ---------------------------------------------------------------------------
// MappingRecord – one scored NIST → MITRE edge
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub nist_control_id: String,
    pub mitre_technique_id: String,
    pub mapping_type: String,
    /// Always within `[0, 1]` once loaded.
    pub mapping_confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingCategory {
    NistControl,
    MitreTechnique,
    MappingType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingScore {
    Confidence,
}

impl Categorized for MappingRecord {
    type CategoryField = MappingCategory;

    fn category(&self, field: MappingCategory) -> &str {
        match field {
            MappingCategory::NistControl => &self.nist_control_id,
            MappingCategory::MitreTechnique => &self.mitre_technique_id,
            MappingCategory::MappingType => &self.mapping_type,
        }
    }
}

impl Scored for MappingRecord {
    type ScoreField = MappingScore;

    fn score(&self, field: MappingScore) -> f64 {
        match field {
            MappingScore::Confidence => self.mapping_confidence,
        }
    }
}

// ---------------------------------------------------------------------------
// PathRecord – one pre-computed knowledge-graph reasoning path
// ---------------------------------------------------------------------------

/// What a path answers: a free-text query or a source/target pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathSubject {
    Query { query: String },
    Endpoints { source: String, target: String },
}

impl std::fmt::Display for PathSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSubject::Query { query } => write!(f, "{query}"),
            PathSubject::Endpoints { source, target } => write!(f, "{source} → {target}"),
        }
    }
}

/// One hop of a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    pub node: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Serializes to the same shape the loader reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRecord {
    #[serde(flatten)]
    pub subject: PathSubject,
    pub nist_controls: Vec<String>,
    pub mitre_techniques: Vec<String>,
    pub reasoning: String,
    pub confidence: f64,
    /// Equals `nodes.len()` whenever `nodes` is non-empty.
    pub path_length: usize,
    #[serde(rename = "path", skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<PathNode>,
}

// ---------------------------------------------------------------------------
// DatasetBundle – everything the dashboard shows
// ---------------------------------------------------------------------------

/// The fully validated set of sample datasets. Never mutated after load.
#[derive(Debug, Clone)]
pub struct DatasetBundle {
    pub source_dir: PathBuf,
    pub controls: Vec<ControlRecord>,
    pub techniques: Vec<TechniqueRecord>,
    pub requirements: Vec<RequirementRecord>,
    pub mappings: Vec<MappingRecord>,
    pub paths: Vec<PathRecord>,
}

impl DatasetBundle {
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Total number of records across all five datasets.
    pub fn len(&self) -> usize {
        self.controls.len()
            + self.techniques.len()
            + self.requirements.len()
            + self.mappings.len()
            + self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(';').map(str::trim).filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_subject_serializes_flat() {
        let record = PathRecord {
            subject: PathSubject::Endpoints {
                source: "AC-2".into(),
                target: "T1078".into(),
            },
            nist_controls: vec!["AC-2".into()],
            mitre_techniques: vec!["T1078".into()],
            reasoning: "account management limits valid account abuse".into(),
            confidence: 0.9,
            path_length: 2,
            nodes: Vec::new(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["source"], "AC-2");
        assert_eq!(json["target"], "T1078");
        assert!(json.get("path").is_none());
        assert_eq!(record.subject.to_string(), "AC-2 → T1078");
    }

    #[test]
    fn list_columns_split_on_semicolons() {
        let technique = TechniqueRecord {
            technique_id: "T1566".into(),
            name: "Phishing".into(),
            tactic: "Initial Access".into(),
            description: String::new(),
            platforms: "Windows; Linux;;macOS".into(),
        };
        let platforms: Vec<_> = technique.platform_list().collect();
        assert_eq!(platforms, ["Windows", "Linux", "macOS"]);
    }
}
