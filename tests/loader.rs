//! Loading the fixture directory: the shipped sample set and every way a
//! directory can fail to produce a bundle.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use imgo_dashboard::data::loader::{
    self, CONTROLS_FILE, MAPPINGS_FILE, PATHS_FILE, REQUIRED_FILES, TECHNIQUES_FILE,
};
use imgo_dashboard::data::model::PathSubject;
use imgo_dashboard::data::LoadError;
use tempfile::TempDir;

fn sample_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample")
}

/// A scratch copy of the sample fixtures, optionally without one file.
fn scratch_copy(skip: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in REQUIRED_FILES {
        if Some(name) != skip {
            fs::copy(sample_dir().join(name), dir.path().join(name)).unwrap();
        }
    }
    dir
}

fn overwrite(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).unwrap();
}

#[test]
fn sample_fixtures_load_completely() {
    let bundle = loader::load(&sample_dir()).unwrap();
    assert_eq!(bundle.controls.len(), 10);
    assert_eq!(bundle.techniques.len(), 10);
    assert_eq!(bundle.requirements.len(), 10);
    assert_eq!(bundle.mappings.len(), 10);
    assert_eq!(bundle.paths.len(), 5);
    assert_eq!(bundle.len(), 45);

    let ids: HashSet<_> = bundle.controls.iter().map(|c| &c.control_id).collect();
    assert_eq!(ids.len(), bundle.controls.len());

    assert!(bundle
        .mappings
        .iter()
        .all(|m| (0.0..=1.0).contains(&m.mapping_confidence)));
    for path in &bundle.paths {
        if !path.nodes.is_empty() {
            assert_eq!(path.path_length, path.nodes.len());
        }
    }
    assert!(matches!(
        bundle.paths[3].subject,
        PathSubject::Endpoints { ref source, .. } if source == "SC-7"
    ));
}

#[test]
fn any_missing_file_fails_the_whole_load() {
    for name in REQUIRED_FILES {
        let dir = scratch_copy(Some(name));
        assert_eq!(loader::missing_files(dir.path()), [dir.path().join(name)]);

        match loader::load(dir.path()) {
            Err(LoadError::Io { path, .. }) => assert_eq!(path, dir.path().join(name)),
            other => panic!("expected an I/O error for {name}, got {other:?}"),
        }
    }
}

#[test]
fn missing_column_is_reported_by_name() {
    let dir = scratch_copy(None);
    overwrite(
        &dir,
        TECHNIQUES_FILE,
        "technique_id,name,description,platforms\nT1566,Phishing,desc,Windows\n",
    );
    match loader::load(dir.path()) {
        Err(LoadError::MissingColumn { column, .. }) => assert_eq!(column, "tactic"),
        other => panic!("expected a missing column, got {other:?}"),
    }
}

#[test]
fn extra_columns_are_ignored() {
    let dir = scratch_copy(None);
    overwrite(
        &dir,
        MAPPINGS_FILE,
        "nist_control_id,mitre_technique_id,mapping_type,mapping_confidence,reviewer\n\
         AC-2,T1078,mitigates,0.9,alice\n",
    );
    let bundle = loader::load(dir.path()).unwrap();
    assert_eq!(bundle.mappings.len(), 1);
}

#[test]
fn non_numeric_score_is_a_csv_error() {
    let dir = scratch_copy(None);
    overwrite(
        &dir,
        CONTROLS_FILE,
        "control_id,family,title,description,priority,fkgl_score\n\
         AC-2,Access Control,Account Management,desc,P1,hard\n",
    );
    let err = loader::load(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Csv { .. }), "{err}");
    assert_eq!(err.path(), dir.path().join(CONTROLS_FILE));
}

#[test]
fn out_of_range_confidence_names_the_record() {
    let dir = scratch_copy(None);
    overwrite(
        &dir,
        MAPPINGS_FILE,
        "nist_control_id,mitre_technique_id,mapping_type,mapping_confidence\n\
         AC-2,T1078,mitigates,0.9\n\
         SI-4,T1059,detects,1.5\n",
    );
    match loader::load(dir.path()) {
        Err(LoadError::InvalidRecord { record, reason, .. }) => {
            assert_eq!(record, 2);
            assert!(reason.contains("mapping_confidence"), "{reason}");
        }
        other => panic!("expected an invalid record, got {other:?}"),
    }
}

#[test]
fn duplicate_identifiers_are_rejected() {
    let dir = scratch_copy(None);
    overwrite(
        &dir,
        CONTROLS_FILE,
        "control_id,family,title,description,priority,fkgl_score\n\
         AC-2,Access Control,Account Management,desc,P1,12.0\n\
         AC-2,Access Control,Account Management again,desc,P1,13.0\n",
    );
    match loader::load(dir.path()) {
        Err(LoadError::DuplicateId { id, .. }) => assert_eq!(id, "AC-2"),
        other => panic!("expected a duplicate id, got {other:?}"),
    }
}

#[test]
fn empty_category_label_is_rejected() {
    let dir = scratch_copy(None);
    overwrite(
        &dir,
        TECHNIQUES_FILE,
        "technique_id,name,tactic,description,platforms\nT1566,Phishing,,desc,Windows\n",
    );
    let err = loader::load(dir.path()).unwrap_err();
    assert!(err.to_string().contains("'tactic' is empty"), "{err}");
}

#[test]
fn malformed_json_is_a_json_error() {
    let dir = scratch_copy(None);
    overwrite(&dir, PATHS_FILE, r#"[{"query": "q", "reasoning": "#);
    assert!(matches!(
        loader::load(dir.path()),
        Err(LoadError::Json { .. })
    ));
}

#[test]
fn path_length_mismatch_fails_the_load() {
    let dir = scratch_copy(None);
    overwrite(
        &dir,
        PATHS_FILE,
        r#"[
            {"query": "ok", "nist_controls": ["AC-2"], "mitre_techniques": [],
             "reasoning": "r", "confidence": 0.5, "path_length": 4},
            {"query": "bad", "nist_controls": ["AC-2"], "mitre_techniques": [],
             "reasoning": "r", "confidence": 0.5, "path_length": 2,
             "path": [{"node": "AC-2", "label": "Account Management", "type": "Control"}]}
        ]"#,
    );
    match loader::load(dir.path()) {
        Err(LoadError::InvalidRecord { record, .. }) => assert_eq!(record, 2),
        other => panic!("expected an invalid record, got {other:?}"),
    }
}

#[test]
fn path_records_require_control_and_technique_lists() {
    let dir = scratch_copy(None);
    overwrite(
        &dir,
        PATHS_FILE,
        r#"[{"query": "q", "mitre_techniques": ["T1566"], "reasoning": "r",
             "confidence": 0.5, "path_length": 2}]"#,
    );
    let err = loader::load(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }), "{err}");
    assert!(err.to_string().contains("nist_controls"), "{err}");

    overwrite(
        &dir,
        PATHS_FILE,
        r#"[{"query": "q", "nist_controls": ["AT-2"], "reasoning": "r",
             "confidence": 0.5, "path_length": 2}]"#,
    );
    let err = loader::load(dir.path()).unwrap_err();
    assert!(err.to_string().contains("mitre_techniques"), "{err}");
}
