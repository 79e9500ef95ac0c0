use std::path::Path;

use imgo_dashboard::config::DashboardConfig;
use imgo_dashboard::data::filter::score_bounds;
use imgo_dashboard::data::model::{ControlScore, DatasetBundle};
use imgo_dashboard::data;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Controls,
    Techniques,
    Requirements,
    Relationships,
    KnowledgePaths,
    About,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Overview,
        Page::Controls,
        Page::Techniques,
        Page::Requirements,
        Page::Relationships,
        Page::KnowledgePaths,
        Page::About,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Controls => "NIST Controls",
            Page::Techniques => "MITRE Techniques",
            Page::Requirements => "AI RMF Mapping",
            Page::Relationships => "NIST-MITRE Relationships",
            Page::KnowledgePaths => "Knowledge Paths",
            Page::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-view selections
// ---------------------------------------------------------------------------

/// Family and FKGL range pickers of the controls page.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsView {
    pub family: Option<String>,
    pub fkgl: (f64, f64),
}

/// Control picker and confidence range of the relationships page.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipsView {
    pub control: Option<String>,
    pub confidence: (f64, f64),
}

impl Default for RelationshipsView {
    fn default() -> Self {
        Self {
            control: None,
            confidence: (0.0, 1.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded bundle (None until a load succeeds).
    pub bundle: Option<DatasetBundle>,

    pub page: Page,
    pub controls_view: ControlsView,
    pub tactic: Option<String>,
    pub requirement_category: Option<String>,
    pub relationships_view: RelationshipsView,
    /// 0-based index into `bundle.paths`.
    pub selected_path: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            bundle: None,
            page: Page::Overview,
            controls_view: ControlsView {
                family: None,
                fkgl: (0.0, 0.0),
            },
            tactic: None,
            requirement_category: None,
            relationships_view: RelationshipsView::default(),
            selected_path: 0,
            status_message: None,
        }
    }

    /// Ingest a newly loaded bundle and reset every picker to "no constraint".
    pub fn set_bundle(&mut self, bundle: DatasetBundle) {
        self.controls_view = ControlsView {
            family: None,
            fkgl: score_bounds(&bundle.controls, ControlScore::Fkgl).unwrap_or((0.0, 0.0)),
        };
        self.tactic = None;
        self.requirement_category = None;
        self.relationships_view = RelationshipsView::default();
        self.selected_path = 0;

        self.bundle = Some(bundle);
        self.status_message = None;
    }

    /// Load a bundle from `dir`. On failure the current bundle, if any, is kept.
    pub fn load_from(&mut self, dir: &Path) {
        match data::load(dir) {
            Ok(bundle) => self.set_bundle(bundle),
            Err(e) => {
                log::error!("Failed to load data: {e}");
                self.status_message = Some(format!("Error loading data: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample")
    }

    #[test]
    fn loading_seeds_fkgl_range_from_bounds() {
        let mut state = AppState::new(DashboardConfig::default());
        state.load_from(&sample_dir());
        let bundle = state.bundle.as_ref().expect("sample data loads");
        let (lo, hi) = state.controls_view.fkgl;
        assert!(lo <= hi);
        assert!(bundle.controls.iter().all(|c| (lo..=hi).contains(&c.fkgl_score)));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_reload_keeps_previous_bundle() {
        let mut state = AppState::new(DashboardConfig::default());
        state.load_from(&sample_dir());
        state.selected_path = 2;

        let empty = tempfile::tempdir().unwrap();
        state.load_from(empty.path());

        assert!(state.bundle.is_some());
        assert_eq!(state.selected_path, 2);
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("sample_nist_controls.csv")));
    }
}
