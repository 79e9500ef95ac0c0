use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use imgo_dashboard::data::aggregate::{count_by_category, histogram, path_statistics, select_path};
use imgo_dashboard::data::filter::{distinct_values, filter_by_category, filter_by_range, score_bounds};
use imgo_dashboard::data::model::{
    ControlCategory, ControlScore, DatasetBundle, MappingCategory, MappingScore, RequirementCategory,
    TechniqueCategory,
};
use imgo_dashboard::data::ViewError;

use super::plot;
use crate::state::{ControlsView, RelationshipsView};

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

fn metric(ui: &mut Ui, label: &str, value: impl ToString) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).weak());
            ui.heading(value.to_string());
        });
    });
}

fn view_error(ui: &mut Ui, err: &ViewError) {
    ui.label(RichText::new(err.to_string()).color(Color32::RED));
}

/// "All" plus every distinct value. Selecting "All" stores `None`.
fn category_picker(ui: &mut Ui, label: &str, options: &[String], selected: &mut Option<String>) {
    egui::ComboBox::from_label(label)
        .selected_text(selected.as_deref().unwrap_or("All"))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(selected, None, "All");
            for option in options {
                ui.selectable_value(selected, Some(option.clone()), option.as_str());
            }
        });
}

/// Two sliders over `bounds`; `range.0 <= range.1` holds after every edit.
fn range_picker(ui: &mut Ui, label: &str, bounds: (f64, f64), range: &mut (f64, f64)) {
    ui.label(label);
    let (lo, hi) = bounds;
    let low_changed = ui
        .add(egui::Slider::new(&mut range.0, lo..=hi).text("min"))
        .changed();
    ui.add(egui::Slider::new(&mut range.1, lo..=hi).text("max"));
    if range.0 > range.1 {
        if low_changed {
            range.1 = range.0;
        } else {
            range.0 = range.1;
        }
    }
}

fn record_table(ui: &mut Ui, id: &str, headers: &[&str], rows: &[Vec<String>]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(400.0)
            .columns(Column::auto().at_least(60.0), headers.len().saturating_sub(1))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for h in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*h);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let cells = &rows[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.as_str());
                        });
                    }
                });
            });
    });
}

fn sample_caption(what: &str, n: usize) -> String {
    format!("Displaying {what} (N={n})")
}

fn sample_info(ui: &mut Ui, what: &str, n: usize) {
    ui.label(RichText::new(sample_caption(what, n)).color(Color32::from_rgb(0x1f, 0x77, 0xb4)));
}

/// Banner text naming the sample size behind every page.
pub fn demo_notice(bundle: &DatasetBundle) -> String {
    let largest = [
        bundle.controls.len(),
        bundle.techniques.len(),
        bundle.requirements.len(),
        bundle.mappings.len(),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);
    format!(
        "Demo Version: this dashboard displays sample data (N={largest}) for demonstration purposes only."
    )
}

fn showing(ui: &mut Ui, shown: usize, total: usize, noun: &str) {
    ui.label(RichText::new(format!("Showing {shown} of {total} {noun}")).strong());
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui, bundle: &DatasetBundle, buckets: usize) {
    ui.heading("Overview Dashboard");
    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "NIST Controls", bundle.controls.len());
        metric(&mut cols[1], "MITRE Techniques", bundle.techniques.len());
        metric(&mut cols[2], "AI RMF Mappings", bundle.requirements.len());
        metric(&mut cols[3], "Knowledge Paths", bundle.paths.len());
    });
    ui.separator();

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("NIST Control Families");
        let families = count_by_category(&bundle.controls, ControlCategory::Family);
        plot::category_pie(&mut cols[0], "family_counts", &families);

        cols[1].strong("MITRE Attack Tactics");
        let tactics = count_by_category(&bundle.techniques, TechniqueCategory::Tactic);
        plot::category_bars(&mut cols[1], "tactic_counts", &tactics, "Tactic");
    });
    ui.separator();

    ui.strong("NIST Control Readability (FKGL Scores)");
    let scores: Vec<f64> = bundle.controls.iter().map(|c| c.fkgl_score).collect();
    match histogram(&scores, buckets) {
        Ok(b) => plot::histogram(ui, "fkgl_histogram", &b, "FKGL Score"),
        Err(e) => view_error(ui, &e),
    }
}

// ---------------------------------------------------------------------------
// NIST controls
// ---------------------------------------------------------------------------

pub fn controls(ui: &mut Ui, bundle: &DatasetBundle, view: &mut ControlsView) {
    ui.heading("NIST SP 800-53 Controls");
    sample_info(ui, "sample of NIST SP 800-53 Rev. 5 security controls", bundle.controls.len());

    let families = distinct_values(&bundle.controls, ControlCategory::Family);
    let bounds = score_bounds(&bundle.controls, ControlScore::Fkgl).unwrap_or((0.0, 0.0));
    ui.columns(2, |cols: &mut [Ui]| {
        category_picker(&mut cols[0], "Filter by Family", &families, &mut view.family);
        range_picker(&mut cols[1], "FKGL Score Range", bounds, &mut view.fkgl);
    });

    let by_family = filter_by_category(&bundle.controls, ControlCategory::Family, view.family.as_deref());
    let filtered = filter_by_range(by_family, ControlScore::Fkgl, view.fkgl.0, view.fkgl.1);

    let rows: Vec<Vec<String>> = filtered
        .iter()
        .map(|c| {
            vec![
                c.control_id.clone(),
                c.family.clone(),
                c.title.clone(),
                c.priority.clone(),
                format!("{:.1}", c.fkgl_score),
                c.description.clone(),
            ]
        })
        .collect();
    record_table(
        ui,
        "controls_table",
        &["ID", "Family", "Title", "Priority", "FKGL", "Description"],
        &rows,
    );
    showing(ui, filtered.len(), bundle.controls.len(), "controls");

    egui::CollapsingHeader::new("What is the FKGL score?").show(ui, |ui: &mut Ui| {
        ui.label("Flesch-Kincaid Grade Level (FKGL) measures text readability:");
        ui.label("• 8-10: easy to read (8th-10th grade level)");
        ui.label("• 11-12: average difficulty (high school level)");
        ui.label("• 13+: difficult (college level or higher)");
        ui.label("Lower scores indicate more accessible documentation.");
    });
}

// ---------------------------------------------------------------------------
// MITRE techniques
// ---------------------------------------------------------------------------

pub fn techniques(ui: &mut Ui, bundle: &DatasetBundle, tactic: &mut Option<String>) {
    ui.heading("MITRE ATT&CK Techniques");
    sample_info(ui, "sample of MITRE ATT&CK techniques", bundle.techniques.len());

    let tactics = distinct_values(&bundle.techniques, TechniqueCategory::Tactic);
    category_picker(ui, "Filter by Tactic", &tactics, tactic);

    let filtered = filter_by_category(&bundle.techniques, TechniqueCategory::Tactic, tactic.as_deref());
    let rows: Vec<Vec<String>> = filtered
        .iter()
        .map(|t| {
            vec![
                t.technique_id.clone(),
                t.name.clone(),
                t.tactic.clone(),
                t.platform_list().collect::<Vec<_>>().join(", "),
                t.description.clone(),
            ]
        })
        .collect();
    record_table(
        ui,
        "techniques_table",
        &["ID", "Name", "Tactic", "Platforms", "Description"],
        &rows,
    );
    showing(ui, filtered.len(), bundle.techniques.len(), "techniques");
}

// ---------------------------------------------------------------------------
// AI RMF requirements
// ---------------------------------------------------------------------------

pub fn requirements(ui: &mut Ui, bundle: &DatasetBundle, category: &mut Option<String>) {
    ui.heading("NIST AI RMF Requirements");
    sample_info(ui, "AI Risk Management Framework requirements", bundle.requirements.len());

    let categories = distinct_values(&bundle.requirements, RequirementCategory::Category);
    category_picker(ui, "Filter by Category", &categories, category);

    let filtered = filter_by_category(
        &bundle.requirements,
        RequirementCategory::Category,
        category.as_deref(),
    );
    let rows: Vec<Vec<String>> = filtered
        .iter()
        .map(|r| {
            vec![
                r.requirement_id.clone(),
                r.function.clone(),
                r.category.clone(),
                r.subcategory.clone(),
                r.related_control_ids().collect::<Vec<_>>().join(", "),
                r.description.clone(),
            ]
        })
        .collect();
    record_table(
        ui,
        "requirements_table",
        &["ID", "Function", "Category", "Subcategory", "NIST Controls", "Description"],
        &rows,
    );
    showing(ui, filtered.len(), bundle.requirements.len(), "requirements");
}

// ---------------------------------------------------------------------------
// NIST-MITRE relationships
// ---------------------------------------------------------------------------

pub fn relationships(ui: &mut Ui, bundle: &DatasetBundle, view: &mut RelationshipsView, buckets: usize) {
    ui.heading("NIST-MITRE Relationship Mappings");
    sample_info(ui, "relationships between NIST controls and MITRE techniques", bundle.mappings.len());

    let controls = distinct_values(&bundle.mappings, MappingCategory::NistControl);
    ui.columns(2, |cols: &mut [Ui]| {
        category_picker(&mut cols[0], "Filter by NIST Control", &controls, &mut view.control);
        range_picker(&mut cols[1], "Confidence Range", (0.0, 1.0), &mut view.confidence);
    });

    let by_control = filter_by_category(
        &bundle.mappings,
        MappingCategory::NistControl,
        view.control.as_deref(),
    );
    let filtered = filter_by_range(
        by_control,
        MappingScore::Confidence,
        view.confidence.0,
        view.confidence.1,
    );
    let rows: Vec<Vec<String>> = filtered
        .iter()
        .map(|m| {
            vec![
                m.nist_control_id.clone(),
                m.mitre_technique_id.clone(),
                m.mapping_type.clone(),
                format!("{:.2}", m.mapping_confidence),
            ]
        })
        .collect();
    record_table(
        ui,
        "mappings_table",
        &["NIST Control", "MITRE Technique", "Type", "Confidence"],
        &rows,
    );
    showing(ui, filtered.len(), bundle.mappings.len(), "relationships");

    ui.separator();
    ui.strong("Mapping Confidence Distribution");
    let confidences: Vec<f64> = bundle.mappings.iter().map(|m| m.mapping_confidence).collect();
    match histogram(&confidences, buckets) {
        Ok(b) => plot::histogram(ui, "confidence_histogram", &b, "Confidence Score"),
        Err(e) => view_error(ui, &e),
    }
}

// ---------------------------------------------------------------------------
// Knowledge paths
// ---------------------------------------------------------------------------

pub fn knowledge_paths(ui: &mut Ui, bundle: &DatasetBundle, selected: &mut usize) {
    ui.heading("GraphRAG Knowledge Paths");
    sample_info(ui, "pre-computed knowledge graph reasoning paths", bundle.paths.len());

    let paths = &bundle.paths;
    let option_label = |i: usize| format!("{}. {}", i + 1, paths[i].subject);
    let current = if *selected < paths.len() {
        option_label(*selected)
    } else {
        String::from("None")
    };
    egui::ComboBox::from_label("Select Query")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for i in 0..paths.len() {
                ui.selectable_value(selected, i, option_label(i));
            }
        });

    match select_path(paths, *selected) {
        Ok(path) => {
            ui.columns(2, |cols: &mut [Ui]| {
                let ui = &mut cols[0];
                ui.strong("Query Details");
                ui.label(format!("Query: {}", path.subject));

                ui.strong("Related NIST Controls");
                for control in &path.nist_controls {
                    ui.monospace(format!("• {control}"));
                }
                ui.strong("Related MITRE Techniques");
                for technique in &path.mitre_techniques {
                    ui.monospace(format!("• {technique}"));
                }

                if !path.nodes.is_empty() {
                    ui.strong("Path");
                    let chain: Vec<String> = path
                        .nodes
                        .iter()
                        .map(|n| format!("{} ({}: {})", n.node, n.kind, n.label))
                        .collect();
                    ui.label(chain.join("  →  "));
                }

                ui.strong("Reasoning");
                ui.group(|ui: &mut Ui| {
                    ui.label(path.reasoning.as_str());
                });

                let ui = &mut cols[1];
                ui.strong("Path Metrics");
                metric(ui, "Confidence", format!("{:.2}", path.confidence));
                metric(ui, "Path Length", path.path_length);
                metric(ui, "NIST Controls", path.nist_controls.len());
                metric(ui, "MITRE Techniques", path.mitre_techniques.len());
            });
        }
        Err(e) => view_error(ui, &e),
    }

    ui.separator();
    ui.strong("Overall Path Statistics");
    match path_statistics(paths) {
        Ok(stats) => {
            ui.columns(3, |cols: &mut [Ui]| {
                metric(&mut cols[0], "Average Confidence", format!("{:.2}", stats.average_confidence));
                metric(&mut cols[1], "Average Path Length", format!("{:.1}", stats.average_path_length));
                metric(&mut cols[2], "Total Paths", stats.count);
            });
        }
        Err(e) => view_error(ui, &e),
    }
}

// ---------------------------------------------------------------------------
// About
// ---------------------------------------------------------------------------

pub fn about(ui: &mut Ui) {
    ui.heading("About IMGO");
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.label(
            "IMGO (Intelligent Multi-Framework Integrated Ontology-based GraphRAG) is a \
             demonstration viewer over small, static sample datasets.",
        );
        ui.add_space(8.0);
        ui.strong("Version");
        ui.label(format!("Demo version v{}", imgo_dashboard::VERSION));
        ui.add_space(8.0);
        ui.strong("Features");
        for line in [
            "Browse sample NIST SP 800-53 controls with FKGL readability scores",
            "Explore sample MITRE ATT&CK techniques",
            "View AI RMF requirements",
            "Examine scored NIST-MITRE relationships",
            "Explore pre-computed knowledge paths",
        ] {
            ui.label(format!("• {line}"));
        }
        ui.add_space(8.0);
        ui.strong("Limitations");
        for line in [
            "Limited to sample data",
            "No live GraphRAG queries or graph traversal",
            "No database or LLM integration",
            "Static, pre-computed relationships only",
        ] {
            ui.label(format!("• {line}"));
        }
        ui.add_space(8.0);
        ui.strong("Data Sources");
        ui.label("• NIST SP 800-53 Rev. 5: public domain (US Government)");
        ui.label("• MITRE ATT&CK Framework v14: free use (MITRE Corporation)");
        ui.label("• NIST AI RMF 1.0: public domain (NIST)");
    });
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use imgo_dashboard::data::model::ControlRecord;

    use super::*;

    fn control(id: &str) -> ControlRecord {
        ControlRecord {
            control_id: id.into(),
            family: "Access Control".into(),
            title: String::new(),
            description: String::new(),
            priority: "P1".into(),
            fkgl_score: 12.0,
        }
    }

    #[test]
    fn captions_carry_the_sample_size() {
        assert_eq!(
            sample_caption("sample of MITRE ATT&CK techniques", 10),
            "Displaying sample of MITRE ATT&CK techniques (N=10)"
        );
    }

    #[test]
    fn demo_notice_uses_the_largest_table() {
        let bundle = DatasetBundle {
            source_dir: PathBuf::from("data/sample"),
            controls: vec![control("AC-2"), control("AC-3"), control("AC-6")],
            techniques: Vec::new(),
            requirements: Vec::new(),
            mappings: Vec::new(),
            paths: Vec::new(),
        };
        let notice = demo_notice(&bundle);
        assert!(notice.starts_with("Demo Version"), "{notice}");
        assert!(notice.contains("(N=3)"), "{notice}");
    }
}
