use std::collections::BTreeMap;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Polygon};

use imgo_dashboard::data::aggregate::{pie_slices, ranked, HistogramBucket};

use crate::color::CategoryColors;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Category counts as coloured bars
// ---------------------------------------------------------------------------

/// One bar per category, largest first. Each category gets its own legend entry.
pub fn category_bars(ui: &mut Ui, id: &str, counts: &BTreeMap<String, usize>, x_label: &str) {
    let colors = CategoryColors::new(counts.keys().map(String::as_str));

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label("Count")
        .show_x(false)
        .allow_scroll(false)
        .allow_drag(false)
        .show(ui, |plot_ui| {
            for (i, (label, count)) in ranked(counts).into_iter().enumerate() {
                let bar = Bar::new(i as f64, count as f64)
                    .name(label)
                    .width(0.7)
                    .fill(colors.color_for(label));
                let chart = BarChart::new(vec![bar])
                    .name(label)
                    .color(colors.color_for(label));
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Category counts as a pie
// ---------------------------------------------------------------------------

/// Arc points per wedge piece.
const ARC_STEPS: usize = 24;

/// Unit-circle pie, one legend entry per category named `label (n, p%)`.
///
/// egui only fills convex shapes, so each wedge is drawn as pieces of at most
/// a quarter turn sharing one legend name.
pub fn category_pie(ui: &mut Ui, id: &str, counts: &BTreeMap<String, usize>) {
    let colors = CategoryColors::new(counts.keys().map(String::as_str));

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for slice in pie_slices(counts) {
                let color = colors.color_for(slice.label);
                let name = format!("{} ({}, {:.0}%)", slice.label, slice.count, slice.share * 100.0);
                for (start, end) in wedge_pieces(slice.start, slice.end) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(wedge_outline(start, end)))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }
            }
        });
}

/// `[start, end]` cut into consecutive ranges no wider than a quarter turn.
fn wedge_pieces(start: f64, end: f64) -> Vec<(f64, f64)> {
    let pieces = ((end - start) / std::f64::consts::FRAC_PI_2).ceil().max(1.0) as usize;
    let step = (end - start) / pieces as f64;
    (0..pieces)
        .map(|i| {
            let to = if i + 1 == pieces { end } else { start + (i + 1) as f64 * step };
            (start + i as f64 * step, to)
        })
        .collect()
}

/// Centre followed by points along the arc from `start` to `end`.
fn wedge_outline(start: f64, end: f64) -> Vec<[f64; 2]> {
    let mut points = Vec::with_capacity(ARC_STEPS + 2);
    points.push([0.0, 0.0]);
    points.extend((0..=ARC_STEPS).map(|k| {
        let angle = start + (end - start) * k as f64 / ARC_STEPS as f64;
        [angle.cos(), angle.sin()]
    }));
    points
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Render pre-computed histogram buckets as adjacent bars.
pub fn histogram(ui: &mut Ui, id: &str, buckets: &[HistogramBucket], x_label: &str) {
    let bars: Vec<Bar> = buckets
        .iter()
        .map(|b| {
            let width = if b.high > b.low { b.high - b.low } else { 0.1 };
            Bar::new(b.midpoint(), b.count as f64)
                .name(&b.label)
                .width(width)
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Frequency")
        .allow_scroll(false)
        .allow_drag(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::from_rgb(0x1f, 0x77, 0xb4)));
        });
}
