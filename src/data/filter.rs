use std::collections::BTreeSet;

use super::model::{Categorized, Scored};

// ---------------------------------------------------------------------------
// Filter predicates
// ---------------------------------------------------------------------------

/// Records whose `field` equals `selected`, in their original order.
///
/// `None` means "no constraint": every record passes.
pub fn filter_by_category<'a, R, I>(
    records: I,
    field: R::CategoryField,
    selected: Option<&str>,
) -> Vec<&'a R>
where
    R: Categorized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .filter(|r| selected.map_or(true, |value| r.category(field) == value))
        .collect()
}

/// Records whose numeric `field` lies in `[low, high]`, in their original order.
///
/// Callers must pass `low <= high`; [`score_bounds`] gives a valid default.
pub fn filter_by_range<'a, R, I>(records: I, field: R::ScoreField, low: f64, high: f64) -> Vec<&'a R>
where
    R: Scored + 'a,
    I: IntoIterator<Item = &'a R>,
{
    debug_assert!(low <= high, "inverted range [{low}, {high}]");
    records
        .into_iter()
        .filter(|r| (low..=high).contains(&r.score(field)))
        .collect()
}

// ---------------------------------------------------------------------------
// Picker helpers
// ---------------------------------------------------------------------------

/// Minimum and maximum of `field`, or `None` for an empty input.
pub fn score_bounds<'a, R, I>(records: I, field: R::ScoreField) -> Option<(f64, f64)>
where
    R: Scored + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records.into_iter().map(|r| r.score(field)).fold(None, |acc, v| {
        Some(match acc {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        })
    })
}

/// Sorted unique values of `field`, used to populate category pickers.
pub fn distinct_values<'a, R, I>(records: I, field: R::CategoryField) -> Vec<String>
where
    R: Categorized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .map(|r| r.category(field))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ControlCategory, ControlRecord, ControlScore};

    fn control(id: &str, family: &str, fkgl: f64) -> ControlRecord {
        ControlRecord {
            control_id: id.into(),
            family: family.into(),
            title: format!("{id} title"),
            description: String::new(),
            priority: "P1".into(),
            fkgl_score: fkgl,
        }
    }

    fn sample() -> Vec<ControlRecord> {
        vec![
            control("AC-2", "Access Control", 12.4),
            control("AU-6", "Audit and Accountability", 14.1),
            control("AC-17", "Access Control", 9.8),
            control("SI-4", "System and Information Integrity", 16.0),
        ]
    }

    fn ids(records: &[&ControlRecord]) -> Vec<String> {
        records.iter().map(|r| r.control_id.clone()).collect()
    }

    #[test]
    fn category_filter_keeps_matching_rows_in_order() {
        let controls = sample();
        let hits = filter_by_category(&controls, ControlCategory::Family, Some("Access Control"));
        assert_eq!(ids(&hits), ["AC-2", "AC-17"]);
    }

    #[test]
    fn no_selection_returns_everything() {
        let controls = sample();
        let hits = filter_by_category(&controls, ControlCategory::Family, None);
        assert_eq!(hits.len(), controls.len());
    }

    #[test]
    fn unknown_category_yields_nothing() {
        let controls = sample();
        assert!(filter_by_category(&controls, ControlCategory::Family, Some("All")).is_empty());
    }

    #[test]
    fn range_filter_is_inclusive_on_both_ends() {
        let controls = sample();
        let hits = filter_by_range(&controls, ControlScore::Fkgl, 9.8, 14.1);
        assert_eq!(ids(&hits), ["AC-2", "AU-6", "AC-17"]);
    }

    #[test]
    fn filters_chain() {
        let controls = sample();
        let by_family = filter_by_category(&controls, ControlCategory::Family, Some("Access Control"));
        let hits = filter_by_range(by_family, ControlScore::Fkgl, 10.0, 20.0);
        assert_eq!(ids(&hits), ["AC-2"]);
    }

    #[test]
    fn bounds_and_distinct_values() {
        let controls = sample();
        assert_eq!(score_bounds(&controls, ControlScore::Fkgl), Some((9.8, 16.0)));
        assert_eq!(score_bounds(&Vec::<ControlRecord>::new(), ControlScore::Fkgl), None);
        assert_eq!(
            distinct_values(&controls, ControlCategory::Family),
            [
                "Access Control",
                "Audit and Accountability",
                "System and Information Integrity"
            ]
        );
    }
}
