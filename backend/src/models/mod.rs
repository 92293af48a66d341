//! Domain models for the Liftdex catalog.
//!
//! - [`Target`] - One (group, subregion) pairing, e.g. `Chest / Mid Chest`
//! - [`Record`] - A parsed exercise with its ordered targets
//! - [`GroupedView`] - Records re-indexed by group, in display order
//! - [`GroupSection`] - One visible group with its sorted members

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Target
// =============================================================================

/// A muscle group and the finer subregion an exercise works within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Top-level category, e.g. `Chest`.
    pub group: String,
    /// Finer label within the group. May be empty.
    pub subregion: String,
}

impl Target {
    pub fn new(group: impl Into<String>, subregion: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            subregion: subregion.into(),
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// One exercise entry of the catalog.
///
/// Records are immutable once constructed: fields are only reachable
/// through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: String,
    targets: Vec<Target>,
}

impl Record {
    pub fn new(name: impl Into<String>, targets: Vec<Target>) -> Self {
        Self {
            name: name.into(),
            targets,
        }
    }

    /// Display name, also the sort key inside a group.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Targets in source order. Repeated groups are kept.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Targets belonging to `group`, in source order.
    pub fn targets_in<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Target> + 'a {
        self.targets.iter().filter(move |t| t.group == group)
    }

    /// Whether any target belongs to `group`.
    pub fn targets_group(&self, group: &str) -> bool {
        self.targets.iter().any(|t| t.group == group)
    }
}

// =============================================================================
// Grouped View
// =============================================================================

/// Records indexed by group, ready for display.
///
/// Built by [`crate::transform::grouper::index`]. Read-only: a new view is
/// computed for every redisplay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedView {
    groups: HashMap<String, Vec<Record>>,
    order: Vec<String>,
}

/// One visible group and its members, borrowed from a [`GroupedView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSection<'a> {
    pub group: &'a str,
    pub records: &'a [Record],
}

impl GroupedView {
    pub(crate) fn new(groups: HashMap<String, Vec<Record>>, order: Vec<String>) -> Self {
        Self { groups, order }
    }

    /// Visible group names: non-empty groups only, preference list first.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Members of `group`, sorted by name. Empty for unknown groups.
    pub fn records(&self, group: &str) -> &[Record] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Visible groups with their members, in display order.
    pub fn sections(&self) -> Vec<GroupSection<'_>> {
        self.order
            .iter()
            .map(|group| GroupSection {
                group: group.as_str(),
                records: self.records(group),
            })
            .collect()
    }

    /// Number of visible groups.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bench_press() -> Record {
        Record::new(
            "Bench Press",
            vec![
                Target::new("Chest", "Mid Chest"),
                Target::new("Triceps", "Lateral Head"),
                Target::new("Chest", "Upper Chest"),
            ],
        )
    }

    #[test]
    fn test_targets_in_filters_and_keeps_order() {
        let record = bench_press();
        let chest: Vec<&str> = record
            .targets_in("Chest")
            .map(|t| t.subregion.as_str())
            .collect();
        assert_eq!(chest, vec!["Mid Chest", "Upper Chest"]);
        assert_eq!(record.targets_in("Legs").count(), 0);
    }

    #[test]
    fn test_targets_group_is_exact_match() {
        let record = bench_press();
        assert!(record.targets_group("Chest"));
        assert!(!record.targets_group("chest"));
    }

    #[test]
    fn test_record_serialization() {
        let json = serde_json::to_value(bench_press()).unwrap();
        assert_eq!(json["name"], "Bench Press");
        assert_eq!(json["targets"][1]["group"], "Triceps");
        assert_eq!(json["targets"][1]["subregion"], "Lateral Head");
    }

    #[test]
    fn test_empty_view() {
        let view = GroupedView::default();
        assert!(view.is_empty());
        assert!(view.records("Chest").is_empty());
        assert!(view.sections().is_empty());
    }

    #[test]
    fn test_sections_borrow_view() {
        let groups = HashMap::from([("Chest".to_string(), vec![bench_press()])]);
        let view = GroupedView::new(groups, vec!["Chest".to_string()]);

        let sections = view.sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].group, "Chest");
        assert_eq!(sections[0].records, view.records("Chest"));
    }
}
