//! Index parsed exercises by muscle group for display.
//!
//! An exercise with targets in several groups fans out into each of them.
//!
//! ```text
//! Records                                   Grouped view (order: Chest, Legs)
//! ┌─────────────────────────────────┐       ┌──────────────────────────────┐
//! │ Bench Press: Chest, Triceps     │       │ Chest:   Bench Press, Dips   │
//! │ Dips:        Triceps, Chest     │  →    │ Triceps: Bench Press, Dips   │
//! │ Squat:       Legs               │       │ Legs:    Squat               │
//! └─────────────────────────────────┘       └──────────────────────────────┘
//! ```
//!
//! Visible order is the preference list first (groups with members only),
//! then every other group in the order it was first encountered.

use std::collections::{HashMap, HashSet};

use crate::models::{GroupedView, Record, Target};

/// Index records by group.
///
/// Each group's members are sorted by name in code-point order; ties keep
/// input order. A record is listed once per group even when several of its
/// targets share that group. Groups are compared by exact string.
///
/// The input is never modified; indexing the same slice twice yields equal
/// views.
pub fn index<S: AsRef<str>>(records: &[Record], preferred_order: &[S]) -> GroupedView {
    let mut groups: HashMap<String, Vec<Record>> = preferred_order
        .iter()
        .map(|group| (group.as_ref().to_string(), Vec::new()))
        .collect();
    let mut first_seen: Vec<String> = Vec::new();

    for record in records {
        let mut record_groups: HashSet<&str> = HashSet::new();

        for target in record.targets() {
            if !record_groups.insert(target.group.as_str()) {
                continue;
            }

            groups
                .entry(target.group.clone())
                .or_insert_with(|| {
                    first_seen.push(target.group.clone());
                    Vec::new()
                })
                .push(record.clone());
        }
    }

    for members in groups.values_mut() {
        members.sort_by(|a, b| a.name().cmp(b.name()));
    }

    let order = visible_order(&groups, preferred_order, &first_seen);
    GroupedView::new(groups, order)
}

/// Preference list entries with members, then the rest in first-seen order.
fn visible_order<S: AsRef<str>>(
    groups: &HashMap<String, Vec<Record>>,
    preferred_order: &[S],
    first_seen: &[String],
) -> Vec<String> {
    let has_members = |group: &str| groups.get(group).is_some_and(|m| !m.is_empty());
    let mut listed: HashSet<&str> = HashSet::new();

    let preferred = preferred_order
        .iter()
        .map(|group| group.as_ref())
        .filter(|group| listed.insert(*group));
    let extras = first_seen.iter().map(String::as_str);

    preferred
        .chain(extras)
        .filter(|group| has_members(*group))
        .map(str::to_string)
        .collect()
}

/// Targets of `record` within `group`, in source order.
///
/// Used to render the subregion chips of one exercise under one heading.
pub fn targets_for_group<'a>(record: &'a Record, group: &'a str) -> Vec<&'a Target> {
    record.targets_in(group).collect()
}
