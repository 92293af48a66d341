//! REST API types for display clients.
//!
//! The grouped view is flattened into ordered sections so clients can render
//! headings and chips without re-deriving anything.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::GroupedView;
use crate::transform::grouper::targets_for_group;
use crate::transform::pipeline::CatalogResult;

/// Response sent after a catalog has been parsed and grouped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    /// Unique request identifier
    pub request_id: String,

    /// RFC 3339 time the view was computed
    pub generated_at: String,

    /// Records decoded from the catalog
    pub total_records: usize,

    /// Rows dropped for having fewer than 3 fields
    pub skipped_rows: usize,

    /// Visible group names, in display order
    pub group_order: Vec<String>,

    /// One section per visible group, same order as `group_order`
    pub groups: Vec<GroupPayload>,
}

/// One group heading and its exercises.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupPayload {
    pub group: String,
    pub exercises: Vec<ExercisePayload>,
}

/// One exercise as shown under a group heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExercisePayload {
    pub name: String,
    /// Non-empty subregions of this exercise within the group
    pub subregions: Vec<String>,
}

impl CatalogResponse {
    pub fn from_view(view: &GroupedView, total_records: usize, skipped_rows: usize) -> Self {
        let groups = view
            .sections()
            .into_iter()
            .map(|section| GroupPayload {
                group: section.group.to_string(),
                exercises: section
                    .records
                    .iter()
                    .map(|record| ExercisePayload {
                        name: record.name().to_string(),
                        subregions: targets_for_group(record, section.group)
                            .into_iter()
                            .filter(|t| !t.subregion.is_empty())
                            .map(|t| t.subregion.clone())
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            request_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            total_records,
            skipped_rows,
            group_order: view.order().to_vec(),
            groups,
        }
    }
}

impl From<CatalogResult> for CatalogResponse {
    fn from(result: CatalogResult) -> Self {
        Self::from_view(&result.view, result.info.record_count, result.info.skipped_rows)
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "requestId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "groupOrder": [],
        "groups": []
    })
}
