//! Court case record.

use crate::model::subject::Subject;
use serde::{Deserialize, Serialize};

/// Numeric case id. Higher ids are more recent.
pub type CaseId = u64;

/// Seeded case reference shown on case cards and used for case briefs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: CaseId,
    pub case_name: String,
    pub citation: String,
    pub subject: Subject,
}
