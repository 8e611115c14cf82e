use serde::{Deserialize, Serialize};
use std::fmt;

/// Warehouse identifier of an industry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndustryId(pub i64);

impl fmt::Display for IndustryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One job advertisement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub id: i64,
    pub title: String,
    pub company_name: Option<String>,
    pub work_type: Option<String>,
    pub median_salary: Option<f64>,
}

/// Many-to-many association between postings and industries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryLink {
    pub posting_id: i64,
    pub industry_id: IndustryId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub size_bucket: Option<String>,
}

/// Key used to match postings to companies: trimmed and lower-cased.
///
/// There is no stable company identifier in the source tables, so two distinct
/// companies sharing a normalized name both match every posting carrying it.
pub fn normalize_company_name(value: &str) -> String {
    value.trim().to_lowercase()
}
