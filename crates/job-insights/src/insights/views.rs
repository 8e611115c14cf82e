use super::domain::IndustryId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleCountRow {
    pub industry: IndustryId,
    pub title: String,
    pub job_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleSalaryRow {
    pub industry: IndustryId,
    pub title: String,
    pub med_salary: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanySizeRow {
    pub company_size: String,
    pub job_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustryCountRow {
    pub industry: IndustryId,
    pub job_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkTypeRow {
    pub work_type: String,
    pub job_count: usize,
}

/// Rows produced by a view, or the explicit signal that nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewOutcome<T> {
    Data { rows: Vec<T> },
    NoData,
}

impl<T> ViewOutcome<T> {
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            Self::NoData
        } else {
            Self::Data { rows }
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Self::Data { rows } => rows,
            Self::NoData => &[],
        }
    }

    pub fn into_rows(self) -> Vec<T> {
        match self {
            Self::Data { rows } => rows,
            Self::NoData => Vec::new(),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// The five dashboard views, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    TopTitlesByCount,
    TopTitlesBySalary,
    PostingsByCompanySize,
    PostingsByIndustry,
    PostingsByWorkType,
}

impl ViewKind {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::TopTitlesByCount,
            Self::TopTitlesBySalary,
            Self::PostingsByCompanySize,
            Self::PostingsByIndustry,
            Self::PostingsByWorkType,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::TopTitlesByCount => "top_titles_by_count",
            Self::TopTitlesBySalary => "top_titles_by_salary",
            Self::PostingsByCompanySize => "postings_by_company_size",
            Self::PostingsByIndustry => "postings_by_industry",
            Self::PostingsByWorkType => "postings_by_work_type",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::TopTitlesByCount => "Most Posted Job Titles by Industry",
            Self::TopTitlesBySalary => "Best Paid Job Titles by Industry",
            Self::PostingsByCompanySize => "Postings by Company Size",
            Self::PostingsByIndustry => "Postings by Industry",
            Self::PostingsByWorkType => "Postings by Work Type",
        }
    }

    /// Column names handed to the chart renderer. Must stay stable.
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::TopTitlesByCount => &["industry", "title", "job_count"],
            Self::TopTitlesBySalary => &["industry", "title", "med_salary"],
            Self::PostingsByCompanySize => &["company_size", "job_count"],
            Self::PostingsByIndustry => &["industry", "job_count"],
            Self::PostingsByWorkType => &["work_type", "job_count"],
        }
    }

    pub const fn chart(self) -> ChartHint {
        match self {
            Self::TopTitlesByCount => ChartHint::Bar {
                x: "industry",
                y: "job_count",
                color: Some("title"),
            },
            Self::TopTitlesBySalary => ChartHint::Bar {
                x: "industry",
                y: "med_salary",
                color: Some("title"),
            },
            Self::PostingsByCompanySize => ChartHint::Pie {
                names: "company_size",
                values: "job_count",
            },
            Self::PostingsByIndustry => ChartHint::Bar {
                x: "industry",
                y: "job_count",
                color: None,
            },
            Self::PostingsByWorkType => ChartHint::Pie {
                names: "work_type",
                values: "job_count",
            },
        }
    }

    pub const fn is_ranked(self) -> bool {
        matches!(self, Self::TopTitlesByCount | Self::TopTitlesBySalary)
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view '{0}'")]
pub struct UnknownView(pub String);

impl FromStr for ViewKind {
    type Err = UnknownView;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|kind| kind.key() == normalized)
            .ok_or_else(|| UnknownView(value.to_string()))
    }
}

/// Which columns a renderer should map to which chart channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartHint {
    Bar {
        x: &'static str,
        y: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<&'static str>,
    },
    Pie {
        names: &'static str,
        values: &'static str,
    },
}
