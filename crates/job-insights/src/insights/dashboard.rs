use super::aggregation;
use super::source::{JobDataSource, SourceError};
use super::views::{
    ChartHint, CompanySizeRow, IndustryCountRow, TitleCountRow, TitleSalaryRow, ViewKind,
    ViewOutcome, WorkTypeRow,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Computes the dashboard views against an injected data source.
pub struct DashboardService<S> {
    source: Arc<S>,
    top_n: usize,
}

impl<S> Clone for DashboardService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            top_n: self.top_n,
        }
    }
}

impl<S> DashboardService<S>
where
    S: JobDataSource + 'static,
{
    pub fn new(source: Arc<S>, top_n: usize) -> Self {
        Self { source, top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Same source, different ranking depth.
    pub fn with_top_n(&self, top_n: usize) -> Self {
        Self {
            source: Arc::clone(&self.source),
            top_n,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Computes one view, propagating source failures to the caller.
    pub fn try_section(&self, kind: ViewKind) -> Result<ViewSection, SourceError> {
        let source = self.source.as_ref();
        let section = match kind {
            ViewKind::TopTitlesByCount => ViewSection::TitleCounts(DashboardSection::new(
                kind,
                aggregation::top_titles_by_count(source, self.top_n)?.into(),
            )),
            ViewKind::TopTitlesBySalary => ViewSection::TitleSalaries(DashboardSection::new(
                kind,
                aggregation::top_titles_by_salary(source, self.top_n)?.into(),
            )),
            ViewKind::PostingsByCompanySize => ViewSection::CompanySizes(DashboardSection::new(
                kind,
                aggregation::postings_by_company_size(source)?.into(),
            )),
            ViewKind::PostingsByIndustry => ViewSection::Industries(DashboardSection::new(
                kind,
                aggregation::postings_by_industry(source)?.into(),
            )),
            ViewKind::PostingsByWorkType => ViewSection::WorkTypes(DashboardSection::new(
                kind,
                aggregation::postings_by_work_type(source)?.into(),
            )),
        };

        Ok(section)
    }

    /// Computes one view. Source failures are captured in the section.
    pub fn section(&self, kind: ViewKind) -> ViewSection {
        self.try_section(kind).unwrap_or_else(|err| {
            warn!(view = %kind, error = %err, "view could not be computed");
            ViewSection::failed(kind, &err)
        })
    }

    /// Computes every view independently; one failing view leaves the others intact.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let sections: Vec<ViewSection> = ViewKind::ordered()
            .into_iter()
            .map(|kind| self.section(kind))
            .collect();

        let failed = sections.iter().filter(|section| section.is_failed()).count();
        info!(
            top_n = self.top_n,
            failed,
            sections = sections.len(),
            "dashboard snapshot computed"
        );

        DashboardSnapshot {
            generated_at: Utc::now(),
            top_n: self.top_n,
            sections,
        }
    }
}

/// Per-view result as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome<T> {
    Data { rows: Vec<T> },
    NoData,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSection<T> {
    pub view: ViewKind,
    pub title: &'static str,
    pub columns: &'static [&'static str],
    pub chart: ChartHint,
    pub outcome: SectionOutcome<T>,
}

impl<T> From<ViewOutcome<T>> for SectionOutcome<T> {
    fn from(outcome: ViewOutcome<T>) -> Self {
        match outcome {
            ViewOutcome::Data { rows } => Self::Data { rows },
            ViewOutcome::NoData => Self::NoData,
        }
    }
}

impl<T> DashboardSection<T> {
    fn new(kind: ViewKind, outcome: SectionOutcome<T>) -> Self {
        Self {
            view: kind,
            title: kind.title(),
            columns: kind.columns(),
            chart: kind.chart(),
            outcome,
        }
    }

    pub fn rows(&self) -> &[T] {
        match &self.outcome {
            SectionOutcome::Data { rows } => rows,
            SectionOutcome::NoData | SectionOutcome::Failed { .. } => &[],
        }
    }
}

/// A computed section of any of the five views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewSection {
    TitleCounts(DashboardSection<TitleCountRow>),
    TitleSalaries(DashboardSection<TitleSalaryRow>),
    CompanySizes(DashboardSection<CompanySizeRow>),
    Industries(DashboardSection<IndustryCountRow>),
    WorkTypes(DashboardSection<WorkTypeRow>),
}

impl ViewSection {
    fn failed(kind: ViewKind, error: &SourceError) -> Self {
        fn outcome<T>(error: &SourceError) -> SectionOutcome<T> {
            SectionOutcome::Failed {
                error: error.to_string(),
            }
        }

        match kind {
            ViewKind::TopTitlesByCount => {
                Self::TitleCounts(DashboardSection::new(kind, outcome(error)))
            }
            ViewKind::TopTitlesBySalary => {
                Self::TitleSalaries(DashboardSection::new(kind, outcome(error)))
            }
            ViewKind::PostingsByCompanySize => {
                Self::CompanySizes(DashboardSection::new(kind, outcome(error)))
            }
            ViewKind::PostingsByIndustry => {
                Self::Industries(DashboardSection::new(kind, outcome(error)))
            }
            ViewKind::PostingsByWorkType => {
                Self::WorkTypes(DashboardSection::new(kind, outcome(error)))
            }
        }
    }

    pub fn kind(&self) -> ViewKind {
        match self {
            Self::TitleCounts(section) => section.view,
            Self::TitleSalaries(section) => section.view,
            Self::CompanySizes(section) => section.view,
            Self::Industries(section) => section.view,
            Self::WorkTypes(section) => section.view,
        }
    }

    pub fn title(&self) -> &'static str {
        self.kind().title()
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::TitleCounts(section) => section.rows().len(),
            Self::TitleSalaries(section) => section.rows().len(),
            Self::CompanySizes(section) => section.rows().len(),
            Self::Industries(section) => section.rows().len(),
            Self::WorkTypes(section) => section.rows().len(),
        }
    }

    /// Error message when the view could not be computed.
    pub fn failure(&self) -> Option<&str> {
        fn failure_of<T>(outcome: &SectionOutcome<T>) -> Option<&str> {
            match outcome {
                SectionOutcome::Failed { error } => Some(error.as_str()),
                _ => None,
            }
        }

        match self {
            Self::TitleCounts(section) => failure_of(&section.outcome),
            Self::TitleSalaries(section) => failure_of(&section.outcome),
            Self::CompanySizes(section) => failure_of(&section.outcome),
            Self::Industries(section) => failure_of(&section.outcome),
            Self::WorkTypes(section) => failure_of(&section.outcome),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure().is_some()
    }

    pub fn is_no_data(&self) -> bool {
        !self.is_failed() && self.row_count() == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub top_n: usize,
    pub sections: Vec<ViewSection>,
}

impl DashboardSnapshot {
    pub fn section(&self, kind: ViewKind) -> Option<&ViewSection> {
        self.sections.iter().find(|section| section.kind() == kind)
    }

    pub fn failed_sections(&self) -> usize {
        self.sections
            .iter()
            .filter(|section| section.is_failed())
            .count()
    }
}
