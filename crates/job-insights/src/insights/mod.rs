pub mod aggregation;
mod csv_source;
mod dashboard;
pub mod domain;
pub mod ranking;
mod router;
mod source;
pub mod views;

pub use csv_source::{
    parse_companies, parse_industry_links, parse_postings, CsvDataSource, COMPANIES_FILE,
    INDUSTRY_LINKS_FILE, POSTINGS_FILE,
};
pub use dashboard::{
    DashboardSection, DashboardService, DashboardSnapshot, SectionOutcome, ViewSection,
};
pub use router::{insights_router, PreviewRequest, RankingParams};
pub use source::{InMemoryDataSource, JobDataSource, Relation, SourceError};
