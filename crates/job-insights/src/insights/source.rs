use super::domain::{Company, IndustryLink, Posting};
use serde::Serialize;
use std::fmt;

/// The three relations the aggregation views read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Postings,
    IndustryLinks,
    Companies,
}

impl Relation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Postings => "postings",
            Self::IndustryLinks => "industry links",
            Self::Companies => "companies",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Failure to read a relation from the backing store.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    #[error("relation '{0}' does not exist")]
    MissingRelation(Relation),
    #[error("failed to read {relation}: {source}")]
    Io {
        relation: Relation,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {relation} data: {source}")]
    Csv {
        relation: Relation,
        #[source]
        source: csv::Error,
    },
}

/// Read-only access to the posting dataset.
///
/// Every call reads the relation afresh; implementations must not cache
/// between calls so repeated views always reflect the current contents.
pub trait JobDataSource: Send + Sync {
    fn postings(&self) -> Result<Vec<Posting>, SourceError>;
    fn industry_links(&self) -> Result<Vec<IndustryLink>, SourceError>;
    fn companies(&self) -> Result<Vec<Company>, SourceError>;
}

/// Relations held in memory, used for inline payloads and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    pub postings: Vec<Posting>,
    pub industry_links: Vec<IndustryLink>,
    pub companies: Vec<Company>,
}

impl InMemoryDataSource {
    pub fn new(
        postings: Vec<Posting>,
        industry_links: Vec<IndustryLink>,
        companies: Vec<Company>,
    ) -> Self {
        Self {
            postings,
            industry_links,
            companies,
        }
    }
}

impl JobDataSource for InMemoryDataSource {
    fn postings(&self) -> Result<Vec<Posting>, SourceError> {
        Ok(self.postings.clone())
    }

    fn industry_links(&self) -> Result<Vec<IndustryLink>, SourceError> {
        Ok(self.industry_links.clone())
    }

    fn companies(&self) -> Result<Vec<Company>, SourceError> {
        Ok(self.companies.clone())
    }
}
