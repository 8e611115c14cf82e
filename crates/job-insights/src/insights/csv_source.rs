use super::domain::{Company, IndustryId, IndustryLink, Posting};
use super::source::{InMemoryDataSource, JobDataSource, Relation, SourceError};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const POSTINGS_FILE: &str = "job_postings.csv";
pub const INDUSTRY_LINKS_FILE: &str = "job_industries.csv";
pub const COMPANIES_FILE: &str = "companies.csv";

/// Reads the three relations from CSV exports in a directory.
///
/// Files are opened on every call, so edits to the exports show up in the
/// next computed view.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    dir: PathBuf,
}

impl CsvDataSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn open(&self, relation: Relation) -> Result<File, SourceError> {
        if !self.dir.is_dir() {
            return Err(SourceError::Unavailable(format!(
                "data directory '{}' not found",
                self.dir.display()
            )));
        }

        let path = self.dir.join(file_name(relation));
        debug!(%relation, path = %path.display(), "reading relation");
        File::open(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => SourceError::MissingRelation(relation),
            _ => SourceError::Io { relation, source },
        })
    }
}

impl JobDataSource for CsvDataSource {
    fn postings(&self) -> Result<Vec<Posting>, SourceError> {
        parse_postings(self.open(Relation::Postings)?)
    }

    fn industry_links(&self) -> Result<Vec<IndustryLink>, SourceError> {
        parse_industry_links(self.open(Relation::IndustryLinks)?)
    }

    fn companies(&self) -> Result<Vec<Company>, SourceError> {
        parse_companies(self.open(Relation::Companies)?)
    }
}

impl InMemoryDataSource {
    /// Parses inline CSV payloads using the same layout as the directory exports.
    pub fn from_csv_readers<P: Read, L: Read, C: Read>(
        postings: P,
        industry_links: L,
        companies: C,
    ) -> Result<Self, SourceError> {
        Ok(Self::new(
            parse_postings(postings)?,
            parse_industry_links(industry_links)?,
            parse_companies(companies)?,
        ))
    }
}

const fn file_name(relation: Relation) -> &'static str {
    match relation {
        Relation::Postings => POSTINGS_FILE,
        Relation::IndustryLinks => INDUSTRY_LINKS_FILE,
        Relation::Companies => COMPANIES_FILE,
    }
}

pub fn parse_postings<R: Read>(reader: R) -> Result<Vec<Posting>, SourceError> {
    read_rows::<_, PostingRow>(reader, Relation::Postings).map(|rows| {
        rows.into_iter()
            .map(|row| Posting {
                id: row.job_id,
                title: row.title,
                company_name: row.company_name,
                work_type: row.formatted_work_type,
                median_salary: row.med_salary,
            })
            .collect()
    })
}

pub fn parse_industry_links<R: Read>(reader: R) -> Result<Vec<IndustryLink>, SourceError> {
    read_rows::<_, IndustryLinkRow>(reader, Relation::IndustryLinks).map(|rows| {
        rows.into_iter()
            .map(|row| IndustryLink {
                posting_id: row.job_id,
                industry_id: IndustryId(row.industry_id),
            })
            .collect()
    })
}

pub fn parse_companies<R: Read>(reader: R) -> Result<Vec<Company>, SourceError> {
    read_rows::<_, CompanyRow>(reader, Relation::Companies).map(|rows| {
        rows.into_iter()
            .map(|row| Company {
                name: row.name,
                size_bucket: row.company_size,
            })
            .collect()
    })
}

fn read_rows<R, T>(reader: R, relation: Relation) -> Result<Vec<T>, SourceError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<T>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| SourceError::Csv { relation, source })
}

#[derive(Debug, Deserialize)]
struct PostingRow {
    job_id: i64,
    #[serde(default)]
    title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    company_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    formatted_work_type: Option<String>,
    #[serde(default, deserialize_with = "optional_salary")]
    med_salary: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct IndustryLinkRow {
    job_id: i64,
    industry_id: i64,
}

#[derive(Debug, Deserialize)]
struct CompanyRow {
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    company_size: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn optional_salary<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = empty_string_as_none(deserializer)? else {
        return Ok(None);
    };

    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| serde::de::Error::custom(format!("invalid med_salary '{raw}'")))?;

    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(serde::de::Error::custom(format!(
            "med_salary must be finite, got '{raw}'"
        )))
    }
}
