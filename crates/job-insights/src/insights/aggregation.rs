use super::domain::{normalize_company_name, IndustryId, IndustryLink, Posting};
use super::ranking::{descending_nulls_last, top_n_per_partition};
use super::source::{JobDataSource, SourceError};
use super::views::{
    CompanySizeRow, IndustryCountRow, TitleCountRow, TitleSalaryRow, ViewKind, ViewOutcome,
    WorkTypeRow,
};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Top titles per industry ranked by number of postings.
///
/// Ties on count are broken by title ascending.
pub fn top_titles_by_count<S>(
    source: &S,
    top_n: usize,
) -> Result<ViewOutcome<TitleCountRow>, SourceError>
where
    S: JobDataSource + ?Sized,
{
    let postings = source.postings()?;
    let links = source.industry_links()?;

    let mut counts: HashMap<(IndustryId, &str), usize> = HashMap::new();
    for (industry, posting) in join_industries(&postings, &links) {
        *counts.entry((industry, posting.title.as_str())).or_default() += 1;
    }

    let rows: Vec<TitleCountRow> = counts
        .into_iter()
        .map(|((industry, title), job_count)| TitleCountRow {
            industry,
            title: title.to_string(),
            job_count,
        })
        .collect();

    let ranked = top_n_per_partition(
        rows,
        top_n,
        |row: &TitleCountRow| row.industry,
        |a, b| b.job_count.cmp(&a.job_count).then_with(|| a.title.cmp(&b.title)),
    );

    Ok(finish(ViewKind::TopTitlesByCount, ranked))
}

/// Top titles per industry ranked by median salary, unreported salaries last.
///
/// Each (industry, title) pair appears once, carrying the highest median
/// salary reported by any of its postings. Ties are broken by title ascending.
pub fn top_titles_by_salary<S>(
    source: &S,
    top_n: usize,
) -> Result<ViewOutcome<TitleSalaryRow>, SourceError>
where
    S: JobDataSource + ?Sized,
{
    let postings = source.postings()?;
    let links = source.industry_links()?;

    let mut salaries: HashMap<(IndustryId, &str), Option<f64>> = HashMap::new();
    for (industry, posting) in join_industries(&postings, &links) {
        let best = salaries
            .entry((industry, posting.title.as_str()))
            .or_insert(None);
        *best = match (*best, posting.median_salary) {
            (Some(current), Some(candidate)) => Some(current.max(candidate)),
            (current, candidate) => current.or(candidate),
        };
    }

    let rows: Vec<TitleSalaryRow> = salaries
        .into_iter()
        .map(|((industry, title), med_salary)| TitleSalaryRow {
            industry,
            title: title.to_string(),
            med_salary,
        })
        .collect();

    let ranked = top_n_per_partition(
        rows,
        top_n,
        |row: &TitleSalaryRow| row.industry,
        |a, b| {
            descending_nulls_last(a.med_salary, b.med_salary).then_with(|| a.title.cmp(&b.title))
        },
    );

    Ok(finish(ViewKind::TopTitlesBySalary, ranked))
}

/// Posting counts per company size bucket.
///
/// Postings reach companies through normalized name equality. Postings with
/// no matching company are left out, and a posting matching several
/// companies is counted once per match.
pub fn postings_by_company_size<S>(source: &S) -> Result<ViewOutcome<CompanySizeRow>, SourceError>
where
    S: JobDataSource + ?Sized,
{
    let postings = source.postings()?;
    let companies = source.companies()?;

    let mut buckets_by_name: HashMap<String, Vec<Option<&str>>> = HashMap::new();
    for company in &companies {
        buckets_by_name
            .entry(normalize_company_name(&company.name))
            .or_default()
            .push(company.size_bucket.as_deref());
    }

    let colliding = buckets_by_name
        .values()
        .filter(|buckets| buckets.len() > 1)
        .count();
    if colliding > 0 {
        warn!(
            colliding,
            "company names collide after normalization; matching postings are counted per company"
        );
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut unmatched = 0usize;
    for posting in &postings {
        let matches = posting
            .company_name
            .as_deref()
            .and_then(|name| buckets_by_name.get(&normalize_company_name(name)));

        let Some(buckets) = matches else {
            unmatched += 1;
            continue;
        };

        for bucket in buckets.iter().flatten() {
            *counts.entry(*bucket).or_default() += 1;
        }
    }

    if unmatched > 0 {
        debug!(
            unmatched,
            total = postings.len(),
            "postings without a company match"
        );
    }

    let rows: Vec<_> = sort_counts(counts)
        .into_iter()
        .map(|(bucket, job_count)| CompanySizeRow {
            company_size: bucket.to_string(),
            job_count,
        })
        .collect();

    Ok(finish(ViewKind::PostingsByCompanySize, rows))
}

/// Posting counts per industry, one count per industry link.
pub fn postings_by_industry<S>(source: &S) -> Result<ViewOutcome<IndustryCountRow>, SourceError>
where
    S: JobDataSource + ?Sized,
{
    let postings = source.postings()?;
    let links = source.industry_links()?;

    let mut counts: BTreeMap<IndustryId, usize> = BTreeMap::new();
    for (industry, _) in join_industries(&postings, &links) {
        *counts.entry(industry).or_default() += 1;
    }

    let rows: Vec<_> = sort_counts(counts)
        .into_iter()
        .map(|(industry, job_count)| IndustryCountRow {
            industry,
            job_count,
        })
        .collect();

    Ok(finish(ViewKind::PostingsByIndustry, rows))
}

/// Posting counts per work type. Postings without a work type are skipped.
pub fn postings_by_work_type<S>(source: &S) -> Result<ViewOutcome<WorkTypeRow>, SourceError>
where
    S: JobDataSource + ?Sized,
{
    let postings = source.postings()?;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for work_type in postings
        .iter()
        .filter_map(|posting| posting.work_type.as_deref())
        .filter(|work_type| !work_type.trim().is_empty())
    {
        *counts.entry(work_type).or_default() += 1;
    }

    let rows: Vec<_> = sort_counts(counts)
        .into_iter()
        .map(|(work_type, job_count)| WorkTypeRow {
            work_type: work_type.to_string(),
            job_count,
        })
        .collect();

    Ok(finish(ViewKind::PostingsByWorkType, rows))
}

/// Inner join of postings and industry links on posting id.
///
/// Duplicate posting ids multiply like a relational join would.
fn join_industries<'a>(
    postings: &'a [Posting],
    links: &[IndustryLink],
) -> Vec<(IndustryId, &'a Posting)> {
    let mut by_id: HashMap<i64, Vec<&'a Posting>> = HashMap::new();
    for posting in postings {
        by_id.entry(posting.id).or_default().push(posting);
    }

    links
        .iter()
        .filter_map(|link| {
            by_id
                .get(&link.posting_id)
                .map(|matched| (link.industry_id, matched))
        })
        .flat_map(|(industry, matched)| matched.iter().map(move |posting| (industry, *posting)))
        .collect()
}

/// Orders grouped counts descending, breaking ties by key ascending.
fn sort_counts<K: Ord>(counts: BTreeMap<K, usize>) -> Vec<(K, usize)> {
    let mut sorted: Vec<(K, usize)> = counts.into_iter().collect();
    // Stable sort keeps the BTreeMap key order among equal counts.
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

fn finish<T>(kind: ViewKind, rows: Vec<T>) -> ViewOutcome<T> {
    debug!(view = %kind, rows = rows.len(), "view computed");
    ViewOutcome::from_rows(rows)
}
