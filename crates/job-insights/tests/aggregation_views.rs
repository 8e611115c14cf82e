use job_insights::insights::aggregation::{
    postings_by_company_size, postings_by_industry, postings_by_work_type, top_titles_by_count,
    top_titles_by_salary,
};
use job_insights::insights::domain::{Company, IndustryId, IndustryLink, Posting};
use job_insights::insights::views::ViewOutcome;
use job_insights::insights::{InMemoryDataSource, JobDataSource, Relation, SourceError};
use std::collections::HashMap;

fn posting(id: i64, title: &str, salary: Option<f64>) -> Posting {
    Posting {
        id,
        title: title.to_string(),
        company_name: None,
        work_type: None,
        median_salary: salary,
    }
}

fn link(posting_id: i64, industry: i64) -> IndustryLink {
    IndustryLink {
        posting_id,
        industry_id: IndustryId(industry),
    }
}

fn company(name: &str, size: Option<&str>) -> Company {
    Company {
        name: name.to_string(),
        size_bucket: size.map(str::to_string),
    }
}

/// Industry 1 carries 12 distinct titles where title `T{n}` has `n` postings.
/// Industry 2 carries three titles with mixed salary reporting.
fn ranked_dataset() -> InMemoryDataSource {
    let mut postings = Vec::new();
    let mut links = Vec::new();
    let mut next_id = 1;

    for n in 1..=12 {
        for _ in 0..n {
            postings.push(posting(next_id, &format!("T{n:02}"), Some(1_000.0 * n as f64)));
            links.push(link(next_id, 1));
            next_id += 1;
        }
    }

    for (title, salary) in [
        ("Analyst", None),
        ("Director", Some(150_000.0)),
        ("Clerk", Some(40_000.0)),
        ("Intern", None),
    ] {
        postings.push(posting(next_id, title, salary));
        links.push(link(next_id, 2));
        next_id += 1;
    }

    InMemoryDataSource::new(postings, links, Vec::new())
}

#[test]
fn worked_example_matches_expected_rankings() {
    let source = InMemoryDataSource::new(
        vec![
            posting(1, "Engineer", Some(90_000.0)),
            posting(2, "Engineer", Some(90_000.0)),
            posting(3, "Manager", Some(120_000.0)),
        ],
        vec![link(1, 5), link(2, 5), link(3, 5)],
        Vec::new(),
    );

    let counts: Vec<(String, usize)> = top_titles_by_count(&source, 10)
        .expect("count view")
        .into_rows()
        .into_iter()
        .map(|row| (row.title, row.job_count))
        .collect();
    assert_eq!(
        counts,
        vec![("Engineer".to_string(), 2), ("Manager".to_string(), 1)]
    );

    let salaries: Vec<(String, Option<f64>)> = top_titles_by_salary(&source, 10)
        .expect("salary view")
        .into_rows()
        .into_iter()
        .map(|row| (row.title, row.med_salary))
        .collect();
    assert_eq!(
        salaries,
        vec![
            ("Manager".to_string(), Some(120_000.0)),
            ("Engineer".to_string(), Some(90_000.0)),
        ]
    );
}

#[test]
fn count_view_keeps_top_ten_per_industry() {
    let source = ranked_dataset();
    let rows = top_titles_by_count(&source, 10)
        .expect("count view")
        .into_rows();

    let industry_one: Vec<_> = rows
        .iter()
        .filter(|row| row.industry == IndustryId(1))
        .collect();
    assert_eq!(industry_one.len(), 10);

    // T01 and T02 have the fewest postings and must be the ones cut.
    let smallest_kept = industry_one
        .iter()
        .map(|row| row.job_count)
        .min()
        .expect("rows kept");
    assert_eq!(smallest_kept, 3);
    assert!(industry_one
        .iter()
        .all(|row| row.title != "T01" && row.title != "T02"));

    let counts: Vec<usize> = industry_one.iter().map(|row| row.job_count).collect();
    let mut sorted = counts.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(counts, sorted);
}

#[test]
fn count_view_orders_by_industry_then_count() {
    let source = ranked_dataset();
    let rows = top_titles_by_count(&source, 10)
        .expect("count view")
        .into_rows();

    let industries: Vec<IndustryId> = rows.iter().map(|row| row.industry).collect();
    let mut sorted = industries.clone();
    sorted.sort();
    assert_eq!(industries, sorted);

    // Industry 2 has fewer than ten titles: all four come back, ties by title.
    let industry_two: Vec<&str> = rows
        .iter()
        .filter(|row| row.industry == IndustryId(2))
        .map(|row| row.title.as_str())
        .collect();
    assert_eq!(industry_two, vec!["Analyst", "Clerk", "Director", "Intern"]);
}

#[test]
fn salary_view_places_nulls_last() {
    let source = ranked_dataset();
    let rows = top_titles_by_salary(&source, 10)
        .expect("salary view")
        .into_rows();

    let industry_two: Vec<(&str, Option<f64>)> = rows
        .iter()
        .filter(|row| row.industry == IndustryId(2))
        .map(|row| (row.title.as_str(), row.med_salary))
        .collect();
    assert_eq!(
        industry_two,
        vec![
            ("Director", Some(150_000.0)),
            ("Clerk", Some(40_000.0)),
            ("Analyst", None),
            ("Intern", None),
        ]
    );

    let industry_one = rows
        .iter()
        .filter(|row| row.industry == IndustryId(1))
        .count();
    assert_eq!(industry_one, 10);
}

#[test]
fn salary_view_cuts_unreported_titles_past_the_limit() {
    let mut postings = Vec::new();
    let mut links = Vec::new();
    let mut next_id = 1;

    // Industry 7: twelve salaried titles outrank three unreported ones.
    // Industry 8: eight salaried titles leave room for two of four unreported ones.
    let layout: [(i64, usize, &[&str]); 2] = [
        (7, 12, &["N1", "N2", "N3"]),
        (8, 8, &["Zed", "Amy", "Kim", "Bo"]),
    ];
    for (industry, salaried, unreported) in layout {
        for n in 1..=salaried {
            postings.push(posting(next_id, &format!("S{n:02}"), Some(10_000.0 * n as f64)));
            links.push(link(next_id, industry));
            next_id += 1;
        }
        for title in unreported {
            postings.push(posting(next_id, title, None));
            links.push(link(next_id, industry));
            next_id += 1;
        }
    }

    let source = InMemoryDataSource::new(postings, links, Vec::new());
    let rows = top_titles_by_salary(&source, 10)
        .expect("salary view")
        .into_rows();

    let industry_seven: Vec<_> = rows
        .iter()
        .filter(|row| row.industry == IndustryId(7))
        .collect();
    assert_eq!(industry_seven.len(), 10);
    assert!(industry_seven.iter().all(|row| row.med_salary.is_some()));
    assert_eq!(industry_seven[0].title, "S12");
    assert_eq!(industry_seven[9].title, "S03");

    let industry_eight: Vec<(&str, Option<f64>)> = rows
        .iter()
        .filter(|row| row.industry == IndustryId(8))
        .map(|row| (row.title.as_str(), row.med_salary))
        .collect();
    assert_eq!(industry_eight.len(), 10);
    assert!(industry_eight[..8].iter().all(|(_, salary)| salary.is_some()));
    assert_eq!(&industry_eight[8..], &[("Amy", None), ("Bo", None)]);
}

#[test]
fn ranking_depth_is_configurable() {
    let source = ranked_dataset();
    let rows = top_titles_by_count(&source, 3)
        .expect("count view")
        .into_rows();

    let industry_one: Vec<&str> = rows
        .iter()
        .filter(|row| row.industry == IndustryId(1))
        .map(|row| row.title.as_str())
        .collect();
    assert_eq!(industry_one, vec!["T12", "T11", "T10"]);
}

#[test]
fn industry_totals_match_joined_postings() {
    let source = ranked_dataset();
    let rows = postings_by_industry(&source)
        .expect("industry view")
        .into_rows();

    let total: usize = rows.iter().map(|row| row.job_count).sum();
    assert_eq!(total, source.industry_links.len());
    assert_eq!(rows[0].industry, IndustryId(1));
    assert_eq!(rows[0].job_count, 78);
    assert_eq!(rows[1].job_count, 4);
}

#[test]
fn industry_view_drops_links_to_unknown_postings() {
    let source = InMemoryDataSource::new(
        vec![posting(1, "Engineer", None)],
        vec![link(1, 4), link(99, 4), link(98, 7)],
        Vec::new(),
    );
    let rows = postings_by_industry(&source)
        .expect("industry view")
        .into_rows();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].industry, IndustryId(4));
    assert_eq!(rows[0].job_count, 1);
}

#[test]
fn work_type_totals_skip_missing_types() {
    let work_types = [
        Some("Full-time"),
        Some("Full-time"),
        Some("Contract"),
        None,
        Some("Part-time"),
        Some("  "),
        Some("Full-time"),
    ];
    let postings = work_types
        .iter()
        .enumerate()
        .map(|(index, work_type)| Posting {
            work_type: work_type.map(str::to_string),
            ..posting(index as i64, "Role", None)
        })
        .collect();
    let source = InMemoryDataSource::new(postings, Vec::new(), Vec::new());

    let rows = postings_by_work_type(&source)
        .expect("work type view")
        .into_rows();
    let total: usize = rows.iter().map(|row| row.job_count).sum();
    assert_eq!(total, 5);

    let ordered: Vec<(&str, usize)> = rows
        .iter()
        .map(|row| (row.work_type.as_str(), row.job_count))
        .collect();
    assert_eq!(
        ordered,
        vec![("Full-time", 3), ("Contract", 1), ("Part-time", 1)]
    );
}

#[test]
fn company_size_joins_on_normalized_names() {
    let names = [
        Some("  ACME Corp "),
        Some("acme corp"),
        Some("Globex"),
        Some("Initech"),
        None,
    ];
    let postings = names
        .iter()
        .enumerate()
        .map(|(index, name)| Posting {
            company_name: name.map(str::to_string),
            ..posting(index as i64, "Role", None)
        })
        .collect();
    let companies = vec![
        company("Acme Corp", Some("7")),
        company("GLOBEX  ", Some("2")),
        company("Umbrella", Some("5")),
    ];
    let source = InMemoryDataSource::new(postings, Vec::new(), companies);

    let rows = postings_by_company_size(&source)
        .expect("company view")
        .into_rows();
    let counts: HashMap<&str, usize> = rows
        .iter()
        .map(|row| (row.company_size.as_str(), row.job_count))
        .collect();

    assert_eq!(counts.len(), 2);
    assert_eq!(counts["7"], 2);
    assert_eq!(counts["2"], 1);
    assert_eq!(rows[0].company_size, "7");
}

#[test]
fn company_size_counts_colliding_names_per_company() {
    let source = InMemoryDataSource::new(
        vec![Posting {
            company_name: Some("Acme".to_string()),
            ..posting(1, "Engineer", None)
        }],
        Vec::new(),
        vec![company("ACME", Some("3")), company("acme ", Some("6"))],
    );

    let rows = postings_by_company_size(&source)
        .expect("company view")
        .into_rows();
    let total: usize = rows.iter().map(|row| row.job_count).sum();
    assert_eq!(total, 2);
}

#[test]
fn company_size_reports_no_data_when_nothing_matches() {
    let source = InMemoryDataSource::new(
        vec![Posting {
            company_name: Some("Nobody Inc".to_string()),
            ..posting(1, "Engineer", None)
        }],
        Vec::new(),
        vec![company("Somebody LLC", Some("4"))],
    );

    let outcome = postings_by_company_size(&source).expect("company view");
    assert_eq!(outcome, ViewOutcome::NoData);
}

#[test]
fn views_are_idempotent() {
    let source = ranked_dataset();

    assert_eq!(
        top_titles_by_count(&source, 10).expect("first"),
        top_titles_by_count(&source, 10).expect("second")
    );
    assert_eq!(
        top_titles_by_salary(&source, 10).expect("first"),
        top_titles_by_salary(&source, 10).expect("second")
    );
    assert_eq!(
        postings_by_industry(&source).expect("first"),
        postings_by_industry(&source).expect("second")
    );
    assert_eq!(
        postings_by_work_type(&source).expect("first"),
        postings_by_work_type(&source).expect("second")
    );
    assert_eq!(
        postings_by_company_size(&source).expect("first"),
        postings_by_company_size(&source).expect("second")
    );
}

#[test]
fn empty_dataset_yields_no_data_everywhere() {
    let source = InMemoryDataSource::default();

    assert!(top_titles_by_count(&source, 10).expect("view").is_no_data());
    assert!(top_titles_by_salary(&source, 10).expect("view").is_no_data());
    assert!(postings_by_company_size(&source).expect("view").is_no_data());
    assert!(postings_by_industry(&source).expect("view").is_no_data());
    assert!(postings_by_work_type(&source).expect("view").is_no_data());
}

struct Offline;

impl JobDataSource for Offline {
    fn postings(&self) -> Result<Vec<Posting>, SourceError> {
        Err(SourceError::Unavailable("warehouse offline".to_string()))
    }

    fn industry_links(&self) -> Result<Vec<IndustryLink>, SourceError> {
        Err(SourceError::MissingRelation(Relation::IndustryLinks))
    }

    fn companies(&self) -> Result<Vec<Company>, SourceError> {
        Err(SourceError::MissingRelation(Relation::Companies))
    }
}

#[test]
fn source_failures_propagate_to_the_caller() {
    let error = top_titles_by_count(&Offline, 10).expect_err("source is offline");
    assert!(matches!(error, SourceError::Unavailable(_)));

    let error = postings_by_work_type(&Offline).expect_err("source is offline");
    assert_eq!(error.to_string(), "data source unavailable: warehouse offline");
}
