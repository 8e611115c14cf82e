use crate::infra::{parse_top_n_arg, parse_view};
use clap::Args;
use job_insights::config::AppConfig;
use job_insights::error::AppError;
use job_insights::insights::views::ViewKind;
use job_insights::insights::{
    CsvDataSource, DashboardSection, DashboardService, DashboardSnapshot, SectionOutcome,
    ViewSection,
};
use job_insights::telemetry;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Directory holding job_postings.csv, job_industries.csv and companies.csv
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Titles kept per industry in the ranked views (defaults to INSIGHTS_TOP_N)
    #[arg(long, value_parser = parse_top_n_arg)]
    pub(crate) top_n: Option<usize>,
    /// Print the snapshot as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ViewArgs {
    /// View key, e.g. top_titles_by_count or postings_by_work_type
    #[arg(value_parser = parse_view)]
    pub(crate) view: ViewKind,
    /// Directory holding the CSV exports
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Titles kept per industry in the ranked views
    #[arg(long, value_parser = parse_top_n_arg)]
    pub(crate) top_n: Option<usize>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        data_dir,
        top_n,
        json,
    } = args;

    let service = load_service(data_dir, top_n)?;
    let snapshot = service.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        for line in render_snapshot(&snapshot) {
            println!("{line}");
        }
    }

    Ok(())
}

pub(crate) fn run_view(args: ViewArgs) -> Result<(), AppError> {
    let ViewArgs {
        view,
        data_dir,
        top_n,
    } = args;

    let service = load_service(data_dir, top_n)?;
    let section = service.try_section(view)?;
    println!("{}", serde_json::to_string_pretty(&section)?);

    Ok(())
}

fn load_service(
    data_dir: Option<PathBuf>,
    top_n: Option<usize>,
) -> Result<DashboardService<CsvDataSource>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let data_dir = data_dir.unwrap_or(config.data.data_dir);
    let top_n = top_n.unwrap_or(config.data.top_n);

    Ok(DashboardService::new(
        Arc::new(CsvDataSource::new(data_dir)),
        top_n,
    ))
}

pub(crate) fn render_snapshot(snapshot: &DashboardSnapshot) -> Vec<String> {
    let mut lines = vec![
        "Job posting insights".to_string(),
        format!(
            "Generated {}",
            snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    ];

    for section in &snapshot.sections {
        lines.push(String::new());
        lines.push(section.title().to_string());
        if section.kind().is_ranked() {
            lines.push(format!("Top {} titles per industry", snapshot.top_n));
        }
        match section {
            ViewSection::TitleCounts(section) => render_section(&mut lines, section, |row| {
                format!(
                    "- industry {} | {} | {} posting{}",
                    row.industry,
                    row.title,
                    row.job_count,
                    plural(row.job_count)
                )
            }),
            ViewSection::TitleSalaries(section) => render_section(&mut lines, section, |row| {
                let salary = match row.med_salary {
                    Some(value) => format!("{value:.0}"),
                    None => "salary not reported".to_string(),
                };
                format!("- industry {} | {} | {}", row.industry, row.title, salary)
            }),
            ViewSection::CompanySizes(section) => render_section(&mut lines, section, |row| {
                format!(
                    "- size {}: {} posting{}",
                    row.company_size,
                    row.job_count,
                    plural(row.job_count)
                )
            }),
            ViewSection::Industries(section) => render_section(&mut lines, section, |row| {
                format!(
                    "- industry {}: {} posting{}",
                    row.industry,
                    row.job_count,
                    plural(row.job_count)
                )
            }),
            ViewSection::WorkTypes(section) => render_section(&mut lines, section, |row| {
                format!(
                    "- {}: {} posting{}",
                    row.work_type,
                    row.job_count,
                    plural(row.job_count)
                )
            }),
        }
    }

    lines
}

fn render_section<T, F>(lines: &mut Vec<String>, section: &DashboardSection<T>, render_row: F)
where
    F: Fn(&T) -> String,
{
    match &section.outcome {
        SectionOutcome::Data { rows } => lines.extend(rows.iter().map(render_row)),
        SectionOutcome::NoData => lines.push("No data available for this view.".to_string()),
        SectionOutcome::Failed { error } => lines.push(format!("Unavailable: {error}")),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
