use job_insights::config::parse_top_n;
use job_insights::insights::views::ViewKind;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_top_n_arg(raw: &str) -> Result<usize, String> {
    parse_top_n(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_view(raw: &str) -> Result<ViewKind, String> {
    raw.parse::<ViewKind>().map_err(|err| {
        let available = ViewKind::ordered().map(ViewKind::key).join(", ");
        format!("{err} (available: {available})")
    })
}
