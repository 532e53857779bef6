//! Prometheus metrics for report and sheet traffic.
//!
//! The recorder is installed once; `/metrics` renders through the stored
//! handle so no separate exporter listener is needed.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing::{info, warn};

static HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

pub const REPORTS_TOTAL: &str = "dashboard_reports_total";
pub const REPORT_FALLBACKS_TOTAL: &str = "dashboard_report_fallbacks_total";
pub const REPORT_DURATION_SECONDS: &str = "dashboard_report_duration_seconds";
pub const SHEET_FETCH_TOTAL: &str = "dashboard_sheet_fetch_total";

/// Install the global recorder. Idempotent; returns the render handle when
/// installation succeeded.
pub fn init_metrics() -> Option<PrometheusHandle> {
    HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                describe();
                info!("Prometheus recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Failed to install Prometheus recorder: {}", e);
                None
            }
        })
        .clone()
}

fn describe() {
    ::metrics::describe_counter!(REPORTS_TOTAL, "GA report requests by report and data source");
    ::metrics::describe_counter!(
        REPORT_FALLBACKS_TOTAL,
        "GA report requests answered with fallback data because the upstream call failed"
    );
    ::metrics::describe_histogram!(REPORT_DURATION_SECONDS, "Time spent producing a GA report");
    ::metrics::describe_counter!(SHEET_FETCH_TOTAL, "Spreadsheet CSV export fetches by tab and outcome");
}

/// Metrics for the GA report endpoints
pub struct ReportMetrics;

impl ReportMetrics {
    pub fn record_served(report: &'static str, source: &'static str, duration_secs: f64) {
        ::metrics::counter!(REPORTS_TOTAL, "report" => report, "source" => source).increment(1);
        ::metrics::histogram!(REPORT_DURATION_SECONDS, "report" => report).record(duration_secs);
    }

    pub fn record_fallback(report: &'static str) {
        ::metrics::counter!(REPORT_FALLBACKS_TOTAL, "report" => report).increment(1);
    }
}

/// Metrics for the spreadsheet exports
pub struct SheetMetrics;

impl SheetMetrics {
    pub fn record_fetch(tab: &'static str, ok: bool) {
        let outcome = if ok { "ok" } else { "error" };
        ::metrics::counter!(SHEET_FETCH_TOTAL, "tab" => tab, "outcome" => outcome).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        ReportMetrics::record_served("overview", "mock", 0.01);
        ReportMetrics::record_fallback("overview");
        SheetMetrics::record_fetch("main", false);
    }

    #[test]
    fn test_metric_names_are_prefixed() {
        for name in [REPORTS_TOTAL, REPORT_FALLBACKS_TOTAL, REPORT_DURATION_SECONDS, SHEET_FETCH_TOTAL] {
            assert!(name.starts_with("dashboard_"));
        }
    }
}
