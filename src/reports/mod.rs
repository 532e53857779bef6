//! GA4 report catalogue: which queries each dashboard panel runs and how the
//! resulting rows are reshaped.

pub mod mock;
pub mod records;
pub mod wire;

use crate::constants::{DEFAULT_END_DATE, DEFAULT_START_DATE};
use crate::error::{DashboardError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub use records::{OverviewResponse, ReportData};
pub use wire::{RunReportRequest, RunReportResponse};

static DAYS_AGO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+daysAgo$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Overview,
    Monthly,
    Countries,
    Cities,
    Devices,
    Pages,
    Events,
    Sources,
    Demographics,
}

impl ReportKind {
    pub const ALL: [ReportKind; 9] = [
        ReportKind::Overview,
        ReportKind::Monthly,
        ReportKind::Countries,
        ReportKind::Cities,
        ReportKind::Devices,
        ReportKind::Pages,
        ReportKind::Events,
        ReportKind::Sources,
        ReportKind::Demographics,
    ];

    /// Route segment and config key
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Overview => "overview",
            ReportKind::Monthly => "monthly",
            ReportKind::Countries => "countries",
            ReportKind::Cities => "cities",
            ReportKind::Devices => "devices",
            ReportKind::Pages => "pages",
            ReportKind::Events => "events",
            ReportKind::Sources => "sources",
            ReportKind::Demographics => "demographics",
        }
    }

    /// The `runReport` bodies this panel needs, in the order `shape` expects.
    pub fn queries(&self, range: &DateRange) -> Vec<RunReportRequest> {
        let base = || RunReportRequest::new(&range.start_date, &range.end_date);
        let ranked = |dimension: &str, metrics: &[&str], limit: u32| {
            base()
                .dimension(dimension)
                .metrics(metrics)
                .order_by_metric_desc(metrics[0])
                .limit(limit)
        };

        match self {
            ReportKind::Overview => vec![base().metrics(&[
                "activeUsers",
                "sessions",
                "screenPageViews",
                "eventCount",
                "averageSessionDuration",
                "bounceRate",
                "newUsers",
                "engagedSessions",
            ])],
            ReportKind::Monthly => vec![base()
                .dimension("yearMonth")
                .metrics(&["activeUsers", "screenPageViews", "eventCount", "sessions"])
                .order_by_dimension("yearMonth")],
            ReportKind::Countries => vec![ranked("country", &["activeUsers"], 10)],
            ReportKind::Cities => vec![ranked("city", &["activeUsers"], 10)],
            ReportKind::Devices => vec![base().dimension("deviceCategory").metrics(&["activeUsers"])],
            ReportKind::Pages => vec![ranked("pagePath", &["screenPageViews", "activeUsers"], 10)],
            ReportKind::Events => vec![ranked("eventName", &["eventCount"], 50)],
            ReportKind::Sources => ["sessionDefaultChannelGroup", "sessionSource", "sessionMedium"]
                .into_iter()
                .map(|dim| ranked(dim, &["activeUsers", "sessions"], 10))
                .collect(),
            ReportKind::Demographics => ["browser", "operatingSystem", "screenResolution", "language"]
                .into_iter()
                .map(|dim| ranked(dim, &["activeUsers"], 8))
                .collect(),
        }
    }

    pub fn query_count(&self) -> usize {
        match self {
            ReportKind::Sources => 3,
            ReportKind::Demographics => 4,
            _ => 1,
        }
    }

    /// Multi-query panels render partial data; single-query panels need rows.
    pub fn is_composite(&self) -> bool {
        self.query_count() > 1
    }

    /// Reshape the responses of `queries`. `None` means there was nothing to
    /// show and the caller should fall back.
    pub fn shape(&self, responses: &[RunReportResponse]) -> Option<ReportData> {
        if responses.len() != self.query_count() {
            return None;
        }
        if !self.is_composite() && !responses[0].has_rows() {
            return None;
        }

        let data = match self {
            ReportKind::Overview => ReportData::Overview(OverviewResponse {
                overview: records::overview_from_row(&responses[0].rows[0]),
                is_live: true,
                no_rows: false,
                error: None,
            }),
            ReportKind::Monthly => ReportData::Monthly(records::monthly(&responses[0])),
            ReportKind::Countries => ReportData::Countries(records::countries(&responses[0])),
            ReportKind::Cities => ReportData::Cities(records::cities(&responses[0])),
            ReportKind::Devices => ReportData::Devices(records::devices(&responses[0])),
            ReportKind::Pages => ReportData::Pages(records::pages(&responses[0])),
            ReportKind::Events => ReportData::Events(records::events(&responses[0])),
            ReportKind::Sources => ReportData::Sources(records::sources(
                &responses[0],
                &responses[1],
                &responses[2],
            )),
            ReportKind::Demographics => ReportData::Demographics(records::demographics(
                &responses[0],
                &responses[1],
                &responses[2],
                &responses[3],
            )),
        };
        Some(data)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        ReportKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| DashboardError::UnknownReport(s.to_string()))
    }
}

/// Query-string date window, in any form the GA4 Data API accepts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(default = "default_start_date")]
    pub start_date: String,
    #[serde(default = "default_end_date")]
    pub end_date: String,
}

fn default_start_date() -> String {
    DEFAULT_START_DATE.to_string()
}

fn default_end_date() -> String {
    DEFAULT_END_DATE.to_string()
}

impl Default for DateRange {
    fn default() -> Self {
        Self { start_date: default_start_date(), end_date: default_end_date() }
    }
}

impl DateRange {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self { start_date: start_date.into(), end_date: end_date.into() }
    }

    pub fn validate(&self) -> Result<()> {
        validate_date(&self.start_date)?;
        validate_date(&self.end_date)
    }
}

fn validate_date(value: &str) -> Result<()> {
    let ok = matches!(value, "today" | "yesterday")
        || DAYS_AGO.is_match(value)
        || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    if ok {
        Ok(())
    } else {
        Err(DashboardError::InvalidDate(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::wire::{Row, Value};

    #[test]
    fn test_report_names_round_trip() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.name().parse::<ReportKind>().unwrap(), kind);
        }
        assert!(matches!(
            "bounces".parse::<ReportKind>(),
            Err(DashboardError::UnknownReport(_))
        ));
    }

    #[test]
    fn test_query_count_matches_queries() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.queries(&DateRange::default()).len(), kind.query_count());
        }
    }

    #[test]
    fn test_date_validation() {
        assert!(DateRange::default().validate().is_ok());
        assert!(DateRange::new("2025-10-01", "yesterday").validate().is_ok());
        assert!(DateRange::new("7daysAgo", "today").validate().is_ok());
        assert!(DateRange::new("2025-13-01", "today").validate().is_err());
        assert!(DateRange::new("daysAgo", "today").validate().is_err());
        assert!(DateRange::new("\u{0967}\u{0968}daysAgo", "today").validate().is_err());
        assert!(DateRange::new("today", "'; drop").validate().is_err());
    }

    #[test]
    fn test_query_shapes() {
        let range = DateRange::new("2025-10-01", "2025-12-31");

        let overview = ReportKind::Overview.queries(&range);
        assert_eq!(overview.len(), 1);
        assert!(overview[0].dimensions.is_empty());
        assert_eq!(overview[0].metrics.len(), 8);

        let events = &ReportKind::Events.queries(&range)[0];
        assert_eq!(events.limit, Some(50));
        assert_eq!(events.date_ranges[0].start_date, "2025-10-01");

        let demographics = ReportKind::Demographics.queries(&range);
        assert_eq!(demographics.len(), 4);
        assert!(demographics.iter().all(|q| q.limit == Some(8)));

        assert_eq!(ReportKind::Sources.queries(&range)[2].dimensions[0].name, "sessionMedium");
        assert_eq!(ReportKind::Devices.queries(&range)[0].order_bys.len(), 0);
    }

    #[test]
    fn test_shape_requires_rows_for_single_query() {
        assert!(ReportKind::Cities.shape(&[RunReportResponse::default()]).is_none());
        // wrong number of responses
        assert!(ReportKind::Sources.shape(&[RunReportResponse::default()]).is_none());

        let empty = vec![RunReportResponse::default(); 3];
        match ReportKind::Sources.shape(&empty) {
            Some(ReportData::Sources(report)) => assert!(report.channels.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_shape_overview_marks_live() {
        let resp = RunReportResponse {
            rows: vec![Row {
                dimension_values: vec![],
                metric_values: ["10", "20", "30", "40", "12.5", "0.25", "5", "6"]
                    .iter()
                    .map(|v| Value { value: v.to_string() })
                    .collect(),
            }],
            row_count: Some(1),
        };
        match ReportKind::Overview.shape(&[resp]) {
            Some(ReportData::Overview(o)) => {
                assert!(o.is_live);
                assert_eq!(o.overview.page_views, 30);
                assert!((o.overview.bounce_rate - 25.0).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
