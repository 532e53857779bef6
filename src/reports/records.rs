//! Dashboard-facing records and the row reshaping that produces them.
//!
//! Field names serialize to the camelCase keys the frontend charts read.

use crate::constants::{self, CATEGORY_PALETTE, COUNTRY_PALETTE, MONTH_NAMES};
use crate::reports::wire::{Row, RunReportResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub active_users: i64,
    pub sessions: i64,
    pub page_views: i64,
    pub events: i64,
    pub avg_session_duration: f64,
    pub bounce_rate: f64,
    pub new_users: i64,
    pub engaged_sessions: i64,
}

/// Overview plus the liveness markers the dashboard shows next to the KPIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewResponse {
    #[serde(flatten)]
    pub overview: Overview,
    #[serde(rename = "_isLive")]
    pub is_live: bool,
    #[serde(rename = "_noRows", default, skip_serializing_if = "std::ops::Not::not")]
    pub no_rows: bool,
    #[serde(rename = "_error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub month: String,
    pub active_users: i64,
    pub page_views: i64,
    pub events: i64,
    pub sessions: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryUsers {
    pub country: String,
    pub users: i64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityUsers {
    pub city: String,
    pub users: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceUsers {
    pub device: String,
    pub users: i64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageViews {
    pub page: String,
    pub views: i64,
    pub users: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCount {
    pub event_name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelTraffic {
    pub channel: String,
    pub users: i64,
    pub sessions: i64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTraffic {
    pub source: String,
    pub users: i64,
    pub sessions: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediumTraffic {
    pub medium: String,
    pub users: i64,
    pub sessions: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcesReport {
    pub channels: Vec<ChannelTraffic>,
    pub sources: Vec<SourceTraffic>,
    pub mediums: Vec<MediumTraffic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserUsers {
    pub browser: String,
    pub users: i64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsUsers {
    pub os: String,
    pub users: i64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionUsers {
    pub resolution: String,
    pub users: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageUsers {
    pub language: String,
    pub users: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicsReport {
    pub browsers: Vec<BrowserUsers>,
    pub operating_systems: Vec<OsUsers>,
    pub screen_resolutions: Vec<ResolutionUsers>,
    pub languages: Vec<LanguageUsers>,
}

/// Payload of any report, serialized without a wrapper
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportData {
    Overview(OverviewResponse),
    Monthly(Vec<MonthlyPoint>),
    Countries(Vec<CountryUsers>),
    Cities(Vec<CityUsers>),
    Devices(Vec<DeviceUsers>),
    Pages(Vec<PageViews>),
    Events(Vec<EventCount>),
    Sources(SourcesReport),
    Demographics(DemographicsReport),
}

fn palette_fill(palette: &[&str], idx: usize) -> String {
    palette[idx % palette.len()].to_string()
}

/// `202510` -> `Oct 25`; anything malformed is passed through untouched.
pub fn month_label(year_month: &str) -> String {
    let label = year_month.get(2..4).zip(year_month.get(4..6)).and_then(|(year, month)| {
        let month: usize = month.parse().ok()?;
        let name = MONTH_NAMES.get(month.checked_sub(1)?)?;
        Some(format!("{} {}", name, year))
    });
    label.unwrap_or_else(|| year_month.to_string())
}

pub fn overview_from_row(row: &Row) -> Overview {
    Overview {
        active_users: row.metric_i64(0),
        sessions: row.metric_i64(1),
        page_views: row.metric_i64(2),
        events: row.metric_i64(3),
        avg_session_duration: row.metric_f64(4),
        bounce_rate: row.metric_f64(5) * 100.0,
        new_users: row.metric_i64(6),
        engaged_sessions: row.metric_i64(7),
    }
}

pub fn monthly(resp: &RunReportResponse) -> Vec<MonthlyPoint> {
    resp.rows
        .iter()
        .map(|row| MonthlyPoint {
            month: month_label(row.dimension(0)),
            active_users: row.metric_i64(0),
            page_views: row.metric_i64(1),
            events: row.metric_i64(2),
            sessions: row.metric_i64(3),
        })
        .collect()
}

pub fn countries(resp: &RunReportResponse) -> Vec<CountryUsers> {
    resp.rows
        .iter()
        .enumerate()
        .map(|(idx, row)| CountryUsers {
            country: row.dimension(0).to_string(),
            users: row.metric_i64(0),
            fill: palette_fill(&COUNTRY_PALETTE, idx),
        })
        .collect()
}

pub fn cities(resp: &RunReportResponse) -> Vec<CityUsers> {
    resp.rows
        .iter()
        .map(|row| CityUsers { city: row.dimension(0).to_string(), users: row.metric_i64(0) })
        .collect()
}

pub fn devices(resp: &RunReportResponse) -> Vec<DeviceUsers> {
    resp.rows
        .iter()
        .map(|row| DeviceUsers {
            device: row.dimension(0).to_string(),
            users: row.metric_i64(0),
            fill: constants::device_fill(row.dimension(0)).to_string(),
        })
        .collect()
}

pub fn pages(resp: &RunReportResponse) -> Vec<PageViews> {
    resp.rows
        .iter()
        .map(|row| PageViews {
            page: row.dimension(0).to_string(),
            views: row.metric_i64(0),
            users: row.metric_i64(1),
        })
        .collect()
}

pub fn events(resp: &RunReportResponse) -> Vec<EventCount> {
    resp.rows
        .iter()
        .map(|row| EventCount { event_name: row.dimension(0).to_string(), count: row.metric_i64(0) })
        .collect()
}

pub fn sources(
    channels: &RunReportResponse,
    sources: &RunReportResponse,
    mediums: &RunReportResponse,
) -> SourcesReport {
    SourcesReport {
        channels: channels
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| ChannelTraffic {
                channel: row.dimension(0).to_string(),
                users: row.metric_i64(0),
                sessions: row.metric_i64(1),
                fill: palette_fill(&CATEGORY_PALETTE, idx),
            })
            .collect(),
        sources: sources
            .rows
            .iter()
            .map(|row| SourceTraffic {
                source: row.dimension(0).to_string(),
                users: row.metric_i64(0),
                sessions: row.metric_i64(1),
            })
            .collect(),
        mediums: mediums
            .rows
            .iter()
            .map(|row| MediumTraffic {
                medium: row.dimension(0).to_string(),
                users: row.metric_i64(0),
                sessions: row.metric_i64(1),
            })
            .collect(),
    }
}

pub fn demographics(
    browsers: &RunReportResponse,
    operating_systems: &RunReportResponse,
    resolutions: &RunReportResponse,
    languages: &RunReportResponse,
) -> DemographicsReport {
    DemographicsReport {
        browsers: browsers
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| BrowserUsers {
                browser: row.dimension(0).to_string(),
                users: row.metric_i64(0),
                fill: palette_fill(&CATEGORY_PALETTE, idx),
            })
            .collect(),
        operating_systems: operating_systems
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| OsUsers {
                os: row.dimension(0).to_string(),
                users: row.metric_i64(0),
                fill: palette_fill(&CATEGORY_PALETTE, idx),
            })
            .collect(),
        screen_resolutions: resolutions
            .rows
            .iter()
            .map(|row| ResolutionUsers {
                resolution: row.dimension(0).to_string(),
                users: row.metric_i64(0),
            })
            .collect(),
        languages: languages
            .rows
            .iter()
            .map(|row| LanguageUsers {
                language: row.dimension(0).to_string(),
                users: row.metric_i64(0),
            })
            .collect(),
    }
}
