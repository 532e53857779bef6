//! Fallback datasets served when GA is unconfigured or unavailable.

use crate::reports::records::*;
use crate::reports::ReportKind;

pub fn overview() -> Overview {
    Overview {
        active_users: 2998,
        sessions: 4521,
        page_views: 6957,
        events: 28182,
        avg_session_duration: 61.5,
        bounce_rate: 45.2,
        new_users: 2654,
        engaged_sessions: 2891,
    }
}

pub fn monthly() -> Vec<MonthlyPoint> {
    [
        ("Oct 25", 530, 778, 5135, 612),
        ("Nov 25", 1600, 2600, 10834, 1890),
        ("Dec 25", 475, 1751, 6501, 892),
        ("Jan 26", 393, 1828, 5712, 1127),
    ]
    .into_iter()
    .map(|(month, active_users, page_views, events, sessions)| MonthlyPoint {
        month: month.to_string(),
        active_users,
        page_views,
        events,
        sessions,
    })
    .collect()
}

pub fn countries() -> Vec<CountryUsers> {
    [
        ("United States", 845, "#13636f"),
        ("China", 523, "#1a7a88"),
        ("United Kingdom", 312, "#2596a8"),
        ("Pakistan", 287, "#3ab0c4"),
        ("Singapore", 198, "#5cc4d4"),
        ("United Arab Emirates", 156, "#7dd3e0"),
        ("Germany", 134, "#a0e2eb"),
        ("Canada", 98, "#c3f0f5"),
    ]
    .into_iter()
    .map(|(country, users, fill)| CountryUsers {
        country: country.to_string(),
        users,
        fill: fill.to_string(),
    })
    .collect()
}

pub fn cities() -> Vec<CityUsers> {
    [
        ("New York", 234),
        ("London", 187),
        ("Singapore", 156),
        ("Dubai", 134),
        ("Shanghai", 112),
        ("Los Angeles", 98),
        ("Karachi", 87),
        ("Toronto", 76),
    ]
    .into_iter()
    .map(|(city, users)| CityUsers { city: city.to_string(), users })
    .collect()
}

pub fn devices() -> Vec<DeviceUsers> {
    [("desktop", 1876, "#13636f"), ("mobile", 987, "#3ab0c4"), ("tablet", 135, "#d4af37")]
        .into_iter()
        .map(|(device, users, fill)| DeviceUsers {
            device: device.to_string(),
            users,
            fill: fill.to_string(),
        })
        .collect()
}

pub fn pages() -> Vec<PageViews> {
    [
        ("/", 2341, 1567),
        ("/about", 876, 654),
        ("/projects", 654, 432),
        ("/contact", 432, 321),
        ("/team", 234, 187),
    ]
    .into_iter()
    .map(|(page, views, users)| PageViews { page: page.to_string(), views, users })
    .collect()
}

pub fn events() -> Vec<EventCount> {
    [
        ("page_view", 5000),
        ("scroll", 3500),
        ("click", 2800),
        ("form_submit", 150),
        ("session_start", 1200),
    ]
    .into_iter()
    .map(|(name, count)| EventCount { event_name: name.to_string(), count })
    .collect()
}

pub fn sources() -> SourcesReport {
    SourcesReport {
        channels: [
            ("Organic Search", 1245, 1890, "#13636f"),
            ("Direct", 876, 1234, "#1a7a88"),
            ("Social", 543, 678, "#3ab0c4"),
            ("Referral", 321, 432, "#5cc4d4"),
            ("Email", 198, 267, "#7dd3e0"),
            ("Paid Search", 87, 123, "#a0e2eb"),
        ]
        .into_iter()
        .map(|(channel, users, sessions, fill)| ChannelTraffic {
            channel: channel.to_string(),
            users,
            sessions,
            fill: fill.to_string(),
        })
        .collect(),
        sources: [
            ("google", 1100, 1650),
            ("(direct)", 876, 1234),
            ("linkedin.com", 320, 410),
            ("twitter.com", 180, 225),
            ("facebook.com", 43, 58),
            ("bing", 89, 134),
            ("yahoo", 56, 78),
        ]
        .into_iter()
        .map(|(source, users, sessions)| SourceTraffic { source: source.to_string(), users, sessions })
        .collect(),
        mediums: [
            ("organic", 1245, 1890),
            ("(none)", 876, 1234),
            ("referral", 543, 678),
            ("social", 321, 432),
            ("email", 198, 267),
            ("cpc", 87, 123),
        ]
        .into_iter()
        .map(|(medium, users, sessions)| MediumTraffic { medium: medium.to_string(), users, sessions })
        .collect(),
    }
}

pub fn demographics() -> DemographicsReport {
    DemographicsReport {
        browsers: [
            ("Chrome", 1245, "#13636f"),
            ("Safari", 567, "#1a7a88"),
            ("Firefox", 234, "#3ab0c4"),
            ("Edge", 189, "#5cc4d4"),
            ("Opera", 45, "#7dd3e0"),
        ]
        .into_iter()
        .map(|(browser, users, fill)| BrowserUsers {
            browser: browser.to_string(),
            users,
            fill: fill.to_string(),
        })
        .collect(),
        operating_systems: [
            ("Windows", 890, "#13636f"),
            ("macOS", 654, "#1a7a88"),
            ("iOS", 432, "#3ab0c4"),
            ("Android", 287, "#5cc4d4"),
            ("Linux", 67, "#7dd3e0"),
        ]
        .into_iter()
        .map(|(os, users, fill)| OsUsers { os: os.to_string(), users, fill: fill.to_string() })
        .collect(),
        screen_resolutions: [
            ("1920x1080", 567),
            ("1366x768", 432),
            ("1536x864", 321),
            ("2560x1440", 234),
            ("1440x900", 156),
        ]
        .into_iter()
        .map(|(resolution, users)| ResolutionUsers { resolution: resolution.to_string(), users })
        .collect(),
        languages: [("en-us", 890), ("en-gb", 234), ("zh-cn", 189), ("es", 134), ("de", 87)]
            .into_iter()
            .map(|(language, users)| LanguageUsers { language: language.to_string(), users })
            .collect(),
    }
}

/// Fallback payload for a report. The overview is marked not-live.
pub fn for_kind(kind: ReportKind) -> ReportData {
    match kind {
        ReportKind::Overview => ReportData::Overview(OverviewResponse {
            overview: overview(),
            is_live: false,
            no_rows: false,
            error: None,
        }),
        ReportKind::Monthly => ReportData::Monthly(monthly()),
        ReportKind::Countries => ReportData::Countries(countries()),
        ReportKind::Cities => ReportData::Cities(cities()),
        ReportKind::Devices => ReportData::Devices(devices()),
        ReportKind::Pages => ReportData::Pages(pages()),
        ReportKind::Events => ReportData::Events(events()),
        ReportKind::Sources => ReportData::Sources(sources()),
        ReportKind::Demographics => ReportData::Demographics(demographics()),
    }
}
