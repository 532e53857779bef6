//! Fixed values shared across reports, sheets and the HTTP surface.

/// Default GA4 property queried when a report has no override
pub const DEFAULT_PROPERTY_ID: &str = "461877498";

/// Property holding the traffic-source, event and demographic data
pub const MARKETING_PROPERTY_ID: &str = "472271698";

pub const DEFAULT_START_DATE: &str = "90daysAgo";
pub const DEFAULT_END_DATE: &str = "today";

pub const GA_API_BASE: &str = "https://analyticsdata.googleapis.com/v1beta";
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";

pub const DEFAULT_CREDENTIALS_FILE: &str = "ga-credentials.json";
pub const DEFAULT_PORT: u16 = 3001;

// Google Sheets holding the socials and outreach tabs
pub const SPREADSHEET_ID: &str = "1FpAsnmjFK60DZ5NHlwaRTXo0LNH1EgI7_NjKsdw-FOs";
pub const MAIN_SHEET_GID: &str = "707588878";
pub const EMAILS_SHEET_GID: &str = "1842333950";

/// Palette for ranked country rows
pub const COUNTRY_PALETTE: [&str; 10] = [
    "#13636f", "#1a7a88", "#2596a8", "#3ab0c4", "#5cc4d4", "#7dd3e0", "#a0e2eb", "#c3f0f5",
    "#e0f7fa", "#f0fbfc",
];

/// Palette for channel, browser and operating-system rows
pub const CATEGORY_PALETTE: [&str; 8] = [
    "#13636f", "#1a7a88", "#2596a8", "#3ab0c4", "#5cc4d4", "#7dd3e0", "#a0e2eb", "#c3f0f5",
];

pub const DEVICE_FILL_DEFAULT: &str = "#667085";

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Fill colour for a GA device category
pub fn device_fill(category: &str) -> &'static str {
    match category.to_lowercase().as_str() {
        "desktop" => "#13636f",
        "mobile" => "#3ab0c4",
        "tablet" => "#d4af37",
        _ => DEVICE_FILL_DEFAULT,
    }
}

/// CSV export URL for one tab of a spreadsheet
pub fn sheet_csv_url(spreadsheet_id: &str, gid: &str) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv&gid={}",
        spreadsheet_id, gid
    )
}
