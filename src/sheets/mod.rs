//! Socials and outreach data read from the marketing spreadsheet's CSV export.

pub mod export;
pub mod defaults;
pub mod sections;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColdEmailCampaign {
    pub campaign: String,
    pub sent: i64,
    pub replies: i64,
    /// Reply rate in percent, two decimals
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInMonth {
    pub month: String,
    pub impressions: i64,
    /// Always `0%`; the LinkedIn block carries no engagement column
    pub engagement_rate: String,
    pub page_views: i64,
    pub followers: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XMonth {
    pub month: String,
    pub impressions: i64,
    pub engagement_rate: f64,
    pub likes: i64,
    pub replies: i64,
    pub retweets: i64,
    pub reposts: i64,
    pub shares: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachRow {
    pub company: String,
    pub project: String,
    pub emails: i64,
    pub replies: i64,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachSummary {
    pub sent_companies: usize,
    pub sent_emails: i64,
    pub drafted: usize,
    pub todo: usize,
    pub replied: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialsReport {
    pub cold_emails: Vec<ColdEmailCampaign>,
    #[serde(rename = "linkedIn")]
    pub linked_in: Vec<LinkedInMonth>,
    pub outreach: Vec<OutreachRow>,
    pub outreach_summary: OutreachSummary,
    pub x: Vec<XMonth>,
    /// Main tab fetched and parsed (sections may still be defaults)
    #[serde(rename = "_isLive")]
    pub is_live: bool,
}
