//! Heuristic extraction of the socials and outreach blocks from the
//! marketing spreadsheet.
//!
//! The main tab is free-form: a "Cold Emails" block, a LinkedIn block and an
//! X analytics block stacked vertically, each introduced by a label row. Blocks
//! are located by scanning for those labels (the last matching row wins) and
//! read until a terminator row.

use crate::sheets::{ColdEmailCampaign, LinkedInMonth, OutreachRow, OutreachSummary, XMonth};
use once_cell::sync::Lazy;
use regex::Regex;

const DEFAULT_FOLLOWERS: i64 = 630;
const CAMPAIGN_NAME_MAX: usize = 25;
/// The LinkedIn block has no engagement column
pub const LINKEDIN_ENGAGEMENT: &str = "0%";

static MONTH_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+\s+[0-9]+").expect("valid regex"));
static TRAILING_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+[0-9]{4}$").expect("valid regex"));
static FIRST_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid regex"));
static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?").expect("valid regex")
});

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// First cell when non-empty, else the second
fn cell_or<'a>(row: &'a [String], idx: usize, fallback: usize) -> &'a str {
    match cell(row, idx) {
        "" => cell(row, fallback),
        value => value,
    }
}

/// Leading integer after stripping thousands separators and units; 0 when absent.
pub fn parse_num(raw: &str) -> i64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let (sign, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, cleaned.as_str()),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// Leading float of a percentage cell such as `7.7%`; 0 when absent.
pub fn parse_percent(raw: &str) -> f64 {
    let stripped = raw.replacen('%', "", 1);
    LEADING_FLOAT
        .find(stripped.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}

/// Whether a first cell names a month row, e.g. `Oct 25` or `October 2025`
pub fn is_month_row(first_cell: &str) -> bool {
    MONTH_ROW.is_match(first_cell)
}

/// `October 2025` -> `Oct 25`, `Sep 25` -> `Sep 25`
///
/// Four-digit years are cut to their last two digits so sheet rows line up
/// with the default datasets; the browser dashboard used to show `Oct 2025`.
/// Only ASCII digits count, so stray Unicode numerals never split a char.
pub fn month_label(raw: &str) -> String {
    let without_year = TRAILING_YEAR.replace(raw, "");
    let prefix: String = without_year.chars().take(3).collect();
    let year = FIRST_DIGITS.find(raw).map(|m| m.as_str()).unwrap_or("25");
    let year = if year.len() == 4 { &year[2..] } else { year };
    format!("{} {}", prefix, year)
}

/// Header row of the X analytics table: `<month>, Impressions, Engagement rate, ...`
fn is_x_header(row: &[String]) -> bool {
    cell(row, 1).to_lowercase() == "impressions" && cell(row, 2).to_lowercase().contains("engagement")
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SectionStarts {
    pub cold_email: Option<usize>,
    pub linkedin: Option<usize>,
    pub x_analytics: Option<usize>,
}

pub fn find_sections(rows: &[Vec<String>]) -> SectionStarts {
    let mut starts = SectionStarts::default();
    for (idx, row) in rows.iter().enumerate() {
        let first = cell(row, 0).to_lowercase();
        if first.contains("cold email") {
            starts.cold_email = Some(idx);
        }
        if first.contains("linkedin") || cell(row, 1).to_lowercase().contains("content") {
            starts.linkedin = Some(idx);
        }
        if first.contains("x analytics") || first.contains("twitter") || is_x_header(row) {
            starts.x_analytics = Some(idx);
        }
    }
    starts
}

pub fn parse_cold_emails(rows: &[Vec<String>], start: usize) -> Vec<ColdEmailCampaign> {
    let mut campaigns = Vec::new();
    for row in rows.iter().skip(start + 1) {
        let first = cell(row, 0);
        let lower = first.to_lowercase();
        if first.is_empty() || lower.contains("personalised") || lower.contains("linkedin") {
            break;
        }

        let sent = parse_num(cell_or(row, 2, 3));
        if sent <= 0 {
            continue;
        }
        let replies = parse_num(cell_or(row, 3, 4));
        let rate = (replies as f64 / sent as f64 * 100.0 * 100.0).round() / 100.0;
        campaigns.push(ColdEmailCampaign {
            campaign: cell_or(row, 1, 0).chars().take(CAMPAIGN_NAME_MAX).collect(),
            sent,
            replies,
            rate,
        });
    }
    campaigns
}

pub fn parse_linkedin(rows: &[Vec<String>], start: usize) -> Vec<LinkedInMonth> {
    let mut months = Vec::new();
    for row in rows.iter().skip(start + 1) {
        if is_x_header(row) {
            break;
        }
        let first = cell(row, 0);
        if first.is_empty() || !is_month_row(first) {
            continue;
        }
        let followers = match parse_num(cell(row, 3)) {
            0 => DEFAULT_FOLLOWERS,
            n => n,
        };
        months.push(LinkedInMonth {
            month: month_label(first),
            impressions: parse_num(cell(row, 1)),
            engagement_rate: LINKEDIN_ENGAGEMENT.to_string(),
            page_views: parse_num(cell(row, 2)),
            followers,
        });
    }
    months
}

pub fn parse_x_analytics(rows: &[Vec<String>], start: usize) -> Vec<XMonth> {
    rows.iter()
        .skip(start + 1)
        .filter(|row| {
            let first = cell(row, 0);
            !first.is_empty() && is_month_row(first)
        })
        .map(|row| XMonth {
            month: month_label(cell(row, 0)),
            impressions: parse_num(cell(row, 1)),
            engagement_rate: parse_percent(cell(row, 2)),
            likes: parse_num(cell(row, 3)),
            replies: parse_num(cell(row, 4)),
            retweets: parse_num(cell(row, 5)),
            reposts: parse_num(cell(row, 7)),
            shares: parse_num(cell(row, 8)),
        })
        .collect()
}

/// Outreach tab: header row, then `company, project, emails, replies, status`.
pub fn parse_outreach(rows: &[Vec<String>]) -> Vec<OutreachRow> {
    rows.iter()
        .skip(1)
        .filter_map(|row| {
            let company = cell(row, 0).trim();
            if company.chars().count() <= 2 || company.to_lowercase().contains("total") {
                return None;
            }
            Some(OutreachRow {
                company: company.to_string(),
                project: cell(row, 1).trim().to_string(),
                emails: parse_num(cell(row, 2)),
                replies: parse_num(cell(row, 3)),
                status: cell(row, 4).trim().to_string(),
            })
        })
        .collect()
}

pub fn summarize_outreach(rows: &[OutreachRow]) -> OutreachSummary {
    let mut summary = OutreachSummary::default();
    for row in rows {
        let status = row.status.to_lowercase();
        if status.contains("sent") {
            summary.sent_companies += 1;
            summary.sent_emails += row.emails;
        }
        if status.contains("drafted") {
            summary.drafted += 1;
        }
        if status.contains("todo") {
            summary.todo += 1;
        }
        if row.replies > 0 {
            summary.replied += 1;
        }
    }
    summary
}

/// Sections found on the main tab; empty when the block is missing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MainSheetSections {
    pub cold_emails: Vec<ColdEmailCampaign>,
    pub linked_in: Vec<LinkedInMonth>,
    pub x: Vec<XMonth>,
}

pub fn parse_main_sheet(rows: &[Vec<String>]) -> MainSheetSections {
    let starts = find_sections(rows);
    MainSheetSections {
        cold_emails: starts
            .cold_email
            .map(|s| parse_cold_emails(rows, s))
            .unwrap_or_default(),
        linked_in: starts.linkedin.map(|s| parse_linkedin(rows, s)).unwrap_or_default(),
        x: starts.x_analytics.map(|s| parse_x_analytics(rows, s)).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::export::parse_csv;

    const MAIN_SHEET: &str = r#""Cold Emails","Campaign","Sent","Replies",""
"Batch 1","Commodity Brokers, Worldwide Q4","9,997","2",""
"Batch 2","","","",""
"Batch 3","LinkedIn Leads","254","0",""
"Personalised Outreach","","","",""
"LinkedIn Page","Content Impressions","Page Views","Followers",""
"Sep 2025","2,213","67","",""
"October 2025","23,352","245","641",""
"notes","","","",""
"Nov 25","5,156","190","650",""
"Month","Impressions","Engagement rate","Likes","Replies","Retweets","Bookmarks","Reposts","Shares"
"Sep 25","2213","7.7%","171","15","32","4","11","8"
"Oct 25","23352","3.1%","746","9","76","2","140","19"
"","","","","","","","",""
"Dec 25","12429","n/a","772","26","128","1","210","11"
"#;

    fn main_rows() -> Vec<Vec<String>> {
        parse_csv(MAIN_SHEET).unwrap()
    }

    #[test]
    fn test_parse_num() {
        assert_eq!(parse_num("9,997"), 9997);
        assert_eq!(parse_num("12.7"), 12);
        assert_eq!(parse_num("$1,200 USD"), 1200);
        assert_eq!(parse_num("-42"), -42);
        assert_eq!(parse_num(""), 0);
        assert_eq!(parse_num("-"), 0);
        assert_eq!(parse_num("n/a"), 0);
        assert_eq!(parse_num(".5"), 0);
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("7.7%"), 7.7);
        assert_eq!(parse_percent(" 16.6 %"), 16.6);
        assert_eq!(parse_percent("n/a"), 0.0);
        assert_eq!(parse_percent(""), 0.0);
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label("Sep 25"), "Sep 25");
        assert_eq!(month_label("September 2025"), "Sep 25");
        assert_eq!(month_label("December 2025"), "Dec 25");
        assert_eq!(month_label("Oct 2025 (partial)"), "Oct 25");
        assert_eq!(month_label("Oct 1\u{0967}"), "Oct 1");
        assert!(!is_month_row("Oct \u{0967}\u{0968}"));
    }

    #[test]
    fn test_unicode_numerals_in_month_cells_do_not_panic() {
        let rows = parse_csv("X Analytics\nOct 1\u{0967},100,1%\nNov \u{0967}\u{0968}\u{0969}\u{096A},5,2%\n").unwrap();
        let sections = parse_main_sheet(&rows);
        assert_eq!(sections.x.len(), 1);
        assert_eq!(sections.x[0].month, "Oct 1");
        assert_eq!(sections.x[0].impressions, 100);
        assert_eq!(sections.x[0].engagement_rate, 1.0);
    }

    #[test]
    fn test_find_sections_last_match_wins() {
        let rows = main_rows();
        let starts = find_sections(&rows);
        assert_eq!(starts.cold_email, Some(0));
        // "Personalised Outreach" row does not match; the LinkedIn label row does
        assert_eq!(starts.linkedin, Some(5));
        assert_eq!(starts.x_analytics, Some(10));
    }

    #[test]
    fn test_cold_emails_stop_at_personalised_block() {
        let campaigns = parse_cold_emails(&main_rows(), 0);
        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].campaign, "Commodity Brokers, Worldw");
        assert_eq!(campaigns[0].sent, 9997);
        assert_eq!(campaigns[0].replies, 2);
        assert_eq!(campaigns[0].rate, 0.02);
        assert_eq!(campaigns[1].campaign, "LinkedIn Leads");
        assert_eq!(campaigns[1].rate, 0.0);
    }

    #[test]
    fn test_cold_email_falls_back_to_next_column() {
        let rows = parse_csv("Cold Email\nBatch A,,,120,6\n").unwrap();
        let campaigns = parse_cold_emails(&rows, 0);
        assert_eq!(campaigns[0].campaign, "Batch A");
        assert_eq!(campaigns[0].sent, 120);
        assert_eq!(campaigns[0].replies, 120);
    }

    #[test]
    fn test_linkedin_stops_at_x_header() {
        let months = parse_linkedin(&main_rows(), 5);
        let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, vec!["Sep 25", "Oct 25", "Nov 25"]);
        assert_eq!(months[0].impressions, 2213);
        assert_eq!(months[0].followers, 630);
        assert_eq!(months[1].followers, 641);
        assert_eq!(months[2].page_views, 190);
        assert!(months.iter().all(|m| m.engagement_rate == "0%"));
    }

    #[test]
    fn test_x_analytics_reads_to_end() {
        let months = parse_x_analytics(&main_rows(), 10);
        assert_eq!(months.len(), 3);
        assert_eq!(months[0].engagement_rate, 7.7);
        assert_eq!(months[1].reposts, 140);
        assert_eq!(months[1].shares, 19);
        assert_eq!(months[2].month, "Dec 25");
        assert_eq!(months[2].engagement_rate, 0.0);
    }

    #[test]
    fn test_parse_main_sheet_without_sections() {
        let rows = parse_csv("foo,bar\nbaz,qux\n").unwrap();
        assert_eq!(parse_main_sheet(&rows), MainSheetSections::default());
    }

    #[test]
    fn test_outreach_rows_and_summary() {
        let rows = parse_csv(
            "Company,Project,Emails,Replies,Status\n\
             Deepwater MGT,Green Bitcoin Mining,7,0,Sent\n\
             Temasek,Copper Cathode,4,1,Sent - replied\n\
             AB,Tiny,1,0,Sent\n\
             Abu Dhabi Dev Holding,Copper Cathode,0,0,Drafted\n\
             Grand Total,,11,1,\n\
             Northwind,,0,0,TODO\n\
             Contoso,Zinc,0,0,Replied\n",
        )
        .unwrap();
        let outreach = parse_outreach(&rows);
        let companies: Vec<&str> = outreach.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(
            companies,
            vec!["Deepwater MGT", "Temasek", "Abu Dhabi Dev Holding", "Northwind", "Contoso"]
        );

        let summary = summarize_outreach(&outreach);
        assert_eq!(summary.sent_companies, 2);
        assert_eq!(summary.sent_emails, 11);
        assert_eq!(summary.drafted, 1);
        assert_eq!(summary.todo, 1);
        // status alone does not count as a reply
        assert_eq!(summary.replied, 1);
    }

    #[test]
    fn test_replied_status_without_replies_is_not_counted() {
        let row = OutreachRow {
            company: "Contoso".to_string(),
            project: "Zinc".to_string(),
            emails: 2,
            replies: 0,
            status: "Replied".to_string(),
        };
        assert_eq!(summarize_outreach(&[row.clone()]).replied, 0);
        assert_eq!(summarize_outreach(&[OutreachRow { replies: 3, ..row }]).replied, 1);
    }
}
