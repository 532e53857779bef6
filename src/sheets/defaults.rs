use crate::sheets::sections::LINKEDIN_ENGAGEMENT;
use crate::sheets::{ColdEmailCampaign, LinkedInMonth, OutreachRow, XMonth};

pub fn cold_emails() -> Vec<ColdEmailCampaign> {
    vec![
        ColdEmailCampaign {
            campaign: "Commodity Brokers".to_string(),
            sent: 9997,
            replies: 2,
            rate: 0.02,
        },
        ColdEmailCampaign {
            campaign: "LinkedIn Leads".to_string(),
            sent: 254,
            replies: 0,
            rate: 0.0,
        },
    ]
}

pub fn outreach() -> Vec<OutreachRow> {
    [
        ("Deepwater MGT", "Green Bitcoin Mining", 7, "Sent"),
        ("Pantera Capital", "Green Bitcoin Mining", 14, "Sent"),
        ("Abu Dhabi Dev Holding", "Copper Cathode", 0, "Drafted"),
        ("Temasek", "Copper Cathode", 4, "Sent"),
    ]
    .into_iter()
    .map(|(company, project, emails, status)| OutreachRow {
        company: company.to_string(),
        project: project.to_string(),
        emails,
        replies: 0,
        status: status.to_string(),
    })
    .collect()
}

pub fn linked_in() -> Vec<LinkedInMonth> {
    [("Sep 25", 2213, 67), ("Oct 25", 23352, 245), ("Nov 25", 5156, 190), ("Dec 25", 12429, 233)]
        .into_iter()
        .map(|(month, impressions, page_views)| LinkedInMonth {
            month: month.to_string(),
            impressions,
            engagement_rate: LINKEDIN_ENGAGEMENT.to_string(),
            page_views,
            followers: 630,
        })
        .collect()
}

pub fn x() -> Vec<XMonth> {
    [
        ("Sep 25", 2213, 7.7, 171, 15, 32, 11, 8),
        ("Oct 25", 23352, 3.1, 746, 9, 76, 140, 19),
        ("Nov 25", 5156, 16.6, 860, 73, 232, 58, 95),
        ("Dec 25", 12429, 6.2, 772, 26, 128, 210, 11),
    ]
    .into_iter()
    .map(
        |(month, impressions, engagement_rate, likes, replies, retweets, reposts, shares)| XMonth {
            month: month.to_string(),
            impressions,
            engagement_rate,
            likes,
            replies,
            retweets,
            reposts,
            shares,
        },
    )
    .collect()
}
