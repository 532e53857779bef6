use crate::app::ports::HttpClientPort;
use crate::config::SheetsConfig;
use crate::error::{DashboardError, Result};
use crate::metrics::SheetMetrics;
use crate::sheets::export::parse_csv;
use crate::sheets::sections::{parse_main_sheet, parse_outreach, summarize_outreach, MainSheetSections};
use crate::sheets::{defaults, OutreachRow, SocialsReport};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Builds the socials report from the spreadsheet's main and emails tabs.
pub struct SocialsUseCase {
    http: Arc<dyn HttpClientPort>,
    config: SheetsConfig,
}

impl SocialsUseCase {
    pub fn new(http: Arc<dyn HttpClientPort>, config: SheetsConfig) -> Self {
        Self { http, config }
    }

    /// Never fails: an unreachable main tab yields the default datasets,
    /// and each empty section falls back to its own defaults.
    #[instrument(skip(self))]
    pub async fn load(&self) -> SocialsReport {
        let main_url = self.config.main_url();
        let emails_url = self.config.emails_url();
        let (main, emails) = tokio::join!(
            self.fetch_rows("main", &main_url),
            self.fetch_rows("emails", &emails_url)
        );

        let main = match main {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Main sheet unavailable, serving defaults: {}", e);
                return Self::assemble(MainSheetSections::default(), Vec::new(), false);
            }
        };

        let outreach = match emails {
            Ok(rows) => parse_outreach(&rows),
            Err(e) => {
                warn!("Emails sheet unavailable: {}", e);
                Vec::new()
            }
        };

        let report = Self::assemble(parse_main_sheet(&main), outreach, true);
        info!(
            "Loaded socials: {} campaigns, {} LinkedIn months, {} X months, {} outreach rows",
            report.cold_emails.len(),
            report.linked_in.len(),
            report.x.len(),
            report.outreach.len()
        );
        report
    }

    async fn fetch_rows(&self, tab: &'static str, url: &str) -> Result<Vec<Vec<String>>> {
        let result = self.fetch_csv(url).await;
        SheetMetrics::record_fetch(tab, result.is_ok());
        result
    }

    async fn fetch_csv(&self, url: &str) -> Result<Vec<Vec<String>>> {
        let resp = self.http.get(url).await?;
        if !resp.is_success() {
            return Err(DashboardError::Api {
                status: resp.status,
                message: format!("sheet export returned HTTP {}", resp.status),
            });
        }
        // A private sheet answers 200 with the sign-in page
        if resp.content_type.starts_with("text/html") {
            return Err(DashboardError::Api {
                status: resp.status,
                message: "sheet export returned HTML, is the sheet shared publicly?".to_string(),
            });
        }
        parse_csv(&resp.text())
    }

    fn assemble(sections: MainSheetSections, outreach: Vec<OutreachRow>, is_live: bool) -> SocialsReport {
        let outreach = non_empty_or(outreach, defaults::outreach);
        SocialsReport {
            cold_emails: non_empty_or(sections.cold_emails, defaults::cold_emails),
            linked_in: non_empty_or(sections.linked_in, defaults::linked_in),
            outreach_summary: summarize_outreach(&outreach),
            outreach,
            x: non_empty_or(sections.x, defaults::x),
            is_live,
        }
    }
}

fn non_empty_or<T>(values: Vec<T>, fallback: fn() -> Vec<T>) -> Vec<T> {
    if values.is_empty() {
        fallback()
    } else {
        values
    }
}
