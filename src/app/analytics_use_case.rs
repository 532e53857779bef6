use crate::app::ports::AnalyticsPort;
use crate::config::AnalyticsConfig;
use crate::error::{DashboardError, Result};
use crate::metrics::ReportMetrics;
use crate::reports::{mock, DateRange, ReportData, ReportKind, RunReportResponse};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Where a report payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Rows returned by GA
    Live,
    /// GA answered without rows
    Empty,
    /// GA call failed
    Fallback,
    /// GA not configured
    Mock,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Empty => "empty",
            DataSource::Fallback => "fallback",
            DataSource::Mock => "mock",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub kind: ReportKind,
    pub data: ReportData,
    pub source: DataSource,
}

impl ReportOutcome {
    fn mock(kind: ReportKind, source: DataSource) -> Self {
        Self { kind, data: mock::for_kind(kind), source }
    }

    fn empty(kind: ReportKind) -> Self {
        let mut outcome = Self::mock(kind, DataSource::Empty);
        if let ReportData::Overview(overview) = &mut outcome.data {
            overview.no_rows = true;
        }
        outcome
    }

    fn fallback(kind: ReportKind, err: &DashboardError) -> Self {
        let mut outcome = Self::mock(kind, DataSource::Fallback);
        if let ReportData::Overview(overview) = &mut outcome.data {
            overview.error = Some(err.to_string());
        }
        outcome
    }
}

/// Runs GA reports and applies the fallback policy: no client, an upstream
/// error, or an empty single-query report all degrade to mock data.
pub struct AnalyticsUseCase {
    analytics: Option<Arc<dyn AnalyticsPort>>,
    config: AnalyticsConfig,
}

impl AnalyticsUseCase {
    pub fn new(analytics: Option<Arc<dyn AnalyticsPort>>, config: AnalyticsConfig) -> Self {
        Self { analytics, config }
    }

    pub fn is_connected(&self) -> bool {
        self.analytics.is_some()
    }

    pub fn property_for(&self, kind: ReportKind) -> &str {
        self.config.property_for(kind.name())
    }

    #[instrument(skip(self, range), fields(report = %kind, start = %range.start_date, end = %range.end_date))]
    pub async fn report(&self, kind: ReportKind, range: &DateRange) -> ReportOutcome {
        let started = Instant::now();

        let outcome = match &self.analytics {
            None => ReportOutcome::mock(kind, DataSource::Mock),
            Some(client) => match self.fetch(client, kind, range).await {
                Ok(responses) => match kind.shape(&responses) {
                    Some(data) => ReportOutcome { kind, data, source: DataSource::Live },
                    None => {
                        info!("GA returned no rows, serving fallback data");
                        ReportOutcome::empty(kind)
                    }
                },
                Err(e) => {
                    error!("GA {} error: {}", kind, e);
                    ReportMetrics::record_fallback(kind.name());
                    ReportOutcome::fallback(kind, &e)
                }
            },
        };

        ReportMetrics::record_served(kind.name(), outcome.source.as_str(), started.elapsed().as_secs_f64());
        debug!("Served {} report from {}", kind, outcome.source.as_str());
        outcome
    }

    /// Issue every query of the report concurrently, preserving query order.
    async fn fetch(
        &self,
        client: &Arc<dyn AnalyticsPort>,
        kind: ReportKind,
        range: &DateRange,
    ) -> Result<Vec<RunReportResponse>> {
        let property = self.property_for(kind).to_string();
        let handles: Vec<_> = kind
            .queries(range)
            .into_iter()
            .map(|query| {
                let client = Arc::clone(client);
                let property = property.clone();
                tokio::spawn(async move { client.run_report(&property, &query).await })
            })
            .collect();

        let mut responses = Vec::with_capacity(handles.len());
        for handle in handles {
            responses.push(handle.await??);
        }
        Ok(responses)
    }
}
