//! Simulated plan → data → strategy pipeline behind `POST /analyze`.
//!
//! The stages do no work; each one only waits for its fixed delay. The response is built after the
//! last stage from the trigger-phrase match, the report template, and the chart generator.

use crate::chart::generate_chart_data;
use crate::config::Settings;
use crate::domain::analysis::{AnalysisResponse, ChartData};
use crate::query::extract_subject;
use crate::report::generate_report;
use rand::Rng;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub const FALLBACK_REPORT: &str = "后端收到了请求，但无法解析。请输入 '分析一下 [股票名称]'。";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Plan,
    Data,
    Strategy,
    Completed,
}

/// Stages that carry artificial latency, in execution order.
pub const SIMULATED_STAGES: [Stage; 3] = [Stage::Plan, Stage::Data, Stage::Strategy];

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Plan => "plan",
            Stage::Data => "data",
            Stage::Strategy => "strategy",
            Stage::Completed => "completed",
        }
    }

    pub fn delay(self) -> Duration {
        match self {
            Stage::Plan => Duration::from_millis(500),
            Stage::Data => Duration::from_millis(1500),
            Stage::Strategy => Duration::from_millis(1000),
            Stage::Received | Stage::Completed => Duration::ZERO,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for per-stage diagnostics. Nothing in the pipeline depends on what it does.
pub trait StageLog: Send + Sync {
    fn log(&self, stage: Stage, detail: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStageLog;

impl StageLog for TracingStageLog {
    fn log(&self, stage: Stage, detail: &str) {
        match stage {
            Stage::Received => tracing::info!(%stage, query = detail, "analysis request received"),
            Stage::Plan => tracing::info!(%stage, "plan team drafting analysis plan"),
            Stage::Data => tracing::info!(%stage, "data team fetching market data"),
            Stage::Strategy => tracing::info!(%stage, "strategy team writing report"),
            Stage::Completed => tracing::info!(%stage, outcome = detail, "analysis complete"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentStageLog;

impl StageLog for SilentStageLog {
    fn log(&self, _stage: Stage, _detail: &str) {}
}

#[derive(Clone)]
pub struct MockPipeline {
    log: Arc<dyn StageLog>,
    simulate_latency: bool,
}

impl fmt::Debug for MockPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockPipeline")
            .field("simulate_latency", &self.simulate_latency)
            .finish_non_exhaustive()
    }
}

impl MockPipeline {
    pub fn new(log: Arc<dyn StageLog>) -> Self {
        Self {
            log,
            simulate_latency: true,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Arc::new(TracingStageLog)).with_simulated_latency(settings.simulate_latency)
    }

    pub fn with_simulated_latency(mut self, enabled: bool) -> Self {
        self.simulate_latency = enabled;
        self
    }

    pub fn simulates_latency(&self) -> bool {
        self.simulate_latency
    }

    /// Runs the staged delays, then answers `query`.
    ///
    /// Sleeps hold no lock; concurrent calls overlap their delays.
    pub async fn analyze(&self, query: &str) -> AnalysisResponse {
        self.log.log(Stage::Received, query);

        for stage in SIMULATED_STAGES {
            self.log.log(stage, "");
            if self.simulate_latency {
                tokio::time::sleep(stage.delay()).await;
            }
        }

        let response = respond(query, &mut rand::thread_rng());

        let outcome = if response.data.is_empty() {
            "fallback"
        } else {
            "report"
        };
        self.log.log(Stage::Completed, outcome);

        response
    }
}

/// Builds the response for `query` without any delay or logging.
pub fn respond<R: Rng + ?Sized>(query: &str, rng: &mut R) -> AnalysisResponse {
    match extract_subject(query) {
        Some(subject) => AnalysisResponse {
            report: generate_report(subject, rng),
            data: generate_chart_data(rng),
        },
        None => AnalysisResponse {
            report: FALLBACK_REPORT.to_string(),
            data: ChartData::new(),
        },
    }
}
