use crate::domain::{PortfolioGroup, Trade};
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Terminal state of one group's inspect → preview → submit flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    NoTrades,
    InspectFailed { error: String },
    Rejected { detail: String },
    PreviewOnly,
    Declined { detail: String },
    Executed,
    SubmitFailed { error: String },
}

impl GroupOutcome {
    pub fn submitted(&self) -> bool {
        matches!(
            self,
            GroupOutcome::Declined { .. } | GroupOutcome::Executed | GroupOutcome::SubmitFailed { .. }
        )
    }
}

impl fmt::Display for GroupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupOutcome::NoTrades => f.write_str("no pending trades"),
            GroupOutcome::InspectFailed { error } => write!(f, "skipped: {error}"),
            GroupOutcome::Rejected { detail } => write!(f, "impact rejected: {detail}"),
            GroupOutcome::PreviewOnly => f.write_str("impact approved (dry run, not submitted)"),
            GroupOutcome::Declined { detail } => write!(f, "orders declined: {detail}"),
            GroupOutcome::Executed => f.write_str("orders executed"),
            GroupOutcome::SubmitFailed { error } => write!(f, "submit failed: {error}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub groups: Vec<(PortfolioGroup, GroupOutcome)>,
}

impl RunReport {
    pub fn executed(&self) -> usize {
        self.groups
            .iter()
            .filter(|(_, o)| *o == GroupOutcome::Executed)
            .count()
    }

    pub fn log_summary(&self) {
        for (group, outcome) in &self.groups {
            tracing::info!(
                run_id = %self.run_id,
                group = %group.name,
                group_id = %group.id,
                "{outcome}"
            );
        }

        let elapsed_ms = (self.finished_at - self.started_at).num_milliseconds();
        tracing::info!(
            run_id = %self.run_id,
            groups = self.groups.len(),
            executed = self.executed(),
            elapsed_ms,
            "run finished"
        );
    }
}

/// One console line per trade, e.g. ` - BUY 2 AAPL @ $100USD for $200.00`.
pub fn trade_line(trade: &Trade) -> String {
    format!(
        " - {} {} {} @ ${}{} for ${:.2}",
        trade.action,
        trade.units,
        trade.symbol(),
        trade.price,
        trade.currency(),
        trade.total()
    )
}
