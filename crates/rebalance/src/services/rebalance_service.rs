use std::sync::Arc;

use common::models::RebalancePreview;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::engine::ChangeType;
use crate::report::RebalanceReport;

pub struct RebalanceService {
    latest: Option<RebalanceReport>,
}

impl RebalanceService {
    pub fn new() -> Self {
        Self { latest: None }
    }

    pub async fn start(mut self, mut preview_rx: broadcast::Receiver<Arc<RebalancePreview>>) {
        info!("Starting Rebalance Service");

        loop {
            match preview_rx.recv().await {
                Ok(preview) => self.process_preview(&preview),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Rebalance service lagged: skipped {} previews", n)
                }
                Err(_) => break,
            }
        }
        info!("Rebalance Service stopped.");
    }

    fn process_preview(&mut self, preview: &RebalancePreview) {
        let report = RebalanceReport::build(preview);
        self.log_report(&report, preview);

        if let Some(previous) = &self.latest {
            if previous.changes == report.changes {
                debug!("Suggested actions unchanged since the previous preview");
            }
        }
        self.latest = Some(report);
    }

    fn log_report(&self, report: &RebalanceReport, preview: &RebalancePreview) {
        info!(
            "Preview fetched at {}: base={} sells={} buys={} stability {}% -> {}% ({:+})",
            preview.fetched_at.format("%Y-%m-%d %H:%M:%S"),
            report.base,
            report.sell_count,
            report.buy_count,
            report.current_stability,
            report.suggested_stability,
            report.stability_gain(),
        );

        for slice in &report.suggested_chart {
            debug!("Suggested {}: {:.2}%", slice.name, slice.value);
        }

        for change in &report.changes {
            match change.change_type {
                ChangeType::NoChange => {
                    debug!("{}: {} at {:.2}%", change.coin, change.action, change.from)
                }
                _ => info!(
                    "{}: {} ({:.2}% -> {:.2}%, {:+.2}%)",
                    change.coin, change.action, change.from, change.to, change.change
                ),
            }
        }

        if report.has_shortfall() {
            warn!("Base pool shortfall of {:.2} {}", report.shortfall, report.base);
        }
        for warning in &report.warnings {
            warn!("Planner warning: {}", warning);
        }
        if let Some(ref rationale) = report.rationale {
            info!("Rationale: {}", rationale);
        }
    }
}

impl Default for RebalanceService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::models::{AllocationVector, SwapAction, SwapPlan};

    fn preview(sell_amount: f64) -> Arc<RebalancePreview> {
        let current: AllocationVector = [("USDT", 0.6), ("USDC", 0.4)].into_iter().collect();
        let suggested: AllocationVector = [("USDT", 0.5), ("USDC", 0.5)].into_iter().collect();

        Arc::new(RebalancePreview {
            current,
            suggested,
            trade_deltas: AllocationVector::new(),
            swap_plan: SwapPlan {
                base: "USDC".to_string(),
                sells_to_base: vec![SwapAction::sell("USDT", "USDC", sell_amount)],
                ..SwapPlan::default()
            },
            rationale: None,
            fetched_at: Utc::now(),
        })
    }

    #[test]
    fn test_new_preview_replaces_report() {
        let mut service = RebalanceService::new();
        assert!(service.latest.is_none());

        service.process_preview(&preview(10.0));
        service.process_preview(&preview(20.0));

        let latest = service.latest.as_ref().unwrap();
        assert_eq!(latest.changes[0].action, "Sell 20.00 USDT");
        assert_eq!(latest.changes[1].coin, "USDC");
    }

    #[tokio::test]
    async fn test_stops_when_preview_feed_closes() {
        let (preview_tx, preview_rx) = broadcast::channel(8);
        let handle = tokio::spawn(RebalanceService::new().start(preview_rx));

        preview_tx.send(preview(10.0)).unwrap();
        drop(preview_tx);

        let stopped = tokio::time::timeout(std::time::Duration::from_secs(1), handle).await;
        assert!(stopped.is_ok(), "service kept running without a preview feed");
    }
}
