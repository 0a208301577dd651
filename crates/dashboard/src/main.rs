use dotenvy::dotenv;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

use common::actors::{Actor, ActorType};
use common::logger;
use common::models::RebalancePreview;
use planner::services::PreviewService;
use planner::{PlannerApi, PlannerClient};
use rebalance::SwapQuote;
use rebalance::services::RebalanceService;

use crate::actors::supervisor::Supervisor;
use crate::config::DashboardConfig;

mod actors;
mod config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();
    debug!("Dashboard starting up...");

    let config = DashboardConfig::from_env()?;
    debug!("Using planner at {}", config.planner_url);

    if let Some((amount, chain)) = config.manual_swap {
        let quote = SwapQuote::estimate(amount, chain);
        info!(
            "Manual swap from {}: send {:.2}, receive ~{:.2}, gas ~${:.2}",
            chain, quote.amount, quote.estimated_receive, quote.gas_estimate_usd
        );
    }

    let planner: Arc<dyn PlannerApi> =
        Arc::new(PlannerClient::new(&config.planner_url, config.planner_timeout)?);

    let (preview_tx, _) = broadcast::channel::<Arc<RebalancePreview>>(16);

    tokio::spawn(RebalanceService::new().start(preview_tx.subscribe()));

    let mut supervisor = Supervisor::new();

    let request = config.preview_request();
    let refresh_interval = config.refresh_interval;
    supervisor.register_actor(
        ActorType::PreviewActor,
        Box::new(move || {
            Box::new(PreviewService::new(
                planner.clone(),
                request.clone(),
                refresh_interval,
                preview_tx.clone(),
            )) as Box<dyn Actor>
        }),
    );

    supervisor.start().await;
    Ok(())
}
