use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use common::{
    actors::{Actor, ActorType, ControlMessage, HeartbeatGuard},
    models::{PreviewRequest, RebalancePreview},
};

use crate::traits::PlannerApi;

/// Periodically asks the planner for a fresh preview and broadcasts it.
///
/// Each successful fetch replaces whatever the subscribers derived from the previous one.
pub struct PreviewService {
    id: Uuid,
    planner: Arc<dyn PlannerApi>,
    request: PreviewRequest,
    refresh_every: Duration,
    preview_tx: broadcast::Sender<Arc<RebalancePreview>>,
}

#[async_trait]
impl Actor for PreviewService {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> ActorType {
        ActorType::PreviewActor
    }

    async fn run(&mut self, supervisor_tx: mpsc::Sender<ControlMessage>) -> anyhow::Result<()> {
        let _heartbeat = HeartbeatGuard::new(self.spawn_heartbeat(supervisor_tx.clone()));

        info!(
            "Preview actor {} refreshing every {}s",
            self.id,
            self.refresh_every.as_secs()
        );

        let mut interval = time::interval(self.refresh_every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.refresh(&supervisor_tx).await?;
        }
    }
}

impl PreviewService {
    pub fn new(
        planner: Arc<dyn PlannerApi>,
        request: PreviewRequest,
        refresh_every: Duration,
        preview_tx: broadcast::Sender<Arc<RebalancePreview>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            planner,
            request,
            refresh_every,
            preview_tx,
        }
    }

    /// One fetch. Planner failures are reported and swallowed; only a dead supervisor is fatal.
    async fn refresh(&self, supervisor_tx: &mpsc::Sender<ControlMessage>) -> anyhow::Result<()> {
        match self.planner.preview(&self.request).await {
            Ok(preview) => {
                debug!(
                    "Preview received: {} current, {} suggested, {} legs",
                    preview.current.len(),
                    preview.suggested.len(),
                    preview.swap_plan.legs().count()
                );
                if self.preview_tx.send(Arc::new(preview)).is_err() {
                    debug!("No preview subscribers yet");
                }
            }
            Err(e) => {
                warn!("Rebalance preview failed: {}", e);
                supervisor_tx
                    .send(ControlMessage::Error(self.name(), e.to_string()))
                    .await
                    .context("Supervisor channel closed")?;
            }
        }
        Ok(())
    }
}
