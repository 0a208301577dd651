use std::{collections::HashMap, time::Duration};
use tracing::{error, info, warn};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant},
};

use common::actors::{Actor, ActorType, ControlMessage};

const CHECK_PERIOD: Duration = Duration::from_secs(1);
const PULSE_TIMEOUT: Duration = Duration::from_secs(3);

type ActorFactory = Box<dyn Fn() -> Box<dyn Actor> + Send + Sync>;

pub struct Supervisor {
    actor_factories: HashMap<ActorType, ActorFactory>,
    pulses: HashMap<ActorType, Instant>,
    handles: HashMap<ActorType, JoinHandle<()>>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self {
            actor_factories: HashMap::new(),
            pulses: HashMap::new(),
            handles: HashMap::new(),
        }
    }

    pub fn register_actor(&mut self, actor_type: ActorType, factory: ActorFactory) {
        self.actor_factories.insert(actor_type, factory);
    }

    pub async fn start(&mut self) {
        let mut check_interval = time::interval(CHECK_PERIOD);

        let (supervisor_tx, mut supervisor_rx) = mpsc::channel::<ControlMessage>(512);

        let actors: Vec<ActorType> = self.actor_factories.keys().copied().collect();
        for actor in actors {
            self.spawn_actor(actor, supervisor_tx.clone());
        }

        loop {
            tokio::select! {
                Some(msg) = supervisor_rx.recv() => self.handle_message(msg),

                _ = check_interval.tick() => {
                    for actor_type in self.stale_actors(Instant::now()) {
                        warn!("{:?} is unresponsive! Restarting.", actor_type);
                        if let Some(handle) = self.handles.remove(&actor_type) {
                            handle.abort();
                        }
                        self.spawn_actor(actor_type, supervisor_tx.clone());
                    }
                }
            }
        }
    }

    fn handle_message(&mut self, msg: ControlMessage) {
        match msg {
            ControlMessage::Heartbeat(actor_type) => {
                // A pulse from an actor that already shut down must not revive it.
                if let Some(pulse) = self.pulses.get_mut(&actor_type) {
                    *pulse = Instant::now();
                }
            }
            ControlMessage::Shutdown(actor_type) => {
                warn!("{:?} is shutting down gracefully.", actor_type);
                self.pulses.remove(&actor_type);
                if let Some(handle) = self.handles.remove(&actor_type) {
                    handle.abort();
                }
            }
            ControlMessage::Error(actor_type, error_msg) => {
                error!("Actor {:?} reported error: {}", actor_type, error_msg);
            }
        }
    }

    fn stale_actors(&self, now: Instant) -> Vec<ActorType> {
        self.pulses
            .iter()
            .filter(|(_, last)| now.duration_since(**last) > PULSE_TIMEOUT)
            .map(|(actor_type, _)| *actor_type)
            .collect()
    }

    fn spawn_actor(&mut self, actor_type: ActorType, tx: mpsc::Sender<ControlMessage>) {
        let Some(factory) = self.actor_factories.get(&actor_type) else {
            error!("No factory registered for {:?}", actor_type);
            return;
        };
        let mut new_actor = factory();
        info!("Spawning {:?} ({})", actor_type, new_actor.id());

        let new_actor_handle = tokio::spawn(async move {
            if let Err(e) = new_actor.run(tx).await {
                error!("Actor {:?} crashed: {:#}", actor_type, e);
            }
        });
        self.handles.insert(actor_type, new_actor_handle);
        self.pulses.insert(actor_type, Instant::now());
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use uuid::Uuid;

    struct Silent;

    #[async_trait]
    impl Actor for Silent {
        fn name(&self) -> ActorType {
            ActorType::PreviewActor
        }

        fn id(&self) -> Uuid {
            Uuid::nil()
        }

        async fn run(&mut self, _tx: mpsc::Sender<ControlMessage>) -> anyhow::Result<()> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    fn supervisor() -> Supervisor {
        let mut supervisor = Supervisor::new();
        supervisor.register_actor(
            ActorType::PreviewActor,
            Box::new(|| Box::new(Silent) as Box<dyn Actor>),
        );
        supervisor
    }

    #[tokio::test(start_paused = true)]
    async fn test_actor_without_pulse_goes_stale() {
        let mut supervisor = supervisor();
        let (tx, _rx) = mpsc::channel(8);
        supervisor.spawn_actor(ActorType::PreviewActor, tx);

        assert!(supervisor.stale_actors(Instant::now()).is_empty());

        time::advance(Duration::from_secs(4)).await;
        assert_eq!(
            supervisor.stale_actors(Instant::now()),
            vec![ActorType::PreviewActor]
        );

        supervisor.handle_message(ControlMessage::Heartbeat(ActorType::PreviewActor));
        assert!(supervisor.stale_actors(Instant::now()).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_tracking() {
        let mut supervisor = supervisor();
        let (tx, _rx) = mpsc::channel(8);
        supervisor.spawn_actor(ActorType::PreviewActor, tx);

        supervisor.handle_message(ControlMessage::Shutdown(ActorType::PreviewActor));
        supervisor.handle_message(ControlMessage::Heartbeat(ActorType::PreviewActor));
        time::advance(Duration::from_secs(10)).await;

        assert!(supervisor.stale_actors(Instant::now()).is_empty());
        assert!(supervisor.handles.is_empty());
    }
}
