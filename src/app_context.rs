use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore};

use crate::config::Config;
use crate::gateway::PgGateway;
use crate::jobs::MonitorRegistry;
use crate::sampler::SysinfoSampler;
use crate::selection::SessionRegistry;

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub gateway: Arc<PgGateway>,
    pub sampler: Arc<Mutex<SysinfoSampler>>,
    pub sessions: Arc<Mutex<SessionRegistry>>,
    pub monitors: Arc<Mutex<MonitorRegistry>>,
    pub command_slots: Arc<Semaphore>,
}

impl AppContext {
    pub fn new(config: Config, command_concurrency: usize) -> Self {
        let gateway = Arc::new(PgGateway::from_config(&config.postgres));
        Self {
            config,
            gateway,
            sampler: Arc::new(Mutex::new(SysinfoSampler::new())),
            sessions: Arc::new(Mutex::new(SessionRegistry::default())),
            monitors: Arc::new(Mutex::new(MonitorRegistry::default())),
            command_slots: Arc::new(Semaphore::new(command_concurrency)),
        }
    }
}
