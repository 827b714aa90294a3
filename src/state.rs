use crate::clock::Clock;
use crate::countdown::CountdownTimer;
use crate::plan::PlanIndex;
use crate::progress::ProgressStore;
use crate::storage::FileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub plan: Arc<PlanIndex>,
    pub progress: Arc<Mutex<ProgressStore<FileStore>>>,
    pub countdown: Arc<CountdownTimer>,
    pub clock: Clock,
}

impl AppState {
    pub fn new(plan: PlanIndex, progress: ProgressStore<FileStore>, countdown: CountdownTimer, clock: Clock) -> Self {
        Self {
            plan: Arc::new(plan),
            progress: Arc::new(Mutex::new(progress)),
            countdown: Arc::new(countdown),
            clock,
        }
    }
}
