pub mod app;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod plan;
pub mod progress;
pub mod schedule;
pub mod state;
pub mod storage;
pub mod sync;
pub mod timeline;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use plan::{PlanIndex, load_plan};
pub use progress::ProgressStore;
pub use state::AppState;
