use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/days/:day/toggle", post(handlers::toggle_day_form))
        .route("/api/today", get(handlers::get_today))
        .route("/api/days/:day", get(handlers::get_day))
        .route("/api/days/:day/toggle", post(handlers::toggle_day))
        .route("/api/progress", get(handlers::get_progress).put(handlers::put_progress))
        .route("/api/progress/:date_key/toggle", post(handlers::toggle_date_key))
        .route("/api/weeks", get(handlers::get_weeks))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/countdown", get(handlers::get_countdown))
        .route("/api/events", get(handlers::events))
        .with_state(state)
}
