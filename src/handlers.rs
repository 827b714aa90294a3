use crate::calendar::build_calendar;
use crate::errors::AppError;
use crate::models::{
    CalendarMonth, CountdownResponse, DayView, ProgressRecord, ProgressSummary, TimelineResponse,
};
use crate::plan::parse_date_key;
use crate::state::AppState;
use crate::timeline::{build_timeline, day_view, progress_summary};
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{
        Html, Redirect,
        sse::{Event, KeepAlive, Sse},
    },
    Json,
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let day = state.plan.today_day_number(&state.clock);
    let store = state.progress.lock().await;
    let view = day_view(&state.plan, store.record(), day, state.clock.today()).ok_or_else(|| day_not_found(day))?;
    let summary = progress_summary(&state.plan, &*store);
    Ok(Html(render_index(&view, &summary)))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<DayView>, AppError> {
    let day = state.plan.today_day_number(&state.clock);
    load_day(&state, day).await.map(Json)
}

pub async fn get_day(State(state): State<AppState>, Path(day): Path<u32>) -> Result<Json<DayView>, AppError> {
    load_day(&state, day).await.map(Json)
}

pub async fn toggle_day(State(state): State<AppState>, Path(day): Path<u32>) -> Result<Json<DayView>, AppError> {
    apply_toggle(&state, day).await.map(Json)
}

pub async fn toggle_day_form(State(state): State<AppState>, Path(day): Path<u32>) -> Result<Redirect, AppError> {
    apply_toggle(&state, day).await?;
    Ok(Redirect::to("/"))
}

pub async fn toggle_date_key(
    State(state): State<AppState>,
    Path(date_key): Path<String>,
) -> Result<Json<DayView>, AppError> {
    if parse_date_key(&date_key).is_none() {
        return Err(AppError::bad_request("date key must look like YYYY-MM-DD"));
    }
    let day = state
        .plan
        .day_number_for_date_key(&date_key)
        .ok_or_else(|| AppError::not_found(format!("{date_key} is not part of the plan")))?;

    apply_toggle(&state, day).await.map(Json)
}

pub async fn get_progress(State(state): State<AppState>) -> Json<ProgressSummary> {
    let store = state.progress.lock().await;
    Json(progress_summary(&state.plan, &*store))
}

pub async fn put_progress(
    State(state): State<AppState>,
    Json(record): Json<ProgressRecord>,
) -> Json<ProgressSummary> {
    let mut store = state.progress.lock().await;
    store.replace_record(record).await;
    info!("progress replaced, {} days completed", store.completed_count());
    Json(progress_summary(&state.plan, &*store))
}

pub async fn get_weeks(State(state): State<AppState>) -> Json<TimelineResponse> {
    let store = state.progress.lock().await;
    Json(build_timeline(&state.plan, store.record(), state.clock.today()))
}

pub async fn get_calendar(State(state): State<AppState>) -> Json<Vec<CalendarMonth>> {
    let store = state.progress.lock().await;
    Json(build_calendar(&state.plan, store.record(), state.clock.today()))
}

pub async fn get_countdown(State(state): State<AppState>) -> Json<CountdownResponse> {
    Json(CountdownResponse {
        target: state.countdown.target().to_rfc3339(),
        remaining: state.countdown.latest(),
    })
}

pub async fn events(State(state): State<AppState>) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let receiver = state.progress.lock().await.subscribe();
    let stream = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(change) => {
                    let event = Event::default().event("storage").json_data(&change);
                    return Some((event, receiver));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("event stream fell behind, skipped {skipped} changes");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn load_day(state: &AppState, day: u32) -> Result<DayView, AppError> {
    let store = state.progress.lock().await;
    day_view(&state.plan, store.record(), day, state.clock.today()).ok_or_else(|| day_not_found(day))
}

async fn apply_toggle(state: &AppState, day: u32) -> Result<DayView, AppError> {
    let date_key = state
        .plan
        .date_key_for_day_number(day)
        .ok_or_else(|| day_not_found(day))?;

    let mut store = state.progress.lock().await;
    let done = store.toggle_done(&date_key).await;
    info!("day {day} ({date_key}) marked {}", if done { "done" } else { "not done" });

    day_view(&state.plan, store.record(), day, state.clock.today()).ok_or_else(|| day_not_found(day))
}

fn day_not_found(day: u32) -> AppError {
    AppError::not_found(format!("day {day} is not part of the plan"))
}
