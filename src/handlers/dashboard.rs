use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::csrf;
use crate::auth::session::BoardStore;
use crate::config::BoardSettings;
use crate::errors::{AppError, render};
use crate::feed::FeedHandle;
use crate::models::attendance::DepartmentGroup;
use crate::models::grid::pack;
use crate::models::selection::BoardState;
use crate::templates_structs::{BoardFragmentTemplate, BoardPanel, DashboardTemplate, PageContext};

#[derive(Deserialize)]
pub struct PageQuery {
    page: Option<usize>,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

#[derive(Deserialize)]
pub struct PageForm {
    pub direction: Direction,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct ToggleForm {
    pub name: String,
    pub csrf_token: String,
}

fn redirect_to_dashboard() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/dashboard"))
        .finish()
}

fn board_for_request(
    session: &Session,
    boards: &BoardStore,
    feed: &FeedHandle,
    settings: &BoardSettings,
    page: Option<usize>,
) -> Result<BoardPanel, AppError> {
    let mut state = boards.load(session);
    if let Some(page) = page {
        state.current_page = page;
    }
    let board = BoardPanel::build(&feed.current(), &mut state, settings.grid);
    boards.store(session, &state)?;
    Ok(board)
}

/// GET /dashboard
pub async fn index(
    session: Session,
    boards: web::Data<BoardStore>,
    feed: web::Data<FeedHandle>,
    settings: web::Data<BoardSettings>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let board = board_for_request(&session, &boards, &feed, &settings, query.page)?;
    let ctx = PageContext::build(&session, &settings.app_name);
    render(DashboardTemplate { ctx, board })
}

/// GET /dashboard/grid - the board body (picker and grid), for live refreshes.
pub async fn grid(
    session: Session,
    boards: web::Data<BoardStore>,
    feed: web::Data<FeedHandle>,
    settings: web::Data<BoardSettings>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let board = board_for_request(&session, &boards, &feed, &settings, query.page)?;
    let ctx = PageContext::build(&session, &settings.app_name);
    render(BoardFragmentTemplate { ctx, board })
}

/// POST /dashboard/page
pub async fn change_page(
    session: Session,
    boards: web::Data<BoardStore>,
    feed: web::Data<FeedHandle>,
    settings: web::Data<BoardSettings>,
    form: web::Form<PageForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let mut state = boards.load(&session);
    match form.direction {
        Direction::Prev => state.previous_page(),
        Direction::Next => {
            let feed_state = feed.current();
            let total_pages = match feed_state.live_snapshot() {
                Some(snapshot) => {
                    let filter = state.seed(&snapshot.departments).clone();
                    pack(&snapshot.departments, &filter, settings.grid).len()
                }
                None => 0,
            };
            state.next_page(total_pages);
        }
    }
    boards.store(&session, &state)?;
    Ok(redirect_to_dashboard())
}

/// POST /dashboard/selection/toggle
pub async fn toggle_department(
    session: Session,
    boards: web::Data<BoardStore>,
    form: web::Form<ToggleForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let mut state = boards.load(&session);
    state.toggle(&form.name);
    boards.store(&session, &state)?;
    Ok(redirect_to_dashboard())
}

/// Apply a selection change that needs the current department list.
/// Without any snapshot yet there is nothing to select, so the state is left alone.
fn with_departments(
    session: &Session,
    boards: &BoardStore,
    feed: &FeedHandle,
    apply: impl FnOnce(&mut BoardState, &[DepartmentGroup]),
) -> Result<HttpResponse, AppError> {
    let feed_state = feed.current();
    if let Some(snapshot) = feed_state.snapshot.as_ref() {
        let mut state = boards.load(session);
        apply(&mut state, &snapshot.departments);
        boards.store(session, &state)?;
    }
    Ok(redirect_to_dashboard())
}

/// POST /dashboard/selection/all
pub async fn select_all(
    session: Session,
    boards: web::Data<BoardStore>,
    feed: web::Data<FeedHandle>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    with_departments(&session, &boards, &feed, BoardState::select_all)
}

/// POST /dashboard/selection/reset
pub async fn reset_selection(
    session: Session,
    boards: web::Data<BoardStore>,
    feed: web::Data<FeedHandle>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    with_departments(&session, &boards, &feed, BoardState::reset)
}
