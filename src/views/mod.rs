pub mod dashboard;
pub mod projects;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route(
            "/dashboard/projects/new",
            get(projects::new_page).post(projects::create),
        )
        .route(
            "/dashboard/projects/{id}/edit",
            get(projects::edit_page).post(projects::update),
        )
        .route("/dashboard/projects/{id}/toggle", post(projects::toggle))
        .route("/dashboard/projects/{id}/delete", post(projects::delete))
}
