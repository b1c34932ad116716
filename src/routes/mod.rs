pub mod projects;
pub mod response;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

/// The project resource, mounted at `/projects` and again at `/api/projects`.
pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .merge(project_routes("/projects"))
        .merge(project_routes("/api/projects"))
}

fn project_routes(base: &str) -> Router<SharedState> {
    Router::new()
        .route(
            base,
            get(projects::list)
                .post(projects::create)
                .fallback(projects::method_not_allowed),
        )
        .route(
            &format!("{base}/{{id}}"),
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete)
                .fallback(projects::method_not_allowed),
        )
}
