//! Route definitions for workspaces, registered under `/api/workspaces`.

use axum::routing::get;
use axum::Router;

use crate::handlers::workspaces;
use crate::state::AppState;

/// ```text
/// GET    /        list_workspaces
/// POST   /        create_workspace
/// GET    /{id}    get_workspace
/// PUT    /{id}    update_workspace
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(workspaces::list_workspaces).post(workspaces::create_workspace),
        )
        .route(
            "/{id}",
            get(workspaces::get_workspace).put(workspaces::update_workspace),
        )
}
