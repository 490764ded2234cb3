use axum::{
    Router, middleware,
    routing::{get, post},
};
use ranker_core::api::routes;

use crate::{
    AppState,
    handlers::{health, root, sessions, users, votes, works},
    infra::session::require_login,
};

/// Every application route. The session middleware is applied by the caller
/// so that both public and protected routes see a `SessionContext`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(routes::PING, get(health::ping_handler))
        .route(routes::HEALTH, get(health::health_handler))
        .merge(create_public_routes())
        .merge(create_protected_routes())
}

fn create_public_routes() -> Router<AppState> {
    Router::new()
        .route(routes::ROOT, get(root::root_handler))
        .route(routes::works::COLLECTION, get(works::index_handler))
        // Upvote checks the session itself so that anonymous attempts
        // redirect without touching the store.
        .route(routes::works::UPVOTE, post(votes::upvote_handler))
        .route(routes::sessions::LOGIN, post(sessions::login_handler))
        .route(
            routes::sessions::LOGOUT,
            axum::routing::delete(sessions::logout_handler),
        )
        .route(routes::users::COLLECTION, get(users::list_users_handler))
        .route(routes::users::ITEM, get(users::show_user_handler))
}

/// Routes that redirect anonymous requests to `/`.
fn create_protected_routes() -> Router<AppState> {
    Router::new()
        .route(routes::works::NEW, get(works::new_handler))
        .route(routes::works::COLLECTION, post(works::create_handler))
        .route(
            routes::works::ITEM,
            get(works::show_handler)
                .patch(works::update_handler)
                .put(works::update_handler)
                .delete(works::destroy_handler),
        )
        .route(routes::works::EDIT, get(works::edit_handler))
        .route_layer(middleware::from_fn(require_login))
}
