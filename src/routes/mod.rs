mod donations;
mod donors;
mod institutions;
mod recipients;
mod search;

use crate::common::state::AppState;
use crate::config::Config;
use axum::Router;
use sea_orm::DatabaseConnection;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

pub fn build_router(db: &DatabaseConnection, config: &Config) -> Router {
    #[derive(OpenApi)]
    #[openapi(info(
        title = "HemoTrack API",
        description = "Blood donor, recipient and blood-unit inventory management"
    ))]
    struct ApiDoc;

    let app_state = AppState {
        db: db.clone(),
        config: config.clone(),
    };

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(crate::common::views::router(&app_state)) // Root routes
        .nest("/api", institutions::views::router(&app_state))
        .nest("/api/donors", donors::views::router(&app_state))
        .nest("/api/recipients", recipients::views::router(&app_state))
        .nest("/api/donations", donations::views::router(&app_state))
        .nest("/api/search", search::views::router(&app_state))
        .split_for_parts();

    router.merge(Scalar::with_url("/api/docs", api))
}
