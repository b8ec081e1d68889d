use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::shared::state::AppState;
use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let auth = || middleware::from_fn_with_state(state.clone(), system::auth::middleware::require_auth);
    let admin =
        || middleware::from_fn_with_state(state.clone(), system::auth::middleware::require_admin);

    let router = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user).layer(auth()),
        )
        // System users management (admin only)
        .route(
            "/api/system/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::upsert)
                .layer(admin()),
        )
        .route(
            "/api/system/users/:id",
            delete(system::handlers::users::delete).layer(admin()),
        )
        // ========================================
        // DOCUMENT & SETTINGS
        // ========================================
        .route("/api/document", get(handlers::document::read).layer(auth()))
        .route("/api/settings", put(handlers::settings::update).layer(admin()))
        // ========================================
        // REFERENCE DATA (read: any user, write: admin)
        // ========================================
        // A001 Points of sale
        .route(
            "/api/pos",
            get(handlers::a001_point_of_sale::list_all)
                .layer(auth())
                .merge(post(handlers::a001_point_of_sale::upsert).layer(admin())),
        )
        .route(
            "/api/pos/:id",
            delete(handlers::a001_point_of_sale::delete).layer(admin()),
        )
        // A002 Groups
        .route(
            "/api/groups",
            get(handlers::a002_group::list_all)
                .layer(auth())
                .merge(post(handlers::a002_group::upsert).layer(admin())),
        )
        .route(
            "/api/groups/:id",
            delete(handlers::a002_group::delete).layer(admin()),
        )
        // A003 Families
        .route(
            "/api/families",
            get(handlers::a003_family::list_all)
                .layer(auth())
                .merge(post(handlers::a003_family::create).layer(admin())),
        )
        .route(
            "/api/families/:id",
            put(handlers::a003_family::update)
                .delete(handlers::a003_family::delete)
                .layer(admin()),
        )
        // A004 Reports (submit: any user, inbox: admin)
        .route(
            "/api/reports",
            get(handlers::a004_report::list_all)
                .layer(admin())
                .merge(post(handlers::a004_report::submit).layer(auth())),
        )
        .route(
            "/api/reports/:id",
            delete(handlers::a004_report::delete).layer(admin()),
        )
        .route(
            "/api/reports/:id/download",
            get(handlers::a004_report::download).layer(admin()),
        )
        // ========================================
        // USECASES
        // ========================================
        // UseCase u501: price list import
        .route(
            "/api/u501/import/:kind",
            post(handlers::usecases::u501_import).layer(admin()),
        )
        .route(
            "/api/u501/export/:kind",
            get(handlers::usecases::u501_export).layer(admin()),
        )
        // UseCase u502: backups
        .route(
            "/api/u502/backups",
            get(handlers::usecases::u502_list)
                .post(handlers::usecases::u502_create)
                .layer(admin()),
        )
        .route(
            "/api/u502/backups/:id",
            delete(handlers::usecases::u502_delete).layer(admin()),
        )
        .route(
            "/api/u502/backups/:id/restore",
            post(handlers::usecases::u502_restore).layer(admin()),
        )
        .route(
            "/api/u502/export",
            get(handlers::usecases::u502_export).layer(admin()),
        )
        .route(
            "/api/u502/import",
            post(handlers::usecases::u502_import).layer(admin()),
        )
        // ========================================
        // ASSISTANT
        // ========================================
        .route(
            "/api/assistant/chat",
            post(handlers::assistant::chat).layer(auth()),
        );

    router.with_state(state)
}
