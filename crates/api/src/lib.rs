pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout))
        .route("/refresh", post(routes::auth::refresh))
        .route("/me", get(routes::auth::me));

    let contact_routes = Router::new()
        .route("/", get(routes::contact::list))
        .route("/", post(routes::contact::save))
        .route("/{contact_id}", get(routes::contact::get))
        .route("/{contact_id}", delete(routes::contact::delete));

    let opportunity_routes = Router::new()
        .route("/", get(routes::opportunity::list))
        .route("/", post(routes::opportunity::save))
        .route("/{opportunity_id}", get(routes::opportunity::get))
        .route("/{opportunity_id}", delete(routes::opportunity::delete));

    let expense_routes = Router::new()
        .route("/", get(routes::expense::list))
        .route("/", post(routes::expense::save))
        .route("/{expense_id}", get(routes::expense::get))
        .route("/{expense_id}", delete(routes::expense::delete));

    let activity_routes = Router::new()
        .route("/", get(routes::activity::list))
        .route("/", post(routes::activity::save))
        .route("/{activity_id}", delete(routes::activity::delete));

    let notification_routes = Router::new()
        .route("/", get(routes::notification::list))
        .route("/read-all", put(routes::notification::mark_all_read))
        .route("/{notification_id}/read", put(routes::notification::mark_read));

    let settings_routes = Router::new()
        .route("/", get(routes::settings::get))
        .route("/", put(routes::settings::save));

    let plan_routes = Router::new()
        .route("/", get(routes::plan::list))
        .route("/", put(routes::plan::save))
        .route("/current", get(routes::plan::current));

    let bot_routes = Router::new()
        .route("/", get(routes::bot::get))
        .route("/", put(routes::bot::save))
        .route("/connect", post(routes::bot::connect))
        .route("/disconnect", post(routes::bot::disconnect))
        .route("/chat", post(routes::bot::chat));

    let assistant_routes = Router::new()
        .route("/chat", post(routes::assistant::chat))
        .route("/image", post(routes::assistant::image));

    // Admin-only surface
    let admin_user_routes = Router::new()
        .route("/", get(routes::user::list))
        .route("/", post(routes::user::create))
        .route("/{user_id}", put(routes::user::update))
        .route("/{user_id}", delete(routes::user::delete));

    let admin_routes = Router::new()
        .nest("/user", admin_user_routes)
        .route("/export", get(routes::export::export_all))
        .route("/import", post(routes::export::import));

    let api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/contact", contact_routes)
        .nest("/opportunity", opportunity_routes)
        .nest("/expense", expense_routes)
        .nest("/activity", activity_routes)
        .nest("/notification", notification_routes)
        .nest("/settings", settings_routes)
        .nest("/plan", plan_routes)
        .nest("/bot", bot_routes)
        .nest("/assistant", assistant_routes)
        .nest("/admin", admin_routes);

    let health = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .merge(health)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
