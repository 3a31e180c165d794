// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{
        admin, attempt, auth, catalog, community, material, notification, practice, quiz,
        results, tutor,
    },
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware, staff_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, quizzes, attempts, results, content).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, session registry, tutor, config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let require_auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/me", get(auth::me))
                .layer(require_auth.clone()),
        );

    // Role checks for creation live in the handlers (author must be staff
    // and verified); the admin publish/review actions get the middleware.
    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes).post(quiz::create_quiz))
        .route("/{id}/questions", get(quiz::get_quiz_questions))
        .route("/{id}/leaderboard", get(quiz::leaderboard))
        .layer(require_auth.clone());

    let attempt_routes = Router::new()
        .route("/", post(attempt::start))
        .route("/current", get(attempt::current).delete(attempt::abandon))
        .route("/answer", post(attempt::answer))
        .route("/next", post(attempt::next))
        .route("/previous", post(attempt::previous))
        .route("/request-submit", post(attempt::request_submit))
        .route("/cancel-submit", post(attempt::cancel_submit))
        .route("/confirm", post(attempt::confirm))
        .layer(require_auth.clone());

    let result_routes = Router::new()
        .route("/mine", get(results::my_results))
        .merge(
            Router::new()
                .route("/", get(results::all_results))
                .layer(middleware::from_fn(staff_middleware)),
        )
        .merge(
            Router::new()
                .route("/{id}/publish", post(results::publish_result))
                .layer(middleware::from_fn(admin_middleware)),
        )
        .layer(require_auth.clone());

    let material_routes = Router::new()
        .route("/", get(material::list_materials).post(material::upload_material))
        .route("/{id}/download-requests", post(material::request_download))
        .merge(
            Router::new()
                .route("/{id}/status", post(material::set_material_status))
                .layer(middleware::from_fn(admin_middleware)),
        )
        .layer(require_auth.clone());

    let download_routes = Router::new()
        .route("/", get(material::list_download_requests))
        .route("/{id}/status", post(material::set_download_status))
        .layer(middleware::from_fn(admin_middleware))
        .layer(require_auth.clone());

    let practice_routes = Router::new()
        .route("/", get(practice::list_practice_sets).post(practice::create_practice_set))
        .layer(require_auth.clone());

    let doubt_routes = Router::new()
        .route("/", get(community::list_doubts).post(community::create_doubt))
        .route("/{id}/replies", post(community::reply_doubt))
        .layer(require_auth.clone());

    let notification_routes = Router::new()
        .route("/", get(notification::list_notifications))
        .route("/{id}/read", post(notification::mark_read))
        .layer(require_auth.clone());

    let vacancy_routes = Router::new()
        .route("/", get(catalog::list_vacancies).post(catalog::create_vacancy))
        .route("/mine", get(catalog::my_vacancies))
        .merge(
            Router::new()
                .route("/{id}/status", post(catalog::set_vacancy_status))
                .layer(middleware::from_fn(admin_middleware)),
        )
        .layer(require_auth.clone());

    let tutor_routes = Router::new()
        .route("/ask", post(tutor::ask_tutor))
        .layer(require_auth.clone());

    let admin_routes = Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", put(admin::update_user).delete(admin::delete_user))
        .route("/users/{id}/verify", post(admin::verify_user))
        .route("/ads", get(catalog::list_ads).post(catalog::create_ad))
        .route("/ads/{id}", delete(catalog::delete_ad))
        .route("/drugs", post(catalog::create_drug))
        .route("/drugs/{id}", delete(catalog::delete_drug))
        // Double middleware protection: Auth first, then Admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(require_auth.clone());

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/attempts", attempt_routes)
        .nest("/api/results", result_routes)
        .nest("/api/materials", material_routes)
        .nest("/api/download-requests", download_routes)
        .nest("/api/practice-sets", practice_routes)
        .nest("/api/doubts", doubt_routes)
        .nest("/api/notifications", notification_routes)
        .nest("/api/vacancies", vacancy_routes)
        .nest("/api/tutor", tutor_routes)
        .nest("/api/admin", admin_routes)
        // Public reference endpoints
        .route("/api/ads/active", get(catalog::active_ads))
        .route("/api/drugs", get(catalog::search_drugs))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
