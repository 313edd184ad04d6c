//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::domains::review::{PromptTemplate, ReviewResolver, ReviewService};
use crate::kernel::{
    BaseCompletion, BaseMovieStore, BaseRankingCatalog, OpenAiCompletion, PgMovieStore,
    PgRankingCatalog, ServerDeps,
};
use crate::server::middleware::{jwt_auth_middleware, require_auth};
use crate::server::routes::{
    add_movie_handler, admin_review_handler, get_movie_handler, health_handler,
    list_movies_handler, login_handler, register_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
    pub review_service: Arc<ReviewService>,
    pub jwt_service: Arc<JwtService>,
}

/// Build the Axum application router
///
/// All external collaborators are constructed here once and injected
/// through `ServerDeps`; nothing is opened at module level.
pub fn build_app(pool: PgPool, config: &Config) -> Result<Router> {
    // A template without the label placeholder is a configuration error,
    // caught here rather than on the first review submission.
    let template = PromptTemplate::new(&config.prompt_template)
        .context("BASE_PROMPT_TEMPLATE is malformed")?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        &config.jwt_refresh_secret,
        config.jwt_issuer.clone(),
    ));

    let completion: Arc<dyn BaseCompletion> =
        Arc::new(OpenAiCompletion::new(config.openai_api_key.clone()));
    let catalog: Arc<dyn BaseRankingCatalog> = Arc::new(PgRankingCatalog::new(pool.clone()));
    let movies: Arc<dyn BaseMovieStore> = Arc::new(PgMovieStore::new(pool.clone()));

    let deps = Arc::new(ServerDeps::new(
        pool.clone(),
        completion,
        catalog,
        movies,
        jwt_service.clone(),
    ));

    let resolver = ReviewResolver::new(deps.catalog.clone(), deps.completion.clone(), template);
    let review_service = Arc::new(ReviewService::new(resolver, deps.movies.clone()));

    let app_state = AppState {
        db_pool: pool,
        deps,
        review_service,
        jwt_service: jwt_service.clone(),
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Rate limiting: 10 requests per second per IP with bursts up to 20
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );
    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    // Routes requiring a valid bearer token
    let protected = Router::new()
        .route("/movie/:imdb_id", get(get_movie_handler))
        .route("/add-movie", put(add_movie_handler))
        .route("/review/:imdb_id", post(admin_review_handler))
        .route_layer(middleware::from_fn(require_auth));

    let jwt_service_for_middleware = jwt_service;

    // Middleware layers (applied in reverse order - last added runs first)
    let app = Router::new()
        .route("/movies", get(list_movies_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .merge(protected)
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(rate_limit_layer)
        .layer(Extension(app_state))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
