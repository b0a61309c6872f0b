use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState, static_dir: &str) -> Router {
    let static_assets = Router::new()
        .fallback_service(
            ServeDir::new(static_dir)
                .precompressed_br()
                .precompressed_gzip(),
        )
        .layer(middleware::from_fn(set_static_cache_control));

    let app = Router::new()
        .route("/api/health", get(routes::api::health))
        .route("/api/metrics", get(routes::api::metrics))
        .route(
            "/api/population/presets",
            get(routes::population::get_presets),
        )
        .route(
            "/api/population/optimize",
            post(routes::population::optimize),
        )
        .route(
            "/api/nations/{name}/population",
            get(routes::population::get_population).post(routes::population::submit_population),
        )
        .route(
            "/api/nations/{name}/population/suggestion",
            get(routes::population::get_suggestion),
        )
        .route(
            "/api/nations/{name}/consumption",
            put(routes::population::put_consumption),
        );

    app.layer(CompressionLayer::new())
        .fallback_service(static_assets)
        .with_state(state)
}

async fn set_static_cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if response.status().is_success()
        && let Some(cache_control) = cache_control_for_path(&path)
    {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        );
    }

    response
}

fn cache_control_for_path(path: &str) -> Option<&'static str> {
    if path.starts_with("/js/") || path.starts_with("/css/") || path.starts_with("/img/") {
        return Some("public, max-age=86400");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_cache_for_static_asset_dirs() {
        assert_eq!(
            cache_control_for_path("/js/population.js"),
            Some("public, max-age=86400")
        );
        assert_eq!(
            cache_control_for_path("/css/style.css"),
            Some("public, max-age=86400")
        );
    }

    #[test]
    fn no_cache_header_override_for_html() {
        assert_eq!(cache_control_for_path("/"), None);
        assert_eq!(cache_control_for_path("/population.html"), None);
    }
}
