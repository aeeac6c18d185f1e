use axum::{http::HeaderValue, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::middleware::request_id_layer;
use crate::routes;
use crate::services::{JobStore, QuoteService, RateTableStore};

/// Upper bound for survey payloads
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub rate_tables: RateTableStore,
    pub jobs: JobStore,
    pub quotes: QuoteService,
}

impl AppState {
    pub fn new(settings: Settings, rate_tables: RateTableStore, jobs: JobStore) -> Arc<Self> {
        let quotes = QuoteService::new(rate_tables.clone(), jobs.clone());
        Arc::new(Self {
            settings,
            rate_tables,
            jobs,
            quotes,
        })
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.settings);

    // DEBUG spans keep per-request overhead low at INFO
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    let (set_request_id, propagate_request_id) = request_id_layer();

    Router::new()
        .merge(routes::api_router())
        // Middleware stack (applied bottom-up)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let max_age = if settings.env.is_dev() {
        std::time::Duration::from_secs(86400)
    } else {
        std::time::Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static("x-request-id"),
        ]))
        .max_age(max_age)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app() -> Router {
        create_app(AppState::new(
            Settings::for_tests(),
            RateTableStore::new(),
            JobStore::new(),
        ))
    }

    fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let response = app()
            .oneshot(request(Method::GET, "/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn survey_to_quote_flow() {
        let app = app();
        let company_id = Uuid::new_v4();
        let job_id = Uuid::new_v4();
        let job_uri = format!("/companies/{company_id}/jobs/{job_id}");

        let (status, _) = send(
            &app,
            request(
                Method::PUT,
                &job_uri,
                Some(json!({
                    "rooms": [{
                        "id": Uuid::new_v4(),
                        "name": "Bedroom",
                        "items": [{"name": "Bed", "quantity": 1, "cbm": "2.5", "weight_kg": "80"}]
                    }]
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // No rate table yet
        let quote_uri = format!("{job_uri}/quote");
        let (status, body) = send(&app, request(Method::GET, &quote_uri, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "PRICING_NOT_CONFIGURED");
        assert_eq!(body["message"], "Pricing not configured for this company");

        let (status, _) = send(
            &app,
            request(
                Method::POST,
                &format!("/companies/{company_id}/pricing/defaults"),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, request(Method::GET, &quote_uri, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_items"], 1);
        assert_eq!(body["data"]["bulky_items"], 1);
        assert_eq!(body["data"]["has_custom_price"], false);

        let (status, body) = send(&app, request(Method::GET, &job_uri, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_cbm"], "2.5");
        assert_eq!(body["data"]["total_weight_kg"], "80");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (status, _) = send(&app(), request(Method::GET, "/nope", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
