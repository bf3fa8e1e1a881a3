use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use prometheus::{Encoder, TextEncoder};
use uuid::Uuid;

use super::error::ErrorTranslator;
use super::failure::Failure;
use crate::domain::user::{Email, UserSignedIn};
use crate::event_sourcing::{DomainEvent, EventData};
use crate::metrics::Metrics;

// ============================================================================
// HTTP Boundary
// ============================================================================
//
// Thin actix-web surface over the sign-in flow. Handlers construct failures;
// the error translator is the only component that shapes error output.
//
// ============================================================================

/// In-memory record of who signed in. Not an event store - just enough read
/// state for the lookup endpoint.
#[derive(Debug, Default)]
pub struct SignInLog {
    entries: RwLock<HashMap<Uuid, Email>>,
}

impl SignInLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: &UserSignedIn) {
        // a poisoned lock still yields usable map state
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(event.user_id(), event.email().clone());
    }

    pub fn find(&self, user_id: Uuid) -> Option<Email> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(&user_id).cloned()
    }
}

/// Start the HTTP server
pub async fn start_http_server(
    translator: ErrorTranslator,
    metrics: Arc<Metrics>,
    sign_in_log: Arc<SignInLog>,
    port: u16,
) -> std::io::Result<()> {
    tracing::info!("🌐 Starting HTTP server on http://0.0.0.0:{}", port);

    let translator = web::Data::new(translator);
    let metrics = web::Data::from(metrics);
    let sign_in_log = web::Data::from(sign_in_log);

    HttpServer::new(move || {
        let json_translator = translator.get_ref().clone();

        App::new()
            .app_data(translator.clone())
            .app_data(metrics.clone())
            .app_data(sign_in_log.clone())
            // Broken JSON framing never reaches a handler; it is wrapped as
            // an HTTP-originating failure and shaped by the same translator.
            .app_data(web::JsonConfig::default().error_handler(move |err, _req| {
                let failure = Failure::http(StatusCode::BAD_REQUEST, err.to_string());
                let response = json_translator.to_response(&failure);
                actix_web::error::InternalError::from_response(err, response).into()
            }))
            .route("/users/sign-in", web::post().to(sign_in_handler))
            .route("/users/{id}", web::get().to(get_user_handler))
            .route("/health", web::get().to(health_handler))
            .route("/metrics", web::get().to(metrics_handler))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

async fn sign_in_handler(
    body: web::Json<EventData>,
    sign_in_log: web::Data<SignInLog>,
    metrics: web::Data<Metrics>,
    translator: web::Data<ErrorTranslator>,
) -> HttpResponse {
    metrics.http_requests_total.with_label_values(&["sign_in"]).inc();

    let data = body.into_inner();
    match UserSignedIn::deserialize(&data) {
        Ok(event) => {
            sign_in_log.record(&event);
            metrics.sign_ins_total.inc();
            tracing::info!(user_id = %event.user_id(), "✅ User signed in");
            HttpResponse::Ok().json(event.serialize())
        }
        Err(err) => error_response(&translator, &metrics, Failure::from(err)),
    }
}

async fn get_user_handler(
    path: web::Path<String>,
    sign_in_log: web::Data<SignInLog>,
    metrics: web::Data<Metrics>,
    translator: web::Data<ErrorTranslator>,
) -> HttpResponse {
    metrics.http_requests_total.with_label_values(&["get_user"]).inc();

    let raw_id = path.into_inner();
    let user_id = match Uuid::parse_str(&raw_id) {
        Ok(id) => id,
        Err(err) => {
            let failure =
                Failure::invalid_argument(format!("Invalid user id `{}`: {}", raw_id, err));
            return error_response(&translator, &metrics, failure);
        }
    };

    match sign_in_log.find(user_id) {
        Some(email) => HttpResponse::Ok().json(UserSignedIn::create(user_id, email).serialize()),
        None => {
            let failure = Failure::not_found(format!("User {} not found", user_id));
            error_response(&translator, &metrics, failure)
        }
    }
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "user-api"
    }))
}

async fn metrics_handler(
    metrics: web::Data<Metrics>,
    translator: web::Data<ErrorTranslator>,
) -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = metrics.registry().gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", err);
        let failure = Failure::internal(format!("Failed to encode metrics: {}", err));
        return error_response(&translator, &metrics, failure);
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

fn error_response(
    translator: &ErrorTranslator,
    metrics: &Metrics,
    failure: Failure,
) -> HttpResponse {
    let response = translator.to_response(&failure);
    metrics
        .error_responses_total
        .with_label_values(&[failure.kind().label(), response.status().as_str()])
        .inc();
    response
}

// ============================================================================
// Tests
// ============================================================================
