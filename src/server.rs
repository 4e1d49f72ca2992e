use std::sync::Arc;

use axum::{
    extract::State,
    http::{
        header::{self, InvalidHeaderValue},
        HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use derive_more::From;
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{api, render, Config};

pub fn app(config: &Config) -> Result<Router, InvalidHeaderValue> {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);
    for origin in &config.http.cors.allowed_origins {
        cors = cors.allow_origin(origin.parse::<HeaderValue>()?);
    }

    let mut app = Router::new()
        .route("/generate-ticket", post(generate_ticket))
        .route("/health", get(health));
    // Asset directory is optional: without it the mount is simply
    // absent.
    if config.render.static_dir.is_dir() {
        app = app
            .nest_service("/static", ServeDir::new(&config.render.static_dir));
    }

    Ok(app.layer(cors).with_state(Arc::new(AppState {
        renderer: render::Renderer::new(config.render.templates_dir.clone()),
    })))
}

async fn generate_ticket(
    State(state): State<SharedAppState>,
    Json(ticket): Json<api::TicketRequest>,
) -> Result<Response, GenerateTicketError> {
    let mut context = render::normalize(&ticket);
    context.qr_code_data_uri = render::qr::data_uri(&ticket);

    let pdf = state.renderer.render_ticket(&context)?;

    let filename = format!(
        "ticket-{}.pdf",
        ticket.ticket_number.as_deref().unwrap_or("unknown")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        pdf,
    )
        .into_response())
}

#[derive(Debug, From)]
pub enum GenerateTicketError {
    #[from]
    Render(render::pdf::Error),
}

impl IntoResponse for GenerateTicketError {
    fn into_response(self) -> Response {
        use render::pdf::Error as E;

        let Self::Render(error) = self;
        let detail = match error {
            E::TemplateNotFound(e) => format!("Template introuvable: {e}"),
            E::PdfGeneration(e) => format!("Erreur génération PDF: {e}"),
        };
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": detail })),
        )
            .into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

type SharedAppState = Arc<AppState>;

struct AppState {
    renderer: render::Renderer,
}
