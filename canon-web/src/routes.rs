//! Rotas HTTP do servidor de canonicalização.
//!
//! ## Endpoints
//!
//! - `GET  /health`: estado, número de aliases e de entidades do índice.
//! - `POST /resolve`: entidades de um único texto.
//! - `POST /canonicalize`: resolve e reescreve sentenças e segmentos.
//! - `POST /canonicalize/plaintext`: transcrição final em texto puro.
//! - `POST /entities/:label`: pares `(entidade, sentença)` de um rótulo.
//!
//! A resolução é síncrona e usa o rayon; roda em `spawn_blocking` para não
//! bloquear o runtime do tokio.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use canon_core::transcript::{entities_by_type, render_plaintext};
use canon_core::{canonicalize, Entity, EntityLabel, EntityResolver, GenericEntity, Segment, Sentence};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Estado compartilhado da aplicação
pub struct AppState {
    pub resolver: EntityResolver,
    pub substitution_enabled: bool,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/resolve", post(resolve_handler))
        .route("/canonicalize", post(canonicalize_handler))
        .route("/canonicalize/plaintext", post(plaintext_handler))
        .route("/entities/:label", post(entities_handler))
        .with_state(state)
}

#[derive(Deserialize)]
struct ResolveRequest {
    text: String,
    #[serde(default)]
    generic_entities: Vec<GenericEntity>,
}

#[derive(Serialize)]
struct ResolveResponse {
    entities: Vec<Entity>,
}

#[derive(Deserialize)]
struct TranscriptRequest {
    sentences: Vec<Sentence>,
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Serialize)]
struct TranscriptResponse {
    sentences: Vec<Sentence>,
    segments: Vec<Segment>,
}

#[derive(Serialize)]
struct EntityMention {
    entity: String,
    sentence: String,
}

/// Erro de requisição convertido em `{"error": msg}`.
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let index = state.resolver.index();
    let entities: HashSet<&str> = index
        .iter()
        .map(|(_, hit)| hit.canonical_name.as_str())
        .collect();
    Json(serde_json::json!({
        "status": "ok",
        "aliases": index.len(),
        "entities": entities.len(),
    }))
}

async fn resolve_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let entities = tokio::task::spawn_blocking(move || {
        state.resolver.resolve(&req.text, &req.generic_entities)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(ResolveResponse { entities }))
}

async fn canonicalize_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranscriptRequest>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let (sentences, segments) = process(state, req).await?;
    Ok(Json(TranscriptResponse { sentences, segments }))
}

async fn plaintext_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranscriptRequest>,
) -> Result<String, ApiError> {
    let (_, segments) = process(state, req).await?;
    Ok(render_plaintext(&segments))
}

async fn entities_handler(
    State(state): State<Arc<AppState>>,
    Path(label): Path<String>,
    Json(req): Json<TranscriptRequest>,
) -> Result<Json<Vec<EntityMention>>, ApiError> {
    let label = EntityLabel::parse(&label);
    let (sentences, _) = process(state, req).await?;
    let mentions = entities_by_type(&sentences, &label)
        .into_iter()
        .map(|(entity, sentence)| EntityMention { entity, sentence })
        .collect();
    Ok(Json(mentions))
}

/// Anota as sentenças e, se habilitado, aplica a substituição canônica.
async fn process(
    state: Arc<AppState>,
    req: TranscriptRequest,
) -> Result<(Vec<Sentence>, Vec<Segment>), ApiError> {
    if req.sentences.is_empty() {
        return Err(ApiError::BadRequest("Nenhuma sentença enviada".to_string()));
    }
    info!(
        "Canonicalizando {} sentenças e {} segmentos",
        req.sentences.len(),
        req.segments.len()
    );

    tokio::task::spawn_blocking(move || {
        let TranscriptRequest {
            mut sentences,
            segments,
        } = req;
        state.resolver.annotate_all(&mut sentences);
        if state.substitution_enabled {
            canonicalize(sentences, segments)
        } else {
            (sentences, segments)
        }
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))
}
