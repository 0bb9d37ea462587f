//! Servidor web Axum para resolução de entidades e canonicalização de transcrições

mod config;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use canon_core::{AliasIndex, EntityResolver, Gazetteer};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Settings;
use crate::routes::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();

    tracing_subscriber::fmt()
        .with_env_filter(settings.log.as_str())
        .init();

    let gazetteer = Gazetteer::load(&settings.gazetteer)
        .with_context(|| format!("falha ao ler o gazetteer {}", settings.gazetteer.display()))?;
    let index = AliasIndex::build(&gazetteer).context("gazetteer inválido")?;
    let resolver = EntityResolver::new(index).with_config(settings.resolver_config());

    let state = Arc::new(AppState {
        resolver,
        substitution_enabled: settings.substitution_enabled(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = app(state).layer(cors).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(settings.bind)
        .await
        .with_context(|| format!("falha ao escutar em {}", settings.bind))?;
    info!("🚀 Servidor de canonicalização iniciado em http://{}", settings.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
