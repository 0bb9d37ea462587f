//! Configuração do servidor: argumentos de linha de comando com fallback para
//! variáveis de ambiente.

use std::net::SocketAddr;
use std::path::PathBuf;

use canon_core::config::DEFAULT_FUZZY_THRESHOLD;
use canon_core::ResolverConfig;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "canon-web", version, about = "Resolução de entidades e canonicalização de transcrições")]
pub struct Settings {
    /// Arquivo JSON do gazetteer
    #[arg(
        long,
        env = "CANON_GAZETTEER",
        default_value = "data/gazetteers/players_and_teams.json"
    )]
    pub gazetteer: PathBuf,

    /// Endereço de escuta
    #[arg(long, env = "CANON_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Pontuação mínima (0–100) para aceitar um casamento fuzzy
    #[arg(long, env = "CANON_THRESHOLD", default_value_t = DEFAULT_FUZZY_THRESHOLD)]
    pub threshold: f64,

    /// Só anota as entidades, sem reescrever sentenças e segmentos
    #[arg(long, env = "CANON_NO_SUBSTITUTION")]
    pub no_substitution: bool,

    /// Filtro do tracing-subscriber (ex: `info`, `canon_core=debug`)
    #[arg(long, env = "CANON_LOG", default_value = "info")]
    pub log: String,
}

impl Settings {
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::default().with_threshold(self.threshold)
    }

    pub fn substitution_enabled(&self) -> bool {
        !self.no_substitution
    }
}
