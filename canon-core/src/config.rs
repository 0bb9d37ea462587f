//! Parâmetros do resolvedor de entidades.

use serde::{Deserialize, Serialize};

/// Limiar padrão do matcher fuzzy (escala 0–100).
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 87.0;

/// Configuração do matcher fuzzy.
///
/// Todos os campos têm valores padrão, então um JSON parcial
/// (ex: `{"threshold": 90}`) é aceito.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Pontuação mínima para aceitar um alias.
    pub threshold: f64,
    /// Janelas mais curtas que isso (em caracteres, unidas por espaço) são ignoradas.
    pub min_window_chars: usize,
    /// Maior número de tokens de uma janela.
    pub max_window_tokens: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_FUZZY_THRESHOLD,
            min_window_chars: 4,
            max_window_tokens: 3,
        }
    }
}

impl ResolverConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}
