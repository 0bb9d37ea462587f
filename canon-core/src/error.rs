//! Tipos de erro do `canon-core`.

use thiserror::Error;

/// Resultado padrão das operações do crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Erros que podem interromper a construção do índice ou a leitura de arquivos.
///
/// Falhas de correspondência (nenhum alias acima do limiar, sentença vazia)
/// não são erros: resultam apenas em listas vazias.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Gazetteer malformado (entrada sem nome ou sem tipo, lista vazia).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Falha de leitura de arquivo.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON inválido ou com estrutura inesperada.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Cria um erro de configuração.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}
