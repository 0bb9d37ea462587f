//! # Gazetteer de Domínio
//!
//! Lista curada de jogadores, times, competições e estádios com suas formas
//! alternativas de escrita. É carregada uma única vez por execução, no formato:
//!
//! ```json
//! { "entities": [ { "name": "Robert Lee", "type": "PLAYER", "aliases": ["Lee", "R. Lee"] } ] }
//! ```
//!
//! Os campos `name` e `type` são opcionais na leitura para que uma entrada
//! incompleta seja reportada como erro de configuração (com o índice da entrada)
//! na construção do [`AliasIndex`](crate::alias_index::AliasIndex).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::EntityLabel;
use crate::error::{Error, Result};

/// Entrada do arquivo de gazetteer, exatamente como lida do JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GazetteerRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl GazetteerRecord {
    pub fn new(name: &str, entity_type: &str, aliases: &[&str]) -> Self {
        Self {
            name: Some(name.to_string()),
            entity_type: Some(entity_type.to_string()),
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Valida a entrada `index` e produz a entidade correspondente.
    pub fn validate(&self, index: usize) -> Result<GazetteerEntity> {
        let canonical_name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(Error::configuration(format!(
                    "gazetteer entry {index} has no canonical name"
                )))
            }
        };
        let entity_type = match self.entity_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => EntityLabel::parse(t),
            _ => {
                return Err(Error::configuration(format!(
                    "gazetteer entry {index} ('{canonical_name}') has no type"
                )))
            }
        };
        Ok(GazetteerEntity {
            canonical_name,
            entity_type,
            aliases: self.aliases.clone(),
        })
    }
}

/// Entidade de domínio validada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GazetteerEntity {
    pub canonical_name: String,
    pub entity_type: EntityLabel,
    pub aliases: Vec<String>,
}

/// O arquivo de gazetteer completo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gazetteer {
    #[serde(default)]
    pub entities: Vec<GazetteerRecord>,
}

impl Gazetteer {
    pub fn new(entities: Vec<GazetteerRecord>) -> Self {
        Self { entities }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Lê o gazetteer de um arquivo JSON (UTF-8).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }
}
