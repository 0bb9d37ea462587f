//! # Índice de Aliases
//!
//! Tabela de consulta que mapeia cada alias conhecido (em minúsculas) para a
//! entidade canônica dona dele. O nome canônico é sempre registrado como alias
//! de si mesmo.
//!
//! ## Colisões
//!
//! Quando duas entidades compartilham um alias, a que aparece **depois** no
//! gazetteer vence (last-write-wins). A colisão é registrada em log com nível
//! `warn`, mas não interrompe a construção.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::entity::EntityLabel;
use crate::error::{Error, Result};
use crate::gazetteer::{Gazetteer, GazetteerEntity};

/// O que o índice devolve para um alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedAlias {
    pub canonical_name: String,
    pub entity_type: EntityLabel,
}

/// Índice somente leitura, construído uma vez por execução.
#[derive(Debug, Clone)]
pub struct AliasIndex {
    map: HashMap<String, IndexedAlias>,
    /// Aliases distintos na ordem do primeiro registro (universo do fuzzy).
    universe: Vec<String>,
    /// Mesmos aliases, do mais longo para o mais curto (ordem estável).
    longest_first: Vec<String>,
}

impl AliasIndex {
    /// Constrói o índice a partir do gazetteer inteiro.
    ///
    /// Todas as entradas são validadas antes de qualquer inserção: em caso de
    /// erro nenhum índice parcial é exposto.
    pub fn build(gazetteer: &Gazetteer) -> Result<Self> {
        if gazetteer.entities.is_empty() {
            return Err(Error::configuration("gazetteer has no entities"));
        }
        let entities = gazetteer
            .entities
            .iter()
            .enumerate()
            .map(|(i, record)| record.validate(i))
            .collect::<Result<Vec<GazetteerEntity>>>()?;

        Ok(Self::from_entities(&entities))
    }

    /// Constrói o índice a partir de entidades já validadas.
    pub fn from_entities(entities: &[GazetteerEntity]) -> Self {
        let mut map: HashMap<String, IndexedAlias> = HashMap::new();
        let mut universe = Vec::new();

        for entity in entities {
            let surfaces = entity
                .aliases
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(entity.canonical_name.as_str()));

            for surface in surfaces {
                let key = surface.trim().to_lowercase();
                if key.is_empty() {
                    continue;
                }
                let entry = IndexedAlias {
                    canonical_name: entity.canonical_name.clone(),
                    entity_type: entity.entity_type.clone(),
                };
                match map.insert(key.clone(), entry) {
                    None => universe.push(key),
                    Some(previous) if previous.canonical_name != entity.canonical_name => {
                        warn!(
                            "Alias '{}' de '{}' sobrescrito por '{}'",
                            key, previous.canonical_name, entity.canonical_name
                        );
                    }
                    Some(_) => {}
                }
            }
        }

        let mut longest_first = universe.clone();
        longest_first.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        info!(
            "Índice de aliases construído: {} entidades, {} aliases",
            entities.len(),
            universe.len()
        );

        Self {
            map,
            universe,
            longest_first,
        }
    }

    /// Consulta um alias sem diferenciar maiúsculas.
    pub fn get(&self, alias: &str) -> Option<&IndexedAlias> {
        self.map.get(&alias.trim().to_lowercase())
    }

    /// Todos os aliases registrados (minúsculas), na ordem do primeiro registro.
    pub fn universe(&self) -> &[String] {
        &self.universe
    }

    /// Aliases ordenados do mais longo para o mais curto.
    pub fn longest_first(&self) -> &[String] {
        &self.longest_first
    }

    /// Itera `(alias, entidade)` na ordem do universo.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexedAlias)> {
        self.universe
            .iter()
            .filter_map(|alias| self.map.get(alias).map(|ent| (alias.as_str(), ent)))
    }

    pub fn len(&self) -> usize {
        self.universe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universe.is_empty()
    }
}
