//! # Adaptador de Entidades Genéricas
//!
//! O tagger genérico (externo, opaco para este crate) anuncia pessoas,
//! organizações, datas, horários, lugares e eventos. Este adaptador:
//!
//! 1. Mantém apenas os rótulos aceitos (ORGANIZATION, DATE, TIME, PLACE,
//!    EVENT, PERSON). As formas curtas ORG e GPE valem como ORGANIZATION e PLACE.
//! 2. Remapeia PERSON → PLAYER.
//! 3. Descarta entidades cujo texto (minúsculas) já foi resolvido pelos
//!    matchers de domínio na mesma sentença.

use std::collections::HashSet;

use crate::entity::{Entity, EntityLabel, GenericEntity};

/// Capacidade de reconhecimento genérico injetada no resolvedor.
pub trait GenericTagger: Send + Sync {
    fn tag(&self, text: &str) -> Vec<GenericEntity>;
}

/// Tagger que não reconhece nada; útil quando as entidades genéricas já vêm
/// prontas junto com as sentenças.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTagger;

impl GenericTagger for NoopTagger {
    fn tag(&self, _text: &str) -> Vec<GenericEntity> {
        Vec::new()
    }
}

/// Mapeia um rótulo do tagger genérico para o rótulo final; `None` se não aceito.
pub fn accepted_label(label: &str) -> Option<EntityLabel> {
    match label.trim().to_uppercase().as_str() {
        "PERSON" => Some(EntityLabel::Player),
        "ORGANIZATION" | "ORG" => Some(EntityLabel::Organization),
        "DATE" => Some(EntityLabel::Date),
        "TIME" => Some(EntityLabel::Time),
        "PLACE" | "GPE" => Some(EntityLabel::Place),
        "EVENT" => Some(EntityLabel::Event),
        _ => None,
    }
}

/// Filtra e remapeia as entidades genéricas de uma sentença.
///
/// `domain_texts` contém os textos (minúsculas) das entidades de gazetteer e
/// fuzzy da mesma sentença.
pub fn adapt(generic_entities: &[GenericEntity], domain_texts: &HashSet<String>) -> Vec<Entity> {
    generic_entities
        .iter()
        .filter_map(|ent| {
            let label = accepted_label(&ent.label)?;
            if domain_texts.contains(&ent.text.to_lowercase()) {
                return None;
            }
            Some(Entity::Generic {
                text: ent.text.clone(),
                label,
            })
        })
        .collect()
}
