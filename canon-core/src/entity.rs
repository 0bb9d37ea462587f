//! # Entidades Resolvidas e Rótulos
//!
//! Uma entidade anexada a uma sentença pode vir de três fontes:
//!
//! | Fonte       | `text`                 | `canonical` | `matched_span`         |
//! |-------------|------------------------|-------------|------------------------|
//! | `generic`   | forma de superfície    | —           | —                      |
//! | `gazetteer` | nome canônico          | sim         | ocorrência literal     |
//! | `fuzzy`     | nome canônico          | sim         | janela que casou       |
//!
//! A fonte é representada como variante de enum: toda lógica de prioridade ou
//! de substituição faz `match` exaustivo sobre ela.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rótulo (tipo) de uma entidade.
///
/// Os tipos do gazetteer (PLAYER, TEAM, ...) e os tipos genéricos remapeados
/// pelo adaptador (ORGANIZATION, DATE, ...) compartilham o mesmo espaço de
/// rótulos, pois a deduplicação compara `(texto, rótulo)` entre fontes.
/// Strings desconhecidas são preservadas em `Other`, sempre em maiúsculas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    Player,
    Team,
    Competition,
    Venue,
    Organization,
    Date,
    Time,
    Place,
    Event,
    Other(String),
}

impl EntityLabel {
    /// Nome do rótulo como aparece no JSON (ex: "PLAYER").
    pub fn name(&self) -> &str {
        match self {
            EntityLabel::Player => "PLAYER",
            EntityLabel::Team => "TEAM",
            EntityLabel::Competition => "COMPETITION",
            EntityLabel::Venue => "VENUE",
            EntityLabel::Organization => "ORGANIZATION",
            EntityLabel::Date => "DATE",
            EntityLabel::Time => "TIME",
            EntityLabel::Place => "PLACE",
            EntityLabel::Event => "EVENT",
            EntityLabel::Other(name) => name,
        }
    }

    /// Interpreta um rótulo sem diferenciar maiúsculas (ex: "team" → Team).
    pub fn parse(s: &str) -> Self {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "PLAYER" => EntityLabel::Player,
            "TEAM" => EntityLabel::Team,
            "COMPETITION" => EntityLabel::Competition,
            "VENUE" => EntityLabel::Venue,
            "ORGANIZATION" => EntityLabel::Organization,
            "DATE" => EntityLabel::Date,
            "TIME" => EntityLabel::Time,
            "PLACE" => EntityLabel::Place,
            "EVENT" => EntityLabel::Event,
            _ => EntityLabel::Other(upper),
        }
    }
}

impl From<String> for EntityLabel {
    fn from(s: String) -> Self {
        EntityLabel::parse(&s)
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        label.name().to_string()
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fonte de uma entidade, sem os dados associados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitySource {
    Generic,
    Gazetteer,
    Fuzzy,
}

/// Entidade produzida pelo tagger genérico externo, antes da adaptação.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericEntity {
    pub text: String,
    /// Rótulo do tagger (PERSON, ORGANIZATION, DATE, TIME, PLACE, EVENT...)
    pub label: String,
}

impl GenericEntity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Entidade final anexada a uma sentença.
///
/// Serializa como `{"source": "...", "text": ..., "label": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Entity {
    /// Vinda do tagger genérico, sem forma canônica.
    Generic { text: String, label: EntityLabel },
    /// Ocorrência literal de um alias do gazetteer.
    Gazetteer {
        text: String,
        label: EntityLabel,
        canonical: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        matched_span: Option<String>,
    },
    /// Correspondência aproximada de uma janela de tokens.
    Fuzzy {
        text: String,
        label: EntityLabel,
        canonical: String,
        matched_span: String,
    },
}

impl Entity {
    pub fn text(&self) -> &str {
        match self {
            Entity::Generic { text, .. }
            | Entity::Gazetteer { text, .. }
            | Entity::Fuzzy { text, .. } => text,
        }
    }

    pub fn label(&self) -> &EntityLabel {
        match self {
            Entity::Generic { label, .. }
            | Entity::Gazetteer { label, .. }
            | Entity::Fuzzy { label, .. } => label,
        }
    }

    pub fn source(&self) -> EntitySource {
        match self {
            Entity::Generic { .. } => EntitySource::Generic,
            Entity::Gazetteer { .. } => EntitySource::Gazetteer,
            Entity::Fuzzy { .. } => EntitySource::Fuzzy,
        }
    }

    pub fn canonical(&self) -> Option<&str> {
        match self {
            Entity::Generic { .. } => None,
            Entity::Gazetteer { canonical, .. } | Entity::Fuzzy { canonical, .. } => {
                Some(canonical)
            }
        }
    }

    /// Par `(trecho a substituir, forma canônica)` para entidades de domínio.
    ///
    /// O trecho é o `matched_span` quando presente, senão o próprio `text`.
    /// Entidades genéricas e canônicos vazios não participam da substituição.
    pub fn substitution(&self) -> Option<(&str, &str)> {
        match self {
            Entity::Generic { .. } => None,
            Entity::Gazetteer {
                text,
                canonical,
                matched_span,
                ..
            } => {
                let span = matched_span.as_deref().unwrap_or(text);
                (!canonical.is_empty()).then_some((span, canonical.as_str()))
            }
            Entity::Fuzzy {
                canonical,
                matched_span,
                ..
            } => (!canonical.is_empty()).then_some((matched_span.as_str(), canonical.as_str())),
        }
    }

    /// Chave de deduplicação: texto em minúsculas + rótulo.
    pub fn dedup_key(&self) -> (String, EntityLabel) {
        (self.text().to_lowercase(), self.label().clone())
    }
}
