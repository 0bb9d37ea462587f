//! # Sentenças, Segmentos e Transcrições
//!
//! Duas visões independentes do mesmo conteúdo:
//!
//! - **Sentenças**: produzidas pelo segmentador externo; recebem as entidades
//!   resolvidas e têm o texto reescrito pela substituição canônica.
//! - **Segmentos**: trechos com tempo (`start`/`end` em segundos) vindos da
//!   transcrição de áudio; sobrepõem as sentenças em tempo e conteúdo.
//!
//! Campos desconhecidos (ex: `start_char`, `pitch`, `energy`) são preservados
//! sem alteração em ambas as estruturas.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::{EntityLabel, Entity, GenericEntity};
use crate::error::Result;

/// Uma sentença da transcrição.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    #[serde(default)]
    pub start: Option<f64>,
    /// Entidades resolvidas; definidas uma vez e nunca reordenadas.
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Entidades do tagger genérico, quando já vêm junto com a sentença.
    #[serde(default, skip_serializing)]
    pub generic_entities: Vec<GenericEntity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Sentence {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_generic(mut self, generic: Vec<GenericEntity>) -> Self {
        self.generic_entities = generic;
        self
    }
}

/// Um segmento com tempo da transcrição de áudio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            extra: Map::new(),
        }
    }
}

/// Arquivo de transcrição: sentenças e segmentos juntos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Transcript {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }
}

/// Lista plana `(texto da entidade, texto da sentença)` para um rótulo.
pub fn entities_by_type(sentences: &[Sentence], label: &EntityLabel) -> Vec<(String, String)> {
    sentences
        .iter()
        .flat_map(|s| {
            s.entities
                .iter()
                .filter(|e| e.label() == label)
                .map(move |e| (e.text().to_string(), s.text.clone()))
        })
        .collect()
}

/// Formata segundos como `h:mm:ss` (frações descartadas).
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (m, s) = (total / 60, total % 60);
    let (h, m) = (m / 60, m % 60);
    format!("{h}:{m:02}:{s:02}")
}

/// Transcrição em texto puro, uma linha `[início - fim] texto` por segmento.
pub fn render_plaintext(segments: &[Segment]) -> String {
    let mut out = String::from("FULL TRANSCRIPT\n\n");
    for seg in segments {
        let _ = writeln!(
            out,
            "[{} - {}] {}",
            format_timestamp(seg.start),
            format_timestamp(seg.end),
            seg.text
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "0:00:00");
        assert_eq!(format_timestamp(75.9), "0:01:15");
        assert_eq!(format_timestamp(3725.0), "1:02:05");
        assert_eq!(format_timestamp(-3.0), "0:00:00");
    }

    #[test]
    fn test_render_plaintext() {
        let segs = vec![
            Segment::new(0.0, 4.2, "Lee scored"),
            Segment::new(61.0, 65.5, "what a goal"),
        ];
        assert_eq!(
            render_plaintext(&segs),
            "FULL TRANSCRIPT\n\n[0:00:00 - 0:00:04] Lee scored\n[0:01:01 - 0:01:05] what a goal\n"
        );
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let json = r#"{"start": 1.0, "end": 2.0, "text": "hi", "pitch": 180.5, "emphasized": true}"#;
        let seg: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(seg.extra["pitch"], 180.5);
        let back = serde_json::to_value(&seg).unwrap();
        assert_eq!(back["emphasized"], true);
        assert_eq!(back["text"], "hi");
    }

    #[test]
    fn test_sentence_generic_entities_are_input_only() {
        let json = r#"{"text": "Kane at Wembley", "start": null,
                       "generic_entities": [{"text": "Kane", "label": "PERSON"}]}"#;
        let sentence: Sentence = serde_json::from_str(json).unwrap();
        assert_eq!(sentence.generic_entities.len(), 1);
        assert!(sentence.start.is_none());

        let out = serde_json::to_value(&sentence).unwrap();
        assert!(out.get("generic_entities").is_none());
        assert_eq!(out["entities"], serde_json::json!([]));
    }

    #[test]
    fn test_entities_by_type() {
        let mut s1 = Sentence::new("Robert Lee scored");
        s1.entities = vec![
            Entity::Gazetteer {
                text: "Robert Lee".to_string(),
                label: EntityLabel::Player,
                canonical: "Robert Lee".to_string(),
                matched_span: Some("Lee".to_string()),
            },
            Entity::Generic {
                text: "Saturday".to_string(),
                label: EntityLabel::Date,
            },
        ];
        let pairs = entities_by_type(&[s1], &EntityLabel::Player);
        assert_eq!(
            pairs,
            vec![("Robert Lee".to_string(), "Robert Lee scored".to_string())]
        );
    }

    #[test]
    fn test_transcript_from_json() {
        let t = Transcript::from_json_str(
            r#"{"sentences": [{"text": "Lee scored"}], "segments": [{"start": 0, "end": 1.5, "text": "Lee scored"}]}"#,
        )
        .unwrap();
        assert_eq!(t.sentences[0].text, "Lee scored");
        assert_eq!(t.segments[0].end, 1.5);
    }
}
