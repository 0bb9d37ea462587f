//! # Substituição Canônica
//!
//! Reescreve o texto das sentenças e, depois, o dos segmentos com tempo, para
//! que toda menção a uma entidade use a mesma grafia canônica.
//!
//! ## Etapas (sempre nesta ordem)
//!
//! 1. **Sentenças** ([`canonicalize_sentences`]): para cada entidade de
//!    domínio, substitui o trecho pela forma canônica, no máximo uma vez por
//!    forma canônica em cada sentença (conjunto de formas já aplicadas).
//! 2. **Segmentos** ([`propagate_to_segments`]): cada segmento recebe as
//!    substituições de **todas** as entidades de todas as sentenças, exceto
//!    quando a forma canônica já está presente no texto do segmento.
//!
//! A diferença entre as guardas (conjunto aplicado × presença) é intencional.
//!
//! ## Regras da substituição
//!
//! - Palavra inteira e sem diferenciar maiúsculas: `\b` + trecho + `\b`, então
//!   "Lee" não casa dentro de "Leeds".
//! - Uma ocorrência do trecho que está dentro de uma menção canônica já
//!   existente (ex: "Lee" em "Robert Lee") não é tocada.
//! - Na etapa de sentenças, uma forma canônica que já aparece escrita na
//!   sentença, fora das ocorrências dos trechos que levam a ela, conta como
//!   aplicada. Junto com a regra anterior, isso torna as duas etapas
//!   idempotentes.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use regex::{Regex, RegexBuilder};
use tracing::{debug, info, warn};

use crate::entity::Entity;
use crate::transcript::{Segment, Sentence};

/// Executa as duas etapas e devolve sentenças e segmentos reescritos.
///
/// Recebe os valores por posse: a etapa de segmentos só começa depois que
/// todas as sentenças já foram resolvidas e reescritas.
pub fn canonicalize(
    mut sentences: Vec<Sentence>,
    mut segments: Vec<Segment>,
) -> (Vec<Sentence>, Vec<Segment>) {
    let sentence_rewrites = canonicalize_sentences(&mut sentences);
    let segment_rewrites = propagate_to_segments(&sentences, &mut segments);
    info!(
        "Substituição canônica: {} em sentenças, {} em segmentos",
        sentence_rewrites, segment_rewrites
    );
    (sentences, segments)
}

/// Etapa 1: reescreve cada sentença com as próprias entidades.
///
/// Retorna quantas substituições alteraram algum texto.
pub fn canonicalize_sentences(sentences: &mut [Sentence]) -> usize {
    let mut rewrites = 0;

    for sentence in sentences.iter_mut() {
        let rewriter = Rewriter::new(sentence.entities.iter().filter_map(Entity::canonical));
        let mut applied: HashSet<String> = HashSet::new();
        let mut text = sentence.text.clone();

        // trechos de cada forma canônica, na ordem das entidades
        let mut spans_by_canonical: HashMap<String, Vec<Regex>> = HashMap::new();
        for (span, canonical) in sentence.entities.iter().filter_map(Entity::substitution) {
            let canonical_lower = canonical.to_lowercase();
            if span.to_lowercase() == canonical_lower {
                continue;
            }
            if let Some(pattern) = word_pattern(span) {
                spans_by_canonical.entry(canonical_lower).or_default().push(pattern);
            }
        }

        for entity in &sentence.entities {
            let Some((span, canonical)) = entity.substitution() else {
                continue;
            };
            let canonical_lower = canonical.to_lowercase();
            if span.to_lowercase() == canonical_lower || applied.contains(&canonical_lower) {
                continue;
            }
            let Some(pattern) = word_pattern(span) else {
                continue;
            };
            let own_spans = spans_by_canonical
                .get(&canonical_lower)
                .map(Vec::as_slice)
                .unwrap_or_default();
            if rewriter.already_written(&text, canonical, own_spans) {
                debug!(
                    "'{}' já aparece na sentença; '{}' não é substituído",
                    canonical, span
                );
                applied.insert(canonical_lower);
                continue;
            }
            if let Some(new_text) = rewriter.rewrite(&text, &pattern, canonical) {
                text = new_text;
                applied.insert(canonical_lower);
                rewrites += 1;
            }
        }
        sentence.text = text;
    }
    rewrites
}

/// Etapa 2: propaga as formas canônicas de todas as sentenças para os segmentos.
///
/// Retorna quantas substituições alteraram algum segmento.
pub fn propagate_to_segments(sentences: &[Sentence], segments: &mut [Segment]) -> usize {
    let candidates: Vec<Candidate> = sentences
        .iter()
        .flat_map(|s| s.entities.iter().filter_map(Entity::substitution))
        .filter_map(|(span, canonical)| {
            let canonical_lower = canonical.to_lowercase();
            if span.to_lowercase() == canonical_lower {
                return None;
            }
            Some(Candidate {
                pattern: word_pattern(span)?,
                canonical,
                canonical_lower,
            })
        })
        .collect();
    if candidates.is_empty() {
        return 0;
    }
    let rewriter = Rewriter::new(candidates.iter().map(|c| c.canonical));

    let mut rewrites = 0;
    for segment in segments.iter_mut() {
        let mut text = segment.text.clone();
        for candidate in &candidates {
            if text.to_lowercase().contains(&candidate.canonical_lower) {
                continue;
            }
            if let Some(new_text) = rewriter.rewrite(&text, &candidate.pattern, candidate.canonical) {
                text = new_text;
                rewrites += 1;
            }
        }
        segment.text = text;
    }
    rewrites
}

/// Uma substituição pronta para ser aplicada a vários segmentos.
struct Candidate<'a> {
    pattern: Regex,
    canonical: &'a str,
    canonical_lower: String,
}

/// Compila `\b<trecho>\b` sem diferenciar maiúsculas.
fn word_pattern(literal: &str) -> Option<Regex> {
    if literal.trim().is_empty() {
        return None;
    }
    bounded(&regex::escape(literal))
}

fn bounded(source: &str) -> Option<Regex> {
    let source = format!(r"\b(?:{source})\b");
    match RegexBuilder::new(&source).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Padrão de substituição inválido '{}': {}", source, e);
            None
        }
    }
}

/// Aplica substituições preservando menções canônicas já presentes no texto.
pub(crate) struct Rewriter {
    /// Alternância de todas as formas canônicas conhecidas, da mais longa à mais curta.
    protected: Option<Regex>,
}

impl Rewriter {
    pub(crate) fn new<'a>(canonicals: impl IntoIterator<Item = &'a str>) -> Self {
        let mut forms: Vec<&str> = canonicals
            .into_iter()
            .filter(|c| !c.trim().is_empty())
            .collect();
        forms.sort_by(|a, b| b.len().cmp(&a.len()));

        let protected = if forms.is_empty() {
            None
        } else {
            let alternation = forms
                .iter()
                .map(|f| regex::escape(f))
                .collect::<Vec<_>>()
                .join("|");
            bounded(&alternation)
        };
        Self { protected }
    }

    /// Substitui as ocorrências de `pattern` por `canonical`.
    ///
    /// Retorna `None` quando nada mudou.
    fn rewrite(&self, text: &str, pattern: &Regex, canonical: &str) -> Option<String> {
        let protected = self.protected_ranges(text);

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut changed = false;

        for m in pattern.find_iter(text) {
            if inside_any(&m.range(), &protected) {
                debug!(
                    "Substituição '{}' → '{}' ignorada: trecho já faz parte de uma menção canônica",
                    m.as_str(),
                    canonical
                );
                continue;
            }
            out.push_str(&text[last..m.start()]);
            out.push_str(canonical);
            last = m.end();
            changed = true;
        }

        if !changed {
            return None;
        }
        out.push_str(&text[last..]);
        (out != text).then_some(out)
    }

    /// `true` se `canonical` aparece em `text` fora de qualquer ocorrência
    /// (não protegida) dos trechos `spans` que são reescritos para ela.
    fn already_written(&self, text: &str, canonical: &str, spans: &[Regex]) -> bool {
        let Some(canonical_re) = word_pattern(canonical) else {
            return false;
        };
        let protected = self.protected_ranges(text);
        let span_hits: Vec<Range<usize>> = spans
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| m.range()))
            .filter(|r| !inside_any(r, &protected))
            .collect();

        let found = canonical_re.find_iter(text).any(|occ| {
            let occ = occ.range();
            !span_hits.iter().any(|r| r.start < occ.end && occ.start < r.end)
        });
        found
    }

    fn protected_ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.protected
            .as_ref()
            .map(|re| re.find_iter(text).map(|m| m.range()).collect())
            .unwrap_or_default()
    }
}

fn inside_any(range: &Range<usize>, outer: &[Range<usize>]) -> bool {
    outer
        .iter()
        .any(|p| p.start <= range.start && range.end <= p.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityLabel;

    fn replace(rewriter: &Rewriter, text: &str, span: &str, canonical: &str) -> String {
        word_pattern(span)
            .and_then(|pattern| rewriter.rewrite(text, &pattern, canonical))
            .unwrap_or_else(|| text.to_string())
    }

    fn gaz(span: &str, canonical: &str) -> Entity {
        Entity::Gazetteer {
            text: canonical.to_string(),
            label: EntityLabel::Player,
            canonical: canonical.to_string(),
            matched_span: Some(span.to_string()),
        }
    }

    fn sentence(text: &str, entities: Vec<Entity>) -> Sentence {
        let mut s = Sentence::new(text);
        s.entities = entities;
        s
    }

    #[test]
    fn test_sentence_is_rewritten() {
        let (sents, _) = canonicalize(
            vec![sentence("Lee scored a brilliant goal", vec![gaz("Lee", "Robert Lee")])],
            vec![],
        );
        assert_eq!(sents[0].text, "Robert Lee scored a brilliant goal");
    }

    #[test]
    fn test_word_boundary_protects_leeds() {
        let rewriter = Rewriter::new(["Robert Lee"]);
        assert_eq!(
            replace(&rewriter, "Leeds United beat Lee", "Lee", "Robert Lee"),
            "Leeds United beat Robert Lee"
        );
        assert_eq!(
            replace(&rewriter, "Leeds United won", "Lee", "Robert Lee"),
            "Leeds United won"
        );
    }

    #[test]
    fn test_case_insensitive_replacement() {
        let rewriter = Rewriter::new(["Robert Lee"]);
        assert_eq!(replace(&rewriter, "LEE again", "lee", "Robert Lee"), "Robert Lee again");
    }

    #[test]
    fn test_existing_canonical_mention_is_not_touched() {
        let rewriter = Rewriter::new(["Robert Lee"]);
        assert_eq!(
            replace(&rewriter, "Robert Lee passes to Lee", "Lee", "Robert Lee"),
            "Robert Lee passes to Robert Lee"
        );
    }

    #[test]
    fn test_longer_span_containing_canonical_is_replaced() {
        let rewriter = Rewriter::new(["Robert Lee"]);
        assert_eq!(
            replace(&rewriter, "Robert Lee Jr scores", "Robert Lee Jr", "Robert Lee"),
            "Robert Lee scores"
        );
    }

    #[test]
    fn test_one_substitution_per_canonical_per_sentence() {
        // o segundo trecho da mesma forma canônica é ignorado depois que o
        // primeiro já reescreveu a sentença
        let (sents, _) = canonicalize(
            vec![sentence(
                "R. Lee and Bobby",
                vec![gaz("R. Lee", "Robert Lee"), gaz("Bobby", "Robert Lee")],
            )],
            vec![],
        );
        assert_eq!(sents[0].text, "Robert Lee and Bobby");
    }

    #[test]
    fn test_unchanged_candidate_does_not_consume_canonical() {
        let (sents, _) = canonicalize(
            vec![sentence(
                "Bobby scored",
                vec![gaz("R. Lee", "Robert Lee"), gaz("Bobby", "Robert Lee")],
            )],
            vec![],
        );
        assert_eq!(sents[0].text, "Robert Lee scored");
    }

    #[test]
    fn test_generic_entities_are_ignored() {
        let generic = Entity::Generic {
            text: "Lee".to_string(),
            label: EntityLabel::Player,
        };
        let (sents, segs) = canonicalize(
            vec![sentence("Lee scored", vec![generic])],
            vec![Segment::new(0.0, 1.0, "Lee scored")],
        );
        assert_eq!(sents[0].text, "Lee scored");
        assert_eq!(segs[0].text, "Lee scored");
    }

    #[test]
    fn test_span_equal_to_canonical_is_skipped() {
        let (sents, _) = canonicalize(
            vec![sentence("robert lee scored", vec![gaz("robert lee", "Robert Lee")])],
            vec![],
        );
        assert_eq!(sents[0].text, "robert lee scored");
    }

    #[test]
    fn test_segment_with_canonical_present_is_unchanged() {
        let sents = vec![sentence("Lee scored", vec![gaz("Lee", "Robert Lee")])];
        let (_, segs) = canonicalize(
            sents,
            vec![Segment::new(3.0, 6.0, "Robert Lee passes to Lee")],
        );
        // guarda por presença: a forma canônica já existe, nada é substituído
        assert_eq!(segs[0].text, "Robert Lee passes to Lee");
    }

    #[test]
    fn test_two_sentences_one_segment() {
        let sents = vec![
            sentence("Lee shoots", vec![gaz("Lee", "Robert Lee")]),
            sentence("Lee scores", vec![gaz("Lee", "Robert Lee")]),
        ];
        let (_, segs) = canonicalize(sents, vec![Segment::new(10.0, 14.0, "and Lee scores")]);
        assert_eq!(segs[0].text, "and Robert Lee scores");
        assert_eq!(segs[0].text.matches("Robert Lee").count(), 1);
    }

    #[test]
    fn test_segment_accumulates_from_many_sentences() {
        let team = Entity::Gazetteer {
            text: "Leeds United".to_string(),
            label: EntityLabel::Team,
            canonical: "Leeds United".to_string(),
            matched_span: Some("Leeds".to_string()),
        };
        let sents = vec![
            sentence("Lee scored", vec![gaz("Lee", "Robert Lee")]),
            sentence("Leeds lead", vec![team]),
        ];
        let (_, segs) = canonicalize(sents, vec![Segment::new(0.0, 5.0, "Lee scored, Leeds lead")]);
        assert_eq!(segs[0].text, "Robert Lee scored, Leeds United lead");
    }

    #[test]
    fn test_other_segment_fields_untouched() {
        let mut seg = Segment::new(1.5, 2.5, "Lee");
        seg.extra.insert("energy".to_string(), serde_json::json!(0.7));
        let (_, segs) = canonicalize(
            vec![sentence("Lee", vec![gaz("Lee", "Robert Lee")])],
            vec![seg],
        );
        assert_eq!(segs[0].start, 1.5);
        assert_eq!(segs[0].end, 2.5);
        assert_eq!(segs[0].extra["energy"], 0.7);
        assert_eq!(segs[0].text, "Robert Lee");
    }

    #[test]
    fn test_running_twice_is_idempotent() {
        let sents = vec![
            sentence("Lee passes to Lee", vec![gaz("Lee", "Robert Lee")]),
            sentence("R. Lee again", vec![gaz("R. Lee", "Robert Lee")]),
        ];
        let segs = vec![
            Segment::new(0.0, 2.0, "Lee passes to Lee"),
            Segment::new(2.0, 4.0, "R. Lee again"),
        ];
        let once = canonicalize(sents, segs);
        let twice = canonicalize(once.0.clone(), once.1.clone());
        assert_eq!(once, twice);
        assert_eq!(once.0[0].text, "Robert Lee passes to Robert Lee");
    }

    #[test]
    fn test_second_span_of_same_canonical_stays_put_on_rerun() {
        let sents = vec![sentence(
            "R. Lee and Bobby",
            vec![gaz("R. Lee", "Robert Lee"), gaz("Bobby", "Robert Lee")],
        )];
        let once = canonicalize(sents, vec![]);
        assert_eq!(once.0[0].text, "Robert Lee and Bobby");
        let twice = canonicalize(once.0.clone(), once.1.clone());
        assert_eq!(twice.0[0].text, "Robert Lee and Bobby");
    }

    #[test]
    fn test_shared_canonical_across_labels_is_stable() {
        let stadium = Entity::Gazetteer {
            text: "Wembley".to_string(),
            label: EntityLabel::Venue,
            canonical: "Wembley".to_string(),
            matched_span: Some("Wembley Stadium".to_string()),
        };
        let club = Entity::Gazetteer {
            text: "Wembley".to_string(),
            label: EntityLabel::Team,
            canonical: "Wembley".to_string(),
            matched_span: Some("Wembley FC".to_string()),
        };
        let once = canonicalize(
            vec![sentence("Wembley Stadium hosts Wembley FC", vec![stadium, club])],
            vec![],
        );
        assert_eq!(once.0[0].text, "Wembley hosts Wembley FC");
        let twice = canonicalize(once.0.clone(), once.1.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_canonical_already_in_sentence_counts_as_applied() {
        let (sents, _) = canonicalize(
            vec![sentence("Robert Lee finds Bobby", vec![gaz("Bobby", "Robert Lee")])],
            vec![],
        );
        assert_eq!(sents[0].text, "Robert Lee finds Bobby");
    }
}
