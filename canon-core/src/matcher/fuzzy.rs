//! # Matcher Fuzzy por Janelas
//!
//! Captura menções com erros de transcrição ("Robrt Lee") que o matcher exato
//! não encontra.
//!
//! ## Algoritmo
//! 1. Tokeniza o texto por espaços.
//! 2. Gera todas as janelas contíguas de 1 a `max_window_tokens` tokens.
//! 3. Descarta janelas cujo texto unido tem menos de `min_window_chars`
//!    caracteres (tokens soltos curtos geram ruído).
//! 4. Pontua a janela contra **todos** os aliases do universo e fica com o
//!    melhor (o primeiro, em caso de empate).
//! 5. Aceita se a pontuação for ≥ `threshold`.
//!
//! As janelas são avaliadas em paralelo com Rayon; a saída mantém a ordem das
//! janelas: token inicial crescente e, para cada um, da janela mais larga para
//! a mais estreita. Assim a deduplicação fica com o trecho mais longo ("Leed
//! United" e não "Leed"). Janelas sobrepostas podem casar de forma independente.

use rayon::prelude::*;
use tracing::debug;

use crate::alias_index::AliasIndex;
use crate::config::ResolverConfig;
use crate::entity::Entity;
use crate::similarity::SimilarityScorer;
use crate::tokenizer::{joined_len, tokenize, Token};

/// Matcher aproximado configurável.
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    config: ResolverConfig,
}

impl FuzzyMatcher {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Procura correspondências aproximadas de `universe` nas janelas de `text`.
    ///
    /// `universe` normalmente é [`AliasIndex::universe`]; aliases que não estão
    /// no índice são ignorados.
    pub fn find(
        &self,
        text: &str,
        index: &AliasIndex,
        universe: &[String],
        scorer: &dyn SimilarityScorer,
    ) -> Vec<Entity> {
        let tokens = tokenize(text);
        let windows = self.windows(&tokens);

        windows
            .par_iter()
            .filter_map(|&(start, width)| {
                let window = &tokens[start..start + width];
                let span = &text[window[0].start..window[width - 1].end];
                let (alias, score) = best_alias(span, universe, scorer)?;
                if score < self.config.threshold {
                    return None;
                }
                let hit = index.get(alias)?;
                debug!(
                    "Fuzzy: '{}' ~ '{}' ({:.0}) → {}",
                    span, alias, score, hit.canonical_name
                );
                Some(Entity::Fuzzy {
                    text: hit.canonical_name.clone(),
                    label: hit.entity_type.clone(),
                    canonical: hit.canonical_name.clone(),
                    matched_span: span.to_string(),
                })
            })
            .collect()
    }

    /// Janelas `(token inicial, largura)` longas o suficiente para serem avaliadas.
    fn windows(&self, tokens: &[Token]) -> Vec<(usize, usize)> {
        let mut windows = Vec::new();
        for start in 0..tokens.len() {
            for width in (1..=self.config.max_window_tokens).rev() {
                let end = start + width;
                if end > tokens.len() {
                    continue;
                }
                if joined_len(&tokens[start..end]) >= self.config.min_window_chars {
                    windows.push((start, width));
                }
            }
        }
        windows
    }
}

/// Melhor alias do universo para a janela; empates ficam com o primeiro.
fn best_alias<'u>(
    window: &str,
    universe: &'u [String],
    scorer: &dyn SimilarityScorer,
) -> Option<(&'u str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for alias in universe {
        let score = scorer.score(window, alias);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((alias.as_str(), score)),
        }
    }
    best
}
