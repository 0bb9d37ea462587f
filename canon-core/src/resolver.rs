//! # Resolvedor de Entidades
//!
//! Orquestra, para cada sentença, os três produtores de entidades e aplica a
//! política de prioridade.
//!
//! ## Algoritmo
//! 1. Matcher exato → `gaz`; matcher fuzzy → `fuzzy`.
//! 2. `domain_texts` = textos (minúsculas) de `gaz ∪ fuzzy`.
//! 3. Adaptador genérico com `domain_texts` → `generic`.
//! 4. Concatena na ordem de prioridade `generic ++ gaz ++ fuzzy`.
//! 5. Deduplica por `(texto em minúsculas, rótulo)`, mantendo a primeira
//!    ocorrência.
//!
//! Consequência da ordem: uma entidade GENERIC vence uma GAZETTEER/FUZZY com a
//! mesma chave, e GAZETTEER vence FUZZY.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::alias_index::AliasIndex;
use crate::config::ResolverConfig;
use crate::entity::{Entity, GenericEntity};
use crate::generic::{adapt, GenericTagger, NoopTagger};
use crate::matcher::{find_exact, FuzzyMatcher};
use crate::similarity::{PartialRatio, SimilarityScorer};
use crate::transcript::Sentence;

/// Resolvedor com índice, scorer e tagger injetados.
///
/// Só lê estado compartilhado: pode ser usado de várias threads ao mesmo tempo.
pub struct EntityResolver {
    index: AliasIndex,
    fuzzy: FuzzyMatcher,
    scorer: Box<dyn SimilarityScorer>,
    tagger: Box<dyn GenericTagger>,
}

impl EntityResolver {
    /// Resolvedor com a configuração padrão, [`PartialRatio`] e [`NoopTagger`].
    pub fn new(index: AliasIndex) -> Self {
        Self {
            index,
            fuzzy: FuzzyMatcher::default(),
            scorer: Box::new(PartialRatio),
            tagger: Box::new(NoopTagger),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.fuzzy = FuzzyMatcher::new(config);
        self
    }

    pub fn with_scorer(mut self, scorer: impl SimilarityScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    pub fn with_tagger(mut self, tagger: impl GenericTagger + 'static) -> Self {
        self.tagger = Box::new(tagger);
        self
    }

    pub fn index(&self) -> &AliasIndex {
        &self.index
    }

    pub fn config(&self) -> &ResolverConfig {
        self.fuzzy.config()
    }

    /// Resolve as entidades de um texto, dadas as entidades genéricas dele.
    ///
    /// Texto vazio ou só com espaços resulta em lista vazia.
    pub fn resolve(&self, sentence_text: &str, generic_entities: &[GenericEntity]) -> Vec<Entity> {
        if sentence_text.trim().is_empty() {
            return Vec::new();
        }

        let gaz = find_exact(sentence_text, &self.index);
        let fuzzy = self.fuzzy.find(
            sentence_text,
            &self.index,
            self.index.universe(),
            self.scorer.as_ref(),
        );

        let domain_texts: HashSet<String> = gaz
            .iter()
            .chain(fuzzy.iter())
            .map(|e| e.text().to_lowercase())
            .collect();
        let generic = adapt(generic_entities, &domain_texts);

        deduplicate(generic.into_iter().chain(gaz).chain(fuzzy))
    }

    /// Anexa as entidades resolvidas à sentença.
    ///
    /// As entidades genéricas são as que vieram com a sentença seguidas das
    /// produzidas pelo [`GenericTagger`] injetado.
    pub fn annotate(&self, sentence: &mut Sentence) {
        let mut generic = sentence.generic_entities.clone();
        generic.extend(self.tagger.tag(&sentence.text));
        sentence.entities = self.resolve(&sentence.text, &generic);
    }

    /// Anota todas as sentenças em paralelo; cada sentença só escreve em si mesma.
    pub fn annotate_all(&self, sentences: &mut [Sentence]) {
        sentences.par_iter_mut().for_each(|s| self.annotate(s));
    }
}

/// Remove entidades com chave `(texto em minúsculas, rótulo)` repetida,
/// preservando a ordem e mantendo a primeira ocorrência.
pub fn deduplicate(entities: impl IntoIterator<Item = Entity>) -> Vec<Entity> {
    let mut seen = HashSet::new();
    entities
        .into_iter()
        .filter(|e| seen.insert(e.dedup_key()))
        .collect()
}
