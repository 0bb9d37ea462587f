//! # Matcher Exato
//!
//! Testa, para cada alias do índice, se ele aparece como **substring** do texto
//! (sem diferenciar maiúsculas). A busca não respeita fronteiras de palavra:
//! "lee" dispara dentro de "Leeds". Duplicatas que apontam para a mesma
//! entidade canônica são colapsadas depois, na deduplicação do resolvedor.
//!
//! Os aliases são testados do mais longo para o mais curto. Como todas as
//! entidades deste matcher usam o nome canônico como `text`, a deduplicação
//! mantém a primeira, ou seja, a que veio do alias mais longo.

use crate::alias_index::AliasIndex;
use crate::entity::Entity;
use crate::matcher::LoweredText;

/// Encontra todas as ocorrências literais de aliases em `text`.
///
/// Complexidade O(aliases × tamanho do texto).
pub fn find_exact(text: &str, index: &AliasIndex) -> Vec<Entity> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let lowered = LoweredText::new(text);

    index
        .longest_first()
        .iter()
        .filter_map(|alias| {
            let span = lowered.find_original(alias)?;
            let hit = index.get(alias)?;
            Some(Entity::Gazetteer {
                text: hit.canonical_name.clone(),
                label: hit.entity_type.clone(),
                canonical: hit.canonical_name.clone(),
                matched_span: Some(span.to_string()),
            })
        })
        .collect()
}
