//! # Matchers de Domínio
//!
//! Dois matchers consultam o [`AliasIndex`](crate::alias_index::AliasIndex):
//!
//! - [`exact`]: ocorrências literais (substring, sem diferenciar maiúsculas).
//! - [`fuzzy`]: janelas de 1 a 3 tokens comparadas de forma aproximada.
//!
//! Nenhum dos dois deduplica: isso é responsabilidade do
//! [`resolver`](crate::resolver).

pub mod exact;
pub mod fuzzy;

pub use exact::find_exact;
pub use fuzzy::FuzzyMatcher;

/// Texto em minúsculas com o mapeamento de volta para os offsets originais.
///
/// `to_lowercase` pode mudar o tamanho em bytes de alguns caracteres, então os
/// offsets de uma busca no texto minúsculo não valem diretamente no original.
pub(crate) struct LoweredText<'a> {
    original: &'a str,
    pub lower: String,
    /// Para cada byte de `lower`, o início do caractere original de onde veio.
    origin: Vec<usize>,
}

impl<'a> LoweredText<'a> {
    pub fn new(original: &'a str) -> Self {
        let mut lower = String::with_capacity(original.len());
        let mut origin = Vec::with_capacity(original.len() + 1);
        for (i, c) in original.char_indices() {
            for lc in c.to_lowercase() {
                lower.push(lc);
                origin.extend(std::iter::repeat(i).take(lc.len_utf8()));
            }
        }
        origin.push(original.len());
        Self {
            original,
            lower,
            origin,
        }
    }

    /// Primeira ocorrência de `needle` (já em minúsculas), como trecho original.
    pub fn find_original(&self, needle: &str) -> Option<&'a str> {
        let start = self.lower.find(needle)?;
        let end = start + needle.len();
        let orig_start = self.origin[start];
        let orig_end = self.origin[end].max(orig_start);
        Some(&self.original[orig_start..orig_end])
    }
}
