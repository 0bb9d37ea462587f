//! # Similaridade Aproximada
//!
//! O matcher fuzzy não depende de um algoritmo fixo: recebe qualquer
//! implementação de [`SimilarityScorer`]. A implementação padrão,
//! [`PartialRatio`], segue a semântica de *partial ratio* em escala 0–100.
//!
//! ## Partial ratio
//!
//! Pontua o quanto a janela de texto se parece com **algum trecho** do alias:
//!
//! 1. Ambos os textos em minúsculas; texto vazio → 0.
//! 2. Se a janela não é maior que o alias, compara a janela com cada trecho do
//!    alias de mesmo tamanho ou um caractere maior (tolerando uma letra
//!    omitida, ex: "robrt lee" × "robert lee") e fica com o melhor valor.
//! 3. Se a janela é maior que o alias, compara os dois textos inteiros, o que
//!    penaliza a diferença de tamanho ("lee scored" × "lee" fica baixo).
//!
//! A similaridade de cada par é a distância de Levenshtein normalizada
//! (`strsim::normalized_levenshtein`).

/// Capacidade de pontuar a semelhança entre uma janela e um alias (0–100).
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, window: &str, alias: &str) -> f64;
}

/// Scorer padrão com semântica de partial ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl SimilarityScorer for PartialRatio {
    fn score(&self, window: &str, alias: &str) -> f64 {
        partial_ratio(window, alias)
    }
}

/// Partial ratio assimétrico: `window` é procurada dentro de `alias`.
pub fn partial_ratio(window: &str, alias: &str) -> f64 {
    let needle = window.to_lowercase();
    let haystack = alias.to_lowercase();
    if needle.is_empty() || haystack.is_empty() {
        return 0.0;
    }

    let hay_chars: Vec<char> = haystack.chars().collect();
    let n = needle.chars().count();
    let m = hay_chars.len();

    if n > m {
        return to_percent(strsim::normalized_levenshtein(&needle, &haystack));
    }

    let mut best: f64 = 0.0;
    for width in n..=(n + 1).min(m) {
        for start in 0..=(m - width) {
            let candidate: String = hay_chars[start..start + width].iter().collect();
            best = best.max(strsim::normalized_levenshtein(&needle, &candidate));
            if best >= 1.0 {
                return 100.0;
            }
        }
    }
    to_percent(best)
}

fn to_percent(similarity: f64) -> f64 {
    (similarity * 100.0).round()
}
