//! # Tokenização por Espaços
//!
//! O matcher fuzzy trabalha sobre janelas de tokens separados por espaço em
//! branco. Cada token guarda seus offsets de byte no texto original para que o
//! trecho exato de uma janela (com a capitalização original) possa ser
//! recuperado depois, na substituição canônica.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Um token extraído do texto original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista.
    pub index: usize,
}

/// Divide o texto em tokens nas fronteiras de espaço em branco.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = current_start.take() {
                push_token(&mut tokens, text, start, i);
            }
        } else if current_start.is_none() {
            current_start = Some(i);
        }
    }
    if let Some(start) = current_start {
        push_token(&mut tokens, text, start, text.len());
    }
    tokens
}

fn push_token(tokens: &mut Vec<Token>, text: &str, start: usize, end: usize) {
    let index = tokens.len();
    tokens.push(Token {
        text: text[start..end].to_string(),
        start,
        end,
        index,
    });
}

/// Comprimento visível (em grafemas) dos tokens unidos por um único espaço.
pub fn joined_len(tokens: &[Token]) -> usize {
    let chars: usize = tokens.iter().map(|t| t.text.graphemes(true).count()).sum();
    chars + tokens.len().saturating_sub(1)
}
