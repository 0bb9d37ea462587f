//! # canon-core — Resolução de Menções e Substituição Canônica
//!
//! Este crate resolve menções em texto livre a entidades de domínio (jogadores,
//! times, competições, estádios) usando um gazetteer curado, combina essas
//! resoluções com as de um reconhecedor genérico de entidades, remove
//! detecções duplicadas e reescreve as transcrições para que cada entidade
//! apareça sempre com a mesma grafia canônica.
//!
//! ## Arquitetura do Sistema
//!
//! 1.  **Índice de Aliases** ([`alias_index`]): construído uma vez a partir do [`gazetteer`].
//! 2.  **Matchers** ([`matcher`]):
//!     *   **Exato** ([`matcher::exact`]): substring sem diferenciar maiúsculas.
//!     *   **Fuzzy** ([`matcher::fuzzy`]): janelas de 1–3 tokens com [`similarity`].
//! 3.  **Adaptador Genérico** ([`generic`]): filtra e remapeia a saída do tagger externo.
//! 4.  **Resolvedor** ([`resolver`]): prioridade `generic ++ gazetteer ++ fuzzy` e deduplicação.
//! 5.  **Substituição Canônica** ([`substitution`]): sentenças primeiro, depois segmentos.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use canon_core::{canonicalize, AliasIndex, EntityResolver, Gazetteer, Segment, Sentence};
//!
//! let gazetteer = Gazetteer::from_json_str(
//!     r#"{"entities": [{"name": "Robert Lee", "type": "PLAYER", "aliases": ["Lee", "R. Lee"]}]}"#,
//! ).unwrap();
//! let resolver = EntityResolver::new(AliasIndex::build(&gazetteer).unwrap());
//!
//! let mut sentences = vec![Sentence::new("Lee scored a brilliant goal")];
//! resolver.annotate_all(&mut sentences);
//!
//! let segments = vec![Segment::new(12.0, 15.5, "Lee scored a brilliant goal")];
//! let (sentences, segments) = canonicalize(sentences, segments);
//!
//! assert_eq!(sentences[0].text, "Robert Lee scored a brilliant goal");
//! assert_eq!(segments[0].text, "Robert Lee scored a brilliant goal");
//! ```

pub mod alias_index;
pub mod config;
pub mod entity;
pub mod error;
pub mod gazetteer;
pub mod generic;
pub mod matcher;
pub mod resolver;
pub mod similarity;
pub mod substitution;
pub mod tokenizer;
pub mod transcript;

pub use alias_index::{AliasIndex, IndexedAlias};
pub use config::ResolverConfig;
pub use entity::{Entity, EntityLabel, EntitySource, GenericEntity};
pub use error::{Error, Result};
pub use gazetteer::{Gazetteer, GazetteerEntity, GazetteerRecord};
pub use generic::{GenericTagger, NoopTagger};
pub use resolver::EntityResolver;
pub use similarity::{PartialRatio, SimilarityScorer};
pub use substitution::canonicalize;
pub use transcript::{Segment, Sentence, Transcript};
