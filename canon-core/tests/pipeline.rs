//! Fluxo completo: gazetteer → resolução → substituição canônica.

use canon_core::transcript::{entities_by_type, render_plaintext};
use canon_core::{
    canonicalize, AliasIndex, Entity, EntityLabel, EntityResolver, Gazetteer, Segment, Sentence,
    Transcript,
};

fn resolver() -> EntityResolver {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../data/gazetteers/players_and_teams.json"
    );
    let gazetteer = Gazetteer::load(path).unwrap();
    EntityResolver::new(AliasIndex::build(&gazetteer).unwrap())
}

fn run(resolver: &EntityResolver, texts: &[&str], segments: Vec<Segment>) -> (Vec<Sentence>, Vec<Segment>) {
    let mut sentences: Vec<Sentence> = texts.iter().map(|t| Sentence::new(*t)).collect();
    resolver.annotate_all(&mut sentences);
    canonicalize(sentences, segments)
}

#[test]
fn test_lee_scored_is_canonicalized() {
    let resolver = resolver();
    let (sentences, segments) = run(
        &resolver,
        &["Lee scored a brilliant goal"],
        vec![Segment::new(12.0, 15.5, "Lee scored a brilliant goal")],
    );

    assert_eq!(sentences[0].text, "Robert Lee scored a brilliant goal");
    assert_eq!(segments[0].text, "Robert Lee scored a brilliant goal");
    assert_eq!(
        sentences[0].entities[0],
        Entity::Gazetteer {
            text: "Robert Lee".to_string(),
            label: EntityLabel::Player,
            canonical: "Robert Lee".to_string(),
            matched_span: Some("Lee".to_string()),
        }
    );
}

#[test]
fn test_two_sentences_map_to_one_segment() {
    let resolver = resolver();
    let (_, segments) = run(
        &resolver,
        &["Lee shoots", "Lee scores"],
        vec![Segment::new(40.0, 44.0, "and Lee scores")],
    );
    assert_eq!(segments[0].text, "and Robert Lee scores");
    assert_eq!(segments[0].text.matches("Robert Lee").count(), 1);
}

#[test]
fn test_team_aliases_keep_word_boundaries() {
    let resolver = resolver();
    let text = "Leeds beat Newcastle at Elland Road";
    let (sentences, segments) = run(&resolver, &[text], vec![Segment::new(0.0, 3.0, text)]);

    let expected = "Leeds United beat Newcastle United at Elland Road";
    assert_eq!(sentences[0].text, expected);
    assert_eq!(segments[0].text, expected);
    assert!(!sentences[0].text.contains("Robert Lee"));

    let teams = entities_by_type(&sentences, &EntityLabel::Team);
    let names: Vec<&str> = teams.iter().map(|(entity, _)| entity.as_str()).collect();
    assert_eq!(names, vec!["Newcastle United", "Leeds United"]);
    assert!(teams.iter().all(|(_, sentence)| sentence == expected));
}

#[test]
fn test_pipeline_output_is_stable() {
    let resolver = resolver();
    let texts = ["Lee passes to Shearer", "R. Lee again", "Leeds at St James Park"];
    let segments = vec![
        Segment::new(0.0, 2.0, "Lee passes to Shearer"),
        Segment::new(2.0, 4.0, "R. Lee again"),
        Segment::new(4.0, 6.0, "Leeds at St James Park"),
    ];
    let once = run(&resolver, &texts, segments);
    let twice = canonicalize(once.0.clone(), once.1.clone());
    assert_eq!(once, twice);
    assert_eq!(once.0[0].text, "Robert Lee passes to Alan Shearer");
}

#[test]
fn test_transcript_file_to_plaintext() {
    let resolver = resolver();
    let transcript = Transcript::load(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../data/transcripts/match_clip.json"
    ))
    .unwrap();

    let mut sentences = transcript.sentences;
    resolver.annotate_all(&mut sentences);
    let (sentences, segments) = canonicalize(sentences, transcript.segments);

    assert_eq!(sentences[0].extra["start_char"], 0);
    assert_eq!(segments[0].extra["pitch"], 210.0);
    assert_eq!(
        render_plaintext(&segments),
        "FULL TRANSCRIPT\n\n[0:00:12 - 0:00:15] Robert Lee scored a brilliant goal\n"
    );
}
