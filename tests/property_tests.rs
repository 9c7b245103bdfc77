//! Property-based tests using proptest

use proptest::prelude::*;
use std::collections::HashSet;

use comment_harvest::dedup::CommentAggregator;
use comment_harvest::frequency::{tokenize, total_words, word_frequencies};
use comment_harvest::*;

/// Words a saved comment page actually mixes together: body text, mentions,
/// timestamps and interface chrome.
const VOCAB: &[&str] = &[
    "Adorei", "lindo", "bom", "dia", "ótimo", "café", "@ana", "@joao_abc", "@Maria.F", "!!", "😍",
    "Reply", "Verified", "3d", "10w", "2sem", "5h", "2023", "5", "curtidas", "curtida",
    "Responder", "Opções", "de", "comentários", "Curtir", "Ocultar", "respostas",
];

const SEPARATORS: &[&str] = &[" ", "  ", "\n", "\t "];

fn comment_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop::sample::select(VOCAB), prop::sample::select(SEPARATORS)),
        0..16,
    )
    .prop_map(|parts| {
        parts
            .into_iter()
            .map(|(word, sep)| format!("{word}{sep}"))
            .collect::<String>()
    })
}

fn handle() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["ana", "ANA", "joao_abc", "maria.f", "Maria.F"]).prop_map(String::from)
}

fn mixed_case(text: String, upper: bool) -> String {
    if upper {
        text.to_uppercase()
    } else {
        text
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_normalizer_is_idempotent(text in comment_text()) {
        let normalizer = Normalizer::standard();
        if let Some(once) = normalizer.clean(&text) {
            prop_assert_eq!(normalizer.clean(&once), Some(once.clone()));
            prop_assert!(!once.is_empty());
            prop_assert_eq!(once.trim(), once.as_str());
        }
    }

    #[test]
    fn test_hidden_replies_header_is_always_discarded(suffix in comment_text()) {
        let normalizer = Normalizer::standard();
        let raw = format!("Ocultar respostas {suffix}");
        prop_assert_eq!(normalizer.clean(&raw), None);
    }

    #[test]
    fn test_dedup_keys_are_unique_and_no_self_mentions(
        items in prop::collection::vec((handle(), comment_text(), any::<bool>()), 0..40)
    ) {
        let normalizer = Normalizer::standard();
        let names = NameGenderTable::empty();
        let mut agg = CommentAggregator::new();
        for (handle, text, upper) in items {
            if let Some(clean) = normalizer.clean(&mixed_case(text, upper)) {
                let _ = agg.push(&handle, &clean, &names);
            }
        }
        let (records, stats) = agg.into_records();
        prop_assert_eq!(records.len(), stats.accepted);

        let mut keys = HashSet::new();
        for record in &records {
            prop_assert!(!record.text.is_empty());
            prop_assert!(keys.insert((record.handle.to_lowercase(), record.text.to_lowercase())));
            let handle = record.handle.to_lowercase();
            prop_assert!(record.mentions.iter().all(|m| m.to_lowercase() != handle));
        }
    }

    #[test]
    fn test_frequency_total_matches_token_count(
        texts in prop::collection::vec(comment_text(), 0..20)
    ) {
        let table = word_frequencies(texts.iter().map(String::as_str));
        let tokens: usize = texts.iter().map(|t| tokenize(t).len()).sum();
        prop_assert_eq!(total_words(&table), tokens);
        prop_assert!(table.iter().all(|e| e.count >= 1));
        prop_assert!(table.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_pipeline_frequencies_come_from_final_records(
        bodies in prop::collection::vec((handle(), comment_text()), 0..12)
    ) {
        let items: String = bodies
            .iter()
            .map(|(h, body)| format!(r#"<li><a href="/{h}/">{h}</a> <span>{body}</span></li>"#))
            .collect();
        let page = format!("<ul>{items}</ul>");
        let output = CommentPipeline::new().process_document(page.as_bytes(), &NameGenderTable::empty());

        let tokens: usize = output.records.iter().map(|r| tokenize(&r.text).len()).sum();
        prop_assert_eq!(total_words(&output.frequencies), tokens);
    }
}
