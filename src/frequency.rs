use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::WordFrequencyEntry;

/// Words of three or more Latin letters, accented ones included.
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-ZÀ-ÿ]{3,}\b").expect("valid word regex"));

/// Lowercased words of `text`, in order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Frequency table over `texts`, sorted by descending count. Ties keep the
/// order in which words were first seen.
pub fn word_frequencies<'t, I>(texts: I) -> Vec<WordFrequencyEntry>
where
    I: IntoIterator<Item = &'t str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut table: Vec<WordFrequencyEntry> = Vec::new();
    for text in texts {
        for word in tokenize(text) {
            match index.get(&word) {
                Some(&i) => table[i].count += 1,
                None => {
                    index.insert(word.clone(), table.len());
                    table.push(WordFrequencyEntry { word, count: 1 });
                }
            }
        }
    }
    // Vec::sort_by is stable.
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}

pub fn total_words(table: &[WordFrequencyEntry]) -> usize {
    table.iter().map(|entry| entry.count).sum()
}
