//! Text normalization and tokenization.
//!
//! Every scoring component sees text through [`normalize`]: lowercased,
//! ASCII punctuation stripped, whitespace collapsed, and (by default)
//! common English stopwords removed. Normalization is deterministic and
//! idempotent, so scores never depend on how many times an input passed
//! through it.

use std::collections::HashSet;
use std::sync::LazyLock;

/// The ASCII punctuation set stripped during normalization.
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Common English stopwords dropped during normalization.
///
/// Entries containing apostrophes can never match a post-punctuation
/// token; they are kept so the set stays recognizably the standard one.
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
        "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
        "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
        "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
        "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the",
        "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
        "with", "about", "against", "between", "into", "through", "during", "before", "after",
        "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
        "again", "further", "then", "once",
    ]
    .into_iter()
    .collect()
});

/// Normalize text for scoring.
///
/// Lowercases, deletes ASCII punctuation, collapses runs of whitespace
/// to single spaces, and optionally removes stopwords. Empty input
/// yields an empty string.
pub fn normalize(text: &str, remove_stopwords: bool) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let stripped: String = lowered.chars().filter(|c| !PUNCTUATION.contains(*c)).collect();

    let words = stripped
        .split_whitespace()
        .filter(|w| !remove_stopwords || !STOPWORDS.contains(w));

    let mut out = String::with_capacity(stripped.len());
    for (i, w) in words.enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(w);
    }
    out
}

/// Split text into normalized tokens (stopwords removed).
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text, true)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
