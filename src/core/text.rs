//! Text cleaning, tokenization and frequency counting.
//!
//! Word and phrase statistics share one cleaning step: lower-case the text,
//! drop every character that is not a Unicode letter, digit or whitespace,
//! then split on whitespace. Token length is measured in chars.

use std::collections::HashMap;

/// Lower-cases `text` and strips everything but letters, digits and
/// whitespace.
///
/// ```
/// use chatstats::core::text::clean_text;
///
/// assert_eq!(clean_text("Héllo, World! 👋 #42"), "héllo world  42");
/// ```
pub fn clean_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Cleaned tokens of at least `min_len` chars, in message order.
pub fn tokens(text: &str, min_len: usize) -> Vec<String> {
    clean_text(text)
        .split_whitespace()
        .filter(|t| t.chars().count() >= min_len)
        .map(str::to_owned)
        .collect()
}

/// Contiguous two- and three-token windows, space-joined.
///
/// Windows never extend past `tokens`, so phrases do not cross message
/// boundaries. At each position the two-token phrase comes before the
/// three-token one.
pub fn phrases(tokens: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    for i in 0..tokens.len() {
        if i + 2 <= tokens.len() {
            out.push(tokens[i..i + 2].join(" "));
        }
        if i + 3 <= tokens.len() {
            out.push(tokens[i..i + 3].join(" "));
        }
    }
    out
}

/// Counter that remembers the order in which keys were first seen.
///
/// Ranking is deterministic: descending count, ties in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `key`.
    pub fn add(&mut self, key: &str) {
        if let Some(&i) = self.index.get(key) {
            self.entries[i].1 += 1;
        } else {
            self.index.insert(key.to_owned(), self.entries.len());
            self.entries.push((key.to_owned(), 1));
        }
    }

    /// Current count for `key` (0 if never seen).
    pub fn get(&self, key: &str) -> u64 {
        self.index.get(key).map_or(0, |&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// First-seen key with the highest count.
    pub fn max(&self) -> Option<(&str, u64)> {
        self.iter()
            .fold(None, |best: Option<(&str, u64)>, (k, c)| match best {
                Some((_, bc)) if bc >= c => best,
                _ => Some((k, c)),
            })
    }

    /// The `limit` most frequent entries with at least `min_count`
    /// occurrences.
    pub fn top(self, limit: usize, min_count: u64) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self
            .entries
            .into_iter()
            .filter(|(_, c)| *c >= min_count)
            .collect();
        // stable: ties keep first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_clean_text_keeps_unicode_letters() {
        assert_eq!(clean_text("Привет, МИР!"), "привет мир");
        assert_eq!(clean_text("don't stop"), "dont stop");
        assert_eq!(clean_text("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn test_tokens_min_len() {
        assert_eq!(tokens("a bb ccc dddd", 3), strings(&["ccc", "dddd"]));
        assert_eq!(tokens("a bb ccc", 2), strings(&["bb", "ccc"]));
        assert!(tokens("!!! ...", 1).is_empty());
    }

    #[test]
    fn test_tokens_count_chars_not_bytes() {
        // three chars, six bytes
        assert_eq!(tokens("мир", 3), strings(&["мир"]));
    }

    #[test]
    fn test_phrases_windows() {
        let toks = strings(&["bb", "ccc", "dd"]);
        assert_eq!(phrases(&toks), strings(&["bb ccc", "bb ccc dd", "ccc dd"]));
        assert!(phrases(&strings(&["solo"])).is_empty());
        assert_eq!(phrases(&strings(&["a", "b"])), strings(&["a b"]));
    }

    #[test]
    fn test_frequency_table_ranking() {
        let mut table = FrequencyTable::new();
        for key in ["x", "y", "y", "z", "z", "w"] {
            table.add(key);
        }
        assert_eq!(table.get("y"), 2);
        assert_eq!(table.get("missing"), 0);
        assert_eq!(table.max(), Some(("y", 2)));

        let top = table.top(3, 1);
        assert_eq!(
            top,
            vec![
                ("y".to_string(), 2),
                ("z".to_string(), 2),
                ("x".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_frequency_table_min_count() {
        let mut table = FrequencyTable::new();
        table.add("once");
        table.add("twice");
        table.add("twice");
        assert_eq!(table.top(10, 2), vec![("twice".to_string(), 2)]);
    }
}
