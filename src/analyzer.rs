use std::collections::HashMap;
use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::data_models::{OutlineNode, ScoreKind, ScoreResult};

/// How many repeated n-grams become H2 candidates.
pub const MAX_SUBTOPICS: usize = 6;
/// An outline shorter than this gets padded with raw titles.
pub const MIN_OUTLINE_LEN: usize = 4;
/// How many leading titles the fallback may borrow.
pub const FALLBACK_TITLES: usize = 5;
pub const MIN_NGRAM_COUNT: usize = 2;

static TITLE_ANALYZER: Lazy<TextAnalyzer> = Lazy::new(TextAnalyzer::for_titles);
static WORD_ANALYZER: Lazy<TextAnalyzer> = Lazy::new(TextAnalyzer::for_words);

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A character filter receives the original text and can transform it by adding,
/// removing, or changing characters before tokenization.
pub trait CharacterFilter: Send + Sync {
    fn filter(&self, text: String) -> String;
}

/// Replaces everything that is not a word character, whitespace or a hyphen with a space.
/// "Cats: food & toys" becomes "Cats  food   toys".
#[derive(Debug, Default)]
pub struct PunctuationCharFilter;

impl CharacterFilter for PunctuationCharFilter {
    fn filter(&self, text: String) -> String {
        text.chars()
            .map(|c| {
                if is_word_char(c) || c.is_whitespace() || c == '-' {
                    c
                } else {
                    ' '
                }
            })
            .collect()
    }
}

/// A tokenizer receives a stream of characters, breaks it up into individual tokens (usually individual words),
/// and outputs a stream of tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: String) -> Vec<String>;
}

pub struct WhiteSpaceTokenizer;

impl Tokenizer for WhiteSpaceTokenizer {
    fn tokenize(&self, text: String) -> Vec<String> {
        text.split_whitespace()
            .map(|w| w.to_string())
            .collect::<Vec<String>>()
    }
}

/// Emits maximal runs of word characters; everything else is a separator.
/// "don't stop-now" gives [don, t, stop, now].
pub struct WordRunTokenizer;

impl Tokenizer for WordRunTokenizer {
    fn tokenize(&self, text: String) -> Vec<String> {
        text.split(|c: char| !is_word_char(c))
            .filter(|s| !s.is_empty())
            .map(|w| w.to_string())
            .collect()
    }
}

/// A token filter receives the token stream and may add, remove, or change tokens.
pub trait TokenFilter: Send + Sync {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken>;
}

pub struct LowerCaseTokenFilter;

impl TokenFilter for LowerCaseTokenFilter {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens
            .into_iter()
            .map(|mut t| {
                t.term = t.term.to_lowercase();
                t
            })
            .collect()
    }
}

/// Drops tokens shorter than `min_chars` characters (not bytes).
pub struct MinLengthTokenFilter {
    min_chars: usize,
}

impl MinLengthTokenFilter {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

impl Default for MinLengthTokenFilter {
    fn default() -> Self {
        Self { min_chars: 3 }
    }
}

impl TokenFilter for MinLengthTokenFilter {
    fn filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens.retain(|t| t.term.chars().count() >= self.min_chars);
        tokens
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextToken {
    pub term: String,
}

/// Pure text analysis pipeline: character filters, then a tokenizer, then token filters.
pub struct TextAnalyzer {
    char_filters: Vec<Box<dyn CharacterFilter>>,
    tokenizer: Box<dyn Tokenizer>,
    token_filters: Vec<Box<dyn TokenFilter>>,
}

impl TextAnalyzer {
    pub fn new(
        char_filters: Vec<Box<dyn CharacterFilter>>,
        tokenizer: Box<dyn Tokenizer>,
        token_filters: Vec<Box<dyn TokenFilter>>,
    ) -> Self {
        Self {
            char_filters,
            tokenizer,
            token_filters,
        }
    }

    /// Pipeline used on SERP titles before n-gram extraction.
    pub fn for_titles() -> Self {
        Self::new(
            vec![Box::new(PunctuationCharFilter)],
            Box::new(WhiteSpaceTokenizer),
            vec![
                Box::new(MinLengthTokenFilter::default()),
                Box::new(LowerCaseTokenFilter),
            ],
        )
    }

    /// Pipeline used for stop-word density.
    pub fn for_words() -> Self {
        Self::new(
            vec![],
            Box::new(WordRunTokenizer),
            vec![Box::new(LowerCaseTokenFilter)],
        )
    }

    pub fn char_filter(&self, mut content: String) -> String {
        for filter in self.char_filters.iter() {
            content = filter.filter(content);
        }
        content
    }

    pub fn tokenize(&self, content: String) -> Vec<TextToken> {
        self.tokenizer
            .tokenize(content)
            .into_iter()
            .map(|term| TextToken { term })
            .collect()
    }

    pub fn token_filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        for filter in self.token_filters.iter() {
            tokens = filter.filter(tokens);
        }
        tokens
    }

    /// Analyzes raw content and returns a list of tokens
    pub fn analyze(&self, raw_content: &str) -> Vec<TextToken> {
        let content = self.char_filter(raw_content.to_string());
        let tokens = self.tokenize(content);
        self.token_filter(tokens)
    }
}

/// Counts bigrams and trigrams over the pooled tokens of all titles.
///
/// Tokens from consecutive titles are joined into one stream, so an n-gram can
/// span the end of one title and the start of the next. The result keeps only
/// n-grams seen at least `min_count` times, most frequent first; equal counts
/// keep the order in which the n-gram was first produced (all bigrams before
/// all trigrams).
pub fn common_ngrams<S: AsRef<str>>(titles: &[S], min_count: usize) -> Vec<(String, usize)> {
    let tokens: Vec<String> = titles
        .iter()
        .flat_map(|t| TITLE_ANALYZER.analyze(t.as_ref()))
        .map(|t| t.term)
        .collect();

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for n in [2usize, 3] {
        for window in tokens.windows(n) {
            let gram = window.join(" ");
            match index.get(&gram) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(gram.clone(), counts.len());
                    counts.push((gram, 1));
                }
            }
        }
    }

    // stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.retain(|(_, c)| *c >= min_count);
    counts
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Proposes a draft H1/H2 outline from SERP titles.
///
/// Snippets are accepted so callers can pass the whole SERP, but the heuristic
/// only looks at titles.
pub fn propose_outline<S: AsRef<str>>(query: &str, titles: &[S], _snippets: &[S]) -> Vec<OutlineNode> {
    let mut outline = vec![OutlineNode::h1(query)];

    outline.extend(
        common_ngrams(titles, MIN_NGRAM_COUNT)
            .into_iter()
            .take(MAX_SUBTOPICS)
            .map(|(gram, _)| OutlineNode::h2(capitalize(&gram))),
    );

    if outline.len() < MIN_OUTLINE_LEN {
        outline.extend(
            titles
                .iter()
                .take(FALLBACK_TITLES)
                .map(|t| t.as_ref())
                .filter(|t| !t.is_empty())
                .map(OutlineNode::h2),
        );
    }

    outline
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of stop-words among all word tokens of `text`, as a percentage.
pub fn wateriness(text: &str, stopwords: &HashSet<&str>) -> f64 {
    let tokens = WORD_ANALYZER.analyze(text);
    if tokens.is_empty() {
        return 0.0;
    }
    let water = tokens
        .iter()
        .filter(|t| stopwords.contains(t.term.as_str()))
        .count();
    round2(100.0 * water as f64 / tokens.len() as f64)
}

/// 100 minus the best similarity (as a percentage) between `text` and any reference.
pub fn uniqueness<S: AsRef<str>>(text: &str, references: &[S]) -> f64 {
    if references.is_empty() {
        return 100.0;
    }
    let best = references
        .iter()
        .map(|r| similarity_ratio(text, r.as_ref()))
        .fold(0.0f64, f64::max);
    round2(100.0 * (1.0 - best))
}

pub fn wateriness_score(text: &str, stopwords: &HashSet<&str>) -> ScoreResult {
    ScoreResult {
        kind: ScoreKind::Wateriness,
        value: wateriness(text, stopwords),
    }
}

pub fn uniqueness_score<S: AsRef<str>>(text: &str, references: &[S]) -> ScoreResult {
    ScoreResult {
        kind: ScoreKind::Uniqueness,
        value: uniqueness(text, references),
    }
}

/// Character-level Ratcliff/Obershelp similarity: `2 * M / (len(a) + len(b))`, where M is
/// the number of characters in the matching blocks found by repeatedly taking the longest
/// common substring and recursing on both sides of it. Two empty strings are identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b2j.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`. Among equally long
/// candidates the one starting earliest in `a`, then earliest in `b`, wins.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // j2len[j] = length of the match ending at a[i-1], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let prev = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0)
                } else {
                    0
                };
                let k = prev + 1;
                next.insert(j, k);
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        j2len = next;
    }

    (best_i, best_j, best_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_tokens(terms: &[&str]) -> Vec<TextToken> {
        terms
            .iter()
            .map(|term| TextToken {
                term: (*term).to_string(),
            })
            .collect()
    }

    fn terms(tokens: Vec<TextToken>) -> Vec<String> {
        tokens.into_iter().map(|t| t.term).collect()
    }

    #[test]
    fn test_punctuation_char_filter_keeps_hyphens() {
        let filter = PunctuationCharFilter;
        assert_eq!(filter.filter("e-mail: 2024!".into()), "e-mail  2024 ");
    }

    #[test]
    fn test_min_length_counts_chars_not_bytes() {
        let filter = MinLengthTokenFilter::default();
        let result = terms(filter.filter(mk_tokens(&["як", "кіт", "ab", "abc"])));
        assert_eq!(result, vec!["кіт".to_string(), "abc".to_string()]);
    }

    #[test]
    fn test_word_run_tokenizer() {
        let tokens = WordRunTokenizer.tokenize("don't stop-now, snake_case".into());
        assert_eq!(tokens, vec!["don", "t", "stop", "now", "snake_case"]);
    }

    #[test]
    fn test_title_analyzer_pipeline() {
        let analyzer = TextAnalyzer::for_titles();
        let tokens = terms(analyzer.analyze("Top 10 Cat-Food Brands: a Review"));
        assert_eq!(tokens, vec!["top", "cat-food", "brands", "review"]);
    }

    #[test]
    fn test_ngrams_bridge_titles() {
        let grams = common_ngrams(&["alpha beta", "gamma", "alpha beta", "gamma"], 2);
        let names: Vec<&str> = grams.iter().map(|(g, _)| g.as_str()).collect();
        // "beta gamma" only exists because tokens are pooled across titles
        assert!(names.contains(&"beta gamma"));
    }

    #[test]
    fn test_ngram_ties_keep_first_seen_order() {
        let grams = common_ngrams(&["one two three", "one two three"], 2);
        assert_eq!(
            grams,
            vec![
                ("one two".to_string(), 2),
                ("two three".to_string(), 2),
                ("one two three".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("best cats"), "Best cats");
        assert_eq!(capitalize("ёлка"), "Ёлка");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_similarity_ratio() {
        assert_eq!(similarity_ratio("", ""), 1.0);
        assert_eq!(similarity_ratio("abc", ""), 0.0);
        assert_eq!(similarity_ratio("abcd", "abcd"), 1.0);
        // matching blocks "ab" and "d": 2 * 3 / 8
        assert_eq!(similarity_ratio("abxd", "abyd"), 0.75);
    }

    #[test]
    fn test_longest_match_prefers_earliest() {
        let a: Vec<char> = "abab".chars().collect();
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in "xab".chars().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        assert_eq!(longest_match(&a, &b2j, 0, 4, 0, 3), (0, 1, 2));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
    }
}
