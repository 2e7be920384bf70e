//! Sentence-level filtering of segmented paragraphs.
//!
//! Caption, footnote and citation fragments that survive line-level
//! normalization (because a column merge glued them into a content line)
//! are dropped here, along with sentences that are mostly numeric tokens —
//! table rows flattened into running text.

use regex::Regex;

/// Maximum share of numeric/punctuation tokens a sentence may carry.
const NUMERIC_RATIO_LIMIT: f64 = 0.6;

/// Split text into sentences on terminal punctuation followed by whitespace.
///
/// The terminator stays attached to the preceding sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(next_i, next_c)) = chars.peek() {
                if next_c.is_whitespace() {
                    sentences.push(&text[start..next_i]);
                    start = next_i;
                }
            }
        }
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Per-sentence noise filter.
pub struct SentenceFilter {
    drop_prefixes: Vec<Regex>,
    numeric_token: Regex,
}

impl SentenceFilter {
    /// Create a filter with the default caption/footnote/citation patterns.
    pub fn new() -> Self {
        Self {
            drop_prefixes: vec![
                Regex::new(r"^(그림|표)\s*\d+").unwrap(),
                Regex::new(r"^주\s*\d+").unwrap(),
                Regex::new(r"^(자료|출처)[: ]").unwrap(),
            ],
            numeric_token: Regex::new(r"^[\d.\-,/]+$").unwrap(),
        }
    }

    /// Share of whitespace-delimited tokens that are purely
    /// numeric/punctuation. Zero for an empty sentence.
    pub fn numeric_ratio(&self, sentence: &str) -> f64 {
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        if tokens.is_empty() {
            return 0.0;
        }
        let numeric = tokens
            .iter()
            .filter(|t| self.numeric_token.is_match(t))
            .count();
        numeric as f64 / tokens.len() as f64
    }

    /// Drop caption/footnote/citation and mostly-numeric sentences,
    /// rejoining the survivors with single spaces.
    pub fn clean(&self, paragraph: &str) -> String {
        split_sentences(paragraph)
            .into_iter()
            .filter(|s| !self.drop_prefixes.iter().any(|re| re.is_match(s)))
            .filter(|s| self.numeric_ratio(s) <= NUMERIC_RATIO_LIMIT)
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}

impl Default for SentenceFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_terminator() {
        let sentences = split_sentences("물가가 올랐다. 금리는 동결되었다!");
        assert_eq!(sentences, vec!["물가가 올랐다.", "금리는 동결되었다!"]);
    }

    #[test]
    fn test_split_no_boundary_inside_number() {
        // A period not followed by whitespace is not a boundary.
        let sentences = split_sentences("성장률은 2.1%를 기록. 끝.");
        assert_eq!(sentences, vec!["성장률은 2.1%를 기록.", "끝."]);
    }

    #[test]
    fn test_split_trailing_text_without_terminator() {
        let sentences = split_sentences("첫 문장. 둘째 문장");
        assert_eq!(sentences, vec!["첫 문장.", "둘째 문장"]);
    }

    #[test]
    fn test_drops_caption_sentences() {
        let f = SentenceFilter::new();
        let result = f.clean("표 3 분기별 지표. 소비가 회복되었다.");
        assert_eq!(result, "소비가 회복되었다.");
    }

    #[test]
    fn test_drops_footnote_sentences() {
        let f = SentenceFilter::new();
        let result = f.clean("주 1 계절조정 기준. 수출이 늘었다.");
        assert_eq!(result, "수출이 늘었다.");
    }

    #[test]
    fn test_drops_citation_sentences() {
        let f = SentenceFilter::new();
        let result = f.clean("자료: 한국은행. 고용이 개선되었다.");
        assert_eq!(result, "고용이 개선되었다.");
    }

    #[test]
    fn test_numeric_ratio() {
        let f = SentenceFilter::new();
        assert_eq!(f.numeric_ratio(""), 0.0);
        assert_eq!(f.numeric_ratio("1.2 3,4 5/6"), 1.0);
        assert!((f.numeric_ratio("성장률 2.1") - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drops_mostly_numeric_sentences() {
        let f = SentenceFilter::new();
        // 4 of 5 tokens numeric: a flattened table row.
        let result = f.clean("1.2 2.3 3.4 4.5 증가. 물가는 안정세를 지속하였다.");
        assert_eq!(result, "물가는 안정세를 지속하였다.");
    }

    #[test]
    fn test_keeps_sentence_at_ratio_boundary() {
        let f = SentenceFilter::new();
        // Exactly 0.6 is allowed; only ratios above the limit are dropped.
        let sentence = "1.2 3.4 5.6 지표가 개선.";
        assert!((f.numeric_ratio(sentence) - 0.6).abs() < f64::EPSILON);
        assert_eq!(f.clean(sentence), sentence);
    }

    #[test]
    fn test_no_output_sentence_exceeds_ratio() {
        let f = SentenceFilter::new();
        let cleaned = f.clean("1 2 3 4. 내용 문장이다. 5.5 6,6 7/7 -8 하락.");
        for sentence in split_sentences(&cleaned) {
            assert!(f.numeric_ratio(sentence) <= NUMERIC_RATIO_LIMIT);
        }
        assert_eq!(cleaned, "내용 문장이다.");
    }
}
