//! Text normalization for noisy PDF-extracted policy documents.
//!
//! Extracted text from the source PDFs carries multi-column artifacts,
//! figure/table captions, footnote markers, page numbers and several
//! visually-equivalent Unicode variants of the same glyph. The normalizer
//! canonicalizes the variants, drops noise lines and flattens the rest into
//! a single whitespace-collapsed string. Paragraph structure is intentionally
//! discarded here; the segmenter reconstructs it from explicit markers.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Glyph variants that collapse to a single representative character.
///
/// Source documents are inconsistent about which variant they use, so this
/// must run before any structural regex that matches on `I`, `-` or `.`.
const ROMAN_I_VARIANTS: [char; 9] = ['Ⅰ', 'Ｉ', '𝑰', '𝐈', '𝘐', '𝕀', '𝖨', '𝗜', '𝛪'];
const DASH_VARIANTS: [char; 5] = ['–', '—', '−', '﹣', '‐'];
const PERIOD_VARIANTS: [char; 3] = ['。', '．', '｡'];

/// Canonicalize Unicode variants of Roman numeral "I", dashes and periods.
pub fn unify_variants(text: &str) -> String {
    text.chars()
        .map(|c| {
            if ROMAN_I_VARIANTS.contains(&c) {
                'I'
            } else if DASH_VARIANTS.contains(&c) {
                '-'
            } else if PERIOD_VARIANTS.contains(&c) {
                '.'
            } else if c == 'ž' {
                '·'
            } else {
                c
            }
        })
        .collect()
}

/// Line-level and character-level text normalizer.
///
/// All regexes are compiled once at construction.
pub struct Normalizer {
    line_drop: Vec<Regex>,
    footnote_callout: Regex,
    disallowed: Regex,
    multi_space: Regex,
}

impl Normalizer {
    /// Create a normalizer with the default noise patterns.
    pub fn new() -> Self {
        Self {
            line_drop: vec![
                // figure/table caption with numeric index: "[표1]", "그림 2"
                Regex::new(r"^\[?\s*(그림|표)\s*\d+").unwrap(),
                // footnote marker with numeric index: "주: 1", "주 2"
                Regex::new(r"^주\s*[: ]?\s*\d+").unwrap(),
                // source/reference citation: "자료:", "출처 :"
                Regex::new(r"^(자료|출처)\s*[: ]?").unwrap(),
                // standalone page number: "- 12 -"
                Regex::new(r"^-\s*\d+\s*-").unwrap(),
            ],
            footnote_callout: Regex::new(r"\d+\)").unwrap(),
            // Allow word characters, sentence punctuation, Hangul,
            // parentheses, percent/slash/dash and Roman numeral glyphs.
            disallowed: Regex::new(r"[^\w\s.,!?가-힣()/%\-ⅠⅡⅢⅣⅤⅥⅦⅧⅨⅩ]").unwrap(),
            multi_space: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Normalize raw extracted text into a single flattened string.
    ///
    /// Total function: never fails, may return an empty string. Idempotent —
    /// all character-level cleanup runs per line before the final drop
    /// check, so a second pass sees lines it has already judged.
    pub fn normalize(&self, raw: &str) -> String {
        let mut kept: Vec<String> = Vec::new();

        for line in raw.lines() {
            let line: String = line.nfc().collect();
            let line = unify_variants(&line);
            let line = self.disallowed.replace_all(&line, " ");
            let line = self.multi_space.replace_all(&line, " ");
            let line = line.trim();

            if line.is_empty() || self.is_noise(line) {
                continue;
            }

            // A leading call-out can mask a noise prefix ("1)표 1 ..."),
            // so the drop check runs again after blanking.
            let line = self.footnote_callout.replace_all(line, " ");
            let line = self.multi_space.replace_all(&line, " ");
            let line = line.trim();

            if line.is_empty() || self.is_noise(line) {
                continue;
            }
            kept.push(line.to_string());
        }

        kept.join(" ")
    }

    fn is_noise(&self, line: &str) -> bool {
        self.line_drop.iter().any(|re| re.is_match(line))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify_roman_variants() {
        assert_eq!(unify_variants("Ⅰ-1 Ｉ펀드"), "I-1 I펀드");
    }

    #[test]
    fn test_unify_dash_and_period() {
        assert_eq!(unify_variants("금리–인하—기조。"), "금리-인하-기조.");
    }

    #[test]
    fn test_drops_caption_lines() {
        let n = Normalizer::new();
        let raw = "[표1] 주: 비고\n실제 내용 문장입니다.";
        assert_eq!(n.normalize(raw), "실제 내용 문장입니다.");
    }

    #[test]
    fn test_drops_footnote_and_source_lines() {
        let n = Normalizer::new();
        let raw = "주 1 계절조정계열 기준\n자료: 한국은행\n소비자물가는 안정되었다.";
        assert_eq!(n.normalize(raw), "소비자물가는 안정되었다.");
    }

    #[test]
    fn test_drops_page_number_lines() {
        let n = Normalizer::new();
        let raw = "성장세가 둔화되었다.\n- 12 -\n물가는 하락하였다.";
        assert_eq!(n.normalize(raw), "성장세가 둔화되었다. 물가는 하락하였다.");
    }

    #[test]
    fn test_blanks_footnote_callouts() {
        let n = Normalizer::new();
        let raw = "수출1)이 증가하였다.";
        assert_eq!(n.normalize(raw), "수출 이 증가하였다.");
    }

    #[test]
    fn test_collapses_whitespace() {
        let n = Normalizer::new();
        let result = n.normalize("금리가   큰  폭으로\n\n  상승");
        assert!(!result.contains("  "));
        assert_eq!(result, "금리가 큰 폭으로 상승");
    }

    #[test]
    fn test_symbol_allowlist() {
        let n = Normalizer::new();
        // Bullets and middle dots fall outside the allow-list.
        let result = n.normalize("• 물가 ● 전망 · 경로");
        assert_eq!(result, "물가 전망 경로");
    }

    #[test]
    fn test_idempotent() {
        let n = Normalizer::new();
        let raw = "◆표 1 제목 줄\nⅠ-1 경기1) 동향  \n- 3 -\n자료: 한국은행\n성장률은 2.1%를 기록。";
        let once = n.normalize(raw);
        assert_eq!(n.normalize(&once), once);
    }

    #[test]
    fn test_idempotent_on_symbol_prefixed_caption() {
        let n = Normalizer::new();
        // The leading symbol is blanked before the drop check, so the
        // caption is recognized on the first pass, not the second.
        let raw = "◆표 1 분기별 성장률\n내용 문장입니다.";
        let once = n.normalize(raw);
        assert_eq!(once, "내용 문장입니다.");
        assert_eq!(n.normalize(&once), once);
    }

    #[test]
    fn test_idempotent_on_callout_prefixed_caption() {
        let n = Normalizer::new();
        // Blanking the call-out exposes a caption prefix; the line must be
        // dropped on the first pass, not survive into a second one.
        let raw = "1)표 1 분기별 성장률\n실제 내용 문장입니다.";
        let once = n.normalize(raw);
        assert_eq!(once, "실제 내용 문장입니다.");
        assert_eq!(n.normalize(&once), once);
    }

    #[test]
    fn test_empty_input() {
        let n = Normalizer::new();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("\n\n  \n"), "");
    }
}
