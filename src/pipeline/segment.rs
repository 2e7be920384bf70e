//! Structural segmentation of normalized document text.
//!
//! Locates the real content boundary (the front matter and table of contents
//! end where the first `I-1` section marker appears), trims the trailing
//! statistical appendix, and splits the remainder into paragraphs.

use regex::Regex;

/// Department names that appear as parenthesized author headers.
///
/// A paragraph boundary in the regional/issue reports is a parenthesized
/// token naming the authoring department, e.g. `(조사국 물가동향팀)`.
pub const DEPARTMENT_NAMES: [&str; 13] = [
    "조사국",
    "금융시장국",
    "국제국",
    "금융결제국",
    "경제통계1국",
    "경제통계2국",
    "금융안정국",
    "통화정책국",
    "경제연구원",
    "외자운용원",
    "국제협력국",
    "발권국",
    "금융업무국",
];

/// Paragraph splitting strategy, selected per job variant.
#[derive(Debug, Clone, Default)]
pub enum SegmentStrategy {
    /// Split on parenthesized department/author headers.
    Departments(Vec<String>),
    /// Treat the whole text as a single paragraph. Used for documents short
    /// enough that per-paragraph summarization is unnecessary.
    #[default]
    Whole,
}

impl SegmentStrategy {
    /// Header-driven splitting with the default department vocabulary.
    pub fn departments() -> Self {
        Self::Departments(DEPARTMENT_NAMES.iter().map(|s| s.to_string()).collect())
    }
}

/// A paragraph-like content unit in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Department/author header when segmentation is header-driven.
    pub header: Option<String>,
    /// Paragraph content, excluding the header.
    pub body: String,
}

impl Paragraph {
    /// Create a paragraph without a header.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            header: None,
            body: body.into(),
        }
    }

    /// Full text of the paragraph, header included.
    pub fn text(&self) -> String {
        match &self.header {
            Some(h) if !self.body.is_empty() => format!("{} {}", h, self.body),
            Some(h) => h.clone(),
            None => self.body.clone(),
        }
    }

    /// Check whether the paragraph carries any content.
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.body.trim().is_empty()
    }
}

/// Structural segmenter for normalized text.
pub struct Segmenter {
    section_start: Regex,
    appendix_start: Regex,
    strategy: SegmentStrategy,
    header_pattern: Option<Regex>,
}

impl Segmenter {
    /// Create a segmenter with the given split strategy.
    pub fn new(strategy: SegmentStrategy) -> Self {
        let header_pattern = match &strategy {
            SegmentStrategy::Departments(names) => {
                let alternatives = names
                    .iter()
                    .map(|n| regex::escape(n))
                    .collect::<Vec<_>>()
                    .join("|");
                // Parenthesized token containing a department name.
                Some(Regex::new(&format!(r"\([^)]*(?:{})[^)]*\)", alternatives)).unwrap())
            }
            SegmentStrategy::Whole => None,
        };

        Self {
            // Both the raw glyph and the canonicalized Latin "I" are allowed:
            // callers normally run the normalizer first, but the marker must
            // still be found if they do not.
            section_start: Regex::new(r"[ⅠI]\s*-\s*1").unwrap(),
            appendix_start: Regex::new(r"주요\s*통계\s*및\s*참고").unwrap(),
            strategy,
            header_pattern,
        }
    }

    /// Truncate everything before the first `I-1` section marker.
    ///
    /// Absence of the marker is not an error; the text is used unmodified.
    pub fn strip_front_matter<'a>(&self, text: &'a str) -> &'a str {
        match self.section_start.find(text) {
            Some(m) => &text[m.start()..],
            None => text,
        }
    }

    /// Truncate everything from the key-statistics appendix heading onward.
    pub fn trim_appendix<'a>(&self, text: &'a str) -> &'a str {
        match self.appendix_start.find(text) {
            Some(m) => text[..m.start()].trim_end(),
            None => text,
        }
    }

    /// Split normalized text into ordered, non-empty paragraphs.
    pub fn segment(&self, text: &str) -> Vec<Paragraph> {
        let text = self.strip_front_matter(text);
        let text = self.trim_appendix(text);

        let paragraphs = match &self.strategy {
            SegmentStrategy::Whole => vec![Paragraph::new(text.trim())],
            SegmentStrategy::Departments(_) => self.split_on_headers(text),
        };

        paragraphs.into_iter().filter(|p| !p.is_empty()).collect()
    }

    fn split_on_headers(&self, text: &str) -> Vec<Paragraph> {
        let pattern = self
            .header_pattern
            .as_ref()
            .expect("Departments strategy always compiles a header pattern");

        let headers: Vec<_> = pattern.find_iter(text).collect();
        if headers.is_empty() {
            return vec![Paragraph::new(text.trim())];
        }

        let mut paragraphs = Vec::with_capacity(headers.len());
        for (i, m) in headers.iter().enumerate() {
            let content_end = headers.get(i + 1).map_or(text.len(), |next| next.start());
            let body = text[m.end()..content_end].trim();
            paragraphs.push(Paragraph {
                header: Some(m.as_str().to_string()),
                body: body.to_string(),
            });
        }

        // Text preceding the first header belongs to the first paragraph.
        let preamble = text[..headers[0].start()].trim();
        if !preamble.is_empty() {
            let first = &mut paragraphs[0];
            first.body = format!("{} {}", preamble, first.text()).trim().to_string();
            first.header = None;
        }

        paragraphs
    }
}
