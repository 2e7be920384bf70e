//! Token-count estimation for summary length selection.

use std::sync::LazyLock;

use tiktoken_rs::CoreBPE;

static CL100K: LazyLock<CoreBPE> = LazyLock::new(|| {
    tiktoken_rs::cl100k_base().expect("cl100k_base tokenizer tables are bundled")
});

/// How a paragraph's token count is estimated.
///
/// The character-ratio proxy and the exact tokenizer count are a deliberate
/// speed/accuracy tradeoff selected per job variant, not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEstimator {
    /// Cheap proxy: character length divided by a fixed ratio.
    CharRatio(u32),
    /// Exact count from the cl100k BPE tokenizer.
    Exact,
}

impl TokenEstimator {
    /// The default cheap proxy (one token per three characters).
    pub fn char_ratio() -> Self {
        Self::CharRatio(3)
    }

    /// Estimate the token count of `text`.
    pub fn count(&self, text: &str) -> usize {
        match self {
            Self::CharRatio(ratio) => text.chars().count() / (*ratio).max(1) as usize,
            Self::Exact => CL100K.encode_with_special_tokens(text).len(),
        }
    }
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::char_ratio()
    }
}
