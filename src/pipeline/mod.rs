//! Document normalization and chunking pipeline.
//!
//! Raw extracted text flows through three strictly sequential stages:
//! normalization (canonicalize glyph variants, drop noise lines), structural
//! segmentation (front-matter/appendix trimming, paragraph splitting) and
//! sentence filtering (drop caption/footnote/numeric fragments). The output
//! is an ordered list of clean paragraphs ready for batch request building.

mod normalize;
mod segment;
mod sentence;

pub use normalize::{unify_variants, Normalizer};
pub use segment::{Paragraph, SegmentStrategy, Segmenter, DEPARTMENT_NAMES};
pub use sentence::{split_sentences, SentenceFilter};

/// Options for the document pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Paragraph splitting strategy.
    pub segmentation: SegmentStrategy,
}

impl PipelineOptions {
    /// Create options with the default flat segmentation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segmentation strategy.
    pub fn with_segmentation(mut self, strategy: SegmentStrategy) -> Self {
        self.segmentation = strategy;
        self
    }
}

/// The full normalize → segment → filter pipeline.
pub struct Pipeline {
    normalizer: Normalizer,
    segmenter: Segmenter,
    filter: SentenceFilter,
}

impl Pipeline {
    /// Create a pipeline with the given options.
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            normalizer: Normalizer::new(),
            segmenter: Segmenter::new(options.segmentation),
            filter: SentenceFilter::new(),
        }
    }

    /// Extract clean paragraphs from raw PDF-extracted text.
    ///
    /// Paragraphs preserve source order and are non-empty; an input with no
    /// surviving content yields an empty list.
    pub fn paragraphs(&self, raw: &str) -> Vec<Paragraph> {
        let normalized = self.normalizer.normalize(raw);
        self.segmenter
            .segment(&normalized)
            .into_iter()
            .map(|p| Paragraph {
                header: p.header,
                body: self.filter.clean(&p.body),
            })
            .filter(|p| !p.is_empty())
            .collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}
