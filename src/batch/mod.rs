//! Batch request building and result reassociation.

mod buckets;
mod prompt;
mod request;
mod result;
mod tokens;

pub use buckets::{BucketTable, BucketTier};
pub use prompt::{render_instruction, SummaryShape};
pub use request::{
    ordinal_id, BatchRequestBuilder, ChatMessage, InferenceRequest, RequestBody, ResponseFormat,
    CHAT_COMPLETIONS_URL,
};
pub use result::{reassociate, ItemOutcome, ItemResult, ParagraphSummary, SummaryBody};
pub use tokens::TokenEstimator;
