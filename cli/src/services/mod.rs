//! Concrete collaborator adapters for the job binaries.

mod openai;
mod slack;
mod store;

pub use openai::OpenAiBatchClient;
pub use slack::SlackNotifier;
pub use store::{FileStatusStore, LocalObjectStore};
