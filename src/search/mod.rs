pub mod client;
pub mod errors;
pub mod orchestrator;
pub mod response_text;
pub mod traits;

pub use client::HttpSearchBackend;
pub use errors::SearchError;
pub use orchestrator::SearchOrchestrator;
pub use traits::SearchBackend;
