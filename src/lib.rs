pub mod config;
pub mod embedding;
pub mod eval;
pub mod pipeline;
pub mod store;
pub mod tokenizer;
pub mod vector_ops;

pub use embedding::{CharHashEmbedder, Embedder};
pub use eval::Evaluator;
pub use pipeline::{QueryResult, RagPipeline};
pub use store::{DocumentStore, IndexEntry, ScoredMatch};
