use crate::config::{Number, DIMENSIONS, EMBED_MAX_CHARS};
use crate::vector_ops::normalize_vector;

/// Maps text to a fixed-dimension fingerprint suitable for similarity
/// comparison. The store and evaluator only depend on this trait, so a
/// real embedding model can be swapped in without touching either.
pub trait Embedder {
    fn embed(&self, text: &str) -> Vec<Number>;

    fn dimensions(&self) -> usize {
        DIMENSIONS
    }
}

/// Deterministic stand-in for a learned embedding model. Buckets the code
/// point of each character by position, then unit-normalizes. Identical
/// input always yields bit-identical output.
#[derive(Clone, Copy, Default)]
pub struct CharHashEmbedder;

impl Embedder for CharHashEmbedder {
    fn embed(&self, text: &str) -> Vec<Number> {
        let mut vec = vec![0.0; DIMENSIONS];
        // Only the leading characters count; longer text is truncated to
        // bound the cost of a single embed call.
        for (i, ch) in text.chars().take(EMBED_MAX_CHARS).enumerate() {
            vec[i % DIMENSIONS] += ch as u32 as Number;
        }
        normalize_vector(&mut vec);
        vec
    }
}
