use crate::config::{Number, State};
use crate::embedding::{CharHashEmbedder, Embedder};
use crate::eval::Evaluator;
use crate::store::{DocumentStore, ScoredMatch};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
pub struct QueryResult {
    /// Templated placeholder, not real language-model output.
    pub answer: String,
    /// Human-readable rendering of the top matches, one per line.
    pub context: String,
    pub top_matches: Vec<ScoredMatch>,
    pub faithfulness: Number,
}

/// Retrieval plus answer scoring, composed from an explicit store and
/// evaluator. No globals: independent pipelines never share state.
pub struct RagPipeline<E: Embedder = CharHashEmbedder> {
    store: DocumentStore<E>,
    evaluator: Evaluator,
    chunk_size: usize,
}

impl RagPipeline<CharHashEmbedder> {
    pub fn new() -> Self {
        Self::with_embedder(CharHashEmbedder)
    }

    pub fn from_state(state: &State) -> Self {
        Self {
            store: DocumentStore::new(CharHashEmbedder).cap_sentences(state.cap_sentences),
            evaluator: Evaluator::new(),
            chunk_size: state.chunk_size,
        }
    }
}

impl Default for RagPipeline<CharHashEmbedder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Embedder> RagPipeline<E> {
    pub fn with_embedder(embedder: E) -> Self {
        Self {
            store: DocumentStore::new(embedder),
            evaluator: Evaluator::new(),
            chunk_size: 100,
        }
    }

    pub fn indexed_chunks(&self) -> usize {
        self.store.len()
    }

    pub fn ingest(&mut self, text: &str) {
        self.store.ingest(text, self.chunk_size);
    }

    /// Retrieve the `top_k` most similar chunks, synthesize a placeholder
    /// answer and score it against the retrieved context.
    pub fn query(&self, question: &str, top_k: usize) -> Result<QueryResult> {
        let top_matches = self.store.search(question, top_k)?;

        let context = top_matches
            .iter()
            .map(|m| format!("- {} (Score: {:.4})", m.text, m.score))
            .collect::<Vec<_>>()
            .join("\n");

        // A real model would generate from the context here.
        let answer = format!("Based on the context, here is the answer to '{}'...", question);

        let faithfulness = self.evaluator.faithfulness(&answer, &context);

        Ok(QueryResult {
            answer,
            context,
            top_matches,
            faithfulness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_lines_carry_four_decimal_scores() {
        let mut rag = RagPipeline::new();
        rag.ingest("The sky is blue. The grass is green.");
        let result = rag.query("sky", 2).unwrap();
        for line in result.context.lines() {
            assert!(line.starts_with("- "));
            assert!(line.contains("(Score: "));
            let score_part = line.rsplit("(Score: ").next().unwrap();
            let digits = score_part.trim_end_matches(')');
            assert_eq!(digits.split('.').nth(1).map(str::len), Some(4));
        }
    }

    #[test]
    fn answer_references_the_question() {
        let mut rag = RagPipeline::new();
        rag.ingest("Something to find.");
        let result = rag.query("find what?", 1).unwrap();
        assert!(result.answer.contains("find what?"));
    }

    #[test]
    fn empty_store_query_yields_empty_context_and_zero_score() {
        let rag = RagPipeline::new();
        let result = rag.query("anything", 2).unwrap();
        assert!(result.top_matches.is_empty());
        assert!(result.context.is_empty());
        assert_eq!(result.faithfulness, 0.0);
    }
}
