use crate::config::{verbose_print, Number};
use crate::embedding::Embedder;
use crate::vector_ops::dot_product;
use anyhow::Result;
use serde::Serialize;

/// A chunk of source text paired with its fingerprint. Entries are owned
/// by the store, appended in ingestion order and never edited or removed.
pub struct IndexEntry {
    pub text: String,
    pub fingerprint: Vec<Number>,
}

#[derive(Serialize, Clone, Debug)]
pub struct ScoredMatch {
    pub score: Number,
    pub text: String,
}

/// Append-only in-memory index. Search is an exhaustive linear scan,
/// which is the right trade-off for the small corpora this targets.
pub struct DocumentStore<E: Embedder> {
    embedder: E,
    entries: Vec<IndexEntry>,
    cap_sentences: bool,
}

impl<E: Embedder> DocumentStore<E> {
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            entries: Vec::new(),
            cap_sentences: false,
        }
    }

    /// When enabled, `ingest` re-splits sentences longer than `chunk_size`
    /// characters. Off by default: the sentence splitter alone does not
    /// enforce a maximum chunk length.
    pub fn cap_sentences(mut self, on: bool) -> Self {
        self.cap_sentences = on;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Split `text` into sentence-like chunks, fingerprint each and append
    /// it to the index. Whitespace-only chunks are skipped. No
    /// deduplication: re-ingesting the same text grows the store.
    pub fn ingest(&mut self, text: &str, chunk_size: usize) {
        let sentences = split_sentences(text);
        verbose_print(&format!("Split text into {} chunks", sentences.len()));

        for sentence in sentences {
            if sentence.trim().is_empty() {
                continue;
            }
            if self.cap_sentences && sentence.chars().count() > chunk_size {
                for piece in hard_split(sentence, chunk_size) {
                    self.push_chunk(piece);
                }
            } else {
                self.push_chunk(sentence);
            }
        }

        verbose_print(&format!("Indexed {} chunks total", self.entries.len()));
    }

    fn push_chunk(&mut self, chunk: &str) {
        let fingerprint = self.embedder.embed(chunk);
        self.entries.push(IndexEntry {
            text: chunk.to_string(),
            fingerprint,
        });
    }

    /// Score every entry against the query fingerprint and return the
    /// `top_k` best matches, best first. Ties keep ingestion order. An
    /// empty store or `top_k == 0` yields an empty result.
    pub fn search(&self, query_text: &str, top_k: usize) -> Result<Vec<ScoredMatch>> {
        let query_fingerprint = self.embedder.embed(query_text);

        let mut results = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let score = dot_product(&query_fingerprint, &entry.fingerprint)?;
            results.push(ScoredMatch {
                score,
                text: entry.text.clone(),
            });
        }

        // Stable sort so equal scores stay in insertion order.
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        verbose_print(&format!("Search returned {} results", results.len()));
        Ok(results)
    }
}

/// Break after `.`, `!` or `?` followed by one or more spaces. The boundary
/// character stays with the preceding sentence; the spaces are consumed.
fn split_sentences(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut i = 0;

    // Byte scan is safe here: every boundary byte is ASCII, so each slice
    // point is a valid UTF-8 boundary.
    while i < bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') && i + 1 < bytes.len() && bytes[i + 1] == b' ' {
            chunks.push(&text[start..=i]);
            i += 1;
            while i < bytes.len() && bytes[i] == b' ' {
                i += 1;
            }
            start = i;
        } else {
            i += 1;
        }
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Re-split an over-long sentence into pieces of at most `max_chars`
/// characters, respecting UTF-8 boundaries.
fn hard_split(sentence: &str, max_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in sentence.char_indices() {
        if count == max_chars {
            pieces.push(&sentence[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }

    if start < sentence.len() {
        pieces.push(&sentence[start..]);
    }
    pieces
}
