use anyhow::Result;
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::env;

pub type Number = f32;

pub const EPSILON: f32 = 1e-6;

/// Every fingerprint in a store has exactly this many components.
pub const DIMENSIONS: usize = 10;

/// The mock embedder only reads this many leading characters.
pub const EMBED_MAX_CHARS: usize = 100;

#[derive(Deserialize)]
pub struct RagmarkConfig {
    pub top_k: Option<usize>,
    pub chunk_size: Option<usize>,
    pub cap_sentences: Option<bool>,
}

impl RagmarkConfig {
    pub fn try_from(config: &Config) -> Result<Self, ConfigError> {
        Ok(RagmarkConfig {
            top_k: config.get("top_k").ok(),
            chunk_size: config.get("chunk_size").ok(),
            cap_sentences: config.get("cap_sentences").ok(),
        })
    }
}

pub struct State {
    pub top_k: usize,
    pub chunk_size: usize,
    pub cap_sentences: bool,
}

impl State {
    pub fn new() -> Result<Self> {
        let mut config = Config::default();
        #[allow(deprecated)]
        {
            config.merge(ConfigFile::with_name("ragmark_config").required(false))?;
            config.merge(Environment::with_prefix("RAGMARK"))?;
        }

        let ragmark_config = RagmarkConfig::try_from(&config)?;

        let top_k = ragmark_config
            .top_k
            .or_else(|| env::var("RAGMARK_TOP_K").ok().and_then(|s| s.parse().ok()))
            .unwrap_or(2);

        let chunk_size = ragmark_config
            .chunk_size
            .or_else(|| env::var("RAGMARK_CHUNK_SIZE").ok().and_then(|s| s.parse().ok()))
            .unwrap_or(100);

        // Off by default: the sentence splitter alone does not cap chunk
        // length.
        let cap_sentences = ragmark_config
            .cap_sentences
            .or_else(|| env::var("RAGMARK_CAP_SENTENCES").ok().and_then(|s| s.parse().ok()))
            .unwrap_or(false);

        if chunk_size == 0 {
            anyhow::bail!("RAGMARK_CHUNK_SIZE must be greater than zero.");
        }

        Ok(Self {
            top_k,
            chunk_size,
            cap_sentences,
        })
    }

    pub fn print_config(&self) {
        println!("top_k={}", self.top_k);
        println!("chunk_size={}", self.chunk_size);
        println!("cap_sentences={}", self.cap_sentences);
        println!("dimensions={}", DIMENSIONS);
        println!("embed_max_chars={}", EMBED_MAX_CHARS);
    }
}

pub fn verbose_print(message: &str) {
    if env::var("RAGMARK_VERBOSE").unwrap_or_else(|_| "false".to_string()) == "true" {
        eprintln!("{}", message);
    }
}
