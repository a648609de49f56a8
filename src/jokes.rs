//! Joke pool loaded from a JSON list of strings.

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::JokeError;

/// Fixed set of jokes, one picked per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JokePool {
    jokes: Vec<String>,
}

impl JokePool {
    /// Build a pool; an empty list is rejected.
    pub fn new(jokes: Vec<String>) -> Result<Self, JokeError> {
        if jokes.is_empty() {
            return Err(JokeError::Empty);
        }
        Ok(Self { jokes })
    }

    /// Parse a JSON array of strings.
    pub fn from_json_str(s: &str) -> Result<Self, JokeError> {
        Self::new(serde_json::from_str(s)?)
    }

    /// Read a JSON jokes file.
    pub fn load(path: &Path) -> Result<Self, JokeError> {
        let text = std::fs::read_to_string(path).map_err(|source| JokeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.jokes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jokes.is_empty()
    }

    /// Pick one joke uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // The pool is never empty
        self.jokes.choose(rng).map(String::as_str).unwrap_or_default()
    }
}
