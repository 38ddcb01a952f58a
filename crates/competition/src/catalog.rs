use std::{collections::HashSet, fs, path::Path, sync::Arc};

use serde::Deserialize;
use shared::domain::{Question, QuestionId};
use thiserror::Error;

const BUILTIN_QUESTIONS: &str = include_str!("../data/questions.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one question")]
    Empty,
    #[error("question ids must be positive (found {0} at position {1})")]
    NonPositiveId(QuestionId, usize),
    #[error("question id {0} appears more than once")]
    DuplicateId(QuestionId),
    #[error("unsupported catalog format '{0}', expected .json or .toml")]
    UnsupportedFormat(String),
    #[error("failed to read catalog file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
struct TomlCatalog {
    questions: Vec<Question>,
}

/// The ordered, immutable question list. Cloning shares the same storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Arc<[Question]>,
}

impl Catalog {
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if question.id.0 == 0 {
                return Err(CatalogError::NonPositiveId(question.id, position));
            }
            if !seen.insert(question.id) {
                return Err(CatalogError::DuplicateId(question.id));
            }
        }
        Ok(Self {
            questions: questions.into(),
        })
    }

    /// The riddle set shipped with the server.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_QUESTIONS)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(raw)?)
    }

    pub fn from_toml(raw: &str) -> Result<Self, CatalogError> {
        let parsed: TomlCatalog = toml::from_str(raw)?;
        Self::new(parsed.questions)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if extension != "json" && extension != "toml" {
            return Err(CatalogError::UnsupportedFormat(extension));
        }
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if extension == "json" {
            Self::from_json(&raw)
        } else {
            Self::from_toml(&raw)
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
