//! Selector builder
//!
//! A selector is the match predicate handed to find, update and remove calls.

use crate::errors::StoreError;
use crate::selector::filter::SelectorFilter;
use bson::{Bson, Document};
use serde::Serialize;

/// Match predicate for repository operations
///
/// Clauses are AND-ed together when rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    pub(crate) clauses: Vec<Document>,
}

impl Selector {
    /// Selector matching every document
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_document(document: Document) -> Self {
        Self::all().and_document(document)
    }

    /// Match by store identifier
    pub fn by_id(id: impl Into<Bson>) -> Self {
        let mut document = Document::new();
        document.insert("_id", id.into());
        Self::from_document(document)
    }

    /// Build a selector from an example value
    ///
    /// Null fields and empty sub-documents are dropped, so a partially-filled
    /// entity selects on exactly the fields that were set.
    pub fn from_example<S: Serialize>(example: &S) -> Result<Self, StoreError> {
        let document = bson::to_document(example)?;
        Ok(Self::from_document(prune_unset(document)))
    }

    /// Add a filter condition
    pub fn filter(self, filter: SelectorFilter) -> Self {
        self.and_document(filter.to_document())
    }

    /// Add multiple filters (combined with AND)
    pub fn filters(self, filters: Vec<SelectorFilter>) -> Self {
        filters.into_iter().fold(self, Selector::filter)
    }

    pub fn and_document(mut self, document: Document) -> Self {
        if !document.is_empty() {
            self.clauses.push(document);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Same predicate, restricted to documents whose `deleted_path` is unset
    pub fn live(&self, deleted_path: &str) -> Selector {
        self.clone().filter(SelectorFilter::is_null(deleted_path))
    }

    /// Render to a store query document
    pub fn to_document(&self) -> Document {
        match self.clauses.len() {
            0 => Document::new(),
            1 => self.clauses[0].clone(),
            _ => {
                let mut document = Document::new();
                document.insert("$and", self.clauses.clone());
                document
            }
        }
    }
}

impl From<Document> for Selector {
    fn from(document: Document) -> Self {
        Self::from_document(document)
    }
}

impl From<SelectorFilter> for Selector {
    fn from(filter: SelectorFilter) -> Self {
        Self::all().filter(filter)
    }
}

impl From<&Selector> for Selector {
    fn from(selector: &Selector) -> Self {
        selector.clone()
    }
}

fn prune_unset(document: Document) -> Document {
    document
        .into_iter()
        .filter_map(|(key, value)| match value {
            Bson::Null => None,
            Bson::Document(inner) => {
                let inner = prune_unset(inner);
                if inner.is_empty() {
                    None
                } else {
                    Some((key, Bson::Document(inner)))
                }
            }
            other => Some((key, other)),
        })
        .collect()
}
