//! Dotted-path access into documents

use bson::{Bson, Document};

/// Value at a dotted path such as `timestamps.deleted_at`
pub fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = document.get(first)?;
    for segment in segments {
        current = match current {
            Bson::Document(inner) => inner.get(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Set a value at a dotted path, creating intermediate sub-documents
///
/// Returns `false` when an intermediate segment holds a non-document value.
pub fn assign(document: &mut Document, path: &str, value: Bson) -> bool {
    match path.split_once('.') {
        None => {
            document.insert(path, value);
            true
        }
        Some((head, rest)) => {
            if !document.contains_key(head) {
                document.insert(head, Document::new());
            }
            match document.get_mut(head) {
                Some(Bson::Document(inner)) => assign(inner, rest, value),
                _ => false,
            }
        }
    }
}

/// Remove the value at a dotted path
pub fn unset(document: &mut Document, path: &str) {
    match path.split_once('.') {
        None => {
            document.remove(path);
        }
        Some((head, rest)) => {
            if let Some(Bson::Document(inner)) = document.get_mut(head) {
                unset(inner, rest);
            }
        }
    }
}

/// Whether the document's deletion timestamp at `deleted_path` is unset
pub fn is_live_at(document: &Document, deleted_path: &str) -> bool {
    matches!(lookup(document, deleted_path), None | Some(Bson::Null))
}
