//! Query and update evaluation for the in-memory backend
//!
//! Covers the subset of the query language selectors render to: equality on
//! dotted paths (null also matches a missing field), `$eq`, `$ne`, `$gt`,
//! `$gte`, `$lt`, `$lte`, `$in`, `$nin`, `$exists`, `$and`, `$or`, plus
//! `$set` / `$unset` updates.

use crate::errors::StoreError;
use crate::selector::path;
use bson::{Bson, Document};
use std::cmp::Ordering;

/// Whether `document` satisfies `filter`
pub fn matches(document: &Document, filter: &Document) -> Result<bool, StoreError> {
    for (key, condition) in filter {
        let satisfied = match key.as_str() {
            "$and" => all_match(document, condition)?,
            "$or" => any_match(document, condition)?,
            op if op.starts_with('$') => {
                return Err(unsupported(op));
            }
            field => field_matches(path::lookup(document, field), condition)?,
        };
        if !satisfied {
            return Ok(false);
        }
    }
    Ok(true)
}

fn clauses(condition: &Bson) -> Result<Vec<&Document>, StoreError> {
    match condition {
        Bson::Array(items) => items
            .iter()
            .map(|item| match item {
                Bson::Document(clause) => Ok(clause),
                _ => Err(StoreError::Backend(
                    "logical operator members must be documents".to_string(),
                )),
            })
            .collect(),
        _ => Err(StoreError::Backend(
            "logical operator expects an array".to_string(),
        )),
    }
}

fn all_match(document: &Document, condition: &Bson) -> Result<bool, StoreError> {
    for clause in clauses(condition)? {
        if !matches(document, clause)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn any_match(document: &Document, condition: &Bson) -> Result<bool, StoreError> {
    for clause in clauses(condition)? {
        if matches(document, clause)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_operator_document(condition: &Bson) -> Option<&Document> {
    match condition {
        Bson::Document(inner)
            if !inner.is_empty() && inner.keys().all(|k| k.starts_with('$')) =>
        {
            Some(inner)
        }
        _ => None,
    }
}

fn field_matches(actual: Option<&Bson>, condition: &Bson) -> Result<bool, StoreError> {
    let Some(operators) = is_operator_document(condition) else {
        return Ok(equals(actual, condition));
    };

    for (op, operand) in operators {
        let satisfied = match op.as_str() {
            "$eq" => equals(actual, operand),
            "$ne" => !equals(actual, operand),
            "$gt" => compares(actual, operand, |o| o == Ordering::Greater),
            "$gte" => compares(actual, operand, |o| o != Ordering::Less),
            "$lt" => compares(actual, operand, |o| o == Ordering::Less),
            "$lte" => compares(actual, operand, |o| o != Ordering::Greater),
            "$in" => in_list(actual, operand)?,
            "$nin" => !in_list(actual, operand)?,
            "$exists" => {
                let wanted = match operand {
                    Bson::Boolean(b) => *b,
                    Bson::Int32(n) => *n != 0,
                    Bson::Int64(n) => *n != 0,
                    _ => true,
                };
                actual.is_some() == wanted
            }
            other => return Err(unsupported(other)),
        };
        if !satisfied {
            return Ok(false);
        }
    }
    Ok(true)
}

fn in_list(actual: Option<&Bson>, operand: &Bson) -> Result<bool, StoreError> {
    match operand {
        Bson::Array(candidates) => Ok(candidates.iter().any(|c| equals(actual, c))),
        _ => Err(StoreError::Backend("$in/$nin expects an array".to_string())),
    }
}

/// Equality with null-matches-missing and array-contains semantics
fn equals(actual: Option<&Bson>, expected: &Bson) -> bool {
    match (actual, expected) {
        (None, Bson::Null) => true,
        (None, _) => false,
        (Some(value), expected) => {
            if values_equal(value, expected) {
                return true;
            }
            match value {
                Bson::Array(items) => items.iter().any(|item| values_equal(item, expected)),
                _ => false,
            }
        }
    }
}

fn values_equal(a: &Bson, b: &Bson) -> bool {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

fn compares(actual: Option<&Bson>, operand: &Bson, accept: impl Fn(Ordering) -> bool) -> bool {
    let Some(actual) = actual else {
        return false;
    };
    let ordering = match (as_number(actual), as_number(operand)) {
        (Some(x), Some(y)) => x.partial_cmp(&y),
        _ => match (actual, operand) {
            (Bson::String(x), Bson::String(y)) => Some(x.cmp(y)),
            (Bson::DateTime(x), Bson::DateTime(y)) => Some(x.cmp(y)),
            (Bson::ObjectId(x), Bson::ObjectId(y)) => Some(x.cmp(y)),
            (Bson::Boolean(x), Bson::Boolean(y)) => Some(x.cmp(y)),
            _ => None,
        },
    };
    ordering.map(accept).unwrap_or(false)
}

/// Apply an update-operator document in place
pub fn apply_update(document: &mut Document, update: &Document) -> Result<(), StoreError> {
    for (op, fields) in update {
        let Bson::Document(fields) = fields else {
            return Err(StoreError::Backend(format!(
                "update operator {} expects a document",
                op
            )));
        };
        match op.as_str() {
            "$set" => {
                for (field, value) in fields {
                    if field == "_id" {
                        return Err(StoreError::Backend(
                            "the _id field is immutable".to_string(),
                        ));
                    }
                    if !path::assign(document, field, value.clone()) {
                        return Err(StoreError::Backend(format!(
                            "cannot create field along path '{}'",
                            field
                        )));
                    }
                }
            }
            "$unset" => {
                for (field, _) in fields {
                    path::unset(document, field);
                }
            }
            other => return Err(unsupported(other)),
        }
    }
    Ok(())
}

fn unsupported(op: &str) -> StoreError {
    StoreError::Backend(format!("unsupported operator '{}'", op))
}
