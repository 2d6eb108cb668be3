//! Selector filters
//!
//! Typed conditions that render to store query documents.

use bson::{Bson, Document};

/// Condition operators
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorOperator {
    Eq,     // $eq
    Ne,     // $ne
    Gt,     // $gt
    Gte,    // $gte
    Lt,     // $lt
    Lte,    // $lte
    In,     // $in
    NotIn,  // $nin
    Exists, // $exists
}

impl SelectorOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorOperator::Eq => "$eq",
            SelectorOperator::Ne => "$ne",
            SelectorOperator::Gt => "$gt",
            SelectorOperator::Gte => "$gte",
            SelectorOperator::Lt => "$lt",
            SelectorOperator::Lte => "$lte",
            SelectorOperator::In => "$in",
            SelectorOperator::NotIn => "$nin",
            SelectorOperator::Exists => "$exists",
        }
    }
}

/// Single condition on a (possibly dotted) field path
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorCondition {
    pub field: String,
    pub operator: SelectorOperator,
    pub value: Bson,
}

/// Logical operators for combining conditions
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalOperator {
    And,
    Or,
}

/// Selector filter that can be nested
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorFilter {
    Condition(SelectorCondition),
    Group {
        operator: LogicalOperator,
        filters: Vec<SelectorFilter>,
    },
}

impl SelectorFilter {
    /// Create a simple condition
    pub fn condition(field: &str, operator: SelectorOperator, value: impl Into<Bson>) -> Self {
        Self::Condition(SelectorCondition {
            field: field.to_string(),
            operator,
            value: value.into(),
        })
    }

    /// Create AND group
    pub fn and(filters: Vec<SelectorFilter>) -> Self {
        Self::Group {
            operator: LogicalOperator::And,
            filters,
        }
    }

    /// Create OR group
    pub fn or(filters: Vec<SelectorFilter>) -> Self {
        Self::Group {
            operator: LogicalOperator::Or,
            filters,
        }
    }

    pub fn eq(field: &str, value: impl Into<Bson>) -> Self {
        Self::condition(field, SelectorOperator::Eq, value)
    }

    pub fn ne(field: &str, value: impl Into<Bson>) -> Self {
        Self::condition(field, SelectorOperator::Ne, value)
    }

    pub fn gt(field: &str, value: impl Into<Bson>) -> Self {
        Self::condition(field, SelectorOperator::Gt, value)
    }

    pub fn gte(field: &str, value: impl Into<Bson>) -> Self {
        Self::condition(field, SelectorOperator::Gte, value)
    }

    pub fn lt(field: &str, value: impl Into<Bson>) -> Self {
        Self::condition(field, SelectorOperator::Lt, value)
    }

    pub fn lte(field: &str, value: impl Into<Bson>) -> Self {
        Self::condition(field, SelectorOperator::Lte, value)
    }

    pub fn in_values(field: &str, values: Vec<Bson>) -> Self {
        Self::condition(field, SelectorOperator::In, Bson::Array(values))
    }

    pub fn not_in_values(field: &str, values: Vec<Bson>) -> Self {
        Self::condition(field, SelectorOperator::NotIn, Bson::Array(values))
    }

    pub fn exists(field: &str, exists: bool) -> Self {
        Self::condition(field, SelectorOperator::Exists, exists)
    }

    /// Matches both an explicit null and a missing field
    pub fn is_null(field: &str) -> Self {
        Self::condition(field, SelectorOperator::Eq, Bson::Null)
    }

    /// Render to a query document
    ///
    /// Empty groups render to an empty (match-all) document and single-member
    /// groups collapse to their member.
    pub fn to_document(&self) -> Document {
        match self {
            SelectorFilter::Condition(condition) => {
                let mut predicate = Document::new();
                predicate.insert(condition.operator.as_str(), condition.value.clone());
                let mut document = Document::new();
                document.insert(condition.field.clone(), predicate);
                document
            }
            SelectorFilter::Group { operator, filters } => {
                let rendered: Vec<Document> =
                    filters.iter().map(SelectorFilter::to_document).collect();

                // An empty member matches everything
                if *operator == LogicalOperator::Or && rendered.iter().any(Document::is_empty) {
                    return Document::new();
                }

                let mut members: Vec<Document> =
                    rendered.into_iter().filter(|d| !d.is_empty()).collect();
                match members.len() {
                    0 => Document::new(),
                    1 => members.remove(0),
                    _ => {
                        let key = match operator {
                            LogicalOperator::And => "$and",
                            LogicalOperator::Or => "$or",
                        };
                        let mut document = Document::new();
                        document.insert(key, members);
                        document
                    }
                }
            }
        }
    }
}

impl From<SelectorFilter> for Document {
    fn from(filter: SelectorFilter) -> Self {
        filter.to_document()
    }
}
