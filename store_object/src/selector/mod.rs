//! Selector construction
//!
//! Selectors are plain query documents with a small typed builder on top.

pub mod builder;
pub mod filter;
pub mod path;

#[cfg(test)]
mod tests;

pub use builder::Selector;
pub use filter::{LogicalOperator, SelectorCondition, SelectorFilter, SelectorOperator};
