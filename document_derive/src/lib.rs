//! Procedural macros for soft-deletable documents
//!
//! This crate provides the `#[document]` macro and `SoftDeletable` derive that
//! tell the repository where an entity keeps its identifier and its
//! soft-delete metadata.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod generation;
mod model_macro;
mod parsing;

use generation::{generate_collection_impl, generate_soft_deletable_impl};
use model_macro::document_attribute;
use parsing::{parse_document_attributes, parse_field_attributes};

/// Derive macro for the SoftDeletable trait
///
/// Note: It's recommended to use the `#[document]` attribute macro instead,
/// which adds this derive along with serde and fixes the `_id` mapping.
///
/// Manual usage:
/// ```rust,ignore
/// #[derive(Debug, Clone, Serialize, Deserialize, SoftDeletable)]
/// #[soft_delete(collection = "items")]
/// pub struct Item {
///     #[id]
///     #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
///     pub id: Option<ObjectId>,
///
///     pub name: String,
///
///     #[metadata]
///     #[serde(default)]
///     pub timestamps: SoftDeleteMetadata,
/// }
/// ```
///
/// A field typed `SoftDeleteMetadata` is picked up without `#[metadata]`.
/// Marking it `#[serde(flatten)]` stores `updated_at`/`deleted_at` at the
/// top level of the document.
#[proc_macro_derive(SoftDeletable, attributes(soft_delete, id, metadata))]
pub fn derive_soft_deletable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let document_info = match parse_document_attributes(&input.attrs) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let field_info = match parse_field_attributes(&input.data) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let soft_deletable_impl = generate_soft_deletable_impl(name, &input.generics, &field_info);
    let collection_impl = generate_collection_impl(name, &input.generics, &document_info);

    let expanded = quote::quote! {
        #soft_deletable_impl
        #collection_impl
    };

    TokenStream::from(expanded)
}

/// Convenience attribute macro that adds all necessary derives for a document
///
/// Usage:
/// ```rust,ignore
/// use mongohaus::prelude::*;
///
/// #[document(collection = "items")]
/// pub struct Item {
///     #[id]
///     pub id: Option<ObjectId>,
///     pub name: String,
///     #[metadata]
///     pub timestamps: SoftDeleteMetadata,
/// }
/// ```
#[proc_macro_attribute]
pub fn document(attr: TokenStream, item: TokenStream) -> TokenStream {
    document_attribute(attr, item)
}
