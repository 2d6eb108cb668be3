use crate::parsing::{has_attribute, is_option_type, serde_flag, serde_rename};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Error, Fields};

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
///
/// The `#[id]` field is stored as `_id` (omitted while `None`) and the
/// `#[metadata]` field defaults when absent from a stored document.
pub fn document_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = proc_macro2::TokenStream::from(attr);
    let mut input = parse_macro_input!(item as DeriveInput);

    let fields = match &mut input.data {
        Data::Struct(data) => match &mut data.fields {
            Fields::Named(fields) => fields,
            other => {
                return Error::new_spanned(other, "document requires named fields")
                    .to_compile_error()
                    .into();
            }
        },
        _ => {
            return Error::new_spanned(&input.ident, "document can only be used on structs")
                .to_compile_error()
                .into();
        }
    };

    for field in fields.named.iter_mut() {
        if has_attribute(&field.attrs, "id") && serde_rename(&field.attrs).is_none() {
            if is_option_type(&field.ty) {
                field.attrs.push(parse_quote!(
                    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
                ));
            } else {
                field.attrs.push(parse_quote!(#[serde(rename = "_id")]));
            }
        }

        if has_attribute(&field.attrs, "metadata") && !serde_flag(&field.attrs, "flatten") {
            field.attrs.push(parse_quote!(#[serde(default)]));
        }
    }

    let collection = if args.is_empty() {
        quote! {}
    } else {
        quote! { #[soft_delete(#args)] }
    };

    let expanded = quote! {
        #[derive(
            Debug,
            Clone,
            store_object::serde::Serialize,
            store_object::serde::Deserialize,
            SoftDeletable
        )]
        #[serde(crate = "store_object::serde")]
        #collection
        #input
    };

    TokenStream::from(expanded)
}
