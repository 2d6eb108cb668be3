//! Code generation for the `SoftDeletable` and `DocumentCollection` impls

use crate::parsing::{DocumentInfo, FieldInfo};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Generics, Ident};

pub fn generate_soft_deletable_impl(
    name: &Ident,
    generics: &Generics,
    field_info: &FieldInfo,
) -> TokenStream2 {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let id_field = &field_info.id_field;
    let metadata_field = &field_info.metadata_field;

    let metadata_key = match &field_info.metadata_key {
        Some(key) => quote! { ::std::option::Option::Some(#key) },
        None => quote! { ::std::option::Option::None },
    };

    quote! {
        impl #impl_generics store_object::SoftDeletable for #name #ty_generics #where_clause {
            fn metadata_key() -> ::std::option::Option<&'static str> {
                #metadata_key
            }

            fn metadata(&self) -> &store_object::SoftDeleteMetadata {
                &self.#metadata_field
            }

            fn metadata_mut(&mut self) -> &mut store_object::SoftDeleteMetadata {
                &mut self.#metadata_field
            }

            fn id(&self) -> ::std::option::Option<store_object::bson::Bson> {
                store_object::id_to_bson(&self.#id_field)
            }

            fn set_id(
                &mut self,
                id: store_object::bson::Bson,
            ) -> ::std::result::Result<(), store_object::StoreError> {
                self.#id_field = store_object::id_from_bson(id)?;
                ::std::result::Result::Ok(())
            }
        }
    }
}

pub fn generate_collection_impl(
    name: &Ident,
    generics: &Generics,
    document_info: &DocumentInfo,
) -> TokenStream2 {
    let Some(collection) = &document_info.collection else {
        return quote! {};
    };
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics store_object::DocumentCollection for #name #ty_generics #where_clause {
            fn collection_name() -> &'static str {
                #collection
            }
        }
    }
}
