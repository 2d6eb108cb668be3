//! Parsing utilities for document and field attributes
//!
//! This module handles the `#[soft_delete(...)]`, `#[id]` and `#[metadata]`
//! attributes and the serde attributes that decide stored field names.

use syn::{
    spanned::Spanned, Attribute, Data, Error, Fields, Ident, LitStr, Result, Token, Type,
};

/// Name of the metadata type fields are auto-detected by
const METADATA_TYPE: &str = "SoftDeleteMetadata";

/// Namespace budget for collection names
const MAX_COLLECTION_LENGTH: usize = 120;

/// Validate collection name and return syn::Error for better proc macro error handling
pub fn validate_collection_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_collection_name(name)
        .map_err(|e| Error::new(span, format!("Invalid collection name '{}': {}", name, e)))
}

/// Mirrors store_object::validation::ValidatedCollectionName
fn validate_collection_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if name.len() > MAX_COLLECTION_LENGTH {
        return Err(format!(
            "Name is too long: {} bytes (max {})",
            name.len(),
            MAX_COLLECTION_LENGTH
        ));
    }

    if name.contains('$') || name.contains('\0') {
        return Err("'$' and NUL are not allowed".to_string());
    }

    if name.starts_with("system.") {
        return Err("the 'system.' prefix is reserved".to_string());
    }

    Ok(())
}

#[derive(Debug, Default)]
pub struct DocumentInfo {
    pub collection: Option<String>,
}

#[derive(Debug)]
pub struct FieldInfo {
    pub id_field: Ident,
    pub metadata_field: Ident,
    /// Stored key of the metadata sub-document, `None` when flattened
    pub metadata_key: Option<String>,
}

pub fn parse_document_attributes(attrs: &[Attribute]) -> Result<DocumentInfo> {
    let mut info = DocumentInfo::default();

    for attr in attrs {
        if !attr.path().is_ident("soft_delete") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let lit: LitStr = meta.value()?.parse()?;
                validate_collection_name_syn(&lit.value(), lit.span())?;
                info.collection = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unsupported soft_delete attribute, expected `collection = \"...\"`"))
            }
        })?;
    }

    Ok(info)
}

pub fn parse_field_attributes(data: &Data) -> Result<FieldInfo> {
    let Data::Struct(data_struct) = data else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "SoftDeletable can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(fields_named) = &data_struct.fields else {
        return Err(Error::new(
            data_struct.fields.span(),
            "SoftDeletable can only be derived for structs with named fields",
        ));
    };

    let mut marked_id = None;
    let mut implicit_id = None;
    let mut marked_metadata = None;
    let mut implicit_metadata = None;

    for field in &fields_named.named {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "Field must have a name"))?;

        if has_attribute(&field.attrs, "id") {
            if marked_id.is_some() {
                return Err(Error::new_spanned(field, "only one field may be marked #[id]"));
            }
            marked_id = Some(field);
        } else if stored_name(field_name, &field.attrs) == "_id" {
            implicit_id = Some(field);
        }

        if has_attribute(&field.attrs, "metadata") {
            if marked_metadata.is_some() {
                return Err(Error::new_spanned(
                    field,
                    "only one field may be marked #[metadata]",
                ));
            }
            marked_metadata = Some(field);
        } else if is_metadata_type(&field.ty) && implicit_metadata.is_none() {
            implicit_metadata = Some(field);
        }
    }

    let id = marked_id.or(implicit_id).ok_or_else(|| {
        Error::new(
            proc_macro2::Span::call_site(),
            "no identifier field: mark one field with #[id]",
        )
    })?;
    let metadata = marked_metadata.or(implicit_metadata).ok_or_else(|| {
        Error::new(
            proc_macro2::Span::call_site(),
            "no soft-delete metadata field: embed a SoftDeleteMetadata field and mark it #[metadata]",
        )
    })?;

    let id_field = id
        .ident
        .clone()
        .ok_or_else(|| Error::new_spanned(id, "Field must have a name"))?;
    if stored_name(&id_field, &id.attrs) != "_id" {
        return Err(Error::new_spanned(
            id,
            "identifier field must be stored as `_id`: add #[serde(rename = \"_id\")] or use #[document]",
        ));
    }

    let metadata_field = metadata
        .ident
        .clone()
        .ok_or_else(|| Error::new_spanned(metadata, "Field must have a name"))?;
    let metadata_key = if serde_flag(&metadata.attrs, "flatten") {
        None
    } else {
        Some(stored_name(&metadata_field, &metadata.attrs))
    };

    Ok(FieldInfo {
        id_field,
        metadata_field,
        metadata_key,
    })
}

pub fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Key a field serializes under: its `#[serde(rename = "...")]` or its name
pub fn stored_name(ident: &Ident, attrs: &[Attribute]) -> String {
    serde_rename(attrs).unwrap_or_else(|| {
        let name = ident.to_string();
        name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
    })
}

/// Value of `#[serde(rename = "...")]` if present
pub fn serde_rename(attrs: &[Attribute]) -> Option<String> {
    let mut rename = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                let lit: LitStr = meta.value()?.parse()?;
                rename = Some(lit.value());
            } else {
                skip_meta_value(&meta)?;
            }
            Ok(())
        });
    }
    rename
}

/// Whether a bare `#[serde(<flag>)]` is present
pub fn serde_flag(attrs: &[Attribute], flag: &str) -> bool {
    let mut found = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(flag) {
                found = true;
            }
            skip_meta_value(&meta)
        });
    }
    found
}

fn skip_meta_value(meta: &syn::meta::ParseNestedMeta) -> Result<()> {
    if meta.input.peek(Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_meta_value(&inner))?;
    }
    Ok(())
}

fn last_segment_is(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident == name)
            .unwrap_or(false),
        _ => false,
    }
}

pub fn is_metadata_type(ty: &Type) -> bool {
    last_segment_is(ty, METADATA_TYPE)
}

pub fn is_option_type(ty: &Type) -> bool {
    last_segment_is(ty, "Option")
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{parse_quote, DeriveInput};

    fn fields_of(input: DeriveInput) -> Result<FieldInfo> {
        parse_field_attributes(&input.data)
    }

    #[test]
    fn test_valid_collection_names() {
        for name in ["items", "user_profiles", "orders.archive"] {
            assert!(validate_collection_name(name).is_ok(), "{} should be valid", name);
        }
    }

    #[test]
    fn test_invalid_collection_names() {
        let long = "a".repeat(MAX_COLLECTION_LENGTH + 1);
        for name in ["", "items$", "system.users", long.as_str()] {
            assert!(validate_collection_name(name).is_err(), "{} should be invalid", name);
        }
    }

    #[test]
    fn test_explicit_markers() {
        let input: DeriveInput = parse_quote! {
            struct Item {
                #[id]
                #[serde(rename = "_id")]
                key: Option<ObjectId>,
                name: String,
                #[metadata]
                stamps: SoftDeleteMetadata,
            }
        };
        let info = fields_of(input).expect("parses");
        assert_eq!(info.id_field, "key");
        assert_eq!(info.metadata_field, "stamps");
        assert_eq!(info.metadata_key.as_deref(), Some("stamps"));
    }

    #[test]
    fn test_implicit_detection() {
        let input: DeriveInput = parse_quote! {
            struct Item {
                #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
                id: Option<ObjectId>,
                #[serde(rename = "timestamps")]
                meta: store_object::SoftDeleteMetadata,
            }
        };
        let info = fields_of(input).expect("parses");
        assert_eq!(info.id_field, "id");
        assert_eq!(info.metadata_key.as_deref(), Some("timestamps"));
    }

    #[test]
    fn test_flattened_metadata_has_no_key() {
        let input: DeriveInput = parse_quote! {
            struct Item {
                #[serde(rename = "_id")]
                id: String,
                #[serde(flatten)]
                meta: SoftDeleteMetadata,
            }
        };
        let info = fields_of(input).expect("parses");
        assert!(info.metadata_key.is_none());
    }

    #[test]
    fn test_missing_metadata_is_compile_error() {
        let input: DeriveInput = parse_quote! {
            struct Item {
                #[id]
                #[serde(rename = "_id")]
                id: String,
                name: String,
            }
        };
        let err = fields_of(input).unwrap_err();
        assert!(err.to_string().contains("metadata"));
    }

    #[test]
    fn test_id_must_be_stored_as_underscore_id() {
        let input: DeriveInput = parse_quote! {
            struct Item {
                #[id]
                id: String,
                timestamps: SoftDeleteMetadata,
            }
        };
        let err = fields_of(input).unwrap_err();
        assert!(err.to_string().contains("_id"));
    }

    #[test]
    fn test_collection_attribute() {
        let input: DeriveInput = parse_quote! {
            #[soft_delete(collection = "items")]
            struct Item {}
        };
        let info = parse_document_attributes(&input.attrs).expect("parses");
        assert_eq!(info.collection.as_deref(), Some("items"));

        let input: DeriveInput = parse_quote! {
            #[soft_delete(collection = "system.items")]
            struct Item {}
        };
        assert!(parse_document_attributes(&input.attrs).is_err());
    }

    #[test]
    fn test_option_detection() {
        let ty: Type = parse_quote!(Option<ObjectId>);
        assert!(is_option_type(&ty));
        let ty: Type = parse_quote!(std::option::Option<String>);
        assert!(is_option_type(&ty));
        let ty: Type = parse_quote!(ObjectId);
        assert!(!is_option_type(&ty));
    }
}
