use crate::selector::{Selector, SelectorFilter};
use bson::{doc, Bson};
use serde::Serialize;

// ========================================
// SelectorFilter rendering
// ========================================

#[test]
fn test_condition_renders_operator_document() {
    let filter = SelectorFilter::gt("qty", 5);
    assert_eq!(filter.to_document(), doc! { "qty": { "$gt": 5 } });

    let filter = SelectorFilter::exists("timestamps.deleted_at", false);
    assert_eq!(
        filter.to_document(),
        doc! { "timestamps.deleted_at": { "$exists": false } }
    );
}

#[test]
fn test_is_null_uses_eq_null() {
    let filter = SelectorFilter::is_null("timestamps.deleted_at");
    assert_eq!(
        filter.to_document(),
        doc! { "timestamps.deleted_at": { "$eq": Bson::Null } }
    );
}

#[test]
fn test_in_values() {
    let filter = SelectorFilter::in_values("status", vec!["a".into(), "b".into()]);
    assert_eq!(filter.to_document(), doc! { "status": { "$in": ["a", "b"] } });
}

#[test]
fn test_groups_render_logical_operators() {
    let filter = SelectorFilter::or(vec![
        SelectorFilter::eq("name", "a"),
        SelectorFilter::eq("name", "b"),
    ]);
    assert_eq!(
        filter.to_document(),
        doc! { "$or": [ { "name": { "$eq": "a" } }, { "name": { "$eq": "b" } } ] }
    );
}

#[test]
fn test_single_member_group_collapses() {
    let filter = SelectorFilter::and(vec![SelectorFilter::eq("name", "a")]);
    assert_eq!(filter.to_document(), doc! { "name": { "$eq": "a" } });
}

#[test]
fn test_empty_groups_match_everything() {
    assert!(SelectorFilter::and(vec![]).to_document().is_empty());
    assert!(SelectorFilter::or(vec![]).to_document().is_empty());

    // An OR with a match-all member matches everything
    let filter = SelectorFilter::or(vec![
        SelectorFilter::and(vec![]),
        SelectorFilter::eq("name", "a"),
    ]);
    assert!(filter.to_document().is_empty());
}

// ========================================
// Selector composition
// ========================================

#[test]
fn test_empty_selector_renders_empty_document() {
    assert!(Selector::all().is_empty());
    assert!(Selector::all().to_document().is_empty());
    assert!(Selector::from_document(doc! {}).is_empty());
}

#[test]
fn test_single_clause_is_passed_through() {
    let selector = Selector::from(doc! { "name": "a" });
    assert_eq!(selector.to_document(), doc! { "name": "a" });
}

#[test]
fn test_clauses_are_anded() {
    let selector = Selector::from(doc! { "name": "a" }).filter(SelectorFilter::lt("qty", 3));
    assert_eq!(
        selector.to_document(),
        doc! { "$and": [ { "name": "a" }, { "qty": { "$lt": 3 } } ] }
    );
}

#[test]
fn test_live_appends_null_predicate_without_mutating_original() {
    let selector = Selector::from(doc! { "name": "a" });
    let live = selector.live("timestamps.deleted_at");

    assert_eq!(selector.to_document(), doc! { "name": "a" });
    assert_eq!(
        live.to_document(),
        doc! { "$and": [
            { "name": "a" },
            { "timestamps.deleted_at": { "$eq": Bson::Null } }
        ] }
    );
}

#[test]
fn test_live_on_match_all_selector() {
    let live = Selector::all().live("deleted_at");
    assert_eq!(live.to_document(), doc! { "deleted_at": { "$eq": Bson::Null } });
}

#[test]
fn test_by_id() {
    let oid = bson::oid::ObjectId::new();
    assert_eq!(Selector::by_id(oid).to_document(), doc! { "_id": oid });
}

#[derive(Serialize)]
struct Example {
    name: Option<String>,
    qty: Option<i32>,
    nested: Nested,
}

#[derive(Serialize)]
struct Nested {
    label: Option<String>,
}

#[test]
fn test_from_example_drops_unset_fields() {
    let example = Example {
        name: Some("a".to_string()),
        qty: None,
        nested: Nested { label: None },
    };
    let selector = Selector::from_example(&example).expect("serializes");
    assert_eq!(selector.to_document(), doc! { "name": "a" });
}

#[test]
fn test_from_example_keeps_set_nested_fields() {
    let example = Example {
        name: None,
        qty: Some(2),
        nested: Nested {
            label: Some("x".to_string()),
        },
    };
    let selector = Selector::from_example(&example).expect("serializes");
    assert_eq!(
        selector.to_document(),
        doc! { "qty": 2, "nested": { "label": "x" } }
    );
}
