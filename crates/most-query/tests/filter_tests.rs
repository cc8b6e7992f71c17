//! Integration tests for filter building and parameter projection.
//!
//! These tests drive the public API the way a data service client does.

use chrono::NaiveDate;
use most_query::{ClientDataQueryable, Field, QueryParams, QueryValue};
use serde_json::json;

fn people() -> ClientDataQueryable {
    ClientDataQueryable::new("Person")
}

// =============================================================================
// Grouping
// =============================================================================

#[test]
fn test_flat_and_chain() {
    let q = people().where_("a").eq(1).and("b").eq(2).and("c").eq(3);
    assert_eq!(q.to_filter().unwrap(), "a eq 1 and b eq 2 and c eq 3");
}

#[test]
fn test_switch_to_or_groups_prior_clauses() {
    let q = people().where_("a").eq(1).and("b").eq(2).or("c").eq(3);
    assert_eq!(q.to_filter().unwrap(), "(a eq 1 and b eq 2) or c eq 3");
}

#[test]
fn test_grouped_or_inside_prepared_and() {
    // (status is active or pending) and created in 2015
    let q = people()
        .where_("status")
        .eq("active")
        .or("status")
        .eq("pending")
        .prepare()
        .where_("dateCreated")
        .year()
        .eq(2015);
    assert_eq!(
        q.to_filter().unwrap(),
        "(status eq 'active' or status eq 'pending') and (year(dateCreated) eq 2015)"
    );
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_text_literal_escaping_in_clause() {
    let q = people().where_("note").eq("say \"hi\"\tit's\nfine");
    assert_eq!(
        q.to_filter().unwrap(),
        r#"note eq 'say \"hi\"\tit\'s\nfine'"#
    );
}

#[test]
fn test_date_literal_in_clause() {
    let date = NaiveDate::from_ymd_opt(2015, 7, 29)
        .unwrap()
        .and_hms_milli_opt(14, 5, 9, 42)
        .unwrap();
    let q = people().where_("dateModified").lt(date);
    assert_eq!(
        q.to_filter().unwrap(),
        "dateModified lt '2015-07-29 14:05:09.042'"
    );
}

#[test]
fn test_field_to_field_comparison() {
    let q = people()
        .where_("dateModified")
        .gt(Field::new("dateCreated").unwrap());
    assert_eq!(q.to_filter().unwrap(), "dateModified gt dateCreated");
}

#[test]
fn test_json_value_operands() {
    let ids = json!([10, 20]);
    let q = people().where_("id").eq(QueryValue::from(ids));
    assert_eq!(q.to_filter().unwrap(), "(id eq 10 or id eq 20)");
}

// =============================================================================
// Parameter projection
// =============================================================================

#[test]
fn test_params_only_populated_fields() {
    let params = people().where_("a").eq(1).params();
    assert_eq!(
        serde_json::to_value(&params).unwrap(),
        json!({ "$filter": "a eq 1" })
    );
    assert_eq!(params.model, "Person");
}

#[test]
fn test_params_full() {
    let params = people()
        .where_("age")
        .ge(21)
        .select(["id", "name"])
        .group(["department"])
        .expand(["address"])
        .order_by("name")
        .then_by_descending("age")
        .take(10)
        .skip(20)
        .paged(true)
        .as_array(false)
        .params();

    assert_eq!(
        serde_json::to_value(&params).unwrap(),
        json!({
            "$filter": "age ge 21",
            "$select": "id,name",
            "$groupby": "department",
            "$orderby": "name,age desc",
            "$expand": "address",
            "$top": 10,
            "$skip": 20,
            "$inlinecount": true
        })
    );
    assert_eq!(params.array, Some(false));
}

#[test]
fn test_params_do_not_mutate_query() {
    let q = people().where_("a").eq(1).prepare().where_("b").eq(2);
    let before = q.clone();
    let _ = q.params();
    let _ = q.to_filter();
    assert_eq!(q, before);
}

#[test]
fn test_params_pairs_for_query_string() {
    let pairs = people().all().first().params().to_pairs();
    assert_eq!(
        pairs,
        vec![("$top", "1".to_string()), ("$skip", "0".to_string())]
    );
}

#[test]
fn test_take_all_renders_minus_one() {
    let params: QueryParams = people().all().params();
    assert_eq!(params.to_pairs(), vec![("$top", "-1".to_string())]);
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn test_copy_snapshot_is_independent() {
    let original = people()
        .where_("a")
        .eq(1)
        .prepare()
        .where_("b")
        .eq(2)
        .select(["id"]);
    let snapshot = original.copy();
    let mutated = snapshot.clone().select(["name"]).where_("c").eq(3);

    assert_eq!(original.params().select.as_deref(), Some("id"));
    assert_eq!(snapshot.params().select.as_deref(), Some("id"));
    assert_eq!(mutated.params().select.as_deref(), Some("name"));
    assert_eq!(snapshot.to_filter().unwrap(), "(a eq 1) and (b eq 2)");
    assert_eq!(original.to_filter(), snapshot.to_filter());
}
