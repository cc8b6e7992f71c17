//! Integration tests for the data service client.
//!
//! These tests verify the requests handed to the transport and the decoding
//! of their payloads.

use std::cell::RefCell;

use most_client::{
    ClientConfig, ClientDataService, ClientError, DataTransport, ReadRequest, TransportError,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Mock transport that records requests and replays a canned payload.
struct MockTransport {
    response: Value,
    requests: RefCell<Vec<ReadRequest>>,
}

impl MockTransport {
    fn new(response: Value) -> Self {
        MockTransport {
            response,
            requests: RefCell::new(Vec::new()),
        }
    }

    fn last_request(&self) -> ReadRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request recorded")
    }

    fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl DataTransport for MockTransport {
    fn fetch(&self, request: &ReadRequest) -> Result<Value, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self.response.clone())
    }
}

/// Transport that always fails.
struct FailingTransport;

impl DataTransport for FailingTransport {
    fn fetch(&self, _request: &ReadRequest) -> Result<Value, TransportError> {
        Err("503 Service Unavailable".into())
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct Person {
    id: u32,
    name: String,
}

fn config() -> ClientConfig {
    ClientConfig::builder()
        .with_base_url("https://example.com/api/")
        .build()
}

fn people_payload() -> Value {
    json!([
        { "id": 1, "name": "John" },
        { "id": 2, "name": "Jane" }
    ])
}

// =============================================================================
// Requests
// =============================================================================

#[test]
fn test_get_items_sends_projected_params() {
    let transport = MockTransport::new(people_payload());
    let service = ClientDataService::new(config(), &transport);
    let people = service.model("Person");

    let query = people
        .where_("name")
        .starts_with("J")
        .equal(true)
        .select(["id", "name"])
        .order_by("name");
    let payload = people.get_items(&query).unwrap();

    assert_eq!(payload, people_payload());
    let request = transport.last_request();
    assert_eq!(request.base_url, "https://example.com/api/");
    assert_eq!(request.model, "Person");
    assert_eq!(
        request.query_pairs(),
        vec![
            ("$filter", "startswith(name,'J') eq true".to_string()),
            ("$select", "id,name".to_string()),
            ("$orderby", "name".to_string()),
        ]
    );
}

#[test]
fn test_one_request_per_call() {
    let transport = MockTransport::new(people_payload());
    let service = ClientDataService::new(config(), &transport);
    let people = service.model("Person");
    let query = people.as_queryable();

    people.get_items(&query).unwrap();
    people.get_list(&query).unwrap();
    assert_eq!(transport.request_count(), 2);
}

#[test]
fn test_get_item_requests_first_match() {
    let transport = MockTransport::new(json!([{ "id": 1, "name": "John" }]));
    let service = ClientDataService::new(config(), &transport);
    let people = service.model("Person");

    let query = people.where_("id").eq(1).take(50).skip(10);
    let person: Option<Person> = people.get_item_as(&query).unwrap();

    assert_eq!(
        person,
        Some(Person {
            id: 1,
            name: "John".to_string()
        })
    );
    let request = transport.last_request();
    assert_eq!(request.params.top, Some(1));
    assert_eq!(request.params.skip, Some(0));
    assert_eq!(request.params.array, Some(true));
}

#[test]
fn test_caller_query_is_not_mutated() {
    let transport = MockTransport::new(json!([]));
    let service = ClientDataService::new(config(), &transport);
    let people = service.model("Person");

    let query = people.where_("id").gt(10).take(5);
    let before = query.clone();
    people.get_item(&query).unwrap();
    people.get_list(&query).unwrap();

    assert_eq!(query, before);
}

#[test]
fn test_prepared_filter_is_merged() {
    let transport = MockTransport::new(json!([]));
    let service = ClientDataService::new(config(), &transport);
    let people = service.model("Person");

    let query = people
        .where_("active")
        .eq(true)
        .prepare()
        .where_("age")
        .ge(18)
        .or("guardian")
        .ne(None::<u32>);
    people.get_items(&query).unwrap();

    assert_eq!(
        transport.last_request().params.filter.as_deref(),
        Some("(active eq true) and (age ge 18 or guardian ne null)")
    );
}

#[test]
fn test_query_is_retargeted_to_model() {
    let transport = MockTransport::new(json!([]));
    let service = ClientDataService::new(config(), &transport);

    let query = service.model("Order").where_("id").eq(1);
    service.model("Person").get_items(&query).unwrap();

    assert_eq!(transport.last_request().model, "Person");
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_default_page_size_applies_when_top_unset() {
    let transport = MockTransport::new(json!([]));
    let config = ClientConfig::builder().with_default_page_size(25).build();
    let service = ClientDataService::new(config, &transport);
    let people = service.model("Person");

    people.get_items(&people.as_queryable()).unwrap();
    assert_eq!(transport.last_request().params.top, Some(25));

    people.get_items(&people.as_queryable().all()).unwrap();
    assert_eq!(transport.last_request().params.top, Some(-1));
}

#[test]
fn test_service_exposes_config_and_transport() {
    let transport = MockTransport::new(json!([]));
    let config = ClientConfig::builder()
        .with_base_url("https://example.com/api/")
        .with_default_page_size(10)
        .build();
    let service = ClientDataService::new(config.clone(), &transport);

    assert_eq!(service.config(), &config);
    assert_eq!(service.transport().request_count(), 0);

    let people = service.model("Person");
    people.get_items(&people.as_queryable()).unwrap();
    assert_eq!(service.transport().request_count(), 1);
    assert_eq!(
        service.transport().last_request().base_url,
        service.config().base_url
    );
}

#[test]
fn test_no_default_page_size_leaves_top_absent() {
    let transport = MockTransport::new(json!([]));
    let service = ClientDataService::new(config(), &transport);
    let people = service.model("Person");

    people.get_items(&people.as_queryable()).unwrap();
    assert!(transport.last_request().query_pairs().is_empty());
}

// =============================================================================
// Paged reads
// =============================================================================

#[test]
fn test_get_list_as_decodes_page() {
    let transport = MockTransport::new(json!({
        "total": 12,
        "skip": 0,
        "value": [{ "id": 1, "name": "John" }, { "id": 2, "name": "Jane" }]
    }));
    let service = ClientDataService::new(config(), &transport);
    let people = service.model("Person");

    let page = people
        .get_list_as::<Person>(&people.as_queryable().take(2))
        .unwrap();

    assert_eq!(page.total, 12);
    assert_eq!(page.len(), 2);
    assert!(page.has_more());
    assert_eq!(transport.last_request().params.inline_count, Some(true));
}

#[test]
fn test_get_items_as_decodes_list() {
    let transport = MockTransport::new(people_payload());
    let service = ClientDataService::new(config(), &transport);
    let people = service.model("Person");

    let items: Vec<Person> = people.get_items_as(&people.as_queryable()).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].name, "Jane");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_transport_failure_is_opaque() {
    let service = ClientDataService::new(config(), FailingTransport);
    let people = service.model("Person");

    let err = people.get_items(&people.as_queryable()).unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.to_string(), "Transport error: 503 Service Unavailable");
}

#[test]
fn test_missing_model_is_rejected() {
    let transport = MockTransport::new(json!([]));
    let service = ClientDataService::new(config(), &transport);

    let query = most_client::most_query::ClientDataQueryable::new("  ");
    let err = service.execute(&query).unwrap_err();

    assert!(matches!(err, ClientError::MissingModel));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_unexpected_payload_shape_is_decode_error() {
    let transport = MockTransport::new(json!({ "unexpected": true }));
    let service = ClientDataService::new(config(), &transport);
    let people = service.model("Person");

    let err = people
        .get_items_as::<Person>(&people.as_queryable())
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}
