// Integration tests for DocumentQueryService::load
// Covers root inclusion, omit semantics, declaration order and fail-fast

use certiq_core::types::{RequestContext, RequestId};
use certiq_core::{
    Criteria, Criterion, Document, DocumentEvent, DocumentReference, QueryConfig, QueryError,
};
use certiq_engine::{MatchedCriterion, StoreQueryService, VisitedNode};
use certiq_store::MemoryObjectStore;

const PREFIX: &str = "documents";

fn key(id: &str) -> String {
    format!("{}/{}", PREFIX, id)
}

fn config() -> QueryConfig {
    let mut config = QueryConfig::default().with_key_prefix(PREFIX);
    config.cache.enabled = false;
    config
}

fn store_with(documents: &[Document]) -> MemoryObjectStore {
    let store = MemoryObjectStore::new();
    for document in documents {
        store.insert_document(key(&document.id), document).unwrap();
    }
    store
}

fn service(documents: &[Document]) -> StoreQueryService {
    StoreQueryService::open(store_with(documents), &config()).unwrap()
}

fn related(name: &str, target: &str, category: &str, document_type: &str) -> DocumentEvent {
    DocumentEvent::named(name).with_related(
        DocumentReference::new(target)
            .with_category(category)
            .with_type(document_type),
    )
}

fn ids(nodes: &[VisitedNode]) -> Vec<String> {
    nodes.iter().map(|n| n.document.id.clone()).collect()
}

async fn load_ids(service: &StoreQueryService, root: &str, criteria: &Criteria) -> Vec<String> {
    let result = service
        .load(&key(root), criteria, &RequestContext::new())
        .await
        .unwrap();
    ids(result.nodes())
}

#[tokio::test]
async fn test_empty_criteria_visits_root_only() {
    let service = service(&[Document::new("R")
        .with_parent("P")
        .with_event(related("e", "X", "A", "T"))]);

    let visited = load_ids(&service, "R", &Criteria::new()).await;

    assert_eq!(visited, vec!["R"]);
}

#[tokio::test]
async fn test_single_related_match() {
    let service = service(&[
        Document::new("R").with_event(related("e", "X", "A", "T")),
        Document::new("X"),
    ]);
    let criteria = Criteria::new().with_related(Criterion::new().with_category("A"));

    let visited = load_ids(&service, "R", &criteria).await;

    assert_eq!(visited, vec!["R", "X"]);
}

#[tokio::test]
async fn test_omitted_entry_still_routes_to_nested_matches() {
    let service = service(&[
        Document::new("R").with_event(related("e", "X", "A", "T")),
        Document::new("X").with_event(related("f", "Y", "C", "B")),
        Document::new("Y"),
    ]);

    let omit_only = Criteria::new().with_related(Criterion::new().with_category("A").omit());
    assert_eq!(load_ids(&service, "R", &omit_only).await, vec!["R"]);

    let routed = Criteria::new().with_related(
        Criterion::new()
            .with_category("A")
            .omit()
            .with_related(Criterion::new().with_type("B")),
    );
    assert_eq!(load_ids(&service, "R", &routed).await, vec!["R", "Y"]);
}

#[tokio::test]
async fn test_missing_related_document_fails_naming_key() {
    let service = service(&[Document::new("R").with_event(related("e", "GONE", "A", "T"))]);
    let criteria = Criteria::new().with_related(Criterion::new().with_category("A"));

    let err = service
        .load(&key("R"), &criteria, &RequestContext::new())
        .await
        .unwrap_err();

    match &err {
        QueryError::ConnectionResolution { key: k, from, via, source } => {
            assert_eq!(k, &key("GONE"));
            assert_eq!(from, &key("R"));
            assert_eq!(via, "relatedDocument");
            assert_eq!(**source, QueryError::NotFound { key: key("GONE") });
        }
        other => panic!("expected ConnectionResolution, got {:?}", other),
    }
    assert!(err.to_string().contains("documents/GONE"));
}

#[tokio::test]
async fn test_entries_visited_in_declaration_order() {
    let service = service(&[
        Document::new("R")
            .with_event(related("first", "B1", "B", "T"))
            .with_event(related("second", "A1", "A", "T")),
        Document::new("A1"),
        Document::new("B1"),
    ]);
    let criteria = Criteria::new()
        .with_related(Criterion::new().with_category("A"))
        .with_related(Criterion::new().with_category("B"));

    let visited = load_ids(&service, "R", &criteria).await;

    assert_eq!(visited, vec!["R", "A1", "B1"]);
}

#[tokio::test]
async fn test_missing_root_is_not_wrapped() {
    let service = service(&[]);

    let err = service
        .load(&key("R"), &Criteria::new(), &RequestContext::new())
        .await
        .unwrap_err();

    assert_eq!(err, QueryError::NotFound { key: key("R") });
}

#[tokio::test]
async fn test_invalid_nested_document_aborts_query() {
    let store = store_with(&[
        Document::new("R").with_event(related("e", "X", "A", "T")),
        Document::new("X").with_event(related("f", "BAD", "A", "T")),
    ]);
    store.insert(key("BAD"), br#"{"id":"BAD"}"#.to_vec());
    let service = StoreQueryService::open(store, &config()).unwrap();

    let criteria = Criteria::new()
        .with_related(Criterion::new().with_related(Criterion::new()));
    let err = service
        .load(&key("R"), &criteria, &RequestContext::new())
        .await
        .unwrap_err();

    match &err {
        QueryError::ConnectionResolution { key: k, from, source, .. } => {
            assert_eq!(k, &key("BAD"));
            assert_eq!(from, &key("X"));
            assert!(matches!(**source, QueryError::InvalidDocument { .. }));
        }
        other => panic!("expected ConnectionResolution, got {:?}", other),
    }
}

#[tokio::test]
async fn test_parent_before_related_depth_first() {
    let service = service(&[
        Document::new("R")
            .with_parent("P")
            .with_event(related("e", "X", "A", "T")),
        Document::new("P").with_event(related("p", "PX", "A", "T")),
        Document::new("PX"),
        Document::new("X"),
    ]);
    let criteria = Criteria::new()
        .with_related(Criterion::new().with_category("A"))
        .with_parent(Criteria::new().with_related(Criterion::new()));

    let visited = load_ids(&service, "R", &criteria).await;

    assert_eq!(visited, vec!["R", "P", "PX", "X"]);
}

#[tokio::test]
async fn test_no_matches_contributes_nothing() {
    let service = service(&[Document::new("R").with_event(related("e", "X", "A", "T"))]);
    let criteria = Criteria::new()
        .with_parent(Criteria::new())
        .with_related(Criterion::new().with_category("Z"));

    assert_eq!(load_ids(&service, "R", &criteria).await, vec!["R"]);
}

#[tokio::test]
async fn test_root_emitted_exactly_once() {
    let service = service(&[
        Document::new("R").with_event(related("e", "X", "A", "T")),
        Document::new("X").with_event(related("back", "R", "A", "T")),
    ]);
    let criteria = Criteria::new().with_related(Criterion::new());

    let visited = load_ids(&service, "R", &criteria).await;

    assert_eq!(visited.iter().filter(|id| *id == "R").count(), 1);
}

#[tokio::test]
async fn test_nodes_record_depth_and_matched_criterion() {
    let service = service(&[
        Document::new("R").with_parent("P"),
        Document::new("P").with_event(related("e", "X", "A", "Audit")),
        Document::new("X"),
    ]);
    let criteria = Criteria::new()
        .with_parent(Criteria::new().with_related(Criterion::new().with_type("Audit")));

    let result = service
        .load(&key("R"), &criteria, &RequestContext::new())
        .await
        .unwrap();
    let nodes = result.nodes();

    assert_eq!(nodes[0].matched_criterion, MatchedCriterion::Root);
    assert_eq!(nodes[1].matched_criterion, MatchedCriterion::ParentDocument);
    assert_eq!(nodes[1].depth, 1);
    assert_eq!(nodes[2].key, key("X"));
    assert_eq!(nodes[2].depth, 2);
    assert!(matches!(
        &nodes[2].matched_criterion,
        MatchedCriterion::RelatedDocument(spec) if spec.document_type.as_deref() == Some("Audit")
    ));
}

#[tokio::test]
async fn test_each_and_map_agree_on_order() {
    let service = service(&[
        Document::new("R")
            .with_parent("P")
            .with_event(related("1", "X", "A", "T"))
            .with_event(related("2", "Y", "A", "T")),
        Document::new("P"),
        Document::new("X"),
        Document::new("Y"),
    ]);
    let criteria = Criteria::new()
        .with_parent(Criteria::new())
        .with_related(Criterion::new());

    let result = service
        .load(&key("R"), &criteria, &RequestContext::new())
        .await
        .unwrap();

    let mapped = result.iterator().map(|n| n.key.clone());

    let mut visited = Vec::new();
    result
        .iterator()
        .each(|n| {
            visited.push(n.key.clone());
            async {}
        })
        .await;

    assert_eq!(visited, mapped);
    assert_eq!(mapped, vec![key("R"), key("P"), key("X"), key("Y")]);
}

#[tokio::test]
async fn test_each_awaits_async_visitors_in_order() {
    let service = service(&[
        Document::new("R")
            .with_event(related("1", "X", "A", "T"))
            .with_event(related("2", "Y", "A", "T")),
        Document::new("X"),
        Document::new("Y"),
    ]);
    let criteria = Criteria::new().with_related(Criterion::new());
    let result = service
        .load(&key("R"), &criteria, &RequestContext::new())
        .await
        .unwrap();

    let seen = std::sync::Mutex::new(Vec::new());
    result
        .iterator()
        .each(|n| {
            let seen = &seen;
            async move {
                // later nodes sleep less; order must still follow traversal
                let delay = 30 - 10 * n.depth as u64;
                tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
                seen.lock().unwrap().push(n.document.id.clone());
            }
        })
        .await;

    assert_eq!(seen.into_inner().unwrap(), vec!["R", "X", "Y"]);
}

#[tokio::test]
async fn test_try_each_stops_at_first_error() {
    let service = service(&[
        Document::new("R")
            .with_event(related("1", "X", "A", "T"))
            .with_event(related("2", "Y", "A", "T")),
        Document::new("X"),
        Document::new("Y"),
    ]);
    let criteria = Criteria::new().with_related(Criterion::new());
    let result = service
        .load(&key("R"), &criteria, &RequestContext::new())
        .await
        .unwrap();

    let mut seen = Vec::new();
    let outcome = result
        .iterator()
        .try_each(|n| {
            seen.push(n.document.id.clone());
            let stop = n.document.id == "X";
            async move {
                if stop {
                    Err("rule not evaluable")
                } else {
                    Ok(())
                }
            }
        })
        .await;

    assert_eq!(outcome, Err("rule not evaluable"));
    assert_eq!(seen, vec!["R", "X"]);
}

#[tokio::test]
async fn test_result_carries_request_id() {
    let service = service(&[Document::new("R")]);
    let request_id = RequestId::from_string("req-fixed".to_string());
    let context = RequestContext::with_request_id(request_id.clone());

    let result = service.load(&key("R"), &Criteria::new(), &context).await.unwrap();

    assert_eq!(result.request_id(), &request_id);
    assert_eq!(result.root_key(), key("R"));
    assert_eq!(result.len(), 1);
}

#[tokio::test]
async fn test_criteria_from_json() {
    let service = service(&[
        Document::new("R").with_event(related("e", "X", "A", "T")),
        Document::new("X").with_event(related("f", "Y", "C", "B")),
        Document::new("Y"),
    ]);
    let criteria: Criteria = serde_json::from_str(
        r#"{"relatedDocuments":[{"category":"A","omit":true,"relatedDocuments":[{"type":"B"}]}]}"#,
    )
    .unwrap();

    assert_eq!(load_ids(&service, "R", &criteria).await, vec!["R", "Y"]);
}

#[tokio::test]
async fn test_open_rejects_invalid_config() {
    let bad = config().with_fan_out(0);

    let err = StoreQueryService::open(MemoryObjectStore::new(), &bad).err().unwrap();

    assert!(matches!(err, QueryError::Config { .. }));
}

#[tokio::test]
async fn test_key_for_uses_prefix() {
    let service = service(&[]);
    assert_eq!(service.key_for("abc"), "documents/abc");
}
