use super::*;
use crate::model::{Lead, Offer};
use crate::scoring::{FailureReason, ScoringFailure};

fn lead(name: &str) -> Lead {
    Lead::new(name, "CEO", "Acme", "software", "Berlin", "Building things.")
}

#[test]
fn test_empty_store() {
    let store = InMemoryStore::new();
    assert!(store.offer().expect("offer").is_none());
    assert!(store.leads().expect("leads").is_empty());
    assert!(store.results().expect("results").is_empty());
}

#[test]
fn test_offer_round_trip() {
    let store = InMemoryStore::new();
    let offer = Offer::new("Outreach", vec!["fast"], vec!["software"]);

    let stored = store.put_offer(offer.clone()).expect("put");
    assert_eq!(*stored, offer);
    assert_eq!(store.offer().expect("get").as_deref(), Some(&offer));
}

#[test]
fn test_put_leads_clears_results() {
    let store = InMemoryStore::new();
    let first = store.put_leads(vec![lead("Ava")]).expect("leads");

    store
        .put_results(vec![(
            first[0].id,
            Err(ScoringFailure {
                lead_id: first[0].id,
                reason: FailureReason::Cancelled,
                partial_attempts: Vec::new(),
            }),
        )])
        .expect("results");
    assert_eq!(store.results().expect("results").len(), 1);

    store
        .put_leads(vec![lead("Ben"), lead("Cy")])
        .expect("leads");
    assert_eq!(store.leads().expect("leads").len(), 2);
    assert!(store.results().expect("results").is_empty());
}

#[test]
fn test_snapshots_are_stable() {
    let store = InMemoryStore::new();
    store.put_leads(vec![lead("Ava")]).expect("leads");
    let snapshot = store.leads().expect("leads");

    store.put_leads(Vec::new()).expect("leads");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "Ava");
}
