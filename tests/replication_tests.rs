//! Host/observer synchronization tests over an in-memory wire.
//!
//! These tests push real encoded bytes between a host-side and a
//! client-side replication layer and check the convergence guarantees:
//! - Canonical updates reconcile as diffs (observers see only the delta)
//! - Duplicate and stale deliveries are no-ops
//! - Privileged mutations from clients travel the request path

use rustc_hash::FxHashMap;

use card_table::container::{CardContainer, ShuffleScheduler};
use card_table::core::{Card, CardCatalog, CardId, ContainerId, TableRng};
use card_table::replication::{
    decode, encode, Authority, MutationRequest, ReplicationLayer, Sequenced,
};
use card_table::LayoutKind;

const DECK: ContainerId = ContainerId(0);
const COOLDOWN: u32 = 30;

fn deck_of(ids: &[&str]) -> FxHashMap<ContainerId, CardContainer> {
    let mut deck = CardContainer::new(DECK, "deck", LayoutKind::Vertical);
    for id in ids {
        deck.add(Card::new(*id), None);
    }
    deck.drain_events();
    let mut containers = FxHashMap::default();
    containers.insert(DECK, deck);
    containers
}

/// Ship a layer's queued broadcasts to an observer as encoded bytes.
fn deliver(
    from: &mut ReplicationLayer,
    to: &mut ReplicationLayer,
    containers: &mut FxHashMap<ContainerId, CardContainer>,
    catalog: &CardCatalog,
) -> usize {
    let mut applied = 0;
    for message in from.take_broadcasts() {
        let bytes = encode(&message).unwrap();
        let decoded: Sequenced = decode(&bytes).unwrap();
        if to.apply(&decoded, containers, catalog, COOLDOWN) {
            applied += 1;
        }
    }
    applied
}

#[test]
fn test_host_shuffle_reaches_observer() {
    let ids = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];
    let mut host_containers = deck_of(&ids);
    let mut client_containers = deck_of(&ids);
    let catalog = CardCatalog::new();

    let mut host = ReplicationLayer::new(Authority::host());
    let mut client = ReplicationLayer::new(Authority::client());
    let mut rng = TableRng::new(42);

    assert!(host.apply_shuffle(DECK, &mut host_containers, &mut rng, COOLDOWN));
    assert_eq!(deliver(&mut host, &mut client, &mut client_containers, &catalog), 2);

    // Same order on both sides, lock raised on the observer.
    assert_eq!(
        client_containers[&DECK].card_ids(),
        host_containers[&DECK].card_ids()
    );
    assert!(client_containers[&DECK].is_shuffling());

    // A shuffle is a pure reorder: the observer's hook stream is silent.
    assert!(client_containers
        .get_mut(&DECK)
        .unwrap()
        .drain_events()
        .is_empty());
}

#[test]
fn test_duplicate_delivery_is_idempotent() {
    let mut host_containers = deck_of(&["A", "B", "C"]);
    let mut client_containers = deck_of(&["A", "B", "C"]);
    let catalog = CardCatalog::new();

    let mut host = ReplicationLayer::new(Authority::host());
    let mut client = ReplicationLayer::new(Authority::client());
    let mut rng = TableRng::new(7);

    host.apply_shuffle(DECK, &mut host_containers, &mut rng, COOLDOWN);
    let messages = host.take_broadcasts();

    for message in &messages {
        assert!(client.apply(message, &mut client_containers, &catalog, COOLDOWN));
    }
    client_containers.get_mut(&DECK).unwrap().drain_events();
    let order = client_containers[&DECK].card_ids();

    // Replay the identical bytes: rejected by the sequence guard, zero
    // events, order untouched.
    for message in &messages {
        let bytes = encode(message).unwrap();
        let replay: Sequenced = decode(&bytes).unwrap();
        assert!(!client.apply(&replay, &mut client_containers, &catalog, COOLDOWN));
    }
    assert_eq!(client_containers[&DECK].card_ids(), order);
    assert!(client_containers
        .get_mut(&DECK)
        .unwrap()
        .drain_events()
        .is_empty());
}

#[test]
fn test_stale_sequence_cannot_roll_back() {
    let mut client_containers = deck_of(&["A", "B", "C"]);
    let catalog = CardCatalog::new();
    let mut client = ReplicationLayer::new(Authority::client());

    let newer = Sequenced {
        seq: 2,
        update: card_table::CanonicalUpdate::ReplaceCards {
            container: DECK,
            card_ids: vec![CardId::new("C"), CardId::new("B"), CardId::new("A")],
        },
    };
    let older = Sequenced {
        seq: 1,
        update: card_table::CanonicalUpdate::ReplaceCards {
            container: DECK,
            card_ids: vec![CardId::new("A")],
        },
    };

    assert!(client.apply(&newer, &mut client_containers, &catalog, COOLDOWN));
    assert!(!client.apply(&older, &mut client_containers, &catalog, COOLDOWN));

    assert_eq!(
        client_containers[&DECK].card_ids(),
        vec![CardId::new("C"), CardId::new("B"), CardId::new("A")]
    );
}

/// A client asking for a shuffle mutates nothing locally; the only
/// observable effect is the queued request, and the permuted order lands
/// later as a canonical update.
#[test]
fn test_client_shuffle_travels_the_request_path() {
    let ids = ["A", "B", "C", "D", "E"];
    let mut host_containers = deck_of(&ids);
    let mut client_containers = deck_of(&ids);
    let catalog = CardCatalog::new();

    let mut host = ReplicationLayer::new(Authority::host());
    let mut client = ReplicationLayer::new(Authority::client());
    let mut host_rng = TableRng::new(42);
    let mut client_rng = TableRng::new(99);
    let scheduler = ShuffleScheduler::new(COOLDOWN);

    let deck = client_containers.get_mut(&DECK).unwrap();
    assert!(!scheduler.shuffle(deck, &mut client, &mut client_rng));

    // Nothing changed client-side.
    let original: Vec<CardId> = ids.iter().map(|id| CardId::new(*id)).collect();
    assert_eq!(client_containers[&DECK].card_ids(), original);
    assert!(!client_containers[&DECK].is_shuffling());
    assert!(client.take_broadcasts().is_empty());

    // The request reaches the host, which validates, applies, broadcasts.
    let requests = client.take_requests();
    assert_eq!(requests, vec![MutationRequest::Shuffle { container: DECK }]);
    for request in &requests {
        let bytes = encode(request).unwrap();
        let decoded: MutationRequest = decode(&bytes).unwrap();
        assert!(host.handle_request(&decoded, &mut host_containers, &mut host_rng, COOLDOWN));
    }

    // The canonical result converges the client.
    deliver(&mut host, &mut client, &mut client_containers, &catalog);
    assert_eq!(
        client_containers[&DECK].card_ids(),
        host_containers[&DECK].card_ids()
    );
    assert_ne!(client_containers[&DECK].card_ids(), original);
}

/// Requests arriving at a non-authoritative side are rejected outright.
#[test]
fn test_request_rejected_off_authority() {
    let mut containers = deck_of(&["A", "B"]);
    let mut client = ReplicationLayer::new(Authority::client());
    let mut rng = TableRng::new(1);

    let request = MutationRequest::Delete { container: DECK };
    assert!(!client.handle_request(&request, &mut containers, &mut rng, COOLDOWN));
    assert!(containers.contains_key(&DECK));
    assert!(client.take_broadcasts().is_empty());
}

#[test]
fn test_delete_propagates_and_is_idempotent() {
    let mut host_containers = deck_of(&["A"]);
    let mut client_containers = deck_of(&["A"]);
    let catalog = CardCatalog::new();

    let mut host = ReplicationLayer::new(Authority::host());
    let mut client = ReplicationLayer::new(Authority::client());

    assert!(host.apply_delete(DECK, &mut host_containers));
    let messages = host.take_broadcasts();
    assert_eq!(messages.len(), 1);

    assert!(client.apply(&messages[0], &mut client_containers, &catalog, COOLDOWN));
    assert!(client_containers.is_empty());

    // Double delivery: the container is already gone, nothing breaks.
    assert!(!client.apply(&messages[0], &mut client_containers, &catalog, COOLDOWN));
}
