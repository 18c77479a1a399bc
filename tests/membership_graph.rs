//! Integration tests for the membership graph: cascades, renames and the
//! local identity's exemption.

mod common;

use common::TestNetwork;
use slirc_state::{Anomaly, Casemapping, Config};

#[test]
fn test_self_leave_cascade() {
    let mut net = TestNetwork::new("me");
    net.join("me", "#c").unwrap();
    net.join("me", "#other").unwrap();
    net.join("a", "#c").unwrap();
    net.join("b", "#c").unwrap();
    net.join("b", "#other").unwrap();

    net.part("me", "#c").unwrap();

    let t = &net.tracker;
    assert_eq!(t.find_channel("#c"), None);
    // a had no other channels
    assert_eq!(t.find_nick("a"), None);
    let b = t.nick_by_name("b").unwrap();
    assert_eq!(b.channel_count(), 1);
    assert!(t.channels_of(b.id()).all(|(c, _, _)| c.name() == "#other"));
    assert!(net.anomalies().is_empty());
    net.assert_consistent();
}

#[test]
fn test_local_identity_survives_everything() {
    let mut net = TestNetwork::new("me");
    net.join("me", "#a").unwrap();
    net.join("me", "#b").unwrap();
    net.part("me", "#a").unwrap();
    net.part("me", "#b").unwrap();
    net.quit("me").unwrap();

    let me = net.tracker.me();
    assert_eq!(net.tracker.find_nick("me"), Some(me));
    assert_eq!(net.tracker.channel_count(), 0);
    assert_eq!(
        net.tracker.delete_nick(me),
        Err(Anomaly::LocalIdentityExempt("me".into()))
    );
    assert_eq!(net.anomalies().len(), 1);
    net.assert_consistent();
}

#[test]
fn test_rename_keeps_memberships_and_privileges() {
    let mut net = TestNetwork::new("me");
    net.join("me", "#rust").unwrap();
    net.join("alice", "#rust").unwrap();
    net.join("me", "#go").unwrap();
    net.join("alice", "#go").unwrap();
    net.mode("#rust", "+o", &["alice"]).unwrap();

    let before = net.tracker.find_nick("alice").unwrap();
    let rust = net.tracker.find_channel("#rust").unwrap();
    let p = net.tracker.membership(before, rust).unwrap();

    net.rename("alice", "alicia").unwrap();

    let t = &net.tracker;
    assert_eq!(t.find_nick("alicia"), Some(before));
    assert_eq!(t.find_nick("alice"), None);
    assert_eq!(t.membership(before, rust), Some(p));
    assert!(t.privileges(p).unwrap().op);
    assert_eq!(t.nick(before).unwrap().channel_count(), 2);
    net.assert_consistent();
}

#[test]
fn test_case_only_rename_under_folding() {
    let mut config = Config::for_nick("me");
    config.tracking.casemapping = Casemapping::Rfc1459;
    let mut net = TestNetwork::with_config(config);
    net.join("me", "#rust").unwrap();
    net.join("alice", "#rust").unwrap();
    let id = net.tracker.find_nick("alice").unwrap();

    net.rename("alice", "ALICE").unwrap();

    assert_eq!(net.tracker.find_nick("alice"), Some(id));
    assert_eq!(net.tracker.nick(id).unwrap().nick(), "ALICE");
    assert!(net.anomalies().is_empty());
    net.assert_consistent();
}

#[test]
fn test_duplicate_and_redundant_events_warn_once_each() {
    let mut net = TestNetwork::new("me");
    net.join("me", "#rust").unwrap();
    net.join("alice", "#rust").unwrap();
    net.join("bob", "#rust").unwrap();

    assert!(matches!(
        net.join("alice", "#rust"),
        Err(Anomaly::DuplicateAssociation { .. })
    ));
    net.part("alice", "#rust").unwrap();
    assert!(matches!(
        net.part("alice", "#rust"),
        Err(Anomaly::NoSuchNick(_))
    ));

    let codes: Vec<&str> = net.anomalies().iter().map(|a| a.code()).collect();
    assert_eq!(codes, vec!["duplicate_association", "no_such_nick"]);
    net.assert_consistent();
}

#[test]
fn test_part_unjoined_channel_is_redundant() {
    let mut net = TestNetwork::new("me");
    net.join("me", "#rust").unwrap();
    net.join("me", "#go").unwrap();
    net.join("alice", "#rust").unwrap();

    assert_eq!(
        net.part("alice", "#go"),
        Err(Anomaly::RedundantRemoval {
            nick: "alice".into(),
            channel: "#go".into()
        })
    );
    assert_eq!(net.anomalies().len(), 1);
    net.assert_consistent();
}

#[test]
fn test_rejoin_after_self_part_starts_fresh() {
    let mut net = TestNetwork::new("me");
    net.join("me", "#rust").unwrap();
    net.apply(slirc_state::Event::Topic {
        channel: "#rust".into(),
        topic: "old".into(),
    })
    .unwrap();
    let first = net.tracker.find_channel("#rust").unwrap();
    net.part("me", "#rust").unwrap();
    net.join("me", "#rust").unwrap();

    let second = net.tracker.find_channel("#rust").unwrap();
    assert_ne!(first, second);
    assert_eq!(net.tracker.channel(second).unwrap().topic, "");
    assert!(net.tracker.channel(first).is_none());
}
