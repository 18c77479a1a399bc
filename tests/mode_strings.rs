//! Mode string encoding against the exact letters servers send.

use slirc_state::modes::{
    CHANNEL_MODES, ChannelFlag, ChannelModes, ChannelPrivileges, ModeSet, NICK_MODES, NO_MODES_SET,
    NickModes, PRIVILEGE_MODES, parse_channel_changes, split_prefixed,
};

#[test]
fn test_mode_letters_match_irc_conventions() {
    let channel: String = CHANNEL_MODES.entries().iter().map(|&(_, c)| c).collect();
    assert_eq!(channel, "pstnmiOzkl");
    let nick: String = NICK_MODES.entries().iter().map(|&(_, c)| c).collect();
    assert_eq!(nick, "iowxz");
    let privs: String = PRIVILEGE_MODES.entries().iter().map(|&(_, c)| c).collect();
    assert_eq!(privs, "qaohv");
}

#[test]
fn test_zero_records_use_sentinel() {
    assert_eq!(ChannelModes::default().to_mode_string(), NO_MODES_SET);
    assert_eq!(NickModes::default().to_mode_string(), NO_MODES_SET);
    assert_eq!(ChannelPrivileges::default().to_mode_string(), NO_MODES_SET);
}

#[test]
fn test_key_precedes_limit() {
    let modes = ChannelModes {
        invite_only: true,
        key: "secret".into(),
        limit: 10,
        ..Default::default()
    };
    assert_eq!(modes.to_mode_string(), "+ikl secret 10");
}

#[test]
fn test_letters_decode_and_reencode() {
    for letters in ["+pn", "+stm", "+iO", "+z"] {
        let mut modes = ChannelModes::default();
        for c in letters.chars().skip(1) {
            assert!(modes.set_char(c, true), "unknown letter {c}");
        }
        let encoded = modes.to_mode_string();
        let mut again = ChannelModes::default();
        for c in encoded.chars().skip(1) {
            again.set_char(c, true);
        }
        assert_eq!(modes, again);
    }
}

#[test]
fn test_names_prefixes_round_trip_through_symbols() {
    let (privs, nick) = split_prefixed("@+alice");
    assert_eq!(nick, "alice");
    assert_eq!(privs.to_mode_string(), "+ov");
    assert_eq!(privs.prefix_char(), Some('@'));
    assert_eq!(privs.all_prefix_chars(), "@+");
}

#[test]
fn test_changes_feed_mode_records() {
    let changes = parse_channel_changes("+mi-m+k", &["hunter2"]).unwrap();
    let mut modes = ChannelModes::default();
    for change in changes {
        match change {
            slirc_state::modes::ChannelChange::Flag { flag, on } => modes.set(flag, on),
            slirc_state::modes::ChannelChange::Key(Some(k)) => modes.set_key(k),
            other => panic!("unexpected change {other:?}"),
        }
    }
    assert!(modes.is_set(ChannelFlag::InviteOnly));
    assert!(!modes.is_set(ChannelFlag::Moderated));
    assert_eq!(modes.to_string(), "+ik hunter2");
}
