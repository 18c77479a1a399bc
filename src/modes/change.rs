//! Mode change parsing.
//!
//! Turns a MODE line's mode string and arguments (`+ov-k alice bob key`)
//! into typed changes the tracker can apply.

use crate::error::Anomaly;

use super::channel::{CHANNEL_MODES, ChannelFlag};
use super::nick::{NICK_MODES, NickFlag};
use super::privilege::{PRIVILEGE_MODES, PrivilegeFlag};

/// List modes we don't track but whose argument must still be consumed.
const LIST_MODES: &[char] = &['b', 'e', 'I'];

/// One change to a channel or one of its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelChange {
    /// A boolean channel flag.
    Flag { flag: ChannelFlag, on: bool },
    /// `Some` sets the key, `None` clears it.
    Key(Option<String>),
    /// `Some` sets the limit, `None` clears it.
    Limit(Option<u32>),
    /// A member's privilege.
    Privilege {
        flag: PrivilegeFlag,
        on: bool,
        nick: String,
    },
}

/// One change to a nick's own modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserModeChange {
    pub flag: NickFlag,
    pub on: bool,
}

/// Whether a channel mode letter consumes an argument in this direction.
fn takes_arg(c: char, on: bool) -> bool {
    if PRIVILEGE_MODES.flag_of(c).is_some() || LIST_MODES.contains(&c) {
        return true;
    }
    match CHANNEL_MODES.flag_of(c) {
        Some(ChannelFlag::Key) | Some(ChannelFlag::Limit) => on,
        _ => false,
    }
}

/// Count the arguments the remaining letters will definitely need.
fn required_args(rest: &str, mut on: bool) -> usize {
    let mut n = 0;
    for c in rest.chars() {
        match c {
            '+' => on = true,
            '-' => on = false,
            _ if takes_arg(c, on) => n += 1,
            _ => {}
        }
    }
    n
}

/// Parse a channel mode string with its arguments.
///
/// Unknown letters are ignored. Surplus arguments are ignored.
pub fn parse_channel_changes<S: AsRef<str>>(
    modes: &str,
    args: &[S],
) -> Result<Vec<ChannelChange>, Anomaly> {
    let mut res = Vec::new();
    let mut args = args.iter().map(AsRef::<str>::as_ref);
    let mut remaining = args.len();
    let mut on = true;

    let mut next_arg = |c: char, remaining: &mut usize| -> Result<String, Anomaly> {
        let arg = args.next().ok_or(Anomaly::MissingModeArgument(c))?;
        *remaining -= 1;
        Ok(arg.to_string())
    };

    for (i, c) in modes.char_indices() {
        match c {
            '+' => on = true,
            '-' => on = false,
            _ => {
                if let Some(flag) = PRIVILEGE_MODES.flag_of(c) {
                    let nick = next_arg(c, &mut remaining)?;
                    res.push(ChannelChange::Privilege { flag, on, nick });
                } else if let Some(flag) = CHANNEL_MODES.flag_of(c) {
                    match flag {
                        ChannelFlag::Key if on => {
                            res.push(ChannelChange::Key(Some(next_arg(c, &mut remaining)?)));
                        }
                        ChannelFlag::Key => {
                            // Servers differ on whether -k carries the old key.
                            let rest = &modes[i + c.len_utf8()..];
                            if remaining > required_args(rest, on) {
                                next_arg(c, &mut remaining)?;
                            }
                            res.push(ChannelChange::Key(None));
                        }
                        ChannelFlag::Limit if on => {
                            let raw = next_arg(c, &mut remaining)?;
                            let limit = raw
                                .parse::<u32>()
                                .ok()
                                .filter(|&n| n > 0)
                                .ok_or_else(|| Anomaly::InvalidLimit(raw.clone()))?;
                            res.push(ChannelChange::Limit(Some(limit)));
                        }
                        ChannelFlag::Limit => res.push(ChannelChange::Limit(None)),
                        _ => res.push(ChannelChange::Flag { flag, on }),
                    }
                } else if LIST_MODES.contains(&c) {
                    next_arg(c, &mut remaining)?;
                }
            }
        }
    }

    Ok(res)
}

/// Parse a user mode string like `+iw-x`. Unknown letters are ignored.
pub fn parse_nick_changes(modes: &str) -> Vec<UserModeChange> {
    let mut res = Vec::new();
    let mut on = true;
    for c in modes.chars() {
        match c {
            '+' => on = true,
            '-' => on = false,
            _ => {
                if let Some(flag) = NICK_MODES.flag_of(c) {
                    res.push(UserModeChange { flag, on });
                }
            }
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ARGS: &[&str] = &[];

    #[test]
    fn test_simple_flags() {
        let changes = parse_channel_changes("+nt-s", NO_ARGS).unwrap();
        assert_eq!(
            changes,
            vec![
                ChannelChange::Flag {
                    flag: ChannelFlag::NoExternalMsg,
                    on: true
                },
                ChannelChange::Flag {
                    flag: ChannelFlag::ProtectedTopic,
                    on: true
                },
                ChannelChange::Flag {
                    flag: ChannelFlag::Secret,
                    on: false
                },
            ]
        );
    }

    #[test]
    fn test_privileges_consume_args_in_order() {
        let changes = parse_channel_changes("+ov-h", &["alice", "bob", "carol"]).unwrap();
        assert_eq!(changes.len(), 3);
        assert_eq!(
            changes[2],
            ChannelChange::Privilege {
                flag: PrivilegeFlag::HalfOp,
                on: false,
                nick: "carol".into()
            }
        );
    }

    #[test]
    fn test_key_and_limit() {
        let changes = parse_channel_changes("+kl", &["secret", "10"]).unwrap();
        assert_eq!(
            changes,
            vec![
                ChannelChange::Key(Some("secret".into())),
                ChannelChange::Limit(Some(10))
            ]
        );
    }

    #[test]
    fn test_limit_unset_takes_no_arg() {
        let changes = parse_channel_changes("-l+o", &["alice"]).unwrap();
        assert_eq!(changes[0], ChannelChange::Limit(None));
        assert!(matches!(&changes[1], ChannelChange::Privilege { nick, .. } if nick == "alice"));
    }

    #[test]
    fn test_unset_key_with_and_without_arg() {
        let with = parse_channel_changes("-k+o", &["oldkey", "alice"]).unwrap();
        assert!(matches!(&with[1], ChannelChange::Privilege { nick, .. } if nick == "alice"));

        let without = parse_channel_changes("-k+o", &["alice"]).unwrap();
        assert_eq!(without[0], ChannelChange::Key(None));
        assert!(matches!(&without[1], ChannelChange::Privilege { nick, .. } if nick == "alice"));
    }

    #[test]
    fn test_list_modes_consume_arg() {
        let changes = parse_channel_changes("+bo", &["*!*@bad.host", "alice"]).unwrap();
        assert_eq!(changes.len(), 1);
        assert!(matches!(&changes[0], ChannelChange::Privilege { nick, .. } if nick == "alice"));
    }

    #[test]
    fn test_missing_argument() {
        assert_eq!(
            parse_channel_changes("+o", NO_ARGS),
            Err(Anomaly::MissingModeArgument('o'))
        );
        assert_eq!(
            parse_channel_changes("+k", NO_ARGS),
            Err(Anomaly::MissingModeArgument('k'))
        );
    }

    #[test]
    fn test_invalid_limit() {
        assert_eq!(
            parse_channel_changes("+l", &["lots"]),
            Err(Anomaly::InvalidLimit("lots".into()))
        );
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert_eq!(
            parse_channel_changes("+nl", &["0"]),
            Err(Anomaly::InvalidLimit("0".into()))
        );
    }

    #[test]
    fn test_unknown_letters_ignored() {
        let changes = parse_channel_changes("+cCi", NO_ARGS).unwrap();
        assert_eq!(
            changes,
            vec![ChannelChange::Flag {
                flag: ChannelFlag::InviteOnly,
                on: true
            }]
        );
    }

    #[test]
    fn test_nick_changes() {
        let changes = parse_nick_changes("+iw-xQ");
        assert_eq!(
            changes,
            vec![
                UserModeChange {
                    flag: NickFlag::Invisible,
                    on: true
                },
                UserModeChange {
                    flag: NickFlag::WallOps,
                    on: true
                },
                UserModeChange {
                    flag: NickFlag::HiddenHost,
                    on: false
                },
            ]
        );
    }
}
