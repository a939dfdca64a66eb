//! Command authorization.
//!
//! Pure decision logic: nothing in this module executes anything. The
//! `sh` verb grants a literal, unescaped shell line to senders holding
//! the unrestricted-shell privilege — a deliberate trust boundary for
//! operators, not an oversight. Restricted senders get the `cmd` verb,
//! checked against their allow-list by argv[0].

use argus_core::config::{Privilege, PrivilegeTable};

/// Outcome of authorizing one message body against the privilege table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Body is not command-shaped; the pipeline ignores it.
    NotACommand,
    /// Command-shaped body from a sender absent from the table.
    Unauthorized,
    /// Unrestricted sender requested a shell line; run it literally.
    ShellAllowed(String),
    /// Restricted sender requested `sh`; shell access is denied.
    ShellDenied,
    /// Argument vector whose argv[0] the sender may run.
    ArgvAllowed(Vec<String>),
    /// argv[0] not in the sender's allow-list.
    ArgvDenied {
        attempted: String,
        allowed: Vec<String>,
    },
    /// Any listed sender may trigger a table reload.
    ReloadRequested,
    /// Command-shaped body that matches none of the known verb forms.
    UnrecognizedCommand,
}

/// The known command verbs. A body is command-shaped when its first
/// space-delimited token (on the raw, untrimmed body) is one of these.
fn command_verb(body: &str) -> Option<&str> {
    let first = body.split(' ').next()?;
    matches!(first, "sh" | "cmd" | "reload").then_some(first)
}

/// Decide whether `sender_local` may run what `body` requests.
pub fn authorize(privileges: &PrivilegeTable, sender_local: &str, body: &str) -> Decision {
    let Some(verb) = command_verb(body) else {
        return Decision::NotACommand;
    };

    let Some(privilege) = privileges.get(sender_local) else {
        return Decision::Unauthorized;
    };

    match verb {
        "reload" if body == "reload" => Decision::ReloadRequested,
        "sh" => match body.strip_prefix("sh ") {
            Some(rest) if !rest.is_empty() => match privilege {
                Privilege::Shell => Decision::ShellAllowed(rest.to_string()),
                Privilege::Commands(_) => Decision::ShellDenied,
            },
            _ => Decision::UnrecognizedCommand,
        },
        "cmd" => {
            let argv: Vec<String> = body.split_whitespace().skip(1).map(String::from).collect();
            if argv.is_empty() {
                return Decision::UnrecognizedCommand;
            }
            match privilege {
                // The shell sentinel dominates: unrestricted senders may
                // also run any argv command.
                Privilege::Shell => Decision::ArgvAllowed(argv),
                Privilege::Commands(allowed) => {
                    if allowed.iter().any(|c| c == &argv[0]) {
                        Decision::ArgvAllowed(argv)
                    } else {
                        Decision::ArgvDenied {
                            attempted: argv[0].clone(),
                            allowed: allowed.clone(),
                        }
                    }
                }
            }
        }
        // `reload` with trailing arguments.
        _ => Decision::UnrecognizedCommand,
    }
}
