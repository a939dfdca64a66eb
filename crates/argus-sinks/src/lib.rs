//! # argus-sinks
//!
//! Fire-and-forget host-command sinks: desktop notifications and
//! outbound telephony calls. Sink failures are logged locally and never
//! surface to the remote sender or abort remaining alert actions.

mod dial;
mod notify;
mod policy;

pub use dial::{Dialer, PhoneDialer};
pub use notify::{DesktopNotifier, Notifier};
pub use policy::{format_number, CallWindow};
