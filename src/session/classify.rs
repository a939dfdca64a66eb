//! Message classification from literal prefix markers.

/// Marker prefix for alert messages.
pub const ALARM_MARKER: &str = "[ALARM]";
/// Marker prefix for alert-cleared messages.
pub const RECOVERY_MARKER: &str = "[RECOVERY]";

/// Message category derived from the body's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Alarm,
    Recovery,
    Plain,
}

/// Classify a message body. Matching is prefix-based on the raw bytes —
/// leading whitespace defeats the marker. Every string classifies.
pub fn classify(body: &str) -> Category {
    if body.starts_with(ALARM_MARKER) {
        Category::Alarm
    } else if body.starts_with(RECOVERY_MARKER) {
        Category::Recovery
    } else {
        Category::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alarm_prefix() {
        assert_eq!(classify("[ALARM] disk full"), Category::Alarm);
        assert_eq!(classify("[ALARM]"), Category::Alarm);
    }

    #[test]
    fn test_recovery_prefix() {
        assert_eq!(classify("[RECOVERY] disk ok"), Category::Recovery);
    }

    #[test]
    fn test_everything_else_is_plain() {
        assert_eq!(classify("hello"), Category::Plain);
        assert_eq!(classify(""), Category::Plain);
        assert_eq!(classify("disk [ALARM] full"), Category::Plain);
        assert_eq!(classify("[alarm] lowercase"), Category::Plain);
    }

    #[test]
    fn test_leading_whitespace_defeats_marker() {
        assert_eq!(classify(" [ALARM] disk full"), Category::Plain);
        assert_eq!(classify("\t[RECOVERY] disk ok"), Category::Plain);
    }
}
