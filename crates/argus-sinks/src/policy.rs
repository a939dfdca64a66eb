//! Time-of-day call policy and target number formatting.

/// Hour window in which outbound calls are allowed. The window may wrap
/// midnight (`start > end`). No configured window means calls are
/// always allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallWindow {
    pub start_hour: Option<u8>,
    pub end_hour: Option<u8>,
}

impl CallWindow {
    pub fn new(start_hour: Option<u8>, end_hour: Option<u8>) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Whether `hour` (0-23) falls inside the window.
    pub fn contains(&self, hour: u32) -> bool {
        let (start, end) = match (self.start_hour, self.end_hour) {
            (Some(s), Some(e)) => (u32::from(s), u32::from(e)),
            // Partial or absent window: always in range.
            _ => return true,
        };

        if start < end {
            start <= hour && hour < end
        } else if start > end {
            // Wraps midnight, e.g. 22-6.
            hour >= start || hour < end
        } else {
            // start == end: zero-length window, never in range.
            false
        }
    }
}

/// Apply the country prefix to targets lacking an explicit `+` prefix.
/// Without a configured prefix the number passes through unchanged.
pub fn format_number(target: &str, country_prefix: Option<&str>) -> String {
    if target.starts_with('+') {
        return target.to_string();
    }
    match country_prefix {
        Some(prefix) => format!("{prefix}{target}"),
        None => target.to_string(),
    }
}
