use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Source of "now" injected into services so deadline checks are testable.
///
/// Deadlines are absolute instants, so clocks report UTC. The configured
/// timezone only affects how instants are rendered.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Renders an absolute instant as wall-clock time in `tz`.
pub fn in_timezone(instant: DateTime<Utc>, tz: &Tz) -> DateTime<Tz> {
    instant.with_timezone(tz)
}

/// Wall clock.
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Clock frozen at `instant`.
pub fn fixed_clock(instant: DateTime<Utc>) -> Clock {
    Arc::new(move || instant)
}
