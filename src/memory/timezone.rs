use chrono_tz::Tz;

use crate::services::TimezoneValidator;

/// Accepts IANA timezone names known to the tz database, e.g.
/// `Europe/Moscow` or `UTC`. Names are case-sensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaTimezones;

impl TimezoneValidator for IanaTimezones {
    fn accepts(&self, timezone: &str) -> bool {
        timezone.parse::<Tz>().is_ok()
    }
}
