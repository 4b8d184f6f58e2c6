/// Decides whether a timezone name is acceptable for storage.
pub trait TimezoneValidator: Send + Sync {
    fn accepts(&self, timezone: &str) -> bool;
}
