use chrono::{DateTime, Utc};

/// Represents an entity responsible for providing dates across application. Analytics and seed
/// generation take "now" from here so that tests can pin it.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Utc>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn time(&self) -> DateTime<Utc> {
        self.0
    }
}
