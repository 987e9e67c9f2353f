//! Built-in service providers.

mod grafana;
mod mosquitto;

pub use self::grafana::Grafana;
pub use self::mosquitto::Mosquitto;

use crate::registry::ServiceProvider;

/// Every provider compiled into the binary.
#[must_use]
pub fn builtin() -> Vec<Box<dyn ServiceProvider>> {
    vec![Box::new(Mosquitto), Box::new(Grafana)]
}
