use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors from the tick-counter registry: queries against unregistered
/// clients or counters are reported, never silently zeroed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickError {
    #[error("client '{0}' is not registered with the tick registry")]
    UnregisteredClient(String),

    #[error("client '{client}' has no counter '{counter}'")]
    UnknownCounter { client: String, counter: String },
}

/// Per-client named tick counters, advanced once per logic tick for every
/// registered counter. Optional telemetry consumer.
#[derive(Debug, Default)]
pub struct TickRegistry {
    clients: FxHashMap<String, FxHashMap<String, u64>>,
}

impl TickRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or re-zeroes) a counter for a client.
    pub fn register(&mut self, client: &str, counter: &str) {
        self.clients
            .entry(client.to_string())
            .or_default()
            .insert(counter.to_string(), 0);
    }

    pub fn get(&self, client: &str, counter: &str) -> Result<u64, TickError> {
        let counters = self
            .clients
            .get(client)
            .ok_or_else(|| TickError::UnregisteredClient(client.to_string()))?;
        counters
            .get(counter)
            .copied()
            .ok_or_else(|| TickError::UnknownCounter {
                client: client.to_string(),
                counter: counter.to_string(),
            })
    }

    /// Zeroes a counter without unregistering it.
    pub fn reset(&mut self, client: &str, counter: &str) -> Result<(), TickError> {
        let counters = self
            .clients
            .get_mut(client)
            .ok_or_else(|| TickError::UnregisteredClient(client.to_string()))?;
        match counters.get_mut(counter) {
            Some(value) => {
                *value = 0;
                Ok(())
            }
            None => Err(TickError::UnknownCounter {
                client: client.to_string(),
                counter: counter.to_string(),
            }),
        }
    }

    /// Called by the scheduler once per logic tick.
    pub fn advance_all(&mut self) {
        for counters in self.clients.values_mut() {
            for value in counters.values_mut() {
                *value += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_before_registration_is_an_error() {
        let registry = TickRegistry::new();
        assert_eq!(
            registry.get("player", "idle"),
            Err(TickError::UnregisteredClient("player".to_string()))
        );
    }

    #[test]
    fn unknown_counter_is_an_error() {
        let mut registry = TickRegistry::new();
        registry.register("player", "idle");
        assert!(matches!(
            registry.get("player", "walk"),
            Err(TickError::UnknownCounter { .. })
        ));
    }

    #[test]
    fn advance_increments_every_registered_counter() {
        let mut registry = TickRegistry::new();
        registry.register("player", "idle");
        registry.register("player", "walk");
        registry.register("door", "open");

        for _ in 0..3 {
            registry.advance_all();
        }

        assert_eq!(registry.get("player", "idle").unwrap(), 3);
        assert_eq!(registry.get("player", "walk").unwrap(), 3);
        assert_eq!(registry.get("door", "open").unwrap(), 3);
    }

    #[test]
    fn reset_zeroes_without_unregistering() {
        let mut registry = TickRegistry::new();
        registry.register("player", "idle");
        registry.advance_all();
        assert_eq!(registry.get("player", "idle").unwrap(), 1);

        registry.reset("player", "idle").unwrap();
        assert_eq!(registry.get("player", "idle").unwrap(), 0);
        assert!(registry.reset("player", "missing").is_err());
    }
}
