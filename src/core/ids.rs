//! # Identifier Generation
//!
//! Fresh ids are RFC 4122 version 4 UUID strings. Randomness comes from the
//! OS; if that source fails, the generator switches to a seeded `StdRng`
//! for the rest of the process. Both paths produce valid v4 UUIDs.

use std::time::{SystemTime, UNIX_EPOCH};

use log::warn;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use uuid::{Builder, Uuid};

/// Source of fresh entity ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// UUID v4 generator backed by the OS RNG with a pseudo-random fallback.
pub struct RandomIds {
    fallback: Option<StdRng>,
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomIds {
    pub fn new() -> Self {
        Self { fallback: None }
    }

    /// Deterministic generator, skips the OS source entirely.
    pub fn seeded(seed: u64) -> Self {
        Self {
            fallback: Some(StdRng::seed_from_u64(seed)),
        }
    }

    fn fill(&mut self, bytes: &mut [u8; 16]) {
        if let Some(rng) = self.fallback.as_mut() {
            rng.fill_bytes(bytes);
            return;
        }
        if let Err(e) = OsRng.try_fill_bytes(bytes) {
            warn!("OS random source unavailable ({}), using fallback generator", e);
            let mut rng = StdRng::seed_from_u64(fallback_seed());
            rng.fill_bytes(bytes);
            self.fallback = Some(rng);
        }
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.fill(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid().to_string()
    }
}

/// Wall-clock nanos mixed with the process id.
fn fallback_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    nanos ^ (u64::from(std::process::id()) << 32)
}

/// True if `id` parses as a version 4 UUID.
pub fn is_v4(id: &str) -> bool {
    Uuid::parse_str(id).is_ok_and(|u| u.get_version_num() == 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_os_ids_are_v4() {
        let mut ids = RandomIds::new();
        for _ in 0..32 {
            let id = ids.next_id();
            assert!(is_v4(&id), "not a v4 uuid: {id}");
        }
    }

    #[test]
    fn test_seeded_ids_are_v4_and_distinct() {
        let mut ids = RandomIds::seeded(7);
        let generated: HashSet<String> = (0..500).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 500);
        assert!(generated.iter().all(|id| is_v4(id)));
    }

    #[test]
    fn test_seeded_ids_are_reproducible() {
        let a: Vec<String> = {
            let mut ids = RandomIds::seeded(42);
            (0..3).map(|_| ids.next_id()).collect()
        };
        let b: Vec<String> = {
            let mut ids = RandomIds::seeded(42);
            (0..3).map(|_| ids.next_id()).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_is_v4_rejects_other_strings() {
        assert!(!is_v4("tool_openai"));
        assert!(!is_v4("00000000-0000-1000-8000-000000000000"));
    }
}
