pub mod id_allocator;

pub use id_allocator::*;

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Current time at the microsecond precision PostgreSQL stores, so a model
/// built in memory compares equal to the same row read back.
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Hashes serializable data into an i64 using CBOR serialization and XxHash64.
///
/// The CBOR encoding is deterministic for a given value and the hasher uses a
/// fixed seed (0), so the hash is stable across runs and hosts.
pub fn hash_as_i64<T: Serialize>(data: &T) -> Result<i64, String> {
    let mut hasher = XxHash64::with_seed(0);
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor)
        .map_err(|e| format!("Failed to serialize data for hashing: {e}"))?;
    hasher.write(&cbor);
    Ok(hasher.finish() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_now_micros_has_no_sub_microsecond_part() {
        assert_eq!(now_micros().nanosecond() % 1_000, 0);
    }

    #[test]
    fn test_hash_is_stable_and_content_sensitive() {
        let a = serde_json::json!({"name": "Acme", "status": "Active"});
        let b = serde_json::json!({"status": "Active", "name": "Acme"});
        let c = serde_json::json!({"name": "Acme", "status": "Blocked"});

        assert_eq!(hash_as_i64(&a).unwrap(), hash_as_i64(&b).unwrap());
        assert_ne!(hash_as_i64(&a).unwrap(), hash_as_i64(&c).unwrap());
    }
}
