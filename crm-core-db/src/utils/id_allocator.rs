use parking_lot::Mutex;
use uuid::Uuid;

/// Highest id handed out by this process, as a u128.
static LAST_ISSUED: Mutex<u128> = parking_lot::const_mutex(0);

/// Allocates a time-ordered, globally unique record identifier.
///
/// Ids are UUIDv7 values: the leading 48 bits are the Unix timestamp in
/// milliseconds, so both the values and their lowercase hyphenated text form
/// sort by creation time. Within one process every id is strictly greater
/// than the previous one, even when the clock stalls or steps backwards.
pub fn allocate_id() -> Uuid {
    let candidate = Uuid::now_v7().as_u128();
    let mut last = LAST_ISSUED.lock();
    let next = if candidate > *last {
        candidate
    } else {
        last.wrapping_add(1)
    };
    *last = next;
    Uuid::from_u128(next)
}

/// Allocates `count` ids in increasing order.
pub fn allocate_ids(count: usize) -> Vec<Uuid> {
    (0..count).map(|_| allocate_id()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_strictly_increasing() {
        let ids = allocate_ids(10_000);
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].to_string() < pair[1].to_string());
        }
    }

    #[test]
    fn test_ids_are_version_7() {
        assert_eq!(allocate_id().get_version_num(), 7);
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| allocate_ids(2_000)))
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 16_000);
    }
}
