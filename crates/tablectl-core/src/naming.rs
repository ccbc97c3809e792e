//! Time-bucketed names for tables created by the example programs.
//!
//! Embedding the creation time in the table name lets a later run recognize
//! tables leaked by a crashed example and sweep them by name alone.

use chrono::{DateTime, Utc};
use rand::Rng;

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 8;

/// Prefix for tables created at `at`: `<prefix><seconds-since-epoch>-`.
///
/// For a fixed prefix the result is lexicographically increasing with time,
/// which [`crate::admin::cleanup_stale_tables`] relies on.
pub fn table_prefix(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}{}-", at.timestamp())
}

/// A fresh randomized table id bucketed at the current time.
pub fn random_table_id(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{}{suffix}", table_prefix(prefix, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_prefix_is_deterministic() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        assert_eq!(table_prefix("test-", at), table_prefix("test-", at));
        assert_eq!(table_prefix("test-", at), format!("test-{}-", at.timestamp()));
    }

    #[test]
    fn table_prefix_orders_lexicographically_with_time() {
        let earlier = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        let later = earlier + chrono::Duration::hours(1);
        assert!(table_prefix("test-", later) > table_prefix("test-", earlier));
    }

    #[test]
    fn random_table_id_has_prefix_and_alphabetic_suffix() {
        let id = random_table_id("test-");
        assert!(id.starts_with("test-"));

        let suffix = &id[id.rfind('-').unwrap() + 1..];
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn random_table_ids_differ() {
        assert_ne!(random_table_id("test-"), random_table_id("test-"));
    }
}
