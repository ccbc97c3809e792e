//! The administrative surface the harness needs from a Tablestore client.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::error::Result;
use crate::naming::table_prefix;

/// Tables bucketed further back than this are considered leaked.
const STALE_AFTER_HOURS: i64 = 48;

/// Administrative operations on tables, by name.
///
/// Implemented by the real client wrappers and, in the example driver, by a
/// local file-backed store.
pub trait TableAdmin {
    fn create_table(&self, name: &str) -> Result<()>;
    fn list_table_names(&self) -> Result<Vec<String>>;
    fn delete_table(&self, name: &str) -> Result<()>;
}

/// Deletes tables created by earlier runs that were never cleaned up.
///
/// A table is stale when its name starts with `prefix` and its embedded time
/// bucket sorts strictly below the bucket of `now - 48h`. Best effort
/// throughout: a failing listing ends the sweep, a failing delete is logged
/// and skipped.
pub fn cleanup_stale_tables(admin: &dyn TableAdmin, prefix: &str, now: DateTime<Utc>) {
    let cutoff = table_prefix(prefix, now - Duration::hours(STALE_AFTER_HOURS));
    let names = match admin.list_table_names() {
        Ok(names) => names,
        Err(err) => {
            warn!("listing tables for cleanup failed: {err}");
            return;
        }
    };
    for name in names {
        if !name.starts_with(prefix) {
            continue;
        }
        if name.as_str() >= cutoff.as_str() {
            continue;
        }
        debug!("deleting stale table '{name}'");
        if let Err(err) = admin.delete_table(&name) {
            warn!("failed to delete stale table '{name}': {err}");
        }
    }
}
