//! Persistence port for member snapshots.
//!
//! The registry persists its whole member collection as one JSON array in a
//! single durable slot. Backends implement the two raw primitives; the
//! provided [`PersistencePort::load`] and [`PersistencePort::save`] methods
//! apply the session policy on top of them: loading falls back to seed data,
//! saving is best-effort, and failures are logged rather than raised.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::member::Member;

/// Durable storage for the member snapshot.
pub trait PersistencePort {
    /// Human readable description of the backend (for logging/debugging).
    fn describe(&self) -> String;

    /// Read the raw snapshot text.
    ///
    /// Returns `Ok(None)` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or the stored value is
    /// corrupt.
    fn read_snapshot(&self) -> Result<Option<String>>;

    /// Replace the raw snapshot text in a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn write_snapshot(&self, snapshot: &str) -> Result<()>;

    /// Load the member collection, or `seed` if there is none.
    ///
    /// Missing, unreadable and malformed snapshots all yield a copy of
    /// `seed`; the latter two are logged as warnings.
    fn load(&self, seed: &[Member]) -> Vec<Member> {
        let raw = match self.read_snapshot() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No snapshot in {}, using seed data", self.describe());
                return seed.to_vec();
            }
            Err(e) => {
                warn!(
                    "Failed to read snapshot from {}: {e}; using seed data",
                    self.describe()
                );
                return seed.to_vec();
            }
        };

        match decode_snapshot(&raw) {
            Ok(members) => {
                debug!(
                    "Loaded {} members from {}",
                    members.len(),
                    self.describe()
                );
                members
            }
            Err(e) => {
                warn!(
                    "Malformed snapshot in {}: {e}; using seed data",
                    self.describe()
                );
                seed.to_vec()
            }
        }
    }

    /// Save the full member collection.
    ///
    /// Returns `true` if the snapshot reached the backend. Failures are
    /// logged and otherwise ignored.
    fn save(&self, members: &[Member]) -> bool {
        let result = encode_snapshot(members).and_then(|raw| self.write_snapshot(&raw));
        match result {
            Ok(()) => {
                debug!("Saved {} members to {}", members.len(), self.describe());
                true
            }
            Err(e) => {
                warn!("Failed to save snapshot to {}: {e}", self.describe());
                false
            }
        }
    }
}

/// Serialize a member collection to its persisted JSON form.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_snapshot(members: &[Member]) -> Result<String> {
    Ok(serde_json::to_string(members)?)
}

/// Parse the persisted JSON form of a member collection.
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of members.
pub fn decode_snapshot(raw: &str) -> Result<Vec<Member>> {
    Ok(serde_json::from_str(raw)?)
}

/// In-memory snapshot slot.
///
/// Used as a stand-in for real storage in tests, and for sessions that
/// should not touch the disk.
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that already holds the given raw text.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let slot = Self::new();
        slot.value.replace(Some(raw.into()));
        slot
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// The raw text currently held.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl PersistencePort for MemorySlot {
    fn describe(&self) -> String {
        "memory slot".to_string()
    }

    fn read_snapshot(&self) -> Result<Option<String>> {
        Ok(self.value.borrow().clone())
    }

    fn write_snapshot(&self, snapshot: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(Error::persistence("memory slot is read-only"));
        }
        self.value.replace(Some(snapshot.to_string()));
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

impl<P: PersistencePort + ?Sized> PersistencePort for &P {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn read_snapshot(&self) -> Result<Option<String>> {
        (**self).read_snapshot()
    }

    fn write_snapshot(&self, snapshot: &str) -> Result<()> {
        (**self).write_snapshot(snapshot)
    }
}

impl<P: PersistencePort + ?Sized> PersistencePort for Rc<P> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn read_snapshot(&self) -> Result<Option<String>> {
        (**self).read_snapshot()
    }

    fn write_snapshot(&self, snapshot: &str) -> Result<()> {
        (**self).write_snapshot(snapshot)
    }
}
