//! In-memory member collection for a session.
//!
//! [`MemberStore`] is the single source of truth while a session runs. It is
//! only ever changed by whole-collection replacement, which checks the id
//! uniqueness invariant and then persists the new snapshot through the
//! injected [`PersistencePort`].

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::member::Member;
use crate::persistence::PersistencePort;

/// The session's member collection.
pub struct MemberStore {
    members: Vec<Member>,
    index: HashMap<String, usize>,
    port: Box<dyn PersistencePort>,
    persisted: bool,
}

impl fmt::Debug for MemberStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberStore")
            .field("members", &self.members.len())
            .field("port", &self.port.describe())
            .field("persisted", &self.persisted)
            .finish_non_exhaustive()
    }
}

fn build_index(members: &[Member]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(members.len());
    for (position, member) in members.iter().enumerate() {
        if index.insert(member.id.clone(), position).is_some() {
            return Err(Error::duplicate_id(member.id.clone()));
        }
    }
    Ok(index)
}

impl MemberStore {
    /// Start a session by loading the snapshot from `port`.
    ///
    /// Falls back to `seed` if the port holds no usable snapshot. A loaded
    /// snapshot that repeats an id is also treated as unusable, and so is a
    /// seed that repeats one (the session then starts empty).
    #[must_use]
    pub fn open(port: Box<dyn PersistencePort>, seed: &[Member]) -> Self {
        let mut members = port.load(seed);
        let index = match build_index(&members) {
            Ok(index) => index,
            Err(e) => {
                warn!("Stored snapshot rejected ({e}); using seed data");
                members = seed.to_vec();
                match build_index(&members) {
                    Ok(index) => index,
                    Err(e) => {
                        warn!("Seed data rejected ({e}); starting empty");
                        members.clear();
                        HashMap::new()
                    }
                }
            }
        };

        debug!("Member store opened with {} members", members.len());
        Self {
            members,
            index,
            port,
            persisted: true,
        }
    }

    /// Snapshot of all members, in registration order.
    #[must_use]
    pub fn all(&self) -> &[Member] {
        &self.members
    }

    /// Look up a member by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Member> {
        self.index.get(id).map(|&position| &self.members[position])
    }

    /// Check whether a member id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of registered members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check whether the store holds no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of every donation recorded against every member, saturating at
    /// `u64::MAX`.
    #[must_use]
    pub fn total_donations(&self) -> u64 {
        self.members
            .iter()
            .fold(0, |total, m| total.saturating_add(m.total_donations()))
    }

    /// Sum of every scheme grant approved for every member, saturating at
    /// `u64::MAX`.
    #[must_use]
    pub fn total_scheme_amount(&self) -> u64 {
        self.members
            .iter()
            .fold(0, |total, m| total.saturating_add(m.total_scheme_amount()))
    }

    /// Whether the last save reached durable storage.
    ///
    /// `false` means in-memory and durable state have diverged; the next
    /// accepted mutation retries the save.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Description of the persistence backend.
    #[must_use]
    pub fn backend(&self) -> String {
        self.port.describe()
    }

    /// Replace the whole collection and persist it.
    ///
    /// The save is best-effort: a failed write leaves the new collection in
    /// place and is reported through [`MemberStore::is_persisted`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] without changing anything if `members`
    /// repeats an id.
    pub fn replace_all(&mut self, members: Vec<Member>) -> Result<()> {
        let index = build_index(&members)?;
        self.members = members;
        self.index = index;
        self.persisted = self.port.save(&self.members);
        Ok(())
    }

    /// Build the collection that results from swapping in `updated` for the
    /// member with the same id.
    pub(crate) fn with_replaced(&self, updated: Member) -> Result<Vec<Member>> {
        let position = *self
            .index
            .get(&updated.id)
            .ok_or_else(|| Error::not_found(updated.id.clone()))?;
        let mut members = self.members.clone();
        members[position] = updated;
        Ok(members)
    }

    /// Build the collection that results from appending `member`.
    pub(crate) fn with_appended(&self, member: Member) -> Result<Vec<Member>> {
        if self.contains(&member.id) {
            return Err(Error::duplicate_id(member.id));
        }
        let mut members = self.members.clone();
        members.push(member);
        Ok(members)
    }
}
