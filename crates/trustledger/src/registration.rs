//! Member registration.
//!
//! Creating a member appends a new record after checking its id is free;
//! editing a member replaces the stored record wholesale. Both paths validate
//! the candidate first and leave the store untouched on any failure.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::member::Member;
use crate::outcome::Outcome;
use crate::store::MemberStore;

/// Lowest member id handed out by [`MemberIdGenerator`].
pub const MIN_MEMBER_ID: u16 = 1000;

/// Highest member id handed out by [`MemberIdGenerator`].
pub const MAX_MEMBER_ID: u16 = 9999;

/// Register a new member or replace an existing one.
///
/// With `existing` absent this is the create path: `candidate.id` must not be
/// registered yet. With `existing` present this is the edit path: the
/// candidate replaces the stored record with the same id, keeping its id,
/// registration date and histories.
///
/// # Errors
///
/// - [`Error::InvalidMember`] if the candidate fails validation.
/// - [`Error::DuplicateId`] if a create reuses a registered id.
/// - [`Error::ImmutableField`] if an edit changes the id or registration date.
/// - [`Error::NotFound`] if the edited member is no longer in the store.
/// - [`Error::HistoryRewritten`] if an edit drops ledger entries.
pub fn register(
    store: &mut MemberStore,
    candidate: Member,
    existing: Option<&Member>,
) -> Result<Outcome> {
    candidate.validate()?;

    match existing {
        Some(existing) => {
            ensure_same_identity(existing, &candidate)?;
            let stored = store
                .find(&candidate.id)
                .ok_or_else(|| Error::not_found(candidate.id.clone()))?;
            ensure_append_only(stored, &candidate)?;

            let id = candidate.id.clone();
            let members = store.with_replaced(candidate)?;
            store.replace_all(members)?;
            info!("Updated member {}", id);
            Ok(Outcome::Updated { id })
        }
        None => {
            let id = candidate.id.clone();
            let members = store.with_appended(candidate)?;
            store.replace_all(members)?;
            info!("Registered new member {}", id);
            Ok(Outcome::Created { id })
        }
    }
}

/// Check that an edit keeps the fields that are fixed at registration.
pub(crate) fn ensure_same_identity(stored: &Member, updated: &Member) -> Result<()> {
    if stored.id != updated.id {
        return Err(Error::ImmutableField {
            id: stored.id.clone(),
            field: "id",
        });
    }
    if stored.registration_date != updated.registration_date {
        return Err(Error::ImmutableField {
            id: stored.id.clone(),
            field: "registrationDate",
        });
    }
    Ok(())
}

/// Check that `updated` keeps every stored ledger entry, in order.
pub(crate) fn ensure_append_only(stored: &Member, updated: &Member) -> Result<()> {
    if !updated.donations.starts_with(&stored.donations) {
        return Err(Error::HistoryRewritten {
            id: stored.id.clone(),
            history: "donation",
        });
    }
    if !updated.schemes.starts_with(&stored.schemes) {
        return Err(Error::HistoryRewritten {
            id: stored.id.clone(),
            history: "scheme",
        });
    }
    Ok(())
}

/// Mints four digit member ids that are not yet registered.
///
/// Ids are drawn at random from `1000..=9999` and redrawn on collision, up to
/// a fixed number of attempts.
#[derive(Debug)]
pub struct MemberIdGenerator {
    rng: StdRng,
    attempts: u32,
}

impl MemberIdGenerator {
    /// Create a generator seeded from the operating system.
    #[must_use]
    pub fn new(attempts: u32) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            attempts,
        }
    }

    /// Create a generator with a fixed seed, for reproducible ids.
    #[must_use]
    pub fn seeded(seed: u64, attempts: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            attempts,
        }
    }

    /// Draw an id that no member in `store` uses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdSpaceExhausted`] if every attempt collided.
    pub fn next_id(&mut self, store: &MemberStore) -> Result<String> {
        for attempt in 1..=self.attempts {
            let id = self.rng.gen_range(MIN_MEMBER_ID..=MAX_MEMBER_ID).to_string();
            if !store.contains(&id) {
                return Ok(id);
            }
            debug!("Member id {} already taken (attempt {})", id, attempt);
        }
        Err(Error::IdSpaceExhausted {
            attempts: self.attempts,
        })
    }
}
