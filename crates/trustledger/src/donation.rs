//! Donation ledger.
//!
//! Donations are appended to the end of a member's history. Earlier entries
//! are never changed, reordered or removed.

use tracing::info;

use crate::error::{Error, Result};
use crate::member::Donation;
use crate::outcome::Outcome;
use crate::store::MemberStore;

/// Record a donation against a member.
///
/// The donation id is taken as given; it only needs to be unique within the
/// member's own history.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no member has `member_id`, or
/// [`Error::InvalidAmount`] if the amount is zero. The store is unchanged in
/// both cases.
pub fn donate(store: &mut MemberStore, member_id: &str, donation: Donation) -> Result<Outcome> {
    let mut updated = store
        .find(member_id)
        .cloned()
        .ok_or_else(|| Error::not_found(member_id))?;
    if donation.amount == 0 {
        return Err(Error::InvalidAmount { entry: "donation" });
    }

    let amount = donation.amount;
    updated.donations.push(donation);
    let members = store.with_replaced(updated)?;
    store.replace_all(members)?;

    info!("Recorded donation of {} for member {}", amount, member_id);
    Ok(Outcome::DonationRecorded {
        id: member_id.to_string(),
    })
}
