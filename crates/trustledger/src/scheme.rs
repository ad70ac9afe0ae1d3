//! Scheme ledger.
//!
//! Scheme approvals (Dikri Yojana grants and the like) are appended to a
//! member's scheme history. The same screen can also save plain edits to a
//! member, so [`update_member`] reports whether the replacement added a
//! scheme or only changed other fields.

use tracing::info;

use crate::error::{Error, Result};
use crate::member::{Member, SchemeRecord};
use crate::outcome::Outcome;
use crate::registration::{ensure_append_only, ensure_same_identity};
use crate::store::MemberStore;

/// Approve a scheme grant for a member.
///
/// Only the new entry is checked; the stored record is taken as loaded.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no member has `member_id`, or
/// [`Error::InvalidAmount`] if the amount is zero.
pub fn approve_scheme(
    store: &mut MemberStore,
    member_id: &str,
    record: SchemeRecord,
) -> Result<Outcome> {
    let mut updated = store
        .find(member_id)
        .cloned()
        .ok_or_else(|| Error::not_found(member_id))?;
    if record.amount == 0 {
        return Err(Error::InvalidAmount { entry: "scheme" });
    }

    info!(
        "Approving scheme '{}' ({}) for member {}",
        record.scheme_name, record.amount, member_id
    );
    updated.schemes.push(record);
    let members = store.with_replaced(updated)?;
    store.replace_all(members)?;

    Ok(Outcome::SchemeApproved {
        id: member_id.to_string(),
    })
}

/// Replace a stored member with `updated`.
///
/// Tagged [`Outcome::SchemeApproved`] if the replacement grew the member's
/// scheme history, [`Outcome::Updated`] otherwise.
///
/// # Errors
///
/// - [`Error::InvalidMember`] if `updated` fails validation.
/// - [`Error::NotFound`] if no member has `updated.id`.
/// - [`Error::ImmutableField`] if the registration date changed.
/// - [`Error::HistoryRewritten`] if stored ledger entries were dropped.
pub fn update_member(store: &mut MemberStore, updated: Member) -> Result<Outcome> {
    updated.validate()?;
    let stored = store
        .find(&updated.id)
        .ok_or_else(|| Error::not_found(updated.id.clone()))?;
    ensure_same_identity(stored, &updated)?;
    ensure_append_only(stored, &updated)?;

    let schemes_before = stored.schemes.len();
    let schemes_after = updated.schemes.len();
    let id = updated.id.clone();

    let members = store.with_replaced(updated)?;
    store.replace_all(members)?;

    if schemes_after > schemes_before {
        info!("Scheme approved for member {}", id);
        Ok(Outcome::SchemeApproved { id })
    } else {
        info!("Updated member {}", id);
        Ok(Outcome::Updated { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::tests::{married_female, sample_member};
    use crate::member::SchemeStatus;
    use crate::persistence::{MemorySlot, PersistencePort};
    use crate::registration::register;
    use std::rc::Rc;

    fn record(id: &str, amount: u64) -> SchemeRecord {
        SchemeRecord {
            id: id.to_string(),
            scheme_name: "Golden Dikri Yojana".to_string(),
            amount,
            date: "2024-05-01".to_string(),
            status: SchemeStatus::Approved,
            details: Some("first daughter".to_string()),
        }
    }

    fn open() -> (MemberStore, Rc<MemorySlot>) {
        let slot = Rc::new(MemorySlot::new());
        let store = MemberStore::open(
            Box::new(slot.clone()),
            &[sample_member("1000"), married_female("3321")],
        );
        (store, slot)
    }

    #[test]
    fn test_approve_scheme_is_tagged() {
        let (mut store, slot) = open();

        let outcome = approve_scheme(&mut store, "1000", record("s1", 11000)).unwrap();

        assert_eq!(
            outcome,
            Outcome::SchemeApproved {
                id: "1000".to_string()
            }
        );
        assert_eq!(store.find("1000").unwrap().schemes, vec![record("s1", 11000)]);
        assert_eq!(slot.load(&[])[0].schemes.len(), 1);
    }

    #[test]
    fn test_schemes_append_in_order() {
        let (mut store, _slot) = open();

        approve_scheme(&mut store, "3321", record("s1", 11000)).unwrap();
        approve_scheme(&mut store, "3321", record("s2", 5000)).unwrap();

        assert_eq!(
            store.find("3321").unwrap().schemes,
            vec![record("s1", 11000), record("s2", 5000)]
        );
    }

    #[test]
    fn test_edit_after_approval_is_updated() {
        let (mut store, _slot) = open();
        approve_scheme(&mut store, "1000", record("s1", 11000)).unwrap();
        let current = store.find("1000").unwrap().clone();

        let outcome = register(&mut store, current.clone(), Some(&current)).unwrap();

        assert_eq!(
            outcome,
            Outcome::Updated {
                id: "1000".to_string()
            }
        );
        assert_eq!(store.find("1000").unwrap().schemes.len(), 1);
    }

    #[test]
    fn test_no_op_update_is_updated() {
        let (mut store, _slot) = open();
        let current = store.find("3321").unwrap().clone();

        let outcome = update_member(&mut store, current).unwrap();

        assert_eq!(
            outcome,
            Outcome::Updated {
                id: "3321".to_string()
            }
        );
    }

    #[test]
    fn test_update_member_with_new_scheme_is_scheme_approved() {
        let (mut store, _slot) = open();
        let mut updated = store.find("3321").unwrap().clone();
        updated.schemes.push(record("s1", 11000));
        updated.city = "Vadodara".to_string();

        let outcome = update_member(&mut store, updated).unwrap();

        assert!(matches!(outcome, Outcome::SchemeApproved { .. }));
        assert_eq!(store.find("3321").unwrap().city, "Vadodara");
    }

    #[test]
    fn test_update_member_cannot_drop_schemes() {
        let (mut store, _slot) = open();
        approve_scheme(&mut store, "1000", record("s1", 11000)).unwrap();
        let mut updated = store.find("1000").unwrap().clone();
        updated.schemes.clear();

        let err = update_member(&mut store, updated).unwrap_err();

        assert!(matches!(err, Error::HistoryRewritten { .. }));
        assert_eq!(store.find("1000").unwrap().schemes.len(), 1);
    }

    #[test]
    fn test_unknown_member() {
        let (mut store, slot) = open();

        let err = approve_scheme(&mut store, "9999", record("s1", 11000)).unwrap_err();
        assert!(err.is_not_found());

        let err = update_member(&mut store, sample_member("9999")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(slot.writes(), 0);
    }

    #[test]
    fn test_approve_scheme_for_loosely_stored_member() {
        let mut loose = sample_member("4092");
        loose.marital_status = crate::member::MaritalStatus::Married;
        loose.wife_name = Some("Surekhaben".to_string());
        assert!(loose.validate().is_err());

        let raw = crate::persistence::encode_snapshot(std::slice::from_ref(&loose)).unwrap();
        let mut store = MemberStore::open(Box::new(MemorySlot::with_raw(raw)), &[]);

        let outcome = approve_scheme(&mut store, "4092", record("s1", 11000)).unwrap();

        assert_eq!(
            outcome,
            Outcome::SchemeApproved {
                id: "4092".to_string()
            }
        );
        let stored = store.find("4092").unwrap();
        assert_eq!(stored.schemes, vec![record("s1", 11000)]);
        assert_eq!(stored.father_name.as_deref(), Some("Yusufbhai"));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let (mut store, _slot) = open();

        let err = approve_scheme(&mut store, "1000", record("s1", 0)).unwrap_err();

        assert!(matches!(err, Error::InvalidAmount { entry: "scheme" }));
        assert!(store.find("1000").unwrap().schemes.is_empty());
    }
}
