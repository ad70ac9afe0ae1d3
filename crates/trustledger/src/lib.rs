//! `trustledger` - Member registry of a community trust
//!
//! This library keeps the trust's member records, their donation history and
//! the welfare scheme grants approved for them. A session loads the member
//! snapshot through a [`PersistencePort`], mutates it through the
//! registration, donation and scheme services, and writes the whole snapshot
//! back after every accepted change. [`ViewController`] sequences those
//! operations by screen.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod donation;
pub mod error;
pub mod logging;
pub mod member;
pub mod outcome;
pub mod persistence;
pub mod profile;
pub mod registration;
pub mod scheme;
pub mod seed;
pub mod storage;
pub mod store;
pub mod view;

pub use config::Config;
pub use donation::donate;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use member::{Donation, Member, SchemeRecord};
pub use outcome::Outcome;
pub use persistence::{MemorySlot, PersistencePort};
pub use profile::{MemberProfile, NewMember};
pub use registration::{register, MemberIdGenerator};
pub use scheme::{approve_scheme, update_member};
pub use seed::initial_members;
pub use storage::{Storage, StorageSlot, StorageStats};
pub use store::MemberStore;
pub use view::{Action, Screen, ViewController};
