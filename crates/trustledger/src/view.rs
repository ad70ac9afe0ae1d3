//! Screen navigation state machine.
//!
//! [`ViewController`] owns the session's [`MemberStore`], tracks which screen
//! is active, and routes each screen's actions to the registration, donation
//! and scheme services. The dashboard is the hub: every other screen is
//! entered from it (or, for editing, from the member list) and left by going
//! back to it.
//!
//! | From        | Action                  | To        |
//! |-------------|-------------------------|-----------|
//! | dashboard   | navigate(any screen)    | that screen |
//! | list        | edit-select(member)     | register (editing) |
//! | register    | register (accepted)     | dashboard |
//! | any         | back                    | dashboard |
//!
//! Donations stay on the fund screen and scheme actions stay on the
//! dikri yojana screen.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::donation;
use crate::error::{Error, Result};
use crate::member::{Donation, Member, SchemeRecord};
use crate::outcome::Outcome;
use crate::registration;
use crate::scheme;
use crate::store::MemberStore;

/// The screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Hub screen with the member count and navigation.
    #[default]
    Dashboard,
    /// Registration form, for new members or editing.
    Register,
    /// Member list.
    List,
    /// Trust fund and donations.
    Fund,
    /// Dikri Yojana scheme approvals.
    DikriYojana,
    /// Static information about the trust.
    About,
}

impl Screen {
    /// All screens, dashboard first.
    pub const ALL: [Screen; 6] = [
        Screen::Dashboard,
        Screen::Register,
        Screen::List,
        Screen::Fund,
        Screen::DikriYojana,
        Screen::About,
    ];
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "dashboard"),
            Self::Register => write!(f, "register"),
            Self::List => write!(f, "list"),
            Self::Fund => write!(f, "fund"),
            Self::DikriYojana => write!(f, "dikri_yojana"),
            Self::About => write!(f, "about"),
        }
    }
}

/// A user-triggered action on the active screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Go to another screen (from the dashboard).
    Navigate(Screen),
    /// Return to the dashboard, abandoning any edit in progress.
    Back,
    /// Pick a member from the list for editing.
    EditSelect {
        /// Id of the member to edit.
        member_id: String,
    },
    /// Submit the registration form.
    Register(Box<Member>),
    /// Record a donation on the fund screen.
    Donate {
        /// Id of the donating member.
        member_id: String,
        /// The donation.
        donation: Donation,
    },
    /// Approve a scheme grant on the dikri yojana screen.
    ApproveScheme {
        /// Id of the beneficiary member.
        member_id: String,
        /// The grant.
        record: SchemeRecord,
    },
    /// Save an edited member from the dikri yojana screen.
    UpdateMember(Box<Member>),
}

impl Action {
    /// Short name of the action (for errors and logging).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Navigate(_) => "navigate",
            Self::Back => "back",
            Self::EditSelect { .. } => "edit_select",
            Self::Register(_) => "register",
            Self::Donate { .. } => "donate",
            Self::ApproveScheme { .. } => "approve_scheme",
            Self::UpdateMember(_) => "update_member",
        }
    }
}

/// Drives the screens of one session.
#[derive(Debug)]
pub struct ViewController {
    store: MemberStore,
    screen: Screen,
    editing: Option<Member>,
}

impl ViewController {
    /// Start a session on the dashboard.
    #[must_use]
    pub fn new(store: MemberStore) -> Self {
        Self {
            store,
            screen: Screen::Dashboard,
            editing: None,
        }
    }

    /// The active screen.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The member being edited, if the register screen is in edit mode.
    #[must_use]
    pub fn editing(&self) -> Option<&Member> {
        self.editing.as_ref()
    }

    /// Read-only member snapshot handed to every screen.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        self.store.all()
    }

    /// Member count shown on the dashboard.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.store.len()
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &MemberStore {
        &self.store
    }

    /// End the session, handing back the store.
    #[must_use]
    pub fn into_store(self) -> MemberStore {
        self.store
    }

    /// Apply an action to the active screen.
    ///
    /// Returns the outcome for actions that mutate the store, `None` for pure
    /// navigation.
    ///
    /// # Errors
    ///
    /// Returns a navigation error if the action is not offered by the active
    /// screen, or the service error if a mutation is rejected. Nothing
    /// changes on error.
    pub fn dispatch(&mut self, action: Action) -> Result<Option<Outcome>> {
        debug!("Dispatching {} on {}", action.name(), self.screen);
        match action {
            Action::Navigate(to) => self.navigate(to).map(|()| None),
            Action::Back => {
                self.back();
                Ok(None)
            }
            Action::EditSelect { member_id } => self.edit_select(&member_id).map(|()| None),
            Action::Register(candidate) => self.register(*candidate).map(Some),
            Action::Donate {
                member_id,
                donation,
            } => self.donate(&member_id, donation).map(Some),
            Action::ApproveScheme { member_id, record } => {
                self.approve_scheme(&member_id, record).map(Some)
            }
            Action::UpdateMember(member) => self.update_member(*member).map(Some),
        }
    }

    /// Move to another screen.
    ///
    /// Every screen is reachable from the dashboard; the dashboard is
    /// reachable from everywhere. Entering the register screen this way
    /// starts a new registration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] for any other move.
    pub fn navigate(&mut self, to: Screen) -> Result<()> {
        if to == Screen::Dashboard {
            self.back();
            return Ok(());
        }
        if self.screen != Screen::Dashboard {
            return Err(Error::InvalidTransition {
                from: self.screen,
                to,
            });
        }
        self.editing = None;
        self.transition(to);
        Ok(())
    }

    /// Return to the dashboard, clearing any edit context.
    pub fn back(&mut self) {
        self.editing = None;
        self.transition(Screen::Dashboard);
    }

    /// Open the register screen to edit a member picked from the list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActionNotAvailable`] outside the list screen, or
    /// [`Error::NotFound`] if the member does not exist.
    pub fn edit_select(&mut self, member_id: &str) -> Result<()> {
        self.require(Screen::List, "edit_select")?;
        let member = self
            .store
            .find(member_id)
            .cloned()
            .ok_or_else(|| Error::not_found(member_id))?;
        self.editing = Some(member);
        self.transition(Screen::Register);
        Ok(())
    }

    /// Submit the registration form.
    ///
    /// Creates a member, or replaces the one being edited. On success the
    /// session returns to the dashboard; on failure it stays on the form
    /// with the edit context intact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActionNotAvailable`] outside the register screen, or
    /// any error from [`registration::register`].
    pub fn register(&mut self, candidate: Member) -> Result<Outcome> {
        self.require(Screen::Register, "register")?;
        let outcome = registration::register(&mut self.store, candidate, self.editing.as_ref())?;
        self.editing = None;
        self.transition(Screen::Dashboard);
        Ok(outcome)
    }

    /// Record a donation. Stays on the fund screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActionNotAvailable`] outside the fund screen, or any
    /// error from [`donation::donate`].
    pub fn donate(&mut self, member_id: &str, donation: Donation) -> Result<Outcome> {
        self.require(Screen::Fund, "donate")?;
        donation::donate(&mut self.store, member_id, donation)
    }

    /// Approve a scheme grant. Stays on the dikri yojana screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActionNotAvailable`] outside the dikri yojana screen,
    /// or any error from [`scheme::approve_scheme`].
    pub fn approve_scheme(&mut self, member_id: &str, record: SchemeRecord) -> Result<Outcome> {
        self.require(Screen::DikriYojana, "approve_scheme")?;
        scheme::approve_scheme(&mut self.store, member_id, record)
    }

    /// Save an edited member from the dikri yojana screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActionNotAvailable`] outside the dikri yojana screen,
    /// or any error from [`scheme::update_member`].
    pub fn update_member(&mut self, member: Member) -> Result<Outcome> {
        self.require(Screen::DikriYojana, "update_member")?;
        scheme::update_member(&mut self.store, member)
    }

    fn require(&self, screen: Screen, action: &'static str) -> Result<()> {
        if self.screen == screen {
            Ok(())
        } else {
            Err(Error::ActionNotAvailable {
                action,
                screen: self.screen,
            })
        }
    }

    fn transition(&mut self, to: Screen) {
        if self.screen != to {
            debug!("Screen {} -> {}", self.screen, to);
        }
        self.screen = to;
    }
}
