//! Core record types for trustledger.
//!
//! This module defines the member record and the two append-only ledger entry
//! types attached to it. Field names and enum values serialize exactly as they
//! appear in the persisted snapshot (camelCase fields, lowercase enum values).

use std::sync::OnceLock;

use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::profile::MemberProfile;

/// Pattern every member id must match.
pub const MEMBER_ID_PATTERN: &str = r"^\d{4}$";

fn member_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MEMBER_ID_PATTERN).expect("member id pattern is valid"))
}

/// Check whether a string is a well-formed member id.
#[must_use]
pub fn is_valid_member_id(id: &str) -> bool {
    member_id_regex().is_match(id)
}

/// Today's local date in `YYYY-MM-DD` form.
#[must_use]
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Gender of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Marital status of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    /// Married.
    Married,
    /// Not married.
    Unmarried,
}

impl std::fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Married => write!(f, "married"),
            Self::Unmarried => write!(f, "unmarried"),
        }
    }
}

/// Community a member belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Community {
    /// Patel community.
    Patel,
    /// Muslim community.
    Muslim,
    /// Swaminarayan community.
    Swaminarayan,
}

impl std::fmt::Display for Community {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patel => write!(f, "patel"),
            Self::Muslim => write!(f, "muslim"),
            Self::Swaminarayan => write!(f, "swaminarayan"),
        }
    }
}

/// Role a member holds in the trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// President of the trust.
    President,
    /// Vice president.
    VicePresident,
    /// Manager.
    Manager,
    /// Manager of the trust fund.
    FundManager,
    /// Ordinary member.
    #[default]
    Member,
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::President => write!(f, "president"),
            Self::VicePresident => write!(f, "vice_president"),
            Self::Manager => write!(f, "manager"),
            Self::FundManager => write!(f, "fund_manager"),
            Self::Member => write!(f, "member"),
        }
    }
}

/// A single monetary contribution recorded against a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    /// Entry id, unique within the member's donation history.
    pub id: String,
    /// Donated amount.
    pub amount: u64,
    /// Donation category.
    pub category: String,
    /// Optional sub-category within the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// ISO date of the donation.
    pub date: String,
}

impl Donation {
    /// Create a donation dated today with a freshly minted id.
    #[must_use]
    pub fn new(amount: u64, category: impl Into<String>, sub_category: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount,
            category: category.into(),
            sub_category,
            date: today(),
        }
    }

    /// Override the date of this donation.
    #[must_use]
    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}

/// Status of a scheme record. Only approvals are ever recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeStatus {
    /// The grant was approved.
    #[default]
    Approved,
}

impl std::fmt::Display for SchemeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
        }
    }
}

/// A single approved benefit grant recorded against a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeRecord {
    /// Entry id, unique within the member's scheme history.
    pub id: String,
    /// Name of the scheme, e.g. "Golden Dikri Yojana".
    pub scheme_name: String,
    /// Granted amount.
    pub amount: u64,
    /// ISO date of the approval.
    pub date: String,
    /// Always [`SchemeStatus::Approved`].
    pub status: SchemeStatus,
    /// Free-form notes about the grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SchemeRecord {
    /// Create an approved scheme record dated today with a freshly minted id.
    #[must_use]
    pub fn approved(scheme_name: impl Into<String>, amount: u64, details: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            scheme_name: scheme_name.into(),
            amount,
            date: today(),
            status: SchemeStatus::Approved,
            details,
        }
    }

    /// Override the date of this record.
    #[must_use]
    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}

/// One person's registration record.
///
/// The conditional identity fields (`father_name`, `husband_name`,
/// `wife_name`, `use_husband_name_suffix`) and the spouse details are only
/// meaningful for particular gender and marital status combinations; see
/// [`MemberProfile`] for the typed view that enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Four digit member id, immutable once assigned.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub surname: String,
    /// Gender.
    pub gender: Gender,
    /// Marital status.
    pub marital_status: MaritalStatus,
    /// City of residence.
    pub city: String,
    /// Role in the trust.
    pub role: MemberRole,

    /// Father's name, for unmarried members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    /// Husband's name, for married female members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub husband_name: Option<String>,
    /// Show the husband's name between first name and surname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_husband_name_suffix: Option<bool>,
    /// Wife's name, for married male members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wife_name: Option<String>,

    /// Age, when the caller records one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    /// Education.
    pub education: String,
    /// Occupation.
    pub occupation: String,
    /// Annual income as entered.
    pub annual_income: String,

    /// Spouse education, married members only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_education: Option<String>,
    /// Spouse occupation, married members only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_occupation: Option<String>,
    /// Spouse income, married members only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_income: Option<String>,

    /// Community.
    pub community: Community,
    /// Sub-caste within the community. Not checked against `community`.
    pub sub_caste: String,
    /// One-time enrolment fee.
    pub registration_fee: u64,
    /// ISO date of registration, immutable once set.
    pub registration_date: String,

    /// Donation history, append-only.
    #[serde(default)]
    pub donations: Vec<Donation>,
    /// Scheme history, append-only.
    #[serde(default)]
    pub schemes: Vec<SchemeRecord>,
}

impl Member {
    /// Name as shown in lists: first name, optionally the husband's name,
    /// then surname.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.first_name.trim()];
        if let MemberProfile::MarriedFemale(profile) = MemberProfile::project(self) {
            if profile.use_husband_name_suffix.unwrap_or(false) {
                if let Some(husband) = self.husband_name.as_deref() {
                    parts.push(husband.trim());
                }
            }
        }
        parts.push(self.surname.trim());
        parts
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Sum of all recorded donations, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_donations(&self) -> u64 {
        self.donations
            .iter()
            .fold(0, |total, d| total.saturating_add(d.amount))
    }

    /// Sum of all approved scheme grants, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_scheme_amount(&self) -> u64 {
        self.schemes
            .iter()
            .fold(0, |total, s| total.saturating_add(s.amount))
    }

    /// Check the record's own consistency.
    ///
    /// Verifies the id format, that required display strings are present,
    /// and that the conditional identity fields fit the gender and marital
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMember`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_member_id(&self.id) {
            return Err(Error::invalid_member(format!(
                "member id '{}' must be four decimal digits",
                self.id
            )));
        }

        let required = [
            ("firstName", &self.first_name),
            ("surname", &self.surname),
            ("city", &self.city),
            ("education", &self.education),
            ("occupation", &self.occupation),
            ("annualIncome", &self.annual_income),
            ("registrationDate", &self.registration_date),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::invalid_member(format!("{field} is required")));
            }
        }

        MemberProfile::of(self)?;
        Ok(())
    }
}
