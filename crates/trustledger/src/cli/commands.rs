//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::error::{Error, Result};
use crate::member::{Community, Gender, MaritalStatus, MemberRole};
use crate::profile::{
    MarriedFemaleProfile, MarriedMaleProfile, MemberProfile, NewMember, SpouseDetails,
    UnmarriedProfile,
};

/// Member listing commands.
#[derive(Debug, Subcommand)]
pub enum MembersCommand {
    /// List all members in registration order
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show one member with their donation and scheme history
    Show {
        /// Member id
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Register command arguments.
#[derive(Debug, Clone, Args)]
pub struct RegisterCommand {
    /// Edit the member with this id instead of registering a new one
    #[arg(long, value_name = "ID", conflicts_with = "id")]
    pub edit: Option<String>,

    /// Use this id instead of generating one
    #[arg(long)]
    pub id: Option<String>,

    /// Given name
    #[arg(long)]
    pub first_name: String,

    /// Family name
    #[arg(long)]
    pub surname: String,

    /// City of residence
    #[arg(long)]
    pub city: String,

    /// Gender
    #[arg(long, value_enum)]
    pub gender: GenderArg,

    /// Marital status
    #[arg(long, value_enum, default_value = "unmarried")]
    pub marital_status: MaritalStatusArg,

    /// Role in the trust
    #[arg(long, value_enum, default_value = "member")]
    pub role: RoleArg,

    /// Father's name (unmarried members)
    #[arg(long)]
    pub father_name: Option<String>,

    /// Wife's name (married male members)
    #[arg(long)]
    pub wife_name: Option<String>,

    /// Husband's name (married female members)
    #[arg(long)]
    pub husband_name: Option<String>,

    /// Show the husband's name in the display name (married female members)
    #[arg(long)]
    pub husband_suffix: bool,

    /// Age
    #[arg(long)]
    pub age: Option<String>,

    /// Education
    #[arg(long)]
    pub education: String,

    /// Occupation
    #[arg(long)]
    pub occupation: String,

    /// Annual income
    #[arg(long)]
    pub income: String,

    /// Spouse education (married members)
    #[arg(long)]
    pub spouse_education: Option<String>,

    /// Spouse occupation (married members)
    #[arg(long)]
    pub spouse_occupation: Option<String>,

    /// Spouse income (married members)
    #[arg(long)]
    pub spouse_income: Option<String>,

    /// Community
    #[arg(long, value_enum)]
    pub community: CommunityArg,

    /// Sub-caste within the community
    #[arg(long)]
    pub sub_caste: String,

    /// Registration fee
    #[arg(long)]
    pub fee: u64,
}

fn reject_flags(flags: &[(&str, bool)], allowed: &str) -> Result<()> {
    match flags.iter().find(|(_, set)| *set) {
        Some((flag, _)) => Err(Error::invalid_member(format!(
            "{flag} is only allowed for {allowed} members"
        ))),
        None => Ok(()),
    }
}

impl RegisterCommand {
    /// Build the gender and marital status dependent part from the flags.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMember`] if a flag does not belong to the
    /// chosen gender and marital status.
    pub fn profile(&self) -> Result<MemberProfile> {
        let spouse = SpouseDetails {
            education: self.spouse_education.clone(),
            occupation: self.spouse_occupation.clone(),
            income: self.spouse_income.clone(),
        };
        let has_spouse = spouse != SpouseDetails::default();

        match (self.gender, self.marital_status) {
            (gender, MaritalStatusArg::Unmarried) => {
                reject_flags(
                    &[
                        ("--wife-name", self.wife_name.is_some()),
                        ("--husband-name", self.husband_name.is_some()),
                        ("--husband-suffix", self.husband_suffix),
                        ("spouse details", has_spouse),
                    ],
                    "married",
                )?;
                Ok(MemberProfile::Unmarried(UnmarriedProfile {
                    gender: gender.into(),
                    father_name: self.father_name.clone(),
                }))
            }
            (GenderArg::Male, MaritalStatusArg::Married) => {
                reject_flags(
                    &[
                        ("--father-name", self.father_name.is_some()),
                        ("--husband-name", self.husband_name.is_some()),
                        ("--husband-suffix", self.husband_suffix),
                    ],
                    "other",
                )?;
                Ok(MemberProfile::MarriedMale(MarriedMaleProfile {
                    wife_name: self.wife_name.clone(),
                    spouse,
                }))
            }
            (GenderArg::Female, MaritalStatusArg::Married) => {
                reject_flags(
                    &[
                        ("--father-name", self.father_name.is_some()),
                        ("--wife-name", self.wife_name.is_some()),
                    ],
                    "other",
                )?;
                Ok(MemberProfile::MarriedFemale(MarriedFemaleProfile {
                    husband_name: self.husband_name.clone(),
                    use_husband_name_suffix: Some(self.husband_suffix),
                    spouse,
                }))
            }
        }
    }

    /// Collect the flags into registration input.
    ///
    /// # Errors
    ///
    /// See [`RegisterCommand::profile`].
    pub fn new_member(&self) -> Result<NewMember> {
        Ok(NewMember {
            first_name: self.first_name.clone(),
            surname: self.surname.clone(),
            city: self.city.clone(),
            role: self.role.into(),
            profile: self.profile()?,
            age: self.age.clone(),
            education: self.education.clone(),
            occupation: self.occupation.clone(),
            annual_income: self.income.clone(),
            community: self.community.into(),
            sub_caste: self.sub_caste.clone(),
            registration_fee: self.fee,
        })
    }
}

/// Donate command arguments.
#[derive(Debug, Args)]
pub struct DonateCommand {
    /// Id of the donating member
    pub member_id: String,

    /// Donation amount
    #[arg(short, long)]
    pub amount: u64,

    /// Donation category
    #[arg(long)]
    pub category: String,

    /// Optional sub-category
    #[arg(long)]
    pub sub_category: Option<String>,

    /// Donation date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

/// Approve-scheme command arguments.
#[derive(Debug, Args)]
pub struct ApproveSchemeCommand {
    /// Id of the beneficiary member
    pub member_id: String,

    /// Scheme name
    #[arg(short, long)]
    pub scheme: String,

    /// Grant amount
    #[arg(short, long)]
    pub amount: u64,

    /// Free-text details
    #[arg(long)]
    pub details: Option<String>,

    /// Approval date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Gender argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    /// Male
    Male,
    /// Female
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Self::Male,
            GenderArg::Female => Self::Female,
        }
    }
}

/// Marital status argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MaritalStatusArg {
    /// Married
    Married,
    /// Not married
    Unmarried,
}

impl From<MaritalStatusArg> for MaritalStatus {
    fn from(arg: MaritalStatusArg) -> Self {
        match arg {
            MaritalStatusArg::Married => Self::Married,
            MaritalStatusArg::Unmarried => Self::Unmarried,
        }
    }
}

/// Community argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CommunityArg {
    /// Patel
    Patel,
    /// Muslim
    Muslim,
    /// Swaminarayan
    Swaminarayan,
}

impl From<CommunityArg> for Community {
    fn from(arg: CommunityArg) -> Self {
        match arg {
            CommunityArg::Patel => Self::Patel,
            CommunityArg::Muslim => Self::Muslim,
            CommunityArg::Swaminarayan => Self::Swaminarayan,
        }
    }
}

/// Role argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RoleArg {
    /// President
    President,
    /// Vice president
    VicePresident,
    /// Manager
    Manager,
    /// Fund manager
    FundManager,
    /// Ordinary member
    #[default]
    Member,
}

impl From<RoleArg> for MemberRole {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::President => Self::President,
            RoleArg::VicePresident => Self::VicePresident,
            RoleArg::Manager => Self::Manager,
            RoleArg::FundManager => Self::FundManager,
            RoleArg::Member => Self::Member,
        }
    }
}
