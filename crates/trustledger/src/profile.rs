//! Typed view of the marital and gender dependent member fields.
//!
//! The persisted [`Member`] record is flat, with several optional fields that
//! only make sense for a given gender and marital status. [`MemberProfile`]
//! is the tagged form used at the registration boundary: a profile can only
//! carry the fields its variant allows, and converting a flat record into a
//! profile fails if it carries anything else.

use crate::error::{Error, Result};
use crate::member::{Community, Gender, MaritalStatus, Member, MemberRole};

/// Education, occupation and income of a member's spouse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpouseDetails {
    /// Spouse education.
    pub education: Option<String>,
    /// Spouse occupation.
    pub occupation: Option<String>,
    /// Spouse income.
    pub income: Option<String>,
}

/// Profile of an unmarried member of either gender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmarriedProfile {
    /// Gender of the member.
    pub gender: Gender,
    /// Father's name.
    pub father_name: Option<String>,
}

/// Profile of a married male member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarriedMaleProfile {
    /// Wife's name.
    pub wife_name: Option<String>,
    /// Spouse details.
    pub spouse: SpouseDetails,
}

/// Profile of a married female member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarriedFemaleProfile {
    /// Husband's name.
    pub husband_name: Option<String>,
    /// Show the husband's name as part of the display name.
    pub use_husband_name_suffix: Option<bool>,
    /// Spouse details.
    pub spouse: SpouseDetails,
}

/// The gender and marital status dependent part of a member record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberProfile {
    /// Unmarried, either gender.
    Unmarried(UnmarriedProfile),
    /// Married male.
    MarriedMale(MarriedMaleProfile),
    /// Married female.
    MarriedFemale(MarriedFemaleProfile),
}

fn reject_if_set<T>(value: Option<&T>, field: &str, allowed: &str) -> Result<()> {
    if value.is_some() {
        return Err(Error::invalid_member(format!(
            "{field} is only allowed for {allowed} members"
        )));
    }
    Ok(())
}

impl MemberProfile {
    /// Strictly map a flat record onto its profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMember`] if the record carries a conditional
    /// field that does not belong to its gender and marital status.
    pub fn of(member: &Member) -> Result<Self> {
        match (member.marital_status, member.gender) {
            (MaritalStatus::Unmarried, _) => {
                reject_if_set(member.husband_name.as_ref(), "husbandName", "married female")?;
                reject_if_set(member.wife_name.as_ref(), "wifeName", "married male")?;
                reject_if_set(
                    member.use_husband_name_suffix.as_ref(),
                    "useHusbandNameSuffix",
                    "married female",
                )?;
                reject_if_set(member.spouse_education.as_ref(), "spouseEducation", "married")?;
                reject_if_set(member.spouse_occupation.as_ref(), "spouseOccupation", "married")?;
                reject_if_set(member.spouse_income.as_ref(), "spouseIncome", "married")?;
            }
            (MaritalStatus::Married, Gender::Male) => {
                reject_if_set(member.father_name.as_ref(), "fatherName", "unmarried")?;
                reject_if_set(member.husband_name.as_ref(), "husbandName", "married female")?;
                reject_if_set(
                    member.use_husband_name_suffix.as_ref(),
                    "useHusbandNameSuffix",
                    "married female",
                )?;
            }
            (MaritalStatus::Married, Gender::Female) => {
                reject_if_set(member.father_name.as_ref(), "fatherName", "unmarried")?;
                reject_if_set(member.wife_name.as_ref(), "wifeName", "married male")?;
            }
        }
        Ok(Self::project(member))
    }

    /// Leniently project a flat record onto its profile, ignoring fields
    /// that do not belong to it.
    #[must_use]
    pub fn project(member: &Member) -> Self {
        let spouse = || SpouseDetails {
            education: member.spouse_education.clone(),
            occupation: member.spouse_occupation.clone(),
            income: member.spouse_income.clone(),
        };
        match (member.marital_status, member.gender) {
            (MaritalStatus::Unmarried, gender) => Self::Unmarried(UnmarriedProfile {
                gender,
                father_name: member.father_name.clone(),
            }),
            (MaritalStatus::Married, Gender::Male) => Self::MarriedMale(MarriedMaleProfile {
                wife_name: member.wife_name.clone(),
                spouse: spouse(),
            }),
            (MaritalStatus::Married, Gender::Female) => {
                Self::MarriedFemale(MarriedFemaleProfile {
                    husband_name: member.husband_name.clone(),
                    use_husband_name_suffix: member.use_husband_name_suffix,
                    spouse: spouse(),
                })
            }
        }
    }

    /// Gender implied by this profile.
    #[must_use]
    pub fn gender(&self) -> Gender {
        match self {
            Self::Unmarried(profile) => profile.gender,
            Self::MarriedMale(_) => Gender::Male,
            Self::MarriedFemale(_) => Gender::Female,
        }
    }

    /// Marital status implied by this profile.
    #[must_use]
    pub fn marital_status(&self) -> MaritalStatus {
        match self {
            Self::Unmarried(_) => MaritalStatus::Unmarried,
            Self::MarriedMale(_) | Self::MarriedFemale(_) => MaritalStatus::Married,
        }
    }

    /// Write this profile into a flat record.
    ///
    /// Sets gender and marital status and overwrites every conditional field,
    /// clearing those the variant does not carry.
    pub fn apply_to(self, member: &mut Member) {
        member.gender = self.gender();
        member.marital_status = self.marital_status();

        let (father, husband, suffix, wife, spouse) = match self {
            Self::Unmarried(p) => (p.father_name, None, None, None, SpouseDetails::default()),
            Self::MarriedMale(p) => (None, None, None, p.wife_name, p.spouse),
            Self::MarriedFemale(p) => (
                None,
                p.husband_name,
                p.use_husband_name_suffix,
                None,
                p.spouse,
            ),
        };
        member.father_name = father;
        member.husband_name = husband;
        member.use_husband_name_suffix = suffix;
        member.wife_name = wife;
        member.spouse_education = spouse.education;
        member.spouse_occupation = spouse.occupation;
        member.spouse_income = spouse.income;
    }
}

/// Caller-supplied fields for a new registration.
///
/// Everything except the id and registration date, which are assigned when
/// the record is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub surname: String,
    /// City of residence.
    pub city: String,
    /// Role in the trust.
    pub role: MemberRole,
    /// Gender and marital status dependent fields.
    pub profile: MemberProfile,
    /// Age, if recorded.
    pub age: Option<String>,
    /// Education.
    pub education: String,
    /// Occupation.
    pub occupation: String,
    /// Annual income as entered.
    pub annual_income: String,
    /// Community.
    pub community: Community,
    /// Sub-caste within the community.
    pub sub_caste: String,
    /// One-time enrolment fee.
    pub registration_fee: u64,
}

impl NewMember {
    /// Build the flat record with empty histories.
    #[must_use]
    pub fn into_member(self, id: impl Into<String>, registration_date: impl Into<String>) -> Member {
        let mut member = Member {
            id: id.into(),
            first_name: self.first_name,
            surname: self.surname,
            gender: Gender::Male,
            marital_status: MaritalStatus::Unmarried,
            city: self.city,
            role: self.role,
            father_name: None,
            husband_name: None,
            use_husband_name_suffix: None,
            wife_name: None,
            age: self.age,
            education: self.education,
            occupation: self.occupation,
            annual_income: self.annual_income,
            spouse_education: None,
            spouse_occupation: None,
            spouse_income: None,
            community: self.community,
            sub_caste: self.sub_caste,
            registration_fee: self.registration_fee,
            registration_date: registration_date.into(),
            donations: Vec::new(),
            schemes: Vec::new(),
        };
        self.profile.apply_to(&mut member);
        member
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::tests::{married_female, sample_member};

    fn new_member(profile: MemberProfile) -> NewMember {
        NewMember {
            first_name: "Ramesh".to_string(),
            surname: "Patel".to_string(),
            city: "Rajkot".to_string(),
            role: MemberRole::President,
            profile,
            age: None,
            education: "B.Com".to_string(),
            occupation: "Business".to_string(),
            annual_income: "500000".to_string(),
            community: Community::Patel,
            sub_caste: "leuva".to_string(),
            registration_fee: 34000,
        }
    }

    #[test]
    fn test_of_unmarried() {
        let profile = MemberProfile::of(&sample_member("2190")).unwrap();
        assert_eq!(
            profile,
            MemberProfile::Unmarried(UnmarriedProfile {
                gender: Gender::Male,
                father_name: Some("Yusufbhai".to_string()),
            })
        );
        assert_eq!(profile.marital_status(), MaritalStatus::Unmarried);
    }

    #[test]
    fn test_of_married_female() {
        let profile = MemberProfile::of(&married_female("3321")).unwrap();
        match profile {
            MemberProfile::MarriedFemale(p) => {
                assert_eq!(p.husband_name.as_deref(), Some("Riyazbhai"));
                assert_eq!(p.use_husband_name_suffix, Some(true));
                assert_eq!(p.spouse.education.as_deref(), Some("MBA"));
            }
            other => panic!("unexpected profile: {other:?}"),
        }
    }

    #[test]
    fn test_of_rejects_father_name_when_married() {
        let mut member = married_female("3321");
        member.father_name = Some("Someone".to_string());
        let err = MemberProfile::of(&member).unwrap_err();
        assert!(err.to_string().contains("fatherName"));
    }

    #[test]
    fn test_of_rejects_spouse_details_when_unmarried() {
        let mut member = sample_member("2190");
        member.spouse_income = Some("0".to_string());
        let err = MemberProfile::of(&member).unwrap_err();
        assert!(err.to_string().contains("spouseIncome"));
    }

    #[test]
    fn test_of_rejects_husband_name_for_married_male() {
        let mut member = sample_member("2190");
        member.marital_status = MaritalStatus::Married;
        member.father_name = None;
        member.husband_name = Some("Someone".to_string());
        let err = MemberProfile::of(&member).unwrap_err();
        assert!(err.to_string().contains("husbandName"));
    }

    #[test]
    fn test_apply_to_clears_foreign_fields() {
        let mut member = sample_member("2190");
        MemberProfile::MarriedMale(MarriedMaleProfile {
            wife_name: Some("Surekhaben".to_string()),
            spouse: SpouseDetails {
                education: Some("12th".to_string()),
                occupation: Some("Housewife".to_string()),
                income: Some("0".to_string()),
            },
        })
        .apply_to(&mut member);

        assert_eq!(member.marital_status, MaritalStatus::Married);
        assert_eq!(member.gender, Gender::Male);
        assert!(member.father_name.is_none());
        assert_eq!(member.wife_name.as_deref(), Some("Surekhaben"));
        assert!(member.validate().is_ok());
    }

    #[test]
    fn test_profile_round_trip_through_flat_record() {
        let original = married_female("3321");
        let profile = MemberProfile::of(&original).unwrap();

        let mut rebuilt = sample_member("3321");
        rebuilt.first_name = original.first_name.clone();
        rebuilt.surname = original.surname.clone();
        profile.apply_to(&mut rebuilt);

        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_new_member_into_member() {
        let member = new_member(MemberProfile::MarriedMale(MarriedMaleProfile {
            wife_name: Some("Surekhaben".to_string()),
            spouse: SpouseDetails::default(),
        }))
        .into_member("4092", "2023-01-15");

        assert_eq!(member.id, "4092");
        assert_eq!(member.registration_date, "2023-01-15");
        assert_eq!(member.gender, Gender::Male);
        assert_eq!(member.marital_status, MaritalStatus::Married);
        assert!(member.donations.is_empty());
        assert!(member.schemes.is_empty());
        assert!(member.validate().is_ok());
    }

    #[test]
    fn test_new_unmarried_female() {
        let member = new_member(MemberProfile::Unmarried(UnmarriedProfile {
            gender: Gender::Female,
            father_name: Some("Hasanbhai".to_string()),
        }))
        .into_member("1234", "2024-06-01");

        assert_eq!(member.gender, Gender::Female);
        assert_eq!(member.marital_status, MaritalStatus::Unmarried);
        assert_eq!(member.father_name.as_deref(), Some("Hasanbhai"));
        assert!(member.husband_name.is_none());
    }
}
