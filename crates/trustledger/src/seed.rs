//! Members a fresh registry starts with.

use crate::member::{Community, Gender, MaritalStatus, Member, MemberRole};

/// The seed members used when no snapshot has been saved yet.
#[must_use]
pub fn initial_members() -> Vec<Member> {
    vec![
        Member {
            id: "4092".to_string(),
            first_name: "રમેશભાઈ".to_string(),
            surname: "પટેલ".to_string(),
            gender: Gender::Male,
            marital_status: MaritalStatus::Married,
            city: "રાજકોટ".to_string(),
            role: MemberRole::President,
            father_name: None,
            husband_name: None,
            use_husband_name_suffix: None,
            wife_name: Some("સુરેખાબેન".to_string()),
            age: None,
            education: "B.Com".to_string(),
            occupation: "Business".to_string(),
            annual_income: "500000".to_string(),
            spouse_education: Some("12th".to_string()),
            spouse_occupation: Some("Housewife".to_string()),
            spouse_income: Some("0".to_string()),
            community: Community::Patel,
            sub_caste: "leuva".to_string(),
            registration_fee: 34000,
            registration_date: "2023-01-15".to_string(),
            donations: Vec::new(),
            schemes: Vec::new(),
        },
        Member {
            id: "2190".to_string(),
            first_name: "ઈમરાન".to_string(),
            surname: "પઠાન".to_string(),
            gender: Gender::Male,
            marital_status: MaritalStatus::Unmarried,
            city: "અમદાવાદ".to_string(),
            role: MemberRole::Member,
            father_name: Some("યુસુફભાઈ".to_string()),
            husband_name: None,
            use_husband_name_suffix: None,
            wife_name: None,
            age: Some("24".to_string()),
            education: "B.E. Civil".to_string(),
            occupation: "Engineer".to_string(),
            annual_income: "350000".to_string(),
            spouse_education: None,
            spouse_occupation: None,
            spouse_income: None,
            community: Community::Muslim,
            sub_caste: "pathan".to_string(),
            registration_fee: 9000,
            registration_date: "2023-02-20".to_string(),
            donations: Vec::new(),
            schemes: Vec::new(),
        },
        Member {
            id: "3321".to_string(),
            first_name: "આયશા".to_string(),
            surname: "શેખ".to_string(),
            gender: Gender::Female,
            marital_status: MaritalStatus::Married,
            city: "સુરત".to_string(),
            role: MemberRole::Member,
            father_name: None,
            husband_name: Some("રિયાઝભાઈ".to_string()),
            use_husband_name_suffix: Some(true),
            wife_name: None,
            age: Some("28".to_string()),
            education: "M.Com".to_string(),
            occupation: "Teacher".to_string(),
            annual_income: "250000".to_string(),
            spouse_education: Some("MBA".to_string()),
            spouse_occupation: Some("Manager".to_string()),
            spouse_income: Some("600000".to_string()),
            community: Community::Muslim,
            sub_caste: "sunni".to_string(),
            registration_fee: 9000,
            registration_date: "2023-05-10".to_string(),
            donations: Vec::new(),
            schemes: Vec::new(),
        },
    ]
}
