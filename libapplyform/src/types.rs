//! Core types for Applyform

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One completed application submission
///
/// Field order here is the column order of the CSV export and the key order
/// of the persisted JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationRecord {
    /// ISO-8601 UTC timestamp taken when the record was built
    pub submitted_at: String,
    pub work_area: String,
    pub role1: String,
    pub role2: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    /// ISO date (YYYY-MM-DD)
    pub dob: String,
    /// Whole years derived from `dob`, or empty
    pub age: String,
    pub start_date: String,
    pub expected_salary: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub military: String,
    pub nationality: String,
    pub tattoo: String,
    pub driver_license: String,
    /// File name of the attached resume; the content is never stored
    pub resume_name: String,
}

impl ApplicationRecord {
    /// Key/value pairs in column order, using the persisted key names
    pub fn fields(&self) -> [(&'static str, &str); 19] {
        [
            ("submittedAt", self.submitted_at.as_str()),
            ("workArea", self.work_area.as_str()),
            ("role1", self.role1.as_str()),
            ("role2", self.role2.as_str()),
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("nickname", self.nickname.as_str()),
            ("dob", self.dob.as_str()),
            ("age", self.age.as_str()),
            ("startDate", self.start_date.as_str()),
            ("expectedSalary", self.expected_salary.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("address", self.address.as_str()),
            ("military", self.military.as_str()),
            ("nationality", self.nationality.as_str()),
            ("tattoo", self.tattoo.as_str()),
            ("driverLicense", self.driver_license.as_str()),
            ("resumeName", self.resume_name.as_str()),
        ]
    }
}

/// A flat row: ordered keys with optional string values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlatRecord(Vec<(String, Option<String>)>);

impl FlatRecord {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a column. Later duplicates of an existing key are ignored by `get`.
    pub fn push(&mut self, key: impl Into<String>, value: Option<String>) {
        self.0.push((key.into(), value));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Value for `key`; `None` when the key is missing or the value is null
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<&ApplicationRecord> for FlatRecord {
    fn from(record: &ApplicationRecord) -> Self {
        let mut flat = FlatRecord::new();
        for (key, value) in record.fields() {
            flat.push(key, Some(value.to_string()));
        }
        flat
    }
}

/// Identifier of an input element on the application form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    WorkArea,
    Role1,
    Role2,
    FirstName,
    LastName,
    Nickname,
    Dob,
    Age,
    StartDate,
    ExpectedSalary,
    Email,
    Phone,
    Address,
    Military,
    Nationality,
    Tattoo,
    DriverLicense,
    Resume,
}

impl FieldId {
    pub const ALL: [FieldId; 18] = [
        FieldId::WorkArea,
        FieldId::Role1,
        FieldId::Role2,
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Nickname,
        FieldId::Dob,
        FieldId::Age,
        FieldId::StartDate,
        FieldId::ExpectedSalary,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Address,
        FieldId::Military,
        FieldId::Nationality,
        FieldId::Tattoo,
        FieldId::DriverLicense,
        FieldId::Resume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::WorkArea => "workArea",
            FieldId::Role1 => "role1",
            FieldId::Role2 => "role2",
            FieldId::FirstName => "firstName",
            FieldId::LastName => "lastName",
            FieldId::Nickname => "nickname",
            FieldId::Dob => "dob",
            FieldId::Age => "age",
            FieldId::StartDate => "startDate",
            FieldId::ExpectedSalary => "expectedSalary",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Address => "address",
            FieldId::Military => "military",
            FieldId::Nationality => "nationality",
            FieldId::Tattoo => "tattoo",
            FieldId::DriverLicense => "driverLicense",
            FieldId::Resume => "resume",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown form field: '{}'", s))
    }
}
