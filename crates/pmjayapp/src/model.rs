use crate::error::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format used both on the printed slip and in the backing file.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

/// Key used to compare patient names: surrounding whitespace and case are ignored.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Single-letter code printed on the slip and stored in the backing file.
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGender(pub String);

impl fmt::Display for UnknownGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown gender {:?} (expected M or F)", self.0)
    }
}

impl std::error::Error for UnknownGender {}

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            _ => Err(UnknownGender(s.to_string())),
        }
    }
}

/// One filled-in admission slip.
///
/// `date` is the day the (first) printed page represents. Date ordering is
/// only checked when the record is rendered, so any record can be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub name: String,
    pub address: String,
    pub diagnosis: String,
    pub gender: Option<Gender>,
    pub date: NaiveDate,
    pub date_of_admission: NaiveDate,
    pub date_of_birth: NaiveDate,
}

impl FormRecord {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        diagnosis: impl Into<String>,
        date: NaiveDate,
        date_of_admission: NaiveDate,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            diagnosis: diagnosis.into(),
            gender: None,
            date,
            date_of_admission,
            date_of_birth,
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Whether `other` names the same patient.
    pub fn same_patient(&self, other: &str) -> bool {
        normalize_name(&self.name) == normalize_name(other)
    }

    /// Checks `date_of_birth <= date_of_admission <= date`.
    pub fn validate_dates(&self) -> Result<(), ValidationError> {
        if self.date < self.date_of_admission {
            return Err(ValidationError::DateBeforeAdmission {
                date: self.date,
                admission: self.date_of_admission,
            });
        }
        if self.date < self.date_of_birth {
            return Err(ValidationError::DateBeforeBirth {
                date: self.date,
                birth: self.date_of_birth,
            });
        }
        if self.date_of_admission < self.date_of_birth {
            return Err(ValidationError::AdmissionBeforeBirth {
                admission: self.date_of_admission,
                birth: self.date_of_birth,
            });
        }
        Ok(())
    }
}
