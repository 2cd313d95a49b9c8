//! # Field Layout
//!
//! The admission slip is a fixed form: every value lands at a fixed spot on the
//! page and may use at most a fixed number of characters. This module holds that
//! table ([`FieldLayout`]) and the engine that turns a [`FormRecord`] into
//! positioned text, one page per day of stay ([`engine::LayoutEngine`]).
//!
//! ## Coordinates
//!
//! All coordinates are millimetres on an A4 page (210 x 297), measured from the
//! top-left corner. `y` is the text baseline as printed on the template; the
//! renderer applies its own small baseline correction when stamping.
//!
//! ## Fields
//!
//! Fields are addressed by the [`Field`] enum. [`FieldLayout::spec`] is an
//! exhaustive match, so adding a field without a position does not compile.
//!
//! [`FormRecord`]: crate::model::FormRecord

use serde::{Deserialize, Serialize};

pub mod engine;

pub use engine::{LayoutEngine, Page, PositionedField};

/// Width of the gender marker appended to the name (` /M`).
pub const GENDER_SUFFIX_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Address1,
    Address2,
    Address3,
    Date,
    Age,
    DateOfBirth,
    DayOfAdmission,
    DateOfAdmission,
    Diagnosis,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Address1,
        Field::Address2,
        Field::Address3,
        Field::Date,
        Field::Age,
        Field::DateOfBirth,
        Field::DayOfAdmission,
        Field::DateOfAdmission,
        Field::Diagnosis,
    ];

    /// Address slots in fill order.
    pub const ADDRESS_LINES: [Field; 3] = [Field::Address1, Field::Address2, Field::Address3];
}

/// Placement and character budget of one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub x: f32,
    pub y: f32,
    pub max_chars: usize,
}

impl FieldSpec {
    pub const fn new(x: f32, y: f32, max_chars: usize) -> Self {
        Self { x, y, max_chars }
    }
}

/// The field position table of the slip.
///
/// Built once and handed to [`LayoutEngine::new`]; the default is the PMJAY
/// admission slip template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub name: FieldSpec,
    pub address: [FieldSpec; 3],
    pub date: FieldSpec,
    pub age: FieldSpec,
    pub date_of_birth: FieldSpec,
    pub day_of_admission: FieldSpec,
    pub date_of_admission: FieldSpec,
    pub diagnosis: FieldSpec,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            name: FieldSpec::new(25.24, 44.53, 41 - GENDER_SUFFIX_LEN),
            address: [
                FieldSpec::new(30.10, 53.54, 39),
                FieldSpec::new(12.43, 62.55, 47),
                FieldSpec::new(12.43, 71.56, 47),
            ],
            date: FieldSpec::new(136.83, 44.53, 25),
            age: FieldSpec::new(136.0, 53.54, 7),
            date_of_birth: FieldSpec::new(152.26, 62.55, 18),
            day_of_admission: FieldSpec::new(159.75, 71.56, 15),
            date_of_admission: FieldSpec::new(47.21, 80.57, 32),
            diagnosis: FieldSpec::new(32.93, 89.58, 70),
        }
    }
}

impl FieldLayout {
    pub fn spec(&self, field: Field) -> FieldSpec {
        match field {
            Field::Name => self.name,
            Field::Address1 => self.address[0],
            Field::Address2 => self.address[1],
            Field::Address3 => self.address[2],
            Field::Date => self.date,
            Field::Age => self.age,
            Field::DateOfBirth => self.date_of_birth,
            Field::DayOfAdmission => self.day_of_admission,
            Field::DateOfAdmission => self.date_of_admission,
            Field::Diagnosis => self.diagnosis,
        }
    }

    #[cfg(test)]
    fn spec_mut(&mut self, field: Field) -> &mut FieldSpec {
        match field {
            Field::Name => &mut self.name,
            Field::Address1 => &mut self.address[0],
            Field::Address2 => &mut self.address[1],
            Field::Address3 => &mut self.address[2],
            Field::Date => &mut self.date,
            Field::Age => &mut self.age,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::DayOfAdmission => &mut self.day_of_admission,
            Field::DateOfAdmission => &mut self.date_of_admission,
            Field::Diagnosis => &mut self.diagnosis,
        }
    }

    /// Replace only the character budget of one field.
    #[cfg(test)]
    pub(crate) fn with_max_chars(mut self, field: Field, max_chars: usize) -> Self {
        self.spec_mut(field).max_chars = max_chars;
        self
    }

    /// Total characters the three address lines can hold. Anything past this
    /// is dropped from the slip.
    pub fn address_capacity(&self) -> usize {
        self.address.iter().map(|spec| spec.max_chars).sum()
    }
}
