//! CSV encoding of the record store.
//!
//! ```text
//! Name,Address,Diagnosis,Gender,Date,Date of Admission,Date of Birth
//! Baby of Sunita,"Ward 4, Sitapur",Jaundice,F,28/02/2024,27/02/2024,27/02/2024
//! ```
//!
//! Files written before gender was recorded have six columns (no `Gender`);
//! those rows load with no gender. The header row is skipped, never checked.

use crate::error::{StoreError, StoreResult};
use crate::model::{format_date, parse_date, FormRecord, Gender};
use csv::StringRecord;
use std::io::{Read, Write};

pub const HEADER: [&str; 7] = [
    "Name",
    "Address",
    "Diagnosis",
    "Gender",
    "Date",
    "Date of Admission",
    "Date of Birth",
];

const NAME: usize = 0;
const ADDRESS: usize = 1;
const DIAGNOSIS: usize = 2;
const GENDER: usize = 3;
const LEGACY_COLUMNS: usize = HEADER.len() - 1;

pub fn write_records<W: Write>(writer: W, records: &[FormRecord]) -> StoreResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;

    for record in records {
        let date = format_date(record.date);
        let admission = format_date(record.date_of_admission);
        let birth = format_date(record.date_of_birth);
        csv.write_record([
            record.name.as_str(),
            record.address.as_str(),
            record.diagnosis.as_str(),
            record.gender.map(Gender::code).unwrap_or(""),
            date.as_str(),
            admission.as_str(),
            birth.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Decode every row. The first malformed row aborts the whole read.
pub fn read_records<R: Read>(reader: R) -> StoreResult<Vec<FormRecord>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in csv.records().enumerate() {
        let row = row?;
        let line = row
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(i + 2);
        records.push(decode_row(&row, line)?);
    }
    Ok(records)
}

fn decode_row(row: &StringRecord, line: usize) -> StoreResult<FormRecord> {
    let (gender, first_date) = match row.len() {
        n if n == HEADER.len() => (decode_gender(&row[GENDER], line)?, GENDER + 1),
        LEGACY_COLUMNS => (None, GENDER),
        found => {
            return Err(StoreError::ColumnCount {
                row: line,
                expected: HEADER.len(),
                found,
            })
        }
    };

    Ok(FormRecord {
        name: row[NAME].to_string(),
        address: row[ADDRESS].to_string(),
        diagnosis: row[DIAGNOSIS].to_string(),
        gender,
        date: decode_date(row, first_date, "date", line)?,
        date_of_admission: decode_date(row, first_date + 1, "date of admission", line)?,
        date_of_birth: decode_date(row, first_date + 2, "date of birth", line)?,
    })
}

fn decode_gender(value: &str, line: usize) -> StoreResult<Option<Gender>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| StoreError::MalformedGender {
            row: line,
            value: value.to_string(),
        })
}

fn decode_date(
    row: &StringRecord,
    index: usize,
    column: &'static str,
    line: usize,
) -> StoreResult<chrono::NaiveDate> {
    let value = &row[index];
    parse_date(value).map_err(|source| StoreError::MalformedDate {
        row: line,
        column,
        value: value.to_string(),
        source,
    })
}
