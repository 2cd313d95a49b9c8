use super::{Field, FieldLayout};
use crate::error::ValidationError;
use crate::model::{format_date, FormRecord};
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// A piece of text and where to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedField {
    pub field: Field,
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Everything printed on one day's slip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub date: NaiveDate,
    pub fields: Vec<PositionedField>,
}

impl Page {
    /// Text placed for `field`, if the page has it. Address lines past the
    /// end of a short address are absent.
    pub fn text(&self, field: Field) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.text.as_str())
    }

    pub fn address_lines(&self) -> Vec<&str> {
        Field::ADDRESS_LINES
            .iter()
            .filter_map(|field| self.text(*field))
            .collect()
    }
}

/// Turns records into positioned text using a fixed [`FieldLayout`].
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    layout: FieldLayout,
}

impl LayoutEngine {
    pub fn new(layout: FieldLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Lay out `num_days` consecutive daily pages starting at `record.date`.
    ///
    /// All checks run before the first page is built, so an error means no
    /// output at all.
    pub fn render_pages(
        &self,
        record: &FormRecord,
        num_days: u32,
    ) -> Result<Vec<Page>, ValidationError> {
        record.validate_dates()?;
        if num_days == 0 {
            return Err(ValidationError::EmptyStay);
        }

        let last_day = record
            .date
            .checked_add_days(Days::new(u64::from(num_days) - 1))
            .ok_or(ValidationError::DateOutOfRange {
                start: record.date,
                days: num_days,
            })?;

        tracing::debug!(name = %record.name, num_days, %last_day, "laying out admission slip");
        Ok(record
            .date
            .iter_days()
            .take_while(|date| *date <= last_day)
            .map(|date| self.page_for(record, date))
            .collect())
    }

    /// Single page for `record.date`.
    pub fn render_page(&self, record: &FormRecord) -> Result<Page, ValidationError> {
        record.validate_dates()?;
        Ok(self.page_for(record, record.date))
    }

    fn page_for(&self, record: &FormRecord, date: NaiveDate) -> Page {
        let day_of_admission = day_count(date, record.date_of_admission);
        let age = day_count(date, record.date_of_birth);

        let mut fields = vec![
            self.place(Field::Name, self.name_text(record)),
            self.place(
                Field::Diagnosis,
                truncate(&record.diagnosis, self.layout.diagnosis.max_chars).to_string(),
            ),
            self.place(Field::Date, format_date(date)),
            self.place(Field::DateOfBirth, format_date(record.date_of_birth)),
            self.place(Field::DateOfAdmission, format_date(record.date_of_admission)),
            self.place(Field::DayOfAdmission, format!("DAY {}", day_of_admission)),
            self.place(Field::Age, age_text(age)),
        ];

        let capacities = self.layout.address.map(|spec| spec.max_chars);
        let lines = wrap_address(&record.address, &capacities);
        fields.extend(
            Field::ADDRESS_LINES
                .iter()
                .zip(lines)
                .map(|(field, line)| self.place(*field, line.to_string())),
        );

        Page { date, fields }
    }

    fn name_text(&self, record: &FormRecord) -> String {
        let name = truncate(&record.name, self.layout.name.max_chars);
        match record.gender {
            Some(gender) => format!("{} /{}", name, gender.code()),
            None => name.to_string(),
        }
    }

    fn place(&self, field: Field, text: String) -> PositionedField {
        let spec = self.layout.spec(field);
        PositionedField {
            field,
            text,
            x: spec.x,
            y: spec.y,
        }
    }
}

/// Inclusive count of calendar days from `since` to `on`: the same day is day 1.
fn day_count(on: NaiveDate, since: NaiveDate) -> i64 {
    on.signed_duration_since(since).num_days() + 1
}

fn age_text(age: i64) -> String {
    if age == 1 {
        format!("{} DAY", age)
    } else {
        format!("{} DAYS", age)
    }
}

/// Hard cut to at most `max_chars` characters. No ellipsis.
pub fn truncate(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Greedily pack `address` into consecutive slots of the given capacities.
///
/// Stops as soon as the rest of the address fits the current slot; whatever
/// does not fit the last slot is dropped.
pub fn wrap_address<'a>(address: &'a str, capacities: &[usize]) -> Vec<&'a str> {
    let mut lines = Vec::with_capacity(capacities.len());
    let mut remaining = address;

    for &capacity in capacities {
        let line = truncate(remaining, capacity);
        lines.push(line);
        if remaining.len() <= line.len() {
            break;
        }
        remaining = &remaining[line.len()..];
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Gender;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> FormRecord {
        FormRecord::new(
            "Baby of Sunita Devi",
            "Ward 4, Civil Lines, Sitapur",
            "Neonatal jaundice",
            ymd(2024, 2, 28),
            ymd(2024, 2, 27),
            ymd(2024, 2, 27),
        )
    }

    #[test]
    fn test_single_page_fields() {
        let engine = LayoutEngine::default();
        let pages = engine.render_pages(&sample(), 1).unwrap();
        assert_eq!(pages.len(), 1);

        let page = &pages[0];
        assert_eq!(page.text(Field::Name), Some("Baby of Sunita Devi"));
        assert_eq!(page.text(Field::Date), Some("28/02/2024"));
        assert_eq!(page.text(Field::DateOfAdmission), Some("27/02/2024"));
        assert_eq!(page.text(Field::DateOfBirth), Some("27/02/2024"));
        assert_eq!(page.text(Field::DayOfAdmission), Some("DAY 2"));
        assert_eq!(page.text(Field::Age), Some("2 DAYS"));
        assert_eq!(page.address_lines(), vec!["Ward 4, Civil Lines, Sitapur"]);
    }

    #[test]
    fn test_fields_carry_table_coordinates() {
        let engine = LayoutEngine::default();
        let page = engine.render_page(&sample()).unwrap();
        for placed in &page.fields {
            let spec = engine.layout().spec(placed.field);
            assert_eq!((placed.x, placed.y), (spec.x, spec.y));
        }
    }

    #[test]
    fn test_age_singular_on_day_of_birth() {
        let mut record = sample();
        record.date = record.date_of_birth;
        record.date_of_admission = record.date_of_birth;
        let page = LayoutEngine::default().render_page(&record).unwrap();
        assert_eq!(page.text(Field::Age), Some("1 DAY"));
        assert_eq!(page.text(Field::DayOfAdmission), Some("DAY 1"));
    }

    #[test]
    fn test_pages_advance_one_day_across_month_end() {
        let engine = LayoutEngine::default();
        // 2024 is a leap year: 28 Feb -> 29 Feb -> 1 Mar.
        let pages = engine.render_pages(&sample(), 3).unwrap();
        let dates: Vec<_> = pages.iter().map(|p| p.text(Field::Date).unwrap()).collect();
        assert_eq!(dates, vec!["28/02/2024", "29/02/2024", "01/03/2024"]);

        let days: Vec<_> = pages
            .iter()
            .map(|p| p.text(Field::DayOfAdmission).unwrap())
            .collect();
        assert_eq!(days, vec!["DAY 2", "DAY 3", "DAY 4"]);

        // Dates of birth and admission never move.
        for page in &pages {
            assert_eq!(page.text(Field::DateOfBirth), Some("27/02/2024"));
            assert_eq!(page.text(Field::DateOfAdmission), Some("27/02/2024"));
        }
    }

    #[test]
    fn test_validation_runs_for_single_day() {
        let mut record = sample();
        record.date_of_admission = ymd(2024, 3, 1);
        let err = LayoutEngine::default().render_pages(&record, 1).unwrap_err();
        assert!(matches!(err, ValidationError::DateBeforeAdmission { .. }));
    }

    #[test]
    fn test_zero_days_is_rejected() {
        let err = LayoutEngine::default()
            .render_pages(&sample(), 0)
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyStay);
    }

    #[test]
    fn test_stay_past_calendar_end_is_rejected() {
        let mut record = sample();
        record.date = NaiveDate::MAX;
        let engine = LayoutEngine::default();
        assert!(engine.render_pages(&record, 1).is_ok());
        assert!(matches!(
            engine.render_pages(&record, 2),
            Err(ValidationError::DateOutOfRange { days: 2, .. })
        ));
    }

    #[test]
    fn test_huge_stay_is_rejected_up_front() {
        let started = std::time::Instant::now();
        let err = LayoutEngine::default()
            .render_pages(&sample(), u32::MAX)
            .unwrap_err();
        assert!(matches!(err, ValidationError::DateOutOfRange { days: u32::MAX, .. }));
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_name_truncated_without_marker() {
        let layout = FieldLayout::default().with_max_chars(Field::Name, 10);
        let mut record = sample();
        record.name = "Abcdefghijklmnop".to_string();
        let page = LayoutEngine::new(layout).render_page(&record).unwrap();
        assert_eq!(page.text(Field::Name), Some("Abcdefghij"));
    }

    #[test]
    fn test_gender_suffix_follows_truncated_name() {
        let layout = FieldLayout::default().with_max_chars(Field::Name, 4);
        let record = sample().with_gender(Gender::Female);
        let page = LayoutEngine::new(layout).render_page(&record).unwrap();
        assert_eq!(page.text(Field::Name), Some("Baby /F"));
    }

    #[test]
    fn test_diagnosis_truncated() {
        let layout = FieldLayout::default().with_max_chars(Field::Diagnosis, 8);
        let page = LayoutEngine::new(layout).render_page(&sample()).unwrap();
        assert_eq!(page.text(Field::Diagnosis), Some("Neonatal"));
    }

    #[test]
    fn test_dates_are_never_truncated() {
        let layout = FieldLayout::default().with_max_chars(Field::Date, 2);
        let page = LayoutEngine::new(layout).render_page(&sample()).unwrap();
        assert_eq!(page.text(Field::Date), Some("28/02/2024"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("नमस्ते", 2), "नम");
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("", 5), "");
    }

    #[test]
    fn test_wrap_address_three_lines_drops_overflow() {
        let lines = wrap_address("1234567890123456", &[5, 5, 5]);
        assert_eq!(lines, vec!["12345", "67890", "12345"]);
    }

    #[test]
    fn test_wrap_address_stops_when_rest_fits() {
        assert_eq!(wrap_address("12345678", &[5, 5, 5]), vec!["12345", "678"]);
        assert_eq!(wrap_address("1234567890", &[5, 5, 5]), vec!["12345", "67890"]);
        assert_eq!(wrap_address("123", &[5, 5, 5]), vec!["123"]);
    }

    #[test]
    fn test_wrap_empty_address_places_one_empty_line() {
        assert_eq!(wrap_address("", &[5, 5, 5]), vec![""]);
    }

    #[test]
    fn test_wrap_uses_each_slot_capacity() {
        let lines = wrap_address("aaaabbbbbbcc", &[4, 6, 10]);
        assert_eq!(lines, vec!["aaaa", "bbbbbb", "cc"]);
    }

    #[test]
    fn test_address_lines_use_their_own_slots() {
        let layout = FieldLayout::default()
            .with_max_chars(Field::Address1, 5)
            .with_max_chars(Field::Address2, 5)
            .with_max_chars(Field::Address3, 5);
        let mut record = sample();
        record.address = "1234567890123456".to_string();
        let page = LayoutEngine::new(layout.clone()).render_page(&record).unwrap();
        assert_eq!(page.address_lines(), vec!["12345", "67890", "12345"]);

        let third = page
            .fields
            .iter()
            .find(|f| f.field == Field::Address3)
            .unwrap();
        assert_eq!(third.y, layout.address[2].y);
    }

    fn offset(base: NaiveDate, days: i64) -> NaiveDate {
        base + chrono::Duration::days(days)
    }

    proptest! {
        #[test]
        fn prop_out_of_order_dates_never_render(
            birth in 0i64..2000,
            admission in 0i64..2000,
            date in 0i64..2000,
            num_days in 1u32..10,
        ) {
            prop_assume!(!(birth <= admission && admission <= date));
            let base = ymd(2000, 1, 1);
            let mut record = sample();
            record.date_of_birth = offset(base, birth);
            record.date_of_admission = offset(base, admission);
            record.date = offset(base, date);
            prop_assert!(LayoutEngine::default().render_pages(&record, num_days).is_err());
        }

        #[test]
        fn prop_pages_progress_by_one_day(
            to_admission in 0i64..500,
            to_date in 0i64..500,
            num_days in 1u32..40,
        ) {
            let birth = ymd(2020, 6, 15);
            let mut record = sample();
            record.date_of_birth = birth;
            record.date_of_admission = offset(birth, to_admission);
            record.date = offset(record.date_of_admission, to_date);

            let pages = LayoutEngine::default().render_pages(&record, num_days).unwrap();
            prop_assert_eq!(pages.len(), num_days as usize);

            for (i, page) in pages.iter().enumerate() {
                let expected = offset(record.date, i as i64);
                prop_assert_eq!(page.date, expected);
                prop_assert_eq!(page.text(Field::Date).unwrap(), format_date(expected));

                let day = format!("DAY {}", to_date + i as i64 + 1);
                prop_assert_eq!(page.text(Field::DayOfAdmission).unwrap(), day.as_str());

                let age = to_admission + to_date + i as i64 + 1;
                prop_assert_eq!(page.text(Field::Age).unwrap(), age_text(age));
            }
        }

        #[test]
        fn prop_wrapped_lines_are_a_prefix_of_the_address(
            address in "[a-z0-9 ,]{0,60}",
            caps in proptest::array::uniform3(0usize..20),
        ) {
            let lines = wrap_address(&address, &caps);
            prop_assert!(!lines.is_empty() && lines.len() <= 3);
            for (line, cap) in lines.iter().zip(caps.iter()) {
                prop_assert!(line.chars().count() <= *cap);
            }
            let joined: String = lines.concat();
            prop_assert!(address.starts_with(&joined));
            if address.chars().count() <= caps.iter().sum::<usize>() && caps.iter().all(|c| *c > 0) {
                prop_assert_eq!(joined, address);
            }
        }
    }
}
