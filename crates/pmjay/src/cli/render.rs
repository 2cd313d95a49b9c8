use colored::Colorize;
use pmjayapp::commands::{CmdMessage, CmdResult, MessageLevel};
use pmjayapp::error::{PmjayError, Result};
use pmjayapp::model::{format_date, FormRecord};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 28;
const DIAGNOSIS_WIDTH: usize = 30;
const DATE_WIDTH: usize = 10;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_json(result: &CmdResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| PmjayError::Api(format!("JSON output failed: {e}")))?;
    println!("{}", json);
    Ok(())
}

/// Records as an aligned table, one per line, with a header row.
pub fn render_records(records: &[FormRecord]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        return out;
    }

    out.push_str(&format!(
        "{}\n",
        format!(
            "{:>3}  {}  {:1}  {:<date$}  {:<date$}  {:<date$}  {}",
            "#",
            pad_to_width("Name", NAME_WIDTH),
            "G",
            "Date",
            "Admitted",
            "Born",
            "Diagnosis",
            date = DATE_WIDTH
        )
        .bold()
    ));

    for (i, record) in records.iter().enumerate() {
        let name = truncate_to_width(record.name.trim(), NAME_WIDTH);
        let gender = record.gender.map(|g| g.code()).unwrap_or("-");
        out.push_str(&format!(
            "{:>3}  {}  {:1}  {}  {}  {}  {}\n",
            format!("{}.", i + 1).yellow(),
            pad_to_width(&name, NAME_WIDTH),
            gender,
            format_date(record.date),
            format_date(record.date_of_admission).dimmed(),
            format_date(record.date_of_birth).dimmed(),
            truncate_to_width(&record.diagnosis, DIAGNOSIS_WIDTH),
        ));
    }
    out
}

pub fn print_records(records: &[FormRecord]) {
    print!("{}", render_records(records));
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
