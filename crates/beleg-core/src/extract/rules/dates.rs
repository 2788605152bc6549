//! Issue and due date extraction.
//!
//! Issue-date strategies run in a fixed order (labelled day-first date,
//! month-name date, bare day-first date, ISO date). Lines that talk about
//! payment deadlines are searched only after every strategy came up empty
//! on the remaining lines.

use chrono::NaiveDate;
use regex::Captures;

use super::patterns::{
    DATE_DMY, DATE_GERMAN_LONG, DATE_LABELLED_DMY, DATE_MONTH_NAME, DATE_YMD, DUE_DATE_LABEL,
    PAYMENT_DEADLINE,
};

type Strategy = fn(&str) -> Option<NaiveDate>;

const STRATEGIES: [Strategy; 4] = [labelled_dmy, month_name, day_month_year, year_month_day];

/// Parse the first date in `text`, trying the strategies in order.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    STRATEGIES.iter().find_map(|strategy| strategy(text))
}

/// Extract the document issue date.
pub fn extract_issue_date(lines: &[&str]) -> Option<NaiveDate> {
    // A label may sit on the line before its date.
    let joined = lines.join("\n");
    if let Some(found) = labelled_dmy(&joined) {
        return Some(found);
    }

    let (payment, regular): (Vec<&str>, Vec<&str>) = lines
        .iter()
        .copied()
        .partition(|line| PAYMENT_DEADLINE.is_match(line));

    first_date(&regular).or_else(|| first_date(&payment))
}

/// Extract a labelled payment due date.
pub fn extract_due_date(lines: &[&str]) -> Option<NaiveDate> {
    for (idx, line) in lines.iter().enumerate() {
        let Some(caps) = DUE_DATE_LABEL.captures(line) else {
            continue;
        };

        if let Some(found) = parse_date(&caps[1]) {
            return Some(found);
        }
        if let Some(found) = lines.get(idx + 1).and_then(|next| parse_date(next)) {
            return Some(found);
        }
    }

    None
}

fn first_date(lines: &[&str]) -> Option<NaiveDate> {
    STRATEGIES
        .iter()
        .find_map(|strategy| lines.iter().find_map(|line| strategy(line)))
}

fn labelled_dmy(text: &str) -> Option<NaiveDate> {
    DATE_LABELLED_DMY.captures_iter(text).find_map(|caps| day_first(&caps))
}

fn month_name(text: &str) -> Option<NaiveDate> {
    let english = DATE_MONTH_NAME.captures_iter(text).find_map(|caps| {
        let month = english_month_to_number(&caps[1]);
        build(&caps[3], month, &caps[2])
    });

    english.or_else(|| {
        DATE_GERMAN_LONG.captures_iter(text).find_map(|caps| {
            let month = german_month_to_number(&caps[2]);
            build(&caps[3], month, &caps[1])
        })
    })
}

fn day_month_year(text: &str) -> Option<NaiveDate> {
    DATE_DMY.captures_iter(text).find_map(|caps| day_first(&caps))
}

fn year_month_day(text: &str) -> Option<NaiveDate> {
    DATE_YMD.captures_iter(text).find_map(|caps| {
        let month: u32 = caps[2].parse().unwrap_or(0);
        build(&caps[1], month, &caps[3])
    })
}

fn day_first(caps: &Captures<'_>) -> Option<NaiveDate> {
    let month: u32 = caps[2].parse().unwrap_or(0);
    build(&caps[3], month, &caps[1])
}

fn build(year: &str, month: u32, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn english_month_to_number(month: &str) -> u32 {
    let lower = month.to_lowercase();
    match lower.get(..3).unwrap_or_default() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => 0,
    }
}

fn german_month_to_number(month: &str) -> u32 {
    match month.to_lowercase().as_str() {
        "januar" => 1,
        "februar" => 2,
        "märz" | "maerz" => 3,
        "april" => 4,
        "mai" => 5,
        "juni" => 6,
        "juli" => 7,
        "august" => 8,
        "september" => 9,
        "oktober" => 10,
        "november" => 11,
        "dezember" => 12,
        _ => 0,
    }
}
