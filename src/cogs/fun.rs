//! Small toys: Coptic transliteration and the Greek long date.

use chrono::{Datelike, Local, NaiveDate, Weekday};

use crate::text::remove_accents;

// https://www.suscopts.org/deacons/coptic/FT-Coptic%20Language-Lectures.pdf
const CHARS_GR: &str = "ΑαΒβΓγΔδΕεΖζΗηΘθΙιΚκΛλΜμΝνΞξΟοΠπΡρΣσςΤτΥυΦφΧχΨψΩω";
const CHARS_CO: &str = "ⲀⲁⲂⲃⲄⲅⲆⲇⲈⲉⲌⲍⲎⲏⲐⲑⲒⲓⲔⲕⲖⲗⲘⲙⲚⲛⲜⲝⲞⲟⲠⲡⲢⲣⲤⲥⲥⲦⲧⲨⲩⲪⲫⲬⲭⲮⲯⲰⲱ";

const MONTHS_GENITIVE: [&str; 12] = [
    "Ιανουαρίου",
    "Φεβρουαρίου",
    "Μαρτίου",
    "Απριλίου",
    "Μαΐου",
    "Ιουνίου",
    "Ιουλίου",
    "Αυγούστου",
    "Σεπτεμβρίου",
    "Οκτωβρίου",
    "Νοεμβρίου",
    "Δεκεμβρίου",
];

/// Greek letters mapped to their Coptic counterparts; everything else is kept.
pub fn to_coptic(text: &str, strip_accents: bool) -> String {
    let text = if strip_accents { remove_accents(text) } else { text.to_string() };
    text.chars()
        .map(|c| match CHARS_GR.chars().position(|g| g == c) {
            Some(idx) => CHARS_CO.chars().nth(idx).unwrap_or(c),
            None => c,
        })
        .collect()
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Δευτέρα",
        Weekday::Tue => "Τρίτη",
        Weekday::Wed => "Τετάρτη",
        Weekday::Thu => "Πέμπτη",
        Weekday::Fri => "Παρασκευή",
        Weekday::Sat => "Σάββατο",
        Weekday::Sun => "Κυριακή",
    }
}

/// `Κυριακή, 18 Οκτωβρίου 2026`.
pub fn full_date(date: NaiveDate) -> String {
    let month = MONTHS_GENITIVE[date.month0() as usize];
    format!("{}, {} {month} {}", weekday_name(date.weekday()), date.day(), date.year())
}

/// [`full_date`] of the local calendar day.
pub fn full_date_today() -> String {
    full_date(Local::now().date_naive())
}
