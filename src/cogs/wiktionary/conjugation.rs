//! Greek verb conjugation tables from el.wiktionary.org.
//!
//! Most verbs carry one `div.NavFrame` per voice. Each frame is a table made
//! of 8-row blocks:
//!
//! ```text
//! (1) tense category        e.g. Εξακολουθητικοί χρόνοι
//! (1) πρόσωπα | tenses...   e.g. Ενεστώτας, Παρατατικός
//! (6) pronoun | forms...
//! ```
//!
//! Defective verbs (`ξέρω`, `είμαι`) use a plain 7-row table instead.

use scraper::{ElementRef, Html};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::WiktionaryQuery;
use crate::embed::Embed;
use crate::error::RabotError;
use crate::fetch::Fetcher;
use crate::html::{
    cell_text, document_elements, elements, find, find_all, find_by_id, has_class, is_tag,
    link_titles, raw_text, text,
};
use crate::pagination::compute_total_pages;
use crate::text::Language;

pub const VERB_VOICES: [&str; 2] = ["Ενεργητική φωνή", "Παθητική φωνή"];

const RELEVANT_TENSES: &[&str] = &["Ενεστώτας", "Παρατατικός", "Αόριστος", "Συνοπτ. Μέλλ."];
const DEFECTIVE_TENSES: &[&str] = &["Ενεστώτας", "Παρατατικός"];

/// The first two blocks hold every tense we show.
const MAX_ROWS: usize = 16;
const BLOCK_ROWS: usize = 8;
const DEFECTIVE_ROWS: usize = 7;
const TENSES_PER_PAGE: usize = 1;

/// "see the word" and "other form" pointers to the canonical lemma.
const DEITE: [&str; 2] = ["→ δείτε τη λέξη", "→\u{a0}δείτε\u{a0}τη\u{a0}λέξη"];
const OTHER_FORM: &str = "άλλη μορφή";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenseForms {
    pub tense: String,
    pub forms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceConjugation {
    pub voice: String,
    pub tenses: Vec<TenseForms>,
}

/// Voices in page order, each with its tenses in page order.
pub type Conjugation = Vec<VoiceConjugation>;

enum Parsed {
    Found(Conjugation),
    Suggestions(Vec<String>),
}

/// Conjugation of `word`, following "see also" links when the page itself
/// has none. `Ok(None)` when nothing was found.
pub async fn fetch_conjugation(fetcher: &Fetcher, word: &str) -> Result<Option<Conjugation>, RabotError> {
    let word = word.trim();
    let result = fetch_with_suggestions(fetcher, word).await?;
    match &result {
        Some(_) => info!(%word, "fetched conjugation"),
        None => warn!(%word, "failed fetching conjugation"),
    }
    Ok(result)
}

async fn fetch_with_suggestions(fetcher: &Fetcher, word: &str) -> Result<Option<Conjugation>, RabotError> {
    let Some(query) = fetch_page(fetcher, word).await? else {
        return Ok(None);
    };

    let suggestions = match parse_query(&query, true)? {
        Parsed::Found(conjugation) => return Ok(Some(conjugation)),
        Parsed::Suggestions(suggestions) => suggestions,
    };
    debug!(%word, count = suggestions.len(), "trying suggestions");

    for suggestion in suggestions {
        let Some(query) = fetch_page(fetcher, &suggestion).await? else {
            continue;
        };
        if let Parsed::Found(conjugation) = parse_query(&query, false)? {
            debug!(%word, %suggestion, "suggestion has a conjugation");
            return Ok(Some(conjugation));
        }
    }
    Ok(None)
}

async fn fetch_page(fetcher: &Fetcher, word: &str) -> Result<Option<WiktionaryQuery>, RabotError> {
    match WiktionaryQuery::fetch(fetcher, word, Language::Greek).await {
        Ok(query) => Ok(Some(query)),
        Err(e) if e.is_not_found() => {
            debug!(%word, "no wiktionary page");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn parse_query(query: &WiktionaryQuery, with_suggestions: bool) -> Result<Parsed, RabotError> {
    let doc = query.document();
    if let Some(conjugation) = parse_conjugation(&doc, &query.word)? {
        return Ok(Parsed::Found(conjugation));
    }
    let suggestions = if with_suggestions { parse_suggestions(&doc, &query.word) } else { Vec::new() };
    Ok(Parsed::Suggestions(suggestions))
}

/// Parse the conjugation table of a page. `Ok(None)` when the page has none;
/// `Err` when the table does not have the expected shape.
pub fn parse_conjugation(doc: &Html, word: &str) -> Result<Option<Conjugation>, RabotError> {
    debug!(%word, "parsing conjugation");

    // The header alone does not guarantee a usable table (βρέχω).
    if find_by_id(doc, &["h4"], "Κλίση").is_none() {
        debug!(%word, "no conjugation header");
        return Ok(None);
    }

    match parse_table_one(doc)? {
        Some(conjugation) if !conjugation.is_empty() => Ok(Some(conjugation)),
        _ => parse_table_two(doc),
    }
}

/// Non-empty `th` / `td` texts of a table row.
fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    elements(row)
        .filter(|el| is_tag(el, "th") || is_tag(el, "td"))
        .map(cell_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Columns of `rows`, truncated to the shortest row.
fn transpose(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let width = rows.iter().map(Vec::len).min().unwrap_or(0);
    (0..width).map(|col| rows.iter().map(|row| row[col].clone()).collect()).collect()
}

fn parse_table_one(doc: &Html) -> Result<Option<Conjugation>, RabotError> {
    let frames: Vec<ElementRef<'_>> = document_elements(doc)
        .filter(|el| is_tag(el, "div") && has_class(el, "NavFrame"))
        .collect();
    debug!(count = frames.len(), "nav frames");

    let mut voices: Vec<(String, Vec<Vec<String>>)> = Vec::new();
    for frame in frames {
        let Some(head) = find(frame, "div", Some("NavHead")) else {
            continue;
        };
        let title = text(head);
        // Translation boxes use NavFrames too.
        if !VERB_VOICES.contains(&title.as_str()) {
            continue;
        }

        // Extra rows past the first two blocks are ignored (περπατάω).
        let rows: Vec<Vec<String>> = find(frame, "div", Some("NavContent"))
            .map(|content| {
                find_all(content, "tr", None).into_iter().take(MAX_ROWS).map(row_cells).collect()
            })
            .unwrap_or_default();
        voices.push((title, rows));
    }

    if voices.is_empty() {
        debug!("no nav frame holds a verb voice");
        return Ok(None);
    }

    let mut conjugation = Vec::new();
    for (voice, rows) in voices {
        if rows.len() % BLOCK_ROWS != 0 {
            return Err(RabotError::Parse(format!(
                "conjugation table of {voice} has {} rows, not a multiple of {BLOCK_ROWS}",
                rows.len()
            )));
        }

        let mut tenses = Vec::new();
        for block in rows.chunks(BLOCK_ROWS) {
            // block[0] is the tense category.
            for column in transpose(&block[1..]) {
                let Some((tense, forms)) = column.split_first() else {
                    continue;
                };
                if RELEVANT_TENSES.contains(&tense.as_str()) {
                    tenses.push(TenseForms { tense: tense.clone(), forms: forms.to_vec() });
                }
            }
        }
        if tenses.is_empty() {
            debug!(%voice, "voice has no relevant tenses");
            continue;
        }
        conjugation.push(VoiceConjugation { voice, tenses });
    }

    if conjugation.is_empty() {
        return Ok(None);
    }
    Ok(Some(conjugation))
}

fn parse_table_two(doc: &Html) -> Result<Option<Conjugation>, RabotError> {
    debug!("trying the defective verb table");

    let main = document_elements(doc)
        .find(|el| is_tag(el, "div") && has_class(el, "mw-content-ltr") && has_class(el, "mw-parser-output"))
        .ok_or_else(|| RabotError::Parse("page has no main content".into()))?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for table in find_all(main, "table", None) {
        let table_rows = find_all(table, "tr", None);
        if table_rows.len() != DEFECTIVE_ROWS {
            continue;
        }
        rows.extend(table_rows.into_iter().map(row_cells).filter(|r| !r.is_empty()));
    }

    if rows.is_empty() {
        debug!("no table holds verb information");
        return Ok(None);
    }
    // Two matching tables would mix unrelated rows.
    if rows.len() != DEFECTIVE_ROWS {
        return Err(RabotError::Parse(format!(
            "expected {DEFECTIVE_ROWS} conjugation rows, got {}",
            rows.len()
        )));
    }

    let columns = transpose(&rows);
    let tenses: Vec<TenseForms> = DEFECTIVE_TENSES
        .iter()
        .filter_map(|wanted| {
            columns.iter().find(|col| col.first().is_some_and(|t| t.as_str() == *wanted)).map(|col| TenseForms {
                tense: wanted.to_string(),
                forms: col[1..].to_vec(),
            })
        })
        .collect();

    if tenses.is_empty() {
        return Ok(None);
    }
    Ok(Some(vec![VoiceConjugation { voice: VERB_VOICES[0].to_string(), tenses }]))
}

/// Lemmas the page points to: "→ δείτε τη λέξη" (αγαπώ) and "άλλη μορφή"
/// (περπατώ) links. First-seen order, `word` excluded.
pub fn parse_suggestions(doc: &Html, word: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    // "See the word" pointers sit in the conjugation box, or in any list
    // item (βρίσκομαι).
    let deite = document_elements(doc)
        .filter(|el| (is_tag(el, "div") && has_class(el, "NavContent")) || is_tag(el, "li"))
        .filter(|el| {
            let t = raw_text(*el);
            DEITE.iter().any(|d| t.contains(d))
        });
    for el in deite {
        found.extend(link_titles(el));
    }

    let other_forms = document_elements(doc)
        .filter(|el| is_tag(el, "li") && raw_text(*el).contains(OTHER_FORM));
    for el in other_forms {
        found.extend(link_titles(el));
    }

    if found.is_empty() {
        warn!(%word, "found no suggestions");
    }

    let mut suggestions: Vec<String> = Vec::new();
    for s in found {
        if s != word && !suggestions.contains(&s) {
            suggestions.push(s);
        }
    }
    suggestions
}

/// One page per voice and tense:
/// `Ενεργητική\nΕνεστώτας\n\nαγαπάω\nαγαπάς...`.
pub fn conjugation_pages(word: &str, url: &str, conjugation: &Conjugation) -> Vec<Embed> {
    let tenses: Vec<String> = conjugation
        .iter()
        .flat_map(|voice| {
            let label = voice.voice.replace(" φωνή", "");
            voice
                .tenses
                .iter()
                .map(move |t| format!("{label}\n{}\n\n{}", t.tense, t.forms.join("\n")))
        })
        .collect();

    paged_descriptions(&tenses, TENSES_PER_PAGE)
        .into_iter()
        .enumerate()
        .map(|(idx, (description, total))| {
            Embed::new(word)
                .url(url)
                .description(description)
                .footer(format!("Page {} from {total}", idx + 1))
        })
        .collect()
}

/// `items` grouped `per_page` at a time, each group with the page count.
fn paged_descriptions(items: &[String], per_page: usize) -> Vec<(String, usize)> {
    let total = compute_total_pages(items.len(), per_page);
    if total == 0 {
        return Vec::new();
    }
    items.chunks(per_page).map(|chunk| (chunk.join("\n\n"), total)).collect()
}
