//! WordReference result-page parsing.
//!
//! A `table.WRD` lists translations as runs of rows sharing the same `odd` /
//! `even` class:
//!
//! ```text
//! | Row 1 | tr.odd  |  entry 1
//! | Row 2 | tr.odd  |
//! | Row 3 | tr.even |  entry 2
//! | Row 4 | tr.odd  |  entry 3
//! | Row 5 | tr.odd  |
//! | Row 6 | tr.even |  entry 4
//! ```
//!
//! Each run becomes one [`DictEntryItem`].

use scraper::{ElementRef, Html, Node};
use serde::Serialize;

use crate::html::{find, find_all, has_class, is_tag, raw_text, text};
use crate::text::is_english;

/// Greek part-of-speech abbreviations WordReference appends to headwords.
/// cf. https://www.wordreference.com/english/abbreviationsWRD.aspx?dict=engr
const ATTRIBUTES_EL: &[&str] = &[
    "επίθ άκλ",
    "επίθ",
    "φρ ως",
    "ουσ ουδ",
    "ουσ αρσ",
    "ουσ θηλ",
    "ρ έκφρ",
    "ρ αμ + επίρ",
    "ρ αμ",
    "ρ μ + πρόθ",
    "ρ μ",
    "έκφρ",
    "περίφρ",
    "επίρ",
];

const ATTRIBUTES_EN: &[&str] = &[
    "adj",
    "adv",
    "n",
    "v expr",
    "vi",
    "vtr phrasal sep",
    "vtr + prep",
    "vtr",
];

/// Marks examples that are usage notes rather than sentences.
const INFO_MARK: char = 'ⓘ';

/// One translation group: source words, target words and aligned examples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DictEntryItem {
    pub fr_words: Vec<String>,
    pub to_words: Vec<String>,
    pub fr_exs: Vec<String>,
    pub to_exs: Vec<String>,
}

impl DictEntryItem {
    /// Swap source and target sides.
    pub fn invert(&mut self) {
        std::mem::swap(&mut self.fr_words, &mut self.to_words);
        std::mem::swap(&mut self.fr_exs, &mut self.to_exs);
    }

    pub fn has_examples(&self) -> bool {
        !self.fr_exs.is_empty() && !self.to_exs.is_empty()
    }
}

/// What a single result page yields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordrefPage {
    /// Accented headword WordReference resolved the query to.
    pub accented_word: Option<String>,
    pub items: Vec<DictEntryItem>,
}

/// Strip trailing part-of-speech attributes and split into words.
///
/// `"ημερήσιος, καθημερινός επίθ"` → `["ημερήσιος", "καθημερινός"]`.
pub fn parse_words(text: &str) -> Vec<String> {
    let attributes = if is_english(text) { ATTRIBUTES_EN } else { ATTRIBUTES_EL };

    let mut current = text.replace('⇒', "");
    loop {
        let before = current.clone();
        current = current.trim().to_string();
        for att in attributes {
            current = strip_attribute(&current, att);
            if let Some(rest) = current.strip_suffix('+') {
                current = rest.to_string();
            }
        }
        if current == before {
            break;
        }
    }

    current
        .split(", ")
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove `att` from the end of `text` when it stands as its own token.
fn strip_attribute(text: &str, att: &str) -> String {
    match text.strip_suffix(att) {
        Some("") => String::new(),
        Some(rest) if rest.ends_with(char::is_whitespace) => rest.to_string(),
        _ => text.to_string(),
    }
}

/// Parse a result page. `gr_en` orients every item Greek → English.
pub fn parse_page(html: &str, gr_en: bool) -> WordrefPage {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let mut items = Vec::new();
    for table in find_all(root, "table", Some("WRD")) {
        let is_gren = table.value().attr("data-dict") == Some("gren");
        let mut table_items = parse_table(table);
        if gr_en ^ is_gren {
            table_items.iter_mut().for_each(DictEntryItem::invert);
        }
        items.extend(table_items);
    }
    items.retain(DictEntryItem::has_examples);

    WordrefPage { accented_word: accented_word_in(root), items }
}

/// The accented headword, e.g. `αγαπάω` for a query of `αγαπαω`.
///
/// WordReference does the work of resolving unaccented or greeklish input;
/// we read the first headword of the first even row.
pub fn accented_word(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    accented_word_in(doc.root_element())
}

fn accented_word_in(root: ElementRef<'_>) -> Option<String> {
    let table = find(root, "table", Some("WRD"))?;
    let row = find(table, "tr", Some("even"))?;
    let cell = find(row, "td", Some("FrWrd"))?;
    let strong = find(cell, "strong", None)?;
    let word = text(strong)
        .split_whitespace()
        .next()?
        .trim_matches(',')
        .to_string();
    (!word.is_empty()).then_some(word)
}

fn parse_table(table: ElementRef<'_>) -> Vec<DictEntryItem> {
    let mut groups: Vec<Vec<ElementRef<'_>>> = Vec::new();
    let mut current_class: Option<&str> = None;

    for row in find_all(table, "tr", None) {
        let Some(class) = row.value().classes().next().filter(|c| *c == "odd" || *c == "even") else {
            continue;
        };
        if current_class != Some(class) {
            groups.push(Vec::new());
            current_class = Some(class);
        }
        if let Some(group) = groups.last_mut() {
            group.push(row);
        }
    }

    groups.iter().map(|rows| parse_group(rows)).collect()
}

fn parse_group(rows: &[ElementRef<'_>]) -> DictEntryItem {
    let first_cell = |class: &str| rows.iter().find_map(|row| find(*row, "td", Some(class)));

    let fr_words = first_cell("FrWrd").map(cell_words).unwrap_or_default();
    let to_words = first_cell("ToWrd").map(cell_words).unwrap_or_default();

    let mut fr_exs = examples(rows, "FrEx");
    let mut to_exs = examples(rows, "ToEx");

    // Unbalanced pairs keep the first choices:
    //   > I'm not sure what this thing is.   < kept
    //   > Δεν ξέρω τι είναι αυτό το πράγμα.  < kept
    //   > Δεν ξέρω τι είναι αυτό το πράμα.
    let n = fr_exs.len().min(to_exs.len());
    fr_exs.truncate(n);
    to_exs.truncate(n);

    DictEntryItem { fr_words, to_words, fr_exs, to_exs }
}

/// Words of a headword cell, parsed child by child. POS tooltips are skipped.
fn cell_words(cell: ElementRef<'_>) -> Vec<String> {
    let mut words = Vec::new();
    for child in cell.children() {
        match child.value() {
            Node::Text(t) => words.extend(parse_words(t)),
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    if is_tag(&el, "em") && (has_class(&el, "POS2") || has_class(&el, "tooltip")) {
                        continue;
                    }
                    words.extend(parse_words(&raw_text(el)));
                }
            }
            _ => {}
        }
    }
    words
}

fn examples(rows: &[ElementRef<'_>], class: &str) -> Vec<String> {
    rows.iter()
        .flat_map(|row| find_all(*row, "td", Some(class)))
        .map(text)
        .filter(|t| !t.is_empty() && !t.contains(INFO_MARK))
        .collect()
}
