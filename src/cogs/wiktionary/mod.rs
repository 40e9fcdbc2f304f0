//! Wiktionary queries: parts of speech and verb conjugation.
//!
//! Pages are fetched as text and re-parsed on demand with
//! [`WiktionaryQuery::document`]; `scraper::Html` is not `Send`, so parsed
//! documents stay inside synchronous functions.

pub mod conjugation;

use scraper::Html;
use tracing::{debug, warn};

use crate::embed::{Embed, MAX_DESCRIPTION_LEN, pack_sections};
use crate::error::RabotError;
use crate::fetch::{Fetcher, url_with_segment};
use crate::html::{
    contains_tag_with_text, document_elements, find_all, find_by_id, has_id, is_tag,
    next_element_sibling, parent_element, text,
};
use crate::text::Language;

pub use conjugation::{Conjugation, TenseForms, VoiceConjugation, fetch_conjugation};

/// Greek section ids, in display order. Translations and related words are
/// left out on purpose: they dwarf everything else.
const ENTRIES_EL: &[&str] = &[
    "Ετυμολογία",
    "Ετυμολογία_1",
    "Ετυμολογία_2",
    "Προφορά",
    "Προφορά_1",
    "Προφορά_2",
    "Επιφώνημα",
    "Έκφραση",
    "Ουσιαστικό",
    "Εκφράσεις",
    "Επίθετο",
    "Επίρρημα",
    "Συνώνυμα",
    "Αντώνυμα",
    "Κλιτικός_τύπος_επιθέτου",
    "Κλιτικός_τύπος_ουσιαστικού",
    "Πολυλεκτικοί_όροι",
    "Σημειώσεις",
];

const ENTRIES_EN: &[&str] = &[
    "Etymology",
    "Etymology_1",
    "Etymology_2",
    "Pronunciation",
    "Pronunciation_2",
    "Pronunciation_3",
    "Interjection",
    "Interjection_2",
    "Expression",
    "Expression_2",
    "Expressions",
    "Noun",
    "Noun_2",
    "Adjective",
    "Adjective_2",
    "Adverb",
    "Adverb_2",
    "Related",
    "Synonyms",
    "Antonyms",
    "Synonyms_2",
    "Antonyms_2",
];

/// Tags that open a new section and end the current one.
const SECTION_BREAKS: &[&str] = &["h3", "h4", "h5", "div"];

/// One section of a page, e.g. `Ουσιαστικό` with its definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartOfSpeech {
    pub entry: String,
    pub lines: Vec<String>,
}

/// A fetched Wiktionary page.
#[derive(Debug, Clone)]
pub struct WiktionaryQuery {
    pub word: String,
    pub language: Language,
    pub url: String,
    html: String,
}

impl WiktionaryQuery {
    /// Public article link, shown in replies.
    pub fn url(word: &str, language: Language) -> Result<String, RabotError> {
        url_with_segment(&format!("https://{}.wiktionary.org/wiki", language.code()), word.trim())
    }

    /// Fetch the article from the configured Wiktionary root.
    pub async fn fetch(fetcher: &Fetcher, word: &str, language: Language) -> Result<Self, RabotError> {
        let request = url_with_segment(&fetcher.sites().wiktionary(language.code()), word.trim())?;
        let html = fetcher.get_text(&request).await?;
        Self::from_html(word, language, html)
    }

    /// Wrap an already fetched page.
    pub fn from_html(word: &str, language: Language, html: impl Into<String>) -> Result<Self, RabotError> {
        Ok(Self {
            word: word.trim().to_string(),
            language,
            url: Self::url(word, language)?,
            html: html.into(),
        })
    }

    /// Parse the page, with the Ancient Greek section already removed.
    pub fn document(&self) -> Html {
        let mut doc = Html::parse_document(&self.html);
        remove_ancient_greek(&mut doc, self.language);
        doc
    }
}

/// Drop the Ancient Greek section so its entries do not shadow modern ones.
///
/// English pages list Ancient Greek before Greek, so removal stops at the
/// `Greek` heading; Greek pages list it last.
pub fn remove_ancient_greek(doc: &mut Html, language: Language) {
    let (remove_id, stop_at) = match language {
        Language::English => ("Ancient_Greek", Some("Greek")),
        Language::Greek => ("Αρχαία_ελληνικά_(grc)", None),
    };

    let ids: Vec<_> = {
        let Some(heading) = document_elements(doc).find(|el| is_tag(el, "h2") && has_id(el, remove_id))
        else {
            return;
        };

        let mut ids = Vec::new();
        let mut current = parent_element(heading);
        while let Some(el) = current {
            let next = next_element_sibling(el);
            ids.push(el.id());
            if let (Some(next), Some(stop)) = (next, stop_at) {
                if contains_tag_with_text(next, "h2", stop) {
                    break;
                }
            }
            current = next;
        }
        ids
    };

    debug!(removed = ids.len(), "removed ancient greek section");
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Lines of the section whose heading has id `entry_id`, `None` when absent.
pub fn parse_entry(doc: &Html, entry_id: &str) -> Option<Vec<String>> {
    let heading = find_by_id(doc, &["h3", "h4"], entry_id)?;

    let mut lines = Vec::new();
    // Headings are wrapped in a `div.mw-heading`; the body follows the wrapper.
    let mut next = parent_element(heading).and_then(next_element_sibling);

    if let Some(el) = next.filter(|el| is_tag(el, "div")) {
        lines.extend(find_all(el, "li", None).into_iter().map(text));
        return Some(lines);
    }

    while let Some(el) = next {
        if SECTION_BREAKS.iter().any(|t| is_tag(&el, t)) {
            break;
        }
        let items = find_all(el, "li", None);
        if items.is_empty() {
            lines.push(text(el));
        } else {
            lines.extend(items.into_iter().map(text));
        }
        next = next_element_sibling(el);
    }

    Some(lines)
}

/// Every known section present on the page, in display order.
pub fn parse_wiktionary_pos(doc: &Html, language: Language) -> Vec<PartOfSpeech> {
    let entries = match language {
        Language::English => ENTRIES_EN,
        Language::Greek => ENTRIES_EL,
    };
    entries
        .iter()
        .filter_map(|entry| {
            parse_entry(doc, entry).map(|lines| PartOfSpeech { entry: entry.to_string(), lines })
        })
        .collect()
}

pub async fn fetch_wiktionary_pos(
    fetcher: &Fetcher,
    word: &str,
    language: Language,
) -> Result<Vec<PartOfSpeech>, RabotError> {
    let query = WiktionaryQuery::fetch(fetcher, word, language).await?;
    Ok(parse_wiktionary_pos(&query.document(), language))
}

/// Render sections into embeds whose descriptions fit Discord's limit.
/// Only the first embed carries the title and link.
pub fn pos_embeds(word: &str, url: &str, pos: &[PartOfSpeech]) -> Vec<Embed> {
    if pos.is_empty() {
        return vec![Embed::new(word).url(url).description("No entry")];
    }

    let sections: Vec<String> = pos
        .iter()
        .map(|p| {
            let mut section = format!("**{}**\n", p.entry.replace('_', " "));
            for line in p.lines.iter().filter(|l| !l.is_empty()) {
                section.push_str(&format!("- {line}\n"));
            }
            section.push('\n');
            section
        })
        .collect();

    pack_sections(&sections, MAX_DESCRIPTION_LEN)
        .into_iter()
        .enumerate()
        .map(|(idx, description)| {
            if idx == 0 {
                Embed::new(word).url(url).description(description)
            } else {
                Embed::default().description(description)
            }
        })
        .collect()
}

/// Look `word` up on the Wiktionary edition named by `language`
/// (`english`, `en`, `greek`, `el`).
pub async fn embed_message(fetcher: &Fetcher, word: &str, language: &str) -> Result<Vec<Embed>, RabotError> {
    let language: Language = language.parse()?;
    let word = word.trim();
    let url = WiktionaryQuery::url(word, language)?;

    let pos = match fetch_wiktionary_pos(fetcher, word, language).await {
        Ok(pos) => pos,
        Err(e) if e.is_not_found() => {
            warn!(%word, %language, "no wiktionary page");
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    Ok(pos_embeds(word, &url, &pos))
}
