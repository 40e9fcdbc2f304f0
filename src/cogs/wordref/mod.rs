//! WordReference lookups: word search and word of the day.

pub mod entry;
pub mod longest;
pub mod parse;

use tracing::{debug, info, warn};

use crate::embed::Embed;
use crate::error::RabotError;
use crate::fetch::{Fetcher, url_with_segment};
use crate::text::is_english;

pub use entry::{DictEntry, EntryFormat, is_valid_embed};
pub use parse::{DictEntryItem, WordrefPage, accented_word, parse_page, parse_words};

/// Public site root used for links in replies.
pub const BASE_URL: &str = "https://www.wordreference.com";

/// One lookup, either of a given word or of a random Greek word.
#[derive(Debug, Clone)]
pub struct Wordref {
    word: Option<String>,
    /// Orient the entry Greek → English.
    gr_en: bool,
    format: EntryFormat,
    max_random_iterations: usize,
}

impl Wordref {
    /// `word = None` asks WordReference for a random word.
    pub fn new(word: Option<&str>, gr_en: bool, format: EntryFormat, max_random_iterations: usize) -> Self {
        Self {
            word: word.map(|w| w.trim().to_string()).filter(|w| !w.is_empty()),
            gr_en,
            format,
            max_random_iterations: max_random_iterations.max(1),
        }
    }

    pub fn is_random(&self) -> bool {
        self.word.is_none()
    }

    /// Page to query under `base`: `random/gren`, or `engr/{word}` /
    /// `gren/{word}` by script.
    pub fn url(&self, base: &str) -> Result<String, RabotError> {
        match &self.word {
            None => Ok(format!("{base}/random/gren")),
            Some(word) => {
                let direction = if is_english(word) { "engr" } else { "gren" };
                url_with_segment(&format!("{base}/{direction}"), word)
            }
        }
    }

    /// An embed for a valid entry, `None` if nothing suitable was found.
    ///
    /// Random lookups retry up to `max_random_iterations` pages.
    pub async fn fetch_embed(&self, fetcher: &Fetcher) -> Result<Option<Embed>, RabotError> {
        if !self.is_random() {
            return self.try_fetch_embed(fetcher).await;
        }

        for attempt in 1..=self.max_random_iterations {
            match self.try_fetch_embed(fetcher).await {
                Ok(Some(embed)) => return Ok(Some(embed)),
                Ok(None) => debug!(attempt, "random word rejected"),
                Err(e) => warn!(attempt, error = %e, "random word lookup failed"),
            }
        }
        Ok(None)
    }

    pub async fn try_fetch_embed(&self, fetcher: &Fetcher) -> Result<Option<Embed>, RabotError> {
        let entry = self.try_fetch_entry(fetcher).await?;
        if !entry.is_valid(self.format.min_sentences_shown) {
            return Ok(None);
        }
        let embed = entry.to_embed(&self.format);
        if !is_valid_embed(&embed) {
            warn!(word = %entry.word, len = embed.len(), "embed too long");
            return Ok(None);
        }
        info!(word = %entry.word, "valid wordref entry");
        Ok(Some(embed))
    }

    pub async fn try_fetch_entry(&self, fetcher: &Fetcher) -> Result<DictEntry, RabotError> {
        let html = fetcher.get_text(&self.url(&fetcher.sites().wordref_url)?).await?;
        self.entry_from_html(&html)
    }

    /// Build the entry from a fetched page.
    pub fn entry_from_html(&self, html: &str) -> Result<DictEntry, RabotError> {
        let page = parse_page(html, self.gr_en);

        let word = if self.gr_en || self.is_random() {
            match (page.accented_word, &self.word) {
                (Some(accented), _) => accented,
                (None, Some(word)) => {
                    warn!(%word, "could not find the accented version");
                    word.clone()
                }
                (None, None) => {
                    return Err(RabotError::Parse("random page has no headword".into()));
                }
            }
        } else {
            self.word.clone().unwrap_or_default()
        };

        // Always link the Greek-first page, whatever the query direction.
        let url = url_with_segment(&format!("{BASE_URL}/gren"), &word)?;
        debug!(%url, "wordref entry");

        Ok(DictEntry { word, gr_en: self.gr_en, url, items: page.items })
    }
}
