//! Greek spelling repair through WordReference.
//!
//! WordReference resolves greeklish and unaccented input to the accented
//! headword, so a single lookup fixes most typos:
//!
//! ```text
//! xara     => χαρά
//! χαρα     => χαρά
//! χαρά     => χαρά
//! nonsense => nonsense
//! ```

use tracing::debug;

use crate::cogs::wordref::accented_word;
use crate::error::RabotError;
use crate::fetch::{Fetcher, url_with_segment};
use crate::text::greeklish_to_greek;

/// The accented Greek spelling of `word`, or `word` itself when WordReference
/// does not know it. HTTP failures are returned as errors.
pub async fn fix_greek_spelling(fetcher: &Fetcher, word: &str) -> Result<String, RabotError> {
    let greek = greeklish_to_greek(word.trim());
    let url = url_with_segment(&format!("{}/gren", fetcher.sites().wordref_url), &greek)?;
    let html = fetcher.get_text(&url).await?;

    let fixed = spelling_from_page(&html, word);
    debug!(original = %word, %fixed, "fixed greek spelling");
    Ok(fixed)
}

/// The headword of a WordReference page, falling back to `original`.
///
/// `αγαπώ` lists `αγαπάω, αγαπώ`; the trailing comma is trimmed.
pub fn spelling_from_page(html: &str, original: &str) -> String {
    accented_word(html)
        .unwrap_or_else(|| original.to_string())
        .trim_matches(',')
        .to_string()
}
