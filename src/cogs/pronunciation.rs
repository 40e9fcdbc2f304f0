//! Audio pronunciation plus IPA transcription of a Greek word.

use scraper::Html;
use tracing::warn;

use super::forvo::{self, Audio};
use super::wiktionary::WiktionaryQuery;
use crate::error::RabotError;
use crate::fetch::Fetcher;
use crate::html::{document_elements, has_class, text};
use crate::text::Language;

/// Message text and audio for `word`.
///
/// The message reads `Word: {word}\nIPA: {ipa}\n`, without the IPA line when
/// Wiktionary lists none. A word Forvo does not know is
/// [`RabotError::NotFound`].
pub async fn get_pronunciation(fetcher: &Fetcher, word: &str) -> Result<(String, Audio), RabotError> {
    let word = word.trim();
    let audio = forvo::fetch_audio(fetcher, word).await?;

    let ipa = match WiktionaryQuery::fetch(fetcher, word, Language::Greek).await {
        Ok(query) => parse_ipa(&query.document()),
        Err(e) => {
            warn!(%word, error = %e, "no wiktionary page for IPA");
            None
        }
    };

    Ok((format_message(word, ipa.as_deref()), audio))
}

pub fn format_message(word: &str, ipa: Option<&str>) -> String {
    match ipa {
        Some(ipa) => format!("Word: {word}\nIPA: {ipa}\n"),
        None => format!("Word: {word}\n"),
    }
}

/// First `.IPA` transcription on a page, without its `/.../` or `[...]`.
pub fn parse_ipa(doc: &Html) -> Option<String> {
    document_elements(doc)
        .filter(|el| has_class(el, "IPA"))
        .map(text)
        .map(|t| t.trim_matches(|c| matches!(c, '/' | '[' | ']')).trim().to_string())
        .find(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_with_and_without_ipa() {
        assert_eq!(format_message("ευχαριστώ", Some("ef.xa.ɾiˈsto")), "Word: ευχαριστώ\nIPA: ef.xa.ɾiˈsto\n");
        assert_eq!(format_message("ευχαριστώ", None), "Word: ευχαριστώ\n");
    }

    #[test]
    fn ipa_is_unwrapped() {
        let doc = Html::parse_document(
            r#"<ul><li>ΔΦΑ : <span title="Διεθνές Φωνητικό Αλφάβητο" class="IPA">/ef.xa.ɾiˈsto/</span></li></ul>"#,
        );
        assert_eq!(parse_ipa(&doc).as_deref(), Some("ef.xa.ɾiˈsto"));
        assert_eq!(parse_ipa(&Html::parse_document("<p>none</p>")), None);
    }
}
