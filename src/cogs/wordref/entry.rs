//! A parsed WordReference entry and its rendering.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::longest::highlight_synonyms;
use super::parse::DictEntryItem;
use crate::embed::{Embed, MAX_MESSAGE_LEN};

pub const WORDREF_COLOR: u32 = 0xFF5733;

const TRANSLATIONS_SHOWN: usize = 3;
const SYNONYMS_SHOWN: usize = 2;

/// How an entry is turned into an [`Embed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFormat {
    /// Wrap translations in spoiler bars (`||...||`), for quizzes.
    pub hide_words: bool,
    pub min_sentences_shown: usize,
    pub max_sentences_shown: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictEntry {
    pub word: String,
    pub gr_en: bool,
    pub url: String,
    pub items: Vec<DictEntryItem>,
}

impl DictEntry {
    /// Distinct target-side words, in page order.
    pub fn translations(&self) -> Vec<&str> {
        distinct(self.items.iter().flat_map(|i| i.to_words.iter()))
    }

    /// Distinct source-side words other than the headword, single words first.
    pub fn synonyms(&self) -> Vec<&str> {
        let mut synonyms: Vec<&str> = distinct(self.items.iter().flat_map(|i| i.fr_words.iter()))
            .into_iter()
            .filter(|w| *w != self.word)
            .collect();
        synonyms.sort_by_key(|w| w.contains(' '));
        synonyms
    }

    /// Example pairs, those that contain the headword first.
    pub fn sentences(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .items
            .iter()
            .flat_map(|i| i.fr_exs.iter().zip(i.to_exs.iter()))
            .map(|(fr, to)| (fr.as_str(), to.as_str()))
            .collect();
        pairs.sort_by_key(|(fr, _)| !fr.contains(self.word.as_str()));
        pairs
    }

    /// The Greek side of the entry, used for the Forvo link.
    fn greek_word(&self) -> &str {
        if self.gr_en {
            &self.word
        } else {
            self.translations().first().copied().unwrap_or(&self.word)
        }
    }

    pub fn is_valid(&self, min_sentences_shown: usize) -> bool {
        let word = &self.word;
        if self.url.is_empty() {
            warn!(%word, "empty url");
            return false;
        }
        if word.is_empty() {
            warn!("empty word");
            return false;
        }
        if self.items.is_empty() {
            warn!(%word, "no entries");
            return false;
        }
        if self.translations().is_empty() {
            warn!(%word, "no translations");
            return false;
        }
        let sentences = self.sentences().len();
        if sentences < min_sentences_shown {
            warn!(%word, sentences, min_sentences_shown, "not enough sentences");
            return false;
        }
        true
    }

    pub fn to_embed(&self, format: &EntryFormat) -> Embed {
        let sep = if format.hide_words { "||" } else { "" };

        let translations: Vec<&str> =
            self.translations().into_iter().take(TRANSLATIONS_SHOWN).collect();
        let mut description = format!("**Translations:** {sep}{}{sep}\n", translations.join(", "));

        let synonyms: Vec<&str> = self.synonyms().into_iter().take(SYNONYMS_SHOWN).collect();
        if !synonyms.is_empty() {
            description.push_str(&format!("**Synonyms: **{sep}{}{sep}\n", synonyms.join(", ")));
        }

        let mut fr_words: Vec<String> = self.items.iter().flat_map(|i| i.fr_words.clone()).collect();
        let to_words: Vec<String> = self.items.iter().flat_map(|i| i.to_words.clone()).collect();
        if !fr_words.contains(&self.word) {
            fr_words.push(self.word.clone());
        }

        let sentences = self.sentences();
        if !sentences.is_empty() && format.max_sentences_shown > 0 {
            description.push_str("**Sentences:**\n");
            // "> 1." would be renumbered by Discord's markdown, hence the colon.
            for (idx, (fr, to)) in sentences.iter().take(format.max_sentences_shown).enumerate() {
                let n = idx + 1;
                description.push_str(&format!("> {n}: {}\n", highlight_synonyms(fr, &fr_words)));
                description.push_str(&format!("> {n}: {sep}{}{sep}\n", highlight_synonyms(to, &to_words)));
            }
        }

        Embed::new(format!("∙∙∙∙∙ {} ∙∙∙∙∙", self.word))
            .url(self.url.clone())
            .description(description)
            .color(WORDREF_COLOR)
            .footer(format!("https://forvo.com/word/{}/#el", self.greek_word()))
    }
}

/// Discord rejects oversized messages (400, error code 40060).
pub fn is_valid_embed(embed: &Embed) -> bool {
    embed.len() < MAX_MESSAGE_LEN
}

fn distinct<'a>(words: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for w in words {
        if !out.contains(&w.as_str()) {
            out.push(w);
        }
    }
    out
}

impl fmt::Display for DictEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "#".repeat(70))?;
        writeln!(f, "{}", self.url)?;
        writeln!(f)?;
        writeln!(f, "Word: --------------- {}", self.word)?;
        writeln!(f, "Greek → English: ---- {}", self.gr_en)?;
        for (idx, item) in self.items.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "[{}] {:?} → {:?}", idx + 1, item.fr_words, item.to_words)?;
            for (fr, to) in item.fr_exs.iter().zip(&item.to_exs) {
                writeln!(f, "  > {fr}")?;
                writeln!(f, "  < {to}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(fr: &[&str], to: &[&str], fr_exs: &[&str], to_exs: &[&str]) -> DictEntryItem {
        let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
        DictEntryItem {
            fr_words: owned(fr),
            to_words: owned(to),
            fr_exs: owned(fr_exs),
            to_exs: owned(to_exs),
        }
    }

    fn entry() -> DictEntry {
        DictEntry {
            word: "σπίτι".into(),
            gr_en: true,
            url: "https://www.wordreference.com/gren/σπίτι".into(),
            items: vec![
                item(
                    &["σπίτι", "οικία"],
                    &["house", "home"],
                    &["Έχω ένα μεγάλο αυτοκίνητο.", "Τα σπίτια είναι ακριβά."],
                    &["I have a big car.", "Houses are expensive."],
                ),
                item(&["κατοικία κατ' οίκον"], &["home"], &[], &[]),
            ],
        }
    }

    const FORMAT: EntryFormat = EntryFormat { hide_words: false, min_sentences_shown: 1, max_sentences_shown: 2 };

    #[test]
    fn translations_are_distinct() {
        assert_eq!(entry().translations(), vec!["house", "home"]);
    }

    #[test]
    fn synonyms_prefer_single_words() {
        assert_eq!(entry().synonyms(), vec!["οικία", "κατοικία κατ' οίκον"]);
    }

    #[test]
    fn sentences_with_the_word_come_first() {
        let e = DictEntry { word: "σπίτια".into(), ..entry() };
        let sentences = e.sentences();
        assert_eq!(sentences[0].0, "Τα σπίτια είναι ακριβά.");
    }

    #[test]
    fn validity() {
        assert!(entry().is_valid(1));
        assert!(!entry().is_valid(3));
        assert!(!DictEntry { items: vec![], ..entry() }.is_valid(0));
        assert!(!DictEntry { url: String::new(), ..entry() }.is_valid(0));
    }

    #[test]
    fn embed_layout() {
        let embed = entry().to_embed(&FORMAT);
        assert_eq!(embed.title, "∙∙∙∙∙ σπίτι ∙∙∙∙∙");
        assert_eq!(embed.color, Some(WORDREF_COLOR));
        assert_eq!(embed.footer.as_deref(), Some("https://forvo.com/word/σπίτι/#el"));
        assert!(embed.description.starts_with("**Translations:** house, home\n"));
        assert!(embed.description.contains("**Synonyms: **οικία, κατοικία κατ' οίκον\n"));
        assert!(embed.description.contains("**Sentences:**\n> 1: "));
        assert!(embed.description.contains("**σπίτια**"));
        assert!(is_valid_embed(&embed));
    }

    #[test]
    fn hidden_words_are_spoilered() {
        let format = EntryFormat { hide_words: true, ..FORMAT };
        let embed = entry().to_embed(&format);
        assert!(embed.description.starts_with("**Translations:** ||house, home||\n"));
        assert!(embed.description.contains("> 1: ||"));
    }

    #[test]
    fn english_first_footer_links_greek_word() {
        let e = DictEntry {
            word: "house".into(),
            gr_en: false,
            url: "u".into(),
            items: vec![item(&["house"], &["σπίτι"], &["a"], &["b"])],
        };
        assert_eq!(e.to_embed(&FORMAT).footer.as_deref(), Some("https://forvo.com/word/σπίτι/#el"));
    }

    #[test]
    fn oversized_embed_is_invalid() {
        let embed = Embed::new("t").description("x".repeat(MAX_MESSAGE_LEN));
        assert!(!is_valid_embed(&embed));
    }

    #[test]
    fn display_lists_items() {
        let s = entry().to_string();
        assert!(s.contains("Word: --------------- σπίτι"));
        assert!(s.contains("  < Houses are expensive."));
    }
}
