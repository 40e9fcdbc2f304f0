//! Slash commands.

use std::time::Duration;

use poise::CreateReply;
use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use super::paginate::paginate;
use super::{Context, Data, Error, GENERIC_FAILURE, to_serenity_embed};
use crate::cogs::wiktionary::conjugation::{conjugation_pages, fetch_conjugation};
use crate::cogs::wiktionary::{WiktionaryQuery, embed_message};
use crate::cogs::wordref::{EntryFormat, Wordref};
use crate::cogs::{fun, pronunciation};
use crate::spelling::fix_greek_spelling;
use crate::text::Language;

const MAX_SENTENCES_SHOWN: usize = 2;

pub(super) fn list() -> Vec<poise::Command<Data, Error>> {
    vec![
        wiktionary(),
        wiktionarygr(),
        wotdgr(),
        wotden(),
        searchgr(),
        searchen(),
        date(),
        forvo(),
        conj(),
        coptic(),
    ]
}

/// `word` with its spelling fixed, or `word` itself if the lookup fails.
async fn fixed_spelling(data: &Data, word: &str) -> String {
    match fix_greek_spelling(&data.fetcher, word).await {
        Ok(fixed) => {
            info!(original = %word, fixed = %fixed, "tried to fix spelling");
            fixed
        }
        Err(e) => {
            warn!(%word, error = %e, "spelling lookup failed");
            word.to_string()
        }
    }
}

// ── Wiktionary ───────────────────────────────────────────────────────────────

fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "yes" | "1")
}

async fn wiktionary_template(ctx: Context<'_>, word: String, language: &str, ephemeral: Option<String>) -> Result<(), Error> {
    let ephemeral = ephemeral.as_deref().map_or(true, is_truthy);
    if ephemeral {
        ctx.defer_ephemeral().await?;
    } else {
        ctx.defer().await?;
    }

    let embeds = embed_message(&ctx.data().fetcher, &word, language).await?;
    for embed in &embeds {
        ctx.send(CreateReply::default().embed(to_serenity_embed(embed)).ephemeral(ephemeral))
            .await?;
    }
    Ok(())
}

/// Search an English word in Wiktionary
#[poise::command(slash_command)]
pub async fn wiktionary(
    ctx: Context<'_>,
    #[description = "Word to look up"] word: String,
    #[description = "Only you can see the answer (default: True)"] ephemeral: Option<String>,
) -> Result<(), Error> {
    wiktionary_template(ctx, word, "english", ephemeral).await
}

/// Search a Greek word in Wiktionary
#[poise::command(slash_command)]
pub async fn wiktionarygr(
    ctx: Context<'_>,
    #[description = "Word to look up"] word: String,
    #[description = "Only you can see the answer (default: True)"] ephemeral: Option<String>,
) -> Result<(), Error> {
    wiktionary_template(ctx, word, "greek", ephemeral).await
}

// ── Wordref ──────────────────────────────────────────────────────────────────

async fn wordref_template(
    ctx: Context<'_>,
    word: Option<String>,
    gr_en: bool,
    hide_words: bool,
    min_sentences_shown: usize,
) -> Result<(), Error> {
    ctx.defer().await?;
    let data = ctx.data();
    let format = EntryFormat { hide_words, min_sentences_shown, max_sentences_shown: MAX_SENTENCES_SHOWN };
    let iterations = data.config.wordref.max_random_iterations;

    let lookup = |word: Option<&str>| Wordref::new(word, gr_en, format, iterations);
    let mut embed = lookup(word.as_deref()).fetch_embed(&data.fetcher).await.unwrap_or_else(|e| {
        warn!(error = %e, "wordref lookup failed");
        None
    });

    if embed.is_none() {
        if let Some(word) = &word {
            let fixed = fixed_spelling(data, word).await;
            embed = lookup(Some(&fixed)).fetch_embed(&data.fetcher).await?;
        }
    }

    match embed {
        Some(embed) => ctx.send(CreateReply::default().embed(to_serenity_embed(&embed))).await?,
        None => ctx.say(GENERIC_FAILURE).await?,
    };
    Ok(())
}

/// Search a random Greek word in Wordref
#[poise::command(slash_command)]
pub async fn wotdgr(ctx: Context<'_>) -> Result<(), Error> {
    wordref_template(ctx, None, true, true, 1).await
}

/// Search a random english word in Wordref
#[poise::command(slash_command)]
pub async fn wotden(ctx: Context<'_>) -> Result<(), Error> {
    wordref_template(ctx, None, false, true, 1).await
}

/// Search a Greek word in Wordref (supports greeklish)
#[poise::command(slash_command)]
pub async fn searchgr(ctx: Context<'_>, #[description = "Greek or greeklish word"] word: String) -> Result<(), Error> {
    wordref_template(ctx, Some(word), true, false, 0).await
}

/// Search an English word in Wordref
#[poise::command(slash_command)]
pub async fn searchen(ctx: Context<'_>, #[description = "English word"] word: String) -> Result<(), Error> {
    wordref_template(ctx, Some(word), false, false, 0).await
}

// ── Misc ─────────────────────────────────────────────────────────────────────

/// Prompt date in Fidis format
#[poise::command(slash_command)]
pub async fn date(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(fun::full_date_today()).await?;
    Ok(())
}

/// Write Greek text with Coptic letters
#[poise::command(slash_command)]
pub async fn coptic(
    ctx: Context<'_>,
    #[description = "Greek text"] text: String,
    #[description = "Drop accents first (default: True)"] remove_accents: Option<bool>,
) -> Result<(), Error> {
    ctx.say(fun::to_coptic(&text, remove_accents.unwrap_or(true))).await?;
    Ok(())
}

/// Search a Greek word pronunciation in forvo
#[poise::command(slash_command)]
pub async fn forvo(ctx: Context<'_>, #[description = "Greek word"] word: String) -> Result<(), Error> {
    ctx.defer().await?;
    let data = ctx.data();

    // Only fix the spelling on a miss: the fix may change a valid word
    // (ταξίδια => ταξίδι).
    let mut word = word;
    let mut result = pronunciation::get_pronunciation(&data.fetcher, &word).await;
    if matches!(&result, Err(e) if e.is_not_found()) {
        word = fixed_spelling(data, &word).await;
        result = pronunciation::get_pronunciation(&data.fetcher, &word).await;
    }

    let (message, audio) = match result {
        Ok(found) => found,
        Err(e) if e.is_not_found() => {
            ctx.say(format!("Could not find the word {word}!")).await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let filename = format!("{word}.{}", audio.extension());
    ctx.send(
        CreateReply::default()
            .content(message)
            .attachment(serenity::CreateAttachment::bytes(audio.bytes, filename)),
    )
    .await?;
    Ok(())
}

/// Get the conjugation table of the verb
#[poise::command(slash_command)]
pub async fn conj(ctx: Context<'_>, #[description = "Greek verb"] word: String) -> Result<(), Error> {
    ctx.defer().await?;
    let data = ctx.data();

    let mut word = word;
    let mut result = fetch_conjugation(&data.fetcher, &word).await;
    if matches!(result, Ok(None)) {
        let fixed = fixed_spelling(data, &word).await;
        if fixed != word {
            word = fixed;
            result = fetch_conjugation(&data.fetcher, &word).await;
        }
    }

    let conjugation = match result {
        Ok(Some(conjugation)) => conjugation,
        Ok(None) => {
            ctx.say(format!("Could not find conjugation for {word}.")).await?;
            return Ok(());
        }
        Err(e) => {
            error!(%word, error = %e, "conjugation lookup failed");
            ctx.say(format!("Error while fetching conjugation for {word}.")).await?;
            return Ok(());
        }
    };

    let url = WiktionaryQuery::url(&word, Language::Greek)?;
    let pages = conjugation_pages(&word, &url, &conjugation);
    if pages.is_empty() {
        ctx.say(format!("Could not find conjugation for {word}.")).await?;
        return Ok(());
    }
    paginate(ctx, &pages, Duration::from_secs(data.config.pagination_timeout_seconds)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeral_flag_values() {
        assert!(is_truthy("True"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("1"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy("no"));
    }

    #[test]
    fn every_command_is_registered() {
        let names: Vec<String> = list().into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            ["wiktionary", "wiktionarygr", "wotdgr", "wotden", "searchgr", "searchen", "date", "forvo", "conj", "coptic"]
        );
    }
}
