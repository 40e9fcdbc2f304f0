//! Forvo pronunciation scraping.
//!
//! Forvo sits behind Cloudflare, so requests carry browser-like headers and
//! sporadic `403 Forbidden` answers are retried.

use std::sync::LazyLock;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::seq::SliceRandom;
use regex::Regex;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use scraper::{ElementRef, Html};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::RabotError;
use crate::fetch::{Fetcher, is_forbidden, url_with_segment};
use crate::html::{document_elements, elements, find, find_all, find_all_with_class, has_class, text};

const MP3_BASE: &str = "https://audio00.forvo.com/audios/mp3/";
const OGG_BASE: &str = "https://audio00.forvo.com/ogg/";

/// Forvo language code for Greek.
pub const GREEK: &str = "el";

const MAX_ATTEMPTS: usize = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

static LANG_CONTAINER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"language-container-(\w{2,4})").expect("invalid regex"));
static WORD_RATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"word_rate_\d+").expect("invalid regex"));
static PLAY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"play_\d+").expect("invalid regex"));
static VOTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(-?\d+)").expect("invalid regex"));
// Play(id, mp3, ogg, bool, mp3_hq, ogg_hq, ...): the hq mp3 is preferred.
static MP3_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Play\(\d+,'.+','.+',\w+,'([^']+)").expect("invalid regex"));
static OGG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Play\(\d+,'[^']+','([^']+)").expect("invalid regex"));
static AUTHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Pronunciation by(.*)").expect("invalid regex"));
static DATA_P_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^data-p\d+$").expect("invalid regex"));

/// One recorded pronunciation of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pronunciation {
    pub language: String,
    pub user: String,
    pub origin: String,
    pub id: u64,
    pub votes: i64,
    pub download_url: String,
    pub is_ogg: bool,
    pub word: String,
}

/// Downloaded audio of one pronunciation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audio {
    pub bytes: Vec<u8>,
    pub is_ogg: bool,
}

impl Audio {
    pub fn extension(&self) -> &'static str {
        if self.is_ogg { "ogg" } else { "mp3" }
    }
}

pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(REFERER, HeaderValue::from_static("https://forvo.com/"));
    headers
}

/// Word page under `base`. Spaces become `+` as in Forvo's own links.
pub fn page_url(base: &str, word: &str) -> Result<String, RabotError> {
    url_with_segment(base, &word.trim().replace(' ', "+"))
}

/// GET the word page, retrying on 403. A 404 is [`RabotError::NotFound`].
pub async fn fetch_page(fetcher: &Fetcher, word: &str) -> Result<String, RabotError> {
    let url = page_url(&fetcher.sites().forvo_url, word)?;

    let mut attempt = 1;
    loop {
        match fetcher.get_text_with_headers(&url, browser_headers()).await {
            Ok(html) => {
                info!(%word, "fetched forvo page");
                return Ok(html);
            }
            Err(e) if is_forbidden(&e) && attempt < MAX_ATTEMPTS => {
                warn!(%word, attempt, error = %e, "forvo refused the request, retrying");
                tokio::time::sleep(RETRY_DELAY).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

pub async fn fetch_pronunciations(
    fetcher: &Fetcher,
    word: &str,
    language: &str,
) -> Result<Vec<Pronunciation>, RabotError> {
    let html = fetch_page(fetcher, word).await?;
    parse_pronunciations(&html, word.trim(), language)
}

/// A random Greek pronunciation of `word`, downloaded.
pub async fn fetch_audio(fetcher: &Fetcher, word: &str) -> Result<Audio, RabotError> {
    let pronunciations = fetch_pronunciations(fetcher, word, GREEK).await?;
    let chosen = pronunciations
        .choose(&mut rand::thread_rng())
        .ok_or_else(|| RabotError::NotFound(format!("no pronunciation of {word}")))?;
    debug!(%word, user = %chosen.user, url = %chosen.download_url, "downloading pronunciation");

    let bytes = fetcher.get_bytes_with_headers(&chosen.download_url, browser_headers()).await?;
    Ok(Audio { bytes, is_ogg: chosen.is_ogg })
}

/// Every pronunciation in `language` listed on a word page.
///
/// A page without that language is [`RabotError::NotFound`].
pub fn parse_pronunciations(html: &str, word: &str, language: &str) -> Result<Vec<Pronunciation>, RabotError> {
    let doc = Html::parse_document(html);

    let container = document_elements(&doc)
        .find(|el| {
            el.value()
                .id()
                .and_then(|id| LANG_CONTAINER_RE.captures(id))
                .is_some_and(|caps| &caps[1] == language)
        })
        .ok_or_else(|| RabotError::NotFound(format!("no {language} pronunciation of {word}")))?;

    let Some(block) = find_all_with_class(container, "pronunciations").into_iter().next() else {
        return Ok(Vec::new());
    };

    let mut pronunciations = Vec::new();
    for list in find_all_with_class(block, "pronunciations-list") {
        for item in find_all(list, "li", None) {
            if let Some(p) = parse_item(item, word, language) {
                pronunciations.push(p);
            }
        }
    }
    debug!(%word, count = pronunciations.len(), "parsed pronunciations");
    Ok(pronunciations)
}

fn parse_item(item: ElementRef<'_>, word: &str, language: &str) -> Option<Pronunciation> {
    let more = find_all_with_class(item, "more").into_iter().next()?;

    let onclick = elements(item)
        .find(|el| el.value().id().is_some_and(|id| PLAY_RE.is_match(id)))?
        .value()
        .attr("onclick")?;
    let (download_url, is_ogg) = download_url(onclick)?;

    let id = elements(item)
        .filter(|el| has_class(el, "ofLink"))
        .flat_map(|el| el.value().attrs().collect::<Vec<_>>())
        .filter(|(k, _)| DATA_P_RE.is_match(k))
        .find_map(|(_, v)| v.parse::<u64>().ok())
        .filter(|id| *id != 0)?;

    let user = elements(item)
        .filter(|el| has_class(el, "info"))
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .find(|t| t.contains("Pronunciation by"))
        .and_then(|t| AUTHOR_RE.captures(&t).map(|caps| caps[1].trim().to_string()))
        .unwrap_or_default();

    let origin = elements(item)
        .find(|el| has_class(el, "from"))
        .map(text)
        .unwrap_or_default();

    Some(Pronunciation {
        language: language.to_string(),
        user,
        origin,
        id,
        votes: votes(more),
        download_url,
        is_ogg,
        word: word.to_string(),
    })
}

/// `.more .main_actions #word_rate_N .num_votes span`; 0 when absent.
fn votes(more: ElementRef<'_>) -> i64 {
    find_all_with_class(more, "main_actions")
        .into_iter()
        .next()
        .and_then(|actions| {
            elements(actions).find(|el| el.value().id().is_some_and(|id| WORD_RATE_RE.is_match(id)))
        })
        .and_then(|rate| find_all_with_class(rate, "num_votes").into_iter().next())
        .and_then(|num| find(num, "span", None))
        .and_then(|span| VOTES_RE.captures(&text(span)).and_then(|caps| caps[1].parse().ok()))
        .unwrap_or(0)
}

/// Audio URL from the `Play(...)` handler: mp3 if present, ogg otherwise.
fn download_url(onclick: &str) -> Option<(String, bool)> {
    let (base, encoded, is_ogg) = match MP3_RE.captures(onclick) {
        Some(caps) => (MP3_BASE, caps.get(1)?.as_str(), false),
        None => (OGG_BASE, OGG_RE.captures(onclick)?.get(1)?.as_str(), true),
    };
    let decoded = STANDARD.decode(encoded).ok()?;
    let path = String::from_utf8(decoded).ok()?;
    Some((format!("{base}{path}"), is_ogg))
}
