//! Lookups against a local HTTP server standing in for the scraped sites.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use rabot::cogs::forvo;
use rabot::cogs::wiktionary::conjugation::fetch_conjugation;
use rabot::cogs::wordref::{EntryFormat, Wordref};
use rabot::config::{Config, SitesConfig};
use rabot::error::RabotError;
use rabot::fetch::Fetcher;

// ── Local server ─────────────────────────────────────────────────────────────

/// Responses served in order per path; the last one repeats. Unknown paths
/// get a 404.
struct TestServer {
    base: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl TestServer {
    async fn start(routes: Vec<(&str, Vec<(u16, &str)>)>) -> Self {
        let routes: HashMap<String, Vec<(u16, String)>> = routes
            .into_iter()
            .map(|(path, responses)| {
                (path.to_string(), responses.into_iter().map(|(s, b)| (s, b.to_string())).collect())
            })
            .collect();
        let routes = Arc::new(routes);
        let hits: Arc<Mutex<HashMap<String, usize>>> = Arc::default();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let server_hits = hits.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let routes = routes.clone();
                let hits = server_hits.clone();
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 4096];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }
                    let request = String::from_utf8_lossy(&request);
                    let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                    let hit = {
                        let mut hits = hits.lock().unwrap();
                        let count = hits.entry(path.clone()).or_insert(0);
                        *count += 1;
                        *count - 1
                    };
                    let (status, body) = match routes.get(&path) {
                        Some(responses) => responses[hit.min(responses.len() - 1)].clone(),
                        None => (404, "not found".to_string()),
                    };

                    let response = format!(
                        "HTTP/1.1 {status} Test\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { base, hits }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    fn fetcher(&self) -> Fetcher {
        let sites = SitesConfig {
            wordref_url: self.base.clone(),
            wiktionary_url: format!("{}/{{lang}}/wiki", self.base),
            forvo_url: format!("{}/word/", self.base),
        };
        Fetcher::new(&Config::default().http, &sites).unwrap()
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

const WORDREF_PAGE: &str = r#"<html><body>
<table class="WRD" data-dict="gren">
  <tr class="even">
    <td class="FrWrd"><strong>αγαπάω, αγαπώ</strong> <em class="POS2">ρ μ</em></td>
    <td class="ToWrd">love <em class="POS2">vtr</em></td>
  </tr>
  <tr class="even"><td class="FrEx">Σ' αγαπάω πολύ.</td></tr>
  <tr class="even"><td class="ToEx">I love you very much.</td></tr>
</table>
</body></html>"#;

const EMPTY_PAGE: &str = "<html><body></body></html>";

const POINTER_PAGE: &str = r#"<html><body><div class="mw-content-ltr mw-parser-output">
<ul><li>→ δείτε τη λέξη <a title="agapao" href="/wiki/agapao">agapao</a></li></ul>
</div></body></html>"#;

fn conjugation_page() -> String {
    let mut rows = String::from("<tr><th colspan=\"3\">Εξακολουθητικοί χρόνοι</th></tr>");
    rows.push_str("<tr><th>πρόσωπα</th><th>Ενεστώτας</th><th>Παρατατικός</th></tr>");
    for (i, pronoun) in ["εγώ", "εσύ", "αυτός", "εμείς", "εσείς", "αυτοί"].iter().enumerate() {
        rows.push_str(&format!("<tr><td>{pronoun}</td><td>αγαπάω{i}</td><td>αγαπούσα{i}</td></tr>"));
    }
    format!(
        r#"<html><body><div class="mw-content-ltr mw-parser-output">
        <div class="mw-heading mw-heading4"><h4 id="Κλίση">Κλίση</h4></div>
        <div class="NavFrame"><div class="NavHead">Ενεργητική φωνή</div>
        <div class="NavContent"><table>{rows}</table></div></div>
        </div></body></html>"#
    )
}

// ── Fetcher ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_codes_map_to_errors() {
    let server = TestServer::start(vec![("/ok", vec![(200, "hello")]), ("/broken", vec![(500, "oops")])]).await;
    let fetcher = server.fetcher();

    assert_eq!(fetcher.get_text(&server.url("/ok")).await.unwrap(), "hello");

    let err = fetcher.get_text(&server.url("/missing")).await.unwrap_err();
    assert!(err.is_not_found());

    let err = fetcher.get_text(&server.url("/broken")).await.unwrap_err();
    assert!(matches!(&err, RabotError::Http(msg) if msg.starts_with("HTTP 500")));
}

// ── Forvo ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn forvo_retries_after_forbidden() {
    let server = TestServer::start(vec![("/word/kalimera", vec![(403, "blocked"), (200, "page")])]).await;

    let html = forvo::fetch_page(&server.fetcher(), "kalimera").await.unwrap();
    assert_eq!(html, "page");
    assert_eq!(server.hits("/word/kalimera"), 2);
}

#[tokio::test]
async fn forvo_gives_up_after_repeated_forbidden() {
    let server = TestServer::start(vec![("/word/kalimera", vec![(403, "blocked")])]).await;

    let err = forvo::fetch_page(&server.fetcher(), "kalimera").await.unwrap_err();
    assert!(matches!(&err, RabotError::Http(msg) if msg.starts_with("HTTP 403")));
    assert_eq!(server.hits("/word/kalimera"), 3);
}

#[tokio::test]
async fn forvo_missing_word_is_not_found() {
    let server = TestServer::start(vec![]).await;

    let err = forvo::fetch_page(&server.fetcher(), "kalimera").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(server.hits("/word/kalimera"), 1);
}

#[tokio::test]
async fn forvo_multi_word_query_uses_plus() {
    let server = TestServer::start(vec![("/word/good+day", vec![(200, "page")])]).await;

    let html = forvo::fetch_page(&server.fetcher(), "good day").await.unwrap();
    assert_eq!(html, "page");
}

// ── WordReference ────────────────────────────────────────────────────────────

#[tokio::test]
async fn random_word_retries_until_a_page_is_usable() {
    let server = TestServer::start(vec![("/random/gren", vec![(200, EMPTY_PAGE), (200, WORDREF_PAGE)])]).await;
    let format = EntryFormat { hide_words: true, min_sentences_shown: 1, max_sentences_shown: 2 };

    let embed = Wordref::new(None, true, format, 5).fetch_embed(&server.fetcher()).await.unwrap().unwrap();
    assert_eq!(embed.title, "∙∙∙∙∙ αγαπάω ∙∙∙∙∙");
    // Links point at the public site, not the server queried.
    assert!(embed.url.as_deref().unwrap_or_default().starts_with("https://www.wordreference.com/gren/"));
    assert_eq!(server.hits("/random/gren"), 2);
}

#[tokio::test]
async fn random_word_gives_up_after_max_iterations() {
    let server = TestServer::start(vec![("/random/gren", vec![(200, EMPTY_PAGE)])]).await;
    let format = EntryFormat { hide_words: true, min_sentences_shown: 1, max_sentences_shown: 2 };

    let embed = Wordref::new(None, true, format, 3).fetch_embed(&server.fetcher()).await.unwrap();
    assert!(embed.is_none());
    assert_eq!(server.hits("/random/gren"), 3);
}

#[tokio::test]
async fn english_search_queries_engr() {
    let server = TestServer::start(vec![("/engr/love", vec![(200, WORDREF_PAGE)])]).await;
    let format = EntryFormat { hide_words: false, min_sentences_shown: 0, max_sentences_shown: 2 };

    let entry = Wordref::new(Some("love"), false, format, 5).try_fetch_entry(&server.fetcher()).await.unwrap();
    assert_eq!(entry.word, "love");
    assert_eq!(server.hits("/engr/love"), 1);
}

// ── Wiktionary conjugation ───────────────────────────────────────────────────

#[tokio::test]
async fn conjugation_of_missing_page_is_none() {
    let server = TestServer::start(vec![]).await;

    let conj = fetch_conjugation(&server.fetcher(), "agapo").await.unwrap();
    assert_eq!(conj, None);
    assert_eq!(server.hits("/el/wiki/agapo"), 1);
}

#[tokio::test]
async fn conjugation_follows_see_the_word_pointer() {
    let table = conjugation_page();
    let server =
        TestServer::start(vec![("/el/wiki/agapo", vec![(200, POINTER_PAGE)]), ("/el/wiki/agapao", vec![(200, table.as_str())])])
            .await;

    let conj = fetch_conjugation(&server.fetcher(), " agapo ").await.unwrap().unwrap();
    assert_eq!(conj.len(), 1);
    assert_eq!(conj[0].voice, "Ενεργητική φωνή");
    let tenses: Vec<&str> = conj[0].tenses.iter().map(|t| t.tense.as_str()).collect();
    assert_eq!(tenses, vec!["Ενεστώτας", "Παρατατικός"]);
    assert_eq!(conj[0].tenses[1].forms[0], "αγαπούσα0");
    assert_eq!(server.hits("/el/wiki/agapao"), 1);
}

#[tokio::test]
async fn pointer_to_missing_page_is_none() {
    let server = TestServer::start(vec![("/el/wiki/agapo", vec![(200, POINTER_PAGE)])]).await;

    let conj = fetch_conjugation(&server.fetcher(), "agapo").await.unwrap();
    assert_eq!(conj, None);
    assert_eq!(server.hits("/el/wiki/agapao"), 1);
}
