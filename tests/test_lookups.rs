//! End-to-end parsing of saved pages through the public API, no network.

use rabot::cogs::faqs::handle_message;
use rabot::cogs::forvo::{GREEK, parse_pronunciations};
use rabot::cogs::pronunciation::{format_message, parse_ipa};
use rabot::cogs::wiktionary::conjugation::{conjugation_pages, parse_conjugation};
use rabot::cogs::wiktionary::{WiktionaryQuery, parse_wiktionary_pos, pos_embeds};
use rabot::cogs::wordref::{EntryFormat, Wordref, is_valid_embed};
use rabot::pagination::{Button, Pager, button_from_custom_id, custom_id};
use rabot::spelling::spelling_from_page;
use rabot::text::Language;
use scraper::Html;

const WORDREF_PAGE: &str = r#"<html><body>
<table class="WRD" data-dict="gren">
  <tr class="even">
    <td class="FrWrd"><strong>σπίτι</strong> <em class="POS2">ουσ ουδ</em></td>
    <td class="ToWrd">house, home <em class="POS2">n</em></td>
  </tr>
  <tr class="even"><td class="FrEx">Το σπίτι μου είναι μικρό.</td></tr>
  <tr class="even"><td class="ToEx">My house is small.</td></tr>
  <tr class="odd">
    <td class="FrWrd"><strong>σπιτικό</strong> <em class="POS2">ουσ ουδ</em></td>
    <td class="ToWrd">household <em class="POS2">n</em></td>
  </tr>
  <tr class="odd"><td class="FrEx">Ένα ζεστό σπιτικό.</td></tr>
  <tr class="odd"><td class="ToEx">A warm household.</td></tr>
</table>
</body></html>"#;

#[test]
fn wordref_search_builds_a_sendable_embed() {
    let format = EntryFormat { hide_words: false, min_sentences_shown: 0, max_sentences_shown: 2 };
    let wordref = Wordref::new(Some("spiti"), true, format, 5);
    let entry = wordref.entry_from_html(WORDREF_PAGE).unwrap();

    assert_eq!(entry.word, "σπίτι");
    assert_eq!(entry.translations(), vec!["house", "home", "household"]);
    assert!(entry.is_valid(format.min_sentences_shown));

    let embed = entry.to_embed(&format);
    assert!(is_valid_embed(&embed));
    assert!(embed.title.contains("σπίτι"));
    assert!(embed.description.contains("**Translations:**"));
    assert!(embed.description.contains("**Sentences:**\n> 1: "));
    assert_eq!(embed.footer.as_deref(), Some("https://forvo.com/word/σπίτι/#el"));
}

#[test]
fn word_of_the_day_hides_translations() {
    let format = EntryFormat { hide_words: true, min_sentences_shown: 1, max_sentences_shown: 2 };
    let entry = Wordref::new(None, true, format, 5).entry_from_html(WORDREF_PAGE).unwrap();
    let embed = entry.to_embed(&format);
    assert!(embed.description.contains("**Translations:** ||house, home, household||\n"));
}

#[test]
fn spelling_comes_from_the_headword() {
    assert_eq!(spelling_from_page(WORDREF_PAGE, "spiti"), "σπίτι");
    assert_eq!(spelling_from_page("<html></html>", "spiti"), "spiti");
}

const EL_WIKTIONARY_PAGE: &str = r#"<html><body><div class="mw-content-ltr mw-parser-output">
  <div class="mw-heading mw-heading2"><h2 id="Νέα_ελληνικά_(el)">Νέα ελληνικά</h2></div>
  <div class="mw-heading mw-heading3"><h3 id="Προφορά">Προφορά</h3></div>
  <ul><li>ΔΦΑ : <span class="IPA">/ˈspi.ti/</span></li></ul>
  <div class="mw-heading mw-heading3"><h3 id="Ουσιαστικό">Ουσιαστικό</h3></div>
  <p><b>σπίτι</b> ουδέτερο</p>
  <ol><li>κτίριο για κατοικία</li></ol>
</div></body></html>"#;

#[test]
fn wiktionary_sections_become_embeds() {
    let query = WiktionaryQuery::from_html("σπίτι", Language::Greek, EL_WIKTIONARY_PAGE).unwrap();
    let doc = query.document();
    let pos = parse_wiktionary_pos(&doc, Language::Greek);
    let names: Vec<&str> = pos.iter().map(|p| p.entry.as_str()).collect();
    assert_eq!(names, vec!["Προφορά", "Ουσιαστικό"]);

    let embeds = pos_embeds(&query.word, &query.url, &pos);
    assert_eq!(embeds.len(), 1);
    assert_eq!(embeds[0].title, "σπίτι");
    assert_eq!(embeds[0].url.as_deref(), Some(query.url.as_str()));
    assert!(embeds[0].description.starts_with("**Προφορά**\n- ΔΦΑ : /ˈspi.ti/\n\n"));
    assert!(embeds[0].description.contains("**Ουσιαστικό**\n- σπίτι ουδέτερο\n- κτίριο για κατοικία\n"));
}

#[test]
fn ipa_joins_the_pronunciation_message() {
    let doc = Html::parse_document(EL_WIKTIONARY_PAGE);
    let ipa = parse_ipa(&doc);
    assert_eq!(ipa.as_deref(), Some("ˈspi.ti"));
    assert_eq!(format_message("σπίτι", ipa.as_deref()), "Word: σπίτι\nIPA: ˈspi.ti\n");
}

fn conjugation_page() -> String {
    let mut rows = String::from("<tr><th>πρόσωπα</th><th>Ενεστώτας</th><th>Παρατατικός</th></tr>");
    for (i, p) in ["εγώ", "εσύ", "αυτός", "εμείς", "εσείς", "αυτοί"].iter().enumerate() {
        rows.push_str(&format!("<tr><td>{p}</td><td>ξέρω{i}</td><td>ήξερα{i}</td></tr>"));
    }
    format!(
        r#"<html><body><div class="mw-content-ltr mw-parser-output">
        <div class="mw-heading mw-heading4"><h4 id="Κλίση">Κλίση</h4></div>
        <table>{rows}</table><table><tr><td>other</td></tr></table>
        </div></body></html>"#
    )
}

#[test]
fn conjugation_pages_can_be_browsed() {
    let doc = Html::parse_document(&conjugation_page());
    let conjugation = parse_conjugation(&doc, "ξέρω").unwrap().unwrap();
    let url = WiktionaryQuery::url("ξέρω", Language::Greek).unwrap();
    let pages = conjugation_pages("ξέρω", &url, &conjugation);
    assert_eq!(pages.len(), 2);
    assert!(pages[0].description.starts_with("Ενεργητική\nΕνεστώτας\n\nξέρω0\n"));

    let mut pager = Pager::new(pages.len()).unwrap();
    assert!(pager.needs_buttons());

    let session = 42;
    let pressed = button_from_custom_id(session, &custom_id(session, Button::Next)).unwrap();
    pager.press(pressed);
    assert_eq!(pages[pager.index() - 1].footer.as_deref(), Some("Page 2 from 2"));

    // A button from another command does not drive this pager.
    assert_eq!(button_from_custom_id(session, &custom_id(7, Button::Previous)), None);
}

#[test]
fn forvo_page_without_greek_is_not_found() {
    let html = r#"<html><body><div id="language-container-en"></div></body></html>"#;
    let err = parse_pronunciations(html, "hello", GREEK).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn faq_trigger_round_trip() {
    let response = handle_message("rabot, lt").unwrap();
    assert_eq!(response.content.title, "What is Language Transfer?");
    assert!(handle_message("good morning").is_none());
}
