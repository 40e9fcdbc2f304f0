//! Small lookup helpers over `scraper` documents.
//!
//! Wiktionary ids such as `Αρχαία_ελληνικά_(grc)` are not valid CSS, so the
//! cogs walk the tree with these helpers instead of `Selector`s.

use scraper::{ElementRef, Html, Node};

/// All element descendants of `root` in document order, `root` excluded.
pub fn elements<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    root.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// All elements of the whole document in document order.
pub fn document_elements(doc: &Html) -> impl Iterator<Item = ElementRef<'_>> + '_ {
    doc.tree.root().descendants().filter_map(ElementRef::wrap)
}

pub fn is_tag(el: &ElementRef<'_>, name: &str) -> bool {
    el.value().name() == name
}

pub fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub fn has_id(el: &ElementRef<'_>, id: &str) -> bool {
    el.value().id() == Some(id)
}

/// Descendants named `tag`, optionally restricted to those carrying `class`.
pub fn find_all<'a>(root: ElementRef<'a>, tag: &str, class: Option<&str>) -> Vec<ElementRef<'a>> {
    elements(root)
        .filter(|el| is_tag(el, tag) && class.is_none_or(|c| has_class(el, c)))
        .collect()
}

/// First descendant named `tag`, optionally carrying `class`.
pub fn find<'a>(root: ElementRef<'a>, tag: &str, class: Option<&str>) -> Option<ElementRef<'a>> {
    elements(root).find(|el| is_tag(el, tag) && class.is_none_or(|c| has_class(el, c)))
}

/// Descendants carrying `class`, whatever their tag.
pub fn find_all_with_class<'a>(root: ElementRef<'a>, class: &str) -> Vec<ElementRef<'a>> {
    elements(root).filter(|el| has_class(el, class)).collect()
}

/// First element in the document whose tag is one of `tags` and whose id is `id`.
pub fn find_by_id<'a>(doc: &'a Html, tags: &[&str], id: &str) -> Option<ElementRef<'a>> {
    document_elements(doc).find(|el| has_id(el, id) && tags.iter().any(|t| is_tag(el, t)))
}

/// Next sibling that is an element, skipping text and comments.
pub fn next_element_sibling<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Parent node as an element, if it is one.
pub fn parent_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.parent().and_then(ElementRef::wrap)
}

/// Concatenated text of `el` and its descendants, untrimmed.
pub fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Text of `el` with surrounding whitespace trimmed.
pub fn text(el: ElementRef<'_>) -> String {
    raw_text(el).trim().to_string()
}

/// Table-cell text where `<br>` separates variants: `a<br>b` → `a / b`.
///
/// Runs of whitespace inside a variant collapse to one space; empty variants
/// are dropped.
pub fn cell_text(el: ElementRef<'_>) -> String {
    let mut variants: Vec<String> = Vec::new();
    let mut current = String::new();

    for node in el.descendants().skip(1) {
        match node.value() {
            Node::Text(t) => current.push_str(t),
            Node::Element(e) if e.name() == "br" => variants.push(std::mem::take(&mut current)),
            _ => {}
        }
    }
    variants.push(current);

    variants
        .iter()
        .map(|v| v.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// `title` attributes of every `<a title=...>` under `root`.
pub fn link_titles(root: ElementRef<'_>) -> Vec<String> {
    find_all(root, "a", None)
        .into_iter()
        .filter_map(|a| a.value().attr("title").map(str::to_string))
        .collect()
}

/// `true` if `el` or one of its descendants is a `tag` element whose trimmed
/// text equals `text`.
pub fn contains_tag_with_text(el: ElementRef<'_>, tag: &str, wanted: &str) -> bool {
    (is_tag(&el, tag) && text(el) == wanted)
        || elements(el).any(|d| is_tag(&d, tag) && text(d) == wanted)
}
