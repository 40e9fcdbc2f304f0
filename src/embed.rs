//! Transport-neutral rich message.
//!
//! Cogs build [`Embed`]s; the Discord layer converts them to
//! `serenity::CreateEmbed` and the debug binaries print them.

use std::fmt;

/// Discord rejects embed descriptions longer than this.
pub const MAX_DESCRIPTION_LEN: usize = 4096;

/// Messages at or above this many characters risk a 400 from Discord
/// (error code 40060), so wordref entries that long are rejected.
pub const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub url: Option<String>,
    pub description: String,
    pub color: Option<u32>,
    pub footer: Option<String>,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Visible characters, counted the way Discord counts embed size.
    pub fn len(&self) -> usize {
        self.title.chars().count()
            + self.description.chars().count()
            + self.footer.as_deref().map_or(0, |f| f.chars().count())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Embed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if let Some(url) = &self.url {
            writeln!(f, "<{url}>")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.description.trim_end())?;
        if let Some(footer) = &self.footer {
            writeln!(f)?;
            writeln!(f, "-- {footer}")?;
        }
        Ok(())
    }
}

/// Split `sections` into descriptions no longer than `limit` characters,
/// never cutting a section unless it alone exceeds the limit.
pub fn pack_sections(sections: &[String], limit: usize) -> Vec<String> {
    let mut pages: Vec<String> = Vec::new();
    let mut current = String::new();

    for section in sections {
        let section_len = section.chars().count();
        if current.chars().count() + section_len > limit && !current.is_empty() {
            pages.push(std::mem::take(&mut current));
        }
        if section_len > limit {
            let chars: Vec<char> = section.chars().collect();
            for chunk in chars.chunks(limit) {
                pages.push(chunk.iter().collect());
            }
            continue;
        }
        current.push_str(section);
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_len() {
        let e = Embed::new("αβγ").description("abcd").footer("xy").color(0x3392FF);
        assert_eq!(e.len(), 9);
        assert_eq!(e.color, Some(0x3392FF));
        assert!(!e.is_empty());
        assert!(Embed::default().is_empty());
    }

    #[test]
    fn display_includes_all_parts() {
        let e = Embed::new("title").url("https://x.org").description("body").footer("foot");
        let s = e.to_string();
        assert!(s.starts_with("title\n<https://x.org>\n"));
        assert!(s.contains("body"));
        assert!(s.ends_with("-- foot\n"));
    }

    #[test]
    fn sections_pack_under_limit() {
        let sections = vec!["aaaa".to_string(), "bbbb".to_string(), "cc".to_string()];
        assert_eq!(pack_sections(&sections, 8), vec!["aaaabbbb", "cc"]);
        assert_eq!(pack_sections(&sections, 100), vec!["aaaabbbbcc"]);
    }

    #[test]
    fn oversized_section_is_chunked() {
        let sections = vec!["ab".to_string(), "x".repeat(7)];
        assert_eq!(pack_sections(&sections, 3), vec!["ab", "xxx", "xxx", "x"]);
        assert!(pack_sections(&[], 10).is_empty());
    }
}
