//! Fuzzy matching used to bold inflected forms of the looked-up word inside
//! example sentences.

use crate::text::normalize_greek_word;

/// Words whose delta is at or below this are treated as the same word
/// (declension, plural, ...).
const SAME_WORD_DELTA: f64 = 0.3;

/// Greedy longest common substring length of `a` inside `b`.
///
/// Scans `a` left to right, growing a prefix while it is still contained in
/// `b`. Not symmetric; callers take the max of both directions.
pub fn lcs(a: &str, b: &str) -> usize {
    if a == b {
        return a.chars().count();
    }

    let mut rest: Vec<char> = a.chars().collect();
    let mut best = 0;

    while !rest.is_empty() {
        let mut i = 1;
        loop {
            let prefix: String = rest[..i].iter().collect();
            if b.contains(&prefix) && i < rest.len() {
                i += 1;
            } else {
                break;
            }
        }
        best = best.max(i - 1);
        rest.drain(..i);
    }

    best
}

/// 0.0 for the same word (modulo case and accents), 1.0 for unrelated words.
pub fn get_delta(a: &str, b: &str) -> f64 {
    let aa = normalize_greek_word(a);
    let bb = normalize_greek_word(b);

    let max_length = aa.chars().count().max(bb.chars().count());
    if max_length == 0 {
        return 0.0;
    }
    let common = lcs(&aa, &bb).max(lcs(&bb, &aa));

    (max_length - common) as f64 / max_length as f64
}

/// Bold every token of `sentence` that is close enough to one of `synonyms`.
pub fn highlight_synonyms(sentence: &str, synonyms: &[String]) -> String {
    let mut out = sentence.to_string();
    let mut seen: Vec<String> = Vec::new();

    for token in sentence.split_whitespace() {
        let word: String = token.chars().filter(|c| !matches!(c, '(' | ')' | ',' | '.')).collect();
        if word.is_empty() || seen.contains(&word) {
            continue;
        }
        if synonyms.iter().any(|reference| get_delta(&word, reference) <= SAME_WORD_DELTA) {
            out = out.replace(&word, &format!("**{word}**"));
        }
        seen.push(word);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_and_case_variants_have_zero_delta() {
        let words = ["Άλφα", "Αλφα", "άλφα", "αλφα"];
        for (i, w1) in words.iter().enumerate() {
            for w2 in &words[i + 1..] {
                assert_eq!(get_delta(w1, w2), 0.0, "{w1} vs {w2}");
            }
        }
    }

    #[test]
    fn lcs_of_equal_strings_is_length() {
        assert_eq!(lcs("σπίτι", "σπίτι"), 5);
    }

    #[test]
    fn lcs_is_greedy() {
        assert_eq!(lcs("σπιτια", "σπιτι"), 5);
        assert_eq!(lcs("xyz", "abc"), 0);
    }

    #[test]
    fn unrelated_words_are_far_apart() {
        assert!(get_delta("σπίτι", "θάλασσα") > SAME_WORD_DELTA);
        assert_eq!(get_delta("", ""), 0.0);
    }

    #[test]
    fn inflections_are_highlighted() {
        let synonyms = vec!["σπίτι".to_string()];
        let out = highlight_synonyms("Τα σπίτια είναι μεγάλα.", &synonyms);
        assert_eq!(out, "Τα **σπίτια** είναι μεγάλα.");
    }

    #[test]
    fn punctuation_is_ignored_when_matching() {
        let synonyms = vec!["daily".to_string()];
        let out = highlight_synonyms("I read it (daily).", &synonyms);
        assert_eq!(out, "I read it (**daily**).");
    }

    #[test]
    fn nothing_to_highlight() {
        let synonyms = vec!["θάλασσα".to_string()];
        let s = "Δεν ξέρω τι είναι αυτό.";
        assert_eq!(highlight_synonyms(s, &synonyms), s);
    }
}
