//! Word tokenizer and character n-gram extractor
//!
//! Both functions are pure. The index and the query path use the same
//! functions so document and query features always line up.

/// Word characters: Unicode alphabetic and numeric characters, plus
/// underscore
///
/// Alphabetic includes combining marks with the Other_Alphabetic property,
/// such as Devanagari vowel signs, so those stay inside their word.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whitespace: Unicode White_Space plus the ASCII separators U+001C..U+001F
#[inline]
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Tokenize text into lower-cased word tokens
///
/// Extracts maximal runs of word characters in left-to-right order.
/// Punctuation and whitespace only separate tokens. Duplicates are kept.
///
/// # Example
///
/// ```
/// use jokerank_search::tokenizer::tokenize;
///
/// let tokens = tokenize("Knock, knock! Who's_there?");
/// assert_eq!(tokens, vec!["knock", "knock", "who", "s_there"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

/// Extract character n-grams with lengths in `min_n..=max_n`
///
/// The text is lower-cased, whitespace runs collapse to one space and the
/// ends are trimmed. For each length `n` every window of `n` characters is
/// emitted (stride 1), shorter lengths first. Lengths longer than the text
/// are skipped. Lengths count characters, not bytes.
///
/// # Example
///
/// ```
/// use jokerank_search::tokenizer::char_ngrams;
///
/// let grams = char_ngrams("  Ha  HA ", 3, 5);
/// assert_eq!(grams, vec!["ha ", "a h", " ha", "ha h", "a ha", "ha ha"]);
/// ```
pub fn char_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let normalized = text
        .to_lowercase()
        .split(is_space)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if normalized.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = normalized.chars().collect();
    let mut grams = Vec::new();
    for n in min_n.max(1)..=max_n {
        if chars.len() < n {
            continue;
        }
        grams.extend(chars.windows(n).map(|w| w.iter().collect::<String>()));
    }
    grams
}
