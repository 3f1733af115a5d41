//! Plain-text excerpts for listing cards.
//!
//! Excerpts come from the manual excerpt when one is authored, otherwise from
//! the body. Either source is reduced to plain text (shortcodes, markup and
//! entities removed) and cut to [`EXCERPT_WORDS`] words.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum words in an excerpt.
pub const EXCERPT_WORDS: usize = 22;

/// Appended when an excerpt was cut short.
pub const EXCERPT_MORE: &str = "\u{2026}";

#[allow(clippy::expect_used)]
static SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script>|<style\b[^>]*>.*?</style>")
        .expect("valid regex literal")
});

/// Opening, closing and self-closing shortcodes: `[name attr="x"]`, `[/name]`.
#[allow(clippy::expect_used)]
static SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[/?[A-Za-z][\w-]*(?:\s[^\]]*)?/?\]").expect("valid regex literal")
});

#[allow(clippy::expect_used)]
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex literal"));

#[allow(clippy::expect_used)]
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid regex literal")
});

/// Build the excerpt for a course.
pub fn excerpt_for(manual: Option<&str>, body: &str) -> String {
    let source = manual
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(body);
    trim_words(&to_plain_text(source), EXCERPT_WORDS)
}

/// Strip shortcodes, markup and entities, leaving plain text.
pub fn to_plain_text(input: &str) -> String {
    let text = SCRIPT_STYLE.replace_all(input, " ");
    let text = SHORTCODE.replace_all(&text, " ");
    let text = TAG.replace_all(&text, " ");
    let text = ENTITY.replace_all(&text, |caps: &regex::Captures<'_>| decode_entity(&caps[1]));
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `max` words, appending [`EXCERPT_MORE`] when anything was cut.
pub fn trim_words(text: &str, max: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > max {
        format!("{}{EXCERPT_MORE}", words[..max].join(" "))
    } else {
        words.join(" ")
    }
}

fn decode_entity(entity: &str) -> String {
    let numeric = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse().ok()
    } else {
        None
    };
    if let Some(code) = numeric {
        return char::from_u32(code)
            .filter(|c| *c != '\0')
            .map(String::from)
            .unwrap_or_default();
    }

    let named = match entity {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "hellip" => "\u{2026}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        _ => "",
    };
    named.to_string()
}
