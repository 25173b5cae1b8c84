//! Plain-text cleaning of catalog descriptions.
//!
//! Catalog descriptions are DocBook fragments wrapped in quotes. The
//! introspection table needs them as plain C string contents, so each
//! description goes through these steps in order:
//!
//! 1. [`strip_sentence`]: drop the leading quote and the trailing `."`
//! 2. [`escape_single_quotes`]: `'` becomes `\'`
//! 3. [`replace_quote_markup`]: `<quote>X</quote>` becomes `\"X\"`
//! 4. [`strip_paired_markup`]: `<tag ...>X</tag>` becomes `X`
//! 5. [`resolve_parameter_links`]: `<xref linkend="guc-work-mem"/>` becomes `work_mem`
//! 6. [`strip_self_closing_markup`]: any other `<tag .../>` is dropped
//! 7. [`truncate_see_clause`]: a trailing `; see ...` is dropped

use std::sync::LazyLock;

use regex::{Captures, Regex};

static QUOTE_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<quote>(.*?)</quote>").expect("valid regex"));

// An opening tag that is not self-closing, its content (text and
// self-closing tags only), and any closing tag.
static PAIRED_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[A-Za-z][\w-]*(?:\s[^>]*[^/>])?>((?:[^<]|<[^>]*/>)*)</[A-Za-z][\w-]*>")
        .expect("valid regex")
});

// A self-closing tag with one preceding space, so no double space is left.
static SELF_CLOSING_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s?<[A-Za-z][\w-]*(?:\s[^>]*)?/>").expect("valid regex"));

static PARAMETER_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<xref\s+linkend="guc-([^"]*)"\s*/>"#).expect("valid regex"));

/// Run every cleaning step over a quoted catalog description.
pub fn clean_description(description: &str) -> String {
    let text = strip_sentence(description);
    let text = escape_single_quotes(text);
    let text = replace_quote_markup(&text);
    let text = strip_paired_markup(&text);
    let text = resolve_parameter_links(&text);
    let text = strip_self_closing_markup(&text);
    truncate_see_clause(&text).to_string()
}

/// Remove the surrounding quotes and the final period.
pub fn strip_sentence(description: &str) -> &str {
    let text = description.strip_prefix('"').unwrap_or(description);
    text.strip_suffix(".\"")
        .or_else(|| text.strip_suffix('"'))
        .unwrap_or(text)
}

/// Remove only the surrounding quotes, keeping the period and markup.
pub fn strip_quotes(description: &str) -> &str {
    let text = description.strip_prefix('"').unwrap_or(description);
    text.strip_suffix('"').unwrap_or(text)
}

pub fn escape_single_quotes(text: &str) -> String {
    text.replace('\'', "\\'")
}

pub fn replace_quote_markup(text: &str) -> String {
    QUOTE_MARKUP.replace_all(text, r#"\"${1}\""#).into_owned()
}

/// Remove paired tags, keeping their content. Nested pairs are unwrapped
/// from the inside out.
pub fn strip_paired_markup(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = PAIRED_MARKUP.replace_all(&current, "${1}").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Replace configuration parameter links with the parameter's name.
pub fn resolve_parameter_links(text: &str) -> String {
    PARAMETER_LINK
        .replace_all(text, |caps: &Captures<'_>| caps[1].replace('-', "_"))
        .into_owned()
}

/// Remove self-closing tags left after parameter links are resolved.
pub fn strip_self_closing_markup(text: &str) -> String {
    SELF_CLOSING_MARKUP.replace_all(text, "").into_owned()
}

pub fn truncate_see_clause(text: &str) -> &str {
    match text.find("; see") {
        Some(index) => &text[..index],
        None => text,
    }
}
