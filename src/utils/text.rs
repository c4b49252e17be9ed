// src/utils/text.rs

//! Plain-text rendering of HTML fragments.

use std::sync::OnceLock;

use regex::Regex;

static TAG_RE: OnceLock<Regex> = OnceLock::new();
static BREAK_RE: OnceLock<Regex> = OnceLock::new();

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("valid tag regex"))
}

fn break_re() -> &'static Regex {
    BREAK_RE.get_or_init(|| Regex::new(r"</p>|<br\s*/?>|</br>").expect("valid break regex"))
}

/// Turn an HTML fragment into plain text.
///
/// Only fragments that contain markup are rewritten: source newlines are
/// dropped, paragraph ends and line breaks become `\n`, and every other tag
/// is removed without leaving a gap, so `<b>50</b>%` reads `50%`. Entities
/// are decoded afterwards and the ends are trimmed. Inner whitespace is kept
/// as is, since it is part of the fingerprinted text.
pub fn normalize_html(fragment: &str) -> String {
    let text = if fragment.contains(|c| c == '<' || c == '>') {
        let unwrapped = fragment.replace('\n', "");
        let broken = break_re().replace_all(&unwrapped, "\n");
        tag_re().replace_all(&broken, "").into_owned()
    } else {
        fragment.to_string()
    };
    html_escape::decode_html_entities(&text).trim().to_string()
}
