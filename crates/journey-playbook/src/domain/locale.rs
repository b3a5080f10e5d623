//! Locale selection for playbook texts.

use super::model::{LocaleText, LocalizedText};

/// Locales tried, in order, after the requested one.
const FALLBACK_LOCALES: [&str; 3] = ["en", "ru", "kz"];

/// Resolves `text` for `lang`, falling back through [`FALLBACK_LOCALES`] and
/// finally to a humanized form of `fallback_key`. Lines are joined with `\n`;
/// empty entries count as missing.
#[must_use]
pub fn localize(text: Option<&LocalizedText>, lang: &str, fallback_key: &str) -> String {
    let resolved = match text {
        Some(LocalizedText::Plain(s)) => Some(s.clone()),
        Some(LocalizedText::Lines(lines)) => Some(lines.join("\n")),
        Some(LocalizedText::ByLocale(map)) => std::iter::once(lang)
            .chain(FALLBACK_LOCALES)
            .find_map(|l| map.get(l).map(LocaleText::joined).filter(|s| !s.is_empty())),
        None => None,
    };
    resolved
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| humanize_key(fallback_key))
}

/// Turns a technical key such as `full_name` or `dateOfBirth` into
/// `Full Name` / `Date Of Birth`.
#[must_use]
pub fn humanize_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;
    for c in key.chars() {
        if c == '_' || c == '-' {
            if !matches!(prev, Some('_' | '-')) {
                spaced.push(' ');
            }
        } else {
            if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
                spaced.push(' ');
            }
            spaced.push(c);
        }
        prev = Some(c);
    }

    let mut out = String::with_capacity(spaced.len());
    let mut word_start = true;
    for c in spaced.to_lowercase().chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}
