use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating and normalizing the language
/// codes the pipeline touches: plain ISO 639-1/639-3 codes reported by the
/// recognizer (e.g. "en") and region-tagged translation targets accepted by
/// the providers (e.g. "zh-TW", "pt-BR").
/// Split a language tag into its primary subtag and optional region
fn split_tag(code: &str) -> (String, Option<String>) {
    let trimmed = code.trim();
    match trimmed.split_once(['-', '_']) {
        Some((primary, region)) => (primary.to_lowercase(), Some(region.to_uppercase())),
        None => (trimmed.to_lowercase(), None),
    }
}

/// Look up the primary subtag as an ISO 639 language
fn lookup_primary(primary: &str) -> Option<Language> {
    match primary.len() {
        2 => Language::from_639_1(primary),
        3 => Language::from_639_3(primary),
        _ => None,
    }
}

/// Validate a language tag and return its canonical form.
///
/// The primary subtag is lowercased and must be a valid ISO 639-1 or
/// ISO 639-3 code; a region subtag is uppercased and carried through
/// unchecked (providers define which regions they accept).
pub fn normalize_tag(code: &str) -> Result<String> {
    let (primary, region) = split_tag(code);
    if lookup_primary(&primary).is_none() {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    Ok(match region {
        Some(region) => format!("{}-{}", primary, region),
        None => primary,
    })
}

/// Get the English name of a language tag's primary language
pub fn get_language_name(code: &str) -> Result<String> {
    let (primary, _region) = split_tag(code);
    let language =
        lookup_primary(&primary).ok_or_else(|| anyhow!("Invalid language code: {}", code))?;
    Ok(language.to_name().to_string())
}

/// Whether two language tags refer to the same primary language.
///
/// Region subtags are ignored, so "zh" matches "zh-TW" and "en" matches
/// "en_US".
pub fn language_codes_match(a: &str, b: &str) -> bool {
    let (primary_a, _) = split_tag(a);
    let (primary_b, _) = split_tag(b);

    match (lookup_primary(&primary_a), lookup_primary(&primary_b)) {
        (Some(lang_a), Some(lang_b)) => lang_a == lang_b,
        // Unknown codes only match verbatim
        _ => primary_a == primary_b && !primary_a.is_empty(),
    }
}
