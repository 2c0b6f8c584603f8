//! Language utilities
//!
//! Holds the autodetect sentinel, the table of languages offered for
//! translation, and the ISO 639 code handling used to compare source and target.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Source-language value meaning "unknown, let the service detect it"
pub const AUTODETECT: &str = "Autodetect";

/// A language offered for translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedLanguage {
    /// ISO 639-1 code sent to the provider
    pub code: &'static str,
    /// Display name, with the native script where it differs
    pub name: &'static str,
    /// "Text is already in the selected language", in that language
    pub same_language_message: &'static str,
}

/// Languages offered by default
pub const SUPPORTED_LANGUAGES: &[SupportedLanguage] = &[
    SupportedLanguage {
        code: "en",
        name: "English",
        same_language_message: "Text is already in the selected language",
    },
    SupportedLanguage {
        code: "hi",
        name: "Hindi (हिन्दी)",
        same_language_message: "पाठ पहले से ही चयनित भाषा में है",
    },
    SupportedLanguage {
        code: "gu",
        name: "Gujarati (ગુજરાતી)",
        same_language_message: "પાઠ પહેલેથી જ પસંદ કરેલી ભાષામાં છે",
    },
];

/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// Check whether a source language value is the autodetect sentinel
pub fn is_autodetect(code: &str) -> bool {
    let code = code.trim();
    code.is_empty() || code.eq_ignore_ascii_case(AUTODETECT) || code.eq_ignore_ascii_case("auto")
}

/// Look up a supported language by code
pub fn find_supported(code: &str) -> Option<&'static SupportedLanguage> {
    let code = code.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.code.eq_ignore_ascii_case(code))
}

/// Localized "already in this language" message, English when unknown
pub fn same_language_message(code: &str) -> &'static str {
    find_supported(code)
        .unwrap_or(&SUPPORTED_LANGUAGES[0])
        .same_language_message
}

// ISO 639-2/B bibliographic codes that differ from their terminology form
fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    let mapped = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        _ => return None,
    };
    Some(mapped)
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized = code.trim().to_lowercase();

    match normalized.len() {
        2 if Language::from_639_1(&normalized).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized).is_some() => Ok(LanguageCodeType::Part2T),
        3 if bibliographic_to_terminology(&normalized).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    match validate_language_code(&normalized)? {
        LanguageCodeType::Part1 => Language::from_639_1(&normalized)
            .map(|lang| lang.to_639_3().to_string())
            .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code)),
        LanguageCodeType::Part2T => Ok(normalized),
        LanguageCodeType::Part2B => bibliographic_to_terminology(&normalized)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code)),
    }
}

/// Check if two language codes represent the same language
///
/// Identical strings always match, even when they are not ISO codes, so a
/// provider-specific code compared with itself is still "the same language".
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    if code1.trim().eq_ignore_ascii_case(code2.trim()) {
        return true;
    }

    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
