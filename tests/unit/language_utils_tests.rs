/*!
 * Tests for language utility functions
 */

use chunkwise::language_utils::{
    AUTODETECT, LanguageCodeType, SUPPORTED_LANGUAGES, find_supported, get_language_name,
    is_autodetect, language_codes_match, normalize_to_part2t, same_language_message,
    validate_language_code,
};

/// Test validation of language codes
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() {
    assert!(matches!(validate_language_code("en").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("hi").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("guj").unwrap(), LanguageCodeType::Part2T));
    assert!(matches!(validate_language_code("fre").unwrap(), LanguageCodeType::Part2B));
    assert!(matches!(validate_language_code(" EN ").unwrap(), LanguageCodeType::Part1));

    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code(AUTODETECT).is_err());
}

/// Test normalization to ISO 639-2/T
#[test]
fn test_normalize_to_part2t_withValidCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("hi").unwrap(), "hin");
    assert_eq!(normalize_to_part2t("gu").unwrap(), "guj");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");
}

/// Test language comparison across code forms
#[test]
fn test_language_codes_match_shouldCompareAcrossForms() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("HI", "hin"));
    assert!(language_codes_match("fr", "fre"));
    assert!(!language_codes_match("en", "hi"));

    // Identical strings match even when not ISO codes
    assert!(language_codes_match("x-custom", "x-custom"));
    assert!(!language_codes_match("x-custom", "en"));
}

/// Test the autodetect sentinel spellings
#[test]
fn test_is_autodetect_shouldAcceptSentinelSpellings() {
    assert!(is_autodetect(AUTODETECT));
    assert!(is_autodetect("autodetect"));
    assert!(is_autodetect("AUTO"));
    assert!(is_autodetect("  "));
    assert!(!is_autodetect("en"));
}

/// Test the supported language table
#[test]
fn test_supported_languages_shouldOfferEnglishHindiGujarati() {
    let codes: Vec<&str> = SUPPORTED_LANGUAGES.iter().map(|l| l.code).collect();
    assert_eq!(codes, vec!["en", "hi", "gu"]);

    assert_eq!(find_supported("GU").map(|l| l.code), Some("gu"));
    assert!(find_supported("fr").is_none());

    assert_eq!(same_language_message("hi"), "पाठ पहले से ही चयनित भाषा में है");
    assert_eq!(same_language_message("fr"), same_language_message("en"));
}

/// Test language names
#[test]
fn test_get_language_name_shouldReturnEnglishName() {
    assert_eq!(get_language_name("hi").unwrap(), "Hindi");
    assert_eq!(get_language_name("eng").unwrap(), "English");
    assert!(get_language_name("zz").is_err());
}
