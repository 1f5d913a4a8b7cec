// src/chat/hindi.rs

use regex::Regex;
use std::sync::LazyLock;

/// Fixed token-substitution table, English domain terms to Hindi.
/// Applied in order with global case-insensitive replacement; this is a
/// textual transform, not grammatical translation, so order matters
/// ("planet" rewrites the stem inside "planets" before that entry is
/// ever reached).
const SUBSTITUTIONS: [(&str, &str); 12] = [
    ("planet", "ग्रह"),
    ("planets", "ग्रह"),
    ("Mars", "मंगल"),
    ("Earth", "पृथ्वी"),
    ("Jupiter", "बृहस्पति"),
    ("mission", "मिशन"),
    ("space", "अंतरिक्ष"),
    ("Moon", "चांद"),
    ("Sun", "सूर्य"),
    ("satellite", "उपग्रह"),
    ("ISRO", "इसरो"),
    ("NASA", "नासा"),
];

static PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    SUBSTITUTIONS
        .iter()
        .map(|(english, hindi)| {
            let re = Regex::new(&format!("(?i){}", regex::escape(english)))
                .expect("substitution patterns are literal");
            (re, *hindi)
        })
        .collect()
});

/// Rewrites an English response with the Hindi substitution table, then
/// prepends a topic lead-in. The lead-in check reads the untranslated
/// input, so substitution always runs first; swapping the two steps
/// would change which responses get a lead-in.
pub fn translate_to_hindi(text: &str) -> String {
    let mut translated = text.to_string();
    for (re, hindi) in PATTERNS.iter() {
        translated = re.replace_all(&translated, *hindi).into_owned();
    }

    if text.contains("Mars") {
        translated = format!("मंगल ग्रह के बारे में: {}", translated);
    } else if text.contains("mission") {
        translated = format!("अंतरिक्ष मिशन: {}", translated);
    }

    translated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mars_is_substituted() {
        let out = translate_to_hindi("Mars is the Red Planet");
        assert!(out.contains("मंगल"));
        assert!(!out.contains("Mars"));
    }

    #[test]
    fn test_substitution_is_case_insensitive() {
        let out = translate_to_hindi("NASA and nasa study the moon");
        assert!(!out.to_lowercase().contains("nasa"));
        assert!(!out.to_lowercase().contains("moon"));
        assert!(out.contains("नासा"));
        assert!(out.contains("चांद"));
    }

    #[test]
    fn test_no_substituted_key_survives() {
        let input = "The planet Mars mission: ISRO sent a satellite past the Moon into space, says NASA of Earth and Jupiter under the Sun.";
        let out = translate_to_hindi(input);
        for (english, _) in SUBSTITUTIONS {
            assert!(
                !out.to_lowercase().contains(&english.to_lowercase()),
                "'{}' survived translation: {}",
                english,
                out
            );
        }
    }

    #[test]
    fn test_mars_lead_in_prepended() {
        let out = translate_to_hindi("Mars is red");
        assert!(out.starts_with("मंगल ग्रह के बारे में: "));
    }

    #[test]
    fn test_mission_lead_in_only_without_mars() {
        // "Mars" wins over "mission" when both appear.
        let both = translate_to_hindi("Mars mission update");
        assert!(both.starts_with("मंगल ग्रह के बारे में: "));

        let mission_only = translate_to_hindi("A mission to the stars");
        assert!(mission_only.starts_with("अंतरिक्ष मिशन: "));
    }

    #[test]
    fn test_lead_in_keys_off_untranslated_text() {
        // Lowercase "mars" is substituted but does not trigger the
        // case-sensitive lead-in check.
        let out = translate_to_hindi("mars is red");
        assert!(!out.starts_with("मंगल ग्रह के बारे में: "));
        assert!(out.contains("मंगल"));
    }
}
