//! # Slugification
//!
//! Turns file base names into lowercase ASCII slugs for generated media
//! file names. Common Latin diacritics are folded to their base letter
//! (`Café` becomes `cafe`), every other run of non-alphanumeric characters
//! becomes a single `-`, and the result is capped at 50 characters.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use crate::constants::MAX_SLUG_LENGTH;

/// Converts a name into a URL-safe slug.
///
/// # Example
/// ```
/// use leafpress::entry::slug::slugify;
/// assert_eq!(slugify("Team Photo (final)"), "team-photo-final");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        let folded = fold(c);
        if folded.is_empty() {
            pending_separator = !slug.is_empty();
            continue;
        }
        if pending_separator {
            slug.push('-');
            pending_separator = false;
        }
        slug.push_str(folded);
    }

    if slug.len() > MAX_SLUG_LENGTH {
        // ASCII only, so byte truncation is a char boundary
        slug.truncate(MAX_SLUG_LENGTH);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    slug
}

/// ASCII replacement for a character; empty for separators.
fn fold(c: char) -> &'static str {
    const DIGITS_AND_LETTERS: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

    if c.is_ascii_alphanumeric() {
        let lower = c.to_ascii_lowercase();
        let index = DIGITS_AND_LETTERS.find(lower).unwrap_or_default();
        return &DIGITS_AND_LETTERS[index..=index];
    }

    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "a",
        'æ' | 'Æ' => "ae",
        'ç' | 'Ç' => "c",
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => "i",
        'ñ' | 'Ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "o",
        'œ' | 'Œ' => "oe",
        'ß' => "ss",
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => "u",
        'ý' | 'ÿ' | 'Ý' => "y",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slug() {
        assert_eq!(slugify("Hero Image"), "hero-image");
    }

    #[test]
    fn test_separators_collapse() {
        assert_eq!(slugify("logo@2x!!!"), "logo-2x");
        assert_eq!(slugify("  --Title--  "), "title");
        assert_eq!(slugify("report.v2.final"), "report-v2-final");
    }

    #[test]
    fn test_diacritics_fold() {
        assert_eq!(slugify("Café Résumé"), "cafe-resume");
        assert_eq!(slugify("Straße Ærø"), "strasse-aero");
    }

    #[test]
    fn test_other_scripts_are_dropped() {
        assert_eq!(slugify("写真 photo"), "photo");
    }

    #[test]
    fn test_truncation() {
        let slug = slugify("a very long media file name that keeps going well past the limit");
        assert!(slug.len() <= MAX_SLUG_LENGTH);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_nothing_left() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!@#$%"), "");
    }
}
