/// Locale-aware ordering for display names
///
/// In the browser this is the engine's own `localeCompare`. Elsewhere (native
/// builds and unit tests) an approximation of the default collation is used:
/// case is ignored, accented letters sort next to their base letter, letters
/// without a decomposition (ß, ø, æ, ...) sort as their base spelling, and
/// symbols sort before digits and digits before letters. Only when two names
/// are otherwise equal do accents and then case break the tie.
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two display names the way a locale-aware sort would
#[cfg(target_arch = "wasm32")]
pub fn compare(a: &str, b: &str) -> Ordering {
    js_sys::JsString::from(a)
        .locale_compare(b, &js_sys::Array::new(), &js_sys::Object::new())
        .cmp(&0)
        .then_with(|| a.cmp(b))
}

/// Compare two display names the way a locale-aware sort would
#[cfg(not(target_arch = "wasm32"))]
pub fn compare(a: &str, b: &str) -> Ordering {
    approximate_compare(a, b)
}

/// Sort items in place by a name extracted from each one
pub fn sort_by_name<T, F>(items: &mut [T], name: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| compare(name(a), name(b)));
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn approximate_compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| compare_case(a, b))
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Symbol,
    Digit,
    Letter,
}

fn class_of(c: char) -> CharClass {
    if c.is_alphabetic() {
        CharClass::Letter
    } else if c.is_numeric() {
        CharClass::Digit
    } else {
        CharClass::Symbol
    }
}

// Lowercase letters with no canonical decomposition, spelled out.
fn expansion(c: char) -> Option<&'static str> {
    let spelled = match c {
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'ø' => "o",
        'ł' => "l",
        'đ' | 'ð' => "d",
        'þ' => "th",
        'ħ' => "h",
        'ı' => "i",
        _ => return None,
    };
    Some(spelled)
}

/// Base letters only: decomposed, marks stripped, lowercased, expanded
fn primary_key(s: &str) -> Vec<(CharClass, char)> {
    let mut key = Vec::with_capacity(s.len());
    for c in s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        match expansion(c) {
            Some(spelled) => key.extend(spelled.chars().map(|l| (CharClass::Letter, l))),
            None => key.push((class_of(c), c)),
        }
    }
    key
}

/// Base letters with their marks, lowercased
fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

// Lowercase sorts before uppercase at the first differing position.
fn compare_case(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.nfd().zip(b.nfd()) {
        match (ca.is_uppercase(), cb.is_uppercase()) {
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(compare("apple", "Banana"), Ordering::Less);
        assert_eq!(compare("Zeta", "alpha"), Ordering::Greater);
    }

    #[test]
    fn test_accented_letters_sort_with_base_letter() {
        assert_eq!(compare("Ängelholm", "Beta"), Ordering::Less);
        assert_eq!(compare("Ängelholm", "Alpha"), Ordering::Greater);
        // Raw code-point order would put Ä, Ø and ß after every ASCII letter
        assert!("Ängelholm" > "Zeta");
        assert_eq!(compare("Ängelholm", "Zeta"), Ordering::Less);
        assert_eq!(compare("Øresund", "Zeta"), Ordering::Less);
        assert_eq!(compare("Øresund", "Oslo"), Ordering::Less);
        assert_eq!(compare("Straße", "Zeta"), Ordering::Less);
        assert_eq!(compare("Straße", "Strasse"), Ordering::Greater);
        assert_eq!(compare("Straße", "Strasser"), Ordering::Less);
    }

    #[test]
    fn test_symbols_before_digits_before_letters() {
        assert_eq!(compare("~tilde", "alpha"), Ordering::Less);
        assert_eq!(compare("2nd project", "alpha"), Ordering::Less);
        assert_eq!(compare("~tilde", "2nd project"), Ordering::Less);
    }

    #[test]
    fn test_accent_breaks_ties() {
        assert_eq!(compare("resume", "résumé"), Ordering::Less);
        assert_eq!(compare("résumé", "resume"), Ordering::Greater);
    }

    #[test]
    fn test_lowercase_first_on_case_tie() {
        assert_eq!(compare("iowa", "Iowa"), Ordering::Less);
        assert_eq!(compare("Iowa", "Iowa"), Ordering::Equal);
    }

    #[test]
    fn test_sort_by_name() {
        let mut names = vec!["US West (Oregon)", "europe (Ireland)", "Ängelholm", "Asia Pacific (Tokyo)"];

        sort_by_name(&mut names, |n| *n);

        assert_eq!(
            names,
            vec!["Ängelholm", "Asia Pacific (Tokyo)", "europe (Ireland)", "US West (Oregon)"]
        );
    }

    #[test]
    fn test_sort_mixed_scripts() {
        let mut names = vec!["~tilde", "alpha", "Zeta", "ss", "ß", "straße", "strasse", "Éclair", "eclair"];

        sort_by_name(&mut names, |n| *n);

        assert_eq!(
            names,
            vec!["~tilde", "alpha", "eclair", "Éclair", "ss", "ß", "strasse", "straße", "Zeta"]
        );
    }
}
