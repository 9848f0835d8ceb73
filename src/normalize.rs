//! Header normalization
//!
//! Headers become URL-slug style keys: ASCII, lowercase, hyphen separated.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Letters that survive NFKD unchanged but have a conventional ASCII spelling
fn transliterate(c: char) -> Option<&'static str> {
    let s = match c {
        'ß' => "ss",
        'æ' | 'Æ' => "ae",
        'ø' | 'Ø' => "o",
        'œ' | 'Œ' => "oe",
        'ł' | 'Ł' => "l",
        'đ' | 'Đ' | 'ð' | 'Ð' => "d",
        'þ' | 'Þ' => "th",
        'ı' => "i",
        _ => return None,
    };
    Some(s)
}

fn push(slug: &mut String, c: char, pending_separator: &mut bool) {
    if c.is_ascii_alphanumeric() {
        if *pending_separator && !slug.is_empty() {
            slug.push('-');
        }
        *pending_separator = false;
        slug.push(c.to_ascii_lowercase());
    } else {
        *pending_separator = true;
    }
}

/// Normalize a header into a slug key
///
/// `"First Name"` → `"first-name"`, `"Größe (cm)"` → `"grosse-cm"`.
/// Pure: the result depends on the input string only.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.nfkd().filter(|c| !is_combining_mark(*c)) {
        match transliterate(c) {
            Some(ascii) => {
                for t in ascii.chars() {
                    push(&mut slug, t, &mut pending_separator);
                }
            }
            None => push(&mut slug, c, &mut pending_separator),
        }
    }

    slug
}
