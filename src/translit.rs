//! Character-level Urdu script to Latin transliteration.
//!
//! A deliberately static per-character table: no context sensitivity, no
//! ligature handling. Characters outside the table pass through unchanged,
//! so transliteration is total over all input and never fails.

/// Look up the Latin replacement for a single Urdu character.
///
/// Returns `None` for characters outside the table; callers emit those
/// unchanged. The table itself is a process-wide constant.
pub fn mapping(ch: char) -> Option<&'static str> {
    let replacement = match ch {
        'ا' => "a",
        'آ' => "aa",
        'ب' => "b",
        'پ' => "p",
        'ت' => "t",
        'ٹ' => "t",
        'ث' => "s",
        'ج' => "j",
        'چ' => "ch",
        'ح' => "h",
        'خ' => "kh",
        'د' => "d",
        'ڈ' => "d",
        'ر' => "r",
        'ڑ' => "r",
        'ز' => "z",
        'ژ' => "zh",
        'س' => "s",
        'ش' => "sh",
        'ص' => "s",
        'ض' => "z",
        'ط' => "t",
        'ظ' => "z",
        'ع' => "'",
        'غ' => "gh",
        'ف' => "f",
        'ق' => "q",
        'ک' => "k",
        'گ' => "g",
        'ل' => "l",
        'م' => "m",
        'ن' => "n",
        'ں' => "n",
        'و' => "w",
        'ی' => "y",
        'ئ' => "'",
        'ء' => "'",
        'ہ' => "h",
        'ھ' => "h",
        '\u{064E}' => "a", // fatha
        '\u{0650}' => "i", // kasra
        '\u{064F}' => "u", // damma
        '\u{0670}' => "a", // superscript alef
        _ => return None,
    };
    Some(replacement)
}

/// Transliterate a line character by character, preserving original order.
///
/// Unmapped characters (punctuation, digits, Latin text, whitespace) are
/// copied through as-is.
pub fn transliterate(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match mapping(ch) {
            Some(replacement) => result.push_str(replacement),
            None => result.push(ch),
        }
    }
    result
}
