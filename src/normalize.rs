//! Pluggable line normalization applied before transliteration.
//!
//! Selection happens once at process start via [`resolve`]; the chosen
//! variant is injected into the pipeline rather than read from a global,
//! so tests can substitute their own implementation.

use std::sync::Arc;
use tracing::info;

/// A line-level normalizer. Implementations must not merge, split, or
/// reorder lines; each call maps one input line to one output line.
pub trait Normalize: Send + Sync {
    fn normalize(&self, line: &str) -> String;

    /// Short identifier used in logs and run stats.
    fn name(&self) -> &'static str;
}

/// Passthrough normalizer. Idempotent by construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl Normalize for IdentityNormalizer {
    fn normalize(&self, line: &str) -> String {
        line.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Script-aware normalizer: unifies Arabic code points with their Urdu
/// equivalents and collapses whitespace runs.
///
/// Vowel diacritics are kept untouched; the transliteration table consumes
/// them.
#[cfg(feature = "urdu-normalization")]
#[derive(Debug, Clone, Copy, Default)]
pub struct UrduNormalizer;

#[cfg(feature = "urdu-normalization")]
impl UrduNormalizer {
    /// Map Arabic presentation variants to the Urdu code points the
    /// transliteration table is keyed on.
    fn unify_char(ch: char) -> char {
        match ch {
            'ي' | 'ى' => 'ی',
            'ك' => 'ک',
            'ه' => 'ہ',
            'أ' | 'إ' => 'ا',
            '\u{00A0}' => ' ',
            _ => ch,
        }
    }
}

#[cfg(feature = "urdu-normalization")]
impl Normalize for UrduNormalizer {
    fn normalize(&self, line: &str) -> String {
        let mut result = String::with_capacity(line.len());
        let mut pending_space = false;
        for ch in line.chars() {
            let ch = Self::unify_char(ch);
            if ch.is_whitespace() {
                pending_space = true;
            } else {
                // Interior whitespace runs collapse to a single space;
                // leading and trailing runs are dropped entirely
                if pending_space && !result.is_empty() {
                    result.push(' ');
                }
                result.push(ch);
                pending_space = false;
            }
        }
        result
    }

    fn name(&self) -> &'static str {
        "urdu"
    }
}

/// Resolve the process-wide normalizer exactly once, at startup.
///
/// Availability is decided at compile time: with the `urdu-normalization`
/// feature the script-aware variant is used, otherwise the identity
/// passthrough. There is no per-call fallback.
pub fn resolve() -> Arc<dyn Normalize> {
    #[cfg(feature = "urdu-normalization")]
    {
        info!("Normalizer selected: urdu");
        return Arc::new(UrduNormalizer);
    }
    #[cfg(not(feature = "urdu-normalization"))]
    {
        info!("Normalizer selected: identity (urdu-normalization not compiled in)");
        Arc::new(IdentityNormalizer)
    }
}
