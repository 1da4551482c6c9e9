//! Id derivation for cards and tabs.
//!
//! Card ids are plain slugs and collisions are reported to the caller. Tab ids
//! carry a clock suffix because they double as navigation anchors and two tabs
//! with the same title must never share one.

use chrono::Utc;

/// Lowercase `title` and join its words with single hyphens.
///
/// Characters that would split a path segment (`.`, `[`, `]`) are replaced by
/// hyphens as well so that every derived id stays addressable.
///
/// ```
/// use battlecards_core::slugify;
///
/// assert_eq!(slugify("Google  AppSheet"), "google-appsheet");
/// assert_eq!(slugify(" Node.js "), "node-js");
/// ```
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| match c {
                    '.' | '[' | ']' => '-',
                    c => c,
                })
                .collect::<String>()
                .to_lowercase()
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// `{card_id}-{slug}-{suffix}`
pub fn tab_id(card_id: &str, title: &str, suffix: &str) -> String {
    format!("{}-{}-{}", card_id, slugify(title), suffix)
}

/// Monotonic suffix source: base-36 milliseconds, bumped when the clock has
/// not advanced since the previous call.
#[derive(Debug, Default, Clone)]
pub struct SuffixClock {
    last: i64,
}

impl SuffixClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_suffix(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        let value = if now > self.last { now } else { self.last + 1 };
        self.last = value;
        to_base36(value.unsigned_abs())
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_whitespace_runs() {
        assert_eq!(slugify("Salesforce"), "salesforce");
        assert_eq!(slugify("Microsoft \t Power   Apps"), "microsoft-power-apps");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_slugify_trims_surrounding_whitespace() {
        assert_eq!(slugify(" Acme"), "acme");
        assert_eq!(slugify("Acme Cloud \n"), "acme-cloud");
    }

    #[test]
    fn test_tab_id_shape() {
        assert_eq!(tab_id("acme", "Pricing Plans", "k2"), "acme-pricing-plans-k2");
    }

    #[test]
    fn test_suffixes_are_strictly_increasing() {
        let mut clock = SuffixClock::new();
        let a = clock.next_suffix();
        let b = clock.next_suffix();
        let c = clock.next_suffix();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(a.len() <= b.len());
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
