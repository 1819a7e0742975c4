//! Extraction of `@student@example.com` mentions from notification text.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@(\S+\.com)").expect("valid regex"));

/// Emails mentioned in `text`, first occurrence order, without repeats.
///
/// A mention is `@` followed by a run of non-whitespace ending in `.com`.
/// The match is greedy within the run, so trailing punctuation after the
/// last `.com` is dropped but anything before it is kept.
///
/// ```
/// use rollcall::modules::notifications::mentions::extract_mentions;
///
/// let mentions = extract_mentions("Hey @studentagnes@gmail.com and @studentmiche@gmail.com!");
/// assert_eq!(mentions, vec!["studentagnes@gmail.com", "studentmiche@gmail.com"]);
/// ```
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    MENTION
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|email| seen.insert(*email))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_mentions() {
        assert!(extract_mentions("Hello students!").is_empty());
        assert!(extract_mentions("").is_empty());
    }

    #[test]
    fn test_mentions_in_order() {
        assert_eq!(
            extract_mentions("Hello @alice@test.com and @bob@test.com"),
            vec!["alice@test.com", "bob@test.com"]
        );
    }

    #[test]
    fn test_repeated_mentions_are_collapsed() {
        assert_eq!(
            extract_mentions("@bob@test.com @alice@test.com @bob@test.com"),
            vec!["bob@test.com", "alice@test.com"]
        );
    }

    #[test]
    fn test_only_dot_com_addresses_match() {
        assert!(extract_mentions("ping @someone@school.org").is_empty());
    }

    #[test]
    fn test_trailing_punctuation_is_dropped() {
        assert_eq!(
            extract_mentions("Well done @carol@test.com."),
            vec!["carol@test.com"]
        );
    }

    #[test]
    fn test_mention_without_leading_space() {
        assert_eq!(
            extract_mentions("cc:@dave@test.com"),
            vec!["dave@test.com"]
        );
    }
}
