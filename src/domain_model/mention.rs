use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@?([A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,})")
        .expect("mention pattern compiles")
});

/// Email addresses mentioned in `text`, with or without a leading `@`.
///
/// Duplicates are dropped; the first occurrence decides the position.
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    MENTION
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|email| seen.insert(email.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_at_prefixed_mentions() {
        let emails = extract_emails("Hello World! @kate@example.com and @lisa@example.org");
        assert_eq!(emails, vec!["kate@example.com", "lisa@example.org"]);
    }

    #[test]
    fn extracts_bare_addresses() {
        assert_eq!(
            extract_emails("Hello mentioned@example.com"),
            vec!["mentioned@example.com"]
        );
    }

    #[test]
    fn trailing_punctuation_is_not_part_of_the_address() {
        assert_eq!(
            extract_emails("ping @kate@example.com, then @bob@example.com."),
            vec!["kate@example.com", "bob@example.com"]
        );
    }

    #[test]
    fn duplicates_keep_first_position() {
        assert_eq!(
            extract_emails("@b@x.io @a@x.io @b@x.io"),
            vec!["b@x.io", "a@x.io"]
        );
    }

    #[test]
    fn plain_text_has_no_mentions() {
        assert!(extract_emails("Hello world, @nobody here").is_empty());
        assert!(extract_emails("").is_empty());
    }
}
