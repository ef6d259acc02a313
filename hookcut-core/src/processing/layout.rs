//! Caption text layout.

/// Wraps `text` greedily into lines of at most `chars_per_line` characters.
///
/// Words are never split; a word longer than the budget gets a line of its
/// own. Whitespace-only input yields an empty string.
#[must_use]
pub fn wrap(text: &str, chars_per_line: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= chars_per_line {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap("Miss you", 23), "Miss you");
    }

    #[test]
    fn breaks_between_words() {
        let wrapped = wrap("when he finally texts back after three days", 23);
        assert_eq!(wrapped, "when he finally texts\nback after three days");
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 23);
        }
    }

    #[test]
    fn overlong_word_sits_alone() {
        let wrapped = wrap("a supercalifragilisticexpialidocious day", 10);
        assert_eq!(wrapped, "a\nsupercalifragilisticexpialidocious\nday");
    }

    #[test]
    fn words_survive_wrapping() {
        let text = "  the   quick brown fox\tjumps over the lazy dog  ";
        let wrapped = wrap(text, 9);
        let original: Vec<&str> = text.split_whitespace().collect();
        let rewrapped: Vec<&str> = wrapped.split_whitespace().collect();
        assert_eq!(original, rewrapped);
    }

    #[test]
    fn blank_text_is_empty() {
        assert_eq!(wrap("", 23), "");
        assert_eq!(wrap("   \n ", 23), "");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(wrap("café café", 9), "café café");
    }
}
