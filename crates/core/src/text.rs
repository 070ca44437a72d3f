//! Text block measurement and word wrapping.

use crate::types::Vec2;

/// Size of a text block in cells: `(longest line in chars, line count)`.
///
/// An empty string is one empty line, so its size is `(0, 1)`.
pub fn block_size(text: &str) -> Vec2 {
    let mut width = 0usize;
    let mut lines = 0usize;
    for line in text.split('\n') {
        width = width.max(line.chars().count());
        lines += 1;
    }
    Vec2::new(width as f32, lines as f32)
}

/// Word-wrap `text` so no line exceeds `max_width` characters.
///
/// Input lines are treated as paragraphs and separated by a blank line in the output.
/// A single word longer than `max_width` gets a line of its own and is not split. Runs
/// of spaces collapse to one.
///
/// ```
/// use ascii_field_core::wrap_text;
///
/// assert_eq!(wrap_text("the quick brown fox", 10), "the quick\nbrown fox");
/// assert_eq!(wrap_text("one\ntwo", 10), "one\n\ntwo");
/// ```
pub fn wrap_text(text: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);

    for (p, paragraph) in text.split('\n').enumerate() {
        if p > 0 {
            out.push_str("\n\n");
        }
        let mut line_len = 0usize;
        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let word_len = word.chars().count();
            if line_len == 0 {
                out.push_str(word);
                line_len = word_len;
            } else if line_len + 1 + word_len <= max_width {
                out.push(' ');
                out.push_str(word);
                line_len += 1 + word_len;
            } else {
                out.push('\n');
                out.push_str(word);
                line_len = word_len;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn size_of_multiline_block() {
        assert_eq!(block_size("ab\nabcd\n"), Vec2::new(4.0, 3.0));
        assert_eq!(block_size(""), Vec2::new(0.0, 1.0));
        assert_eq!(block_size("héllo"), Vec2::new(5.0, 1.0));
    }

    #[test]
    fn wrap_respects_width() {
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do";
        let wrapped = wrap_text(text, 12);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 12, "{line:?}");
        }
    }

    #[test]
    fn wrap_keeps_words_in_order() {
        let text = "alpha beta gamma delta epsilon";
        let wrapped = wrap_text(text, 11);
        let words: Vec<&str> = wrapped.split_whitespace().collect();
        assert_eq!(words, text.split(' ').collect::<Vec<_>>());
    }

    #[test]
    fn long_word_gets_its_own_line() {
        assert_eq!(wrap_text("a incomprehensibilities b", 5), "a\nincomprehensibilities\nb");
        assert_eq!(wrap_text("incomprehensibilities", 5), "incomprehensibilities");
    }

    #[test]
    fn exact_fit_stays_on_one_line() {
        assert_eq!(wrap_text("abc def", 7), "abc def");
        assert_eq!(wrap_text("abc defg", 7), "abc\ndefg");
    }

    #[test]
    fn empty_input() {
        assert_eq!(wrap_text("", 10), "");
    }

    proptest! {
        #[test]
        fn wrapped_lines_fit_unless_one_long_word(
            words in prop::collection::vec("[a-z]{1,14}", 0..40),
            max_width in 1usize..30,
        ) {
            let text = words.join(" ");
            for line in wrap_text(&text, max_width).lines() {
                let len = line.chars().count();
                prop_assert!(len <= max_width || !line.contains(' '), "{line:?} exceeds {max_width}");
            }
        }
    }
}
