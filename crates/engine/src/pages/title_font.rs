//! Three-row stick-letter title font.
//!
//! Every glyph's rows are padded to the same width so letters line up column by column.

const GLYPHS: [(char, [&str; 3]); 27] = [
    ('A', ["    ", " /\\ ", "/__\\"]),
    ('B', [" __ ", "|__)", "|__)"]),
    ('C', [" __ ", "/  `", "\\__,"]),
    ('D', ["__  ", "|  \\", "|__/"]),
    ('E', [" ___", "|__ ", "|___"]),
    ('F', [" ___", "|__ ", "|   "]),
    ('G', [" __ ", "/ _`", "\\__>"]),
    ('H', ["    ", "|__|", "|  |"]),
    ('I', [" ", "|", "|"]),
    ('J', ["    ", "   |", "\\__/"]),
    ('K', ["    ", "|__/", "|  \\"]),
    ('L', ["    ", "|   ", "|___"]),
    ('M', ["    ", "|\\/|", "|  |"]),
    ('N', ["    ", "|\\ |", "| \\|"]),
    ('O', [" __ ", "/  \\", "\\__/"]),
    ('P', [" __ ", "|__)", "|   "]),
    ('Q', [" __ ", "/  \\", "\\__X"]),
    ('R', [" __ ", "|__)", "|  \\"]),
    ('S', [" __ ", "/__`", ".__/"]),
    ('T', ["___", " | ", " | "]),
    ('U', ["    ", "|  |", "\\__/"]),
    ('V', ["    ", "\\  /", " \\/ "]),
    ('W', ["    ", "|  |", "|/\\|"]),
    ('X', ["   ", "\\_/", "/ \\"]),
    ('Y', ["   ", "\\ /", " | "]),
    ('Z', ["__", " /", "/_"]),
    (' ', ["  ", "  ", "  "]),
];

/// Rows of the glyph for `ch` (case-insensitive); unknown characters map to space.
pub fn title_glyph(ch: char) -> [&'static str; 3] {
    let upper = ch.to_ascii_uppercase();
    GLYPHS
        .iter()
        .find(|(c, _)| *c == upper)
        .or_else(|| GLYPHS.iter().find(|(c, _)| *c == ' '))
        .map(|(_, rows)| *rows)
        .unwrap_or(["  ", "  ", "  "])
}

/// Render `text` in the title font: three lines, one column between letters.
pub fn ascii_title(text: &str) -> String {
    let mut rows = [String::new(), String::new(), String::new()];
    for ch in text.chars() {
        let glyph = title_glyph(ch);
        for (row, part) in rows.iter_mut().zip(glyph) {
            row.push_str(part);
            row.push(' ');
        }
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_rows_share_a_width() {
        for (ch, rows) in GLYPHS {
            let w = rows[0].chars().count();
            assert!(rows.iter().all(|r| r.chars().count() == w), "glyph {ch:?}");
        }
    }

    #[test]
    fn title_is_uppercased_and_spaced() {
        let t = ascii_title("wi");
        assert_eq!(t, "       \n|  | | \n|/\\| | ");
        assert_eq!(ascii_title("WI"), t);
    }

    #[test]
    fn unknown_characters_become_space() {
        assert_eq!(title_glyph('7'), title_glyph(' '));
        assert_eq!(ascii_title("?"), "   \n   \n   ");
    }

    #[test]
    fn every_line_has_equal_length() {
        let t = ascii_title("work");
        let widths: Vec<usize> = t.lines().map(|l| l.chars().count()).collect();
        assert_eq!(widths.len(), 3);
        assert!(widths.iter().all(|&w| w == widths[0]));
    }
}
