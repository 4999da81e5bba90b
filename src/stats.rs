use serde::Serialize;

/// Counts shown next to converted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStatistics {
    /// Unicode scalar values, not bytes and not grapheme clusters.
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
}

impl TextStatistics {
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split_whitespace().count(),
            lines: memchr::memchr_iter(b'\n', text.as_bytes()).count() + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_one_line_and_no_words() {
        assert_eq!(
            TextStatistics::of(""),
            TextStatistics {
                characters: 0,
                words: 0,
                lines: 1
            }
        );
        assert_eq!(TextStatistics::of("   ").words, 0);
    }

    #[test]
    fn counts_codepoints_not_bytes() {
        let s = TextStatistics::of("કિતાબ");
        assert_eq!(s.characters, 5);
        assert_eq!(s.words, 1);
    }

    #[test]
    fn lines_and_words() {
        let s = TextStatistics::of("  એક  બે\nત્રણ\n");
        assert_eq!(s.words, 3);
        assert_eq!(s.lines, 3);
    }
}
