/// Characters a shortened text may be cut after.
const BREAK_CHARS: [char; 2] = [' ', '-'];

const ELLIPSIS: char = '…';

/// Shorten `text` to at most `max` characters, ending it with `…`.
///
/// The cut is made at the last space or hyphen before position `max`, so
/// words stay whole and the ellipsis still fits. Text without any break
/// point is cut hard at `max - 1` characters. Lengths are counted in
/// characters, not bytes.
pub fn ellipsize(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if text.chars().count() <= max {
        return text.to_string();
    }

    let last_break = text
        .char_indices()
        .take(max)
        .skip(1)
        .filter(|(_, c)| BREAK_CHARS.contains(c))
        .map(|(offset, _)| offset)
        .last();

    let mut shortened = match last_break {
        Some(offset) => text[..offset].to_string(),
        None => text.chars().take(max - 1).collect(),
    };
    shortened.push(ELLIPSIS);
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(ellipsize("hello world", 20), "hello world");
        assert_eq!(ellipsize("exact", 5), "exact");
    }

    #[test]
    fn cuts_at_last_word_boundary() {
        assert_eq!(ellipsize("the quick brown fox", 12), "the quick…");
        assert_eq!(ellipsize("root-access module manager", 8), "root…");
    }

    #[test]
    fn cuts_hard_without_break_points() {
        assert_eq!(ellipsize("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "模块模块模块 模块模块模块";
        assert_eq!(ellipsize(text, 8), "模块模块模块…");
    }

    #[test]
    fn zero_max_is_empty() {
        assert_eq!(ellipsize("anything", 0), "");
    }

    #[test]
    fn long_summary_stays_within_limit() {
        let summary = "word ".repeat(200);
        let shortened = ellipsize(summary.trim(), 512);
        assert!(shortened.chars().count() <= 512);
        assert!(shortened.ends_with("word…"));
    }

    #[test]
    fn break_at_limit_is_not_used() {
        assert_eq!(ellipsize("aaaa bbbb", 4), "aaa…");

        let text = format!("{} tail", "a".repeat(512));
        let shortened = ellipsize(&text, 512);
        assert_eq!(shortened.chars().count(), 512);
        assert!(shortened.ends_with('…'));
    }
}
