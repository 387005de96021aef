//! Greedy line-wrapping for text elements.

use crate::settings::Settings;

/// Characters a line never spans: `\n`, `\r` and the Unicode line/paragraph
/// separators.
fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Wrap `text` so no line exceeds `line_len` characters.
///
/// With `force_wrap` every line is cut at exactly `line_len` characters.
/// Otherwise lines break at whitespace; a word longer than `line_len` stays
/// whole on its own line. Existing line breaks (including `\r\n`) are kept.
/// A `line_len` of 0 leaves the text untouched.
pub fn wrap_text(text: &str, line_len: usize, force_wrap: bool) -> String {
    if line_len == 0 {
        return text.to_string();
    }
    if force_wrap {
        return force_wrap_text(text, line_len);
    }

    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let whitespace_end = |from: usize| {
        from + chars[from..].iter().take_while(|c| c.is_whitespace()).count()
    };

    let mut outstring = String::with_capacity(text.len() + text.len() / line_len);
    let mut p = 0;
    while p < n {
        // Longest run of at most `line_len` characters ending at whitespace
        // or at the end of the text.
        let reach = chars[p..]
            .iter()
            .take(line_len)
            .take_while(|c| !is_line_break(**c))
            .count();
        let fitted = (1..=reach)
            .rev()
            .map(|k| p + k)
            .find(|&q| q == n || chars[q].is_whitespace());

        // Otherwise an unbreakable word, whatever its length.
        let chunk_end = match fitted {
            Some(q) => q,
            None if !chars[p].is_whitespace() => {
                p + chars[p..].iter().take_while(|c| !c.is_whitespace()).count()
            }
            None => {
                p += 1;
                continue;
            }
        };

        let chunk: String = chars[p..chunk_end].iter().collect();
        outstring.push_str(chunk.trim_end());

        let gap_end = whitespace_end(chunk_end);
        let gap = &chars[chunk_end..gap_end];
        if gap.contains(&'\n') {
            outstring.extend(gap.iter());
        } else {
            outstring.push('\n');
        }
        p = gap_end;
    }

    strip_trailing_newline(outstring)
}

/// Wrap with the width and mode configured in `settings`.
pub fn wrap_with_settings(text: &str, settings: &Settings) -> String {
    wrap_text(text, settings.wrap_line_length, settings.force_wrap)
}

fn force_wrap_text(text: &str, line_len: usize) -> String {
    let mut outstring = String::with_capacity(text.len() + text.len() / line_len);

    for line in text.split('\n') {
        let pieces: Vec<String> = line
            .split(is_line_break)
            .filter(|run| !run.is_empty())
            .flat_map(|run| {
                let chars: Vec<char> = run.chars().collect();
                chars
                    .chunks(line_len)
                    .map(|piece| piece.iter().collect::<String>())
                    .collect::<Vec<_>>()
            })
            .collect();
        outstring.push_str(&pieces.join("\n"));
        outstring.push('\n');
    }

    strip_trailing_newline(outstring)
}

fn strip_trailing_newline(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_is_passthrough() {
        assert_eq!(wrap_text("leave me  alone", 0, false), "leave me  alone");
        assert_eq!(wrap_text("leave me", 0, true), "leave me");
    }

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(
            wrap_text("the quick brown fox jumps", 10, false),
            "the quick\nbrown fox\njumps"
        );
    }

    #[test]
    fn long_word_stays_whole() {
        assert_eq!(
            wrap_text("a supercalifragilistic word", 5, false),
            "a\nsupercalifragilistic\nword"
        );
    }

    #[test]
    fn existing_breaks_are_kept() {
        assert_eq!(wrap_text("one\ntwo", 20, false), "one\ntwo");
        assert_eq!(wrap_text("one\n\ntwo", 20, false), "one\n\ntwo");
    }

    #[test]
    fn crlf_breaks_are_kept() {
        assert_eq!(wrap_text("ab\r\ncd", 10, false), "ab\r\ncd");
        assert_eq!(wrap_text("one two\r\nthree", 3, false), "one\ntwo\r\nthree");
    }

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(wrap_text("hello", 20, false), "hello");
    }

    #[test]
    fn unmatched_leading_space_is_dropped() {
        assert_eq!(wrap_text(" abcdef", 3, false), "abcdef");
    }

    #[test]
    fn force_wrap_cuts_mid_word() {
        assert_eq!(wrap_text("abcdefgh", 3, true), "abc\ndef\ngh");
    }

    #[test]
    fn force_wrap_keeps_empty_lines() {
        assert_eq!(wrap_text("abcd\n\nef", 2, true), "ab\ncd\n\nef");
    }

    #[test]
    fn force_wrap_never_puts_carriage_return_in_a_chunk() {
        assert_eq!(wrap_text("ab\r\ncd", 10, true), "ab\ncd");
    }

    #[test]
    fn force_wrap_counts_characters_not_bytes() {
        assert_eq!(wrap_text("日本語テスト", 2, true), "日本\n語テ\nスト");
    }

    #[test]
    fn huge_widths_are_accepted() {
        let text = "word ".repeat(5000);
        let expected = format!("{}\n{}", &text[..19999], text[20000..].trim_end());
        assert_eq!(wrap_text(&text, 20000, false), expected);
        assert_eq!(wrap_text("abc", usize::MAX, true), "abc");
    }

    #[test]
    fn settings_drive_wrapping() {
        let settings = Settings {
            wrap_line_length: 3,
            force_wrap: true,
            ..Settings::default()
        };
        assert_eq!(wrap_with_settings("abcdef", &settings), "abc\ndef");
        assert_eq!(wrap_with_settings("abc def", &Settings::default()), "abc def");
    }
}
