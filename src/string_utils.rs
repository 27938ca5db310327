//! Character-offset string utilities
//!
//! Document positions count characters, while Rust strings are indexed by
//! UTF-8 bytes. These helpers convert between the two so that editing never
//! slices inside a multi-byte character (`ø`, `中`, `🎉`, ...).

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the character at `char_offset`.
///
/// Offsets past the end clamp to `text.len()`.
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Split `text` at a character offset, returning the tail.
pub fn split_off_chars(text: &mut String, char_offset: usize) -> String {
    let byte = char_to_byte(text, char_offset);
    text.split_off(byte)
}

/// Substring between two character offsets.
pub fn slice_chars(text: &str, from: usize, to: usize) -> &str {
    let start = char_to_byte(text, from);
    let end = char_to_byte(text, to.max(from));
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_multibyte() {
        assert_eq!(char_len("Hei på deg"), 10);
        assert_eq!(char_len("🎉🎉"), 2);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_char_to_byte() {
        let text = "på deg";
        assert_eq!(char_to_byte(text, 0), 0);
        assert_eq!(char_to_byte(text, 2), 3);
        assert_eq!(char_to_byte(text, 100), text.len());
    }

    #[test]
    fn test_split_off_chars() {
        let mut text = String::from("中文字");
        let tail = split_off_chars(&mut text, 1);
        assert_eq!(text, "中");
        assert_eq!(tail, "文字");
    }

    #[test]
    fn test_slice_chars() {
        assert_eq!(slice_chars("Hei på deg", 4, 6), "på");
        assert_eq!(slice_chars("abc", 2, 1), "");
        assert_eq!(slice_chars("abc", 1, 10), "bc");
    }
}
