use crate::constants::SPACE;
use bytes::BytesMut;

pub(crate) trait BufferWriter {
    fn write_to_buffer(&self, buffer: &mut BytesMut);
}

/// Writes every item separated by a single space, with no leading or trailing space.
pub(crate) fn write_space_separated<'a, T, I>(buffer: &mut BytesMut, items: I)
where
    T: BufferWriter + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut first = true;
    for item in items {
        if !first {
            buffer.extend_from_slice(&[SPACE]);
        }
        item.write_to_buffer(buffer);
        first = false;
    }
}

#[inline]
pub fn trim_trailing_whitespace(buffer: &mut BytesMut) {
    let trimmed = buffer
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    buffer.truncate(trimmed);
}

/// Removes one trailing `separator` (and any whitespace after it).
pub fn strip_trailing_separator(value: &str, separator: char) -> &str {
    let trimmed = value.trim_end();
    trimmed.strip_suffix(separator).unwrap_or(trimmed)
}

/// Joins values, wrapping each in double quotes: `"a","b"`.
pub fn join_quoted<I, S>(values: I, separator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for value in values {
        if !out.is_empty() {
            out.push_str(separator);
        }
        out.push('"');
        out.push_str(value.as_ref());
        out.push('"');
    }
    out
}

#[inline]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Header values are assembled from `&str` input only, so the buffer is always UTF-8.
pub(crate) fn buffer_into_string(buffer: BytesMut) -> String {
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_trailing_whitespace() {
        let mut buffer = BytesMut::from(&b"style-src 'self'; \t "[..]);
        trim_trailing_whitespace(&mut buffer);
        assert_eq!(&buffer[..], b"style-src 'self';");

        let mut blank = BytesMut::from(&b"   "[..]);
        trim_trailing_whitespace(&mut blank);
        assert!(blank.is_empty());
    }

    #[test]
    fn test_strip_trailing_separator() {
        assert_eq!(strip_trailing_separator("a, b,", ','), "a, b");
        assert_eq!(strip_trailing_separator("a;b; ", ';'), "a;b");
        assert_eq!(strip_trailing_separator("a", ';'), "a");
    }

    #[test]
    fn test_join_quoted() {
        assert_eq!(join_quoted(["cache", "cookies"], ","), "\"cache\",\"cookies\"");
        assert_eq!(join_quoted(Vec::<&str>::new(), ","), "");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank(" /report "));
    }
}
