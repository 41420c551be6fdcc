//! Buffered line reading with a single line of pushback.
//!
//! The decoder pulls lines one at a time and, when it reads one line too far
//! (the first line of a sibling or parent entry), hands it back with
//! [`LineSource::unget_line`]. Only one line can be held back at a time; a second
//! unget before the next read is reported as [`Error::PushbackOccupied`].

use crate::{Error, Result};
use std::io::BufRead;

const DOCUMENT_START: &str = "---";
const DOCUMENT_END: &str = "...";

/// Line reader over any [`BufRead`] source.
pub(crate) struct LineSource<R> {
    reader: R,
    pushback: Option<(usize, String)>,
    // Number of the line most recently handed out.
    line_no: usize,
    lines_read: usize,
    at_eof: bool,
}

impl<R: BufRead> LineSource<R> {
    pub(crate) fn new(reader: R) -> Self {
        LineSource {
            reader,
            pushback: None,
            line_no: 0,
            lines_read: 0,
            at_eof: false,
        }
    }

    /// 1-based number of the line most recently returned.
    pub(crate) fn line_no(&self) -> usize {
        self.line_no
    }

    /// Returns the next raw line without its terminator, or `None` at end of input.
    ///
    /// A final line with no terminator is still returned once.
    pub(crate) fn get_line(&mut self) -> Result<Option<String>> {
        if let Some((line_no, line)) = self.pushback.take() {
            self.line_no = line_no;
            return Ok(Some(line));
        }
        if self.at_eof {
            return Ok(None);
        }

        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            self.at_eof = true;
            return Ok(None);
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        self.lines_read += 1;
        self.line_no = self.lines_read;
        Ok(Some(buf))
    }

    /// Stores `line` so the next read returns it again.
    pub(crate) fn unget_line(&mut self, line: String) -> Result<()> {
        if self.pushback.is_some() {
            return Err(Error::PushbackOccupied {
                line: self.line_no,
            });
        }
        self.pushback = Some((self.line_no, line));
        Ok(())
    }

    /// Returns the next line that carries content.
    ///
    /// Comments are stripped first; lines left blank and the `---` / `...`
    /// document markers are skipped.
    pub(crate) fn get_non_empty_line(&mut self) -> Result<Option<String>> {
        while let Some(mut line) = self.get_line()? {
            line.truncate(strip_comment(&line).len());
            let content = line.trim_end();
            if content.trim_start().is_empty()
                || content == DOCUMENT_START
                || content == DOCUMENT_END
            {
                continue;
            }
            return Ok(Some(line));
        }
        Ok(None)
    }
}

/// Number of leading space characters.
pub(crate) fn indent_of(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// Byte offset of the first `ch` in `s` that is not preceded by a backslash.
pub(crate) fn find_unescaped(s: &str, ch: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if c == ch && !escaped {
            return Some(i);
        }
        escaped = c == '\\' && !escaped;
    }
    None
}

/// Cuts `line` at its first unescaped `#`.
pub(crate) fn strip_comment(line: &str) -> &str {
    match find_unescaped(line, '#') {
        Some(i) => &line[..i],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(text: &str) -> LineSource<&[u8]> {
        LineSource::new(text.as_bytes())
    }

    #[test]
    fn test_get_line_strips_terminators() {
        let mut lines = source("a\r\nb\nc");
        assert_eq!(lines.get_line().unwrap().as_deref(), Some("a"));
        assert_eq!(lines.get_line().unwrap().as_deref(), Some("b"));
        // Final line without a terminator is still a line.
        assert_eq!(lines.get_line().unwrap().as_deref(), Some("c"));
        assert_eq!(lines.line_no(), 3);
        assert_eq!(lines.get_line().unwrap(), None);
        assert_eq!(lines.get_line().unwrap(), None);
    }

    #[test]
    fn test_pushback_replays_once() {
        let mut lines = source("one\ntwo\n");
        let first = lines.get_line().unwrap().unwrap();
        lines.unget_line(first).unwrap();
        assert_eq!(lines.get_line().unwrap().as_deref(), Some("one"));
        assert_eq!(lines.line_no(), 1);
        assert_eq!(lines.get_line().unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_double_unget_is_an_error() {
        let mut lines = source("x\n");
        lines.unget_line("a".to_string()).unwrap();
        let err = lines.unget_line("b".to_string()).unwrap_err();
        assert!(matches!(err, Error::PushbackOccupied { .. }));
        // The first line is still intact.
        assert_eq!(lines.get_line().unwrap().as_deref(), Some("a"));
    }

    #[test]
    fn test_non_empty_skips_comments_blanks_and_markers() {
        let mut lines = source("---\n# header\n\n   \nkey: v # trailing\n...\n  # indented\n");
        assert_eq!(
            lines.get_non_empty_line().unwrap().as_deref(),
            Some("key: v ")
        );
        assert_eq!(lines.line_no(), 5);
        assert_eq!(lines.get_non_empty_line().unwrap(), None);
    }

    #[test]
    fn test_escaped_hash_is_not_a_comment() {
        assert_eq!(strip_comment(r"a: x\#y # z"), r"a: x\#y ");
        assert_eq!(strip_comment("plain"), "plain");
    }

    #[test]
    fn test_find_unescaped() {
        assert_eq!(find_unescaped("a:b", ':'), Some(1));
        assert_eq!(find_unescaped(r"a\:b:c", ':'), Some(4));
        assert_eq!(find_unescaped(r"a\\:b", ':'), Some(3));
        assert_eq!(find_unescaped("abc", ':'), None);
    }

    #[test]
    fn test_indent_of() {
        assert_eq!(indent_of("    x"), 4);
        assert_eq!(indent_of("x"), 0);
        assert_eq!(indent_of("\tx"), 0);
    }
}
