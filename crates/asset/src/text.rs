//! Line-oriented helpers shared by the OBJ and MTL readers.

use std::{io::BufRead, path::Path};

use corelib::{GlusError, GlusResult};

/// One non-empty, non-comment line with its 1-based number.
pub(crate) struct Line<'a> {
    pub number: usize,
    pub content: &'a str,
}

impl Line<'_> {
    pub fn malformed(&self, reason: impl Into<String>) -> GlusError {
        GlusError::MalformedLine {
            line: self.number,
            content: self.content.to_owned(),
            reason: reason.into(),
        }
    }

    /// Everything after the keyword, trimmed. Used for names and file names
    /// that may contain spaces.
    pub fn rest(&self, keyword: &str) -> &str {
        self.content[keyword.len()..].trim()
    }
}

/// Feeds every meaningful line of `reader` to `f`, stopping at the first error.
///
/// Lines are decoded lossily, so bytes that are not UTF-8 (e.g. Latin-1
/// comments or names) become U+FFFD instead of failing the read.
pub(crate) fn for_each_line<R, F>(mut reader: R, source: &Path, mut f: F) -> GlusResult<()>
where
    R: BufRead,
    F: FnMut(&str, &mut std::str::SplitWhitespace<'_>, &Line<'_>) -> GlusResult<()>,
{
    let mut buf = Vec::new();
    let mut number = 0;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| GlusError::io(source, e))?;
        if read == 0 {
            return Ok(());
        }
        number += 1;

        let decoded = String::from_utf8_lossy(&buf);
        let trimmed = decoded.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };
        let line = Line {
            number,
            content: trimmed,
        };
        f(keyword, &mut parts, &line)?;
    }
}

pub(crate) fn parse_f32(value: Option<&str>, line: &Line<'_>, what: &str) -> GlusResult<f32> {
    let token = value.ok_or_else(|| line.malformed(format!("missing {what}")))?;
    token
        .parse::<f32>()
        .map_err(|_| line.malformed(format!("invalid {what} '{token}'")))
}

/// Reads three floats, e.g. a position or an RGB triple.
pub(crate) fn parse_f32x3<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line: &Line<'_>,
    what: [&str; 3],
) -> GlusResult<[f32; 3]> {
    Ok([
        parse_f32(parts.next(), line, what[0])?,
        parse_f32(parts.next(), line, what[1])?,
        parse_f32(parts.next(), line, what[2])?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn skips_comments_and_blanks() {
        let src = "# header\n\n  v 1 2 3  \n# tail\nvn 0 0 1\n";
        let mut seen = Vec::new();
        for_each_line(Cursor::new(src), Path::new("<test>"), |keyword, parts, line| {
            seen.push((line.number, keyword.to_owned(), parts.count()));
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![(3, "v".into(), 3), (5, "vn".into(), 3)]);
    }

    #[test]
    fn tolerates_bytes_that_are_not_utf8() {
        let src: &[u8] = b"# caf\xe9\r\ng caf\xe9 au lait\r\nv 1 2 3";
        let mut seen = Vec::new();
        for_each_line(Cursor::new(src), Path::new("<test>"), |keyword, _, line| {
            let rest = line.rest(keyword).to_owned();
            seen.push((line.number, keyword.to_owned(), rest));
            Ok(())
        })
        .unwrap();
        assert_eq!(
            seen,
            vec![
                (2, "g".into(), "caf\u{fffd} au lait".into()),
                (3, "v".into(), "1 2 3".into()),
            ]
        );
    }

    #[test]
    fn float_errors_carry_line() {
        let line = Line {
            number: 7,
            content: "v 1 x 3",
        };
        let mut parts = line.content.split_whitespace().skip(1);
        let err = parse_f32x3(&mut parts, &line, ["x", "y", "z"]).unwrap_err();
        assert!(matches!(err, GlusError::MalformedLine { line: 7, .. }));
        assert_eq!(line.rest("v"), "1 x 3");
    }
}
