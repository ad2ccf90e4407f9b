use anyhow::Result;
use std::io::{BufRead, Lines};

/// Iterator over the text fragments of a line-delimited streaming response.
///
/// Each non-empty line goes through `parse_line`; lines that carry no text
/// (keep-alives, terminators) are skipped. The first read or parse error is
/// yielded once and ends the stream.
pub struct LineFragments<R, F> {
    lines: Lines<R>,
    parse_line: F,
    done: bool,
}

impl<R, F> LineFragments<R, F>
where
    R: BufRead,
    F: FnMut(&str) -> Result<Option<String>>,
{
    pub fn new(reader: R, parse_line: F) -> Self {
        LineFragments {
            lines: reader.lines(),
            parse_line,
            done: false,
        }
    }
}

impl<R, F> Iterator for LineFragments<R, F>
where
    R: BufRead,
    F: FnMut(&str) -> Result<Option<String>>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(anyhow::Error::new(e).context("failed to read model stream")));
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match (self.parse_line)(line) {
                Ok(Some(chunk)) => {
                    log::trace!("stream fragment: {chunk:?}");
                    return Some(Ok(chunk));
                }
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Payload of a server-sent-events `data:` line, if this is one.
pub fn sse_data(line: &str) -> Option<&str> {
    let line = line.trim_start();
    line.strip_prefix("data:").map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::io::Cursor;

    fn parse_plain(line: &str) -> Result<Option<String>> {
        match line {
            "skip" => Ok(None),
            "boom" => Err(anyhow!("bad line")),
            other => Ok(Some(other.to_string())),
        }
    }

    #[test]
    fn yields_fragments_in_order_and_skips_blanks() {
        let body = "one\n\nskip\ntwo\n   \nthree\n";
        let out: Vec<String> = LineFragments::new(Cursor::new(body), parse_plain)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(out, vec!["one", "two", "three"]);
    }

    #[test]
    fn stops_after_first_error() {
        let body = "one\nboom\ntwo\n";
        let mut it = LineFragments::new(Cursor::new(body), parse_plain);
        assert_eq!(it.next().unwrap().unwrap(), "one");
        assert!(it.next().unwrap().is_err());
        assert!(it.next().is_none());
    }

    #[test]
    fn sse_data_extracts_payload() {
        assert_eq!(sse_data("data: {\"a\":1}"), Some("{\"a\":1}"));
        assert_eq!(sse_data("data:[DONE]"), Some("[DONE]"));
        assert_eq!(sse_data("event: ping"), None);
    }
}
