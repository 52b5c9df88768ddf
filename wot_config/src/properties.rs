//! Java-style properties reader.
//!
//! Follows the `java.util.Properties` line format:
//! - comment lines start with `#` or `!` after optional leading whitespace;
//! - a line ending in an odd number of backslashes continues on the next line,
//!   whose leading whitespace is dropped;
//! - the key ends at the first unescaped `=`, `:` or whitespace, and one `=`/`:`
//!   after whitespace is part of the separator;
//! - `\t`, `\n`, `\r`, `\f`, `\uXXXX` and `\<char>` escapes are decoded.
//!
//! Trailing whitespace of a value is dropped.

use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Default, Clone)]
pub struct Properties(HashMap<String, String>);

impl Properties {
    pub fn parse(text: &str) -> eyre::Result<Self> {
        let mut map = HashMap::new();
        for (line, logical) in logical_lines(text) {
            let (key, value) = split_entry(&logical);
            let key = unescape(key, line)?;
            let value = unescape(value.trim_end_matches(is_blank), line)?;
            map.insert(key, value);
        }
        Ok(Self(map))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn required(&self, key: &str) -> eyre::Result<&str> {
        self.get(key)
            .ok_or_else(|| eyre::eyre!("missing property '{key}'"))
    }

    pub fn parse_required<T>(&self, key: &str) -> eyre::Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.required(key)?;
        raw.parse::<T>()
            .map_err(|e| eyre::eyre!("property '{key}' has invalid value {raw:?}: {e}"))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn continues(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Join continued lines and drop blanks and comments. Each entry carries the
/// 1-based number of its first physical line.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_start_matches(is_blank);
        let (start, mut buf) = match pending.take() {
            Some(p) => p,
            None if line.is_empty() || line.starts_with(&['#', '!'][..]) => continue,
            None => (idx + 1, String::new()),
        };
        if continues(line) {
            buf.push_str(&line[..line.len() - 1]);
            pending = Some((start, buf));
        } else {
            buf.push_str(line);
            out.push((start, buf));
        }
    }
    out.extend(pending);
    out
}

/// Split a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut sep = None;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            sep = Some((i, c));
            break;
        }
    }
    let Some((i, c)) = sep else {
        return (line, "");
    };
    let mut rest = line[i + c.len_utf8()..].trim_start_matches(is_blank);
    if is_blank(c)
        && let Some(r) = rest.strip_prefix(&['=', ':'][..])
    {
        rest = r.trim_start_matches(is_blank);
    }
    (&line[..i], rest)
}

fn unescape(raw: &str, line: usize) -> eyre::Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4 && hex.chars().all(|h| h.is_ascii_hexdigit()))
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| eyre::eyre!("line {line}: malformed \\u escape {hex:?}"))?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}
