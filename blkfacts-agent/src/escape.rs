//! Escape protocol for the colon-delimited tags fact.
//!
//! The attribute keys of one device are published as a single `:`-delimited
//! string, but a key may itself contain `:` or `\`. Encoding prefixes each
//! such character with `\`; decoding scans left to right so that only an
//! unescaped `:` splits. Encode and decode are inverses for any list of
//! non-empty keys.

pub const DELIMITER: char = ':';
pub const ESCAPE: char = '\\';

/// Escapes one key for embedding in the tags string.
pub fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        if c == DELIMITER || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Joins keys into the delimited tags string, escaping as needed.
pub fn encode_tags<'a, I>(keys: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for (i, key) in keys.into_iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push_str(&escape_key(key));
    }
    out
}

/// Splits a tags string back into keys, undoing the escaping.
///
/// A trailing lone `\` (which encode never produces) is kept as a literal.
pub fn decode_tags(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }

    let mut tags = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for c in joined.chars() {
        if escaped {
            current.push(c);
            escaped = false;
        } else if c == ESCAPE {
            escaped = true;
        } else if c == DELIMITER {
            tags.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    if escaped {
        current.push(ESCAPE);
    }
    tags.push(current);
    tags
}
