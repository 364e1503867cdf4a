//! HTML entity decoding for names and scope text.

use std::borrow::Cow;

/// Longest entity body recognized, e.g. `#x10FFFF`.
const MAX_ENTITY_LEN: usize = 8;

/// Decodes the named entities Doxygen emits plus numeric character references.
///
/// Anything that is not a recognized entity is kept verbatim.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&end| end <= MAX_ENTITY_LEN)
            .and_then(|end| decode_one(&after[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decodes one entity body (the text between `&` and `;`).
fn decode_one(body: &str) -> Option<char> {
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = body.strip_prefix('#')?;
            let code = match num.strip_prefix(|c: char| c == 'x' || c == 'X') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(decode_entities("pcpp::Packet"), Cow::Borrowed(_)));
    }

    #[test]
    fn decodes_named_entities() {
        assert_eq!(
            decode_entities("const IPv4Address &amp;addr"),
            "const IPv4Address &addr"
        );
        assert_eq!(
            decode_entities("std::vector&lt; T &gt;"),
            "std::vector< T >"
        );
        assert_eq!(decode_entities("&quot;x&quot;"), "\"x\"");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode_entities("a&#39;b"), "a'b");
        assert_eq!(decode_entities("&#x41;&#X42;"), "AB");
    }

    #[test]
    fn keeps_unknown_or_unterminated() {
        assert_eq!(decode_entities("a && b"), "a && b");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_entities("x &amp"), "x &amp");
        assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
    }
}
