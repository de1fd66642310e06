//! Href canonicalization for rendered links.
//!
//! Hrefs arrive as DOM strings, so encoding works on UTF-16 code units and can
//! fail on unpaired surrogates exactly where the browser's `encodeURI` throws.

use std::fmt::Write;

use crate::core::error::UrlError;

/// ASCII characters `encodeURI` leaves untouched besides alphanumerics.
const URI_UNESCAPED: &[u8] = b";,/?:@&=+$-_.!~*'()#";

/// Percent-encode a URI the way `encodeURI` does.
///
/// Reserved and unreserved URI characters pass through; everything else is
/// written as upper-case `%XX` escapes of its UTF-8 bytes.
pub fn encode_uri<I>(units: I) -> Result<String, UrlError>
where
    I: IntoIterator<Item = u16>,
{
    let mut out = String::new();
    for decoded in char::decode_utf16(units) {
        let c = decoded.map_err(|e| UrlError::LoneSurrogate(e.unpaired_surrogate()))?;
        if c.is_ascii_alphanumeric() || (c.is_ascii() && URI_UNESCAPED.contains(&(c as u8))) {
            out.push(c);
            continue;
        }
        let mut buf = [0u8; 4];
        for byte in c.encode_utf8(&mut buf).bytes() {
            // Writing to a String cannot fail.
            let _ = write!(out, "%{byte:02X}");
        }
    }
    Ok(out)
}

/// Canonicalize an href.
///
/// Re-encodes the whole URI, then restores literal `%` so escapes already
/// present in the source are not double-encoded.
pub fn clean_url<I>(units: I) -> Result<String, UrlError>
where
    I: IntoIterator<Item = u16>,
{
    Ok(encode_uri(units)?.replace("%25", "%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(s: &str) -> Result<String, UrlError> {
        clean_url(s.encode_utf16())
    }

    #[test]
    fn test_reserved_characters_pass_through() {
        assert_eq!(
            clean("http://example.com/a?b=c&d=e#top").unwrap(),
            "http://example.com/a?b=c&d=e#top"
        );
        assert_eq!(clean("/local/path").unwrap(), "/local/path");
        assert_eq!(clean("mailto:x@y.z").unwrap(), "mailto:x@y.z");
    }

    #[test]
    fn test_unsafe_characters_are_encoded() {
        assert_eq!(clean("/a b").unwrap(), "/a%20b");
        assert_eq!(clean("/\"x\"").unwrap(), "/%22x%22");
        assert_eq!(clean("/<x>").unwrap(), "/%3Cx%3E");
        assert_eq!(clean("/caf\u{e9}").unwrap(), "/caf%C3%A9");
        assert_eq!(clean("/\u{1F600}").unwrap(), "/%F0%9F%98%80");
    }

    #[test]
    fn test_existing_escapes_survive() {
        assert_eq!(clean("/a%20b").unwrap(), "/a%20b");
        assert_eq!(encode_uri("%".encode_utf16()).unwrap(), "%25");
        assert_eq!(clean("%").unwrap(), "%");
    }

    #[test]
    fn test_lone_surrogate_fails() {
        assert_eq!(
            clean_url([0x002F, 0xD800, 0x0061]),
            Err(UrlError::LoneSurrogate(0xD800))
        );
        assert_eq!(clean_url([0xDC00]), Err(UrlError::LoneSurrogate(0xDC00)));
    }

    #[test]
    fn test_empty_href() {
        assert_eq!(clean("").unwrap(), "");
    }
}
