//! Payload classification ahead of HTML parsing
//!
//! Archive CDNs occasionally serve images or PDFs from article URLs.
//! Classifying the raw payload first keeps those out of the HTML parser.

/// Prefix length inspected for binary signatures
const SNIFF_LEN: usize = 2048;

/// Magic sequences that mark a payload as binary (JPEG, PNG, PDF)
const BINARY_MAGICS: [&[u8]; 3] = [b"\xff\xd8", b"\x89PNG", b"%PDF"];

/// Classification of a fetched payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Image or PDF payload identified by magic bytes
    Binary,
    /// Decodable text without HTML markers
    Text,
    /// Markup carrying an `<html` or `<!doctype` marker
    Html,
}

/// Classify a raw payload before handing it to the parser.
pub fn classify(raw: &[u8]) -> ContentKind {
    let head = &raw[..raw.len().min(SNIFF_LEN)];
    if BINARY_MAGICS.iter().any(|magic| contains(head, magic)) {
        return ContentKind::Binary;
    }

    let text = String::from_utf8_lossy(raw).to_lowercase();
    if text.contains("<html") || text.contains("<!doctype") {
        ContentKind::Html
    } else {
        ContentKind::Text
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_jpeg_as_binary() {
        let payload = [b"\xff\xd8\xff\xe0".as_slice(), b"JFIF rest of image"].concat();
        assert_eq!(classify(&payload), ContentKind::Binary);
    }

    #[test]
    fn test_classify_png_as_binary() {
        assert_eq!(classify(b"\x89PNG\r\n\x1a\n....."), ContentKind::Binary);
    }

    #[test]
    fn test_classify_pdf_as_binary() {
        assert_eq!(classify(b"%PDF-1.7 blah"), ContentKind::Binary);
    }

    #[test]
    fn test_classify_magic_inside_prefix() {
        // Signature does not have to sit at offset zero
        let payload = [b"some junk then ".as_slice(), b"%PDF-1.4"].concat();
        assert_eq!(classify(&payload), ContentKind::Binary);
    }

    #[test]
    fn test_classify_magic_beyond_prefix_is_not_binary() {
        let mut payload = vec![b'a'; SNIFF_LEN];
        payload.extend_from_slice(b"%PDF-1.4");
        assert_eq!(classify(&payload), ContentKind::Text);
    }

    #[test]
    fn test_classify_html_marker() {
        assert_eq!(classify(b"<html><body>hi</body></html>"), ContentKind::Html);
        assert_eq!(classify(b"<!DOCTYPE html><p>hi</p>"), ContentKind::Html);
        // Case-insensitive
        assert_eq!(classify(b"<HTML lang=\"ja\">"), ContentKind::Html);
    }

    #[test]
    fn test_classify_plain_text() {
        assert_eq!(classify(b"just some plain text"), ContentKind::Text);
        assert_eq!(classify(b"{\"error\": \"rate limited\"}"), ContentKind::Text);
    }

    #[test]
    fn test_classify_empty_payload() {
        assert_eq!(classify(b""), ContentKind::Text);
    }

    #[test]
    fn test_classify_survives_invalid_utf8() {
        // Lossy decoding keeps the surrounding markers intact
        let payload = [b"<html>".as_slice(), &[0xC0, 0xAF], b"</html>"].concat();
        assert_eq!(classify(&payload), ContentKind::Html);
    }
}
