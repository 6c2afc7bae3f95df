use std::sync::LazyLock;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use regex::bytes::Regex;

/// How far into the page a `<meta charset>` declaration is looked for.
const META_PRESCAN_BYTES: usize = 1024;

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)<meta\b[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
        .expect("static pattern")
});

/// A saved page, decoded to UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSnapshot {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("snapshot is not valid {encoding}")]
    Malformed { encoding: String },
}

/// Decode raw snapshot bytes: BOM, then the caller's charset hint (a bare
/// label or a `Content-Type` value), then the page's own `<meta charset>`,
/// then chardetng detection.
pub fn decode_snapshot(bytes: &[u8], charset_hint: Option<&str>) -> Result<DecodedSnapshot, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(enc) = charset_hint
        .map(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, enc);
    }

    if let Some(enc) = declared_charset(bytes) {
        return decode_with(bytes, enc);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

/// Encode a serialized page back into the encoding it was read in, so the
/// page's own charset declaration stays truthful. Characters the encoding
/// cannot represent become numeric character references.
pub fn encode_snapshot(html: &str, encoding_label: &str) -> Vec<u8> {
    let encoding = Encoding::for_label(encoding_label.as_bytes()).unwrap_or(UTF_8);
    let (bytes, _, _) = encoding.encode(html);
    bytes.into_owned()
}

fn declared_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_PRESCAN_BYTES)];
    let label = META_CHARSET.captures(head)?.get(1)?.as_bytes();
    // A UTF-16 declaration in ASCII-compatible bytes cannot be true.
    Encoding::for_label(label).map(|enc| {
        if enc == UTF_16LE || enc == UTF_16BE {
            UTF_8
        } else {
            enc
        }
    })
}

/// Accepts either `windows-1252` or `text/html; charset=windows-1252`.
fn charset_label(hint: &str) -> &str {
    hint.split(';')
        .map(str::trim)
        .find_map(|part| {
            part.split_once('=')
                .filter(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
                .map(|(_, value)| value.trim_matches([' ', '"', '\''].as_ref()))
        })
        .unwrap_or_else(|| hint.trim())
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedSnapshot, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: enc.name().to_string(),
        });
    }
    Ok(DecodedSnapshot {
        html: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}
