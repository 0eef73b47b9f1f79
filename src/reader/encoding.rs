//! Conversions from raw bytes into the string representations.

use base64::{Engine, engine::general_purpose};
use encoding_rs::{Encoding, UTF_8};
use log::trace;

/// Media type used in data URLs for blobs without one.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Resolve a charset label to an encoding, following the WHATWG label table.
/// Case and surrounding whitespace are ignored. Labels of the replacement
/// encoding are treated as unknown.
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label_no_replacement(label.as_bytes())
}

/// Decode text the way a blob reader does: a byte order mark wins, then the
/// explicit label, then the media type's charset, then UTF-8. Unknown labels
/// are skipped. Malformed input becomes U+FFFD.
pub fn decode_text(bytes: &[u8], label: Option<&str>, charset: Option<&str>) -> String {
    let fallback = label
        .and_then(encoding_for_label)
        .or_else(|| charset.and_then(encoding_for_label))
        .unwrap_or(UTF_8);
    let (text, used, had_errors) = fallback.decode(bytes);
    if had_errors {
        trace!("replaced malformed {} input", used.name());
    }
    text.into_owned()
}

/// One character per byte.
pub fn binary_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Base64 data URL for `bytes` labelled with `media_type`.
pub fn data_url(media_type: &str, bytes: &[u8]) -> String {
    let media_type = if media_type.is_empty() {
        FALLBACK_MEDIA_TYPE
    } else {
        media_type
    };
    format!(
        "data:{};base64,{}",
        media_type,
        general_purpose::STANDARD.encode(bytes)
    )
}
