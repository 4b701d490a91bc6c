//! UTF-16LE text helpers for payload regions decoded as raw bytes.

/// Interpret `bytes` as UTF-16LE text.
///
/// Decoding stops at the first zero code unit or at the end of the buffer; a trailing odd byte is
/// ignored, and unpaired surrogates become U+FFFD.
/// ```
/// # use record_codec::utf16::bytes_to_text16;
/// assert_eq!(bytes_to_text16(b"L\0A\0B\0"), "LAB");
/// assert_eq!(bytes_to_text16(b"L\0A\0\0\0B\0"), "LA");
/// ```
pub fn bytes_to_text16(bytes: &[u8]) -> String {
    let units = bytes.chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0);
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Encode `text` as UTF-16LE, terminated by a zero code unit.
///
/// Empty text gives an empty vector. Text already ending in NUL is not terminated twice.
/// ```
/// # use record_codec::utf16::text_to_bytes16;
/// assert_eq!(text_to_bytes16("AB"), b"A\0B\0\0\0");
/// assert_eq!(text_to_bytes16("AB\0"), b"A\0B\0\0\0");
/// assert!(text_to_bytes16("").is_empty());
/// ```
pub fn text_to_bytes16(text: &str) -> Vec<u8> {
    if text.is_empty() { return Vec::new(); }
    let terminator = if text.ends_with('\0') { None } else { Some(0) };
    text.encode_utf16()
        .chain(terminator)
        .flat_map(u16::to_le_bytes)
        .collect()
}
