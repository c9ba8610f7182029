/// Decode UTF-8, dropping invalid byte sequences instead of substituting
/// replacement characters.
pub fn decode_utf8_ignoring_errors(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_valid_text() {
        assert_eq!(decode_utf8_ignoring_errors("Grüße\n".as_bytes()), "Grüße\n");
    }

    #[test]
    fn drops_invalid_sequences() {
        assert_eq!(decode_utf8_ignoring_errors(b"ab\xff\xfecd"), "abcd");
    }
}
