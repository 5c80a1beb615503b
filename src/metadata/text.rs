//! UTF-16LE text encoding for the Windows XP* EXIF tags.
//!
//! XPKeywords, XPSubject and friends store text as null-terminated UTF-16LE
//! byte arrays (format BYTE, not STRING). Readers that expect this layout
//! silently drop values encoded any other way.

/// Encode a string as null-terminated UTF-16LE bytes.
///
/// Characters outside the basic multilingual plane are emitted as surrogate
/// pairs (4 bytes), everything else as a single code unit (2 bytes). Output
/// length is always `2 × code units + 2` for the terminator.
pub fn encode_utf16le(s: &str) -> Vec<u8> {
    let mut bytes: Vec<u8> = s
        .encode_utf16()
        .flat_map(|unit| unit.to_le_bytes())
        .collect();
    // Null terminator
    bytes.push(0);
    bytes.push(0);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reverse the encoding: strip the terminator, regroup LE pairs,
    /// reassemble surrogate pairs.
    fn decode_utf16le(bytes: &[u8]) -> String {
        let body = &bytes[..bytes.len() - 2];
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16(&units).unwrap()
    }

    #[test]
    fn empty_string_is_just_terminator() {
        assert_eq!(encode_utf16le(""), vec![0, 0]);
    }

    #[test]
    fn ascii_little_endian_layout() {
        // 'A' = 0x0041 → 41 00
        assert_eq!(encode_utf16le("AB"), vec![0x41, 0x00, 0x42, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn length_is_two_per_unit_plus_terminator() {
        for s in ["", "tag1,tag2", "héllo", "日本語", "a😀b", "😀"] {
            let expected = 2 * s.encode_utf16().count() + 2;
            assert_eq!(encode_utf16le(s).len(), expected, "input {s:?}");
        }
    }

    #[test]
    fn surrogate_pair_is_four_bytes() {
        // U+1F600 = D83D DE00 → 3D D8 00 DE
        assert_eq!(encode_utf16le("😀"), vec![0x3D, 0xD8, 0x00, 0xDE, 0x00, 0x00]);
    }

    #[test]
    fn round_trip() {
        for s in ["", "tag1,tag2", "sunset, beach, 😀", "日本語のタグ"] {
            assert_eq!(decode_utf16le(&encode_utf16le(s)), s);
        }
    }
}
