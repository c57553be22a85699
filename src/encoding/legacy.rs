//! UTF-8 to display code translation
//!
//! The display fonts place accented Latin and Vietnamese letters at codes
//! 128..=262. Codes from 255 up don't fit a byte and are written as the
//! escape byte 255 followed by `code - 255`.

use log::{debug, trace};

use crate::text::{TextSource, ESCAPE_BYTE};

/// Two byte sequences, sorted by key.
static TWO_BYTE_CODES: [([u8; 2], u16); 44] = [
    ([0xC3, 0x80], 196), // À
    ([0xC3, 0x81], 195), // Á
    ([0xC3, 0x82], 206), // Â
    ([0xC3, 0x83], 199), // Ã
    ([0xC3, 0x88], 214), // È
    ([0xC3, 0x89], 213), // É
    ([0xC3, 0x8A], 218), // Ê
    ([0xC3, 0x8C], 225), // Ì
    ([0xC3, 0x8D], 224), // Í
    ([0xC3, 0x92], 230), // Ò
    ([0xC3, 0x93], 229), // Ó
    ([0xC3, 0x94], 234), // Ô
    ([0xC3, 0x95], 233), // Õ
    ([0xC3, 0x99], 247), // Ù
    ([0xC3, 0x9A], 246), // Ú
    ([0xC3, 0x9D], 258), // Ý
    ([0xC3, 0xA0], 129), // à
    ([0xC3, 0xA1], 128), // á
    ([0xC3, 0xA2], 139), // â
    ([0xC3, 0xA3], 132), // ã
    ([0xC3, 0xA8], 147), // è
    ([0xC3, 0xA9], 146), // é
    ([0xC3, 0xAA], 151), // ê
    ([0xC3, 0xAC], 158), // ì
    ([0xC3, 0xAD], 157), // í
    ([0xC3, 0xB2], 163), // ò
    ([0xC3, 0xB3], 162), // ó
    ([0xC3, 0xB4], 167), // ô
    ([0xC3, 0xB5], 166), // õ
    ([0xC3, 0xB9], 180), // ù
    ([0xC3, 0xBA], 179), // ú
    ([0xC3, 0xBD], 190), // ý
    ([0xC4, 0x82], 200), // Ă
    ([0xC4, 0x83], 133), // ă
    ([0xC4, 0x90], 212), // Đ
    ([0xC4, 0x91], 145), // đ
    ([0xC4, 0xA8], 228), // Ĩ
    ([0xC4, 0xA9], 161), // ĩ
    ([0xC5, 0xA8], 250), // Ũ
    ([0xC5, 0xA9], 183), // ũ
    ([0xC6, 0xA0], 240), // Ơ
    ([0xC6, 0xA1], 173), // ơ
    ([0xC6, 0xAF], 251), // Ư
    ([0xC6, 0xB0], 184), // ư
];

/// Three byte sequences (Latin Extended Additional), sorted by key.
static THREE_BYTE_CODES: [([u8; 3], u16); 90] = [
    ([0xE1, 0xBA, 0xA0], 197), // Ạ
    ([0xE1, 0xBA, 0xA1], 130), // ạ
    ([0xE1, 0xBA, 0xA2], 198), // Ả
    ([0xE1, 0xBA, 0xA3], 131), // ả
    ([0xE1, 0xBA, 0xA4], 207), // Ấ
    ([0xE1, 0xBA, 0xA5], 140), // ấ
    ([0xE1, 0xBA, 0xA6], 208), // Ầ
    ([0xE1, 0xBA, 0xA7], 141), // ầ
    ([0xE1, 0xBA, 0xA8], 210), // Ẩ
    ([0xE1, 0xBA, 0xA9], 143), // ẩ
    ([0xE1, 0xBA, 0xAA], 211), // Ẫ
    ([0xE1, 0xBA, 0xAB], 144), // ẫ
    ([0xE1, 0xBA, 0xAC], 209), // Ậ
    ([0xE1, 0xBA, 0xAD], 142), // ậ
    ([0xE1, 0xBA, 0xAE], 201), // Ắ
    ([0xE1, 0xBA, 0xAF], 134), // ắ
    ([0xE1, 0xBA, 0xB0], 202), // Ằ
    ([0xE1, 0xBA, 0xB1], 135), // ằ
    ([0xE1, 0xBA, 0xB2], 204), // Ẳ
    ([0xE1, 0xBA, 0xB3], 137), // ẳ
    ([0xE1, 0xBA, 0xB4], 205), // Ẵ
    ([0xE1, 0xBA, 0xB5], 138), // ẵ
    ([0xE1, 0xBA, 0xB6], 203), // Ặ
    ([0xE1, 0xBA, 0xB7], 136), // ặ
    ([0xE1, 0xBA, 0xB8], 215), // Ẹ
    ([0xE1, 0xBA, 0xB9], 148), // ẹ
    ([0xE1, 0xBA, 0xBA], 216), // Ẻ
    ([0xE1, 0xBA, 0xBB], 149), // ẻ
    ([0xE1, 0xBA, 0xBC], 217), // Ẽ
    ([0xE1, 0xBA, 0xBD], 150), // ẽ
    ([0xE1, 0xBA, 0xBE], 219), // Ế
    ([0xE1, 0xBA, 0xBF], 152), // ế
    ([0xE1, 0xBB, 0x80], 220), // Ề
    ([0xE1, 0xBB, 0x81], 153), // ề
    ([0xE1, 0xBB, 0x82], 222), // Ể
    ([0xE1, 0xBB, 0x83], 155), // ể
    ([0xE1, 0xBB, 0x84], 223), // Ễ
    ([0xE1, 0xBB, 0x85], 156), // ễ
    ([0xE1, 0xBB, 0x86], 221), // Ệ
    ([0xE1, 0xBB, 0x87], 154), // ệ
    ([0xE1, 0xBB, 0x88], 227), // Ỉ
    ([0xE1, 0xBB, 0x89], 160), // ỉ
    ([0xE1, 0xBB, 0x8A], 226), // Ị
    ([0xE1, 0xBB, 0x8B], 159), // ị
    ([0xE1, 0xBB, 0x8C], 231), // Ọ
    ([0xE1, 0xBB, 0x8D], 164), // ọ
    ([0xE1, 0xBB, 0x8E], 232), // Ỏ
    ([0xE1, 0xBB, 0x8F], 165), // ỏ
    ([0xE1, 0xBB, 0x90], 235), // Ố
    ([0xE1, 0xBB, 0x91], 168), // ố
    ([0xE1, 0xBB, 0x92], 236), // Ồ
    ([0xE1, 0xBB, 0x93], 169), // ồ
    ([0xE1, 0xBB, 0x94], 238), // Ổ
    ([0xE1, 0xBB, 0x95], 171), // ổ
    ([0xE1, 0xBB, 0x96], 239), // Ỗ
    ([0xE1, 0xBB, 0x97], 172), // ỗ
    ([0xE1, 0xBB, 0x98], 237), // Ộ
    ([0xE1, 0xBB, 0x99], 170), // ộ
    ([0xE1, 0xBB, 0x9A], 241), // Ớ
    ([0xE1, 0xBB, 0x9B], 174), // ớ
    ([0xE1, 0xBB, 0x9C], 242), // Ờ
    ([0xE1, 0xBB, 0x9D], 175), // ờ
    ([0xE1, 0xBB, 0x9E], 244), // Ở
    ([0xE1, 0xBB, 0x9F], 177), // ở
    ([0xE1, 0xBB, 0xA0], 245), // Ỡ
    ([0xE1, 0xBB, 0xA1], 178), // ỡ
    ([0xE1, 0xBB, 0xA2], 243), // Ợ
    ([0xE1, 0xBB, 0xA3], 176), // ợ
    ([0xE1, 0xBB, 0xA4], 248), // Ụ
    ([0xE1, 0xBB, 0xA5], 181), // ụ
    ([0xE1, 0xBB, 0xA6], 249), // Ủ
    ([0xE1, 0xBB, 0xA7], 182), // ủ
    ([0xE1, 0xBB, 0xA8], 252), // Ứ
    ([0xE1, 0xBB, 0xA9], 185), // ứ
    ([0xE1, 0xBB, 0xAA], 253), // Ừ
    ([0xE1, 0xBB, 0xAB], 186), // ừ
    ([0xE1, 0xBB, 0xAC], 256), // Ử
    ([0xE1, 0xBB, 0xAD], 188), // ử
    ([0xE1, 0xBB, 0xAE], 257), // Ữ
    ([0xE1, 0xBB, 0xAF], 189), // ữ
    ([0xE1, 0xBB, 0xB0], 254), // Ự
    ([0xE1, 0xBB, 0xB1], 187), // ự
    ([0xE1, 0xBB, 0xB2], 259), // Ỳ
    ([0xE1, 0xBB, 0xB3], 191), // ỳ
    ([0xE1, 0xBB, 0xB4], 260), // Ỵ
    ([0xE1, 0xBB, 0xB5], 192), // ỵ
    ([0xE1, 0xBB, 0xB6], 261), // Ỷ
    ([0xE1, 0xBB, 0xB7], 193), // ỷ
    ([0xE1, 0xBB, 0xB8], 262), // Ỹ
    ([0xE1, 0xBB, 0xB9], 194), // ỹ
];

fn lookup_two(lead: u8, cont: u8) -> Option<u16> {
    TWO_BYTE_CODES
        .binary_search_by_key(&[lead, cont], |(key, _)| *key)
        .ok()
        .map(|idx| TWO_BYTE_CODES[idx].1)
}

fn lookup_three(lead: u8, cont1: u8, cont2: u8) -> Option<u16> {
    THREE_BYTE_CODES
        .binary_search_by_key(&[lead, cont1, cont2], |(key, _)| *key)
        .ok()
        .map(|idx| THREE_BYTE_CODES[idx].1)
}

/// Display code for one UTF-8 sequence, if it is one of the mapped letters.
pub fn lookup_sequence(sequence: &[u8]) -> Option<u16> {
    match *sequence {
        [lead, cont] => lookup_two(lead, cont),
        [lead, cont1, cont2] => lookup_three(lead, cont1, cont2),
        _ => None,
    }
}

fn push_code(out: &mut Vec<u8>, code: u16) {
    if code >= ESCAPE_BYTE as u16 {
        out.push(ESCAPE_BYTE);
        out.push((code - ESCAPE_BYTE as u16) as u8);
    } else {
        out.push(code as u8);
    }
}

/// Translated text, NUL terminated and sized to fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    bytes: Vec<u8>,
}

impl EncodedText {
    /// Payload without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_bytes_with_nul(self) -> Vec<u8> {
        self.bytes
    }
}

impl TextSource for EncodedText {
    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(0)
    }
}

/// Translate UTF-8 text into display codes.
///
/// ASCII is copied. Bytes 0x80..=0xE0 start a two byte step and anything
/// above starts a three byte step; the whole step is consumed whether or not
/// the sequence is mapped, and unmapped sequences produce no output.
pub fn encode_legacy_text(input: &[u8]) -> EncodedText {
    let mut out = Vec::with_capacity(input.len() + 1);
    let mut i = 0;

    while i < input.len() {
        let lead = input[i];
        trace!("Input byte {}", lead);
        if lead < 0x80 {
            out.push(lead);
            i += 1;
            continue;
        }

        let step = if lead < 0xE1 { 2 } else { 3 };
        let end = (i + step).min(input.len());
        match lookup_sequence(&input[i..end]) {
            Some(code) => push_code(&mut out, code),
            None => debug!("Dropping unmapped sequence {:02X?}", &input[i..end]),
        }
        i += step;
    }

    out.push(0);
    out.shrink_to_fit();
    EncodedText { bytes: out }
}

pub fn encode_legacy_str(text: &str) -> EncodedText {
    encode_legacy_text(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_sorted() {
        assert!(TWO_BYTE_CODES.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(THREE_BYTE_CODES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_table_keys_are_the_letters() {
        assert_eq!(lookup_sequence("á".as_bytes()), Some(128));
        assert_eq!(lookup_sequence("Ý".as_bytes()), Some(258));
        assert_eq!(lookup_sequence("đ".as_bytes()), Some(145));
        assert_eq!(lookup_sequence("ư".as_bytes()), Some(184));
        assert_eq!(lookup_sequence("ế".as_bytes()), Some(152));
        assert_eq!(lookup_sequence("Ỹ".as_bytes()), Some(262));
        assert_eq!(lookup_sequence(b"A"), None);
    }

    #[test]
    fn test_table_codes_are_unique() {
        let mut codes: Vec<u16> = TWO_BYTE_CODES
            .iter()
            .map(|(_, code)| *code)
            .chain(THREE_BYTE_CODES.iter().map(|(_, code)| *code))
            .collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
        assert_eq!(codes.first(), Some(&128));
        assert_eq!(codes.last(), Some(&262));
    }

    #[test]
    fn test_ascii_passthrough() {
        let encoded = encode_legacy_text(b"Hello, DMD!");
        assert_eq!(encoded.as_bytes(), b"Hello, DMD!");
        assert_eq!(encoded.as_bytes_with_nul(), b"Hello, DMD!\0");
        assert_eq!(encoded.len(), 11);
    }

    #[test]
    fn test_two_byte_letter() {
        assert_eq!(encode_legacy_text(&[0xC3, 0xA1]).as_bytes(), &[128]);
        assert_eq!(encode_legacy_str("Đà").as_bytes(), &[212, 129]);
    }

    #[test]
    fn test_three_byte_letter() {
        assert_eq!(encode_legacy_text(&[0xE1, 0xBB, 0xAD]).as_bytes(), &[188]);
        assert_eq!(encode_legacy_str("Việt").as_bytes(), &[b'V', b'i', 154, b't']);
    }

    #[test]
    fn test_extended_codes_use_escape() {
        assert_eq!(encode_legacy_text(&[0xE1, 0xBB, 0xAC]).as_bytes(), &[255, 1]);
        assert_eq!(encode_legacy_str("Ý").as_bytes(), &[255, 3]);
        assert_eq!(encode_legacy_str("xỸ").as_bytes(), &[b'x', 255, 7]);
    }

    #[test]
    fn test_unmapped_lead_consumes_two_bytes() {
        // © is C2 A9
        let encoded = encode_legacy_text(&[b'a', 0xC2, 0xA9, b'b']);
        assert_eq!(encoded.as_bytes(), b"ab");
    }

    #[test]
    fn test_unmapped_three_byte_consumes_three_bytes() {
        // € is E2 82 AC
        assert_eq!(encode_legacy_str("1€2").as_bytes(), b"12");
        // 4 byte emoji: only three bytes are consumed, the fourth starts a two byte step
        assert_eq!(encode_legacy_str("a😀b").as_bytes(), b"a");
    }

    #[test]
    fn test_truncated_sequences_dropped() {
        assert!(encode_legacy_text(&[0xC3]).is_empty());
        assert!(encode_legacy_text(&[0xE1, 0xBB]).is_empty());
        assert_eq!(encode_legacy_text(&[b'a', 0xE1]).as_bytes(), b"a");
    }

    #[test]
    fn test_output_sized_to_fit() {
        let encoded = encode_legacy_str("Tiếng Việt");
        assert_eq!(encoded.len(), 10);
        assert_eq!(encoded.into_bytes_with_nul().len(), 11);
    }

    #[test]
    fn test_encoded_text_source() {
        let encoded = encode_legacy_str("Ử!");
        assert_eq!(encoded.iter_bytes().collect::<Vec<u8>>(), vec![255, 1, b'!']);
        assert_eq!(encoded.byte_at(3), 0);
        assert_eq!(encoded.byte_at(10), 0);
    }
}
