/// Character encoding of a file's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Utf16Le,
    Latin1,
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];

impl Charset {
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    /// Number of bytes `text` occupies once encoded.
    pub fn encoded_len(self, text: &str) -> u64 {
        match self {
            Self::Utf8 => text.len() as u64,
            Self::Utf16Le => text.encode_utf16().count() as u64 * 2,
            Self::Latin1 => text.chars().count() as u64,
        }
    }

    /// Decode `bytes`, replacing malformed sequences and dropping a byte order mark.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                String::from_utf8_lossy(bytes).into_owned()
            }
            Self::Utf16Le => {
                let bytes = bytes.strip_prefix(UTF16LE_BOM).unwrap_or(bytes);
                let units: Vec<u16> = bytes
                    .chunks(2)
                    .map(|pair| match pair {
                        [lo, hi] => u16::from_le_bytes([*lo, *hi]),
                        [lo] => u16::from(*lo),
                        _ => 0,
                    })
                    .collect();
                String::from_utf16_lossy(&units)
            }
            Self::Latin1 => bytes.iter().map(|&byte| char::from(byte)).collect(),
        }
    }
}
