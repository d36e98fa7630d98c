//! Bounded extraction of the NUL-terminated strings embedded in shell
//! items. ANSI strings are kept as raw bytes together with their codepage
//! and only converted on request; UTF-16 strings are decoded eagerly with
//! ill-formed surrogates replaced by U+FFFD.

use crate::codepage::{AsciiCodepage, Codepage, Latin1};
use crate::error::{Error, Result};

/// Hard cap on any single scanned string, in bytes.
pub const MAX_STRING_SIZE: usize = 64 * 1024 * 1024;

/// A codepage-encoded string, stored unconverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiString {
    bytes: Vec<u8>,
    codepage: AsciiCodepage,
}

impl AnsiString {
    pub fn new(bytes: Vec<u8>, codepage: AsciiCodepage) -> AnsiString {
        AnsiString { bytes, codepage }
    }

    /// The raw bytes, without the NUL terminator.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn codepage(&self) -> AsciiCodepage {
        self.codepage
    }

    /// Converts through the given codepage collaborator.
    pub fn decode(&self, codepage: &dyn Codepage) -> String {
        codepage.decode(self.codepage, &self.bytes)
    }

    /// Converts with the bundled byte-identity fallback.
    pub fn to_string_lossy(&self) -> String {
        self.decode(&Latin1)
    }
}

/// A string whose encoding was selected by the enclosing item's class
/// flags: either codepage bytes or already-decoded UTF-16.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellString {
    Ansi(AnsiString),
    Unicode(String),
}

impl ShellString {
    pub fn decode(&self, codepage: &dyn Codepage) -> String {
        match self {
            ShellString::Ansi(s) => s.decode(codepage),
            ShellString::Unicode(s) => s.clone(),
        }
    }

    pub fn to_string_lossy(&self) -> String {
        self.decode(&Latin1)
    }
}

/// Scans an ANSI string at `offset`, stopping at the first NUL or at the
/// end of the buffer. Returns the string bytes (terminator excluded) and
/// the number of bytes consumed (terminator included when present).
pub(crate) fn scan_ansiz(data: &[u8], offset: usize) -> Result<(&[u8], usize)> {
    if offset > data.len() {
        return Err(Error::Scroll(scroll::Error::BadOffset(offset)));
    }
    let region = &data[offset..];
    match region.iter().position(|&b| b == 0) {
        Some(len) if len > MAX_STRING_SIZE => Err(Error::Oversize(len)),
        Some(len) => Ok((&region[..len], len + 1)),
        None if region.len() > MAX_STRING_SIZE => Err(Error::Oversize(region.len())),
        None => Ok((region, region.len())),
    }
}

/// Scans a UTF-16LE string at `offset`, stopping at the first NUL pair or
/// at the last complete pair in the buffer. Returns the decoded string and
/// the number of bytes consumed (terminator included when present).
pub(crate) fn scan_utf16z(data: &[u8], offset: usize) -> Result<(String, usize)> {
    match scan_utf16z_terminated(data, offset)? {
        Some(result) => Ok(result),
        None => {
            // No terminator: the run ends at the last complete pair.
            let region = &data[offset.min(data.len())..];
            let len = region.len() & !1;
            decode_utf16le(&region[..len]).map(|s| (s, len))
        }
    }
}

/// As [`scan_utf16z`], but reports `None` when no NUL pair exists before
/// the end of the buffer, for callers that treat a truncated string as an
/// unrecognized shape rather than tolerable input.
pub(crate) fn scan_utf16z_terminated(
    data: &[u8],
    offset: usize,
) -> Result<Option<(String, usize)>> {
    if offset > data.len() {
        return Err(Error::Scroll(scroll::Error::BadOffset(offset)));
    }
    let region = &data[offset..];
    let mut len = 0;
    while len + 1 < region.len() {
        if region[len] == 0 && region[len + 1] == 0 {
            let decoded = decode_utf16le(&region[..len])?;
            return Ok(Some((decoded, len + 2)));
        }
        len += 2;
        if len > MAX_STRING_SIZE {
            return Err(Error::Oversize(len));
        }
    }
    Ok(None)
}

fn decode_utf16le(bytes: &[u8]) -> Result<String> {
    if bytes.len() > MAX_STRING_SIZE {
        return Err(Error::Oversize(bytes.len()));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Ok(String::from_utf16_lossy(&units))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_scan_stops_at_nul() {
        let data = b"ab\0cd";
        let (bytes, consumed) = scan_ansiz(data, 0).unwrap();
        assert_eq!(bytes, b"ab");
        assert_eq!(consumed, 3);
    }

    #[test]
    fn ansi_scan_tolerates_missing_terminator() {
        let data = b"abc";
        let (bytes, consumed) = scan_ansiz(data, 1).unwrap();
        assert_eq!(bytes, b"bc");
        assert_eq!(consumed, 2);
    }

    #[test]
    fn ansi_scan_rejects_bad_offset() {
        assert!(scan_ansiz(b"ab", 3).is_err());
    }

    #[test]
    fn utf16_scan_decodes_until_nul_pair() {
        let data = [0x52, 0x00, 0x31, 0x00, 0x00, 0x00, 0xff, 0xff];
        let (s, consumed) = scan_utf16z(&data, 0).unwrap();
        assert_eq!(s, "R1");
        assert_eq!(consumed, 6);
    }

    #[test]
    fn utf16_strict_scan_reports_unterminated() {
        let data = [0x52, 0x00, 0x31, 0x00];
        assert!(scan_utf16z_terminated(&data, 0).unwrap().is_none());
        let (s, consumed) = scan_utf16z(&data, 0).unwrap();
        assert_eq!(s, "R1");
        assert_eq!(consumed, 4);
    }

    #[test]
    fn utf16_replaces_lone_surrogates() {
        let data = [0x00, 0xd8, 0x41, 0x00, 0x00, 0x00];
        let (s, _) = scan_utf16z(&data, 0).unwrap();
        assert_eq!(s, "\u{fffd}A");
    }

    #[test]
    fn ansi_string_defers_conversion() {
        let s = AnsiString::new(b"Docs".to_vec(), AsciiCodepage::Windows1252);
        assert_eq!(s.bytes(), b"Docs");
        assert_eq!(s.to_string_lossy(), "Docs");
    }
}
