//! Codepages used for the ANSI strings embedded in shell items.
//!
//! Shell items store their short names and network strings in the codepage
//! of the machine that produced them; the format itself does not record
//! which one. The crate therefore takes the codepage as a parameter and
//! delegates the actual byte-to-character conversion to a [`Codepage`]
//! collaborator. The bundled [`Latin1`] implementation maps every byte to
//! the Unicode codepoint of the same value, which is exact for
//! Windows-1252's ASCII range and a readable approximation everywhere else.

use crate::error::{Error, Result};

/// The set of single- and double-byte codepages a shell item may declare
/// for its ANSI strings. Values are the Windows codepage identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum AsciiCodepage {
    Ascii = 20127,
    Iso8859_1 = 28591,
    Iso8859_2 = 28592,
    Iso8859_3 = 28593,
    Iso8859_4 = 28594,
    Iso8859_5 = 28595,
    Iso8859_6 = 28596,
    Iso8859_7 = 28597,
    Iso8859_8 = 28598,
    Iso8859_9 = 28599,
    Iso8859_10 = 28600,
    Iso8859_11 = 28601,
    Iso8859_13 = 28603,
    Iso8859_14 = 28604,
    Iso8859_15 = 28605,
    Iso8859_16 = 28606,
    Koi8R = 20866,
    Koi8U = 21866,
    Windows874 = 874,
    Windows932 = 932,
    Windows936 = 936,
    Windows949 = 949,
    Windows950 = 950,
    Windows1250 = 1250,
    Windows1251 = 1251,
    Windows1252 = 1252,
    Windows1253 = 1253,
    Windows1254 = 1254,
    Windows1255 = 1255,
    Windows1256 = 1256,
    Windows1257 = 1257,
    Windows1258 = 1258,
}

impl Default for AsciiCodepage {
    fn default() -> Self {
        AsciiCodepage::Windows1252
    }
}

impl AsciiCodepage {
    /// The Windows codepage identifier.
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Maps a Windows codepage identifier onto the supported set.
    pub fn from_id(id: u16) -> Result<AsciiCodepage> {
        let codepage = match id {
            20127 => AsciiCodepage::Ascii,
            28591 => AsciiCodepage::Iso8859_1,
            28592 => AsciiCodepage::Iso8859_2,
            28593 => AsciiCodepage::Iso8859_3,
            28594 => AsciiCodepage::Iso8859_4,
            28595 => AsciiCodepage::Iso8859_5,
            28596 => AsciiCodepage::Iso8859_6,
            28597 => AsciiCodepage::Iso8859_7,
            28598 => AsciiCodepage::Iso8859_8,
            28599 => AsciiCodepage::Iso8859_9,
            28600 => AsciiCodepage::Iso8859_10,
            28601 => AsciiCodepage::Iso8859_11,
            28603 => AsciiCodepage::Iso8859_13,
            28604 => AsciiCodepage::Iso8859_14,
            28605 => AsciiCodepage::Iso8859_15,
            28606 => AsciiCodepage::Iso8859_16,
            20866 => AsciiCodepage::Koi8R,
            21866 => AsciiCodepage::Koi8U,
            874 => AsciiCodepage::Windows874,
            932 => AsciiCodepage::Windows932,
            936 => AsciiCodepage::Windows936,
            949 => AsciiCodepage::Windows949,
            950 => AsciiCodepage::Windows950,
            1250 => AsciiCodepage::Windows1250,
            1251 => AsciiCodepage::Windows1251,
            1252 => AsciiCodepage::Windows1252,
            1253 => AsciiCodepage::Windows1253,
            1254 => AsciiCodepage::Windows1254,
            1255 => AsciiCodepage::Windows1255,
            1256 => AsciiCodepage::Windows1256,
            1257 => AsciiCodepage::Windows1257,
            1258 => AsciiCodepage::Windows1258,
            _ => return Err(Error::UnsupportedCodepage(id)),
        };
        Ok(codepage)
    }
}

impl TryFrom<u16> for AsciiCodepage {
    type Error = Error;

    fn try_from(id: u16) -> Result<AsciiCodepage> {
        AsciiCodepage::from_id(id)
    }
}

/// Converts codepage-encoded bytes to a `String`.
///
/// Implementations must not panic on arbitrary input; undecodable bytes
/// should be replaced rather than dropped.
pub trait Codepage {
    fn decode(&self, codepage: AsciiCodepage, bytes: &[u8]) -> String;
}

/// The fallback conversion used when no real codepage table is supplied:
/// every byte becomes the Unicode codepoint of the same value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1;

impl Codepage for Latin1 {
    fn decode(&self, _codepage: AsciiCodepage, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| b as char).collect()
    }
}
