//! Network location items: UNC paths and network resource entries, all
//! strings in the item's ANSI codepage.

use log::debug;
use scroll::Pread;

use crate::codepage::AsciiCodepage;
use crate::error::{Error, Result};
use crate::strings::{self, AnsiString};

/// Description string present.
pub const FLAG_HAS_DESCRIPTION: u8 = 0x80;
/// Comments string present.
pub const FLAG_HAS_COMMENTS: u8 = 0x40;

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkLocation {
    pub location: AnsiString,
    pub description: Option<AnsiString>,
    pub comments: Option<AnsiString>,
    pub flags: u8,
}

fn known_class(class_type: u8) -> bool {
    matches!(class_type, 0x40 | 0x41 | 0x42 | 0x46 | 0x47 | 0x4c | 0xc3)
}

pub(crate) fn parse(
    data: &[u8],
    codepage: AsciiCodepage,
) -> Result<Option<(NetworkLocation, usize)>> {
    if data.len() < 6 {
        return Ok(None);
    }
    if !known_class(data[2]) {
        return Ok(None);
    }
    let flags = data[4];
    let mut offset = 5;
    let (bytes, consumed) = strings::scan_ansiz(data, offset)?;
    if consumed == 0 {
        return Err(Error::Malformed("network location string out of bounds".into()));
    }
    let location = AnsiString::new(bytes.to_vec(), codepage);
    offset += consumed;
    let mut description = None;
    if flags & FLAG_HAS_DESCRIPTION != 0 && offset < data.len() {
        let (bytes, consumed) = strings::scan_ansiz(data, offset)?;
        description = Some(AnsiString::new(bytes.to_vec(), codepage));
        offset += consumed;
    }
    let mut comments = None;
    if flags & FLAG_HAS_COMMENTS != 0 {
        let (bytes, consumed) = strings::scan_ansiz(data, offset)?;
        if consumed == 0 {
            return Err(Error::Malformed("network comments string out of bounds".into()));
        }
        comments = Some(AnsiString::new(bytes.to_vec(), codepage));
        offset += consumed;
    }
    if offset + 2 <= data.len() {
        let trailer = data.pread_with::<u16>(offset, scroll::LE)?;
        debug!("network location trailer: 0x{:04x}", trailer);
        offset += 2;
    }
    Ok(Some((
        NetworkLocation {
            location,
            description,
            comments,
            flags,
        },
        offset,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(flags: u8, strings: &[&[u8]]) -> Vec<u8> {
        let mut data = vec![0x00, 0x00, 0x41, 0x00, flags];
        for s in strings {
            data.extend_from_slice(s);
            data.push(0);
        }
        data.extend_from_slice(&[0x00, 0x00]);
        let size = data.len() as u16;
        data[0..2].copy_from_slice(&size.to_le_bytes());
        data
    }

    #[test]
    fn parses_location_only() {
        let data = item(0x00, &[b"\\\\server\\share"]);
        let (location, end) = parse(&data, AsciiCodepage::default()).unwrap().unwrap();
        assert_eq!(location.location.to_string_lossy(), "\\\\server\\share");
        assert!(location.description.is_none());
        assert!(location.comments.is_none());
        assert_eq!(end, data.len());
    }

    #[test]
    fn flags_gate_description_and_comments() {
        let data = item(0xc0, &[b"\\\\server\\share", b"Docs", b"shared drive"]);
        let (location, _) = parse(&data, AsciiCodepage::default()).unwrap().unwrap();
        assert_eq!(location.flags, 0xc0);
        assert_eq!(location.description.unwrap().to_string_lossy(), "Docs");
        assert_eq!(location.comments.unwrap().to_string_lossy(), "shared drive");
    }

    #[test]
    fn unknown_class_is_unsupported() {
        let mut data = item(0x00, &[b"x"]);
        data[2] = 0x43;
        assert!(parse(&data, AsciiCodepage::default()).unwrap().is_none());
    }

    #[test]
    fn comments_running_off_the_end_is_malformed() {
        let mut data = vec![0x00, 0x00, 0x41, 0x00, 0x40];
        data.extend_from_slice(b"loc");
        // No terminator: the location scan consumes everything and the
        // comments scan starts past the end.
        let size = data.len() as u16;
        data[0..2].copy_from_slice(&size.to_le_bytes());
        assert!(parse(&data, AsciiCodepage::default()).is_err());
    }
}
