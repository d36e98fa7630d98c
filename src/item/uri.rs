//! URI items, written by the common dialog for visited URLs. Much of the
//! fixed region is undocumented; the flag byte is carried through without
//! interpretation beyond the bit that gates the trailing Unicode URL.

use scroll::Pread;

use crate::error::Result;
use crate::strings;
use crate::time::Filetime;

/// The trailing URL is UTF-16LE when set.
pub const FLAG_HAS_UNICODE_STRINGS: u8 = 0x80;

const MINIMUM_SIZE: usize = 38;

#[derive(Debug, Clone, PartialEq)]
pub struct Uri {
    pub flags: u8,
    /// FILETIME at offset 22, meaning unconfirmed.
    pub timestamp: Option<Filetime>,
    pub url: Option<String>,
}

pub(crate) fn parse(data: &[u8]) -> Result<Option<(Uri, usize)>> {
    if data.len() < MINIMUM_SIZE {
        return Ok(None);
    }
    let flags = data[3];
    let timestamp = Filetime::from_raw(data.pread_with::<u64>(22, scroll::LE)?);
    let url = if flags & FLAG_HAS_UNICODE_STRINGS != 0 && data.len() > MINIMUM_SIZE {
        let (url, _) = strings::scan_utf16z(data, MINIMUM_SIZE)?;
        Some(url)
    } else {
        None
    };
    Ok(Some((
        Uri {
            flags,
            timestamp,
            url,
        },
        data.len(),
    )))
}
