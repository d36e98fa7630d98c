//! Delegate items: a file-entry-like core wrapped in a "CFSF" container,
//! trailed by the delegate folder identifier and the item's own class
//! identifier.

use scroll::Pread;

use crate::codepage::AsciiCodepage;
use crate::error::Result;
use crate::guid::Guid;
use crate::strings::{self, AnsiString};
use crate::time::FatDateTime;

/// "CFSF"
pub const SIGNATURE: &[u8; 4] = b"CFSF";

/// Two trailing GUIDs: delegate folder, then class.
const TRAILER_SIZE: usize = 32;
const MINIMUM_SIZE: usize = 22 + 2 + TRAILER_SIZE;

#[derive(Debug, Clone, PartialEq)]
pub struct Delegate {
    pub file_size: u32,
    pub fat_modification_time: Option<FatDateTime>,
    pub file_attribute_flags: u16,
    pub name: AnsiString,
    pub delegate_identifier: Guid,
    pub shell_folder_identifier: Guid,
}

pub(crate) fn parse(
    data: &[u8],
    codepage: AsciiCodepage,
) -> Result<Option<(Delegate, usize)>> {
    if data.len() < MINIMUM_SIZE {
        return Ok(None);
    }
    if &data[6..10] != SIGNATURE {
        return Ok(None);
    }
    let file_size = data.pread_with::<u32>(12, scroll::LE)?;
    let fat_modification_time = FatDateTime::from_raw(data.pread_with::<u32>(16, scroll::LE)?);
    let file_attribute_flags = data.pread_with::<u16>(20, scroll::LE)?;
    // The name may not run into the trailing identifiers.
    let (bytes, consumed) = strings::scan_ansiz(&data[..data.len() - TRAILER_SIZE], 22)?;
    let name = AnsiString::new(bytes.to_vec(), codepage);
    let delegate_identifier = Guid::parse(data, data.len() - TRAILER_SIZE)?;
    let shell_folder_identifier = Guid::parse(data, data.len() - 16)?;
    let mut end = 22 + consumed;
    end += end & 1;
    Ok(Some((
        Delegate {
            file_size,
            fat_modification_time,
            file_attribute_flags,
            name,
            delegate_identifier,
            shell_folder_identifier,
        },
        end.min(data.len()),
    )))
}
