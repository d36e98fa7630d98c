//! File entry items: files and directories, the workhorse of every shell
//! item list. The class type's low bits select directory-ness and the
//! name encoding; long names and NTFS metadata arrive in a trailing
//! `0xbeef0004` extension block.

use scroll::Pread;

use crate::codepage::AsciiCodepage;
use crate::error::Result;
use crate::strings::{self, AnsiString, ShellString};
use crate::time::FatDateTime;

/// Set on the class type when the primary name is UTF-16LE.
pub const CLASS_HAS_UNICODE_NAME: u8 = 0x04;
/// Set on the class type when the entry is a directory.
pub const CLASS_IS_DIRECTORY: u8 = 0x01;

/// Offset of the primary name within the item.
const NAME_OFFSET: usize = 14;

#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// Lower 32 bits of the file size; zero for directories.
    pub file_size: u32,
    pub fat_modification_time: Option<FatDateTime>,
    pub file_attribute_flags: u16,
    pub primary_name: ShellString,
    pub is_directory: bool,
}

pub(crate) fn parse(
    data: &[u8],
    codepage: AsciiCodepage,
) -> Result<Option<(FileEntry, usize)>> {
    if data.len() < NAME_OFFSET + 1 {
        return Ok(None);
    }
    let class_type = data[2];
    let file_size = data.pread_with::<u32>(4, scroll::LE)?;
    let fat_modification_time = FatDateTime::from_raw(data.pread_with::<u32>(8, scroll::LE)?);
    let file_attribute_flags = data.pread_with::<u16>(12, scroll::LE)?;
    let (primary_name, consumed) = if class_type & CLASS_HAS_UNICODE_NAME != 0 {
        let (name, consumed) = strings::scan_utf16z(data, NAME_OFFSET)?;
        (ShellString::Unicode(name), consumed)
    } else {
        let (bytes, consumed) = strings::scan_ansiz(data, NAME_OFFSET)?;
        (
            ShellString::Ansi(AnsiString::new(bytes.to_vec(), codepage)),
            consumed,
        )
    };
    let mut end = NAME_OFFSET + consumed;
    end += end & 1;
    Ok(Some((
        FileEntry {
            file_size,
            fat_modification_time,
            file_attribute_flags,
            primary_name,
            is_directory: class_type & CLASS_IS_DIRECTORY != 0,
        },
        end.min(data.len()),
    )))
}
