//! The `0xbeef0004` file entry extension: FAT creation/access times, the
//! NTFS file reference, and the long and localized forms of the name.
//!
//! The block grew field by field across Windows releases and is only
//! versioned, never self-describing, so the layout is driven entirely by
//! the version word:
//!
//! - version 3 (Windows XP): timestamps, long name, ANSI localized name
//! - version 7 (Vista): adds the 64-bit NTFS file reference and switches
//!   the localized name to UTF-16
//! - version 8 (Windows 7) and 9 (Windows 8+): each inserts one more
//!   32-bit field in front of the long name
//!
//! The last two bytes of the block point back at the block's own position
//! inside the item; a disagreement is recorded and logged but does not
//! reject the block, since real-world writers get this wrong.

use log::debug;
use scroll::Pread;

use crate::codepage::AsciiCodepage;
use crate::error::Result;
use crate::strings::{self, AnsiString, ShellString};
use crate::time::FatDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct FileEntryExtension {
    pub fat_creation_time: Option<FatDateTime>,
    pub fat_access_time: Option<FatDateTime>,
    /// NTFS MFT reference: 48-bit record number plus 16-bit sequence.
    /// Absent before version 7.
    pub file_reference: Option<u64>,
    pub long_name: Option<String>,
    pub localized_name: Option<ShellString>,
    /// The offset-to-version trailer disagreed with the block's actual
    /// position. The decoded values above are still valid.
    pub version_offset_mismatch: bool,
}

impl FileEntryExtension {
    /// The MFT record number portion of the file reference.
    pub fn mft_entry(&self) -> Option<u64> {
        self.file_reference.map(|reference| reference & 0x0000_ffff_ffff_ffff)
    }

    /// The sequence number portion of the file reference.
    pub fn sequence_number(&self) -> Option<u16> {
        self.file_reference.map(|reference| (reference >> 48) as u16)
    }
}

/// Decodes a `0xbeef0004` block. `data` is the whole block including the
/// header; `item_offset` is the block's position inside its item, used to
/// check the offset-to-version trailer. Returns `Ok(None)` when the
/// version is unknown or the name region is truncated, in which case the
/// caller keeps the block as raw bytes.
pub(crate) fn parse(
    data: &[u8],
    item_offset: usize,
    codepage: AsciiCodepage,
) -> Result<Option<FileEntryExtension>> {
    let version = data.pread_with::<u16>(2, scroll::LE)?;
    if !matches!(version, 3 | 7 | 8 | 9) {
        return Ok(None);
    }
    if data.len() < 22 {
        return Ok(None);
    }
    let fat_creation_time = FatDateTime::from_raw(data.pread_with::<u32>(8, scroll::LE)?);
    let fat_access_time = FatDateTime::from_raw(data.pread_with::<u32>(12, scroll::LE)?);
    // u16 at 16 is unknown in every version.
    let mut offset = 18;
    let mut file_reference = None;
    if version >= 7 {
        if data.len() < 38 {
            return Ok(None);
        }
        // u16 at 18 is unknown, the reference follows, then 8 more
        // undocumented bytes.
        file_reference = Some(data.pread_with::<u64>(20, scroll::LE)?);
        offset = 36;
    }
    // u16 long-name size hint; the string itself is NUL-terminated so the
    // hint is not needed to scan it.
    offset += 2;
    if version >= 9 {
        offset += 4;
    }
    if version >= 8 {
        offset += 4;
    }
    if data.len() < offset + 2 + 2 {
        return Ok(None);
    }
    // Both names must terminate before the offset-to-version trailer.
    let string_region = &data[..data.len() - 2];
    let long_name = match strings::scan_utf16z_terminated(string_region, offset)? {
        Some((name, consumed)) => {
            offset += consumed;
            Some(name)
        }
        None => return Ok(None),
    };
    let mut localized_name = None;
    if offset < string_region.len() {
        if version >= 7 {
            if let Some((name, _)) = strings::scan_utf16z_terminated(string_region, offset)? {
                if !name.is_empty() {
                    localized_name = Some(ShellString::Unicode(name));
                }
            }
        } else {
            let (bytes, _) = strings::scan_ansiz(string_region, offset)?;
            if !bytes.is_empty() {
                localized_name = Some(ShellString::Ansi(AnsiString::new(
                    bytes.to_vec(),
                    codepage,
                )));
            }
        }
    }
    let version_offset = data.pread_with::<u16>(data.len() - 2, scroll::LE)?;
    let version_offset_mismatch = version_offset as usize != item_offset;
    if version_offset_mismatch {
        debug!(
            "file entry extension offset-to-version {} disagrees with block position {}",
            version_offset, item_offset
        );
    }
    Ok(Some(FileEntryExtension {
        fat_creation_time,
        fat_access_time,
        file_reference,
        long_name,
        localized_name,
        version_offset_mismatch,
    }))
}
