//! Extension blocks: the signature-tagged TLV records appended to shell
//! items, carrying metadata that does not fit the main item layout.
//!
//! Every block begins with `u16 size`, `u16 version`, `u32 signature`.
//! Unrecognized signatures, and recognized blocks whose body does not scan,
//! are retained with their raw bytes so that nothing is lost; only a size
//! word that runs past the item ends the chain.

pub mod file_entry;

pub use file_entry::FileEntryExtension;

use log::debug;
use scroll::Pread;

use crate::codepage::AsciiCodepage;
use crate::error::Result;
use crate::guid::Guid;
use crate::strings;
use crate::time::Filetime;

/// Pre-Vista folder identifier block.
pub const FOLDER_IDENTIFIERS_SIGNATURE: u32 = 0xbeef0000;
/// Single GUID identifier block.
pub const IDENTIFIER_SIGNATURE: u32 = 0xbeef0003;
/// File entry extension: timestamps, NTFS reference, long name.
pub const FILE_ENTRY_EXTENSION_SIGNATURE: u32 = 0xbeef0004;
/// Block embedding a nested shell item list.
pub const EMBEDDED_ITEM_LIST_SIGNATURE: u32 = 0xbeef0005;
/// Block carrying a username.
pub const USERNAME_SIGNATURE: u32 = 0xbeef0006;
/// Property table block, seen on users property view items.
pub const PROPERTY_TABLE_SIGNATURE: u32 = 0xbeef0014;
/// Folder type identifier pair.
pub const IDENTIFIER_PAIR_SIGNATURE: u32 = 0xbeef0019;
/// Two-timestamp block.
pub const TIMESTAMPS_SIGNATURE: u32 = 0xbeef0025;
/// Three-timestamp block.
pub const TIMESTAMPS3_SIGNATURE: u32 = 0xbeef0026;

/// Class identifier marking a custom-URI property table inside a
/// `0xbeef0014` block: `df2fce13-25ec-45bb-9d4c-cecd47c2430c`.
pub const CURI_CLASS_IDENTIFIER: Guid = Guid {
    data1: 0xdf2fce13,
    data2: 0x25ec,
    data3: 0x45bb,
    data4: [0x9d, 0x4c, 0xce, 0xcd, 0x47, 0xc2, 0x43, 0x0c],
};

/// A single parsed extension block. `data` holds the exact `size` bytes of
/// the block, including the header, so callers can reserialize or inspect
/// signatures this crate does not interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionBlock {
    pub size: u16,
    pub version: u16,
    pub signature: u32,
    pub data: Vec<u8>,
    pub payload: ExtensionPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionPayload {
    FolderIdentifiers(FolderIdentifiers),
    Identifier(Guid),
    FileEntry(FileEntryExtension),
    EmbeddedItemList(EmbeddedItemList),
    Username(String),
    PropertyTable(PropertyTable),
    IdentifierPair(IdentifierPair),
    Timestamps(Timestamps),
    /// Unrecognized signature or a recognized one whose body did not scan;
    /// the raw bytes remain available in [`ExtensionBlock::data`].
    Unknown,
}

/// `0xbeef0000`: either a 14-byte stub or a 42-byte form carrying the
/// folder type identifier and a second, unexplained GUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FolderIdentifiers {
    pub folder_type: Option<Guid>,
    pub secondary: Option<Guid>,
}

/// `0xbeef0005`: sixteen undocumented bytes followed by a nested shell
/// item list. The nested list layout has not been confirmed against enough
/// real-world data to decode it structurally, so the body is kept opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedItemList {
    pub body: Vec<u8>,
}

/// `0xbeef0014`: class identifier plus, for the custom-URI class, a table
/// of typed property entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTable {
    pub class_identifier: Guid,
    pub entries: Vec<PropertyEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub kind: u32,
    pub data: Vec<u8>,
}

/// `0xbeef0019`: two GUIDs, folder type first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierPair {
    pub folder_type: Guid,
    pub secondary: Guid,
}

/// `0xbeef0025`/`0xbeef0026`: FILETIME values of unconfirmed meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamps {
    pub flags: u32,
    pub first: Option<Filetime>,
    pub second: Option<Filetime>,
    pub third: Option<Filetime>,
}

/// Walks the extension block region of an item, starting at `offset`
/// inside `data`. Malformed size words end the chain without discarding
/// blocks already parsed.
pub fn parse_chain(data: &[u8], offset: usize, codepage: AsciiCodepage) -> Vec<ExtensionBlock> {
    let mut blocks = Vec::new();
    let mut offset = offset;
    while offset + 2 <= data.len() {
        let size = match data.pread_with::<u16>(offset, scroll::LE) {
            Ok(size) => size as usize,
            Err(_) => break,
        };
        if size == 0 {
            break;
        }
        if size < 8 || offset + size > data.len() {
            debug!(
                "extension block at {} with size {} does not fit in {} bytes",
                offset,
                size,
                data.len()
            );
            break;
        }
        blocks.push(ExtensionBlock::parse(
            &data[offset..offset + size],
            offset,
            codepage,
        ));
        offset += size;
    }
    blocks
}

impl ExtensionBlock {
    /// Parses one block from `data`, which must hold exactly the block's
    /// `size` bytes (the chain walker guarantees at least the 8-byte
    /// header). `item_offset` is where the block sits inside its item and
    /// is used to check the offset-to-version back-reference some
    /// signatures carry. Body-level failures downgrade the payload to
    /// [`ExtensionPayload::Unknown`] instead of failing the item.
    pub fn parse(data: &[u8], item_offset: usize, codepage: AsciiCodepage) -> ExtensionBlock {
        let size = data.pread_with::<u16>(0, scroll::LE).unwrap_or(0);
        let version = data.pread_with::<u16>(2, scroll::LE).unwrap_or(0);
        let signature = data.pread_with::<u32>(4, scroll::LE).unwrap_or(0);
        let parsed = match signature {
            FOLDER_IDENTIFIERS_SIGNATURE => parse_folder_identifiers(data),
            IDENTIFIER_SIGNATURE => parse_identifier(data),
            FILE_ENTRY_EXTENSION_SIGNATURE => {
                file_entry::parse(data, item_offset, codepage).map(|payload| {
                    payload.map(ExtensionPayload::FileEntry)
                })
            }
            EMBEDDED_ITEM_LIST_SIGNATURE => parse_embedded_item_list(data),
            USERNAME_SIGNATURE => parse_username(data),
            PROPERTY_TABLE_SIGNATURE => parse_property_table(data),
            IDENTIFIER_PAIR_SIGNATURE => parse_identifier_pair(data),
            TIMESTAMPS_SIGNATURE => parse_timestamps(data, false),
            TIMESTAMPS3_SIGNATURE => parse_timestamps(data, true),
            _ => Ok(None),
        };
        let payload = match parsed {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!(
                    "extension block 0x{:08x} version {} size {} kept as raw",
                    signature, version, size
                );
                ExtensionPayload::Unknown
            }
            Err(err) => {
                debug!(
                    "extension block 0x{:08x} version {} failed to scan: {}",
                    signature, version, err
                );
                ExtensionPayload::Unknown
            }
        };
        ExtensionBlock {
            size,
            version,
            signature,
            data: data.to_vec(),
            payload,
        }
    }

    /// The file entry extension payload, if this block carries one.
    pub fn file_entry(&self) -> Option<&FileEntryExtension> {
        match &self.payload {
            ExtensionPayload::FileEntry(extension) => Some(extension),
            _ => None,
        }
    }
}

fn parse_folder_identifiers(data: &[u8]) -> Result<Option<ExtensionPayload>> {
    match data.len() {
        14 => Ok(Some(ExtensionPayload::FolderIdentifiers(
            FolderIdentifiers::default(),
        ))),
        42 => {
            let folder_type = Guid::parse(data, 8)?;
            let secondary = Guid::parse(data, 24)?;
            Ok(Some(ExtensionPayload::FolderIdentifiers(
                FolderIdentifiers {
                    folder_type: Some(folder_type),
                    secondary: Some(secondary),
                },
            )))
        }
        _ => Ok(None),
    }
}

fn parse_identifier(data: &[u8]) -> Result<Option<ExtensionPayload>> {
    if data.len() < 24 {
        return Ok(None);
    }
    let identifier = Guid::parse(data, 8)?;
    Ok(Some(ExtensionPayload::Identifier(identifier)))
}

fn parse_embedded_item_list(data: &[u8]) -> Result<Option<ExtensionPayload>> {
    if data.len() < 26 {
        return Ok(None);
    }
    Ok(Some(ExtensionPayload::EmbeddedItemList(EmbeddedItemList {
        body: data[24..].to_vec(),
    })))
}

fn parse_username(data: &[u8]) -> Result<Option<ExtensionPayload>> {
    if data.len() < 12 {
        return Ok(None);
    }
    // The last two bytes are the offset-to-version word, not string data.
    let (username, _) = strings::scan_utf16z(&data[..data.len() - 2], 8)?;
    Ok(Some(ExtensionPayload::Username(username)))
}

fn parse_property_table(data: &[u8]) -> Result<Option<ExtensionPayload>> {
    if data.len() < 26 {
        return Ok(None);
    }
    let class_identifier = Guid::parse(data, 8)?;
    let mut entries = Vec::new();
    if class_identifier == CURI_CLASS_IDENTIFIER {
        if data.len() < 58 {
            return Ok(None);
        }
        // 28 bytes of fixed fields between the class identifier and the
        // count-prefixed property table.
        let mut offset = 52;
        let count = data.gread_with::<u32>(&mut offset, scroll::LE)?;
        for _ in 0..count {
            if offset + 8 > data.len() {
                return Ok(None);
            }
            let kind = data.gread_with::<u32>(&mut offset, scroll::LE)?;
            let entry_size = data.gread_with::<u32>(&mut offset, scroll::LE)? as usize;
            if entry_size > data.len() || offset + entry_size > data.len() {
                return Ok(None);
            }
            entries.push(PropertyEntry {
                kind,
                data: data[offset..offset + entry_size].to_vec(),
            });
            offset += entry_size;
        }
    }
    Ok(Some(ExtensionPayload::PropertyTable(PropertyTable {
        class_identifier,
        entries,
    })))
}

fn parse_identifier_pair(data: &[u8]) -> Result<Option<ExtensionPayload>> {
    if data.len() != 42 {
        return Ok(None);
    }
    let folder_type = Guid::parse(data, 8)?;
    let secondary = Guid::parse(data, 24)?;
    Ok(Some(ExtensionPayload::IdentifierPair(IdentifierPair {
        folder_type,
        secondary,
    })))
}

fn parse_timestamps(data: &[u8], extended: bool) -> Result<Option<ExtensionPayload>> {
    if (extended && data.len() < 30) || (!extended && data.len() != 30) {
        return Ok(None);
    }
    let flags = data.pread_with::<u32>(8, scroll::LE)?;
    let first = Filetime::from_raw(data.pread_with::<u64>(12, scroll::LE)?);
    let second = Filetime::from_raw(data.pread_with::<u64>(20, scroll::LE)?);
    let third = if extended && data.len() >= 38 {
        Filetime::from_raw(data.pread_with::<u64>(28, scroll::LE)?)
    } else {
        None
    };
    Ok(Some(ExtensionPayload::Timestamps(Timestamps {
        flags,
        first,
        second,
        third,
    })))
}
