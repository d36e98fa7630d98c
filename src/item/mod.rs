//! A single shell item: classification, variant decoding and the trailing
//! extension block chain.
//!
//! The class type byte at offset 2 selects a band of candidate decoders.
//! Candidates are tried in order; one that does not recognize the shape of
//! the bytes steps aside (`Ok(None)`) rather than failing, and an item no
//! candidate claims is kept as [`ItemType::Unknown`] with its raw bytes.
//! Only genuinely malformed input fails the parse.

pub mod cdburn;
pub mod compressed_folder;
pub mod control_panel;
pub mod delegate;
pub mod file_entry;
pub mod game_folder;
pub mod mtp;
pub mod network_location;
pub mod root_folder;
pub mod uri;
pub mod users_property_view;
pub mod volume;

pub use cdburn::CdBurn;
pub use compressed_folder::CompressedFolder;
pub use control_panel::{ControlPanel, ControlPanelCategory, ControlPanelItem};
pub use delegate::Delegate;
pub use file_entry::FileEntry;
pub use game_folder::GameFolder;
pub use mtp::{Mtp, MtpKind};
pub use network_location::NetworkLocation;
pub use root_folder::RootFolder;
pub use uri::Uri;
pub use users_property_view::UsersPropertyView;
pub use volume::Volume;

use log::debug;

use crate::codepage::AsciiCodepage;
use crate::error::{Error, Result};
use crate::extension::{self, ExtensionBlock, FileEntryExtension};
use crate::guid::Guid;
use crate::strings::ShellString;
use crate::time::FatDateTime;

/// Items can nest (a CD burn item stages a full item list); parsing stops
/// descending at this depth and keeps deeper content raw.
pub(crate) const MAX_NESTING: usize = 16;

/// The logical kind of a shell item, derived from the class type byte and,
/// within a class band, from embedded signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Unknown,
    RootFolder,
    Volume,
    FileEntry,
    NetworkLocation,
    CompressedFolder,
    ControlPanel,
    ControlPanelCategory,
    ControlPanelItem,
    Delegate,
    Uri,
    UsersPropertyView,
    CdBurn,
    GameFolder,
    MtpFileEntry,
    MtpVolume,
}

/// Type-specific decoded fields of an item.
#[derive(Debug, Clone)]
pub enum Payload {
    RootFolder(RootFolder),
    Volume(Volume),
    FileEntry(FileEntry),
    NetworkLocation(NetworkLocation),
    ControlPanelCategory(ControlPanelCategory),
    ControlPanelItem(ControlPanelItem),
    ControlPanel(ControlPanel),
    Uri(Uri),
    UsersPropertyView(UsersPropertyView),
    CdBurn(CdBurn),
    GameFolder(GameFolder),
    CompressedFolder(CompressedFolder),
    Delegate(Delegate),
    Mtp(Mtp),
    /// No decoder claimed the item; the raw bytes are all there is.
    Unknown,
}

/// One decoded shell item.
#[derive(Debug, Clone)]
pub struct Item {
    /// The exact bytes of the item, including the 2-byte size prefix, so
    /// the input can be reserialized verbatim.
    pub raw: Vec<u8>,
    /// The classifier byte at offset 2 (0 when the item is too short to
    /// have one).
    pub class_type: u8,
    pub item_type: ItemType,
    /// Codepage used for the item's ANSI strings.
    pub ascii_codepage: AsciiCodepage,
    pub payload: Payload,
    /// Extension blocks in the order they appear after the variant data.
    pub extension_blocks: Vec<ExtensionBlock>,
}

impl Item {
    /// Decodes one item from `data`, which spans the whole item including
    /// its 2-byte size prefix (the item-list walker hands items over in
    /// exactly this form).
    pub fn parse(data: &[u8], codepage: AsciiCodepage) -> Result<Item> {
        Item::parse_nested(data, codepage, 0)
    }

    pub(crate) fn parse_nested(
        data: &[u8],
        codepage: AsciiCodepage,
        depth: usize,
    ) -> Result<Item> {
        if data.len() < 2 {
            return Err(Error::Malformed(format!(
                "shell item of {} bytes is too small",
                data.len()
            )));
        }
        if data.len() < 3 {
            return Ok(Item {
                raw: data.to_vec(),
                class_type: 0,
                item_type: ItemType::Unknown,
                ascii_codepage: codepage,
                payload: Payload::Unknown,
                extension_blocks: Vec::new(),
            });
        }
        let class_type = data[2];
        let decoded = dispatch(data, codepage, depth)?;
        let (payload, item_type, end) = match decoded {
            Some(decoded) => decoded,
            None => (Payload::Unknown, ItemType::Unknown, data.len()),
        };
        debug!(
            "shell item class 0x{:02x} decoded as {:?} ({} of {} bytes)",
            class_type,
            item_type,
            end,
            data.len()
        );
        let extension_blocks = if item_type != ItemType::Unknown {
            extension::parse_chain(data, end + (end & 1), codepage)
        } else {
            Vec::new()
        };
        Ok(Item {
            raw: data.to_vec(),
            class_type,
            item_type,
            ascii_codepage: codepage,
            payload,
            extension_blocks,
        })
    }

    /// The item's display name: the primary name of file-like items, the
    /// drive string of volumes, the location of network items, the URL of
    /// URI items. Converted with the bundled Latin-1 fallback where the
    /// source is ANSI.
    pub fn name(&self) -> Option<String> {
        match &self.payload {
            Payload::FileEntry(entry) => Some(entry.primary_name.to_string_lossy()),
            Payload::Volume(volume) => volume.name.as_ref().map(|name| name.to_string_lossy()),
            Payload::NetworkLocation(location) => Some(location.location.to_string_lossy()),
            Payload::Uri(uri) => uri.url.clone(),
            Payload::Delegate(delegate) => Some(delegate.name.to_string_lossy()),
            _ => None,
        }
    }

    /// The first file entry extension block, which carries the long name
    /// and NTFS metadata for file-like items.
    pub fn file_entry_extension(&self) -> Option<&FileEntryExtension> {
        self.extension_blocks
            .iter()
            .find_map(|block| block.file_entry())
    }

    /// Long form of the name from the file entry extension.
    pub fn long_name(&self) -> Option<&str> {
        self.file_entry_extension()?.long_name.as_deref()
    }

    /// Localized form of the name from the file entry extension.
    pub fn localized_name(&self) -> Option<&ShellString> {
        self.file_entry_extension()?.localized_name.as_ref()
    }

    pub fn modification_time(&self) -> Option<FatDateTime> {
        match &self.payload {
            Payload::FileEntry(entry) => entry.fat_modification_time,
            Payload::Delegate(delegate) => delegate.fat_modification_time,
            _ => None,
        }
    }

    pub fn creation_time(&self) -> Option<FatDateTime> {
        self.file_entry_extension()?.fat_creation_time
    }

    pub fn access_time(&self) -> Option<FatDateTime> {
        self.file_entry_extension()?.fat_access_time
    }

    pub fn file_size(&self) -> Option<u32> {
        match &self.payload {
            Payload::FileEntry(entry) => Some(entry.file_size),
            Payload::Delegate(delegate) => Some(delegate.file_size),
            _ => None,
        }
    }

    /// NTFS MFT reference from the file entry extension.
    pub fn file_reference(&self) -> Option<u64> {
        self.file_entry_extension()?.file_reference
    }

    pub fn is_directory(&self) -> bool {
        match &self.payload {
            Payload::FileEntry(entry) => entry.is_directory,
            _ => false,
        }
    }

    /// The shell folder identifier of root folder, volume and delegate
    /// items.
    pub fn shell_folder_identifier(&self) -> Option<Guid> {
        match &self.payload {
            Payload::RootFolder(folder) => Some(folder.shell_folder_identifier),
            Payload::Volume(volume) => volume.shell_folder_identifier,
            Payload::Delegate(delegate) => Some(delegate.shell_folder_identifier),
            _ => None,
        }
    }

    pub fn has_extension_blocks(&self) -> bool {
        !self.extension_blocks.is_empty()
    }
}

/// Tries the candidate decoders for the item's class band, in order.
fn dispatch(
    data: &[u8],
    codepage: AsciiCodepage,
    depth: usize,
) -> Result<Option<(Payload, ItemType, usize)>> {
    let class_type = data[2];
    let decoded = match class_type {
        0x00 => control_panel::parse_category(data)?.map(|(category, end)| {
            (
                Payload::ControlPanelCategory(category),
                ItemType::ControlPanelCategory,
                end,
            )
        }),
        0x01 => {
            if let Some((burn, end)) = cdburn::parse(data, codepage, depth)? {
                Some((Payload::CdBurn(burn), ItemType::CdBurn, end))
            } else {
                game_folder::parse(data)?.map(|(folder, end)| {
                    (Payload::GameFolder(folder), ItemType::GameFolder, end)
                })
            }
        }
        0x10..=0x1f => root_folder::parse(data)?.map(|(folder, end)| {
            (Payload::RootFolder(folder), ItemType::RootFolder, end)
        }),
        0x20..=0x2f => volume::parse(data, codepage)?
            .map(|(volume, end)| (Payload::Volume(volume), ItemType::Volume, end)),
        0x30..=0x3f => file_entry::parse(data, codepage)?.map(|(entry, end)| {
            (Payload::FileEntry(entry), ItemType::FileEntry, end)
        }),
        0x40..=0x4f => {
            if let Some((location, end)) = network_location::parse(data, codepage)? {
                Some((
                    Payload::NetworkLocation(location),
                    ItemType::NetworkLocation,
                    end,
                ))
            } else {
                compressed_folder::parse(data)?.map(|(folder, end)| {
                    (
                        Payload::CompressedFolder(folder),
                        ItemType::CompressedFolder,
                        end,
                    )
                })
            }
        }
        0x52 => mtp::parse(data)?.map(|(mtp, end)| {
            let item_type = match mtp.kind {
                MtpKind::FileEntry => ItemType::MtpFileEntry,
                MtpKind::Volume => ItemType::MtpVolume,
            };
            (Payload::Mtp(mtp), item_type, end)
        }),
        0x61 => uri::parse(data)?
            .map(|(uri, end)| (Payload::Uri(uri), ItemType::Uri, end)),
        0x71 => {
            if let Some((item, end)) = control_panel::parse_item(data)? {
                Some((
                    Payload::ControlPanelItem(item),
                    ItemType::ControlPanelItem,
                    end,
                ))
            } else {
                control_panel::parse_container(data)?.map(|(panel, end)| {
                    (Payload::ControlPanel(panel), ItemType::ControlPanel, end)
                })
            }
        }
        0x74 => delegate::parse(data, codepage)?.map(|(delegate, end)| {
            (Payload::Delegate(delegate), ItemType::Delegate, end)
        }),
        0x7a | 0xb1 => users_property_view::parse(data)?.map(|(view, end)| {
            (
                Payload::UsersPropertyView(view),
                ItemType::UsersPropertyView,
                end,
            )
        }),
        0xc3 => network_location::parse(data, codepage)?.map(|(location, end)| {
            (
                Payload::NetworkLocation(location),
                ItemType::NetworkLocation,
                end,
            )
        }),
        _ => None,
    };
    Ok(decoded)
}
