//! Users property view items: property-store-backed entries written by
//! search results, libraries and similar virtual views. The property
//! store payload is carried as a raw blob; interpreting serialized
//! property stores is a separate concern.

use scroll::Pread;

use crate::error::Result;
use crate::guid::Guid;

/// Signatures seen at offset 4 of a users property view item.
pub const PROPERTY_VIEW_SIGNATURES: [u32; 5] =
    [0x10141981, 0x23a3dfd5, 0x23febbee, 0x3b93afbb, 0xbeebee00];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersPropertyView {
    pub signature: u32,
    pub known_folder_identifier: Option<Guid>,
    pub property_store_data: Vec<u8>,
}

pub(crate) fn parse(data: &[u8]) -> Result<Option<(UsersPropertyView, usize)>> {
    if data.len() < 12 {
        return Ok(None);
    }
    let signature = data.pread_with::<u32>(4, scroll::LE)?;
    if !PROPERTY_VIEW_SIGNATURES.contains(&signature) {
        return Ok(None);
    }
    let store_size = data.pread_with::<u32>(8, scroll::LE)? as usize;
    if store_size > data.len() || 12 + store_size > data.len() {
        return Ok(None);
    }
    let property_store_data = data[12..12 + store_size].to_vec();
    let offset = 12 + store_size;
    let known_folder_identifier = if data.len() - offset >= 16 {
        Some(Guid::parse(data, offset)?)
    } else {
        None
    };
    Ok(Some((
        UsersPropertyView {
            signature,
            known_folder_identifier,
            property_store_data,
        },
        data.len(),
    )))
}
