//! CD burn items: the staging area Windows keeps for files queued to be
//! written to disc. The item embeds a complete shell item list describing
//! the staged content.

use scroll::Pread;

use crate::codepage::AsciiCodepage;
use crate::error::Result;
use crate::list::ItemList;

/// "AugM"
pub const SIGNATURE: &[u8; 4] = b"AugM";

const MINIMUM_SIZE: usize = 18;

#[derive(Debug, Clone)]
pub struct CdBurn {
    /// Selects where the staged list starts; only 2 and 4 are known.
    pub discriminator: u32,
    /// The staged content, decoded with the same walker as a top level
    /// stream. `None` when the nesting limit was reached.
    pub items: Option<ItemList>,
}

pub(crate) fn parse(
    data: &[u8],
    codepage: AsciiCodepage,
    depth: usize,
) -> Result<Option<(CdBurn, usize)>> {
    if data.len() < MINIMUM_SIZE {
        return Ok(None);
    }
    if &data[4..8] != SIGNATURE {
        return Ok(None);
    }
    let discriminator = data.pread_with::<u32>(8, scroll::LE)?;
    let list_offset = match discriminator {
        2 => 16,
        4 => 20,
        _ => return Ok(None),
    };
    if list_offset >= data.len() {
        return Ok(None);
    }
    let items = if depth < super::MAX_NESTING {
        match ItemList::parse_nested(&data[list_offset..], codepage, depth + 1) {
            Ok(items) => Some(items),
            // A staged list that does not walk means the shape was not a
            // CD burn item after all.
            Err(_) => return Ok(None),
        }
    } else {
        None
    };
    Ok(Some((
        CdBurn {
            discriminator,
            items,
        },
        data.len(),
    )))
}
