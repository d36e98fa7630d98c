//! Game folder items from the Games explorer, addressed by instance GUID.

use scroll::Pread;

use crate::error::Result;
use crate::guid::Guid;

/// "GFSI"
pub const SIGNATURE: &[u8; 4] = b"GFSI";

const SIZEOF_GAME_FOLDER: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameFolder {
    pub identifier: Guid,
    pub unknown: u64,
}

pub(crate) fn parse(data: &[u8]) -> Result<Option<(GameFolder, usize)>> {
    if data.len() < SIZEOF_GAME_FOLDER {
        return Ok(None);
    }
    if &data[4..8] != SIGNATURE {
        return Ok(None);
    }
    let identifier = Guid::parse(data, 8)?;
    let unknown = data.pread_with::<u64>(24, scroll::LE)?;
    Ok(Some((
        GameFolder {
            identifier,
            unknown,
        },
        SIZEOF_GAME_FOLDER,
    )))
}
