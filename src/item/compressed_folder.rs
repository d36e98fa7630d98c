//! Compressed (zip) folder items. The internal layout varies per Windows
//! release and is not decoded; the item's raw bytes remain available.

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressedFolder;

pub(crate) fn parse(data: &[u8]) -> Result<Option<(CompressedFolder, usize)>> {
    if data.len() < 4 {
        return Ok(None);
    }
    Ok(Some((CompressedFolder, data.len())))
}
