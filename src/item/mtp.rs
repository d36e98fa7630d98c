//! Media Transfer Protocol items for portable devices. The two known
//! forms share a class type and are told apart by the signature at
//! offset 6; their bodies are device-specific property bags kept raw.

use scroll::Pread;

use crate::error::Result;

pub const FILE_ENTRY_SIGNATURE: u32 = 0x07192006;
pub const VOLUME_SIGNATURE: u32 = 0x10312005;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MtpKind {
    FileEntry,
    Volume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mtp {
    pub kind: MtpKind,
    pub signature: u32,
}

pub(crate) fn parse(data: &[u8]) -> Result<Option<(Mtp, usize)>> {
    if data.len() < 10 {
        return Ok(None);
    }
    let signature = data.pread_with::<u32>(6, scroll::LE)?;
    let kind = match signature {
        FILE_ENTRY_SIGNATURE => MtpKind::FileEntry,
        VOLUME_SIGNATURE => MtpKind::Volume,
        _ => return Ok(None),
    };
    Ok(Some((Mtp { kind, signature }, data.len())))
}
