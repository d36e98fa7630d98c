//! Control panel items: category pages, CPL applets addressed by GUID,
//! and the bare `0x71` container older Windows releases write.

use scroll::Pread;

use crate::error::Result;
use crate::guid::Guid;

/// Magic of a control panel category item.
pub const CATEGORY_SIGNATURE: u32 = 0x39de2184;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPanelCategory {
    pub identifier: u32,
}

impl ControlPanelCategory {
    /// The display label for the category identifier, when known.
    pub fn label(&self) -> Option<&'static str> {
        let label = match self.identifier {
            0 => "All Control Panel Items",
            1 => "Appearance and Personalization",
            2 => "Hardware and Sound",
            3 => "Network and Internet",
            4 => "Sounds, Speech, and Audio Devices",
            5 => "System and Security",
            6 => "Clock, Language, and Region",
            7 => "Ease of Access",
            8 => "Programs",
            9 => "User Accounts",
            10 => "Security Center",
            11 => "Mobile PC",
            _ => return None,
        };
        Some(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPanelItem {
    pub identifier: Guid,
}

/// A `0x71` item that does not carry the 30-byte GUID layout; only the
/// raw bytes on the item remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPanel;

pub(crate) fn parse_category(data: &[u8]) -> Result<Option<(ControlPanelCategory, usize)>> {
    if data.len() < 12 {
        return Ok(None);
    }
    if data.pread_with::<u32>(4, scroll::LE)? != CATEGORY_SIGNATURE {
        return Ok(None);
    }
    let identifier = data.pread_with::<u32>(8, scroll::LE)?;
    Ok(Some((ControlPanelCategory { identifier }, 12)))
}

pub(crate) fn parse_item(data: &[u8]) -> Result<Option<(ControlPanelItem, usize)>> {
    if data.len() < 30 {
        return Ok(None);
    }
    let identifier = Guid::parse(data, 14)?;
    Ok(Some((ControlPanelItem { identifier }, 30)))
}

pub(crate) fn parse_container(data: &[u8]) -> Result<Option<(ControlPanel, usize)>> {
    if data.len() < 4 {
        return Ok(None);
    }
    Ok(Some((ControlPanel, data.len())))
}
