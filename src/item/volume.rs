//! Volume items: drive letters and the GUID-addressed volume forms.

use crate::codepage::AsciiCodepage;
use crate::error::Result;
use crate::guid::Guid;
use crate::strings::{self, AnsiString};

#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// The drive string, present when the low class bit is set (and for
    /// the by-name form `0x2e`).
    pub name: Option<AnsiString>,
    /// Volume identifier carried by the short nameless form.
    pub identifier: Option<Guid>,
    /// Shell folder identifier carried by the long nameless form.
    pub shell_folder_identifier: Option<Guid>,
    /// The low nibble of the class type.
    pub flags: u8,
}

pub(crate) fn parse(
    data: &[u8],
    codepage: AsciiCodepage,
) -> Result<Option<(Volume, usize)>> {
    if data.len() < 4 {
        return Ok(None);
    }
    let class_type = data[2];
    let flags = class_type & 0x0f;
    if class_type == 0x2e || flags & 0x01 != 0 {
        let (bytes, consumed) = strings::scan_ansiz(data, 3)?;
        let name = AnsiString::new(bytes.to_vec(), codepage);
        let mut end = 3 + consumed;
        end += end & 1;
        return Ok(Some((
            Volume {
                name: Some(name),
                identifier: None,
                shell_folder_identifier: None,
                flags,
            },
            end.min(data.len()),
        )));
    }
    // Nameless forms carry identifiers instead: a volume GUID in the short
    // form, a shell folder GUID at 14 in the long form.
    if data.len() >= 30 {
        let shell_folder_identifier = Guid::parse(data, 14)?;
        return Ok(Some((
            Volume {
                name: None,
                identifier: None,
                shell_folder_identifier: Some(shell_folder_identifier),
                flags,
            },
            30,
        )));
    }
    if data.len() >= 20 {
        let identifier = Guid::parse(data, 4)?;
        return Ok(Some((
            Volume {
                name: None,
                identifier: Some(identifier),
                shell_folder_identifier: None,
                flags,
            },
            20,
        )));
    }
    Ok(None)
}
