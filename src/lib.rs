//! # shellitem
//!
//! A parser for the Windows *shell item* and *shell item list* binary
//! format: the serialized form of entries in the shell namespace found
//! inside LNK shortcuts, jump lists, `ComDlg32` MRU registry values and
//! other forensic artifacts.
//!
//! The format is undocumented and irregular: a single classifier byte
//! selects among a dozen record layouts, strings switch between ANSI and
//! UTF-16 depending on class flags, and items trail a chain of versioned,
//! signature-tagged extension blocks. Every decoder here is written to
//! survive adversarial input; anything unrecognized is preserved as raw
//! bytes instead of being dropped or faulted on.
//!
//! ```rust
//! use shellitem::codepage::AsciiCodepage;
//! use shellitem::list::ItemList;
//!
//! fn run(stream: &[u8]) -> shellitem::error::Result<()> {
//!     let list = ItemList::parse(stream, AsciiCodepage::default())?;
//!     for item in &list {
//!         println!("{:?}: {:?}", item.item_type, item.name());
//!     }
//!     Ok(())
//! }
//! # run(&[0x00, 0x00]).unwrap();
//! ```

pub mod codepage;
pub mod error;
pub mod extension;
pub mod guid;
pub mod item;
pub mod list;
pub mod strings;
pub mod time;

pub use crate::codepage::{AsciiCodepage, Codepage, Latin1};
pub use crate::error::{Error, Result};
pub use crate::extension::{ExtensionBlock, ExtensionPayload, FileEntryExtension};
pub use crate::guid::Guid;
pub use crate::item::{Item, ItemType, Payload};
pub use crate::list::ItemList;
pub use crate::strings::{AnsiString, ShellString};
pub use crate::time::{FatDateTime, Filetime};
