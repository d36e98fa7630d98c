//! The item-list walker: a shell item list is a concatenation of
//! length-prefixed items closed by a zero size word, together describing
//! one path through the shell namespace.

use log::debug;
use scroll::Pread;

use crate::codepage::AsciiCodepage;
use crate::error::{Error, Result};
use crate::item::Item;

/// An ordered sequence of shell items decoded from one byte stream. Items
/// keep their original byte spans, so concatenating every item's `raw`
/// plus the 2-byte terminator reproduces the consumed prefix of the input.
#[derive(Debug, Clone, Default)]
pub struct ItemList {
    pub items: Vec<Item>,
    consumed: usize,
}

impl ItemList {
    /// Decodes a complete item list. A size prefix that runs past the end
    /// of the stream fails the walk; use [`ItemList::parse_lossy`] to also
    /// recover the items decoded before that point.
    pub fn parse(stream: &[u8], codepage: AsciiCodepage) -> Result<ItemList> {
        let (list, error) = walk(stream, codepage, 0);
        match error {
            Some(error) => Err(error),
            None => Ok(list),
        }
    }

    /// Decodes as much of the stream as possible, returning the items
    /// decoded before any error together with the error itself.
    pub fn parse_lossy(stream: &[u8], codepage: AsciiCodepage) -> (ItemList, Option<Error>) {
        walk(stream, codepage, 0)
    }

    pub(crate) fn parse_nested(
        stream: &[u8],
        codepage: AsciiCodepage,
        depth: usize,
    ) -> Result<ItemList> {
        let (list, error) = walk(stream, codepage, depth);
        match error {
            Some(error) => Err(error),
            None => Ok(list),
        }
    }

    /// Bytes consumed from the input, terminator included when present.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a Item;
    type IntoIter = core::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn walk(stream: &[u8], codepage: AsciiCodepage, depth: usize) -> (ItemList, Option<Error>) {
    let mut items = Vec::new();
    let mut cursor = 0;
    loop {
        if stream.len() - cursor < 2 {
            break;
        }
        // The while-condition guarantees the read.
        let size = match stream.pread_with::<u16>(cursor, scroll::LE) {
            Ok(size) => size as usize,
            Err(_) => break,
        };
        if size == 0 {
            cursor += 2;
            break;
        }
        if size < 2 || cursor + size > stream.len() {
            debug!(
                "item at {} declares {} bytes, {} remain",
                cursor,
                size,
                stream.len() - cursor
            );
            return (
                ItemList {
                    items,
                    consumed: cursor,
                },
                Some(Error::Truncated {
                    declared: size,
                    available: stream.len() - cursor,
                }),
            );
        }
        match Item::parse_nested(&stream[cursor..cursor + size], codepage, depth) {
            Ok(item) => items.push(item),
            Err(error) => {
                return (
                    ItemList {
                        items,
                        consumed: cursor,
                    },
                    Some(error),
                );
            }
        }
        cursor += size;
    }
    (
        ItemList {
            items,
            consumed: cursor,
        },
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemType;

    const CATEGORY: [u8; 12] = [
        0x0c, 0x00, 0x00, 0x00, 0x84, 0x21, 0xde, 0x39, 0x05, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn walks_items_until_terminator() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&CATEGORY);
        stream.extend_from_slice(&CATEGORY);
        stream.extend_from_slice(&[0x00, 0x00]);
        let list = ItemList::parse(&stream, AsciiCodepage::default()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.consumed(), stream.len());
        assert!(
            list.iter()
                .all(|item| item.item_type == ItemType::ControlPanelCategory)
        );
    }

    #[test]
    fn preserved_spans_reconstruct_the_input() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&CATEGORY);
        stream.extend_from_slice(&[0x08, 0x00, 0xee, 0x00, 0x01, 0x02, 0x03, 0x04]);
        stream.extend_from_slice(&[0x00, 0x00]);
        let list = ItemList::parse(&stream, AsciiCodepage::default()).unwrap();
        let mut rebuilt: Vec<u8> = list.iter().flat_map(|item| item.raw.clone()).collect();
        rebuilt.extend_from_slice(&[0x00, 0x00]);
        assert_eq!(rebuilt, stream);
    }

    #[test]
    fn missing_terminator_ends_at_stream_end() {
        let list = ItemList::parse(&CATEGORY, AsciiCodepage::default()).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.consumed(), CATEGORY.len());
    }

    #[test]
    fn empty_stream_is_an_empty_list() {
        let list = ItemList::parse(&[], AsciiCodepage::default()).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.consumed(), 0);
    }

    #[test]
    fn truncated_size_prefix_keeps_earlier_items() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&CATEGORY);
        stream.extend_from_slice(&[0x20, 0x01, 0xaa, 0xbb]);
        let (list, error) = ItemList::parse_lossy(&stream, AsciiCodepage::default());
        assert_eq!(list.len(), 1);
        assert_eq!(list.consumed(), CATEGORY.len());
        match error {
            Some(Error::Truncated {
                declared,
                available,
            }) => {
                assert_eq!(declared, 0x120);
                assert_eq!(available, 4);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
        assert!(ItemList::parse(&stream, AsciiCodepage::default()).is_err());
    }

    #[test]
    fn undersized_prefix_is_truncation() {
        let stream = [0x01, 0x00, 0xff];
        assert!(ItemList::parse(&stream, AsciiCodepage::default()).is_err());
    }
}
