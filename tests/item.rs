use shellitem::codepage::AsciiCodepage;
use shellitem::extension::FILE_ENTRY_EXTENSION_SIGNATURE;
use shellitem::item::{Item, ItemType, Payload};
use shellitem::list::ItemList;

/// A CD burn staging item captured from a Windows XP machine: one staged
/// directory, "English", described twice over by nested item lists.
const CDBURN_STREAM: [u8; 194] = [
    0xc0, 0x00, 0x01, 0x00, 0x41, 0x75, 0x67, 0x4d, 0x04, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x52, 0x00, 0x31, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x10, 0x00, 0x45, 0x6e, 0x67, 0x6c, 0x69, 0x73, 0x68, 0x00, 0x3c, 0x00, 0x08,
    0x00, 0x04, 0x00, 0xef, 0xbe, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2a, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x45, 0x00, 0x6e, 0x00, 0x67, 0x00,
    0x6c, 0x00, 0x69, 0x00, 0x73, 0x00, 0x68, 0x00, 0x00, 0x00, 0x16, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x52, 0x00, 0x31, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x10, 0x00, 0x45, 0x6e, 0x67, 0x6c, 0x69, 0x73, 0x68, 0x00, 0x3c, 0x00, 0x08, 0x00, 0x04,
    0x00, 0xef, 0xbe, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2a, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x45, 0x00, 0x6e, 0x00, 0x67, 0x00, 0x6c, 0x00,
    0x69, 0x00, 0x73, 0x00, 0x68, 0x00, 0x00, 0x00, 0x16, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[test]
fn cdburn_item_decodes_with_staged_list() {
    let _ = stderrlog::new().verbosity(4).init();
    let list = ItemList::parse(&CDBURN_STREAM, AsciiCodepage::default()).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.consumed(), CDBURN_STREAM.len());

    let item = list.get(0).unwrap();
    assert_eq!(item.class_type, 0x01);
    assert_eq!(item.item_type, ItemType::CdBurn);
    assert_eq!(item.raw, &CDBURN_STREAM[..192]);

    let burn = match &item.payload {
        Payload::CdBurn(burn) => burn,
        other => panic!("expected a cd burn payload, got {:?}", other),
    };
    assert_eq!(burn.discriminator, 4);

    let staged = burn.items.as_ref().unwrap();
    assert_eq!(staged.len(), 1);
    let english = staged.get(0).unwrap();
    assert_eq!(english.item_type, ItemType::FileEntry);
    assert!(english.is_directory());
    assert_eq!(english.name().as_deref(), Some("English"));
    assert_eq!(english.long_name(), Some("English"));
    assert_eq!(english.extension_blocks.len(), 1);
    assert_eq!(
        english.extension_blocks[0].signature,
        FILE_ENTRY_EXTENSION_SIGNATURE
    );
    assert_eq!(english.extension_blocks[0].version, 8);
}

fn file_entry_with_long_name() -> Vec<u8> {
    let mut item = Vec::new();
    item.extend_from_slice(&[0x00, 0x00, 0x32, 0x00]);
    item.extend_from_slice(&512u32.to_le_bytes());
    // 2008-01-02 03:04:04 as FAT date/time
    item.extend_from_slice(&0x3822_1882u32.to_le_bytes());
    item.extend_from_slice(&0x20u16.to_le_bytes());
    item.extend_from_slice(b"README.TXT\0\0");

    let block_offset = item.len() as u16;
    let mut block = Vec::new();
    block.extend_from_slice(&[0x00, 0x00]);
    block.extend_from_slice(&8u16.to_le_bytes());
    block.extend_from_slice(&0xbeef0004u32.to_le_bytes());
    block.extend_from_slice(&0u32.to_le_bytes()); // creation
    block.extend_from_slice(&0u32.to_le_bytes()); // access
    block.extend_from_slice(&[0x00; 2]);
    block.extend_from_slice(&[0x00; 2]);
    block.extend_from_slice(&0x0001_0000_0000_0005u64.to_le_bytes());
    block.extend_from_slice(&[0x00; 8]);
    block.extend_from_slice(&[0x00; 2]); // long name size hint
    block.extend_from_slice(&0u32.to_le_bytes());
    for unit in "Readme.txt".encode_utf16() {
        block.extend_from_slice(&unit.to_le_bytes());
    }
    block.extend_from_slice(&[0x00, 0x00]);
    block.extend_from_slice(&block_offset.to_le_bytes());
    let block_size = block.len() as u16;
    block[0..2].copy_from_slice(&block_size.to_le_bytes());

    item.extend_from_slice(&block);
    let size = item.len() as u16;
    item[0..2].copy_from_slice(&size.to_le_bytes());
    item
}

#[test]
fn file_entry_exposes_long_name_and_file_reference() {
    let data = file_entry_with_long_name();
    let item = Item::parse(&data, AsciiCodepage::default()).unwrap();
    assert_eq!(item.item_type, ItemType::FileEntry);
    assert_eq!(item.file_size(), Some(512));
    assert_eq!(item.name().as_deref(), Some("README.TXT"));
    assert!(!item.is_directory());
    assert_eq!(
        item.modification_time().unwrap().to_string(),
        "2008-01-02 03:04:04"
    );
    assert_eq!(item.extension_blocks.len(), 1);
    assert_eq!(item.long_name(), Some("Readme.txt"));
    assert_eq!(item.file_reference(), Some(0x0001_0000_0000_0005));
    let extension = item.file_entry_extension().unwrap();
    assert_eq!(extension.mft_entry(), Some(5));
    assert_eq!(extension.sequence_number(), Some(1));
    assert!(!extension.version_offset_mismatch);
}

#[test]
fn control_panel_category_labels_its_identifier() {
    let data = [
        0x0c, 0x00, 0x00, 0x00, 0x84, 0x21, 0xde, 0x39, 0x05, 0x00, 0x00, 0x00,
    ];
    let item = Item::parse(&data, AsciiCodepage::default()).unwrap();
    assert_eq!(item.item_type, ItemType::ControlPanelCategory);
    match &item.payload {
        Payload::ControlPanelCategory(category) => {
            assert_eq!(category.identifier, 5);
            assert_eq!(category.label(), Some("System and Security"));
        }
        other => panic!("expected a category payload, got {:?}", other),
    }
}

#[test]
fn network_location_with_description_and_comments() {
    let mut data = vec![0x00, 0x00, 0x41, 0x00, 0xc0];
    data.extend_from_slice(b"\\\\server\\share\0");
    data.extend_from_slice(b"Docs\0");
    data.extend_from_slice(b"shared drive\0");
    data.extend_from_slice(&[0x00, 0x00]);
    let size = data.len() as u16;
    data[0..2].copy_from_slice(&size.to_le_bytes());

    let item = Item::parse(&data, AsciiCodepage::default()).unwrap();
    assert_eq!(item.item_type, ItemType::NetworkLocation);
    assert_eq!(item.name().as_deref(), Some("\\\\server\\share"));
    match &item.payload {
        Payload::NetworkLocation(location) => {
            assert_eq!(location.flags, 0xc0);
            assert_eq!(
                location.description.as_ref().unwrap().to_string_lossy(),
                "Docs"
            );
            assert_eq!(
                location.comments.as_ref().unwrap().to_string_lossy(),
                "shared drive"
            );
        }
        other => panic!("expected a network location payload, got {:?}", other),
    }
}

#[test]
fn root_folder_guid_reads_back_canonically() {
    let data = [
        0x14, 0x00, 0x1f, 0x50, 0xe0, 0x4f, 0xd0, 0x20, 0xea, 0x3a, 0x69, 0x10, 0xa2, 0xd8,
        0x08, 0x00, 0x2b, 0x30, 0x30, 0x9d,
    ];
    let item = Item::parse(&data, AsciiCodepage::default()).unwrap();
    assert_eq!(item.item_type, ItemType::RootFolder);
    assert_eq!(
        item.shell_folder_identifier().unwrap().to_string(),
        "20d04fe0-3aea-1069-a2d8-08002b30309d"
    );
    assert_eq!(
        item.shell_folder_identifier().unwrap().to_bytes(),
        [
            0x20, 0xd0, 0x4f, 0xe0, 0x3a, 0xea, 0x10, 0x69, 0xa2, 0xd8, 0x08, 0x00, 0x2b, 0x30,
            0x30, 0x9d
        ]
    );
}
