#![no_main]
use libfuzzer_sys::fuzz_target;

use shellitem::codepage::AsciiCodepage;
use shellitem::item::Item;

fuzz_target!(|data: &[u8]| {
    if let Ok(item) = Item::parse(data, AsciiCodepage::default()) {
        let _ = item.name();
        let _ = item.long_name();
        let _ = item.modification_time();
        let _ = item.file_reference();
        let _ = item.shell_folder_identifier();
        for block in &item.extension_blocks {
            let _ = block.file_entry();
        }
    }
});
