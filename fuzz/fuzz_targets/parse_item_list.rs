#![no_main]
use libfuzzer_sys::fuzz_target;

use shellitem::codepage::AsciiCodepage;
use shellitem::list::ItemList;

fuzz_target!(|data: &[u8]| {
    let (list, _) = ItemList::parse_lossy(data, AsciiCodepage::default());
    for item in &list {
        let _ = item.name();
        let _ = item.long_name();
    }
});
