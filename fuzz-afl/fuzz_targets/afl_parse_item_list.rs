#[macro_use]
extern crate afl;

fn main() {
    fuzz!(|data: &[u8]| {
        let (list, _) =
            shellitem::list::ItemList::parse_lossy(data, shellitem::codepage::AsciiCodepage::default());
        for item in &list {
            let _ = item.name();
            let _ = item.long_name();
            let _ = item.localized_name();
        }
    });
}
