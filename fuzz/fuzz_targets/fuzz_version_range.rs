#![no_main]

use libfuzzer_sys::fuzz_target;

use ctxplan::domain::value_objects::VersionRange;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(range) = VersionRange::parse(text) {
            if let Some(pinned) = range.pinned() {
                assert!(range.contains(pinned));
            }
        }
    }
});
