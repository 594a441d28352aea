#![no_main]

use libfuzzer_sys::fuzz_target;

use ctxplan::ContextId;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(id) = ContextId::parse(text) {
            // Whatever parses must print back to something that parses the same.
            let reparsed = ContextId::parse(&id.to_string());
            assert_eq!(reparsed.ok(), Some(id));
        }
    }
});
