#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

use ctxplan::infrastructure::documents::parse_solution;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(solution) = parse_solution(content, Path::new("fuzz.csolution.yml")) {
            let _ = solution.expand(None);
        }
    }
});
