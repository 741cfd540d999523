#![no_main]

use libfuzzer_sys::fuzz_target;
use objecthash::{GoldenCases, JsonMode};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    for case in GoldenCases::new(Cursor::new(data)) {
        match case {
            Ok(case) => {
                let _ = case.check(JsonMode::Common);
            }
            Err(_) => break,
        }
    }
});
