#![no_main]

use libfuzzer_sys::fuzz_target;
use modsbom_generator::ResolutionScope;
use modsbom_generator::resolver::stream::{parse_app_modules, parse_global_index};

fuzz_target!(|data: &[u8]| {
    let _ = parse_global_index(data, &ResolutionScope::Global);
    let _ = parse_app_modules(data, &ResolutionScope::app("fuzz"));
});
