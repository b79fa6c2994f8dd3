#![no_main]

use libfuzzer_sys::fuzz_target;
use modsbom_generator::join;
use modsbom_generator::resolver::stream::parse_app_modules;
use modsbom_generator::sbom::{SbomDocument, SynthesisOptions, synthesize};
use modsbom_generator::{GlobalIndirectIndex, ResolutionScope};

fuzz_target!(|data: &[u8]| {
    let Ok(modules) = parse_app_modules(data, &ResolutionScope::app("fuzz")) else {
        return;
    };
    let count = modules.len();
    let attributed = join::attribute(modules, &GlobalIndirectIndex::default());

    // 빈 경로 모듈은 합성 에러로 거부됨
    let Ok(doc) = synthesize("fuzz", &attributed, &SynthesisOptions::default()) else {
        return;
    };
    assert_eq!(doc.components.len(), count);

    let json = serde_json::to_string(&doc).expect("serialization must succeed");
    let parsed: SbomDocument = serde_json::from_str(&json).expect("round trip must parse");
    assert_eq!(parsed, doc);
});
