#![no_main]

use field_mutator_core::{from_value, replace_field_with_options, MutationOptions, MutationStrategy};
use libfuzzer_sys::fuzz_target;

const PATHS: &[&str] = &["a", "a.b", "a[0].b", "a[*]", "['a.b'].c"];

// Arbitrary bytes as the document, with and without merge-fuzzing.
// Goal: no panics, even on malformed input.
fuzz_target!(|data: &[u8]| {
    let Ok(document) = std::str::from_utf8(data) else {
        return;
    };

    let strategy = from_value(&serde_json::Value::String(document.to_string()));
    for merge_fuzzing in [false, true] {
        let options = MutationOptions {
            merge_fuzzing,
            ..MutationOptions::default()
        };
        for path in PATHS {
            let _ = replace_field_with_options(document, path, &strategy, &options);
            let _ = replace_field_with_options(
                document,
                path,
                &MutationStrategy::insert().with_data("\u{200B}"),
                &options,
            );
        }
    }
});
