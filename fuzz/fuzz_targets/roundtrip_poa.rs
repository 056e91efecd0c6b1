#![no_main]

use bisac::{BisacMessage, Poa};
use libfuzzer_sys::fuzz_target;

// A parsed acknowledgement must survive a write and re-read unchanged.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(Some(first)) = Poa::load_from_str(text) else {
        return;
    };
    let written = first.to_bisac();
    let second = Poa::load_from_str(&written)
        .expect("written acknowledgement must parse")
        .expect("written acknowledgement must yield a message");
    assert_eq!(second.to_bisac(), written);
});
