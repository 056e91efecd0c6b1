#![no_main]

use bisac::{BisacReader, Po, RecoveryMode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for mode in [RecoveryMode::Strict, RecoveryMode::Lenient] {
        let reader = BisacReader::<_, Po>::new(data).with_recovery_mode(mode);
        for result in reader.take(64) {
            if result.is_err() {
                break;
            }
        }
    }
});
