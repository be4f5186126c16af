#![no_main]

use libfuzzer_sys::fuzz_target;
use sealframe::MasterKey;

fuzz_target!(|data: &str| {
    // Attack: arbitrary strings through the hex master importer.
    // Validates: no panics, strict rejection rules, and export/import
    // stability for every accepted value.

    match MasterKey::import_hex(data) {
        Ok(master) => {
            assert_eq!(data.len(), 64, "accepted import of wrong length");
            assert!(
                data.bytes().all(|b| b.is_ascii_hexdigit()),
                "accepted import with non-hex characters"
            );

            // Accepted values re-export canonically and re-import to the
            // same key.
            let exported = master.export_hex();
            assert_eq!(exported, data.to_ascii_lowercase());
            let again = MasterKey::import_hex(&exported).expect("canonical form must import");
            assert_eq!(again.as_bytes(), master.as_bytes());
        }
        Err(_) => {
            // Rejection is fine; consistency is not optional.
            assert!(
                MasterKey::import_hex(data).is_err(),
                "same input must be rejected consistently"
            );
        }
    }
});
