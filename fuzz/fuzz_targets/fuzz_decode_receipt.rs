#![no_main]

use arbitrum_ecosystem::Arbitrum;
use ecosystem_traits::{Ecosystem, RawFields};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary JSON documents must decode or fail, never panic
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let Ok(fields) = RawFields::from_value(value) else {
        return;
    };

    let arbitrum = Arbitrum::default();
    let _ = arbitrum.create_transaction(fields.clone(), None);
    if let Ok(receipt) = arbitrum.decode_receipt(fields, None) {
        assert!(receipt.txn_hash.starts_with("0x"));
        let _ = receipt.total_fees_paid();
        let _ = receipt.ran_out_of_gas();
    }
});
