#![no_main]

use arbitrary::Arbitrary;
use arbitrum_ecosystem::Arbitrum;
use ecosystem_traits::{Ecosystem, RawFields};
use libfuzzer_sys::fuzz_target;
use serde_json::{json, Value};

#[derive(Debug, Arbitrary)]
struct TransactionInput {
    type_tag: Option<u8>,
    type_name: Option<String>,
    chain_id: Option<u64>,
    nonce: Option<u64>,
    gas: Option<u64>,
    gas_price: Option<u64>,
    max_fee: Option<u64>,
    max_priority_fee: Option<u64>,
    value: Option<[u64; 2]>,
    data: Vec<u8>,
    signature: Option<(u8, [u8; 32], [u8; 32])>,
    // Encode quantities as hex strings instead of JSON integers
    hex_quantities: bool,
}

fn quantity(value: u64, hex: bool) -> Value {
    if hex {
        json!(format!("{value:#x}"))
    } else {
        json!(value)
    }
}

fuzz_target!(|input: TransactionInput| {
    let hex = input.hex_quantities;
    let mut fields = RawFields::new().with("data", format!("0x{}", hex::encode(&input.data)));

    if let Some(tag) = input.type_tag {
        fields.insert("type", quantity(u64::from(tag), hex));
    } else if let Some(name) = input.type_name {
        fields.insert("type", name);
    }
    if let Some(chain_id) = input.chain_id {
        fields.insert("chainId", quantity(chain_id, hex));
    }
    if let Some(nonce) = input.nonce {
        fields.insert("nonce", quantity(nonce, hex));
    }
    if let Some(gas) = input.gas {
        fields.insert("gas", quantity(gas, hex));
    }
    if let Some(price) = input.gas_price {
        fields.insert("gasPrice", quantity(price, hex));
    }
    if let Some(fee) = input.max_fee {
        fields.insert("maxFeePerGas", quantity(fee, hex));
    }
    if let Some(fee) = input.max_priority_fee {
        fields.insert("maxPriorityFeePerGas", quantity(fee, hex));
    }
    if let Some([high, low]) = input.value {
        let wide = (u128::from(high) << 64) | u128::from(low);
        fields.insert("value", format!("{wide:#x}"));
    }
    if let Some((v, r, s)) = input.signature {
        fields.insert("v", u64::from(v));
        fields.insert("r", format!("0x{}", hex::encode(r)));
        fields.insert("s", format!("0x{}", hex::encode(s)));
    }

    // Building must never panic; errors are fine
    let arbitrum = Arbitrum::default();
    if let Ok(tx) = arbitrum.create_transaction(fields, None) {
        let rebuilt = arbitrum
            .create_transaction(tx.to_fields(), None)
            .expect("rendered fields must build");
        assert_eq!(rebuilt, tx, "to_fields round-trip changed the transaction");
    }
});
