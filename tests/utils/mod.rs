#![allow(dead_code)]

pub mod chain;
pub mod report;
pub mod runtime;

use serde_json::{json, Value};
use tipper::{CallOutcome, ContractHandle, ContractId, FieldSet, InclusionReceipt};

pub const NETWORK: &str = "alephzero-testnet";
pub const TIPPER: &str = "5GTipperTestnetAddress";
pub const TIPPER_NEXT: &str = "5GTipperRedeployedAddress";
pub const GREETER: &str = "5GGreeterTestnetAddress";
pub const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
pub const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";

pub fn handle(contract: ContractId, address: &str) -> ContractHandle {
    ContractHandle::new(contract, NETWORK, address)
}

/// Output of the `tip` message wrapped into the ink! message result envelope.
pub fn tip_json(message: &str, to: &str, pizzas: u32) -> Value {
    json!({ "Ok": { "message": message, "to": to, "pizzas": pizzas } })
}

pub fn tip(message: &str, to: &str, pizzas: u32) -> CallOutcome {
    CallOutcome::Returned(tip_json(message, to, pizzas))
}

pub fn tip_fields(message: &str, to: &str, pizzas: u32) -> FieldSet {
    let mut fields = FieldSet::new();
    fields
        .insert("message", message)
        .insert("recipient", to)
        .insert("quantity", pizzas);
    fields
}

pub fn greeting(message: &str) -> CallOutcome { CallOutcome::Returned(json!({ "Ok": message })) }

pub fn receipt(tx_hash: &str) -> InclusionReceipt { InclusionReceipt::new(tx_hash, Some(1024)) }
