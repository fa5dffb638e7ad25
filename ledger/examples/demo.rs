//! Walkthrough of the settlement ledger's two transfer interfaces.
//!
//! Run with `cargo run -p nova-ledger --example demo`.

use std::sync::Arc;

use nova_ledger::{
    Address, HookContext, Ledger, LedgerConfig, MemoryRegistry, NoFlows, ReceiverHook, Result,
};

/// A recipient hook that just announces what it received.
struct Announcer;

impl ReceiverHook for Announcer {
    fn on_receive(&self, _ledger: &mut Ledger, ctx: &HookContext) -> Result<()> {
        println!(
            "  [hook] {} acknowledged {} tokens from {}",
            ctx.to, ctx.amount, ctx.from
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    let host = Address::new("nova1host");
    let alice = Address::new("nova1alice");
    let bob = Address::new("nova1bob");
    let vault = Address::new("nova1vault");

    let registry = Arc::new(MemoryRegistry::new());
    // The vault is a contract-like recipient, so notified sends to it need
    // a registered receiver hook.
    registry.mark_contract(&vault);
    registry.set_receiver_hook(&vault, Arc::new(Announcer));

    let mut ledger = Ledger::new(
        LedgerConfig {
            name: "NOVA Dollar".into(),
            symbol: "nUSDx".into(),
            underlying: Address::new("erc:usd"),
            underlying_decimals: 6,
            host: host.clone(),
            ledger_identity: Address::new("nova1ledger"),
            default_operators: vec![],
        },
        registry,
        Arc::new(NoFlows),
    );

    println!("== mint ==");
    ledger.operation_mint(&host, &alice, 1_000, false, vec![], vec![])?;
    println!("  alice: {}", ledger.balance_of(&alice));

    println!("== simple transfer (no hooks) ==");
    ledger.transfer(&alice, &bob, 250)?;
    println!("  alice: {}  bob: {}", ledger.balance_of(&alice), ledger.balance_of(&bob));

    println!("== allowance + transferFrom ==");
    ledger.approve(&alice, &bob, 100)?;
    ledger.transfer_from(&bob, &alice, &bob, 60)?;
    println!(
        "  alice: {}  bob: {}  remaining allowance: {}",
        ledger.balance_of(&alice),
        ledger.balance_of(&bob),
        ledger.allowance(&alice, &bob)
    );

    println!("== notified send to a contract-like vault ==");
    ledger.send(&bob, &vault, 110, b"deposit".to_vec())?;
    println!("  vault: {}", ledger.balance_of(&vault));

    println!("== operator flow ==");
    ledger.authorize_operator(&alice, &bob)?;
    ledger.operator_send(&bob, &alice, &vault, 90, vec![], b"sweep".to_vec())?;
    println!("  vault: {}", ledger.balance_of(&vault));

    println!("== burn ==");
    ledger.burn(&alice, 100, vec![])?;
    println!("  total supply: {}", ledger.total_supply());

    println!("== event log ==");
    for record in ledger.events() {
        println!("  #{:03} {:?}", record.seq, record.event);
    }

    Ok(())
}
