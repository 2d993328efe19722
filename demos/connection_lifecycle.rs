//! Connection Lifecycle
//!
//! This example drives a network-connection lifecycle through guarded,
//! hooked transitions.
//!
//! Key concepts:
//! - Lifecycle hooks bound to a host value
//! - No-change events (keepalive) that never move the machine
//! - Overlapping attempts rejected instead of queued
//! - Hook failures reverting the attempt
//!
//! Run with: cargo run --example connection_lifecycle

use futures::FutureExt;
use hookstate::{events, StateMachineBuilder, StateQuery, TransitionError};
use parking_lot::Mutex;
use serde_json::json;
use std::time::Duration;

#[derive(Default)]
struct Connection {
    peer: Mutex<Option<String>>,
    keepalives: Mutex<u32>,
}

#[tokio::main]
async fn main() {
    println!("=== Connection Lifecycle Example ===\n");

    let machine = StateMachineBuilder::with_host(Connection::default())
        .initial("closed")
        .events(events! {
            open: closed => connecting,
            established: connecting => open,
            keepalive: open => open,
            close: [connecting, open] => closed,
            reset: * => closed,
        })
        .on_event("open", |conn: &Connection, ctx| {
            async move {
                let peer = ctx.args.first().and_then(|v| v.as_str());
                match peer {
                    Some(peer) => {
                        println!("  dialing {peer}");
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        *conn.peer.lock() = Some(peer.to_string());
                        Ok(())
                    }
                    None => Err(TransitionError::hook_failed("onopen", "no peer address")),
                }
            }
            .boxed()
        })
        .on_event("keepalive", |conn: &Connection, _ctx| {
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                *conn.keepalives.lock() += 1;
                Ok(())
            }
            .boxed()
        })
        .on_enter("closed", |conn: &Connection, ctx| {
            async move {
                if let Some(peer) = conn.peer.lock().take() {
                    println!("  closed {peer} (via {})", ctx.event);
                }
                Ok(())
            }
            .boxed()
        })
        .build()
        .expect("lifecycle configuration is valid");

    println!("Initial state: {}", machine.current());

    match machine.fire("open", vec![]).await {
        Err(err) => println!("Open without a peer failed: {err}"),
        Ok(_) => unreachable!(),
    }
    println!("Still {} after failed open", machine.current());

    machine
        .fire("open", vec![json!("10.0.0.7:443")])
        .await
        .expect("open with peer succeeds");
    machine
        .fire("established", vec![])
        .await
        .expect("handshake completes");
    println!("State: {}", machine.current());

    let (keepalive, close) = tokio::join!(
        machine.fire("keepalive", vec![]),
        machine.fire("close", vec![]),
    );
    println!("Keepalive: {:?}", keepalive.map(|ctx| ctx.kind));
    println!("Close during keepalive: {:?}", close.map(|ctx| ctx.kind));

    machine.fire("close", vec![]).await.expect("close succeeds");
    println!(
        "State: {} after {} keepalive(s)",
        machine.current(),
        machine.host().keepalives.lock()
    );

    println!("\nSnapshot: {:?}", machine.snapshot());
    println!("\n=== Example Complete ===");
}
