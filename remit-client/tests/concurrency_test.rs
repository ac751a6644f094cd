//! Concurrent id allocation integration tests
//!
//! Two calls in flight at once must hold distinct ids 1 and 2; once a
//! call completes its id becomes the smallest free id again and the
//! next call reuses it.

mod common;

use common::{mock_response, MockTransport};
use remit_client::Caller;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Barrier;

#[tokio::test]
async fn test_concurrent_calls_get_distinct_ids_then_recycle() {
    // The first two requests rendezvous on a barrier, guaranteeing
    // both are in flight before either response is produced
    let barrier = Arc::new(Barrier::new(2));
    let arrivals = Arc::new(AtomicUsize::new(0));

    let transport = Arc::new(MockTransport::with_handler({
        let barrier = barrier.clone();
        let arrivals = arrivals.clone();
        move |msg| {
            let barrier = barrier.clone();
            let arrivals = arrivals.clone();
            async move {
                let id = common::request_id(&msg);
                if arrivals.fetch_add(1, Ordering::SeqCst) < 2 {
                    barrier.wait().await;
                }
                // Echo the request id back as the result
                Ok(Some(mock_response(id, json!(id))))
            }
        }
    }));

    let caller = Caller::builder(transport.clone()).build().unwrap();

    let first = {
        let caller = caller.clone();
        tokio::spawn(async move { caller.call::<i64>("ping", vec![]).await })
    };
    let second = {
        let caller = caller.clone();
        tokio::spawn(async move { caller.call::<i64>("ping", vec![]).await })
    };

    let a = first.await.unwrap().unwrap().unwrap();
    let b = second.await.unwrap().unwrap().unwrap();

    // Both calls were in flight together, so they held 1 and 2
    let mut held = vec![a, b];
    held.sort_unstable();
    assert_eq!(held, vec![1, 2]);
    assert_eq!(caller.in_flight(), 0);

    // Both ids are free again; the next call reuses the smallest
    let third = caller.call::<i64>("ping", vec![]).await.unwrap().unwrap();
    assert_eq!(third, 1);
}

#[tokio::test]
async fn test_many_concurrent_calls_hold_unique_ids() {
    let gate = Arc::new(Barrier::new(8));
    let transport = Arc::new(MockTransport::with_handler({
        let gate = gate.clone();
        move |msg| {
            let gate = gate.clone();
            async move {
                let id = common::request_id(&msg);
                gate.wait().await;
                Ok(Some(mock_response(id, json!(id))))
            }
        }
    }));

    let caller = Caller::builder(transport.clone()).build().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let caller = caller.clone();
            tokio::spawn(async move { caller.call::<i64>("ping", vec![]).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().unwrap());
    }
    ids.sort_unstable();

    // All eight were in flight together: ids are exactly 1..=8
    assert_eq!(ids, (1..=8).collect::<Vec<i64>>());
    assert_eq!(caller.in_flight(), 0);
}
