//! View-state properties of the wallet-connected counter app.

use std::{sync::Arc, time::Duration};

use counter_client::{mock::MockCounterChain, ClientError, CounterApp, CounterDisplay};

fn app_over(chain: MockCounterChain) -> (Arc<MockCounterChain>, CounterApp<MockCounterChain>) {
    let chain = Arc::new(chain);
    (chain.clone(), CounterApp::new(chain))
}

#[tokio::test]
async fn test_zero_count_renders_as_value_not_prompt() {
    let (_, app) = app_over(MockCounterChain::new());

    assert_eq!(app.display(), CounterDisplay::NoCounter);
    assert_eq!(app.display().to_string(), "Please create the counter.");

    let count = app.create_counter().await.unwrap();
    assert_eq!(count, 0);

    // a fetched zero is a real value, never the creation prompt
    assert_eq!(app.display(), CounterDisplay::Value(0));
    assert_eq!(app.display().to_string(), "0");
}

#[tokio::test]
async fn test_increment_before_create_is_rejected() {
    let (chain, app) = app_over(MockCounterChain::new());

    let err = app.increment().await.unwrap_err();
    assert!(matches!(err, ClientError::NoCounter));

    // no value was fabricated and nothing reached the chain
    assert_eq!(app.display(), CounterDisplay::NoCounter);
    assert_eq!(chain.account_total(), 0);
}

#[tokio::test]
async fn test_sequential_creates_yield_independent_counters() {
    let (chain, app) = app_over(MockCounterChain::new());

    app.create_counter().await.unwrap();
    let first = app.counter_pubkey().unwrap();
    app.increment().await.unwrap();
    assert_eq!(app.display(), CounterDisplay::Value(1));

    // a second create abandons the first identity and starts at zero
    app.create_counter().await.unwrap();
    let second = app.counter_pubkey().unwrap();
    assert_ne!(first, second);
    assert_eq!(app.display(), CounterDisplay::Value(0));

    // the abandoned counter's chain state is untouched
    assert_eq!(chain.count_of(&first), Some(1));
    assert_eq!(chain.count_of(&second), Some(0));
    assert_eq!(chain.account_total(), 2);
}

#[tokio::test]
async fn test_rejected_create_leaves_display_unset() {
    let (chain, app) = app_over(MockCounterChain::new());

    chain.reject_next_create();
    assert!(app.create_counter().await.is_err());
    assert_eq!(app.display(), CounterDisplay::NoCounter);
    assert!(app.counter_pubkey().is_none());
}

#[tokio::test]
async fn test_rejected_create_keeps_the_previous_counter() {
    let (chain, app) = app_over(MockCounterChain::new());

    app.create_counter().await.unwrap();
    app.increment().await.unwrap();
    let kept = app.counter_pubkey().unwrap();

    chain.reject_next_create();
    assert!(app.create_counter().await.is_err());

    // prior identity and value stay on display after the failure
    assert_eq!(app.counter_pubkey(), Some(kept));
    assert_eq!(app.display(), CounterDisplay::Value(1));
}

#[tokio::test]
async fn test_second_create_while_in_flight_is_rejected() {
    let chain = Arc::new(MockCounterChain::with_latency(Duration::from_millis(50)));
    let app = Arc::new(CounterApp::new(chain.clone()));

    let racing = app.clone();
    let (first, second) = tokio::join!(app.create_counter(), async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        racing.create_counter().await
    });

    assert!(first.is_ok());
    assert!(matches!(second.unwrap_err(), ClientError::InFlight(_)));

    // exactly one counter was created; no double-click twin exists
    assert_eq!(chain.account_total(), 1);
}

#[tokio::test]
async fn test_second_increment_while_in_flight_is_rejected() {
    let chain = Arc::new(MockCounterChain::with_latency(Duration::from_millis(50)));
    let app = Arc::new(CounterApp::new(chain));
    app.create_counter().await.unwrap();

    // the blocked call leaves the display where the completed call put it
    let racing = app.clone();
    let (done, blocked) = tokio::join!(app.increment(), async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        racing.increment().await
    });
    assert_eq!(done.unwrap(), 1);
    assert!(matches!(blocked.unwrap_err(), ClientError::InFlight(_)));
    assert_eq!(app.display(), CounterDisplay::Value(1));
}
