//! Scripted verification of the counter contract: a fresh counter reads 0
//! and reads 1 after a single increment.
//!
//! Runs against the in-process mock chain; the same flow against a live
//! local validator lives in `localnet_test.rs`.

use counter_client::{mock::MockCounterChain, CounterHandle, CounterProgram};

#[tokio::test]
async fn counter_starts_at_zero_and_reads_one_after_increment() -> anyhow::Result<()> {
    let chain = MockCounterChain::new();

    // Step 1: create a counter with a fresh identity and check it reads 0
    let counter = CounterHandle::generate();
    chain.create(counter.keypair()).await?;
    let count = chain.fetch_count(&counter.pubkey()).await?;
    assert_eq!(count, 0, "fresh counter must read 0");

    // Step 2: increment the same counter and check it reads 1
    chain.increment(&counter.pubkey()).await?;
    let count = chain.fetch_count(&counter.pubkey()).await?;
    assert_eq!(count, 1, "counter must read 1 after a single increment");

    Ok(())
}

#[tokio::test]
async fn create_is_rejected_for_an_already_initialized_identity() -> anyhow::Result<()> {
    let chain = MockCounterChain::new();

    let counter = CounterHandle::generate();
    chain.create(counter.keypair()).await?;

    // single-initialization semantics are enforced by the program
    assert!(chain.create(counter.keypair()).await.is_err());
    assert_eq!(chain.fetch_count(&counter.pubkey()).await?, 0);

    Ok(())
}

#[tokio::test]
async fn increment_of_an_unknown_account_is_rejected() -> anyhow::Result<()> {
    let chain = MockCounterChain::new();

    let never_created = CounterHandle::generate();
    assert!(chain.increment(&never_created.pubkey()).await.is_err());
    assert!(chain.fetch_count(&never_created.pubkey()).await.is_err());

    Ok(())
}
