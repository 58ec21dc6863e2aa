//! The wallet-connected view: an explicit session context plus the small
//! state machine behind the create/increment controls.
//!
//! Both actions return structured results and hold a per-action in-flight
//! guard, so a rapid second invocation is rejected instead of racing the
//! first for the displayed value.

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use solana_sdk::pubkey::Pubkey;
use tracing::warn;

use crate::{
    error::ClientError,
    program::{CounterHandle, CounterProgram},
};

/// What the view renders below the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterDisplay {
    /// No value has been fetched this session.
    NoCounter,
    /// Last fetched count. Zero is a real value, not the empty state.
    Value(u64),
}

impl fmt::Display for CounterDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterDisplay::NoCounter => write!(f, "Please create the counter."),
            CounterDisplay::Value(count) => write!(f, "{count}"),
        }
    }
}

#[derive(Default)]
struct ViewState {
    counter: Option<CounterHandle>,
    value: Option<u64>,
}

/// View-side handle over a connected session.
///
/// Constructing one requires an already-connected program session, which is
/// the "wallet connected" precondition of both actions.
pub struct CounterApp<P: CounterProgram> {
    program: Arc<P>,
    state: Mutex<ViewState>,
    create_gate: tokio::sync::Mutex<()>,
    increment_gate: tokio::sync::Mutex<()>,
}

impl<P: CounterProgram> CounterApp<P> {
    pub fn new(program: Arc<P>) -> Self {
        Self {
            program,
            state: Mutex::new(ViewState::default()),
            create_gate: tokio::sync::Mutex::new(()),
            increment_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Identity of the counter on display, if one was created this session.
    pub fn counter_pubkey(&self) -> Option<Pubkey> {
        self.state
            .lock()
            .expect("view state poisoned")
            .counter
            .as_ref()
            .map(CounterHandle::pubkey)
    }

    /// Display rule: the creation prompt until a value has been fetched,
    /// the numeric value afterwards. A fetched zero renders as `0`.
    pub fn display(&self) -> CounterDisplay {
        match self.state.lock().expect("view state poisoned").value {
            Some(count) => CounterDisplay::Value(count),
            None => CounterDisplay::NoCounter,
        }
    }

    /// Creates a brand-new counter with a fresh identity, refetches it, and
    /// puts its value on display.
    ///
    /// A counter already on display is silently abandoned: its account
    /// stays on chain but this session keeps no way back to it. On failure
    /// the view state is left exactly as it was.
    pub async fn create_counter(&self) -> Result<u64, ClientError> {
        let _busy = self
            .create_gate
            .try_lock()
            .map_err(|_| ClientError::InFlight("create"))?;

        let handle = CounterHandle::generate();
        let created: Result<u64, ClientError> = async {
            self.program.create(handle.keypair()).await?;
            self.program.fetch_count(&handle.pubkey()).await
        }
        .await;

        match created {
            Ok(count) => {
                let mut state = self.state.lock().expect("view state poisoned");
                state.counter = Some(handle);
                state.value = Some(count);
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "create failed, display left unchanged");
                Err(err)
            }
        }
    }

    /// Increments the counter created this session, refetches it, and
    /// updates the display.
    ///
    /// Fails with [`ClientError::NoCounter`] when nothing was created this
    /// session; a value is never fabricated.
    pub async fn increment(&self) -> Result<u64, ClientError> {
        let _busy = self
            .increment_gate
            .try_lock()
            .map_err(|_| ClientError::InFlight("increment"))?;

        let counter = self.counter_pubkey().ok_or(ClientError::NoCounter)?;
        self.program.increment(&counter).await?;
        let count = self.program.fetch_count(&counter).await?;
        self.state.lock().expect("view state poisoned").value = Some(count);
        Ok(count)
    }
}
