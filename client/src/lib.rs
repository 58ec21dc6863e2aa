//! Client for an external on-chain counter program.
//!
//! The program itself lives on chain and is known here only through its
//! interface description (IDL) and deployed address. This crate wires a
//! wallet identity and an RPC connection into two thin flows: an
//! interactive view that creates and increments a counter, and a scripted
//! verification of the same two calls.

pub mod app;
pub mod error;
pub mod idl;
pub mod mock;
pub mod program;
pub mod session;
pub mod wallet;

pub use app::{CounterApp, CounterDisplay};
pub use error::ClientError;
pub use program::{CounterHandle, CounterProgram};
pub use session::{ProgramSession, SessionConfig, LOCALNET_ENDPOINT};
