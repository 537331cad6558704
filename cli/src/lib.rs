//! Library side of the `weft` binary: logging setup and the variant runner.
//!
//! `main.rs` only parses arguments, builds the OpenAI client and calls [`run_variant`];
//! everything here can be driven with a [`weft::MockLlm`] and a [`weft::ScriptedConsole`].

pub mod logging;
mod run;

pub use run::{run_variant, tool_registry, RunError, RunOptions, Variant};
