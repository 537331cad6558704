//! Driver loops: own the console interaction around a compiled graph.
//!
//! Every interactive loop checks the exit sentinel ([`is_exit_command`](crate::console::is_exit_command))
//! and end of input before running the graph, so `exit` never costs a model call.

mod chat;
mod drafter;
mod react;

pub use chat::{
    render_transcript, run_bot, run_chat, write_transcript, DEFAULT_TRANSCRIPT_PATH,
    MESSAGE_PROMPT,
};
pub use drafter::{run_drafter, DRAFTER_BANNER, DRAFTER_COMPLETED_BANNER};
pub use react::{run_react, DEFAULT_REACT_INPUT};
