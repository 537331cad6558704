//! Streaming types for graph runs.
//!
//! [`CompiledStateGraph::stream`](crate::graph::CompiledStateGraph::stream) yields one
//! [`StreamEvent`] per step according to the requested [`StreamMode`].

/// What a stream emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamMode {
    /// Full state: the input state first, then the state after every node.
    #[default]
    Values,
    /// Node id plus the state that node produced; no initial event.
    Updates,
}

/// One event of a streamed graph run.
#[derive(Debug, Clone)]
pub enum StreamEvent<S> {
    Values(S),
    Updates { node_id: String, state: S },
}

impl<S> StreamEvent<S> {
    /// The state carried by this event.
    pub fn state(&self) -> &S {
        match self {
            StreamEvent::Values(s) => s,
            StreamEvent::Updates { state, .. } => state,
        }
    }

    pub fn into_state(self) -> S {
        match self {
            StreamEvent::Values(s) => s,
            StreamEvent::Updates { state, .. } => state,
        }
    }
}
