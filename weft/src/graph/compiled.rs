//! Compiled state graph: immutable, supports invoke and stream.
//!
//! Built by `StateGraph::compile`. Runs from the first node and, after each node,
//! resolves the next one from its conditional router or its plain edge (honoring
//! the node's returned `Next`). Steps run strictly one after another.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};

use crate::error::AgentError;
use crate::stream::{StreamEvent, StreamMode};

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
};
use super::state_graph::END;
use super::{Next, NextEntry, Node};

/// Node executions allowed per run unless `StateGraph::with_recursion_limit` says otherwise.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Compiled graph: immutable structure produced by `StateGraph::compile()`.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// First node to run (target of the START edge).
    pub(super) first_node_id: String,
    /// Map from node id to how to get next: Unconditional(to_id) or Conditional(router).
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    pub(super) recursion_limit: usize,
}

enum Cursor<S> {
    Initial(S),
    Run { state: S, node_id: String, step: usize },
    Done,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Id of the node the graph starts at.
    pub fn entry(&self) -> &str {
        &self.first_node_id
    }

    /// Runs the graph to END and returns the final state.
    ///
    /// Fails with the first node error, or with `AgentError::RecursionLimit` when
    /// END is not reached within the recursion limit.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        log_graph_start(&self.first_node_id);
        let mut state = state;
        let mut current = self.first_node_id.clone();
        let mut step = 0;
        loop {
            match self.step(&current, state, step).await {
                Ok((next_state, next_id)) => {
                    state = next_state;
                    step += 1;
                    if next_id == END {
                        log_graph_complete(step);
                        return Ok(state);
                    }
                    current = next_id;
                }
                Err(e) => {
                    log_graph_error(&e);
                    return Err(e);
                }
            }
        }
    }

    /// Runs the graph lazily: each poll of the stream executes at most one node.
    ///
    /// With `StreamMode::Values` the input state is emitted first, then the state
    /// after every node. An error is yielded once and ends the stream.
    pub fn stream(
        &self,
        state: S,
        mode: StreamMode,
    ) -> BoxStream<'_, Result<StreamEvent<S>, AgentError>> {
        let initial = match mode {
            StreamMode::Values => Cursor::Initial(state),
            StreamMode::Updates => Cursor::Run {
                state,
                node_id: self.first_node_id.clone(),
                step: 0,
            },
        };
        stream::unfold(initial, move |cursor| async move {
            match cursor {
                Cursor::Done => None,
                Cursor::Initial(state) => Some((
                    Ok(StreamEvent::Values(state.clone())),
                    Cursor::Run {
                        state,
                        node_id: self.first_node_id.clone(),
                        step: 0,
                    },
                )),
                Cursor::Run {
                    state,
                    node_id,
                    step,
                } => {
                    if step == 0 {
                        log_graph_start(&node_id);
                    }
                    match self.step(&node_id, state, step).await {
                        Ok((state, next_id)) => {
                            let event = match mode {
                                StreamMode::Values => StreamEvent::Values(state.clone()),
                                StreamMode::Updates => StreamEvent::Updates {
                                    node_id,
                                    state: state.clone(),
                                },
                            };
                            let cursor = if next_id == END {
                                log_graph_complete(step + 1);
                                Cursor::Done
                            } else {
                                Cursor::Run {
                                    state,
                                    node_id: next_id,
                                    step: step + 1,
                                }
                            };
                            Some((Ok(event), cursor))
                        }
                        Err(e) => {
                            log_graph_error(&e);
                            Some((Err(e), Cursor::Done))
                        }
                    }
                }
            }
        })
        .boxed()
    }

    /// Runs one node and resolves where to go next.
    async fn step(&self, node_id: &str, state: S, step: usize) -> Result<(S, String), AgentError> {
        if step >= self.recursion_limit {
            return Err(AgentError::RecursionLimit(self.recursion_limit));
        }
        let node = self.nodes.get(node_id).cloned().ok_or_else(|| {
            AgentError::ExecutionFailed(format!("routed to unknown node: {}", node_id))
        })?;
        log_node_start(node_id, step);
        let (state, next) = node.run(state).await?;
        let next_id = self.resolve_next(node_id, &state, next);
        log_node_complete(node_id, &next_id);
        Ok((state, next_id))
    }

    fn resolve_next(&self, node_id: &str, state: &S, next: Next) -> String {
        match self.next_map.get(node_id) {
            Some(NextEntry::Conditional(router)) => router.resolve_next(state),
            Some(NextEntry::Unconditional(to)) => match next {
                Next::Continue => to.clone(),
                Next::Node(id) => id,
                Next::End => END.to_string(),
            },
            None => match next {
                Next::Node(id) => id,
                Next::Continue | Next::End => END.to_string(),
            },
        }
    }
}
