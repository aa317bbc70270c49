use thiserror::Error;

use crate::component::Component;

pub type DesignResult<T> = Result<T, DesignError>;

/// Structural invariant violations detected while constructing a `Design`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DesignError {
    #[error("Component {component} is listed more than once")]
    DuplicateComponent { component: Component },

    #[error("Connection {index} references {component}, which is not among the design's components")]
    DanglingConnection { index: usize, component: Component },

    #[error("Connection {index} links {component} to itself")]
    SelfLoop { index: usize, component: Component },

    #[error("Connection {index} repeats the flow {from} -> {to}")]
    DuplicateConnection {
        index: usize,
        from: Component,
        to: Component,
    },
}
