use thiserror::Error;

use crate::propagation::PropagationError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConjunctionError {
    #[error("propagation failed for {object}: {source}")]
    Propagation {
        object: String,
        #[source]
        source: PropagationError,
    },
}
