use crate::core::kernel::KernelError;
use crate::core::representation::RepresentationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Model has not been trained")]
    Untrained,

    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Failed to compute a structure representation: {source}")]
    Representation {
        #[from]
        source: RepresentationError,
    },

    #[error("Kernel evaluation failed: {source}")]
    Kernel {
        #[from]
        source: KernelError,
    },

    #[error(
        "Kernel matrix is not positive-definite (n = {n}, lambda = {lambda:.3e}); increase lambda or remove near-duplicate training structures"
    )]
    NotPositiveDefinite { n: usize, lambda: f64 },
}
