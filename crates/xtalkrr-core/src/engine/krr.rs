use super::config::{ConfigError, CoulombConfig, PrdfConfig};
use super::error::EngineError;
use super::topk::TopK;
use crate::core::elements::ElementTable;
use crate::core::kernel::{Kernel, LaplacianEigenvalueKernel, PrdfKernel};
use crate::core::models::structure::Structure;
use crate::core::representation::ewald::EwaldMatrixRepresenter;
use crate::core::representation::prdf::PrdfRepresenter;
use crate::core::representation::sine_matrix::SineMatrixRepresenter;
use crate::core::representation::{Representation, Representer};
use nalgebra::{Cholesky, DMatrix, DVector};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

/// One labelled example in a training set.
#[derive(Debug, Clone)]
pub struct TrainingExample {
    pub name: String,
    pub structure: Structure,
    pub measured: f64,
}

impl TrainingExample {
    pub fn new(name: impl Into<String>, structure: Structure, measured: f64) -> Self {
        Self {
            name: name.into(),
            structure,
            measured,
        }
    }
}

#[derive(Debug, Clone)]
struct TrainedState {
    names: Vec<String>,
    representations: Vec<Representation>,
    alpha: DVector<f64>,
}

/// A kernel ridge regression model over crystal structures, generic over a
/// representation builder and the similarity kernel paired with it.
///
/// `train` computes the representation of every training structure, builds
/// the symmetric kernel matrix with `1 + lambda` on the diagonal, and solves
/// `K·alpha = y` by Cholesky factorization. `predict` evaluates the kernel
/// between a query structure and every stored training representation and
/// returns the alpha-weighted sum. Training is atomic: any failure leaves
/// previously trained state intact, and retraining replaces it wholesale.
#[derive(Debug, Clone)]
pub struct KrrModel<R, K> {
    representer: R,
    kernel: K,
    lambda: f64,
    state: Option<TrainedState>,
}

/// KRR over sine-transformed periodic Coulomb matrix eigenvalues.
pub type SineMatrixModel = KrrModel<SineMatrixRepresenter, LaplacianEigenvalueKernel>;
/// KRR over Ewald-summation Coulomb matrix eigenvalues.
pub type EwaldModel = KrrModel<EwaldMatrixRepresenter, LaplacianEigenvalueKernel>;
/// KRR over partial radial distribution functions.
pub type PrdfModel = KrrModel<PrdfRepresenter, PrdfKernel>;

impl KrrModel<SineMatrixRepresenter, LaplacianEigenvalueKernel> {
    pub fn sine_matrix(
        config: &CoulombConfig,
        elements: &ElementTable,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_strategies(
            SineMatrixRepresenter::new(elements),
            LaplacianEigenvalueKernel::new(config.sigma),
            config.lambda,
        )
    }
}

impl KrrModel<EwaldMatrixRepresenter, LaplacianEigenvalueKernel> {
    pub fn ewald(config: &CoulombConfig, elements: &ElementTable) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_strategies(
            EwaldMatrixRepresenter::new(elements),
            LaplacianEigenvalueKernel::new(config.sigma),
            config.lambda,
        )
    }
}

impl KrrModel<PrdfRepresenter, PrdfKernel> {
    pub fn prdf(config: &PrdfConfig, elements: &ElementTable) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_strategies(
            PrdfRepresenter::new(elements, config.cutoff, config.n_bins),
            PrdfKernel::new(config.sigma),
            config.lambda,
        )
    }
}

impl<R, K> KrrModel<R, K>
where
    R: Representer + Sync,
    K: Kernel,
{
    /// Assembles a model from explicitly injected strategies. The builder and
    /// kernel must be a matched pair; the preconfigured constructors
    /// ([`SineMatrixModel::sine_matrix`], [`EwaldModel::ewald`],
    /// [`PrdfModel::prdf`]) guarantee that.
    pub fn with_strategies(representer: R, kernel: K, lambda: f64) -> Result<Self, ConfigError> {
        if lambda <= 0.0 {
            return Err(ConfigError::NotPositive {
                name: "lambda",
                value: lambda,
            });
        }
        Ok(Self {
            representer,
            kernel,
            lambda,
            state: None,
        })
    }

    /// Fits the model to a labelled training set.
    ///
    /// Either fully succeeds, replacing any previously trained state, or
    /// fails leaving the prior state untouched.
    #[instrument(skip_all, fields(n_examples = examples.len(), lambda = self.lambda))]
    pub fn train(&mut self, examples: &[TrainingExample]) -> Result<(), EngineError> {
        if examples.is_empty() {
            return Err(EngineError::EmptyTrainingSet);
        }
        let n = examples.len();

        info!("Computing representations for the training set.");
        let representations: Vec<Representation> = examples
            .par_iter()
            .map(|example| self.representer.represent(&example.structure))
            .collect::<Result<_, _>>()?;

        debug!("Building the kernel matrix.");
        let mut kernel_matrix = DMatrix::zeros(n, n);
        for i in 0..n {
            kernel_matrix[(i, i)] = 1.0 + self.lambda;
            for j in (i + 1)..n {
                let similarity = self
                    .kernel
                    .similarity(&representations[i], &representations[j])?;
                kernel_matrix[(i, j)] = similarity;
                kernel_matrix[(j, i)] = similarity;
            }
        }

        let y = DVector::from_iterator(n, examples.iter().map(|example| example.measured));
        let factorization =
            Cholesky::new(kernel_matrix).ok_or(EngineError::NotPositiveDefinite {
                n,
                lambda: self.lambda,
            })?;
        let alpha = factorization.solve(&y);

        self.state = Some(TrainedState {
            names: examples.iter().map(|e| e.name.clone()).collect(),
            representations,
            alpha,
        });
        info!("KRR model trained.");
        Ok(())
    }

    /// Predicts the target property for a query structure.
    pub fn predict(&self, structure: &Structure) -> Result<f64, EngineError> {
        let state = self.state.as_ref().ok_or(EngineError::Untrained)?;
        let representation = self.representer.represent(structure)?;

        let mut prediction = 0.0;
        for (alpha, trained) in state.alpha.iter().zip(&state.representations) {
            prediction += alpha * self.kernel.similarity(&representation, trained)?;
        }
        Ok(prediction)
    }

    /// Returns the names of the up to `k` training examples most similar to
    /// the query structure, in descending order of kernel similarity.
    pub fn find_closest(&self, structure: &Structure, k: usize) -> Result<Vec<String>, EngineError> {
        let state = self.state.as_ref().ok_or(EngineError::Untrained)?;
        let representation = self.representer.represent(structure)?;

        let mut best = TopK::new(k);
        for (name, trained) in state.names.iter().zip(&state.representations) {
            let similarity = self.kernel.similarity(&representation, trained)?;
            best.push(similarity, name);
        }
        Ok(best
            .into_descending()
            .into_iter()
            .map(|(_, name)| name.clone())
            .collect())
    }

    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    pub fn n_training_examples(&self) -> usize {
        self.state.as_ref().map_or(0, |state| state.names.len())
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Number of parameters fitted by `train`, for external model-selection
    /// bookkeeping. Kernel hyperparameters are configuration, not fitted.
    pub fn n_fitting_parameters(&self) -> usize {
        1
    }

    /// The fitted coefficient vector, co-indexed with
    /// [`training_names`](Self::training_names).
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|state| state.alpha.as_slice())
    }

    pub fn training_names(&self) -> Option<&[String]> {
        self.state.as_ref().map(|state| state.names.as_slice())
    }

    /// The stored training representations, co-indexed with
    /// [`training_names`](Self::training_names). Exposed so collaborators
    /// can persist or inspect the trained state.
    pub fn training_representations(&self) -> Option<&[Representation]> {
        self.state.as_ref().map(|state| state.representations.as_slice())
    }

    /// A one-line human-readable model summary.
    pub fn describe(&self) -> String {
        match &self.state {
            Some(state) => format!(
                "KRR model with {} points and a lambda = {:.2}",
                state.names.len(),
                self.lambda
            ),
            None => format!("Untrained KRR model with a lambda = {:.2}", self.lambda),
        }
    }
}
