//! Pipeline orchestration.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn, Dispatch};

use crate::config::PipelineConfig;
use crate::error::{Result, StepchainError};
use crate::steps::{IntoStep, RegisteredStep, Step};
use crate::value::{StepValue, Value, ValueStore};

use super::filter::{filter_outputs, StepOutputs};
use super::order::order_steps;
use super::resolver::ArgumentResolver;

/// Where a pipeline is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// Not executed yet.
    #[default]
    Idle,
    /// Applying the configured step order.
    Ordering,
    /// Running the step at this position of the execution sequence.
    Running(usize),
    /// Applying the output filter.
    Filtering,
    /// The last run completed.
    Done,
    /// The last run stopped at a failing step.
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Ordering => write!(f, "ordering"),
            Self::Running(index) => write!(f, "running step {}", index + 1),
            Self::Filtering => write!(f, "filtering"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Progress events emitted during a run.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A step is about to resolve its arguments and run.
    StepStarting {
        name: &'a str,
        index: usize,
        total: usize,
    },
    /// A step ran; `outputs` are the values it produced.
    StepFinished {
        name: &'a str,
        outputs: &'a [Value],
        duration: Duration,
    },
    /// A step failed and the run stops here.
    StepFailed {
        name: &'a str,
        error: &'a StepchainError,
    },
}

/// Registers steps and initial inputs, then runs the steps in order,
/// feeding each one from the values produced before it.
///
/// # Example
///
/// ```
/// use stepchain::{Pipeline, PipelineConfig};
///
/// let mut pipeline = Pipeline::new(PipelineConfig::default());
/// pipeline.add_step("greet", || String::from("hello"));
/// pipeline.add_step("measure", |s: String| s.len());
/// pipeline.add_initial_input(String::from("input"));
///
/// let outputs = pipeline.execute().unwrap();
/// assert_eq!(outputs["greet"][0].get::<String>().unwrap(), "hello");
/// assert_eq!(outputs["measure"][0].get::<usize>(), Some(5));
/// ```
#[derive(Debug, Default)]
pub struct Pipeline {
    steps: Vec<RegisteredStep>,
    store: ValueStore,
    outputs: StepOutputs,
    config: PipelineConfig,
    state: PipelineState,
    dispatch: Option<Dispatch>,
}

impl Pipeline {
    /// Create a pipeline. Log events go to the process default subscriber.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Create a pipeline whose log events all go to `dispatch`.
    pub fn with_dispatch(config: PipelineConfig, dispatch: Dispatch) -> Self {
        Self {
            config,
            dispatch: Some(dispatch),
            ..Default::default()
        }
    }

    /// Replace the log destination for subsequent runs.
    pub fn set_dispatch(&mut self, dispatch: Dispatch) {
        self.dispatch = Some(dispatch);
    }

    /// Register a step under `name`.
    ///
    /// Names need not be unique; steps sharing a name append to the same
    /// output entry.
    pub fn add_step<M>(&mut self, name: impl Into<String>, step: impl IntoStep<M>) -> &mut Self {
        self.add_boxed_step(name, step.into_step())
    }

    /// Register a hand-written [`Step`].
    pub fn add_boxed_step(&mut self, name: impl Into<String>, step: Box<dyn Step>) -> &mut Self {
        let registered = RegisteredStep::new(name, self.steps.len(), step);
        self.in_scope(|| {
            debug!(
                "Registered step '{}' ({} parameters, {} outputs)",
                registered.name(),
                registered.step().parameter_types().len(),
                registered.step().return_types().len()
            )
        });
        self.steps.push(registered);
        self
    }

    /// Add initial inputs, in order.
    pub fn add_initial_inputs<I>(&mut self, inputs: I) -> &mut Self
    where
        I: IntoIterator<Item = Value>,
    {
        let inputs: Vec<Value> = inputs.into_iter().collect();
        self.in_scope(|| {
            for input in &inputs {
                debug!("Initial input: {:?} ({})", input, input.type_name());
            }
        });
        self.store.add_inputs(inputs);
        self
    }

    /// Add one initial input.
    ///
    /// String literals must be converted first; `&str` is not a step value,
    /// so a `String` parameter can never miss a borrowed input.
    ///
    /// ```compile_fail
    /// use stepchain::{Pipeline, PipelineConfig};
    ///
    /// let mut pipeline = Pipeline::new(PipelineConfig::default());
    /// pipeline.add_initial_input("raw");
    /// ```
    pub fn add_initial_input<T: StepValue>(&mut self, input: T) -> &mut Self {
        self.add_initial_inputs([input.into_value()])
    }

    /// Run every step and return the (filtered) outputs.
    ///
    /// # Errors
    ///
    /// Returns the first resolution or step error; no later step runs.
    pub fn execute(&mut self) -> Result<StepOutputs> {
        self.execute_with_progress(|_| {})
    }

    /// Run every step, reporting progress through `on_progress`.
    pub fn execute_with_progress(
        &mut self,
        on_progress: impl FnMut(RunProgress<'_>),
    ) -> Result<StepOutputs> {
        match self.dispatch.clone() {
            Some(dispatch) => {
                tracing::dispatcher::with_default(&dispatch, || self.run(on_progress))
            }
            None => self.run(on_progress),
        }
    }

    /// Registered steps, in current execution order.
    pub fn steps(&self) -> &[RegisteredStep] {
        &self.steps
    }

    /// Values gathered so far.
    pub fn store(&self) -> &ValueStore {
        &self.store
    }

    /// Unfiltered output log.
    pub fn outputs(&self) -> &StepOutputs {
        &self.outputs
    }

    /// Configuration this pipeline runs under.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Where the pipeline is in its lifecycle.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    fn run(&mut self, mut on_progress: impl FnMut(RunProgress<'_>)) -> Result<StepOutputs> {
        let start = Instant::now();

        self.state = PipelineState::Ordering;
        self.apply_step_order();

        let Self {
            steps,
            store,
            outputs,
            config,
            state,
            ..
        } = self;

        let total = steps.len();
        info!("Running {} steps", total);

        for (index, step) in steps.iter().enumerate() {
            *state = PipelineState::Running(index);
            let name = step.name();
            on_progress(RunProgress::StepStarting { name, index, total });

            let step_start = Instant::now();
            match run_step(step, store, outputs, config) {
                Ok(produced) => {
                    store.store_results(produced.iter().cloned());
                    outputs
                        .entry(name.to_string())
                        .or_default()
                        .extend(produced.iter().cloned());

                    let duration = step_start.elapsed();
                    info!(
                        "Step '{}' produced {} values in {:?}",
                        name,
                        produced.len(),
                        duration
                    );
                    on_progress(RunProgress::StepFinished {
                        name,
                        outputs: &produced,
                        duration,
                    });
                }
                Err(e) => {
                    *state = PipelineState::Failed;
                    error!("Step '{}' failed: {}", name, e);
                    on_progress(RunProgress::StepFailed { name, error: &e });
                    return Err(e);
                }
            }
        }

        *state = PipelineState::Filtering;
        sort_by_registration(outputs, steps);
        let result = filter_outputs(outputs, &config.output_filter);

        *state = PipelineState::Done;
        info!(
            "Pipeline finished: {} steps, {} output entries in {:?}",
            total,
            result.len(),
            start.elapsed()
        );
        Ok(result)
    }

    fn apply_step_order(&mut self) {
        let names: Vec<&str> = self.steps.iter().map(RegisteredStep::name).collect();
        let ordering = order_steps(&names, &self.config.step_order);

        for unknown in &ordering.unknown {
            warn!("Step order names unknown step '{}', ignoring", unknown);
        }
        if ordering.is_identity() {
            return;
        }

        let mut slots: Vec<Option<RegisteredStep>> =
            std::mem::take(&mut self.steps).into_iter().map(Some).collect();
        self.steps = ordering
            .sequence
            .iter()
            .filter_map(|&i| slots[i].take())
            .collect();
        debug!(
            "Execution order: {:?}",
            self.steps.iter().map(RegisteredStep::name).collect::<Vec<_>>()
        );
    }
}

fn run_step(
    step: &RegisteredStep,
    store: &ValueStore,
    outputs: &StepOutputs,
    config: &PipelineConfig,
) -> Result<Vec<Value>> {
    let mut resolver =
        ArgumentResolver::new(step.name(), store, outputs, config.missing_arg_policy);
    let args = resolver.resolve_all(
        step.step().parameter_types(),
        config.step_config(step.name()),
    )?;
    debug!("Step '{}' arguments: {:?}", step.name(), args);

    step.step()
        .invoke(args)
        .map_err(|source| StepchainError::StepFailed {
            step: step.name().to_string(),
            source,
        })
}

fn sort_by_registration(outputs: &mut StepOutputs, steps: &[RegisteredStep]) {
    let mut first: HashMap<&str, usize> = HashMap::new();
    for step in steps {
        first
            .entry(step.name())
            .and_modify(|p| *p = (*p).min(step.position()))
            .or_insert(step.position());
    }
    let rank = |name: &String| first.get(name.as_str()).copied().unwrap_or(usize::MAX);
    outputs.sort_by(|a, _, b, _| rank(a).cmp(&rank(b)));
}
