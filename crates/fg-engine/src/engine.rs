//! The tick execution engine.

use fg_core::{SignalId, SignalStore};
use fg_graph::{CompiledProgram, SignalOwner};
use fg_transforms::Transform;

use crate::command::Command;
use crate::error::{EngineError, EngineResult};

/// Owns one compiled program and drives the five-stage tick:
///
/// 1. **Input boundary freeze**: external writes made before the tick call
///    are the pre-tick state by construction; no snapshotting happens.
/// 2. **Model update**: models tick in spec order, writing their owned
///    outputs and marking them physics-driven.
/// 3. **Edge propagation**: edges run in the compiled order (delays first,
///    then the topological order). Each edge reads its source signal,
///    transforms the value, and writes the target *with the source's unit*.
///    Writes are immediately visible to later edges in the same stage.
/// 4. **Commit**: reserved hook; leaves state unchanged.
/// 5. **Rule evaluation**: rules fire against the post-edge store in spec
///    order, queueing one command per action.
///
/// Scheduling is single-threaded and run-to-completion; hosts that want
/// parallelism run independent engines.
#[derive(Default)]
pub struct Engine {
    program: Option<CompiledProgram>,
    command_queue: Vec<Command>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a compiled program, taking ownership. A subsequent `load`
    /// replaces (and drops) the prior program.
    pub fn load(&mut self, program: CompiledProgram) {
        self.program = Some(program);
    }

    pub fn is_loaded(&self) -> bool {
        self.program.is_some()
    }

    /// Execute one simulation tick of `dt` seconds against `store`.
    ///
    /// Precondition failures (`NotLoaded`, `InvalidDt`, stability) abort
    /// before any state is touched.
    pub fn tick(&mut self, dt: f64, store: &mut SignalStore) -> EngineResult<()> {
        let Self {
            program,
            command_queue,
        } = self;
        let program = program.as_mut().ok_or(EngineError::NotLoaded)?;

        if dt <= 0.0 {
            return Err(EngineError::InvalidDt { dt });
        }

        for model in &program.models {
            let limit = model.stability_limit();
            if dt > limit {
                return Err(EngineError::StabilityViolation {
                    model: model.describe(),
                    dt,
                    limit,
                });
            }
        }

        // Stage 1: input boundary freeze. Nothing to do.

        // Stage 2: model update.
        for model in &mut program.models {
            model.tick(dt, store)?;
        }

        // Stage 3: edge propagation. The compiled order already places delay
        // edges first; each write is visible to every later edge.
        for edge in &mut program.edges {
            let source = store.read(edge.source);
            let output = edge.transform.apply(source.value, dt);
            store.write(edge.target, output, &source.unit)?;
        }

        // Stage 4: commit. Reserved, no effect.

        // Stage 5: rule evaluation against the post-edge store.
        for rule in &program.rules {
            if rule.condition.eval(store) {
                for action in &rule.actions {
                    command_queue.push(Command {
                        device: action.device,
                        function: action.function,
                        args: action.args.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Return all queued commands and empty the queue. Idempotent on an
    /// empty queue. Emission order is preserved across ticks.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.command_queue)
    }

    /// Reset every model and every edge transform to initial conditions and
    /// clear the pending command queue. The store is not touched. No-op
    /// when nothing is loaded.
    pub fn reset(&mut self) {
        if let Some(program) = &mut self.program {
            for model in &mut program.models {
                model.reset();
            }
            for edge in &mut program.edges {
                edge.transform.reset();
            }
        }
        self.command_queue.clear();
    }

    /// The writer that owns a signal in the loaded program, if any. A
    /// server layer uses this to reject external writes to model- or
    /// edge-owned signals.
    pub fn owner_of(&self, id: SignalId) -> Option<SignalOwner> {
        self.program.as_ref()?.owner_of(id)
    }

    /// All owned signal ids of the loaded program, in ascending order.
    pub fn owned_signals(&self) -> Vec<SignalId> {
        self.program
            .as_ref()
            .map(|program| program.owned_signals().collect())
            .unwrap_or_default()
    }
}
