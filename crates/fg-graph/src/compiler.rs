//! Graph compiler: validates a [`GraphSpec`] and produces an executable
//! [`CompiledProgram`].
//!
//! Compilation sequence:
//! 1. instantiate models in spec order (stability-gated against
//!    `expected_dt` when supplied),
//! 2. instantiate edges,
//! 3. enforce single-writer ownership over edge targets and model outputs,
//! 4. reject cycles in the non-delay subgraph (delay edges are the only
//!    legal way to close feedback loops),
//! 5. fix the edge execution order: delay edges in spec order first, then
//!    non-delay edges in Kahn topological order with smallest-id tie-break,
//! 6. compile rule conditions,
//! 7. compile actions.
//!
//! Any failure aborts the compile; no partial program is returned.

use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use fg_core::{DeviceId, FunctionId, FunctionNamespace, SignalId, SignalNamespace, Variant};
use fg_models::{Model, ThermalMass};
use fg_transforms::{
    Deadband, Delay, FirstOrderLag, Linear, MovingAverage, Noise, RateLimiter, Saturation,
    TransformKind,
};

use crate::condition::{compile_condition, CompiledCondition};
use crate::error::{CompileError, CompileResult};
use crate::params;
use crate::spec::{GraphSpec, ModelSpec, TransformSpec};

/// Which kind of writer owns a signal in the single-writer map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOwner {
    EdgeTarget,
    ModelOutput,
}

impl SignalOwner {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalOwner::EdgeTarget => "edge_target",
            SignalOwner::ModelOutput => "model_output",
        }
    }
}

impl fmt::Display for SignalOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An edge with resolved signal ids and an instantiated transform.
#[derive(Debug)]
pub struct CompiledEdge {
    pub source: SignalId,
    pub target: SignalId,
    pub transform: TransformKind,
    pub is_delay: bool,
}

/// One compiled rule action: resolved routing ids plus verbatim arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledAction {
    pub device: DeviceId,
    pub function: FunctionId,
    pub args: BTreeMap<String, Variant>,
}

/// A rule with its compiled condition and actions.
#[derive(Debug)]
pub struct CompiledRule {
    pub id: String,
    pub condition: CompiledCondition,
    pub actions: Vec<CompiledAction>,
    pub on_error: String,
}

/// A compiled program ready to load into the engine.
///
/// Edges are stored in execution order. Loading transfers ownership of the
/// whole value to the engine.
pub struct CompiledProgram {
    pub edges: Vec<CompiledEdge>,
    pub models: Vec<Box<dyn Model>>,
    pub rules: Vec<CompiledRule>,
    owners: BTreeMap<SignalId, SignalOwner>,
}

impl fmt::Debug for CompiledProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledProgram")
            .field("edges", &self.edges)
            .field("models", &self.models.len())
            .field("rules", &self.rules)
            .field("owners", &self.owners)
            .finish()
    }
}

impl CompiledProgram {
    /// The writer that owns a signal, if any. External hosts must not write
    /// owned signals; a server layer uses this map to reject such writes.
    pub fn owner_of(&self, id: SignalId) -> Option<SignalOwner> {
        self.owners.get(&id).copied()
    }

    /// All model- and edge-owned signal ids, in ascending order.
    pub fn owned_signals(&self) -> impl Iterator<Item = SignalId> + '_ {
        self.owners.keys().copied()
    }
}

/// Compile a graph specification.
///
/// `expected_dt`, when supplied and positive, gates every model's stability
/// limit at compile time; the engine re-validates against the actual tick
/// `dt` as well.
pub fn compile(
    spec: &GraphSpec,
    signal_ns: &mut SignalNamespace,
    func_ns: &mut FunctionNamespace,
    expected_dt: Option<f64>,
) -> CompileResult<CompiledProgram> {
    // 1. Models, in spec order.
    let mut models = Vec::with_capacity(spec.models.len());
    for model_spec in &spec.models {
        models.push(parse_model(model_spec, signal_ns)?);
    }

    if let Some(dt) = expected_dt {
        if dt > 0.0 {
            validate_stability(&models, dt)?;
        }
    }

    // 2. Edges.
    let mut edges = Vec::with_capacity(spec.edges.len());
    for edge_spec in &spec.edges {
        let source = signal_ns.intern(&edge_spec.source);
        let target = signal_ns.intern(&edge_spec.target);
        let transform = parse_transform(&edge_spec.transform)?;
        let is_delay = edge_spec.transform.kind == "delay";
        edges.push(CompiledEdge {
            source,
            target,
            transform,
            is_delay,
        });
    }

    // 3. Single-writer ownership across edge targets and model outputs.
    let mut owners: BTreeMap<SignalId, SignalOwner> = BTreeMap::new();
    for edge in &edges {
        register_writer(&mut owners, edge.target, SignalOwner::EdgeTarget, signal_ns)?;
    }
    for model in &models {
        for output in model.output_signals() {
            register_writer(&mut owners, output, SignalOwner::ModelOutput, signal_ns)?;
        }
    }

    // 4. Cycles in the non-delay subgraph.
    detect_cycles(&edges, signal_ns)?;

    // 5. Execution order.
    let edges = order_edges(edges, signal_ns)?;

    // 6/7. Rules and actions, in spec order.
    let mut rules = Vec::with_capacity(spec.rules.len());
    for rule_spec in &spec.rules {
        let condition = compile_condition(&rule_spec.condition, signal_ns, &rule_spec.id)?;

        let mut actions = Vec::with_capacity(rule_spec.actions.len());
        for action in &rule_spec.actions {
            actions.push(CompiledAction {
                device: func_ns.intern_device(&action.device),
                function: func_ns.intern_function(&action.function),
                args: action.args.clone(),
            });
        }

        rules.push(CompiledRule {
            id: rule_spec.id.clone(),
            condition,
            actions,
            on_error: rule_spec.on_error.clone(),
        });
    }

    Ok(CompiledProgram {
        edges,
        models,
        rules,
        owners,
    })
}

/// Instantiate a transform from its spec. Public for host-side testing of
/// transform parameter handling.
pub fn parse_transform(spec: &TransformSpec) -> CompileResult<TransformKind> {
    let context = format!("transform[{}]", spec.kind);
    let p = &spec.params;

    match spec.kind.as_str() {
        "linear" => {
            let scale = params::required_f64(p, "scale", &context)?;
            let offset = params::required_f64(p, "offset", &context)?;
            let clamp_min = params::optional_f64(p, "clamp_min", &context, f64::NEG_INFINITY)?;
            let clamp_max = params::optional_f64(p, "clamp_max", &context, f64::INFINITY)?;
            if clamp_min > clamp_max {
                return Err(CompileError::InvalidParameter {
                    context,
                    name: "clamp_min".to_string(),
                    reason: "clamp_min must not exceed clamp_max".to_string(),
                });
            }
            Ok(TransformKind::Linear(Linear::with_clamp(
                scale, offset, clamp_min, clamp_max,
            )))
        }
        "first_order_lag" => {
            let tau_s = params::required_f64(p, "tau_s", &context)?;
            Ok(TransformKind::FirstOrderLag(FirstOrderLag::new(tau_s)))
        }
        "delay" => {
            let delay_sec = params::required_f64(p, "delay_sec", &context)?;
            Ok(TransformKind::Delay(Delay::new(delay_sec)))
        }
        "noise" => {
            let amplitude = params::required_f64(p, "amplitude", &context)?;
            let seed = params::optional_i64(p, "seed", &context, 0)?;
            Ok(TransformKind::Noise(Noise::new(amplitude, seed as u64)))
        }
        "saturation" => {
            let min = params::aliased_f64(p, "min", "min_value", &context)?;
            let max = params::aliased_f64(p, "max", "max_value", &context)?;
            if min > max {
                return Err(CompileError::InvalidParameter {
                    context,
                    name: "min".to_string(),
                    reason: "min must not exceed max".to_string(),
                });
            }
            Ok(TransformKind::Saturation(Saturation::new(min, max)))
        }
        "deadband" => {
            let threshold = params::required_f64(p, "threshold", &context)?;
            Ok(TransformKind::Deadband(Deadband::new(threshold)))
        }
        "rate_limiter" => {
            let max_rate = params::aliased_f64(p, "max_rate_per_sec", "max_rate", &context)?;
            Ok(TransformKind::RateLimiter(RateLimiter::new(max_rate)))
        }
        "moving_average" => {
            let window_size = params::required_i64(p, "window_size", &context)?;
            if window_size <= 0 {
                return Err(CompileError::InvalidParameter {
                    context,
                    name: "window_size".to_string(),
                    reason: "expected a positive integer".to_string(),
                });
            }
            Ok(TransformKind::MovingAverage(MovingAverage::new(
                window_size as usize,
            )))
        }
        other => Err(CompileError::UnknownTransformType {
            kind: other.to_string(),
        }),
    }
}

/// Instantiate a model from its spec, interning its signal paths. Public
/// for host-side testing of model parameter handling.
pub fn parse_model(
    spec: &ModelSpec,
    signal_ns: &mut SignalNamespace,
) -> CompileResult<Box<dyn Model>> {
    let context = format!("model[{}:{}]", spec.id, spec.kind);
    let p = &spec.params;

    match spec.kind.as_str() {
        "thermal_mass" => {
            let thermal_mass = params::required_f64(p, "thermal_mass", &context)?;
            let heat_transfer_coeff = params::required_f64(p, "heat_transfer_coeff", &context)?;
            let initial_temp = params::required_f64(p, "initial_temp", &context)?;
            let temp_signal = params::required_str(p, "temp_signal", &context)?;
            let power_signal = params::required_str(p, "power_signal", &context)?;
            let ambient_signal = params::required_str(p, "ambient_signal", &context)?;

            Ok(Box::new(ThermalMass::new(
                &spec.id,
                thermal_mass,
                heat_transfer_coeff,
                initial_temp,
                temp_signal,
                power_signal,
                ambient_signal,
                signal_ns,
            )))
        }
        other => Err(CompileError::UnknownModelType {
            kind: other.to_string(),
        }),
    }
}

fn validate_stability(models: &[Box<dyn Model>], expected_dt: f64) -> CompileResult<()> {
    for model in models {
        let limit = model.stability_limit();
        if expected_dt > limit {
            return Err(CompileError::StabilityViolation {
                model: model.describe(),
                dt: expected_dt,
                limit,
            });
        }
    }
    Ok(())
}

fn register_writer(
    owners: &mut BTreeMap<SignalId, SignalOwner>,
    id: SignalId,
    owner: SignalOwner,
    signal_ns: &SignalNamespace,
) -> CompileResult<()> {
    if let Some(&existing) = owners.get(&id) {
        return Err(CompileError::MultipleWriters {
            signal: id,
            path: signal_ns.lookup(id).to_string(),
            existing,
            conflicting: owner,
        });
    }
    owners.insert(id, owner);
    Ok(())
}

/// Depth-first three-coloring over the non-delay subgraph. On a back edge,
/// the offending path is the portion of the DFS stack from the back edge's
/// target to the current node, closed by the target again.
fn detect_cycles(edges: &[CompiledEdge], signal_ns: &SignalNamespace) -> CompileResult<()> {
    let mut adjacency: BTreeMap<SignalId, Vec<SignalId>> = BTreeMap::new();
    for edge in edges.iter().filter(|edge| !edge.is_delay) {
        adjacency.entry(edge.source).or_default().push(edge.target);
        adjacency.entry(edge.target).or_default();
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnStack,
        Done,
    }

    let mut marks: BTreeMap<SignalId, Mark> =
        adjacency.keys().map(|&id| (id, Mark::Unvisited)).collect();

    for &start in adjacency.keys() {
        if marks[&start] != Mark::Unvisited {
            continue;
        }

        let mut path: Vec<SignalId> = vec![start];
        let mut frames: Vec<(SignalId, usize)> = vec![(start, 0)];
        marks.insert(start, Mark::OnStack);

        while let Some(frame) = frames.last_mut() {
            let (node, next_index) = *frame;
            let neighbors = &adjacency[&node];

            if next_index < neighbors.len() {
                frame.1 += 1;
                let neighbor = neighbors[next_index];
                match marks[&neighbor] {
                    Mark::Unvisited => {
                        marks.insert(neighbor, Mark::OnStack);
                        path.push(neighbor);
                        frames.push((neighbor, 0));
                    }
                    Mark::OnStack => {
                        let mut cycle: Vec<SignalId> =
                            path.iter().copied().skip_while(|&id| id != neighbor).collect();
                        cycle.push(neighbor);
                        return Err(CompileError::CycleDetected {
                            path: cycle
                                .into_iter()
                                .map(|id| signal_ns.lookup(id).to_string())
                                .collect(),
                        });
                    }
                    Mark::Done => {}
                }
            } else {
                marks.insert(node, Mark::Done);
                path.pop();
                frames.pop();
            }
        }
    }

    Ok(())
}

/// Fix the final execution order: every delay edge in spec order, then the
/// non-delay edges in Kahn topological order. Delay edges publish values
/// from the previous tick before any non-delay edge reads, which is what
/// closes the feedback-loop policy.
fn order_edges(
    edges: Vec<CompiledEdge>,
    signal_ns: &SignalNamespace,
) -> CompileResult<Vec<CompiledEdge>> {
    let mut ordered: Vec<CompiledEdge> = Vec::with_capacity(edges.len());
    let mut immediate: Vec<CompiledEdge> = Vec::new();
    for edge in edges {
        if edge.is_delay {
            ordered.push(edge);
        } else {
            immediate.push(edge);
        }
    }

    // Kahn's algorithm over the immediate subgraph. The ready set is a
    // BTreeSet so ties always break toward the smallest SignalId,
    // independent of any hash iteration order.
    let mut outgoing: BTreeMap<SignalId, Vec<usize>> = BTreeMap::new();
    let mut in_degree: BTreeMap<SignalId, usize> = BTreeMap::new();
    for (index, edge) in immediate.iter().enumerate() {
        outgoing.entry(edge.source).or_default().push(index);
        in_degree.entry(edge.source).or_default();
        *in_degree.entry(edge.target).or_default() += 1;
    }

    let mut ready: BTreeSet<SignalId> = in_degree
        .iter()
        .filter(|(_, &degree)| degree == 0)
        .map(|(&id, _)| id)
        .collect();

    let mut order: Vec<usize> = Vec::with_capacity(immediate.len());
    while let Some(&signal) = ready.iter().next() {
        ready.remove(&signal);

        if let Some(edge_indices) = outgoing.get(&signal) {
            for &index in edge_indices {
                order.push(index);
                let target = immediate[index].target;
                if let Some(degree) = in_degree.get_mut(&target) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(target);
                    }
                }
            }
        }
    }

    if order.len() != immediate.len() {
        // Unreachable after detect_cycles; kept as a compiler invariant
        // guard with the blocked signals named.
        let blocked: Vec<String> = in_degree
            .iter()
            .filter(|(_, &degree)| degree > 0)
            .map(|(&id, _)| signal_ns.lookup(id).to_string())
            .collect();
        return Err(CompileError::CycleDetected { path: blocked });
    }

    let mut slots: Vec<Option<CompiledEdge>> = immediate.into_iter().map(Some).collect();
    for index in order {
        if let Some(edge) = slots[index].take() {
            ordered.push(edge);
        }
    }

    Ok(ordered)
}
