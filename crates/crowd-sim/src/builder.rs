//! Fluent builder for constructing a [`Simulator`].

use std::path::PathBuf;
use std::sync::Arc;

use crowd_behavior::{
    NavMeshTactic, NoopStrategy, OperationComponent, PassthroughOp, StrategyComponent,
    TacticComponent,
};
use crowd_core::SimConfig;
use crowd_mesh::{ascii, NavMesh};
use crowd_nav::NavSystem;

use crate::error::{SimError, SimResult};
use crate::sim::Simulator;

enum MeshSource {
    Path(PathBuf),
    Built(NavMesh),
}

/// Fluent builder for [`Simulator`].
///
/// # Required inputs
///
/// A navigation mesh, via [`with_nav_mesh`](Self::with_nav_mesh) (file path)
/// or [`with_nav_mesh_built`](Self::with_nav_mesh_built) (constructed in
/// memory).
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                   |
/// |---------------------|-------------------------------------------|
/// | `.config(c)`        | `SimConfig::default()`                    |
/// | `.with_strategy(s)` | a [`NoopStrategy`]                        |
/// | `.with_tactic(t)`   | a [`NavMeshTactic`]                       |
/// | `.with_op(o)`       | a [`PassthroughOp`]                       |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimulatorBuilder::new()
///     .config(SimConfig { sensitivity_radius: 2.0, ..SimConfig::default() })
///     .with_nav_mesh("meshes/square.mesh")
///     .with_op(OrcaComponent::new())
///     .build()?;
/// ```
pub struct SimulatorBuilder {
    config: SimConfig,
    mesh: Option<MeshSource>,
    strategies: Vec<Box<dyn StrategyComponent>>,
    tactics: Vec<Box<dyn TacticComponent>>,
    ops: Vec<Box<dyn OperationComponent>>,
}

impl SimulatorBuilder {
    pub fn new() -> Self {
        Self {
            config: SimConfig::default(),
            mesh: None,
            strategies: Vec::new(),
            tactics: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Use the mesh file at `path` (loaded during [`build`](Self::build)).
    pub fn with_nav_mesh<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.mesh = Some(MeshSource::Path(path.into()));
        self
    }

    /// Use an already-constructed mesh.
    pub fn with_nav_mesh_built(mut self, mesh: NavMesh) -> Self {
        self.mesh = Some(MeshSource::Built(mesh));
        self
    }

    /// Register a strategy component.
    pub fn with_strategy<C: StrategyComponent + 'static>(mut self, component: C) -> Self {
        self.strategies.push(Box::new(component));
        self
    }

    /// Register a tactic component.
    pub fn with_tactic<C: TacticComponent + 'static>(mut self, component: C) -> Self {
        self.tactics.push(Box::new(component));
        self
    }

    /// Register an operation component.
    pub fn with_op<C: OperationComponent + 'static>(mut self, component: C) -> Self {
        self.ops.push(Box::new(component));
        self
    }

    /// Load the mesh, fill in default components, validate registries and
    /// produce a ready [`Simulator`].
    pub fn build(mut self) -> SimResult<Simulator> {
        let mesh = match self.mesh.take() {
            Some(MeshSource::Built(mesh)) => mesh,
            Some(MeshSource::Path(path)) => ascii::load_path(&path)?,
            None => {
                return Err(SimError::Config(
                    "a navigation mesh is required (with_nav_mesh)".into(),
                ))
            }
        };

        if self.strategies.is_empty() {
            self.strategies.push(Box::new(NoopStrategy::new()));
        }
        if self.tactics.is_empty() {
            self.tactics.push(Box::new(NavMeshTactic::new()));
        }
        if self.ops.is_empty() {
            self.ops.push(Box::new(PassthroughOp::new()));
        }

        check_unique("strategy", self.strategies.iter().map(|c| c.id().0))?;
        check_unique("tactic", self.tactics.iter().map(|c| c.id().0))?;
        check_unique("operation", self.ops.iter().map(|c| c.id().0))?;

        let nav = NavSystem::new(Arc::new(mesh), &self.config);
        Ok(Simulator::new(
            self.config,
            nav,
            self.strategies,
            self.tactics,
            self.ops,
        ))
    }
}

impl Default for SimulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_unique(layer: &str, ids: impl Iterator<Item = u16>) -> SimResult<()> {
    let mut seen = std::collections::BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SimError::Config(format!(
                "duplicate {layer} component id {id}"
            )));
        }
    }
    Ok(())
}
