//! Mutable tick state handed to every behaviour component.

use std::collections::BTreeMap;

use crowd_core::{AgentId, Goal};
use crowd_nav::NavSystem;

/// The slice of simulator state a component may touch during its phase.
///
/// The two references are deliberately separate fields so a component can
/// borrow them disjointly — e.g. a tactic mutating an agent's preferred
/// velocity (through `nav.agents`) while consulting the planner (through
/// `nav.localizer`), or a strategy rewriting `goals` while reading agent
/// positions.
///
/// Which layer may write what is a contract, not a type-system guarantee:
/// strategies write goals, tactics write `pref_velocity` and path state,
/// operations write `vel_new`.  The simulator rebuilds the context for each
/// phase, so the borrows never outlive a single component's `update`.
pub struct TickContext<'a> {
    /// Goal assignments by agent.  Absent entries mean "no goal yet".
    pub goals: &'a mut BTreeMap<AgentId, Goal>,

    /// The navigation system: agent spatial state, localizer + planner,
    /// and the previous tick's neighbour sets.
    pub nav: &'a mut NavSystem,
}

impl<'a> TickContext<'a> {
    #[inline]
    pub fn new(goals: &'a mut BTreeMap<AgentId, Goal>, nav: &'a mut NavSystem) -> Self {
        Self { goals, nav }
    }
}
