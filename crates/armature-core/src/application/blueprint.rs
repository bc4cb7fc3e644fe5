//! Generator definitions: an explicit, ordered list of step handles.
//!
//! A [`Blueprint`] is what a generator *is* before it runs: a name, a
//! description, and the steps it executes. Composition is explicit —
//! [`BlueprintBuilder::inherit`] merges a parent blueprint's steps ahead of
//! the child's own, and a child step sharing a parent step's name replaces
//! the parent implementation in place. No runtime introspection, no implicit
//! method discovery.

use std::fmt;
use std::sync::Arc;

use crate::application::generator::Generator;
use crate::domain::DomainError;

/// Errors a step may surface synchronously.
pub type StepError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Return value of a step body.
pub type StepResult = Result<(), StepError>;

/// A step body, invoked with the generator instance it belongs to.
pub type StepFn = Arc<dyn Fn(&mut Generator) -> StepResult + Send + Sync>;

/// A setup body, run once at instantiation to declare arguments, options,
/// and hooks.
pub type SetupFn = Arc<dyn Fn(&mut Generator) + Send + Sync>;

/// Lifecycle phases, executed in this fixed order when any step declares one.
///
/// Steps without a phase run in `Main`. A blueprint in which no step declares
/// a phase keeps pure declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Initialize,
    Prompt,
    Configure,
    Main,
    Write,
    End,
}

/// One named unit of generation logic.
#[derive(Clone)]
pub struct Step {
    name: String,
    phase: Option<Phase>,
    run: StepFn,
}

impl Step {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// The phase this step executes in.
    pub fn effective_phase(&self) -> Phase {
        self.phase.unwrap_or(Phase::Main)
    }

    pub fn invoke(&self, generator: &mut Generator) -> StepResult {
        (self.run)(generator)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// A generator definition.
#[derive(Clone)]
pub struct Blueprint {
    name: String,
    description: String,
    setups: Vec<SetupFn>,
    steps: Vec<Step>,
}

impl fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blueprint")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("setups", &self.setups.len())
            .field("steps", &self.steps)
            .finish()
    }
}

impl Blueprint {
    /// Start building a new blueprint.
    pub fn builder(name: impl Into<String>) -> BlueprintBuilder {
        BlueprintBuilder {
            name: name.into(),
            description: String::new(),
            inherited_setups: Vec::new(),
            setups: Vec::new(),
            inherited: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Setup bodies in execution order (inherited setups first).
    pub fn setups(&self) -> &[SetupFn] {
        &self.setups
    }

    /// Steps in declaration order (inherited steps first).
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Steps in execution order.
    ///
    /// If no step declares a phase this is declaration order. Otherwise steps
    /// are grouped by the fixed phase order, declaration order preserved
    /// within each phase.
    pub fn ordered_steps(&self) -> Vec<Step> {
        let mut steps = self.steps.clone();
        if steps.iter().any(|s| s.phase.is_some()) {
            steps.sort_by_key(Step::effective_phase);
        }
        steps
    }
}

/// Accumulating builder for [`Blueprint`].
pub struct BlueprintBuilder {
    name: String,
    description: String,
    inherited_setups: Vec<SetupFn>,
    setups: Vec<SetupFn>,
    inherited: Vec<Step>,
    steps: Vec<Step>,
}

impl BlueprintBuilder {
    /// Set the description shown in help output.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare a setup body, run at instantiation time. This is where a
    /// blueprint registers its arguments, options, and hooks.
    pub fn setup(mut self, setup: impl Fn(&mut Generator) + Send + Sync + 'static) -> Self {
        self.setups.push(Arc::new(setup));
        self
    }

    /// Merge a parent blueprint's setups and steps ahead of this blueprint's
    /// own.
    ///
    /// May be called more than once; later parents append after earlier ones,
    /// overriding same-name steps in place.
    pub fn inherit(mut self, parent: &Blueprint) -> Self {
        self.inherited_setups.extend(parent.setups().iter().cloned());
        for step in parent.steps() {
            if let Some(existing) = self.inherited.iter_mut().find(|s| s.name == step.name) {
                *existing = step.clone();
            } else {
                self.inherited.push(step.clone());
            }
        }
        self
    }

    /// Declare a step, executed in declaration order.
    pub fn step(
        self,
        name: impl Into<String>,
        run: impl Fn(&mut Generator) -> StepResult + Send + Sync + 'static,
    ) -> Self {
        self.push(name.into(), None, Arc::new(run))
    }

    /// Declare a step bound to a lifecycle phase.
    pub fn phased_step(
        self,
        phase: Phase,
        name: impl Into<String>,
        run: impl Fn(&mut Generator) -> StepResult + Send + Sync + 'static,
    ) -> Self {
        self.push(name.into(), Some(phase), Arc::new(run))
    }

    fn push(mut self, name: String, phase: Option<Phase>, run: StepFn) -> Self {
        self.steps.push(Step { name, phase, run });
        self
    }

    /// Validate and assemble the blueprint.
    ///
    /// Rejects step names starting with `_` (reserved for internals) and
    /// duplicate names among the blueprint's own steps. A child step whose
    /// name matches an inherited step replaces the parent implementation in
    /// place.
    pub fn build(self) -> Result<Blueprint, DomainError> {
        for (i, step) in self.steps.iter().enumerate() {
            if step.name.starts_with('_') {
                return Err(DomainError::ReservedStepName {
                    name: step.name.clone(),
                });
            }
            if self.steps[..i].iter().any(|s| s.name == step.name) {
                return Err(DomainError::DuplicateStep {
                    name: step.name.clone(),
                });
            }
        }

        let mut steps = self.inherited;
        for step in self.steps {
            if let Some(existing) = steps.iter_mut().find(|s| s.name == step.name) {
                *existing = step;
            } else {
                steps.push(step);
            }
        }

        let mut setups = self.inherited_setups;
        setups.extend(self.setups);

        Ok(Blueprint {
            name: self.name,
            description: self.description,
            setups,
            steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> impl Fn(&mut Generator) -> StepResult + Send + Sync + 'static {
        |_| Ok(())
    }

    #[test]
    fn steps_keep_declaration_order() {
        let bp = Blueprint::builder("demo")
            .step("first", noop())
            .step("second", noop())
            .step("third", noop())
            .build()
            .unwrap();

        let names: Vec<String> = bp
            .ordered_steps()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn phased_steps_group_in_fixed_order() {
        let bp = Blueprint::builder("demo")
            .phased_step(Phase::End, "teardown", noop())
            .step("work", noop())
            .phased_step(Phase::Initialize, "setup", noop())
            .build()
            .unwrap();

        let names: Vec<String> = bp
            .ordered_steps()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, ["setup", "work", "teardown"]);
    }

    #[test]
    fn declaration_order_is_stable_within_a_phase() {
        let bp = Blueprint::builder("demo")
            .phased_step(Phase::Write, "write_b", noop())
            .phased_step(Phase::Write, "write_a", noop())
            .build()
            .unwrap();

        let names: Vec<String> = bp
            .ordered_steps()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, ["write_b", "write_a"]);
    }

    #[test]
    fn inherit_places_parent_steps_first() {
        let parent = Blueprint::builder("parent")
            .step("base", noop())
            .build()
            .unwrap();
        let child = Blueprint::builder("child")
            .inherit(&parent)
            .step("own", noop())
            .build()
            .unwrap();

        let names: Vec<String> = child.steps().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, ["base", "own"]);
    }

    #[test]
    fn child_step_overrides_parent_in_place() {
        let parent = Blueprint::builder("parent")
            .step("configure", noop())
            .step("finish", noop())
            .build()
            .unwrap();
        let child = Blueprint::builder("child")
            .inherit(&parent)
            .step("finish", noop())
            .step("extra", noop())
            .build()
            .unwrap();

        let names: Vec<String> = child.steps().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, ["configure", "finish", "extra"]);
    }

    #[test]
    fn inherit_carries_parent_setups_ahead_of_own() {
        let parent = Blueprint::builder("parent")
            .setup(|_gen| {})
            .build()
            .unwrap();
        let child = Blueprint::builder("child")
            .inherit(&parent)
            .setup(|_gen| {})
            .build()
            .unwrap();

        assert_eq!(child.setups().len(), 2);
    }

    #[test]
    fn reserved_step_names_are_rejected() {
        let result = Blueprint::builder("demo").step("_private", noop()).build();
        assert_eq!(
            result.unwrap_err(),
            DomainError::ReservedStepName {
                name: "_private".into()
            }
        );
    }

    #[test]
    fn duplicate_own_steps_are_rejected() {
        let result = Blueprint::builder("demo")
            .step("twice", noop())
            .step("twice", noop())
            .build();
        assert_eq!(
            result.unwrap_err(),
            DomainError::DuplicateStep {
                name: "twice".into()
            }
        );
    }

    #[test]
    fn empty_blueprint_is_legal() {
        let bp = Blueprint::builder("empty").build().unwrap();
        assert!(bp.steps().is_empty());
    }
}
