//! Agent definitions and the static registry.
//!
//! Agents are process-wide, immutable definitions initialized once at
//! startup: a name, a model identifier, an instruction prompt, and a
//! capability set. Which agent handles a turn (and whether it delegates) is
//! decided by the model itself, guided by the instruction prompts; the host
//! only exposes delegation as a callable capability.

mod prompt;

use std::collections::HashMap;
use std::sync::Arc;

pub use prompt::{LAWYER_INSTRUCTIONS, ORCHESTRATOR_INSTRUCTIONS, PLAINTIFF_INSTRUCTIONS};

/// Name of the orchestrator agent.
pub const ORCHESTRATOR_AGENT: &str = "orchestrator";

/// Name of the plaintiff specialist agent.
pub const PLAINTIFF_AGENT: &str = "plaintiff-agent";

/// Name of the lawyer specialist agent.
pub const LAWYER_AGENT: &str = "lawyer-agent";

/// A capability an agent definition is permitted to invoke during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// Hosted web search, executed inside the agent runtime.
    WebSearch,

    /// Hosted code execution, executed inside the agent runtime.
    CodeExecution,

    /// Delegation to another named agent, exposed to the model as a
    /// callable tool `(query: string) -> string`.
    Delegate {
        /// Tool name the model sees.
        tool: String,
        /// Registry name of the target agent.
        agent: String,
    },
}

impl Capability {
    /// Creates a delegation capability.
    pub fn delegate(tool: impl Into<String>, agent: impl Into<String>) -> Self {
        Self::Delegate {
            tool: tool.into(),
            agent: agent.into(),
        }
    }
}

/// An immutable agent definition.
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    name: String,
    model_id: String,
    instructions: String,
    capabilities: Vec<Capability>,
}

impl AgentDefinition {
    /// Creates a new agent definition with no capabilities.
    pub fn new(
        name: impl Into<String>,
        model_id: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            model_id: model_id.into(),
            instructions: instructions.into(),
            capabilities: Vec::new(),
        }
    }

    /// Adds a capability to this definition.
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Returns the agent name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bound model identifier.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Returns the instruction prompt.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Returns the capability set.
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Returns the delegation capabilities as `(tool, agent)` pairs.
    pub fn delegates(&self) -> impl Iterator<Item = (&str, &str)> {
        self.capabilities.iter().filter_map(|cap| match cap {
            Capability::Delegate { tool, agent } => Some((tool.as_str(), agent.as_str())),
            _ => None,
        })
    }
}

/// Static registry of named agents, initialized once at startup.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: HashMap<String, Arc<AgentDefinition>>,
    orchestrator: Arc<AgentDefinition>,
}

impl AgentRegistry {
    /// Creates the default registry: one orchestrator bound to the two
    /// legal specialists, all on the given model.
    pub fn with_defaults(model_id: impl Into<String>) -> Self {
        let model_id = model_id.into();

        let plaintiff = Arc::new(
            AgentDefinition::new(PLAINTIFF_AGENT, &model_id, PLAINTIFF_INSTRUCTIONS)
                .with_capability(Capability::WebSearch),
        );

        let lawyer = Arc::new(
            AgentDefinition::new(LAWYER_AGENT, &model_id, LAWYER_INSTRUCTIONS)
                .with_capability(Capability::WebSearch),
        );

        let orchestrator = Arc::new(
            AgentDefinition::new(ORCHESTRATOR_AGENT, &model_id, ORCHESTRATOR_INSTRUCTIONS)
                .with_capability(Capability::WebSearch)
                .with_capability(Capability::delegate("plaintiffAgent", PLAINTIFF_AGENT))
                .with_capability(Capability::delegate("lawyerAgent", LAWYER_AGENT)),
        );

        let mut agents = HashMap::new();
        agents.insert(plaintiff.name().to_string(), plaintiff);
        agents.insert(lawyer.name().to_string(), lawyer);
        agents.insert(orchestrator.name().to_string(), Arc::clone(&orchestrator));

        Self {
            agents,
            orchestrator,
        }
    }

    /// Returns an agent definition by name.
    pub fn get(&self, name: &str) -> Option<Arc<AgentDefinition>> {
        self.agents.get(name).cloned()
    }

    /// Returns the orchestrator agent.
    pub fn orchestrator(&self) -> Arc<AgentDefinition> {
        Arc::clone(&self.orchestrator)
    }

    /// Returns the registered agent names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_three_agents() {
        let registry = AgentRegistry::with_defaults("gpt-4.1");

        assert_eq!(registry.names().count(), 3);
        assert!(registry.get(PLAINTIFF_AGENT).is_some());
        assert!(registry.get(LAWYER_AGENT).is_some());
        assert!(registry.get(ORCHESTRATOR_AGENT).is_some());
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn orchestrator_delegates_to_both_specialists() {
        let registry = AgentRegistry::with_defaults("gpt-4.1");
        let orchestrator = registry.orchestrator();

        let delegates: Vec<_> = orchestrator.delegates().collect();
        assert_eq!(
            delegates,
            vec![
                ("plaintiffAgent", PLAINTIFF_AGENT),
                ("lawyerAgent", LAWYER_AGENT),
            ]
        );
    }

    #[test]
    fn specialists_have_no_delegates() {
        let registry = AgentRegistry::with_defaults("gpt-4.1");
        let plaintiff = registry.get(PLAINTIFF_AGENT).unwrap();

        assert_eq!(plaintiff.delegates().count(), 0);
        assert!(plaintiff.capabilities().contains(&Capability::WebSearch));
        assert_eq!(plaintiff.model_id(), "gpt-4.1");
    }
}
