//! Lifecycle management for noise filter components

use crate::error::Result;

/// Trait for components that follow a lifecycle pattern
pub trait LifecycleNode: Send + Sync {
    /// Configure the node
    fn on_configure(&mut self) -> Result<()>;

    /// Activate the node
    fn on_activate(&mut self) -> Result<()>;

    /// Deactivate the node
    fn on_deactivate(&mut self) -> Result<()>;

    /// Clean up the node
    fn on_cleanup(&mut self) -> Result<()>;
}

/// Base implementation for lifecycle nodes
#[derive(Debug)]
pub struct LifecycleNodeBase {
    pub name: String,
    state: State,
}

/// State of a lifecycle node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Unconfigured,
    Inactive,
    Active,
}

impl LifecycleNodeBase {
    /// Create a new lifecycle node base
    pub fn new(name: &str) -> Self {
        LifecycleNodeBase {
            name: name.to_string(),
            state: State::Unconfigured,
        }
    }

    /// Get the current state
    pub fn get_state(&self) -> State {
        self.state
    }

    /// Set the state
    pub fn set_state(&mut self, state: State) {
        log::info!("{}: {:?} -> {:?}", self.name, self.state, state);
        self.state = state;
    }

    pub fn is_active(&self) -> bool {
        self.state == State::Active
    }
}

/// Run the full startup sequence on a component
pub fn bring_up<N: LifecycleNode + ?Sized>(node: &mut N) -> Result<()> {
    node.on_configure()?;
    node.on_activate()
}

/// Run the full shutdown sequence on a component
pub fn tear_down<N: LifecycleNode + ?Sized>(node: &mut N) -> Result<()> {
    node.on_deactivate()?;
    node.on_cleanup()
}
