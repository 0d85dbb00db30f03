//! Settlement action plans: ordered typed steps plus the binary payload the
//! position manager's `modifyLiquidities` entrypoint expects.

use alloy_primitives::Bytes;
use alloy_sol_types::SolValue;

pub mod actions;
pub mod candidates;

pub use actions::{Action, OPEN_DELTA};
pub use candidates::{burn_plan, decrease_plan, increase_candidates, mint_plan, IncreaseIntent};

/// An ordered sequence of typed steps. By the end of an accepted plan the
/// net balance between caller and pool must be zero for every currency
/// touched; a plan violating that is rejected atomically, which is what
/// makes each fallback attempt safe to issue independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPlan {
    /// Short human label used in rejection reports.
    pub label: &'static str,
    pub actions: Vec<Action>,
}

impl ActionPlan {
    pub fn new(label: &'static str, actions: Vec<Action>) -> Self {
        ActionPlan { label, actions }
    }

    /// One dispatcher code byte per action, in order.
    pub fn encode_actions(&self) -> Bytes {
        self.actions.iter().map(Action::code).collect::<Vec<u8>>().into()
    }

    /// One ABI parameter blob per action, in the same order.
    pub fn encode_params(&self) -> Vec<Bytes> {
        self.actions.iter().map(Action::encode_params).collect()
    }

    /// The `unlockData` payload: `abi.encode(bytes actions, bytes[] params)`.
    pub fn unlock_data(&self) -> Bytes {
        (self.encode_actions(), self.encode_params())
            .abi_encode_params()
            .into()
    }
}
