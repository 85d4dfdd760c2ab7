//! Stake validation

use serde::Serialize;

/// Parameter object handed to validators: the proposed stake and the
/// balance it would be played against.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StakeContext {
    pub stake: f64,
    pub balance: f64,
}

/// Outcome of validating a stake
#[derive(Debug, Clone, Serialize)]
pub enum StakeVerdict {
    Valid,
    /// Rejected, with human-readable reasons
    Invalid(Vec<String>),
}

impl StakeVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, StakeVerdict::Valid)
    }

    /// Rejection messages; empty when valid
    pub fn messages(&self) -> &[String] {
        match self {
            StakeVerdict::Valid => &[],
            StakeVerdict::Invalid(messages) => messages,
        }
    }
}

/// Pluggable stake rule set. The session re-prompts until this accepts.
pub trait StakeValidator {
    fn validate(&self, context: &StakeContext) -> StakeVerdict;
}

/// Stock rules: the stake must be a positive amount no larger than the
/// current balance.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardStakeRules;

impl StakeValidator for StandardStakeRules {
    fn validate(&self, context: &StakeContext) -> StakeVerdict {
        let mut messages = Vec::new();
        if !context.stake.is_finite() || context.stake <= 0.0 {
            messages.push("stake must be greater than zero".to_string());
        }
        if context.stake > context.balance {
            messages.push(format!(
                "stake {:.2} exceeds the current balance {:.2}",
                context.stake, context.balance
            ));
        }
        if messages.is_empty() {
            StakeVerdict::Valid
        } else {
            StakeVerdict::Invalid(messages)
        }
    }
}
