//! Purpose enum naming the curriculum-design step a request belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The six guided panels plus the final integrator step.
///
/// Declaration order is the canonical panel order; `Ord` follows it, so
/// ordered collections keyed by `Purpose` iterate in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Objective,
    Outcomes,
    Pedagogy,
    Development,
    Implementation,
    Evaluation,
    Integrator,
}

impl Purpose {
    /// Returns every purpose in canonical order, integrator last.
    pub fn all() -> &'static [Purpose] {
        &[
            Purpose::Objective,
            Purpose::Outcomes,
            Purpose::Pedagogy,
            Purpose::Development,
            Purpose::Implementation,
            Purpose::Evaluation,
            Purpose::Integrator,
        ]
    }

    /// Returns the purposes that own a guided panel (everything but the integrator).
    pub fn panels() -> &'static [Purpose] {
        &Self::all()[..6]
    }

    /// True for the synthesis step.
    pub fn is_integrator(&self) -> bool {
        matches!(self, Purpose::Integrator)
    }

    /// Wire value, as sent in the `purpose` request field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Objective => "objective",
            Purpose::Outcomes => "outcomes",
            Purpose::Pedagogy => "pedagogy",
            Purpose::Development => "development",
            Purpose::Implementation => "implementation",
            Purpose::Evaluation => "evaluation",
            Purpose::Integrator => "integrator",
        }
    }

    /// Panel heading, also used to label sections of the integration payload.
    pub fn label(&self) -> &'static str {
        match self {
            Purpose::Objective => "Project Objective",
            Purpose::Outcomes => "Intended Learning Outcomes",
            Purpose::Pedagogy => "Pedagogy & Technology",
            Purpose::Development => "Development Plan",
            Purpose::Implementation => "Implementation",
            Purpose::Evaluation => "Evaluation",
            Purpose::Integrator => "Project Proposal",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Purpose::all()
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format("purpose", format!("unknown purpose '{}'", s))
            })
    }
}
