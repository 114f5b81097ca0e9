//! Action scripts for `tempest play`.
//!
//! ```yaml
//! steps:
//!   - action: select
//!     index: 0
//!   - action: apply
//!     transform: { type: magnetize, pull: 1.0 }
//!   - action: next_round
//!   - action: advance
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tempest_session::{RoundAdvance, Session};
use tempest_transform::Transform;

/// One scripted player action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Select { index: usize },
    Apply { transform: Transform },
    NextRound,
    Advance,
    Retry,
    View { layer: usize },
    CashOut,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    /// `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let script: Self = if is_json {
            serde_json::from_str(&text)?
        } else {
            serde_yaml::from_str(&text)?
        };
        Ok(script)
    }
}

/// What a step did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Selected { index: usize, selected: bool },
    Applied { transform: Transform },
    Round { advance: RoundAdvance },
    Layer { layer: usize },
    Retried,
    Viewing { layer: usize },
    CashedOut { layer: usize, energy: u32, overall: f64 },
    /// The engine refused the action; the session is unchanged.
    Refused { reason: String },
}

/// Run one step. Engine refusals become [`Outcome::Refused`].
pub fn run_step(session: &mut Session, step: &Step) -> Outcome {
    let result = match step {
        Step::Select { index } => session
            .select(*index)
            .map(|selected| Outcome::Selected {
                index: *index,
                selected,
            }),
        Step::Apply { transform } => session
            .apply_transform(*transform)
            .map(|transform| Outcome::Applied { transform }),
        Step::NextRound => session.next_round().map(|advance| Outcome::Round { advance }),
        Step::Advance => session.advance_layer().map(|layer| Outcome::Layer { layer }),
        Step::Retry => {
            session.retry();
            Ok(Outcome::Retried)
        }
        Step::View { layer } => session
            .view_layer(*layer)
            .map(|()| Outcome::Viewing { layer: *layer }),
        Step::CashOut => {
            let out = session.cash_out();
            Ok(Outcome::CashedOut {
                layer: out.layer,
                energy: out.energy,
                overall: out.rubric.overall,
            })
        }
    };
    result.unwrap_or_else(|e| Outcome::Refused {
        reason: e.to_string(),
    })
}
