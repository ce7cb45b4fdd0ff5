// src/types.rs

use std::str::FromStr;
use serde::Deserialize;

/// What the supervisor's own exit status reflects once supervision is over.
///
/// - `AlwaysZero`: fire-and-observe. The supervisor exits 0 whatever happened
///   to the child (default behaviour).
/// - `Propagate`: the child's terminal state is mapped onto the supervisor's
///   exit status (see `SupervisionReport::exit_code`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitPolicy {
    AlwaysZero,
    Propagate,
}

impl Default for ExitPolicy {
    fn default() -> Self {
        ExitPolicy::AlwaysZero
    }
}

impl FromStr for ExitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "always-zero" | "zero" => Ok(ExitPolicy::AlwaysZero),
            "propagate" => Ok(ExitPolicy::Propagate),
            other => Err(format!(
                "invalid exit_policy: {other} (expected \"always-zero\" or \"propagate\")"
            )),
        }
    }
}
