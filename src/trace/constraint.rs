// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Constraint evaluation results reported by problems.

use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// How serious a constraint violation is. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// One evaluated constraint for a candidate choice.
///
/// A violated constraint makes the engine reject the choice without recursing,
/// but never stops the search as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintInfo {
    category: String,
    description: String,
    violated: bool,
    severity: Severity,
}

impl ConstraintInfo {
    pub fn new(
        category: impl Into<String>,
        description: impl Into<String>,
        violated: bool,
        severity: Severity,
    ) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            violated,
            severity,
        }
    }

    /// A constraint that holds.
    pub fn satisfied(category: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(category, description, false, Severity::Low)
    }

    /// A constraint that is broken by the candidate choice.
    pub fn violated(
        category: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self::new(category, description, true, severity)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_violated(&self) -> bool {
        self.violated
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}
