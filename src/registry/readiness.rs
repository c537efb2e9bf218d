//! # Readiness
//!
//! Staged readiness flags shared between the registry and every component it
//! registered. Stages only move forward: components loaded, then sub-resources
//! imported, then ready hooks run.

use crate::error::{ComponentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Readiness stage a caller required but the registry has not reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStage {
    /// Settings have not been applied to the component yet
    Settings,
    /// Component discovery and registration are still in progress
    Components,
    /// Some component has not imported its sub-resources yet
    SubResources,
    /// Ready hooks have not all run yet
    Ready,
}

impl fmt::Display for ReadinessStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settings => write!(f, "Settings"),
            Self::Components => write!(f, "Components"),
            Self::SubResources => write!(f, "Sub-resources"),
            Self::Ready => write!(f, "Ready hooks"),
        }
    }
}

impl ReadinessStage {
    /// Operator-facing message for a violated readiness precondition
    pub fn not_ready_message(&self) -> String {
        match self {
            Self::Ready => "Component registry isn't ready yet.".to_string(),
            Self::Settings => "Settings aren't finalized yet.".to_string(),
            other => format!("{other} aren't loaded yet."),
        }
    }
}

/// Readiness flags owned by a registry
#[derive(Debug, Default)]
pub struct Readiness {
    apps_ready: AtomicBool,
    models_ready: AtomicBool,
    ready: AtomicBool,
}

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_apps_ready(&self) -> bool {
        self.apps_ready.load(Ordering::Acquire)
    }

    pub fn is_models_ready(&self) -> bool {
        self.models_ready.load(Ordering::Acquire)
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Fails while component discovery and registration are in progress
    pub fn check_apps_ready(&self) -> Result<()> {
        if self.is_apps_ready() {
            Ok(())
        } else {
            Err(ComponentError::NotReady {
                stage: ReadinessStage::Components,
            })
        }
    }

    /// Fails until every component has imported its sub-resources
    pub fn check_models_ready(&self) -> Result<()> {
        if self.is_models_ready() {
            Ok(())
        } else {
            Err(ComponentError::NotReady {
                stage: ReadinessStage::SubResources,
            })
        }
    }

    /// Fails until every ready hook has run
    pub fn check_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(ComponentError::NotReady {
                stage: ReadinessStage::Ready,
            })
        }
    }

    pub(crate) fn mark_apps_ready(&self) {
        self.apps_ready.store(true, Ordering::Release);
    }

    pub(crate) fn mark_models_ready(&self) {
        self.mark_apps_ready();
        self.models_ready.store(true, Ordering::Release);
    }

    pub(crate) fn mark_ready(&self) {
        self.mark_models_ready();
        self.ready.store(true, Ordering::Release);
    }
}
