//! Test plan configuration (TOML).
//!
//! A plan maps run names to catalog run ids and optionally declares the
//! title routes. Routes use an array of tables so declaration order is
//! preserved; order is the routing tie-breaker (see [`crate::registry`]).
//!
//! ```toml
//! [runs.Prompt_Regression]
//! run_id = 7
//!
//! [[route]]
//! pattern = "Google and Microsoft"
//! handler = "dashboard_landing_page"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use catalog::{RunId, TestId};

/// A parsed test plan: named runs plus optional route declarations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestPlan {
    #[serde(default)]
    pub runs: BTreeMap<String, RunPlan>,
    #[serde(default, rename = "route")]
    pub routes: Vec<RouteEntry>,
}

/// One run's plan entry. `test_ids` starts empty and is cached here by
/// the grouper after a synchronization pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunPlan {
    pub run_id: RunId,
    #[serde(default)]
    pub test_ids: Vec<TestId>,
}

/// A declared title route: first declared pattern contained in a case
/// title wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: String,
    pub handler: String,
}

impl TestPlan {
    /// Load and validate a plan file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read plan {}", path.display()))?;
        let plan: TestPlan =
            toml::from_str(&contents).with_context(|| format!("parse plan {}", path.display()))?;
        plan.validate()
            .with_context(|| format!("validate plan {}", path.display()))?;
        Ok(plan)
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn parse_str(contents: &str) -> Result<Self> {
        let plan: TestPlan = toml::from_str(contents).context("parse plan")?;
        plan.validate()?;
        Ok(plan)
    }

    fn validate(&self) -> Result<()> {
        if self.runs.is_empty() {
            bail!("plan must declare at least one run");
        }
        for name in self.runs.keys() {
            if name.trim().is_empty() {
                bail!("run name must be non-empty");
            }
        }
        for (index, route) in self.routes.iter().enumerate() {
            if route.pattern.is_empty() {
                bail!("route[{}].pattern must be non-empty", index);
            }
            if route.handler.trim().is_empty() {
                bail!("route[{}].handler must be non-empty", index);
            }
        }
        Ok(())
    }

    /// Look up a run by name. Unknown names are a configuration error
    /// and fail fast; nothing downstream runs without a valid plan entry.
    pub fn resolve(&self, run_name: &str) -> Result<&RunPlan> {
        match self.runs.get(run_name) {
            Some(run_plan) => Ok(run_plan),
            None => bail!("test run '{run_name}' not found in plan"),
        }
    }

    /// Cache the test ids resolved during a synchronization pass onto
    /// the run's plan entry.
    pub fn record_test_ids(&mut self, run_name: &str, test_ids: Vec<TestId>) {
        if let Some(run_plan) = self.runs.get_mut(run_name) {
            run_plan.test_ids = test_ids;
        }
    }
}
