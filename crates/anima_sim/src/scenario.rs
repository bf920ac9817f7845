//! Named environmental scenarios layered on top of another input source.
//!
//! While a scenario is active, every drain re-applies its environment
//! descriptors through the same rules operator `~` lines use, and notes the
//! scenario in the external text.

use crate::collaborators::{InputDrainer, TickInput};
use crate::input::apply_environment_input;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("scenario name must not be empty")]
    EmptyName,
    #[error("scenario {0:?} requires at least one descriptor")]
    NoDescriptors(String),
}

/// Scenarios shipped with the binary.
pub const PRESETS: &[(&str, &[&str])] = &[
    ("cold_room", &["cold room", "no food available"]),
    ("hot_room", &["hot room"]),
    ("calm_space", &["quiet and peaceful"]),
    ("crowded_street", &["loud crowd and sirens", "cannot rest"]),
];

#[derive(Default)]
struct Registry {
    scenarios: HashMap<String, Vec<String>>,
    active: Option<String>,
}

pub struct ScenarioInjector<D> {
    base: D,
    registry: Mutex<Registry>,
}

impl<D: InputDrainer> ScenarioInjector<D> {
    pub fn new(base: D) -> Self {
        Self {
            base,
            registry: Mutex::new(Registry::default()),
        }
    }

    /// Injector with every entry of [`PRESETS`] registered.
    pub fn with_presets(base: D) -> Self {
        let injector = Self::new(base);
        for (name, descriptors) in PRESETS {
            injector
                .register(name, descriptors.iter().copied())
                .expect("preset scenarios are non-empty");
        }
        injector
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register or replace a scenario. Blank descriptors are dropped.
    pub fn register<I, S>(&self, name: &str, descriptors: I) -> Result<(), ScenarioError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScenarioError::EmptyName);
        }
        let clean: Vec<String> = descriptors
            .into_iter()
            .map(|d| d.as_ref().trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();
        if clean.is_empty() {
            return Err(ScenarioError::NoDescriptors(name.to_string()));
        }

        self.registry().scenarios.insert(name.to_string(), clean);
        Ok(())
    }

    /// Make `name` the active scenario. False if it is unknown.
    pub fn activate(&self, name: &str) -> bool {
        let name = name.trim();
        let mut reg = self.registry();
        if !reg.scenarios.contains_key(name) {
            return false;
        }
        tracing::info!(scenario = name, "scenario activated");
        reg.active = Some(name.to_string());
        true
    }

    pub fn deactivate(&self) {
        self.registry().active = None;
    }

    pub fn active(&self) -> Option<String> {
        self.registry().active.clone()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry().scenarios.keys().cloned().collect();
        names.sort();
        names
    }

    fn snapshot_active(&self) -> Option<(String, Vec<String>)> {
        let reg = self.registry();
        let name = reg.active.as_ref()?;
        let descriptors = reg.scenarios.get(name)?;
        Some((name.clone(), descriptors.clone()))
    }
}

impl<D: InputDrainer> InputDrainer for ScenarioInjector<D> {
    fn drain(&self) -> TickInput {
        let mut out = self.base.drain();

        let Some((name, descriptors)) = self.snapshot_active() else {
            return out;
        };

        for descriptor in &descriptors {
            apply_environment_input(descriptor, &mut out);
        }

        let note = format!("@scenario {}: {}", name, descriptors.join("; "));
        if out.external_text.is_empty() {
            out.external_text = note;
        } else {
            out.external_text.push('\n');
            out.external_text.push_str(&note);
        }
        out
    }
}
