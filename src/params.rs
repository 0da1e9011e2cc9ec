use serde::{Deserialize, Serialize};

use crate::error::PresetError;

/// Static description of one parameter slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParamSpec {
    pub const fn new(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Fixed-size, range-clamped parameter table.
///
/// Out-of-range indices read as 0.0 and ignore writes; out-of-range values
/// are clamped into the slot's declared range. NaN writes are dropped.
#[derive(Debug, Clone)]
pub struct ParameterStore<const N: usize> {
    specs: &'static [ParamSpec; N],
    values: [f32; N],
}

impl<const N: usize> ParameterStore<N> {
    pub fn new(specs: &'static [ParamSpec; N]) -> Self {
        Self {
            specs,
            values: std::array::from_fn(|i| specs[i].default),
        }
    }

    pub fn count(&self) -> usize {
        N
    }

    pub fn get(&self, index: usize) -> f32 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, index: usize, value: f32) {
        if index >= N || value.is_nan() {
            return;
        }
        self.values[index] = self.specs[index].clamp(value);
    }

    pub fn spec(&self, index: usize) -> Option<&ParamSpec> {
        self.specs.get(index)
    }

    pub fn specs(&self) -> &'static [ParamSpec; N] {
        self.specs
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.specs.iter().position(|spec| spec.name == name)
    }

    pub fn reset_to_defaults(&mut self) {
        self.values = std::array::from_fn(|i| self.specs[i].default);
    }

    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot {
            values: self
                .specs
                .iter()
                .zip(self.values.iter())
                .map(|(spec, &value)| NamedValue {
                    name: spec.name.to_string(),
                    value,
                })
                .collect(),
        }
    }

    /// Apply a snapshot through the clamping setter. Unknown names are skipped.
    pub fn restore(&mut self, snapshot: &ParameterSnapshot) {
        for entry in &snapshot.values {
            match self.index_of(&entry.name) {
                Some(index) => self.set(index, entry.value),
                None => log::warn!("preset: unknown parameter '{}' skipped", entry.name),
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.snapshot()).unwrap_or_default()
    }

    pub fn load_json(&mut self, text: &str) -> Result<(), PresetError> {
        let snapshot: ParameterSnapshot = serde_json::from_str(text)?;
        self.restore(&snapshot);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f32,
}

/// Serializable preset: parameter values keyed by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    pub values: Vec<NamedValue>,
}
