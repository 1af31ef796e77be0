use std::collections::BTreeMap;

use super::effect::ResistanceKind;

/// Signed resistance per damage family. Missing entries read as zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Resistances(BTreeMap<ResistanceKind, f64>);

impl Resistances {
    pub fn get(&self, kind: ResistanceKind) -> f64 {
        self.0.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, kind: ResistanceKind, value: f64) {
        self.0.insert(kind, value);
    }

    pub fn add(&mut self, kind: ResistanceKind, delta: f64) {
        *self.0.entry(kind).or_insert(0.0) += delta;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResistanceKind, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl Default for Resistances {
    fn default() -> Self {
        Self(
            [
                (ResistanceKind::Poison, 0.0),
                (ResistanceKind::Burn, 0.0),
                (ResistanceKind::Freeze, 0.0),
            ]
            .into_iter()
            .collect(),
        )
    }
}
