//! Three-layer stat container.
//!
//! A [`StatBlock`] stores a permanent, a temporary and an equipment layer and
//! caches their elementwise sum. The cache is a projection of the layers and
//! is rebuilt by every mutating method before it returns.
//!
//! # Formula
//!
//! ```text
//! total[k] = permanent[k] + temporary[k] + equipment[k]
//! ```

use super::name::{Layer, StatName, StatValues};

/// Layered stats for one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct StatBlock {
    permanent: StatValues,
    temporary: StatValues,
    equipment: StatValues,
    total: StatValues,
}

impl StatBlock {
    /// Default stat set with empty temporary and equipment layers.
    pub fn new() -> Self {
        Self::from_layers(
            StatValues::defaults(),
            StatValues::zeroed(),
            StatValues::zeroed(),
        )
    }

    /// Default stat set with the combat basics overridden.
    pub fn with_base(hp: f64, max_hp: f64, attack: f64, defense: f64) -> Self {
        let mut permanent = StatValues::defaults();
        permanent[StatName::Hp] = hp;
        permanent[StatName::MaxHp] = max_hp;
        permanent[StatName::Attack] = attack;
        permanent[StatName::Defense] = defense;
        Self::from_layers(permanent, StatValues::zeroed(), StatValues::zeroed())
    }

    pub fn from_layers(permanent: StatValues, temporary: StatValues, equipment: StatValues) -> Self {
        let mut block = Self {
            permanent,
            temporary,
            equipment,
            total: StatValues::zeroed(),
        };
        block.recompute_total();
        block
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Combined value of a stat, whichever layer it comes from.
    #[inline]
    pub fn get(&self, stat: StatName) -> f64 {
        self.total[stat]
    }

    /// Cached totals for every stat.
    pub fn total(&self) -> &StatValues {
        &self.total
    }

    pub fn layer(&self, layer: Layer) -> &StatValues {
        match layer {
            Layer::Permanent => &self.permanent,
            Layer::Temporary => &self.temporary,
            Layer::Equipment => &self.equipment,
        }
    }

    pub fn permanent(&self, stat: StatName) -> f64 {
        self.permanent[stat]
    }

    pub fn temporary(&self, stat: StatName) -> f64 {
        self.temporary[stat]
    }

    pub fn equipment(&self, stat: StatName) -> f64 {
        self.equipment[stat]
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add `delta` to one layer's entry and refresh totals.
    pub fn modify_stat(&mut self, stat: StatName, delta: f64, layer: Layer) {
        self.layer_mut(layer)[stat] += delta;
        self.recompute_total();
    }

    /// String-keyed variant of [`Self::modify_stat`] for data-driven effects.
    ///
    /// Names outside the schema are logged and ignored. Returns whether the
    /// name was recognised.
    pub fn modify_stat_named(&mut self, name: &str, delta: f64, layer: Layer) -> bool {
        match StatName::parse(name) {
            Some(stat) => {
                self.modify_stat(stat, delta, layer);
                true
            }
            None => {
                tracing::warn!(stat = name, %layer, delta, "unknown stat name ignored");
                self.recompute_total();
                false
            }
        }
    }

    /// Overwrite one layer's entry and refresh totals.
    pub fn set_stat(&mut self, stat: StatName, value: f64, layer: Layer) {
        self.layer_mut(layer)[stat] = value;
        self.recompute_total();
    }

    pub fn recompute_total(&mut self) {
        for (stat, permanent) in self.permanent.iter() {
            self.total[stat] = permanent + self.temporary[stat] + self.equipment[stat];
        }
    }

    /// Zero the temporary layer.
    pub fn reset_temporary(&mut self) {
        self.temporary.clear();
        self.recompute_total();
    }

    /// Zero the equipment layer.
    pub fn reset_equipment(&mut self) {
        self.equipment.clear();
        self.recompute_total();
    }

    pub(super) fn layer_mut(&mut self, layer: Layer) -> &mut StatValues {
        match layer {
            Layer::Permanent => &mut self.permanent,
            Layer::Temporary => &mut self.temporary,
            Layer::Equipment => &mut self.equipment,
        }
    }
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[cfg(feature = "serde")]
mod serde_impl {
    //! Layers are written as `{ "stat_name": value }` maps.
    //!
    //! Loading is lenient: unknown keys are dropped, missing keys take their
    //! default and a layer of the wrong shape is replaced wholesale. Each
    //! repair is logged.

    use std::collections::BTreeMap;

    use serde::de::IgnoredAny;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Layer, StatBlock, StatName, StatValues};

    impl Serialize for StatValues {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            for (stat, value) in self.iter() {
                let key: &'static str = stat.into();
                map.serialize_entry(key, &value)?;
            }
            map.end()
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LenientNumber {
        Number(f64),
        Other(IgnoredAny),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LayerRepr {
        Map(BTreeMap<String, LenientNumber>),
        Corrupt(IgnoredAny),
    }

    impl LayerRepr {
        fn restore(repr: Option<Self>, layer: Layer, fallback: StatValues) -> StatValues {
            let entries = match repr {
                Some(LayerRepr::Map(entries)) => entries,
                Some(LayerRepr::Corrupt(_)) => {
                    tracing::warn!(%layer, "stat layer has the wrong shape, resetting to defaults");
                    return fallback;
                }
                None => {
                    tracing::warn!(%layer, "stat layer missing, resetting to defaults");
                    return fallback;
                }
            };

            let mut values = fallback;
            let mut seen = StatValues::zeroed();
            for (key, value) in entries {
                let Some(stat) = StatName::parse(&key) else {
                    tracing::warn!(%layer, stat = %key, "dropping unknown stat from save data");
                    continue;
                };
                match value {
                    LenientNumber::Number(number) => {
                        values[stat] = number;
                        seen[stat] = 1.0;
                    }
                    LenientNumber::Other(_) => {
                        tracing::warn!(%layer, %stat, "stat value is not a number, using default");
                    }
                }
            }
            for (stat, flag) in seen.iter() {
                if flag == 0.0 && fallback[stat] != 0.0 {
                    tracing::warn!(%layer, %stat, "stat missing from save data, using default");
                }
            }
            values
        }
    }

    #[derive(Serialize)]
    struct StatBlockRef<'a> {
        permanent: &'a StatValues,
        temporary: &'a StatValues,
        equipment: &'a StatValues,
    }

    #[derive(Deserialize)]
    struct StatBlockRepr {
        #[serde(default)]
        permanent: Option<LayerRepr>,
        #[serde(default)]
        temporary: Option<LayerRepr>,
        #[serde(default)]
        equipment: Option<LayerRepr>,
    }

    impl Serialize for StatBlock {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            StatBlockRef {
                permanent: &self.permanent,
                temporary: &self.temporary,
                equipment: &self.equipment,
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for StatBlock {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = StatBlockRepr::deserialize(deserializer)?;
            Ok(StatBlock::from_layers(
                LayerRepr::restore(repr.permanent, Layer::Permanent, StatValues::defaults()),
                LayerRepr::restore(repr.temporary, Layer::Temporary, StatValues::zeroed()),
                LayerRepr::restore(repr.equipment, Layer::Equipment, StatValues::zeroed()),
            ))
        }
    }
}
