//! Level- and rarity-scaled random items.

use strum::IntoEnumIterator;

use super::rarity;
use crate::entity::Player;
use crate::env::RngOracle;
use crate::equipment::{ArmorSet, ArmorSetTable};
use crate::items::{ArmorType, Gear, GearKind, Item, Potion, PotionEffect, Rarity, WeaponType};
use crate::stats::StatName;

/// Item families the factory can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum LootKind {
    Weapon,
    Armor,
    Potion,
    Ring,
    Amulet,
    Belt,
}

impl LootKind {
    pub const ALL: [Self; 6] = [
        Self::Weapon,
        Self::Armor,
        Self::Potion,
        Self::Ring,
        Self::Amulet,
        Self::Belt,
    ];
}

/// Generated potions: name, effect and value as a function of level and multiplier.
const POTIONS: [(&str, PotionEffect, fn(f64, f64) -> f64); 6] = [
    ("Healing Potion", PotionEffect::Heal, |level, m| 20.0 * level * m),
    ("Strength Elixir", PotionEffect::AttackBoost, |_, m| 2.0 * m),
    ("Iron Skin Tonic", PotionEffect::DefenseBoost, |_, m| 2.0 * m),
    ("Lucky Charm Brew", PotionEffect::LuckBoost, |_, m| m),
    ("Healing Spring Potion", PotionEffect::Heal, |_, m| 10.0 * m),
    ("Dragon's Breath Potion", PotionEffect::FireResistance, |_, m| 2.0 * m),
];

/// Knobs for one drop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LootRequest<'a> {
    /// Added to the dungeon level to get the item level.
    pub level_boost: u32,
    /// Multiplied with the difficulty's own boost.
    pub rarity_boost: f64,
    /// Drops from a typed enemy favour that enemy's armor set.
    pub enemy_type: Option<&'a str>,
    /// Skip the kind roll and build this family.
    pub kind: Option<LootKind>,
}

impl Default for LootRequest<'_> {
    fn default() -> Self {
        Self {
            level_boost: 0,
            rarity_boost: 1.0,
            enemy_type: None,
            kind: None,
        }
    }
}

impl<'a> LootRequest<'a> {
    /// Guaranteed boss drop.
    pub const BOSS_RARITY_BOOST: f64 = 1.5;

    #[must_use]
    pub fn from_enemy(mut self, enemy_type: &'a str) -> Self {
        self.enemy_type = (!enemy_type.is_empty()).then_some(enemy_type);
        self
    }

    #[must_use]
    pub fn with_rarity_boost(mut self, boost: f64) -> Self {
        self.rarity_boost = boost;
        self
    }

    #[must_use]
    pub fn of_kind(mut self, kind: LootKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Random item generator bound to the armor set table.
#[derive(Clone, Copy, Debug)]
pub struct ItemFactory<'a> {
    sets: &'a ArmorSetTable,
}

impl<'a> ItemFactory<'a> {
    pub fn new(sets: &'a ArmorSetTable) -> Self {
        Self { sets }
    }

    /// Roll one item for the player's current depth and difficulty.
    ///
    /// # Formula
    ///
    /// ```text
    /// L        = dungeon_level + level_boost
    /// m        = rarity multiplier (1, 1.5, 2, 3, 5, 10, 100)
    /// weapon   damage  int((1 + L) * m)
    /// armor    defense int((2 + L) * m)
    /// ring     luck    int((1 + L / 2) * m), amulet defense, belt agility
    /// value    int(50 * L * m)
    /// ```
    ///
    /// An enemy type with a known set restricts the roll to armor (named after
    /// the set) or the set weapon. A requested kind skips the kind roll.
    pub fn generate_random_item(
        &self,
        player: &Player,
        rng: &mut dyn RngOracle,
        request: LootRequest<'_>,
    ) -> Item {
        let level = player.dungeon_level + request.level_boost;
        let difficulty = player.difficulty;
        let boost = request.rarity_boost * difficulty.rarity_boost();

        let available = rarity::available_at(difficulty.available_rarities(), level);
        let rarity = rarity::roll(available, boost, rng);
        let prefix = rarity::roll_prefix(rarity, rng);

        let set = request.enemy_type.and_then(|t| self.sets.for_enemy(t));
        let kind = match (request.kind, set) {
            (Some(kind), _) => Some(kind),
            (None, Some(_)) => pick(&[LootKind::Armor, LootKind::Weapon], rng),
            (None, None) => pick(&LootKind::ALL, rng),
        }
        .unwrap_or(LootKind::Potion);

        let roll = Roll {
            level,
            rarity,
            prefix,
        };
        let item = match kind {
            LootKind::Weapon => roll.weapon(set, rng).into(),
            LootKind::Armor => roll.armor(set, rng).into(),
            LootKind::Potion => roll.potion(rng).into(),
            LootKind::Ring => roll.accessory(GearKind::Ring, StatName::Luck).into(),
            LootKind::Amulet => roll.accessory(GearKind::Amulet, StatName::Defense).into(),
            LootKind::Belt => roll.accessory(GearKind::Belt, StatName::Agility).into(),
        };

        tracing::debug!(%kind, ?rarity, level, item = %Item::name(&item), "item generated");
        item
    }
}

fn pick<T: Copy>(options: &[T], rng: &mut dyn RngOracle) -> Option<T> {
    rng.choose_index(options.len())
        .and_then(|index| options.get(index).copied())
}

/// Level, rarity and prefix shared by every part of one drop.
struct Roll {
    level: u32,
    rarity: Rarity,
    prefix: &'static str,
}

impl Roll {
    fn multiplier(&self) -> f64 {
        self.rarity.multiplier()
    }

    fn value(&self) -> u32 {
        (50.0 * f64::from(self.level) * self.multiplier()) as u32
    }

    fn finish(&self, gear: Gear) -> Gear {
        gear.with_rarity(self.rarity).with_value(self.value())
    }

    fn weapon(&self, set: Option<&ArmorSet>, rng: &mut dyn RngOracle) -> Gear {
        let damage = ((1.0 + f64::from(self.level)) * self.multiplier()).floor();
        let (name, weapon_type) = match set.and_then(|set| set.weapon.as_ref()) {
            Some(weapon) => (weapon.name.clone(), weapon.weapon_type),
            None => {
                let types: Vec<WeaponType> = WeaponType::iter().collect();
                let weapon_type = pick(&types, rng).unwrap_or(WeaponType::Sword);
                (weapon_type.to_string(), weapon_type)
            }
        };
        self.finish(
            Gear::weapon(format!("{} {name}", self.prefix), weapon_type, damage)
                .with_description(format!("A level {} {} weapon", self.level, self.prefix)),
        )
    }

    fn armor(&self, set: Option<&ArmorSet>, rng: &mut dyn RngOracle) -> Gear {
        let types: Vec<ArmorType> = ArmorType::iter().collect();
        let armor_type = pick(&types, rng).unwrap_or(ArmorType::Chestplate);
        let defense = ((2.0 + f64::from(self.level)) * self.multiplier()).floor();
        let name = match set {
            Some(set) => format!("{} {} {armor_type}", self.prefix, set.name),
            None => format!("{} {armor_type}", self.prefix),
        };
        self.finish(
            Gear::armor(name, armor_type, defense)
                .with_description(format!("A level {} {} armor piece", self.level, self.prefix)),
        )
    }

    fn accessory(&self, kind: GearKind, stat: StatName) -> Gear {
        let amount = (f64::from(1 + self.level / 2) * self.multiplier()).floor();
        let (noun, description) = match kind {
            GearKind::Ring => ("Ring", "A magical ring that enhances luck"),
            GearKind::Amulet => ("Amulet", "A mystical amulet that grants protection"),
            _ => ("Belt", "A sturdy belt that enhances movement speed"),
        };
        self.finish(
            Gear::new(format!("{} {noun}", self.prefix), kind)
                .with_effect(stat, amount)
                .with_description(description),
        )
    }

    fn potion(&self, rng: &mut dyn RngOracle) -> Potion {
        let index = rng.choose_index(POTIONS.len()).unwrap_or(0);
        let (base, effect, strength) = POTIONS[index.min(POTIONS.len() - 1)];
        let amount = strength(f64::from(self.level), self.multiplier()).floor();

        let mut potion = Potion::new(format!("{} {base}", self.prefix), effect, amount)
            .with_rarity(self.rarity)
            .with_value(self.value());
        potion.description = match effect {
            PotionEffect::Heal => format!("Restores {amount} HP"),
            PotionEffect::AttackBoost => format!("Increases Attack by {amount}"),
            PotionEffect::DefenseBoost => format!("Increases Defense by {amount}"),
            PotionEffect::LuckBoost => format!("Increases Luck by {amount}"),
            PotionEffect::FireResistance => format!("Grants fire resistance for {amount} turns"),
        };
        potion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::player::tests::hero;
    use crate::env::SequenceRng;
    use crate::equipment::sets::tests::brigand;

    fn generate(player: &Player, rolls: &[f64], request: LootRequest<'_>) -> Item {
        let sets = ArmorSetTable::new(vec![brigand()]);
        let mut rng = SequenceRng::new(rolls.iter().copied());
        ItemFactory::new(&sets).generate_random_item(player, &mut rng, request)
    }

    fn gear(item: Item) -> Gear {
        match item {
            Item::Gear(gear) => gear,
            other => panic!("expected gear, got {other:?}"),
        }
    }

    #[test]
    fn common_weapon_at_level_one() {
        // rarity, prefix, kind, weapon type
        let weapon = gear(generate(&hero(), &[0.0, 0.0, 0.0, 0.0], LootRequest::default()));
        assert_eq!(weapon.name, "Common Sword");
        assert_eq!(weapon.damage(), 2.0);
        assert_eq!(weapon.value, 50);
        assert_eq!(weapon.rarity, Rarity::Common);
    }

    #[test]
    fn rare_armor_scales_defense() {
        let armor = gear(generate(&hero(), &[0.99, 0.0, 0.2, 0.0], LootRequest::default()));
        assert_eq!(armor.name, "Rare Helmet");
        assert_eq!(armor.effects.get(&StatName::Defense), Some(&6.0));
        assert_eq!(armor.value, 100);
        assert_eq!(armor.description, "A level 1 Rare armor piece");
    }

    #[test]
    fn typed_enemy_drops_its_set() {
        let request = LootRequest::default().from_enemy("Goblin");
        let weapon = gear(generate(&hero(), &[0.0, 0.0, 0.9], request));
        assert_eq!(weapon.name, "Common Goblin Dagger");
        assert_eq!(weapon.weapon_type(), Some(WeaponType::Dagger));

        let armor = gear(generate(&hero(), &[0.0, 0.0, 0.0, 0.0], request));
        assert_eq!(armor.name, "Common Brigand Helmet");
    }

    #[test]
    fn ring_uses_half_level() {
        let mut player = hero();
        player.dungeon_level = 4;
        let ring = gear(generate(&player, &[0.0, 0.0, 0.5], LootRequest::default()));
        assert_eq!(ring.kind, GearKind::Ring);
        assert_eq!(ring.name, "Common Ring");
        assert_eq!(ring.effects.get(&StatName::Luck), Some(&3.0));
        assert_eq!(ring.value, 200);
    }

    #[test]
    fn healing_potion_scales_with_level() {
        let item = generate(&hero(), &[0.0, 0.0, 0.4, 0.0], LootRequest::default());
        let Item::Potion(potion) = item else {
            panic!("expected a potion");
        };
        assert_eq!(potion.name, "Common Healing Potion");
        assert_eq!(potion.effect(), Some(PotionEffect::Heal));
        assert_eq!(potion.effect_value, 20.0);
        assert_eq!(potion.description, "Restores 20 HP");
    }

    #[test]
    fn unknown_enemy_type_rolls_freely() {
        let request = LootRequest::default().from_enemy("Slime");
        let item = generate(&hero(), &[0.0, 0.0, 0.4, 0.0], request);
        assert!(item.is_potion());
    }

    #[test]
    fn requested_kind_skips_the_kind_roll() {
        let request = LootRequest::default().of_kind(LootKind::Potion);
        // rarity, prefix, potion table
        let item = generate(&hero(), &[0.0, 0.0, 0.0], request);
        let Item::Potion(potion) = item else {
            panic!("expected a potion");
        };
        assert_eq!(potion.name, "Common Healing Potion");
    }
}
