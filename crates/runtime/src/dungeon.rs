//! Dungeon layout: typed rooms generated for the player's current level.
//!
//! A level is a queue of rooms ending in a boss room. Room contents (enemies,
//! treasure, shop stock, puzzles and traps) are rolled when the level is
//! generated, so a saved seed replays the same layout.

use std::collections::VecDeque;

use dungeon_core::{
    Enemy, Item, ItemFactory, LootRequest, Player, RngOracle, StatName, TablesOracle,
};

use crate::puzzle::Puzzle;

/// Room categories the session knows how to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RoomKind {
    Combat,
    Treasure,
    Shop,
    Rest,
    Puzzle,
    Boss,
}

impl RoomKind {
    /// Kinds a regular room rolls from, with their weights.
    const RANDOM: [(RoomKind, f64); 5] = [
        (RoomKind::Combat, 0.5),
        (RoomKind::Treasure, 0.2),
        (RoomKind::Shop, 0.1),
        (RoomKind::Rest, 0.15),
        (RoomKind::Puzzle, 0.05),
    ];

    pub const fn has_enemies(self) -> bool {
        matches!(self, Self::Combat | Self::Boss)
    }

    /// Rest rooms and shops are always safe.
    pub const fn can_be_trapped(self) -> bool {
        !matches!(self, Self::Rest | Self::Shop)
    }

    fn roll(rng: &mut dyn RngOracle) -> Self {
        let weights: Vec<f64> = Self::RANDOM.iter().map(|(_, w)| *w).collect();
        rng.weighted_index(&weights)
            .and_then(|i| Self::RANDOM.get(i))
            .map_or(Self::Combat, |(kind, _)| *kind)
    }
}

/// Something nasty waiting behind the door.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Trap {
    /// Straight hit to the player's hp.
    Damage { amount: f64 },
    /// Temporary stat loss.
    Weaken { stat: StatName, amount: f64 },
}

impl Trap {
    /// Chance of a trap in a room that can hold one.
    pub const CHANCE: f64 = 0.3;

    /// Formula: `0.1 + luck * 0.01 + agility * 0.01`
    pub fn avoid_chance(player: &Player) -> f64 {
        0.1 + player.stat(StatName::Luck) * 0.01 + player.stat(StatName::Agility) * 0.01
    }

    fn roll(level: u32, rng: &mut dyn RngOracle) -> Option<Self> {
        let l = level as f64;
        let traps = [
            Self::Damage { amount: 5.0 + 2.0 * l },
            Self::Damage { amount: 3.0 + 3.0 * l },
            Self::Weaken {
                stat: StatName::Attack,
                amount: 2.0,
            },
            Self::Weaken {
                stat: StatName::Defense,
                amount: 2.0,
            },
        ];
        rng.choose_index(traps.len()).map(|i| traps[i])
    }
}

/// A room and everything rolled into it.
#[derive(Clone, Debug)]
pub struct Room {
    pub kind: RoomKind,
    pub enemies: Vec<Enemy>,
    pub treasure: Vec<Item>,
    /// Crafting material key lying with the treasure.
    pub material: Option<String>,
    /// Shop stock, priciest first.
    pub stock: Vec<Item>,
    pub puzzle: Option<Puzzle>,
    pub trap: Option<Trap>,
}

impl Room {
    /// Chance that a single-item treasure room also holds a material.
    pub const MATERIAL_CHANCE: f64 = 0.5;

    /// An empty room of `kind`.
    pub fn new(kind: RoomKind) -> Self {
        Self {
            kind,
            enemies: Vec::new(),
            treasure: Vec::new(),
            material: None,
            stock: Vec::new(),
            puzzle: None,
            trap: None,
        }
    }

    /// Roll the contents of a room of the given kind at the player's level.
    ///
    /// Combat rooms hold `1..=2 + level / 3` enemies, boss rooms one boss.
    /// Treasure rooms hold one or two items, and a lone item may come with a
    /// crafting material. Shops stock the difficulty's item count.
    pub fn generate(
        kind: RoomKind,
        player: &Player,
        tables: &dyn TablesOracle,
        rng: &mut dyn RngOracle,
    ) -> Self {
        let level = player.dungeon_level;
        let ng_plus = player.ng_plus();

        let enemies = match kind {
            RoomKind::Combat => {
                let count = rng.range(1, 2 + i64::from(level / 3));
                (0..count)
                    .filter_map(|_| tables.enemy_roster().generate(level, false, ng_plus, rng))
                    .collect()
            }
            RoomKind::Boss => tables
                .enemy_roster()
                .generate(level, true, ng_plus, rng)
                .into_iter()
                .collect(),
            _ => Vec::new(),
        };

        let factory = ItemFactory::new(tables.armor_sets());
        let mut room = Self::new(kind);
        match kind {
            RoomKind::Treasure => {
                let count = rng.range(1, 2);
                if count == 1 && rng.chance(Self::MATERIAL_CHANCE) {
                    let materials = &tables.crafting().materials;
                    room.material = rng
                        .choose_index(materials.len())
                        .and_then(|i| materials.get(i))
                        .map(|material| material.key.clone());
                }
                room.treasure = (0..count)
                    .map(|_| factory.generate_random_item(player, rng, LootRequest::default()))
                    .collect();
            }
            RoomKind::Shop => {
                let (lo, hi) = player.difficulty.shop_stock_range();
                let count = rng.range(i64::from(lo), i64::from(hi));
                room.stock = (0..count)
                    .map(|_| factory.generate_random_item(player, rng, LootRequest::default()))
                    .collect();
                room.stock.sort_by(|a, b| b.value().cmp(&a.value()));
            }
            RoomKind::Puzzle => room.puzzle = Some(Puzzle::roll(rng)),
            _ => {}
        }
        room.enemies = enemies;

        let trap = if kind.can_be_trapped() && rng.chance(Trap::CHANCE) {
            Trap::roll(level, rng)
        } else {
            None
        };

        room.trap = trap;

        tracing::debug!(
            %kind,
            level,
            enemies = room.enemies.len(),
            treasure = room.treasure.len(),
            stock = room.stock.len(),
            trapped = room.trap.is_some(),
            "room generated"
        );
        room
    }
}

/// The rooms of one dungeon level, in visiting order.
#[derive(Clone, Debug, Default)]
pub struct Dungeon {
    level: u32,
    rooms: VecDeque<Room>,
}

impl Dungeon {
    /// Lay out the player's current level.
    ///
    /// The room count comes from the difficulty's range; a boss room is
    /// always appended last.
    pub fn generate(player: &Player, tables: &dyn TablesOracle, rng: &mut dyn RngOracle) -> Self {
        let (lo, hi) = player.difficulty.room_count_range();
        let count = rng.range(i64::from(lo), i64::from(hi));

        let mut rooms: VecDeque<Room> = (0..count)
            .map(|_| {
                let kind = RoomKind::roll(rng);
                Room::generate(kind, player, tables, rng)
            })
            .collect();
        rooms.push_back(Room::generate(RoomKind::Boss, player, tables, rng));

        tracing::info!(
            level = player.dungeon_level,
            difficulty = %player.difficulty,
            rooms = rooms.len(),
            "dungeon generated"
        );

        Self {
            level: player.dungeon_level,
            rooms,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn remaining(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_cleared(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn peek(&self) -> Option<&Room> {
        self.rooms.front()
    }

    pub(crate) fn next_room(&mut self) -> Option<Room> {
        self.rooms.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::tables;
    use dungeon_core::crafting::MaterialKind;
    use dungeon_core::{Difficulty, Material, Rarity, SequenceRng};

    #[test]
    fn boss_room_closes_every_level() {
        let tables = tables();
        let player = Player::new("Tester");
        let mut rng = SequenceRng::constant(0.0);

        let dungeon = Dungeon::generate(&player, &tables, &mut rng);

        // Lowest roll: five rooms, all combat, plus the boss.
        assert_eq!(dungeon.remaining(), 6);
        assert_eq!(dungeon.level(), 1);
        let kinds: Vec<RoomKind> = dungeon.rooms.iter().map(|r| r.kind).collect();
        assert_eq!(kinds.last(), Some(&RoomKind::Boss));
        assert!(kinds[..5].iter().all(|k| *k == RoomKind::Combat));
        assert!(dungeon.rooms.back().is_some_and(|r| r.enemies.len() == 1 && r.enemies[0].is_boss));
    }

    #[test]
    fn room_count_follows_difficulty() {
        let tables = tables();
        let mut player = Player::new("Tester");
        player.difficulty = Difficulty::Hardcore;
        let mut rng = SequenceRng::constant(0.999_999);

        let dungeon = Dungeon::generate(&player, &tables, &mut rng);

        assert_eq!(dungeon.remaining(), 16);
    }

    #[test]
    fn combat_room_size_grows_with_level() {
        let tables = tables();
        let mut player = Player::new("Tester");
        player.dungeon_level = 6;
        let mut rng = SequenceRng::constant(0.999_999);

        let room = Room::generate(RoomKind::Combat, &player, &tables, &mut rng);

        assert_eq!(room.enemies.len(), 4);
        assert!(room.trap.is_none());
    }

    #[test]
    fn rest_rooms_are_never_trapped() {
        let tables = tables();
        let player = Player::new("Tester");
        let mut rng = SequenceRng::constant(0.0);

        let room = Room::generate(RoomKind::Rest, &player, &tables, &mut rng);

        assert!(room.trap.is_none());
        assert!(room.enemies.is_empty());
        assert!(room.treasure.is_empty());
    }

    #[test]
    fn highest_roll_is_a_puzzle_room() {
        let tables = tables();
        let player = Player::new("Tester");
        let mut rng = SequenceRng::constant(0.999_999);

        assert_eq!(RoomKind::roll(&mut rng), RoomKind::Puzzle);
        let room = Room::generate(RoomKind::Puzzle, &player, &tables, &mut rng);
        assert_eq!(room.puzzle, Some(Puzzle::Dice));
    }

    #[test]
    fn shops_stock_by_difficulty_priciest_first() {
        let tables = tables();
        let mut player = Player::new("Tester");
        player.difficulty = Difficulty::Hardcore;
        // Top of the 1..=3 stock range, then the lowest rolls for every item.
        let mut rng = SequenceRng::new([0.99]).with_fallback(0.0);

        let room = Room::generate(RoomKind::Shop, &player, &tables, &mut rng);

        assert_eq!(room.stock.len(), 3);
        let values: Vec<u32> = room.stock.iter().map(Item::value).collect();
        let mut sorted = values.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(values, sorted);
        assert!(room.trap.is_none());
        assert!(!RoomKind::Shop.can_be_trapped());
    }

    #[test]
    fn lone_treasure_can_carry_a_material() {
        let mut tables = tables();
        tables.crafting.materials.push(Material {
            key: "iron_ore".into(),
            name: "Iron Ore".into(),
            kind: MaterialKind::Ore,
            rarity: Rarity::Common,
            description: String::new(),
            value: 5,
        });
        let player = Player::new("Tester");
        let mut rng = SequenceRng::constant(0.0);

        let room = Room::generate(RoomKind::Treasure, &player, &tables, &mut rng);

        assert_eq!(room.treasure.len(), 1);
        assert_eq!(room.material.as_deref(), Some("iron_ore"));
    }

    #[test]
    fn treasure_room_rolls_items_and_maybe_a_trap() {
        let tables = tables();
        let player = Player::new("Tester");
        let mut rng = SequenceRng::constant(0.0);

        let room = Room::generate(RoomKind::Treasure, &player, &tables, &mut rng);

        assert_eq!(room.treasure.len(), 1);
        assert_eq!(
            room.trap,
            Some(Trap::Damage { amount: 7.0 }),
            "a zero roll always springs the first trap"
        );
    }
}
