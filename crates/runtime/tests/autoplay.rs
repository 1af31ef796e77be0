//! End-to-end runs over the shipped content.

use dungeon_content::ContentFactory;
use dungeon_core::{GameRng, Player};
use dungeon_runtime::{
    AutoPilot, FileSaveRepository, SaveRepository, Session, Temperament,
};

fn play(seed: u64, rooms: u32) -> Session<dungeon_core::StaticTables, GameRng> {
    let tables = ContentFactory::embedded().expect("shipped content loads");
    let mut player = Player::from_config("Sim", &tables.config);
    for quest in tables.quests.clone() {
        player.accept_quest(quest);
    }
    let mut session = Session::new(tables, player, GameRng::new(seed));
    let mut pilot = AutoPilot::new(Temperament::balanced());

    for _ in 0..rooms {
        if !session.explore(&mut pilot).survived {
            break;
        }
    }
    session
}

#[test]
fn same_seed_same_run() {
    let a = play(42, 15);
    let b = play(42, 15);

    assert_eq!(a.player(), b.player());
    assert_eq!(a.rooms_explored(), b.rooms_explored());
    assert!(a.rooms_explored() >= 1);
}

#[test]
fn run_survives_a_save_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = FileSaveRepository::new(dir.path()).expect("repo");
    let session = play(7, 10);

    repo.save("sim", session.player()).expect("save");
    let loaded = repo.load("sim").expect("load").expect("slot exists");

    assert_eq!(&loaded, session.player());
    assert_eq!(repo.list_slots().expect("list"), vec!["sim".to_owned()]);
}

#[test]
fn progress_is_monotonic() {
    let session = play(1234, 25);
    let player = session.player();

    assert!(player.dungeon_level >= 1);
    assert!(player.level >= 1);
    assert!(player.attack_count >= player.critical_count);
    assert!(player.kills >= player.bosses_defeated);
    assert_eq!(
        player.quests.len() + player.completed_quests.len(),
        session.tables().quests.len()
    );
}

#[test]
fn side_rooms_keep_the_books_straight() {
    let session = play(99, 40);
    let player = session.player();

    assert!(player.puzzles_solved <= session.rooms_explored());
    assert!(player.shops_visited <= session.rooms_explored());
    assert!(player.materials.iter().all(|(_, count)| count > 0));
}
