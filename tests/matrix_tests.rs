use creature_arena::config::BattleConfig;
use creature_arena::error::RosterError;
use creature_arena::fighter::Team;
use creature_arena::matrix::{battle_seed, win_rate};
use creature_arena::model::{BaseStats, CreatureTemplate, Sprites};

fn make_mon(name: &str, types: &[&str], attack: u32, speed: u32) -> CreatureTemplate {
    CreatureTemplate {
        id: 0,
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        stats: BaseStats {
            hp: 50,
            attack,
            defense: 50,
            speed,
            special_attack: 10,
            special_defense: 10,
        },
        sprites: Sprites::default(),
    }
}

#[test]
fn win_rate_is_reproducible_per_seed() {
    let team_one = vec![
        make_mon("Blaze", &["fire"], 60, 70),
        make_mon("Spark", &["electric"], 55, 90),
        make_mon("Venom", &["poison"], 50, 60),
    ];
    let team_two = vec![
        make_mon("Splash", &["water"], 55, 65),
        make_mon("Leafy", &["grass"], 60, 55),
        make_mon("Frost", &["ice"], 50, 75),
    ];
    let config = BattleConfig::default();
    let first = win_rate(&team_one, &team_two, &config, 64, 7).expect("valid roster");
    let second = win_rate(&team_one, &team_two, &config, 64, 7).expect("valid roster");
    assert_eq!(first, second);
    assert_eq!(first.battles, 64);
    assert_eq!(first.team_one_wins + first.team_two_wins + first.draws, 64);
}

#[test]
fn overwhelming_team_always_wins() {
    // 250 per hit against 150 HP, and team one always moves first.
    let strong = vec![make_mon("Titan", &["normal"], 500, 200)];
    let weak = vec![make_mon("Sprout", &["normal"], 10, 10)];
    let rate = win_rate(&strong, &weak, &BattleConfig::default(), 32, 1).expect("valid roster");
    assert_eq!(rate.team_one_wins, 32);
    assert_eq!(rate.team_one_rate(), 1.0);
}

#[test]
fn invalid_roster_fails_the_whole_batch() {
    let team = vec![make_mon("Solo", &["normal"], 50, 50)];
    let err = win_rate(&[], &team, &BattleConfig::default(), 4, 0).unwrap_err();
    assert_eq!(err, RosterError::EmptyTeam(Team::One));
}

#[test]
fn battle_seeds_differ_across_indices() {
    let seeds: Vec<u64> = (0..8).map(|index| battle_seed(99, index)).collect();
    assert_eq!(seeds, (0..8).map(|index| battle_seed(99, index)).collect::<Vec<_>>());
    for (i, a) in seeds.iter().enumerate() {
        for b in &seeds[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
