use creature_arena::config::TeamSize;
use creature_arena::fighter::{Combatant, SlotKey, Team};
use creature_arena::model::{BaseStats, CreatureTemplate, Sprites};
use creature_arena::outcome::evaluate;
use creature_arena::scheduler::{speed_order, SchedulerPhase, TurnQueue};
use std::collections::BTreeMap;

fn make_fighter(name: &str, speed: u32) -> Combatant {
    Combatant::from_template(&CreatureTemplate {
        id: 0,
        name: name.to_string(),
        types: vec!["normal".to_string()],
        stats: BaseStats {
            hp: 20,
            attack: 50,
            defense: 50,
            speed,
            special_attack: 50,
            special_defense: 50,
        },
        sprites: Sprites::default(),
    })
}

fn three_on_three(speeds_one: [u32; 3], speeds_two: [u32; 3]) -> BTreeMap<SlotKey, Combatant> {
    let mut map = BTreeMap::new();
    for (idx, speed) in speeds_one.into_iter().enumerate() {
        let position = idx as u8 + 1;
        map.insert(
            SlotKey::new(Team::One, position),
            make_fighter(&format!("one-{position}"), speed),
        );
    }
    for (idx, speed) in speeds_two.into_iter().enumerate() {
        let position = idx as u8 + 1;
        map.insert(
            SlotKey::new(Team::Two, position),
            make_fighter(&format!("two-{position}"), speed),
        );
    }
    map
}

fn faint(map: &mut BTreeMap<SlotKey, Combatant>, key: SlotKey) {
    if let Some(c) = map.get_mut(&key) {
        c.current_hp = 0;
    }
}

#[test]
fn slot_iteration_is_position_major() {
    let order: Vec<String> = SlotKey::all(TeamSize::Three).map(|k| k.to_string()).collect();
    assert_eq!(order, vec!["p1-1", "p2-1", "p1-2", "p2-2", "p1-3", "p2-3"]);
    assert_eq!(SlotKey::all(TeamSize::One).count(), 2);
}

#[test]
fn queue_drops_fainted_slots() {
    let slots: Vec<SlotKey> = SlotKey::all(TeamSize::Three).collect();
    let mut map = three_on_three([90, 70, 50], [80, 60, 40]);
    faint(&mut map, SlotKey::new(Team::One, 2));
    let order = speed_order(&map, &slots);
    assert_eq!(order.len(), 5);
    assert!(!order.contains(&SlotKey::new(Team::One, 2)));
    assert_eq!(order[0], SlotKey::new(Team::One, 1));
    assert_eq!(order[1], SlotKey::new(Team::Two, 1));
}

#[test]
fn index_wraps_over_the_recomputed_queue() {
    let slots: Vec<SlotKey> = SlotKey::all(TeamSize::Three).collect();
    let mut map = three_on_three([90, 70, 50], [80, 60, 40]);
    let mut queue = TurnQueue::start(&map, &slots);
    assert_eq!(queue.phase(), SchedulerPhase::Queued);
    assert_eq!(queue.current(), Some(SlotKey::new(Team::One, 1)));

    for _ in 0..5 {
        queue.recompute_and_advance(&map, &slots);
    }
    assert_eq!(queue.index(), 5);
    assert_eq!(queue.current(), Some(SlotKey::new(Team::Two, 3)));

    // A faint shrinks the queue; the index keeps advancing modulo the new length.
    faint(&mut map, SlotKey::new(Team::Two, 2));
    queue.recompute_and_advance(&map, &slots);
    assert_eq!(queue.order().len(), 5);
    assert_eq!(queue.index(), 1);
}

#[test]
fn empty_queue_is_exhausted_not_a_panic() {
    let slots: Vec<SlotKey> = SlotKey::all(TeamSize::One).collect();
    let mut map = three_on_three([10, 10, 10], [10, 10, 10]);
    for key in SlotKey::all(TeamSize::Three) {
        faint(&mut map, key);
    }
    let mut queue = TurnQueue::start(&map, &slots);
    assert_eq!(queue.phase(), SchedulerPhase::Exhausted);
    queue.recompute_and_advance(&map, &slots);
    assert_eq!(queue.index(), 0);
    assert_eq!(queue.current(), None);
    assert!(queue.preview(&map, 5).is_empty());
}

#[test]
fn cleared_queue_is_idle() {
    let slots: Vec<SlotKey> = SlotKey::all(TeamSize::One).collect();
    let map = three_on_three([10, 10, 10], [10, 10, 10]);
    let mut queue = TurnQueue::start(&map, &slots);
    queue.clear();
    assert_eq!(queue.phase(), SchedulerPhase::Idle);
    assert!(queue.order().is_empty());
}

#[test]
fn preview_skips_entries_that_fainted_since_the_recompute() {
    let slots: Vec<SlotKey> = SlotKey::all(TeamSize::Three).collect();
    let mut map = three_on_three([90, 70, 50], [80, 60, 40]);
    let queue = TurnQueue::start(&map, &slots);
    faint(&mut map, SlotKey::new(Team::One, 1));
    let preview = queue.preview(&map, 5);
    assert_eq!(preview.len(), 5);
    assert_eq!(preview[0], (SlotKey::new(Team::Two, 1), true));
    assert!(preview.iter().all(|(key, _)| *key != SlotKey::new(Team::One, 1)));
}

#[test]
fn wiped_team_one_loses_first() {
    let mut map = three_on_three([10, 10, 10], [10, 10, 10]);
    assert_eq!(evaluate(&map), None);
    for position in 1..=3 {
        faint(&mut map, SlotKey::new(Team::One, position));
    }
    assert_eq!(evaluate(&map), Some(Team::Two));

    // Both sides down: the team one check comes first.
    for position in 1..=3 {
        faint(&mut map, SlotKey::new(Team::Two, position));
    }
    assert_eq!(evaluate(&map), Some(Team::Two));
}

#[test]
fn wiped_team_two_loses() {
    let mut map = three_on_three([10, 10, 10], [10, 10, 10]);
    for position in 1..=3 {
        faint(&mut map, SlotKey::new(Team::Two, position));
    }
    assert_eq!(evaluate(&map), Some(Team::One));
    let slots: Vec<SlotKey> = SlotKey::all(TeamSize::Three).collect();
    assert!(speed_order(&map, &slots)
        .iter()
        .all(|key| key.team == Team::One));
}
