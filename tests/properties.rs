use creature_arena::battle::BattleSession;
use creature_arena::combat::resolve_attack;
use creature_arena::config::{BattleConfig, TeamSize};
use creature_arena::fighter::{Combatant, SlotKey, Team, HP_MULTIPLIER};
use creature_arena::model::{BaseStats, CreatureTemplate, Sprites};
use creature_arena::outcome::{evaluate, team_alive};
use creature_arena::rolls::ScriptedRolls;
use creature_arena::scheduler::speed_order;
use proptest::prelude::*;
use std::collections::BTreeMap;

const TYPES: &[&str] = &[
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy", "cosmic",
];

fn template_strategy() -> impl Strategy<Value = CreatureTemplate> {
    (
        0..TYPES.len(),
        1u32..255,
        0u32..255,
        0u32..255,
        0u32..255,
        0u32..255,
        0u32..255,
    )
        .prop_map(|(ty, hp, attack, defense, speed, spa, spd)| CreatureTemplate {
            id: 0,
            name: format!("{}-{hp}", TYPES[ty]),
            types: vec![TYPES[ty].to_string()],
            stats: BaseStats {
                hp,
                attack,
                defense,
                speed,
                special_attack: spa,
                special_defense: spd,
            },
            sprites: Sprites::default(),
        })
}

fn field_strategy() -> impl Strategy<Value = BTreeMap<SlotKey, Combatant>> {
    (
        prop::collection::vec((template_strategy(), any::<bool>()), 3),
        prop::collection::vec((template_strategy(), any::<bool>()), 3),
    )
        .prop_map(|(one, two)| {
            let mut map = BTreeMap::new();
            for (team, roster) in [(Team::One, one), (Team::Two, two)] {
                for (idx, (template, fainted)) in roster.into_iter().enumerate() {
                    let mut combatant = Combatant::from_template(&template);
                    if fainted {
                        combatant.current_hp = 0;
                    }
                    map.insert(SlotKey::new(team, idx as u8 + 1), combatant);
                }
            }
            map
        })
}

proptest! {
    #[test]
    fn every_hit_deals_at_least_one(
        attacker in template_strategy(),
        defender in template_strategy(),
        draw in 0.0f64..1.0,
    ) {
        let attacker = Combatant::from_template(&attacker);
        let defender = Combatant::from_template(&defender);
        let outcome = resolve_attack(&attacker, &defender, &mut ScriptedRolls::constant(draw));
        prop_assert!(outcome.damage >= 1);
        prop_assert_eq!(outcome.is_critical, draw < 0.15);
    }

    #[test]
    fn fresh_combatants_start_at_full_tripled_hp(template in template_strategy()) {
        let combatant = Combatant::from_template(&template);
        prop_assert_eq!(combatant.initial_hp, template.stats.hp * HP_MULTIPLIER);
        prop_assert_eq!(combatant.current_hp, combatant.initial_hp);
        prop_assert!(combatant.status.is_empty());
    }

    #[test]
    fn queue_holds_only_live_slots_fastest_first(field in field_strategy()) {
        let slots: Vec<SlotKey> = SlotKey::all(TeamSize::Three).collect();
        let order = speed_order(&field, &slots);
        let live = field.values().filter(|c| c.is_alive()).count();
        prop_assert_eq!(order.len(), live);
        for pair in order.windows(2) {
            prop_assert!(field[&pair[0]].speed() >= field[&pair[1]].speed());
        }
        prop_assert!(order.iter().all(|slot| field[slot].is_alive()));
    }

    #[test]
    fn winner_is_declared_exactly_when_a_team_is_wiped(field in field_strategy()) {
        let one = team_alive(&field, Team::One);
        let two = team_alive(&field, Team::Two);
        let expected = if !one {
            Some(Team::Two)
        } else if !two {
            Some(Team::One)
        } else {
            None
        };
        prop_assert_eq!(evaluate(&field), expected);
    }

    #[test]
    fn seeded_battles_end_with_a_consistent_winner(
        one in prop::collection::vec(template_strategy(), 1..=3),
        two in prop::collection::vec(template_strategy(), 1..=3),
        seed in any::<u64>(),
    ) {
        let config = BattleConfig { seed, ..BattleConfig::default() };
        let mut session = BattleSession::new(&one, &two, config).expect("valid roster");
        session.run_to_completion();
        let state = session.state();
        prop_assert!(session.turn() <= session.config().max_turns);
        if let Some(winner) = state.winner {
            prop_assert!(!team_alive(&state.combatants, winner.opponent()));
            prop_assert!(team_alive(&state.combatants, winner));
            prop_assert!(session.queue().order().iter().all(|slot| slot.team == winner));
        }
        for combatant in state.combatants.values() {
            prop_assert!(combatant.current_hp <= combatant.initial_hp);
            prop_assert!(combatant.status.iter().count() <= 1);
        }
    }
}
