//! Property tests over random games.
//!
//! Games are driven by picking uniformly among every seat's legal intents,
//! which exercises jump-ins, out-of-turn calls and missed-call penalties
//! as well as ordinary turns.

use proptest::prelude::*;
use proptest::sample::Index;

use uno_engine::core::{HandView, Intent, IntentKind, PlayerId, RuleConfig};
use uno_engine::rules::{next_seat, Engine};
use uno_engine::{Color, Direction, DECK_SIZE};

fn all_legal_intents(engine: &Engine) -> Vec<Intent> {
    engine
        .state()
        .player_ids()
        .flat_map(|player| engine.legal_intents(player))
        .collect()
}

fn arbitrary_intent(player: u8, kind: u8, index: usize) -> Intent {
    let player = PlayerId::new(player);
    match kind % 4 {
        0 => Intent::play(player, index),
        1 => Intent::draw(player),
        2 => Intent::choose_color(player, Color::CHOOSABLE[index % 4]),
        _ => Intent::new(player, IntentKind::DeclareSpecialCall),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_cards_are_conserved(
        seed in any::<u64>(),
        players in 2usize..=4,
        picks in prop::collection::vec(any::<Index>(), 1..400),
    ) {
        let mut engine = Engine::new(RuleConfig::all_human(players).with_seed(seed)).unwrap();

        for pick in picks {
            if engine.state().is_over() {
                break;
            }
            let intents = all_legal_intents(&engine);
            prop_assert!(!intents.is_empty());

            let intent = intents[pick.index(intents.len())];
            prop_assert!(engine.apply(intent).is_ok(), "legal intent rejected: {:?}", intent);
            prop_assert_eq!(engine.state().card_count(), DECK_SIZE);
        }
    }

    #[test]
    fn prop_rejected_intents_change_nothing(
        seed in any::<u64>(),
        warmup in prop::collection::vec(any::<Index>(), 0..60),
        attempts in prop::collection::vec((0u8..6, any::<u8>(), 0usize..12), 1..40),
    ) {
        let mut engine = Engine::new(RuleConfig::all_human(3).with_seed(seed)).unwrap();
        for pick in warmup {
            if engine.state().is_over() {
                break;
            }
            let intents = all_legal_intents(&engine);
            engine.apply(intents[pick.index(intents.len())]).unwrap();
        }

        for (player, kind, index) in attempts {
            let before = engine.checkpoint().unwrap();
            if engine.apply(arbitrary_intent(player, kind, index)).is_err() {
                prop_assert_eq!(engine.checkpoint().unwrap(), before);
            }
        }
    }

    #[test]
    fn prop_snapshots_hide_other_hands(
        seed in any::<u64>(),
        players in 2usize..=4,
        viewer in 0u8..4,
    ) {
        let engine = Engine::new(RuleConfig::all_human(players).with_seed(seed)).unwrap();
        let viewer = PlayerId::new(viewer % players as u8);
        let snapshot = engine.snapshot(Some(viewer));

        for (seat, view) in snapshot.hands.iter().enumerate() {
            let player = PlayerId::from_index(seat);
            if player == viewer {
                prop_assert_eq!(view.cards(), Some(engine.state().hand(player)));
            } else {
                prop_assert_eq!(view, &HandView::Hidden { count: engine.state().hand(player).len() });
            }
        }

        let decoded = uno_engine::TableSnapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(decoded, snapshot);
    }

    #[test]
    fn prop_next_seat_in_range(
        current in 0usize..4,
        clockwise in any::<bool>(),
        skip in 0usize..10,
        players in 2usize..=4,
    ) {
        let current = current % players;
        let direction = if clockwise { Direction::Clockwise } else { Direction::CounterClockwise };
        let seat = next_seat(current, direction, skip, players);

        prop_assert!(seat < players);
        // Stepping back the same distance returns to the start.
        prop_assert_eq!(next_seat(seat, direction.reversed(), skip, players), current);
    }
}
