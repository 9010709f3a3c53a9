//! Computer seat tests.
//!
//! Seat 0 is human and every other seat is a computer driven by the
//! default priority strategy, unless a test says otherwise.

use uno_engine::core::{EngineError, HandView, Intent, Phase, PlayerId, RuleConfig, SeatKind};
use uno_engine::events::GameEvent;
use uno_engine::opponents::{OpponentStrategy, StrategyChoice};
use uno_engine::rules::{Engine, TableSetup};
use uno_engine::{Card, Color, TableState, DECK_SIZE};

fn p(seat: u8) -> PlayerId {
    PlayerId::new(seat)
}

fn red(n: u8) -> Card {
    Card::number(Color::Red, n)
}

fn blue(n: u8) -> Card {
    Card::number(Color::Blue, n)
}

fn green(n: u8) -> Card {
    Card::number(Color::Green, n)
}

/// Set `RUST_LOG=uno_engine=debug` to watch games play out.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn start(setup: TableSetup) -> Engine {
    Engine::from_state(setup.build().unwrap())
}

fn versus_computer() -> TableSetup {
    TableSetup::new(RuleConfig::new(2))
}

#[test]
fn test_computer_answers_human_play() {
    let mut engine = start(
        versus_computer()
            .hand(p(0), vec![red(1), red(2), red(3)])
            .hand(p(1), vec![blue(9), red(8), green(2)])
            .top_card(red(5)),
    );

    let outcome = engine.submit(Intent::play(p(0), 0));

    assert!(outcome.ok);
    assert!(outcome
        .events
        .contains(&GameEvent::CardPlayed { player: p(1), card: red(8) }));
    assert_eq!(outcome.snapshot.current_player, p(0));
    assert_eq!(outcome.snapshot.top_card, Some(red(8)));
    assert_eq!(
        outcome.descriptions()[0],
        "Player 0 played Red 1"
    );
}

#[test]
fn test_computer_draws_until_playable() {
    let mut engine = start(
        versus_computer()
            .hand(p(0), vec![red(1), red(2), red(3)])
            .hand(p(1), vec![blue(9), blue(8)])
            .top_card(red(5))
            .next_draws(vec![green(3), Card::number(Color::Yellow, 2), red(4)]),
    );

    let outcome = engine.submit(Intent::play(p(0), 0));

    assert!(outcome
        .events
        .contains(&GameEvent::CardsDrawn { player: p(1), count: 3 }));
    assert!(outcome
        .events
        .contains(&GameEvent::CardPlayed { player: p(1), card: red(4) }));
    assert_eq!(engine.state().hand(p(1)).len(), 4);
    assert_eq!(engine.state().current_player(), p(0));
}

#[test]
fn test_computer_picks_most_held_color() {
    let mut engine = start(
        versus_computer()
            .hand(p(0), vec![red(3), red(2), red(1)])
            .hand(p(1), vec![Card::wild(), blue(1), blue(2), green(9)])
            .top_card(red(5)),
    );

    let outcome = engine.submit(Intent::play(p(0), 0));

    assert!(outcome
        .events
        .contains(&GameEvent::ColorChosen { player: p(1), color: Color::Blue }));
    assert_eq!(engine.state().active_color(), Color::Blue);
    assert_eq!(engine.state().current_player(), p(0));
}

#[test]
fn test_computer_pays_pending_draw() {
    let mut engine = start(
        versus_computer()
            .hand(p(0), vec![Card::draw_two(Color::Red), red(2), red(3)])
            .hand(p(1), vec![blue(9), green(8)])
            .top_card(red(5)),
    );

    let outcome = engine.submit(Intent::play(p(0), 0));

    assert!(outcome
        .events
        .contains(&GameEvent::CardsDrawn { player: p(1), count: 2 }));
    assert_eq!(engine.state().hand(p(1)).len(), 4);
    assert_eq!(engine.state().pending_draw(), 0);
    assert_eq!(engine.state().current_player(), p(0));
}

#[test]
fn test_computer_stacks_draw_two() {
    let mut engine = start(
        versus_computer()
            .hand(p(0), vec![Card::draw_two(Color::Red), red(2), red(3)])
            .hand(p(1), vec![Card::draw_two(Color::Green), green(8), green(7)])
            .top_card(red(5)),
    );

    engine.submit(Intent::play(p(0), 0));

    assert_eq!(engine.state().pending_draw(), 4);
    assert_eq!(engine.state().current_player(), p(0));
    assert_eq!(engine.legal_intents(p(0)), vec![Intent::draw(p(0))]);
}

#[test]
fn test_computer_declares_automatically() {
    let mut engine = start(
        versus_computer()
            .hand(p(0), vec![red(1), red(2), red(3)])
            .hand(p(1), vec![red(8), blue(9)])
            .top_card(red(5)),
    );

    let outcome = engine.submit(Intent::play(p(0), 0));

    assert!(outcome
        .events
        .contains(&GameEvent::SpecialCallDeclared { player: p(1) }));
    assert!(!engine.state().is_vulnerable(p(1)));
    assert_eq!(engine.state().phase(), Phase::AwaitingMove);
}

#[test]
fn test_human_call_window_pauses_computers() {
    let mut engine = start(
        versus_computer()
            .hand(p(0), vec![red(1), red(2)])
            .hand(p(1), vec![red(8), blue(9), green(4)])
            .top_card(red(5)),
    );

    let outcome = engine.submit(Intent::play(p(0), 0));
    assert_eq!(
        outcome.snapshot.phase,
        Phase::AwaitingSpecialCallWindow { player: p(0) }
    );
    assert_eq!(outcome.snapshot.current_player, p(1));
    assert!(engine.human_call_pending());
    assert!(engine.computer_to_act());

    let outcome = engine.submit(Intent::declare(p(0)));
    assert!(outcome
        .events
        .contains(&GameEvent::CardPlayed { player: p(1), card: red(8) }));
    assert_eq!(engine.state().hand(p(0)).len(), 1);
}

#[test]
fn test_forced_computer_turn_penalizes_human() {
    let mut engine = start(
        versus_computer()
            .hand(p(0), vec![red(1), red(2)])
            .hand(p(1), vec![red(8), blue(9), green(4)])
            .top_card(red(5)),
    );

    engine.submit(Intent::play(p(0), 0));
    let events = engine.play_computer_turn().unwrap();

    assert_eq!(events[0], GameEvent::PenaltyApplied { player: p(0), count: 2 });
    assert_eq!(engine.state().hand(p(0)).len(), 3);
}

#[test]
fn test_run_computer_turns_closes_human_call_window() {
    let mut engine = start(
        versus_computer()
            .hand(p(0), vec![red(1), red(2)])
            .hand(p(1), vec![red(8), blue(9), green(4)])
            .top_card(red(5)),
    );

    engine.submit(Intent::play(p(0), 0));
    let events = engine.run_computer_turns();

    assert_eq!(events[0], GameEvent::PenaltyApplied { player: p(0), count: 2 });
    assert!(events.contains(&GameEvent::CardPlayed { player: p(1), card: red(8) }));
    assert_eq!(engine.state().hand(p(0)).len(), 3);
    assert!(!engine.human_call_pending());
    assert_eq!(engine.state().current_player(), p(0));
}

#[test]
fn test_auto_play_disabled() {
    let mut engine = start(
        TableSetup::new(RuleConfig::new(2).with_auto_play(false))
            .hand(p(0), vec![red(1), red(2), red(3)])
            .top_card(red(5)),
    );

    engine.submit(Intent::play(p(0), 0));
    assert_eq!(engine.state().current_player(), p(1));
    assert!(engine.computer_to_act());

    engine.run_computer_turns();
    assert!(!engine.computer_to_act());
}

#[test]
fn test_human_cannot_force_human_turn() {
    let mut engine = start(versus_computer());
    assert_eq!(engine.play_computer_turn(), Err(EngineError::NotYourTurn));
}

#[test]
fn test_computer_self_play_finishes() {
    init_tracing();
    for seed in 0..20 {
        for players in 2..=4 {
            let mut engine = Engine::new(RuleConfig::all_computer(players).with_seed(seed)).unwrap();
            engine.run_computer_turns();

            let state = engine.state();
            assert!(state.is_over(), "seed {seed}, {players} players");
            let winner = state.winner().unwrap();
            assert!(state.hand(winner).is_empty());
            assert_eq!(state.winner_score(), Some(state.score_for(winner)));
            assert_eq!(state.card_count(), DECK_SIZE);
        }
    }
}

#[test]
fn test_random_opponent_self_play() {
    init_tracing();
    let mut engine = Engine::new(RuleConfig::all_computer(3).with_seed(99))
        .unwrap()
        .with_random_opponent();
    engine.run_computer_turns();

    assert!(engine.state().is_over());
}

/// Always asks for a card that does not exist.
struct Broken;

impl OpponentStrategy for Broken {
    fn choose_action(&mut self, _hand: &[Card], _state: &TableState, _me: PlayerId) -> StrategyChoice {
        StrategyChoice::Play(99)
    }
}

#[test]
fn test_illegal_strategy_choice_falls_back_to_draw() {
    let rules = RuleConfig::new(2).with_seats(vec![SeatKind::Computer, SeatKind::Human]);
    let mut engine = start(
        TableSetup::new(rules)
            .hand(p(0), vec![red(1), red(2)])
            .top_card(red(5))
            .next_draws(vec![red(7)]),
    )
    .with_strategy(Broken);

    let events = engine.play_computer_turn().unwrap();

    assert!(events.contains(&GameEvent::CardPlayed { player: p(0), card: red(7) }));
    assert_eq!(engine.state().hand(p(0)).len(), 2);
}

#[test]
fn test_snapshot_hides_computer_hand() {
    let engine = start(versus_computer());

    let view = engine.snapshot(Some(p(0)));
    assert_eq!(view.own_hand().map(<[Card]>::len), Some(7));
    assert_eq!(view.hands[1], HandView::Hidden { count: 7 });

    let spectator = engine.snapshot(None);
    assert!(spectator.hands.iter().all(|h| h.cards().is_none()));
    assert_eq!(spectator.own_hand(), None);
}
