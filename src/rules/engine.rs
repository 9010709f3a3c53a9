//! The rules engine.
//!
//! `Engine` owns one `TableState` and is the only code that mutates it.
//! Every intent is validated in full before anything changes, so a
//! rejected intent leaves the table untouched. After every applied intent
//! the engine asserts that all 108 cards are still accounted for.
//!
//! ## Phases
//!
//! - `AwaitingMove`: the current seat plays or draws; others may jump in
//! - `AwaitingColorChoice`: a wild was played; its effect waits for the color
//! - `AwaitingSpecialCallWindow`: the last mover holds one card without
//!   having called; the next other seat to act triggers the penalty
//! - `Terminal`: a hand is empty; every mutating intent fails
//!
//! Computer seats are driven by a pluggable `OpponentStrategy`.

use tracing::{debug, info, warn};

use super::legality;
use super::outcome::Outcome;
use super::setup::{SetupError, TableSetup};
use crate::cards::deck::{validate_composition, DECK_SIZE};
use crate::cards::{Card, Color, Rank};
use crate::core::action::{Intent, IntentKind, IntentRecord};
use crate::core::config::{ConfigError, RuleConfig};
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::snapshot::TableSnapshot;
use crate::core::state::{Phase, TableState};
use crate::events::GameEvent;
use crate::opponents::{OpponentStrategy, PriorityStrategy, RandomStrategy, StrategyChoice};

/// Upper bound on computer turns run back to back by one call.
const MAX_COMPUTER_TURNS: usize = 5_000;

/// Authoritative engine for one table.
pub struct Engine {
    state: TableState,
    strategy: Box<dyn OpponentStrategy>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Deal a new game.
    ///
    /// ```
    /// use uno_engine::core::{PlayerId, RuleConfig};
    /// use uno_engine::rules::Engine;
    ///
    /// let engine = Engine::new(RuleConfig::new(3).with_seed(11)).unwrap();
    /// assert_eq!(engine.state().hand_sizes(), vec![7, 7, 7]);
    /// assert_eq!(engine.state().current_player(), PlayerId::new(0));
    /// ```
    pub fn new(rules: RuleConfig) -> Result<Self, SetupError> {
        TableSetup::new(rules).build().map(Self::from_state)
    }

    /// Start a game from a prepared table.
    #[must_use]
    pub fn from_state(state: TableState) -> Self {
        info!(
            players = state.player_count(),
            seed = state.rules().seed,
            top = ?state.top_card(),
            "game started"
        );
        Self::with_state(state)
    }

    fn with_state(state: TableState) -> Self {
        Self {
            state,
            strategy: Box::new(PriorityStrategy::new()),
        }
    }

    /// Replace the strategy used for computer seats.
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl OpponentStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Use uniformly random legal plays for computer seats.
    #[must_use]
    pub fn with_random_opponent(self) -> Self {
        let rng = self.state.rng.for_context("opponent");
        self.with_strategy(RandomStrategy::new(rng))
    }

    /// The table.
    #[must_use]
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// View of the table for `viewer`; `None` hides every hand.
    #[must_use]
    pub fn snapshot(&self, viewer: Option<PlayerId>) -> TableSnapshot {
        TableSnapshot::for_viewer(&self.state, viewer)
    }

    /// Every intent `player` could submit right now without being rejected.
    #[must_use]
    pub fn legal_intents(&self, player: PlayerId) -> Vec<Intent> {
        let state = &self.state;
        let mut intents = Vec::new();
        if state.is_over() || !state.hands.contains(player) {
            return intents;
        }

        if state.hand(player).len() == 1 {
            intents.push(Intent::declare(player));
        }

        match state.phase {
            Phase::AwaitingColorChoice { player: chooser } => {
                if chooser == player {
                    intents.extend(
                        Color::CHOOSABLE
                            .into_iter()
                            .map(|color| Intent::choose_color(player, color)),
                    );
                }
            }
            _ if player == state.current => {
                intents.extend(
                    state
                        .playable_indices(player)
                        .into_iter()
                        .map(|index| Intent::play(player, index)),
                );
                intents.push(Intent::draw(player));
            }
            _ => {
                intents.extend(
                    state
                        .hand(player)
                        .iter()
                        .enumerate()
                        .filter(|&(_, &card)| legality::can_jump_in(state, card))
                        .map(|(index, _)| Intent::play(player, index)),
                );
            }
        }

        intents
    }

    /// Apply one intent and return what happened.
    ///
    /// Computer seats do not move; see `submit` for that.
    pub fn apply(&mut self, intent: Intent) -> Result<Vec<GameEvent>, EngineError> {
        let mut events = Vec::new();

        // Recorded first so moves made on the intent's behalf follow it.
        self.record(intent, self.state.turn_number);
        let applied = match intent.kind {
            IntentKind::PlayCard { card_index } => {
                self.play_card(intent.player, card_index, &mut events)
            }
            IntentKind::DrawCard => self.draw_card(intent.player, &mut events),
            IntentKind::ChooseColor { color } => {
                self.choose_color(intent.player, color, &mut events)
            }
            IntentKind::DeclareSpecialCall => self.declare_special_call(intent.player, &mut events),
        };
        if let Err(error) = applied {
            self.state.history.pop_back();
            return Err(error);
        }

        debug!(
            player = %intent.player,
            kind = ?intent.kind,
            events = events.len(),
            "applied intent"
        );
        self.check_conservation();
        Ok(events)
    }

    /// Apply an intent, then let computer seats move if the rules say so.
    pub fn submit(&mut self, intent: Intent) -> Outcome {
        let viewer = self.state.hands.contains(intent.player).then_some(intent.player);

        match self.apply(intent) {
            Ok(mut events) => {
                if self.state.rules.auto_play_computers && !self.human_call_pending() {
                    events.extend(self.run_computer_turns());
                }
                Outcome::success(self.snapshot(viewer), events)
            }
            Err(error) => {
                debug!(player = %intent.player, %error, "rejected intent");
                Outcome::failure(self.snapshot(viewer), error)
            }
        }
    }

    /// Check whether a computer seat should move now.
    ///
    /// False once the game is over and while a human is current or owes a
    /// color. An open call window does not stop a computer seat; its move
    /// applies the penalty.
    #[must_use]
    pub fn computer_to_act(&self) -> bool {
        let rules = &self.state.rules;
        match self.state.phase {
            Phase::Terminal { .. } => false,
            Phase::AwaitingColorChoice { player } => rules.is_computer(player),
            Phase::AwaitingMove | Phase::AwaitingSpecialCallWindow { .. } => {
                rules.is_computer(self.state.current)
            }
        }
    }

    /// Check whether a human sits in an open call window.
    ///
    /// `submit` does not auto-play computers while this holds, so the
    /// human still gets to declare.
    #[must_use]
    pub fn human_call_pending(&self) -> bool {
        matches!(
            self.state.phase,
            Phase::AwaitingSpecialCallWindow { player } if !self.state.rules.is_computer(player)
        )
    }

    /// Run computer turns until `computer_to_act` is false.
    pub fn run_computer_turns(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut turns = 0;

        while self.computer_to_act() {
            if turns == MAX_COMPUTER_TURNS {
                warn!(turns, "computer turn limit reached");
                break;
            }
            match self.play_computer_turn() {
                Ok(turn_events) => events.extend(turn_events),
                Err(error) => {
                    warn!(%error, "computer turn rejected");
                    break;
                }
            }
            turns += 1;
        }

        events
    }

    /// Play one complete turn for the computer seat that is due to act.
    ///
    /// Closes an open call window first, even one held by a human.
    pub fn play_computer_turn(&mut self) -> Result<Vec<GameEvent>, EngineError> {
        if self.state.is_over() {
            return Err(EngineError::GameAlreadyOver);
        }
        let mut events = Vec::new();

        if let Phase::AwaitingColorChoice { player } = self.state.phase {
            if !self.state.rules.is_computer(player) {
                return Err(EngineError::ColorChoicePending);
            }
            self.computer_choose_color(player, &mut events);
            self.check_conservation();
            return Ok(events);
        }

        let me = self.state.current;
        if !self.state.rules.is_computer(me) {
            return Err(EngineError::NotYourTurn);
        }
        self.close_call_window(me, &mut events);

        let choice = self.strategy.choose_action(self.state.hand(me), &self.state, me);
        let play = match choice {
            StrategyChoice::Play(index) => {
                let legal = self
                    .state
                    .hand(me)
                    .get(index)
                    .is_some_and(|&card| legality::check_play(&self.state, card).is_ok());
                if !legal {
                    warn!(player = %me, index, "strategy chose an illegal card, drawing instead");
                }
                legal.then_some(index)
            }
            StrategyChoice::Draw => None,
        };
        debug!(player = %me, ?choice, "computer turn");

        match play {
            Some(index) => {
                self.record(Intent::play(me, index), self.state.turn_number);
                self.computer_play(me, index, &mut events);
            }
            None => {
                self.record(Intent::draw(me), self.state.turn_number);
                if self.state.pending_draw > 0 {
                    self.pay_pending(me, &mut events);
                } else {
                    self.computer_free_draw(me, &mut events);
                }
            }
        }

        self.check_conservation();
        Ok(events)
    }

    /// Encode the table for later `restore`.
    pub fn checkpoint(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(&self.state)
    }

    /// Resume from a `checkpoint`. Computer seats get the default strategy.
    pub fn restore(bytes: &[u8]) -> Result<Self, SetupError> {
        let state: TableState = bincode::deserialize(bytes)?;
        state.rules.validate()?;
        if state.player_count() != state.rules.player_count {
            return Err(ConfigError::SeatCount {
                expected: state.rules.player_count,
                actual: state.player_count(),
            }
            .into());
        }
        if state.vulnerable.player_count() != state.rules.player_count {
            return Err(ConfigError::SeatCount {
                expected: state.rules.player_count,
                actual: state.vulnerable.player_count(),
            }
            .into());
        }
        for seat in std::iter::once(state.current).chain(state.phase.player()) {
            if !state.hands.contains(seat) {
                return Err(SetupError::UnknownSeat(seat));
            }
        }
        let cards: Vec<Card> = state.cards().collect();
        validate_composition(&cards)?;

        debug!(turn = state.turn_number, "restored table");
        Ok(Self::with_state(state))
    }

    // === Intents ===

    fn play_card(
        &mut self,
        player: PlayerId,
        index: usize,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), EngineError> {
        let jump_in = self.validate_play(player, index)?;
        self.close_call_window(player, events);
        self.play_validated(player, index, jump_in, events);
        Ok(())
    }

    /// Returns whether the play is a jump-in.
    fn validate_play(&self, player: PlayerId, index: usize) -> Result<bool, EngineError> {
        let state = &self.state;
        if state.is_over() {
            return Err(EngineError::GameAlreadyOver);
        }
        let hand = state
            .hands
            .get(player)
            .ok_or(EngineError::UnknownPlayer { player })?;
        if matches!(state.phase, Phase::AwaitingColorChoice { .. }) {
            return Err(EngineError::ColorChoicePending);
        }
        let card = *hand.get(index).ok_or(EngineError::InvalidCard)?;

        if player != state.current {
            return if legality::can_jump_in(state, card) {
                Ok(true)
            } else {
                Err(EngineError::NotYourTurn)
            };
        }
        legality::check_play(state, card)?;
        Ok(false)
    }

    fn draw_card(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) -> Result<(), EngineError> {
        let state = &self.state;
        if state.is_over() {
            return Err(EngineError::GameAlreadyOver);
        }
        if !state.hands.contains(player) {
            return Err(EngineError::UnknownPlayer { player });
        }
        if matches!(state.phase, Phase::AwaitingColorChoice { .. }) {
            return Err(EngineError::ColorChoicePending);
        }
        if player != state.current {
            return Err(EngineError::NotYourTurn);
        }

        self.close_call_window(player, events);

        if self.state.pending_draw > 0 {
            self.pay_pending(player, events);
        } else if self.state.drawn_this_turn.is_some() {
            events.push(GameEvent::TurnEnded { player });
            self.advance_turn(player, 0, events);
        } else if self.state.rules.is_computer(player) {
            self.computer_free_draw(player, events);
        } else {
            self.human_free_draw(player, events);
        }
        Ok(())
    }

    fn choose_color(
        &mut self,
        player: PlayerId,
        color: Color,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), EngineError> {
        if self.state.is_over() {
            return Err(EngineError::GameAlreadyOver);
        }
        if !self.state.hands.contains(player) {
            return Err(EngineError::UnknownPlayer { player });
        }
        if self.state.phase != (Phase::AwaitingColorChoice { player }) || color.is_wild() {
            return Err(EngineError::InvalidColorChoice);
        }

        self.apply_color(player, color, events);
        Ok(())
    }

    fn declare_special_call(
        &mut self,
        player: PlayerId,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), EngineError> {
        let held = self
            .state
            .hands
            .get(player)
            .ok_or(EngineError::UnknownPlayer { player })?
            .len();
        if held == 0 {
            return Err(EngineError::AlreadyWon);
        }
        if self.state.is_over() {
            return Err(EngineError::GameAlreadyOver);
        }
        if held != 1 {
            return Err(EngineError::InvalidCall);
        }

        self.state.vulnerable[player] = false;
        if self.state.phase == (Phase::AwaitingSpecialCallWindow { player }) {
            self.state.phase = Phase::AwaitingMove;
        }
        events.push(GameEvent::SpecialCallDeclared { player });
        Ok(())
    }

    // === Transitions ===

    /// Move a validated card from `player`'s hand to the discard pile.
    fn play_validated(
        &mut self,
        player: PlayerId,
        index: usize,
        jump_in: bool,
        events: &mut Vec<GameEvent>,
    ) {
        let card = self.state.hands[player].remove(index);
        self.state.piles.discard(card);
        self.state.drawn_this_turn = None;

        if jump_in {
            self.state.current = player;
            events.push(GameEvent::JumpedIn { player, card });
        } else {
            events.push(GameEvent::CardPlayed { player, card });
        }

        match self.state.hands[player].len() {
            0 => {
                self.finish(player, events);
                return;
            }
            1 if self.state.rules.is_computer(player) => {
                self.state.vulnerable[player] = false;
                events.push(GameEvent::SpecialCallDeclared { player });
            }
            1 => self.state.vulnerable[player] = true,
            _ => {}
        }

        if card.is_wild() {
            self.state.phase = Phase::AwaitingColorChoice { player };
            return;
        }
        self.state.active_color = card.color;
        self.resolve_effect(card, player, events);
    }

    fn apply_color(&mut self, player: PlayerId, color: Color, events: &mut Vec<GameEvent>) {
        self.state.active_color = color;
        self.state.phase = Phase::AwaitingMove;
        events.push(GameEvent::ColorChosen { player, color });

        if let Some(top) = self.state.top_card() {
            self.resolve_effect(top, player, events);
        }
    }

    /// Apply `card`'s effect and pass the turn on from `actor`.
    fn resolve_effect(&mut self, card: Card, actor: PlayerId, events: &mut Vec<GameEvent>) {
        match card.rank {
            Rank::Skip => {
                let skipped = self.state.seat_after(actor, 0);
                events.push(GameEvent::PlayerSkipped { player: skipped });
                self.advance_turn(actor, 1, events);
            }
            Rank::Reverse => {
                self.state.direction = self.state.direction.reversed();
                events.push(GameEvent::DirectionReversed {
                    direction: self.state.direction,
                });
                if self.state.player_count() == 2 {
                    let skipped = self.state.seat_after(actor, 0);
                    events.push(GameEvent::PlayerSkipped { player: skipped });
                    self.advance_turn(actor, 1, events);
                } else {
                    self.advance_turn(actor, 0, events);
                }
            }
            Rank::DrawTwo | Rank::WildDrawFour => {
                self.state.pending_draw += card.rank.draw_penalty();
                events.push(GameEvent::DrawAccumulated {
                    total: self.state.pending_draw,
                });
                self.advance_turn(actor, 0, events);
            }
            Rank::Wild | Rank::Number(_) => self.advance_turn(actor, 0, events),
        }
    }

    fn advance_turn(&mut self, actor: PlayerId, skip_count: usize, events: &mut Vec<GameEvent>) {
        let next = self.state.seat_after(actor, skip_count);
        self.state.current = next;
        self.state.turn_number += 1;
        self.state.drawn_this_turn = None;
        self.state.phase = if self.state.is_vulnerable(actor) {
            Phase::AwaitingSpecialCallWindow { player: actor }
        } else {
            Phase::AwaitingMove
        };
        events.push(GameEvent::TurnStarted { player: next });
    }

    /// Close an open call window as `actor` starts acting. A different
    /// seat acting first costs the vulnerable player the penalty.
    fn close_call_window(&mut self, actor: PlayerId, events: &mut Vec<GameEvent>) {
        let Phase::AwaitingSpecialCallWindow { player } = self.state.phase else {
            return;
        };
        self.state.phase = Phase::AwaitingMove;

        if player != actor && self.state.is_vulnerable(player) {
            let penalty = self.state.rules.special_call_penalty;
            let drawn = self.draw_into(player, penalty, events);
            debug!(player = %player, drawn, "missed special call");
            events.push(GameEvent::PenaltyApplied { player, count: drawn });
        }
        self.state.vulnerable[player] = false;
    }

    fn finish(&mut self, winner: PlayerId, events: &mut Vec<GameEvent>) {
        let score = self.state.score_for(winner);
        self.state.winner_score = Some(score);
        self.state.phase = Phase::Terminal { winner };
        for flag in self.state.vulnerable.values_mut() {
            *flag = false;
        }

        info!(
            winner = %winner,
            score,
            turns = self.state.turn_number,
            "game won"
        );
        events.push(GameEvent::GameWon { player: winner, score });
    }

    // === Drawing ===

    /// Draw up to `count` cards into `player`'s hand, reshuffling as needed.
    /// Returns how many were actually drawn.
    fn draw_into(&mut self, player: PlayerId, count: u32, events: &mut Vec<GameEvent>) -> u32 {
        let mut drawn = 0;
        for _ in 0..count {
            match self.state.piles.draw(&mut self.state.rng) {
                Ok(taken) => {
                    if let Some(cards) = taken.reshuffled {
                        events.push(GameEvent::Reshuffled { cards });
                    }
                    self.state.hands[player].push(taken.card);
                    drawn += 1;
                }
                Err(error) => {
                    warn!(player = %player, wanted = count, drawn, %error, "draw impossible");
                    events.push(GameEvent::DrawUnavailable { player });
                    break;
                }
            }
        }

        if self.state.hands[player].len() != 1 {
            self.state.vulnerable[player] = false;
        }
        drawn
    }

    fn draw_one(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) -> Option<Card> {
        if self.draw_into(player, 1, events) == 0 {
            return None;
        }
        self.state.hand(player).last().copied()
    }

    fn pay_pending(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) {
        let owed = std::mem::take(&mut self.state.pending_draw);
        let drawn = self.draw_into(player, owed, events);
        if drawn > 0 {
            events.push(GameEvent::CardsDrawn { player, count: drawn });
        }
        self.advance_turn(player, 0, events);
    }

    /// One card; a playable card keeps the turn so it can be played.
    fn human_free_draw(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) {
        match self.draw_one(player, events) {
            Some(card) => {
                events.push(GameEvent::CardsDrawn { player, count: 1 });
                if legality::can_play(&self.state, card) {
                    self.state.drawn_this_turn = Some(card);
                } else {
                    self.advance_turn(player, 0, events);
                }
            }
            None => self.advance_turn(player, 0, events),
        }
    }

    /// Draw until something is playable, then play it.
    fn computer_free_draw(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) {
        let mut drawn = 0;
        loop {
            let Some(card) = self.draw_one(player, events) else {
                if drawn > 0 {
                    events.push(GameEvent::CardsDrawn { player, count: drawn });
                }
                self.advance_turn(player, 0, events);
                return;
            };
            drawn += 1;

            if legality::can_play(&self.state, card) {
                events.push(GameEvent::CardsDrawn { player, count: drawn });
                let index = self.state.hand(player).len() - 1;
                self.record(Intent::play(player, index), self.state.turn_number);
                self.computer_play(player, index, events);
                return;
            }
        }
    }

    fn computer_play(&mut self, player: PlayerId, index: usize, events: &mut Vec<GameEvent>) {
        self.play_validated(player, index, false, events);
        if self.state.phase == (Phase::AwaitingColorChoice { player }) {
            self.computer_choose_color(player, events);
        }
    }

    fn computer_choose_color(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) {
        let color = self.strategy.choose_color(self.state.hand(player));
        self.record(Intent::choose_color(player, color), self.state.turn_number);
        self.apply_color(player, color, events);
    }

    // === Bookkeeping ===

    fn record(&mut self, intent: Intent, turn: u32) {
        let sequence = self.state.history.len() as u32;
        self.state
            .history
            .push_back(IntentRecord::new(intent, turn, sequence));
    }

    fn check_conservation(&self) {
        assert_eq!(
            self.state.card_count(),
            DECK_SIZE,
            "card conservation violated"
        );
    }
}
