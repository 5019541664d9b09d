//! The game: state machine, action dispatch, trick resolution.
//!
//! A `Game` owns all game truth - card custody, turn order, legality,
//! scoring - and is driven entirely through its dispatch entry points by
//! an external transport. The engine is synchronous and single-threaded:
//! each action runs read-validate-mutate-respond to completion, and a
//! caller that dispatches from several sources must serialize access
//! itself.
//!
//! Lifecycle: `Init` (roster building) -> `PlayerTurn` (one action at a
//! time) -> `End` (monte call, or every hand played out). `Error` is
//! terminal and reached only through configuration failures.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::GameError;
use super::settings::GameSettings;
use crate::cards::{Card, Deck, Rank, Thirds};
use crate::core::{
    Accepted, Action, BussoCall, EntropySource, MonteClaim, Player, Rejected, Response, Seat,
    Table, MAX_PLAYERS,
};

/// Pairwise swaps performed on the stock at construction.
const SCRAMBLE_ROUNDS: usize = 1000;

/// Declaration bonuses, in thirds of a point.
const NAPOLI_BONUS: Thirds = 9;
const BONGIOCO_BONUS: Thirds = 9;
const STELLA_BONUS: Thirds = 12;

/// Lifecycle state of a game instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Roster building; no actions accepted yet.
    Init,
    /// Hands dealt, processing one action at a time.
    PlayerTurn,
    /// Hand over (monte, or all cards played).
    End,
    /// Invalid configuration; terminal, accepts nothing.
    Error,
}

/// The rules engine for one hand of Tressette.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    state: GameState,
    settings: GameSettings,
    players: SmallVec<[Player; MAX_PLAYERS]>,
    current_player: Seat,
    /// Seat that played the current trick's first card. Captured when the
    /// trick opens, before any turn advancement, so the winner seat can be
    /// computed as `(leader + winning_index) % players_len`.
    trick_leader: Seat,
    stock: Deck,
    table: Table,
}

impl Game {
    /// Create a game in `Init` with a freshly scrambled stock.
    ///
    /// The entropy source is consumed here and never retained; the engine
    /// draws no randomness after construction.
    #[must_use]
    pub fn new(settings: GameSettings, source: &mut impl EntropySource) -> Self {
        let mut stock = Deck::canonical();
        stock.scramble(SCRAMBLE_ROUNDS, source);

        Self {
            state: GameState::Init,
            settings,
            players: SmallVec::new(),
            current_player: Seat::new(0),
            trick_leader: Seat::new(0),
            stock,
            table: Table::new(),
        }
    }

    /// Hand size dealt to each player at a given table size.
    ///
    /// Only 2, 3, 4, 5 and 8 players have defined hand sizes; any other
    /// count is a configuration error.
    #[must_use]
    pub const fn hand_len_for(players_len: usize) -> Option<usize> {
        match players_len {
            2 => Some(10),
            3 => Some(13),
            4 => Some(10),
            5 => Some(8),
            8 => Some(5),
            _ => None,
        }
    }

    // === Roster ===

    /// Seat a new player and return their seat index.
    ///
    /// Joining is only possible before `start`; seats are never vacated.
    pub fn add_player(&mut self) -> Result<Seat, GameError> {
        if self.state != GameState::Init {
            return Err(GameError::JoinClosed);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::TableFull);
        }

        self.players.push(Player::new());
        Ok(Seat::new((self.players.len() - 1) as u8))
    }

    /// Deal hands and open play. Seat 0 leads the first trick.
    ///
    /// Any failure is fatal: the game moves to `Error`, which rejects all
    /// subsequent dispatches, and the cause is returned. This includes
    /// calling `start` a second time. Cards left undealt (20 at two
    /// players, 1 at three; none otherwise) stay in the stock and sit out
    /// the hand, so the 40-card custody invariant holds at every table
    /// size.
    pub fn start(&mut self) -> Result<(), GameError> {
        if let Err(err) = self.deal() {
            warn!("start failed: {err}");
            self.state = GameState::Error;
            return Err(err);
        }

        self.state = GameState::PlayerTurn;
        self.current_player = Seat::new(0);
        self.trick_leader = Seat::new(0);
        debug!(
            "dealt {} cards each to {} players, {} left in stock",
            self.players[0].hand_len(),
            self.players.len(),
            self.stock.len()
        );
        Ok(())
    }

    fn deal(&mut self) -> Result<(), GameError> {
        if self.state != GameState::Init {
            return Err(GameError::AlreadyStarted);
        }
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let hand_len = Self::hand_len_for(self.players.len())
            .ok_or(GameError::UnsupportedPlayerCount(self.players.len()))?;

        for player in &mut self.players {
            for _ in 0..hand_len {
                let card = self.stock.draw().ok_or(GameError::StockExhausted)?;
                player.add_to_hand(card);
            }
        }
        Ok(())
    }

    // === Dispatch ===

    /// Apply one action for the seat that currently owns the turn.
    ///
    /// Rejects everything with `NotPlaying` unless the game is mid-hand.
    pub fn dispatch(&mut self, action: Action) -> Response {
        if self.state != GameState::PlayerTurn {
            return Rejected::NotPlaying.into();
        }

        match action {
            Action::Play(card) => self.apply_play(card),
            Action::Busso(call) => self.apply_busso(call),
            Action::Monte(claim) => self.apply_monte(claim),
        }
    }

    /// Like [`Game::dispatch`], but first checks that `seat` owns the
    /// turn, answering `AuthMismatch` otherwise.
    ///
    /// "Authentication" here means only seat-equals-turn; binding a
    /// transport session to a seat index is the transport's problem.
    pub fn dispatch_authenticated(&mut self, seat: Seat, action: Action) -> Response {
        if seat != self.current_player {
            return Rejected::AuthMismatch.into();
        }
        self.dispatch(action)
    }

    /// Wire entry point: one action byte in, one response byte out.
    ///
    /// A byte that doesn't decode answers `UnknownCommand` - but only
    /// after the state check, so a stopped game still answers
    /// `NotPlaying` to garbage.
    pub fn dispatch_wire(&mut self, raw: u8) -> u8 {
        if self.state != GameState::PlayerTurn {
            return Response::from(Rejected::NotPlaying).encode();
        }

        let response = match Action::decode(raw) {
            Some(action) => self.dispatch(action),
            None => Rejected::UnknownCommand.into(),
        };
        response.encode()
    }

    /// Wire entry point with the seat check of
    /// [`Game::dispatch_authenticated`].
    pub fn dispatch_authenticated_wire(&mut self, seat: Seat, raw: u8) -> u8 {
        if seat != self.current_player {
            return Response::from(Rejected::AuthMismatch).encode();
        }
        self.dispatch_wire(raw)
    }

    // === Handlers ===

    /// Suit-following rule: the trick's first card is always legal and
    /// establishes the led suit; after that, a player holding the led
    /// suit must play it, and a player void in it may play anything
    /// ("piombo").
    fn apply_play(&mut self, card: Card) -> Response {
        let seat = self.current_player;
        let player = &self.players[seat.index()];

        if !player.has_card(card) {
            return Rejected::NoSuchCard.into();
        }

        let accepted = match self.table.led_suit() {
            None => Accepted::FirstOfTrick,
            Some(led) if card.suit() == led => Accepted::FollowedSuit,
            Some(led) if player.has_suit(led) => return Rejected::IllegalPlay.into(),
            Some(_) => Accepted::Piombo,
        };

        if accepted == Accepted::FirstOfTrick {
            self.trick_leader = seat;
        }

        self.players[seat.index()].remove_card(card);
        self.table.play(card);
        debug!("{seat} plays {card}");

        if self.table.len() == self.players.len() {
            self.resolve_trick();
        } else {
            self.current_player = seat.next(self.players.len());
        }

        accepted.into()
    }

    /// Move the completed trick to the winner's capture pile; the winner
    /// leads next. Once every hand is empty the game is over.
    fn resolve_trick(&mut self) {
        let offset = self.table.winning_index();
        let winner = Seat::new(((self.trick_leader.index() + offset) % self.players.len()) as u8);

        let trick = self.table.take();
        self.players[winner.index()].capture(trick);
        self.current_player = winner;
        self.trick_leader = winner;
        debug!("trick to {winner}");

        if self.players.iter().all(|p| p.hand_len() == 0) {
            self.state = GameState::End;
            debug!("all hands played out");
        }
    }

    fn apply_busso(&mut self, call: BussoCall) -> Response {
        if !self.settings.busso_enabled {
            return Rejected::DeclarationsDisabled.into();
        }

        let seat = self.current_player;
        let player = &self.players[seat.index()];

        if player.declarations().is_disabled() {
            return Rejected::DeclarationsDisabled.into();
        }
        if player.declarations().is_declared(call) {
            return Rejected::AlreadyDeclared.into();
        }
        if !holds_call(player, call) {
            return Rejected::ClaimNotHeld.into();
        }

        let bonus = call_bonus(call);
        self.players[seat.index()].record_declaration(call, bonus);
        debug!("{seat} declares {call:?}, +{bonus} thirds");
        Accepted::Declared.into()
    }

    fn apply_monte(&mut self, claim: MonteClaim) -> Response {
        if !self.settings.monte_enabled {
            return Rejected::DeclarationsDisabled.into();
        }
        if !holds_claim(&self.players[self.current_player.index()], claim) {
            return Rejected::ClaimNotHeld.into();
        }

        self.state = GameState::End;
        debug!("{} calls monte, hand abandoned", self.current_player);
        Accepted::MonteCalled.into()
    }

    // === Queries ===

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// The construction-time settings.
    #[must_use]
    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The seat that owns the turn.
    #[must_use]
    pub fn current_player(&self) -> Seat {
        self.current_player
    }

    /// The in-progress trick.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Cards left in the undealt stock.
    #[must_use]
    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    /// A seated player. Panics for a seat that was never dealt in.
    #[must_use]
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Iterate players with their seats, in join order.
    pub fn players(&self) -> impl Iterator<Item = (Seat, &Player)> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, p)| (Seat::new(i as u8), p))
    }

    /// Switch off declarations for one player (e.g. as a table penalty).
    pub fn disable_declarations(&mut self, seat: Seat) {
        self.players[seat.index()].disable_declarations();
    }

    /// A seat's trick points so far, in thirds, under the active variant.
    #[must_use]
    pub fn captured_thirds(&self, seat: Seat) -> Thirds {
        self.player(seat).captured().thirds(self.settings.scoring)
    }

    /// A seat's trick points so far, in whole points (truncating).
    #[must_use]
    pub fn captured_points(&self, seat: Seat) -> u16 {
        self.player(seat).captured().points(self.settings.scoring)
    }

    /// Combined trick points of one partnership, in thirds.
    ///
    /// Partnerships are alternating seats: team 0 holds the even seats,
    /// team 1 the odd ones. Only meaningful with the teams flag set and
    /// an even player count.
    #[must_use]
    pub fn team_captured_thirds(&self, team: u8) -> Thirds {
        self.players()
            .filter(|(seat, _)| seat.0 % 2 == team)
            .map(|(seat, _)| self.captured_thirds(seat))
            .sum()
    }
}

/// Is the declared holding actually in the hand?
fn holds_call(player: &Player, call: BussoCall) -> bool {
    match call {
        BussoCall::Napoli(suit) => [Rank::Asso, Rank::Due, Rank::Tre]
            .iter()
            .all(|&rank| player.has_card(Card::new(suit, rank))),
        BussoCall::Bongioco(rank) => player.count_in_hand(|c| c.rank() == rank.rank()) >= 3,
        BussoCall::Stella(rank) => player.count_in_hand(|c| c.rank() == rank.rank()) == 4,
    }
}

fn holds_claim(player: &Player, claim: MonteClaim) -> bool {
    match claim {
        MonteClaim::TreSette => player.count_in_hand(|c| c.rank() == Rank::Tre) >= 3,
        // Exactly one ace and one figure, and no other card worth
        // anything: the whole hand is worth one point and a third.
        MonteClaim::PuntoFigura => {
            let aces = player.count_in_hand(|c| c.rank() == Rank::Asso);
            let figures = player.count_in_hand(|c| c.rank().is_figure());
            let counters = player.count_in_hand(|c| matches!(c.rank(), Rank::Due | Rank::Tre));
            aces == 1 && figures == 1 && counters == 0
        }
    }
}

const fn call_bonus(call: BussoCall) -> Thirds {
    match call {
        BussoCall::Napoli(_) => NAPOLI_BONUS,
        BussoCall::Bongioco(_) => BONGIOCO_BONUS,
        BussoCall::Stella(_) => STELLA_BONUS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use crate::core::GameRng;

    fn started_game(players: usize, seed: u64) -> Game {
        let mut rng = GameRng::new(seed);
        let mut game = Game::new(GameSettings::new(), &mut rng);
        for _ in 0..players {
            game.add_player().unwrap();
        }
        game.start().unwrap();
        game
    }

    /// Any card the current player may legally play.
    fn legal_card(game: &Game) -> Card {
        let hand = game.player(game.current_player()).hand();
        match game.table().led_suit() {
            Some(led) => hand
                .iter()
                .copied()
                .find(|c| c.suit() == led)
                .unwrap_or(hand[0]),
            None => hand[0],
        }
    }

    #[test]
    fn test_new_game_is_init() {
        let mut rng = GameRng::new(1);
        let game = Game::new(GameSettings::new(), &mut rng);
        assert_eq!(game.state(), GameState::Init);
        assert_eq!(game.player_count(), 0);
        assert_eq!(game.stock_len(), 40);
    }

    #[test]
    fn test_add_player_assigns_seats_in_order() {
        let mut rng = GameRng::new(1);
        let mut game = Game::new(GameSettings::new(), &mut rng);
        assert_eq!(game.add_player(), Ok(Seat::new(0)));
        assert_eq!(game.add_player(), Ok(Seat::new(1)));
        assert_eq!(game.add_player(), Ok(Seat::new(2)));
    }

    #[test]
    fn test_add_player_capacity() {
        let mut rng = GameRng::new(1);
        let mut game = Game::new(GameSettings::new(), &mut rng);
        for _ in 0..8 {
            game.add_player().unwrap();
        }
        assert_eq!(game.add_player(), Err(GameError::TableFull));
    }

    #[test]
    fn test_add_player_rejected_after_start() {
        let mut game = started_game(4, 1);
        assert_eq!(game.add_player(), Err(GameError::JoinClosed));
    }

    #[test]
    fn test_start_with_no_players() {
        let mut rng = GameRng::new(1);
        let mut game = Game::new(GameSettings::new(), &mut rng);
        assert_eq!(game.start(), Err(GameError::NoPlayers));
        assert_eq!(game.state(), GameState::Error);
    }

    #[test]
    fn test_start_with_unsupported_count() {
        for players in [1usize, 6, 7] {
            let mut rng = GameRng::new(1);
            let mut game = Game::new(GameSettings::new(), &mut rng);
            for _ in 0..players {
                game.add_player().unwrap();
            }
            assert_eq!(game.start(), Err(GameError::UnsupportedPlayerCount(players)));
            assert_eq!(game.state(), GameState::Error);
            // No cards were kept by anyone.
            for seat in Seat::all(players) {
                assert_eq!(game.player(seat).hand_len(), 0);
            }
        }
    }

    #[test]
    fn test_error_state_rejects_dispatch() {
        let mut rng = GameRng::new(1);
        let mut game = Game::new(GameSettings::new(), &mut rng);
        game.add_player().unwrap();
        let _ = game.start();

        let response = game.dispatch(Action::Monte(MonteClaim::TreSette));
        assert_eq!(response, Response::Rejected(Rejected::NotPlaying));
    }

    #[test]
    fn test_double_start_is_fatal() {
        let mut game = started_game(4, 1);
        assert_eq!(game.start(), Err(GameError::AlreadyStarted));
        assert_eq!(game.state(), GameState::Error);
    }

    #[test]
    fn test_deal_sizes() {
        for (players, hand_len, residue) in
            [(2, 10, 20), (3, 13, 1), (4, 10, 0), (5, 8, 0), (8, 5, 0)]
        {
            let game = started_game(players, 42);
            for seat in Seat::all(players) {
                assert_eq!(game.player(seat).hand_len(), hand_len);
            }
            assert_eq!(game.stock_len(), residue);
            assert_eq!(game.current_player(), Seat::new(0));
            assert_eq!(game.state(), GameState::PlayerTurn);
        }
    }

    #[test]
    fn test_deal_is_deterministic() {
        let a = started_game(4, 7);
        let b = started_game(4, 7);
        for seat in Seat::all(4) {
            assert_eq!(a.player(seat).hand(), b.player(seat).hand());
        }
    }

    #[test]
    fn test_auth_mismatch_mutates_nothing() {
        let mut game = started_game(3, 5);
        let before = game.clone();

        for seat in [Seat::new(1), Seat::new(2), Seat::new(7)] {
            let card = game.player(Seat::new(0)).hand()[0];
            let response = game.dispatch_authenticated(seat, Action::Play(card));
            assert_eq!(response, Response::Rejected(Rejected::AuthMismatch));
        }
        assert_eq!(game, before);
    }

    #[test]
    fn test_play_card_not_held() {
        let mut game = started_game(2, 5);
        let absent = game.player(Seat::new(1)).hand()[0];
        // Seat 1's card can't be in seat 0's hand: the deck is unique.
        let response = game.dispatch(Action::Play(absent));
        assert_eq!(response, Response::Rejected(Rejected::NoSuchCard));
        assert!(game.table().is_empty());
    }

    #[test]
    fn test_first_play_of_trick() {
        let mut game = started_game(4, 5);
        let card = game.player(Seat::new(0)).hand()[0];

        let response = game.dispatch_authenticated(Seat::new(0), Action::Play(card));
        assert_eq!(response, Response::Accepted(Accepted::FirstOfTrick));
        assert_eq!(game.table().cards(), &[card]);
        assert_eq!(game.current_player(), Seat::new(1));
        assert_eq!(game.player(Seat::new(0)).hand_len(), 9);
    }

    #[test]
    fn test_must_follow_led_suit() {
        // Search seeds for a second player who holds the led suit and at
        // least one other suit, then try to renege.
        'seeds: for seed in 0..50 {
            let mut game = started_game(4, seed);
            let lead = legal_card(&game);
            game.dispatch(Action::Play(lead));

            let led = game.table().led_suit().unwrap();
            let hand = game.player(Seat::new(1)).hand().to_vec();
            let offsuit = hand.iter().copied().find(|c| c.suit() != led);
            let holds_led = hand.iter().any(|c| c.suit() == led);

            if let (Some(offsuit), true) = (offsuit, holds_led) {
                let response = game.dispatch(Action::Play(offsuit));
                assert_eq!(response, Response::Rejected(Rejected::IllegalPlay));
                // The hand is untouched and it is still seat 1's turn.
                assert_eq!(game.current_player(), Seat::new(1));
                assert_eq!(game.player(Seat::new(1)).hand_len(), 10);

                let follow = hand.iter().copied().find(|c| c.suit() == led).unwrap();
                let response = game.dispatch(Action::Play(follow));
                assert_eq!(response, Response::Accepted(Accepted::FollowedSuit));
                return;
            }
            continue 'seeds;
        }
        panic!("no seed produced a hand that could renege");
    }

    #[test]
    fn test_void_plays_free() {
        // A player void in the led suit may play anything.
        'seeds: for seed in 0..200 {
            let mut game = started_game(4, seed);
            let lead = legal_card(&game);
            game.dispatch(Action::Play(lead));

            let led = game.table().led_suit().unwrap();
            let hand = game.player(Seat::new(1)).hand().to_vec();
            if hand.iter().any(|c| c.suit() == led) {
                continue 'seeds;
            }

            let response = game.dispatch(Action::Play(hand[0]));
            assert_eq!(response, Response::Accepted(Accepted::Piombo));
            return;
        }
        panic!("no seed produced a void hand");
    }

    #[test]
    fn test_trick_completion() {
        let mut game = started_game(4, 11);
        for _ in 0..4 {
            let seat = game.current_player();
            let card = legal_card(&game);
            let response = game.dispatch_authenticated(seat, Action::Play(card));
            assert!(response.is_accepted(), "{response}");
        }

        // Table cleared, winner holds the trick and leads the next one.
        assert!(game.table().is_empty());
        let winner = game.current_player();
        assert_eq!(game.player(winner).captured().len(), 4);
        let total: usize = game.players().map(|(_, p)| p.captured().len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_full_hand_reaches_end() {
        let mut game = started_game(4, 3);
        let mut plays = 0;
        while game.state() == GameState::PlayerTurn {
            let seat = game.current_player();
            let response = game.dispatch_authenticated(seat, Action::Play(legal_card(&game)));
            assert!(response.is_accepted(), "{response}");
            plays += 1;
            assert!(plays <= 40, "game failed to terminate");
        }

        assert_eq!(game.state(), GameState::End);
        assert_eq!(plays, 40);

        // Every card ends up in someone's capture pile...
        let total: usize = game.players().map(|(_, p)| p.captured().len()).sum();
        assert_eq!(total, 40);
        // ...and the deck's 11 points went somewhere.
        let thirds: Thirds = Seat::all(4).map(|s| game.captured_thirds(s)).sum();
        assert_eq!(thirds, 33);

        // Nothing more is accepted.
        let response = game.dispatch(Action::Monte(MonteClaim::TreSette));
        assert_eq!(response, Response::Rejected(Rejected::NotPlaying));
    }

    #[test]
    fn test_busso_rejected_when_disabled() {
        let mut game = started_game(4, 3);
        let response = game.dispatch(Action::Busso(BussoCall::Napoli(Suit::Spade)));
        assert_eq!(response, Response::Rejected(Rejected::DeclarationsDisabled));
    }

    #[test]
    fn test_monte_rejected_when_disabled() {
        let mut game = started_game(4, 3);
        let response = game.dispatch(Action::Monte(MonteClaim::TreSette));
        assert_eq!(response, Response::Rejected(Rejected::DeclarationsDisabled));
    }

    #[test]
    fn test_team_thirds_split_by_parity() {
        let mut game = started_game(4, 9);
        while game.state() == GameState::PlayerTurn {
            let seat = game.current_player();
            game.dispatch_authenticated(seat, Action::Play(legal_card(&game)));
        }
        let even = game.team_captured_thirds(0);
        let odd = game.team_captured_thirds(1);
        assert_eq!(even + odd, 33);
        assert_eq!(
            even,
            game.captured_thirds(Seat::new(0)) + game.captured_thirds(Seat::new(2))
        );
    }

    #[test]
    fn test_wire_dispatch() {
        let mut game = started_game(2, 21);
        let card = game.player(Seat::new(0)).hand()[0];

        let byte = game.dispatch_authenticated_wire(Seat::new(0), Action::Play(card).encode());
        assert_eq!(
            Response::decode(byte),
            Some(Response::Accepted(Accepted::FirstOfTrick))
        );

        // Garbage gets UnknownCommand while playing...
        let byte = game.dispatch_wire(0xC0);
        assert_eq!(
            Response::decode(byte),
            Some(Response::Rejected(Rejected::UnknownCommand))
        );

        // ...but a wrong seat is caught before anything else.
        let byte = game.dispatch_authenticated_wire(Seat::new(5), 0xC0);
        assert_eq!(
            Response::decode(byte),
            Some(Response::Rejected(Rejected::AuthMismatch))
        );
    }

    #[test]
    fn test_serialization() {
        let game = started_game(4, 13);
        let json = serde_json::to_string(&game).unwrap();
        let deserialized: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(game, deserialized);
    }
}
