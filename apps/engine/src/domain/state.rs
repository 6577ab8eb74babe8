use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::domain::cards_types::{Card, CardId, Suit};
use crate::domain::deck::Deck;
use crate::domain::player::{Player, PlayerId};
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::errors::domain::{DomainError, ValidationKind};

/// Round phases, in strict forward order.
///
/// Tricks played during `Showdown` are tracked by the round's `turns`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Round created, nothing posted or dealt.
    Initial,
    /// Antes being posted, no cards dealt.
    #[serde(rename = "0Cards")]
    NoCards,
    /// First two cards dealt; trump is flipped and may be taken early.
    #[serde(rename = "2Cards")]
    TwoCards,
    /// Four cards dealt; auction, fold/stay and exchange.
    #[serde(rename = "4Cards")]
    FourCards,
    /// Trick play.
    Showdown,
    RoundOver,
    GameOver,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Initial => "Initial",
            Phase::NoCards => "0Cards",
            Phase::TwoCards => "2Cards",
            Phase::FourCards => "4Cards",
            Phase::Showdown => "Showdown",
            Phase::RoundOver => "RoundOver",
            Phase::GameOver => "GameOver",
        }
    }

    /// Nothing dealt yet.
    pub const fn is_pre_deal(self) -> bool {
        matches!(self, Phase::Initial | Phase::NoCards)
    }

    /// Waiting for settlement.
    pub const fn is_finished(self) -> bool {
        matches!(self, Phase::RoundOver | Phase::GameOver)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub card_id: CardId,
    pub player_id: PlayerId,
    /// 1-based position within the trick.
    pub sequence: u8,
}

/// One trick.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Whose play is awaited; `None` once the trick is resolved.
    pub next_player_id: Option<PlayerId>,
    pub winner_id: Option<PlayerId>,
    pub cards_played: Vec<PlayedCard>,
    /// Suit led, set by the first card played.
    pub suit: Option<Suit>,
}

impl Turn {
    pub fn led_by(player: PlayerId) -> Self {
        Self {
            next_player_id: Some(player),
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.winner_id.is_some()
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_number: u32,
    pub round_pot: i64,
    pub dealer: Option<PlayerId>,
    /// The card flipped as trump indicator; its suit is the trump suit.
    pub trump_card: Option<CardId>,
    /// Trump flipped face down; cleared when trick play starts.
    pub hidden_trump_suit: bool,
    pub trump_for_sale: bool,
    pub dealer_took_trump: bool,
    pub player_took_trump_id: Option<PlayerId>,
    pub state: Phase,
    /// Append-only within a round.
    pub turns: Vec<Turn>,
    /// Times this round was voided and redealt because nobody took trump.
    pub redeals: u32,
}

impl Round {
    pub fn new(round_number: u32, round_pot: i64, dealer: Option<PlayerId>) -> Self {
        Self {
            round_number,
            round_pot,
            dealer,
            trump_card: None,
            hidden_trump_suit: false,
            trump_for_sale: true,
            dealer_took_trump: false,
            player_took_trump_id: None,
            state: Phase::Initial,
            turns: Vec::new(),
            redeals: 0,
        }
    }

    pub fn current_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub(crate) fn current_turn_mut(&mut self) -> Option<&mut Turn> {
        self.turns.last_mut()
    }

    pub fn completed_tricks(&self) -> usize {
        self.turns.iter().filter(|t| t.is_complete()).count()
    }
}

/// Entire game container, sufficient for every engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub number_of_players: usize,
    /// Indexed by player id.
    pub players: Vec<Player>,
    pub deck: Deck,
    pub rounds: Vec<Round>,
    pub current_round: usize,
    pub initialized: bool,
    /// Base seed; every deck shuffle derives from it.
    pub seed: u64,
    /// Decks built so far, feeds the shuffle seed derivation.
    pub deals: u32,
    /// Games finished by reaching `GameOver` and settling.
    pub games_completed: u32,
    pub rules: RulesConfig,
}

impl Game {
    /// An uninitialised game seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(RulesConfig::default(), seed)
    }

    pub fn with_config(rules: RulesConfig, seed: u64) -> Self {
        Self {
            number_of_players: 0,
            players: Vec::new(),
            deck: Deck::shuffled(derive_dealing_seed(seed, 0)),
            rounds: Vec::new(),
            current_round: 0,
            initialized: false,
            seed,
            deals: 0,
            games_completed: 0,
            rules,
        }
    }

    /// Replace the deck with a freshly shuffled one using the next derived seed.
    pub(crate) fn rebuild_deck(&mut self) {
        self.deals = self.deals.wrapping_add(1);
        self.deck = Deck::shuffled(derive_dealing_seed(self.seed, self.deals));
    }

    pub fn round(&self) -> Result<&Round, DomainError> {
        self.rounds.get(self.current_round).ok_or_else(not_initialized)
    }

    pub(crate) fn round_mut(&mut self) -> Result<&mut Round, DomainError> {
        self.rounds
            .get_mut(self.current_round)
            .ok_or_else(not_initialized)
    }

    pub fn phase(&self) -> Option<Phase> {
        self.round().ok().map(|r| r.state)
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, DomainError> {
        self.players
            .get(id as usize)
            .ok_or_else(|| unknown_player(id))
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, DomainError> {
        self.players
            .get_mut(id as usize)
            .ok_or_else(|| unknown_player(id))
    }

    pub fn card(&self, id: CardId) -> Result<&Card, DomainError> {
        self.deck.get(id).ok_or_else(|| {
            DomainError::validation(ValidationKind::UnknownCard, format!("no card with id {id}"))
        })
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Result<&mut Card, DomainError> {
        self.deck.get_mut(id).ok_or_else(|| {
            DomainError::validation(ValidationKind::UnknownCard, format!("no card with id {id}"))
        })
    }

    pub fn dealer(&self) -> Option<PlayerId> {
        self.players.iter().find(|p| p.is_dealer).map(|p| p.id)
    }

    /// The player who took trump this round, early or in the auction.
    pub fn trump_taker(&self) -> Option<PlayerId> {
        self.players.iter().find(|p| p.has_taken_trump).map(|p| p.id)
    }

    pub fn trump_suit(&self) -> Option<Suit> {
        let round = self.round().ok()?;
        round
            .trump_card
            .and_then(|id| self.deck.get(id))
            .map(|c| c.suit)
    }

    /// Owner of a card, if it is listed in some hand.
    pub fn holder_of(&self, card: CardId) -> Option<PlayerId> {
        self.players.iter().find(|p| p.holds(card)).map(|p| p.id)
    }

    /// Players committed to the round and not folded, in seat order.
    pub fn players_in_round(&self) -> impl Iterator<Item = &Player> + '_ {
        self.players.iter().filter(|p| p.is_in_round())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

pub fn require_initialized(game: &Game, ctx: &'static str) -> Result<(), DomainError> {
    if game.initialized && !game.rounds.is_empty() {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::NotInitialized,
            format!("game is not initialized ({ctx})"),
        ))
    }
}

pub fn require_phase(game: &Game, allowed: &[Phase], ctx: &'static str) -> Result<Phase, DomainError> {
    require_initialized(game, ctx)?;
    let phase = game.round()?.state;
    if allowed.contains(&phase) {
        Ok(phase)
    } else {
        Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("{ctx} is not allowed in phase {phase}"),
        ))
    }
}

pub fn require_dealer(game: &Game, ctx: &'static str) -> Result<PlayerId, DomainError> {
    game.dealer().ok_or_else(|| {
        DomainError::validation(ValidationKind::DealerNotSet, format!("no dealer set ({ctx})"))
    })
}

pub fn require_trump_card(game: &Game, ctx: &'static str) -> Result<CardId, DomainError> {
    game.round()?.trump_card.ok_or_else(|| {
        DomainError::validation(ValidationKind::TrumpNotSet, format!("trump is not set ({ctx})"))
    })
}

pub fn require_trump_taker(game: &Game, ctx: &'static str) -> Result<PlayerId, DomainError> {
    game.trump_taker().ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NoTrumpTaker,
            format!("no player has taken trump ({ctx})"),
        )
    })
}

fn not_initialized() -> DomainError {
    DomainError::validation(ValidationKind::NotInitialized, "game has no current round")
}

fn unknown_player(id: PlayerId) -> DomainError {
    DomainError::validation(ValidationKind::UnknownPlayer, format!("no player with id {id}"))
}
