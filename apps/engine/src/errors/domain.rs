//! Domain-level error type used across the engine.
//!
//! Rule violations are recoverable: an action that fails with
//! [`DomainError::Validation`] leaves the game untouched and the caller may
//! retry with a different, legal action. [`DomainError::Invariant`] signals a
//! programming error (corrupted card bookkeeping) and should never surface in
//! a correct build.

use thiserror::Error;

/// Closed set of reasons an action can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValidationKind {
    NotInitialized,
    PhaseMismatch,
    OutOfTurn,
    UnknownPlayer,
    UnknownCard,
    CardNotInHand,
    CardAlreadyPlayed,
    CardNotSelectable,
    MustFollowSuit,
    TrumpNotSet,
    TrumpAlreadySet,
    TrumpNotForSale,
    NotDealer,
    AlreadyDecided,
    PlayerFolded,
    PlayerNotIn,
    SmallBlindsMissing,
    DealerNotSet,
    InvalidAmount,
    InvalidPlayerCount,
    DeckExhausted,
    NoTrumpTaker,
    CannotFold,
    InvalidConfig,
}

impl ValidationKind {
    /// Stable machine-readable code, used in logs and simulator output.
    pub const fn code(self) -> &'static str {
        match self {
            ValidationKind::NotInitialized => "NOT_INITIALIZED",
            ValidationKind::PhaseMismatch => "PHASE_MISMATCH",
            ValidationKind::OutOfTurn => "OUT_OF_TURN",
            ValidationKind::UnknownPlayer => "UNKNOWN_PLAYER",
            ValidationKind::UnknownCard => "UNKNOWN_CARD",
            ValidationKind::CardNotInHand => "CARD_NOT_IN_HAND",
            ValidationKind::CardAlreadyPlayed => "CARD_ALREADY_PLAYED",
            ValidationKind::CardNotSelectable => "CARD_NOT_SELECTABLE",
            ValidationKind::MustFollowSuit => "MUST_FOLLOW_SUIT",
            ValidationKind::TrumpNotSet => "TRUMP_NOT_SET",
            ValidationKind::TrumpAlreadySet => "TRUMP_ALREADY_SET",
            ValidationKind::TrumpNotForSale => "TRUMP_NOT_FOR_SALE",
            ValidationKind::NotDealer => "NOT_DEALER",
            ValidationKind::AlreadyDecided => "ALREADY_DECIDED",
            ValidationKind::PlayerFolded => "PLAYER_FOLDED",
            ValidationKind::PlayerNotIn => "PLAYER_NOT_IN",
            ValidationKind::SmallBlindsMissing => "SMALL_BLINDS_MISSING",
            ValidationKind::DealerNotSet => "DEALER_NOT_SET",
            ValidationKind::InvalidAmount => "INVALID_AMOUNT",
            ValidationKind::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            ValidationKind::DeckExhausted => "DECK_EXHAUSTED",
            ValidationKind::NoTrumpTaker => "NO_TRUMP_TAKER",
            ValidationKind::CannotFold => "CANNOT_FOLD",
            ValidationKind::InvalidConfig => "INVALID_CONFIG",
        }
    }
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Illegal transition or invalid reference; the action was a no-op.
    #[error("validation error [{code}]: {1}", code = .0.code())]
    Validation(ValidationKind, String),
    /// Core data invariant broken.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    /// The validation kind, if this is a recoverable rejection.
    pub fn kind(&self) -> Option<ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(*kind),
            DomainError::Invariant(_) => None,
        }
    }

    pub fn is_invariant(&self) -> bool {
        matches!(self, DomainError::Invariant(_))
    }
}
