//! Core data invariants. A violation is a programming error, never a rule
//! violation by a caller.

use std::collections::HashSet;

use crate::domain::cards_types::DECK_SIZE;
use crate::domain::selectors::card_accounting;
use crate::domain::state::Game;
use crate::errors::domain::DomainError;

pub fn check_invariants(game: &Game) -> Result<(), DomainError> {
    if !game.initialized {
        return Ok(());
    }

    let dealers = game.players.iter().filter(|p| p.is_dealer).count();
    if dealers > 1 {
        return Err(DomainError::invariant(format!("{dealers} dealers seated")));
    }

    let mut seen = HashSet::with_capacity(DECK_SIZE);
    for p in &game.players {
        if p.is_in && p.has_folded {
            return Err(DomainError::invariant(format!(
                "player {} is both in and folded",
                p.id
            )));
        }
        if p.has_taken_trump && !p.is_in {
            return Err(DomainError::invariant(format!(
                "player {} took trump but is not in",
                p.id
            )));
        }
        for &card_id in &p.hand {
            if !seen.insert(card_id) {
                return Err(DomainError::invariant(format!(
                    "card {card_id} listed twice across hands"
                )));
            }
            let dealt = game.deck.get(card_id).is_some_and(|c| c.flags.is_dealt);
            if !dealt {
                return Err(DomainError::invariant(format!(
                    "card {card_id} held by player {} without being dealt",
                    p.id
                )));
            }
        }
    }

    let acc = card_accounting(game);
    if acc.total() != DECK_SIZE || acc.stray != 0 {
        return Err(DomainError::invariant(format!(
            "card accounting broken: {acc:?}"
        )));
    }
    Ok(())
}
