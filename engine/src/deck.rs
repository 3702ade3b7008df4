use serde::Serialize;

use crate::CombatRng;
use crate::error::PlayRejection;

pub const HAND_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawSummary {
    pub drawn: usize,
    pub reshuffled: bool,
}

/// The four card-location piles for one combat session. Every card id from
/// the original deck lives in exactly one pile at all times.
#[derive(Debug, Clone, Serialize)]
pub struct DeckManager {
    pub draw_pile: Vec<String>,
    pub hand: Vec<String>,
    pub discard_pile: Vec<String>,
    pub exhaust_pile: Vec<String>,
}

impl DeckManager {
    /// Shuffles the starting deck into the draw pile.
    pub fn new(mut deck: Vec<String>, rng: &mut CombatRng) -> Self {
        rng.shuffle(&mut deck);
        Self {
            draw_pile: deck,
            hand: Vec::with_capacity(HAND_SIZE),
            discard_pile: Vec::new(),
            exhaust_pile: Vec::new(),
        }
    }

    /// Fill the hand up to `HAND_SIZE`, reshuffling the discard pile into
    /// the draw pile if it runs dry mid-draw. Running out of both piles
    /// stops the draw short; that is not an error.
    pub fn start_turn(&mut self, rng: &mut CombatRng) -> DrawSummary {
        self.draw(HAND_SIZE.saturating_sub(self.hand.len()), rng)
    }

    pub fn draw(&mut self, count: usize, rng: &mut CombatRng) -> DrawSummary {
        let mut summary = DrawSummary {
            drawn: 0,
            reshuffled: false,
        };
        for _ in 0..count {
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    break;
                }
                self.draw_pile.append(&mut self.discard_pile);
                rng.shuffle(&mut self.draw_pile);
                summary.reshuffled = true;
            }
            if let Some(card) = self.draw_pile.pop() {
                self.hand.push(card);
                summary.drawn += 1;
            }
        }
        summary
    }

    /// Remove exactly one matching card from the hand and route it to the
    /// exhaust pile or the discard pile.
    pub fn play_card(&mut self, id: &str, exhaust: bool) -> Result<(), PlayRejection> {
        let idx = self
            .hand
            .iter()
            .position(|c| c == id)
            .ok_or_else(|| PlayRejection::CardNotInHand(id.to_string()))?;
        let card = self.hand.remove(idx);
        if exhaust {
            self.exhaust_pile.push(card);
        } else {
            self.discard_pile.push(card);
        }
        Ok(())
    }

    /// Discard whatever is left in hand.
    pub fn end_turn(&mut self) {
        self.discard_pile.append(&mut self.hand);
    }

    pub fn holds(&self, id: &str) -> bool {
        self.hand.iter().any(|c| c == id)
    }

    /// Sum across all four piles; must always equal the starting deck size.
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.hand.len() + self.discard_pile.len() + self.exhaust_pile.len()
    }
}
