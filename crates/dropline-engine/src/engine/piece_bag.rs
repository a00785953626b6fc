use std::collections::VecDeque;

use rand::{SeedableRng as _, seq::SliceRandom};
use rand_pcg::Pcg64Mcg;

use crate::PieceKind;

/// Supplies pieces using the 7-bag system.
///
/// All seven kinds are shuffled into a bag and served front to back; a fresh
/// shuffled bag is drawn as soon as the previous one is empty. Any kind
/// therefore reappears within at most 13 draws.
///
/// # Example
///
/// ```
/// use dropline_engine::{PieceBag, PieceKind};
///
/// let mut bag = PieceBag::with_seed(42);
/// let mut first: Vec<PieceKind> = bag.by_ref().take(PieceKind::LEN).collect();
/// first.sort_by_key(|kind| kind.index());
/// assert_eq!(first, PieceKind::ALL);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg64Mcg,
    bag: VecDeque<PieceKind>,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBag {
    /// Creates a new [`PieceBag`].
    ///
    /// The random seed is initialized from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(Pcg64Mcg::from_os_rng())
    }

    /// Creates a bag whose sequence is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Pcg64Mcg::seed_from_u64(seed))
    }

    fn from_rng(rng: Pcg64Mcg) -> Self {
        let mut this = Self {
            rng,
            bag: VecDeque::with_capacity(PieceKind::LEN),
        };
        this.refill();
        this
    }

    /// Shuffles a full set of pieces into the bag once it runs empty.
    fn refill(&mut self) {
        if self.bag.is_empty() {
            let mut new_bag = PieceKind::ALL;
            new_bag.shuffle(&mut self.rng);
            self.bag.extend(new_bag);
        }
    }

    /// Returns the piece the next call to [`PieceBag::next_piece`] will produce.
    #[must_use]
    pub fn peek(&self) -> PieceKind {
        *self.bag.front().expect("Piece bag should never be empty")
    }

    /// Pops the next piece, refilling the bag when it runs out.
    pub fn next_piece(&mut self) -> PieceKind {
        let kind = self.peek();
        self.bag.pop_front();
        self.refill();
        kind
    }

    /// Pieces left in the current bag, in draw order.
    pub fn remaining(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.bag.iter().copied()
    }
}

impl Iterator for PieceBag {
    type Item = PieceKind;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_piece())
    }
}
