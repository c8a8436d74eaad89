use core::fmt;
use core::ops::{Range, RangeInclusive};
use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Seat index inside a session, always `< PlayerCount`.
pub type PlayerIndex = usize;

/// Number of seats at the table. Only 3, 4 and 5 player games exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PlayerCount(u8);

impl PlayerCount {
    pub const RANGE: RangeInclusive<usize> = 3..=5;

    pub const THREE: PlayerCount = PlayerCount(3);
    pub const FOUR: PlayerCount = PlayerCount(4);
    pub const FIVE: PlayerCount = PlayerCount(5);

    pub fn new(count: usize) -> Result<Self, RuleError> {
        if Self::RANGE.contains(&count) {
            Ok(PlayerCount(count as u8))
        } else {
            Err(RuleError::InvalidPlayerCount(count))
        }
    }

    pub const fn get(self) -> usize {
        self.0 as usize
    }

    pub const fn indices(self) -> Range<PlayerIndex> {
        0..self.0 as usize
    }

    pub const fn contains(self, player: PlayerIndex) -> bool {
        player < self.0 as usize
    }

    /// Partnerships are only played at five.
    pub const fn allows_partner(self) -> bool {
        self.0 == 5
    }

    pub fn check(self, player: PlayerIndex) -> Result<PlayerIndex, RuleError> {
        if self.contains(player) {
            Ok(player)
        } else {
            Err(RuleError::PlayerOutOfRange {
                index: player,
                player_count: self.get(),
            })
        }
    }
}

impl TryFrom<usize> for PlayerCount {
    type Error = RuleError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PlayerCount::new(value)
    }
}

impl From<PlayerCount> for usize {
    fn from(count: PlayerCount) -> Self {
        count.get()
    }
}

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} players", self.0)
    }
}
