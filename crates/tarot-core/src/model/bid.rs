use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Contract announced by the bidding player, ordered by strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidLevel {
    /// Nobody bid and the hand was thrown in ("fausse donne").
    NoBid,
    Petite,
    Pouce,
    Garde,
    GardeSans,
    GardeContre,
}

impl BidLevel {
    /// The five real contracts, weakest first.
    pub const BIDS: [BidLevel; 5] = [
        BidLevel::Petite,
        BidLevel::Pouce,
        BidLevel::Garde,
        BidLevel::GardeSans,
        BidLevel::GardeContre,
    ];

    pub const fn multiplier(self) -> i32 {
        match self {
            BidLevel::NoBid => 1,
            BidLevel::Petite => 1,
            BidLevel::Pouce => 2,
            BidLevel::Garde => 4,
            BidLevel::GardeSans => 8,
            BidLevel::GardeContre => 16,
        }
    }

    pub const fn is_bid(self) -> bool {
        !matches!(self, BidLevel::NoBid)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BidLevel::NoBid => "Fausse Donne",
            BidLevel::Petite => "Petite",
            BidLevel::Pouce => "Pouce",
            BidLevel::Garde => "Garde",
            BidLevel::GardeSans => "Garde Sans",
            BidLevel::GardeContre => "Garde Contre",
        }
    }
}

impl FromStr for BidLevel {
    type Err = RuleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key: String = value
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "faussedonne" | "faussedone" | "nobid" => Ok(BidLevel::NoBid),
            "petite" => Ok(BidLevel::Petite),
            "pouce" => Ok(BidLevel::Pouce),
            "garde" => Ok(BidLevel::Garde),
            "gardesans" => Ok(BidLevel::GardeSans),
            "gardecontre" => Ok(BidLevel::GardeContre),
            _ => Err(RuleError::Unknown {
                kind: "bid",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for BidLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bonus points added to the stake for beating the contract by a margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Overflow {
    #[default]
    P0 = 0,
    P10 = 10,
    P20 = 20,
    P30 = 30,
    P40 = 40,
}

impl Overflow {
    pub const ALL: [Overflow; 5] = [
        Overflow::P0,
        Overflow::P10,
        Overflow::P20,
        Overflow::P30,
        Overflow::P40,
    ];

    pub const fn value(self) -> i32 {
        self as i32
    }

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Overflow::P0),
            10 => Some(Overflow::P10),
            20 => Some(Overflow::P20),
            30 => Some(Overflow::P30),
            40 => Some(Overflow::P40),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Overflow {
    type Error = RuleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Overflow::from_value(value).ok_or_else(|| RuleError::Unknown {
            kind: "overflow",
            value: value.to_string(),
        })
    }
}

impl From<Overflow> for u8 {
    fn from(overflow: Overflow) -> Self {
        overflow as u8
    }
}

/// Stake every defender puts on the table: `multiplier * 10 + overflow`.
pub const fn stake(bid: BidLevel, overflow: Overflow) -> i32 {
    bid.multiplier() * 10 + overflow.value()
}
