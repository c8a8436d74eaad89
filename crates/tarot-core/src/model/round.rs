use core::fmt;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::model::bid::{BidLevel, Overflow};
use crate::model::player::{PlayerCount, PlayerIndex};
use crate::model::score::score_round;
use crate::model::side_gain::{SideGain, SideGainKind};

/// Raw inputs of a round as entered at the table.
///
/// This is the serialized form of a [`Round`]. Nothing here is trusted until
/// it passes [`RoundParams::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundParams {
    pub player_count: PlayerCount,
    pub bidder: PlayerIndex,
    #[serde(default)]
    pub partner: Option<PlayerIndex>,
    pub bidder_won: bool,
    pub bid: BidLevel,
    #[serde(default)]
    pub overflow: Overflow,
    #[serde(default)]
    pub side_gains: Vec<SideGain>,
}

impl RoundParams {
    pub fn validate(&self) -> Result<(), RuleError> {
        let player_count = self.player_count.get();

        if !self.player_count.contains(self.bidder) {
            return Err(RuleError::BidderOutOfRange {
                player: self.bidder,
                player_count,
            });
        }

        if let Some(partner) = self.partner {
            if !self.player_count.contains(partner) {
                return Err(RuleError::PartnerOutOfRange {
                    player: partner,
                    player_count,
                });
            }
            if partner == self.bidder {
                return Err(RuleError::PartnerIsBidder(partner));
            }
            if !self.player_count.allows_partner() {
                return Err(RuleError::PartnerNeedsFivePlayers { player_count });
            }
        }

        if let Some(gain) = self
            .side_gains
            .iter()
            .find(|gain| !self.player_count.contains(gain.player))
        {
            return Err(RuleError::SideGainPlayerOutOfRange {
                player: gain.player,
                player_count,
            });
        }

        Ok(())
    }
}

/// One scored hand. Immutable: changing any input yields a new, re-scored
/// round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoundParams", into = "RoundParams")]
pub struct Round {
    params: RoundParams,
    scores: Vec<i32>,
}

impl Round {
    pub fn new(params: RoundParams) -> Result<Self, RuleError> {
        params.validate()?;
        let scores = score_round(&params);
        Ok(Self { params, scores })
    }

    pub fn builder(player_count: PlayerCount) -> RoundBuilder {
        RoundBuilder::new(player_count)
    }

    /// Thrown-in hand: nobody bid, the dealer pays as if a petite failed.
    pub fn misdeal(player_count: PlayerCount, dealer: PlayerIndex) -> Result<Self, RuleError> {
        Round::builder(player_count)
            .bidder(dealer)
            .bid(BidLevel::NoBid)
            .won(false)
            .build()
    }

    pub fn to_builder(&self) -> RoundBuilder {
        RoundBuilder {
            params: self.params.clone(),
        }
    }

    pub fn with_bidder(&self, bidder: PlayerIndex) -> Result<Self, RuleError> {
        self.to_builder().bidder(bidder).build()
    }

    pub fn with_partner(&self, partner: Option<PlayerIndex>) -> Result<Self, RuleError> {
        self.to_builder().partner(partner).build()
    }

    pub fn with_won(&self, won: bool) -> Result<Self, RuleError> {
        self.to_builder().won(won).build()
    }

    pub fn with_bid(&self, bid: BidLevel) -> Result<Self, RuleError> {
        self.to_builder().bid(bid).build()
    }

    pub fn with_overflow(&self, overflow: Overflow) -> Result<Self, RuleError> {
        self.to_builder().overflow(overflow).build()
    }

    pub fn with_side_gains(&self, side_gains: Vec<SideGain>) -> Result<Self, RuleError> {
        self.to_builder().side_gains(side_gains).build()
    }

    pub fn with_side_gain(&self, gain: SideGain) -> Result<Self, RuleError> {
        self.to_builder().side_gain(gain).build()
    }

    pub fn params(&self) -> &RoundParams {
        &self.params
    }

    pub fn player_count(&self) -> PlayerCount {
        self.params.player_count
    }

    pub fn bidder(&self) -> PlayerIndex {
        self.params.bidder
    }

    pub fn partner(&self) -> Option<PlayerIndex> {
        self.params.partner
    }

    pub fn bidder_won(&self) -> bool {
        self.params.bidder_won
    }

    pub fn bid(&self) -> BidLevel {
        self.params.bid
    }

    pub fn overflow(&self) -> Overflow {
        self.params.overflow
    }

    pub fn side_gains(&self) -> &[SideGain] {
        &self.params.side_gains
    }

    pub fn scores(&self) -> &[i32] {
        &self.scores
    }

    pub fn score(&self, player: PlayerIndex) -> Option<i32> {
        self.scores.get(player).copied()
    }

    pub fn is_attacker(&self, player: PlayerIndex) -> bool {
        player == self.params.bidder || Some(player) == self.params.partner
    }

    /// Whether `player` ended on the winning side of the contract.
    pub fn won_for(&self, player: PlayerIndex) -> bool {
        if self.is_attacker(player) {
            self.params.bidder_won
        } else {
            !self.params.bidder_won
        }
    }

    pub fn side_gains_for(&self, player: PlayerIndex) -> Vec<SideGainKind> {
        self.params
            .side_gains
            .iter()
            .filter(|gain| gain.player == player)
            .map(|gain| gain.kind)
            .collect()
    }

    /// Human-readable summary using the given player names. Seats without a
    /// name fall back to `p1`, `p2`, ...
    pub fn describe<S: AsRef<str>>(&self, players: &[S]) -> String {
        let name = |player: PlayerIndex| -> String {
            players
                .get(player)
                .map(|n| n.as_ref().to_string())
                .unwrap_or_else(|| format!("p{}", player + 1))
        };

        let p = &self.params;
        let setup = format!("{}-player game", p.player_count.get());
        let contract = if p.bid.is_bid() {
            let side = match p.partner {
                Some(partner) => format!("with {}", name(partner)),
                None => "alone".to_string(),
            };
            format!(
                "{} {} a {} {} by {} {}",
                name(p.bidder),
                if p.bidder_won { "wins" } else { "loses" },
                p.bid.as_str().to_lowercase(),
                if p.bidder_won { "made" } else { "failed" },
                p.overflow.value(),
                side
            )
        } else {
            format!("{} misdealt", name(p.bidder))
        };

        let mut out = format!("{setup}, {contract}.");
        for gain in &p.side_gains {
            out.push('\n');
            out.push_str(&format!("{} {}.", name(gain.player), gain.kind.phrase()));
        }
        out
    }
}

impl TryFrom<RoundParams> for Round {
    type Error = RuleError;

    fn try_from(params: RoundParams) -> Result<Self, Self::Error> {
        Round::new(params)
    }
}

impl From<Round> for RoundParams {
    fn from(round: Round) -> Self {
        round.params
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe::<&str>(&[]))
    }
}

/// Incremental construction of a [`Round`]; validation and scoring happen in
/// [`RoundBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundBuilder {
    params: RoundParams,
}

impl RoundBuilder {
    pub fn new(player_count: PlayerCount) -> Self {
        Self {
            params: RoundParams {
                player_count,
                bidder: 0,
                partner: None,
                bidder_won: true,
                bid: BidLevel::Petite,
                overflow: Overflow::P0,
                side_gains: Vec::new(),
            },
        }
    }

    pub fn bidder(mut self, bidder: PlayerIndex) -> Self {
        self.params.bidder = bidder;
        self
    }

    pub fn partner(mut self, partner: Option<PlayerIndex>) -> Self {
        self.params.partner = partner;
        self
    }

    pub fn won(mut self, won: bool) -> Self {
        self.params.bidder_won = won;
        self
    }

    pub fn bid(mut self, bid: BidLevel) -> Self {
        self.params.bid = bid;
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.params.overflow = overflow;
        self
    }

    pub fn side_gains(mut self, side_gains: Vec<SideGain>) -> Self {
        self.params.side_gains = side_gains;
        self
    }

    pub fn side_gain(mut self, gain: SideGain) -> Self {
        self.params.side_gains.push(gain);
        self
    }

    pub fn build(self) -> Result<Round, RuleError> {
        Round::new(self.params)
    }
}
