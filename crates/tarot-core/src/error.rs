use thiserror::Error;

/// Invalid input rejected when a round or session is constructed or mutated.
///
/// These are caller errors: the offending value is reported back untouched and
/// no state is modified. Broken scoring arithmetic is never reported through
/// this type; it panics instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("a session needs between 3 and 5 players, got {0}")]
    InvalidPlayerCount(usize),
    #[error("bidding player {player} is out of range for {player_count} players")]
    BidderOutOfRange { player: usize, player_count: usize },
    #[error("partner {player} is out of range for {player_count} players")]
    PartnerOutOfRange { player: usize, player_count: usize },
    #[error("partner {0} cannot be the bidding player")]
    PartnerIsBidder(usize),
    #[error("a partner can only be called with 5 players, got {player_count}")]
    PartnerNeedsFivePlayers { player_count: usize },
    #[error("side gain player {player} is out of range for {player_count} players")]
    SideGainPlayerOutOfRange { player: usize, player_count: usize },
    #[error("round is scored for {found} players but the session has {expected}")]
    PlayerCountMismatch { expected: usize, found: usize },
    #[error("round index {index} is out of range ({len} rounds)")]
    RoundIndexOutOfRange { index: usize, len: usize },
    #[error("player {index} is out of range for {player_count} players")]
    PlayerOutOfRange { index: usize, player_count: usize },
    #[error("player names must not be blank")]
    BlankPlayerName,
    #[error("unknown {kind} '{value}'")]
    Unknown { kind: &'static str, value: String },
}
