#![deny(warnings)]
pub mod error;
pub mod game;
pub mod model;

pub use error::RuleError;
pub use game::serialization::SessionSnapshot;
pub use game::session::Session;
pub use game::standings::{CumulativeEntry, RankChange, derive_standings, rank_totals};
pub use game::store::{MemoryStore, SessionHeader, SessionStore, StoreError};
pub use model::bid::{BidLevel, Overflow};
pub use model::player::{PlayerCount, PlayerIndex};
pub use model::round::{Round, RoundBuilder, RoundParams};
pub use model::side_gain::{SideGain, SideGainKind};
