use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{Level, event};
use uuid::Uuid;

use crate::error::RuleError;
use crate::game::standings::{self, CumulativeEntry};
use crate::game::store::SessionHeader;
use crate::model::bid::{BidLevel, Overflow};
use crate::model::player::{PlayerCount, PlayerIndex};
use crate::model::round::Round;

/// A scoring sheet: the players, every round entered so far and the
/// standings derived from them.
///
/// Standings are never edited directly. Every change to the round list
/// recomputes them from the first round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Uuid,
    name: String,
    players: Vec<String>,
    player_count: PlayerCount,
    created_at: u64,
    dealer: PlayerIndex,
    rounds: Vec<Round>,
    standings: Vec<Vec<CumulativeEntry>>,
}

impl Session {
    pub fn new<I, S>(players: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players: Vec<String> = players.into_iter().map(Into::into).collect();
        let player_count = validate_players(&players)?;
        let name = default_name(&players);

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            players,
            player_count,
            created_at: unix_now(),
            dealer: 0,
            rounds: Vec::new(),
            standings: Vec::new(),
        })
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    pub fn with_created_at(mut self, created_at: u64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Rebuilds a session from stored parts, validating everything again.
    pub(crate) fn from_parts(
        id: Uuid,
        name: String,
        players: Vec<String>,
        created_at: u64,
        dealer: PlayerIndex,
        rounds: Vec<Round>,
    ) -> Result<Self, RuleError> {
        let player_count = validate_players(&players)?;
        let dealer = player_count.check(dealer)?;
        let standings = standings::derive_standings(player_count, &rounds)?;
        Ok(Self {
            id,
            name,
            players,
            player_count,
            created_at,
            dealer,
            rounds,
            standings,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn player_count(&self) -> PlayerCount {
        self.player_count
    }

    /// Unix timestamp in seconds.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Seat dealing the next hand.
    pub fn dealer(&self) -> PlayerIndex {
        self.dealer
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// One standings row per round, in round order.
    pub fn standings(&self) -> &[Vec<CumulativeEntry>] {
        &self.standings
    }

    pub fn standings_after(&self, index: usize) -> Option<&[CumulativeEntry]> {
        self.standings.get(index).map(Vec::as_slice)
    }

    /// Standings after the last round, or the all-zero baseline.
    pub fn final_standings(&self) -> Vec<CumulativeEntry> {
        self.standings
            .last()
            .cloned()
            .unwrap_or_else(|| standings::baseline(self.player_count))
    }

    pub fn header(&self) -> SessionHeader {
        SessionHeader {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            scores: self
                .players
                .iter()
                .cloned()
                .zip(self.final_standings().iter().map(|entry| entry.score))
                .collect(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.name = if name.trim().is_empty() {
            default_name(&self.players)
        } else {
            name
        };
    }

    pub fn rename_player(
        &mut self,
        player: PlayerIndex,
        name: impl Into<String>,
    ) -> Result<(), RuleError> {
        let player = self.player_count.check(player)?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RuleError::BlankPlayerName);
        }
        self.players[player] = name;
        Ok(())
    }

    pub fn set_dealer(&mut self, dealer: PlayerIndex) -> Result<(), RuleError> {
        self.dealer = self.player_count.check(dealer)?;
        Ok(())
    }

    /// Appends a round and passes the deal to the next seat.
    pub fn append_round(&mut self, round: Round) -> Result<(), RuleError> {
        self.check_round(&round)?;
        self.rounds.push(round);
        self.advance_dealer();
        self.recompute("append");
        Ok(())
    }

    /// Swaps the round at `index`, returning the one it replaced.
    pub fn replace_round(&mut self, index: usize, round: Round) -> Result<Round, RuleError> {
        self.check_index(index)?;
        self.check_round(&round)?;
        let previous = std::mem::replace(&mut self.rounds[index], round);
        self.recompute("replace");
        Ok(previous)
    }

    pub fn remove_round(&mut self, index: usize) -> Result<Round, RuleError> {
        self.check_index(index)?;
        let removed = self.rounds.remove(index);
        self.recompute("remove");
        Ok(removed)
    }

    pub fn add_round(
        &mut self,
        bid: BidLevel,
        bidder: PlayerIndex,
        partner: Option<PlayerIndex>,
        won: bool,
        overflow: Overflow,
    ) -> Result<(), RuleError> {
        let round = Round::builder(self.player_count)
            .bid(bid)
            .bidder(bidder)
            .partner(partner)
            .won(won)
            .overflow(overflow)
            .build()?;
        self.append_round(round)
    }

    /// Records a thrown-in hand against the current dealer.
    pub fn add_misdeal(&mut self) -> Result<(), RuleError> {
        let round = Round::misdeal(self.player_count, self.dealer)?;
        self.append_round(round)
    }

    fn check_round(&self, round: &Round) -> Result<(), RuleError> {
        if round.player_count() != self.player_count {
            return Err(RuleError::PlayerCountMismatch {
                expected: self.player_count.get(),
                found: round.player_count().get(),
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), RuleError> {
        if index >= self.rounds.len() {
            return Err(RuleError::RoundIndexOutOfRange {
                index,
                len: self.rounds.len(),
            });
        }
        Ok(())
    }

    fn advance_dealer(&mut self) {
        self.dealer = (self.dealer + 1) % self.player_count.get();
    }

    fn recompute(&mut self, reason: &'static str) {
        self.standings = standings::fold_standings(self.player_count, &self.rounds);

        if tracing::enabled!(Level::DEBUG) {
            let totals: Vec<i32> = self.final_standings().iter().map(|e| e.score).collect();
            event!(
                target: "tarot_core::session",
                Level::DEBUG,
                session = %self.id,
                reason,
                rounds = self.rounds.len(),
                totals = ?totals,
            );
        }
    }
}

fn validate_players(players: &[String]) -> Result<PlayerCount, RuleError> {
    let count = PlayerCount::new(players.len())?;
    if players.iter().any(|name| name.trim().is_empty()) {
        return Err(RuleError::BlankPlayerName);
    }
    Ok(count)
}

/// First two letters of every player's name, concatenated.
fn default_name(players: &[String]) -> String {
    players
        .iter()
        .flat_map(|name| name.trim().chars().take(2))
        .collect()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::error::RuleError;
    use crate::game::standings::{CumulativeEntry, RankChange};
    use crate::model::bid::{BidLevel, Overflow};
    use crate::model::player::PlayerCount;
    use crate::model::round::Round;

    fn three() -> Session {
        Session::new(["Gael", "Melany", "Exav"]).unwrap()
    }

    fn totals(session: &Session) -> Vec<i32> {
        session.final_standings().iter().map(|e| e.score).collect()
    }

    #[test]
    fn rejects_unsupported_player_counts() {
        assert_eq!(
            Session::new(["a", "b"]).unwrap_err(),
            RuleError::InvalidPlayerCount(2)
        );
        assert_eq!(
            Session::new(["a", "b", "c", "d", "e", "f"]).unwrap_err(),
            RuleError::InvalidPlayerCount(6)
        );
    }

    #[test]
    fn rejects_blank_player_names() {
        assert_eq!(
            Session::new(["a", " ", "c"]).unwrap_err(),
            RuleError::BlankPlayerName
        );
    }

    #[test]
    fn default_name_uses_two_letters_per_player() {
        let session = three();
        assert_eq!(session.name(), "GaMeEx");
        assert_eq!(session.player_count(), PlayerCount::THREE);
    }

    #[test]
    fn empty_session_has_baseline_standings() {
        let session = three();
        assert!(session.standings().is_empty());
        assert_eq!(
            session.final_standings(),
            vec![CumulativeEntry::BASELINE; 3]
        );
    }

    #[test]
    fn append_recomputes_standings_and_rotates_dealer() {
        let mut session = three();
        session
            .add_round(BidLevel::Garde, 0, None, true, Overflow::P0)
            .unwrap();
        assert_eq!(session.round(0).unwrap().scores(), &[80, -40, -40]);
        assert_eq!(totals(&session), vec![80, -40, -40]);
        assert_eq!(session.dealer(), 1);

        session.add_misdeal().unwrap();
        assert_eq!(session.round(1).unwrap().bidder(), 1);
        assert_eq!(session.round(1).unwrap().bid(), BidLevel::NoBid);
        assert_eq!(totals(&session), vec![90, -60, -30]);
        assert_eq!(session.dealer(), 2);
        assert_eq!(session.standings().len(), 2);
    }

    #[test]
    fn replace_and_remove_recompute_everything() {
        let mut session = three();
        session
            .add_round(BidLevel::Petite, 0, None, true, Overflow::P0)
            .unwrap();
        session
            .add_round(BidLevel::Petite, 1, None, true, Overflow::P0)
            .unwrap();
        assert_eq!(totals(&session), vec![10, 10, -20]);

        let flipped = session.round(0).unwrap().with_won(false).unwrap();
        let previous = session.replace_round(0, flipped).unwrap();
        assert!(previous.bidder_won());
        assert_eq!(totals(&session), vec![-30, 30, 0]);

        let removed = session.remove_round(0).unwrap();
        assert!(!removed.bidder_won());
        assert_eq!(session.round_count(), 1);
        assert_eq!(totals(&session), vec![-10, 20, -10]);
        assert_eq!(
            session.final_standings()[1].rank_change,
            RankChange::Same,
            "first remaining round has no predecessor"
        );
    }

    #[test]
    fn mismatched_round_is_rejected_without_changes() {
        let mut session = three();
        let four = Round::builder(PlayerCount::FOUR).build().unwrap();
        let err = session.append_round(four).unwrap_err();
        assert_eq!(
            err,
            RuleError::PlayerCountMismatch {
                expected: 3,
                found: 4
            }
        );
        assert_eq!(session.round_count(), 0);
        assert_eq!(session.dealer(), 0);
    }

    #[test]
    fn bad_indices_are_rejected() {
        let mut session = three();
        assert_eq!(
            session.remove_round(0).unwrap_err(),
            RuleError::RoundIndexOutOfRange { index: 0, len: 0 }
        );
        let round = Round::builder(PlayerCount::THREE).build().unwrap();
        assert!(session.replace_round(2, round).is_err());
    }

    #[test]
    fn invalid_round_parameters_surface_as_errors() {
        let mut session = three();
        let err = session
            .add_round(BidLevel::Garde, 0, Some(1), true, Overflow::P0)
            .unwrap_err();
        assert_eq!(err, RuleError::PartnerNeedsFivePlayers { player_count: 3 });
        assert_eq!(session.round_count(), 0);
    }

    #[test]
    fn header_pairs_names_with_final_scores() {
        let mut session = three();
        session
            .add_round(BidLevel::Pouce, 2, None, false, Overflow::P10)
            .unwrap();
        let header = session.header();
        assert_eq!(header.id, session.id());
        assert_eq!(
            header.scores,
            vec![
                ("Gael".to_string(), 30),
                ("Melany".to_string(), 30),
                ("Exav".to_string(), -60)
            ]
        );
    }

    #[test]
    fn rename_and_dealer_are_validated() {
        let mut session = three();
        session.rename_player(1, "Mel").unwrap();
        assert_eq!(session.players()[1], "Mel");
        assert_eq!(
            session.rename_player(3, "Nope").unwrap_err(),
            RuleError::PlayerOutOfRange {
                index: 3,
                player_count: 3
            }
        );
        assert_eq!(
            session.rename_player(0, "").unwrap_err(),
            RuleError::BlankPlayerName
        );
        assert!(session.set_dealer(5).is_err());
        session.set_dealer(2).unwrap();
        session.add_misdeal().unwrap();
        assert_eq!(session.round(0).unwrap().bidder(), 2);
        assert_eq!(session.dealer(), 0);
    }

    #[test]
    fn blank_session_name_falls_back_to_default() {
        let session = three().with_name("  ");
        assert_eq!(session.name(), "GaMeEx");
        let session = session.with_name("Friday");
        assert_eq!(session.name(), "Friday");
    }
}
