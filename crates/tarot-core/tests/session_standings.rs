use tarot_core::{
    BidLevel, CumulativeEntry, MemoryStore, Overflow, PlayerCount, RankChange, Round, RuleError,
    Session, SessionSnapshot, SessionStore, SideGain, SideGainKind, derive_standings, rank_totals,
};

fn scores(row: &[CumulativeEntry]) -> Vec<i32> {
    row.iter().map(|e| e.score).collect()
}

fn ranks(row: &[CumulativeEntry]) -> Vec<usize> {
    row.iter().map(|e| e.rank).collect()
}

fn changes(row: &[CumulativeEntry]) -> Vec<RankChange> {
    row.iter().map(|e| e.rank_change).collect()
}

/// A short evening at four: contracts, a misdeal and a poignée.
fn evening() -> Session {
    let mut session = Session::new(["Gael", "Melany", "Exav", "Ambroise"]).unwrap();
    session
        .add_round(BidLevel::Garde, 1, None, true, Overflow::P10)
        .unwrap();
    session.add_misdeal().unwrap();
    let poignee = Round::builder(PlayerCount::FOUR)
        .bidder(3)
        .bid(BidLevel::Petite)
        .won(false)
        .overflow(Overflow::P20)
        .side_gain(SideGain::new(3, SideGainKind::Poignee))
        .build()
        .unwrap();
    session.append_round(poignee).unwrap();
    session
}

#[test]
fn evening_golden_standings() {
    let session = evening();
    let rows = session.standings();
    assert_eq!(rows.len(), 3);

    // garde +10 by Melany: stake 50, she collects 150
    assert_eq!(scores(&rows[0]), vec![-50, 150, -50, -50]);
    assert_eq!(ranks(&rows[0]), vec![2, 1, 2, 2]);
    assert_eq!(changes(&rows[0]), vec![RankChange::Same; 4]);

    // misdeal dealt by Melany (dealer rotated to seat 1): [10, -30, 10, 10]
    assert_eq!(scores(&rows[1]), vec![-40, 120, -40, -40]);
    assert_eq!(changes(&rows[1]), vec![RankChange::Same; 4]);

    // petite +20 lost by Ambroise [30, 30, 30, -90] plus his poignée
    // [-10, -10, -10, 30]: [20, 20, 20, -60]
    assert_eq!(scores(&rows[2]), vec![-20, 140, -20, -100]);
    assert_eq!(ranks(&rows[2]), vec![2, 1, 2, 4]);
    assert_eq!(
        changes(&rows[2]),
        vec![
            RankChange::Same,
            RankChange::Same,
            RankChange::Same,
            RankChange::Down
        ]
    );

    assert_eq!(session.final_standings(), rows[2]);
    for row in rows {
        assert_eq!(row.iter().map(|e| e.score).sum::<i32>(), 0);
    }
}

#[test]
fn deriving_twice_is_deterministic() {
    let session = evening();
    let first = derive_standings(session.player_count(), session.rounds()).unwrap();
    let second = derive_standings(session.player_count(), session.rounds()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, session.standings());
}

#[test]
fn editing_an_early_round_ripples_through_later_rows() {
    let mut session = evening();
    let before = session.standings().to_vec();

    let lost = session.round(0).unwrap().with_won(false).unwrap();
    session.replace_round(0, lost).unwrap();

    assert_ne!(session.standings()[2], before[2]);
    assert_eq!(scores(&session.standings()[0]), vec![50, -150, 50, 50]);
    assert_eq!(scores(&session.final_standings()), vec![80, -160, 80, 0]);
}

#[test]
fn tie_break_examples() {
    assert_eq!(rank_totals(&[10, 10, -20]), vec![1, 1, 3]);
    assert_eq!(rank_totals(&[10, -5, -5]), vec![1, 2, 2]);
}

#[test]
fn rounds_for_another_table_size_are_rejected() {
    let mut session = evening();
    let five = Round::builder(PlayerCount::FIVE).build().unwrap();
    assert_eq!(
        session.append_round(five.clone()).unwrap_err(),
        RuleError::PlayerCountMismatch {
            expected: 4,
            found: 5
        }
    );
    assert_eq!(
        session.replace_round(0, five).unwrap_err(),
        RuleError::PlayerCountMismatch {
            expected: 4,
            found: 5
        }
    );
    assert_eq!(session.round_count(), 3);
}

#[test]
fn memory_store_roundtrips_through_json() {
    let session = evening();
    let mut store = MemoryStore::new();
    store.save(&session).unwrap();

    let loaded = store.load(session.id()).unwrap();
    assert_eq!(loaded.standings(), session.standings());

    let json = SessionSnapshot::to_json(&loaded).unwrap();
    let restored = SessionSnapshot::from_json(&json).unwrap().restore().unwrap();
    assert_eq!(restored, session);

    let headers = store.list_headers().unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].scores[1], ("Melany".to_string(), 140));
}
