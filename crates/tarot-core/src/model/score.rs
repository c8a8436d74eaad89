use crate::model::bid::stake;
use crate::model::round::RoundParams;

/// Zero-sum score vector for one round.
///
/// Every defender stakes `multiplier * 10 + overflow`. The attacking side
/// collects the defenders' stakes (split two thirds / one third between
/// bidder and partner), the signs flip when the bidder made the contract,
/// and side gains are settled last: the credited player receives `weight *
/// 10` from each other player.
///
/// # Panics
///
/// Panics if the result does not sum to zero or does not hold one entry per
/// player. Only [`Round::new`](crate::model::round::Round::new) calls this,
/// after validating `params`, so either one means the arithmetic is wrong.
pub(crate) fn score_round(params: &RoundParams) -> Vec<i32> {
    let player_count = params.player_count.get();
    let stake = stake(params.bid, params.overflow);

    let mut scores = vec![stake; player_count];
    scores[params.bidder] = 0;
    if let Some(partner) = params.partner {
        scores[partner] = 0;
    }

    let opposing_points: i32 = scores.iter().sum();

    match params.partner {
        Some(partner) => {
            let third = opposing_points / 3;
            scores[params.bidder] = -2 * third;
            scores[partner] = -third;
        }
        None => scores[params.bidder] = -opposing_points,
    }

    if params.bidder_won {
        for score in scores.iter_mut() {
            *score = -*score;
        }
    }

    let others = player_count as i32 - 1;
    for gain in &params.side_gains {
        let points = gain.kind.weight() * 10;
        for (player, score) in scores.iter_mut().enumerate() {
            if player == gain.player {
                *score += points * others;
            } else {
                *score -= points;
            }
        }
    }

    assert_eq!(
        scores.len(),
        player_count,
        "round score vector must hold one entry per player"
    );
    assert_eq!(
        scores.iter().sum::<i32>(),
        0,
        "round scores must sum to zero: {scores:?}"
    );

    scores
}
