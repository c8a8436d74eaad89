use core::fmt;
use serde::{Deserialize, Serialize};

use super::player::PlayerIndex;

/// Announcements and end-of-hand events scored on top of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideGainKind {
    Misery,
    DoubleMisery,
    Poignee,
    DoublePoignee,
    PetitAuBout,
    /// The petit was captured on the last trick.
    PetitLostAtEnd,
    Bonus,
    Malus,
}

impl SideGainKind {
    pub const ALL: [SideGainKind; 8] = [
        SideGainKind::Misery,
        SideGainKind::DoubleMisery,
        SideGainKind::Poignee,
        SideGainKind::DoublePoignee,
        SideGainKind::PetitAuBout,
        SideGainKind::PetitLostAtEnd,
        SideGainKind::Bonus,
        SideGainKind::Malus,
    ];

    /// Signed weight; the scorer multiplies it by ten.
    pub const fn weight(self) -> i32 {
        match self {
            SideGainKind::Misery => 1,
            SideGainKind::DoubleMisery => 2,
            SideGainKind::Poignee => 1,
            SideGainKind::DoublePoignee => 2,
            SideGainKind::PetitAuBout => 1,
            SideGainKind::PetitLostAtEnd => -1,
            SideGainKind::Bonus => 1,
            SideGainKind::Malus => -1,
        }
    }

    pub const fn is_penalty(self) -> bool {
        self.weight() < 0
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SideGainKind::Misery => "misère",
            SideGainKind::DoubleMisery => "double misère",
            SideGainKind::Poignee => "poignée",
            SideGainKind::DoublePoignee => "double poignée",
            SideGainKind::PetitAuBout => "petit au bout",
            SideGainKind::PetitLostAtEnd => "petit perdu au bout",
            SideGainKind::Bonus => "bonus",
            SideGainKind::Malus => "malus",
        }
    }

    /// Sentence fragment used by round descriptions.
    pub(crate) const fn phrase(self) -> &'static str {
        match self {
            SideGainKind::Misery => "has a misère",
            SideGainKind::DoubleMisery => "has a double misère",
            SideGainKind::Poignee => "shows a poignée",
            SideGainKind::DoublePoignee => "shows a double poignée",
            SideGainKind::PetitAuBout => "took the last trick with the petit",
            SideGainKind::PetitLostAtEnd => "lost the petit on the last trick",
            SideGainKind::Bonus => "earns a bonus",
            SideGainKind::Malus => "takes a penalty",
        }
    }
}

impl fmt::Display for SideGainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A side gain credited to one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideGain {
    pub player: PlayerIndex,
    pub kind: SideGainKind,
}

impl SideGain {
    pub const fn new(player: PlayerIndex, kind: SideGainKind) -> Self {
        Self { player, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::SideGainKind;

    #[test]
    fn penalties_carry_negative_weight() {
        let penalties: Vec<_> = SideGainKind::ALL
            .iter()
            .copied()
            .filter(|kind| kind.is_penalty())
            .collect();
        assert_eq!(
            penalties,
            vec![SideGainKind::PetitLostAtEnd, SideGainKind::Malus]
        );
    }

    #[test]
    fn doubles_weigh_twice_the_single() {
        assert_eq!(
            SideGainKind::DoubleMisery.weight(),
            2 * SideGainKind::Misery.weight()
        );
        assert_eq!(
            SideGainKind::DoublePoignee.weight(),
            2 * SideGainKind::Poignee.weight()
        );
    }
}
