use std::fmt::{Debug, Formatter};
use serde::{Deserialize, Serialize};

/// The kind of a base action, as remembered in a player's `last_action`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum ActionKind {
    #[default]
    None,
    Gather,
    Tax,
    Bribe,
    Arrest,
    Sanction,
    Coup,
}

/// Everything a seat can ask the engine to do. Indexes are seats in turn order.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Action {
    Gather(usize),
    Tax(usize),
    Bribe(usize),
    Arrest(usize, usize),
    Sanction(usize, usize),
    Coup(usize, usize),

    // baron
    Invest(usize),
    // governor, target
    BlockTax(usize, usize),
    // general, couper, rescued
    UndoCoup(usize, usize, usize),
    // judge, briber
    BlockBribe(usize, usize),
    // spy, target
    Disable(usize, usize),
}

impl Action {
    pub fn actor(&self) -> usize {
        match *self {
            Action::Gather(p)
            | Action::Tax(p)
            | Action::Bribe(p)
            | Action::Arrest(p, _)
            | Action::Sanction(p, _)
            | Action::Coup(p, _)
            | Action::Invest(p)
            | Action::BlockTax(p, _)
            | Action::UndoCoup(p, _, _)
            | Action::BlockBribe(p, _)
            | Action::Disable(p, _) => p,
        }
    }

    /// The player on the receiving end, if any. For a coup reversal this is the rescued seat.
    pub fn target(&self) -> Option<usize> {
        match *self {
            Action::Gather(_) | Action::Tax(_) | Action::Bribe(_) | Action::Invest(_) => None,
            Action::Arrest(_, t)
            | Action::Sanction(_, t)
            | Action::Coup(_, t)
            | Action::BlockTax(_, t)
            | Action::UndoCoup(_, _, t)
            | Action::BlockBribe(_, t)
            | Action::Disable(_, t) => Some(t),
        }
    }

    /// Base actions have a kind; role abilities don't.
    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            Action::Gather(_) => Some(ActionKind::Gather),
            Action::Tax(_) => Some(ActionKind::Tax),
            Action::Bribe(_) => Some(ActionKind::Bribe),
            Action::Arrest(_, _) => Some(ActionKind::Arrest),
            Action::Sanction(_, _) => Some(ActionKind::Sanction),
            Action::Coup(_, _) => Some(ActionKind::Coup),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Gather(_) => "gather",
            Action::Tax(_) => "tax",
            Action::Bribe(_) => "bribe",
            Action::Arrest(_, _) => "arrest",
            Action::Sanction(_, _) => "sanction",
            Action::Coup(_, _) => "coup",
            Action::Invest(_) => "invest",
            Action::BlockTax(_, _) => "block_tax",
            Action::UndoCoup(_, _, _) => "undo_coup",
            Action::BlockBribe(_, _) => "block_bribe",
            Action::Disable(_, _) => "disable_arrest",
        }
    }
}

impl Debug for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Gather(player_idx) => {
                f.write_fmt(format_args!("Player {player_idx} gathers"))
            }
            Action::Tax(player_idx) => {
                f.write_fmt(format_args!("Player {player_idx} collects tax"))
            }
            Action::Bribe(player_idx) => {
                f.write_fmt(format_args!("Player {player_idx} bribes"))
            }
            Action::Arrest(player_idx, target_player_idx) => {
                f.write_fmt(format_args!("Player {player_idx} arrests {target_player_idx}"))
            }
            Action::Sanction(player_idx, target_player_idx) => {
                f.write_fmt(format_args!("Player {player_idx} sanctions {target_player_idx}"))
            }
            Action::Coup(player_idx, target_player_idx) => {
                f.write_fmt(format_args!("Player {player_idx} coups {target_player_idx}"))
            }
            Action::Invest(player_idx) => {
                f.write_fmt(format_args!("Player {player_idx} invests"))
            }
            Action::BlockTax(player_idx, target_player_idx) => {
                f.write_fmt(format_args!("Player {player_idx} blocks the tax of {target_player_idx}"))
            }
            Action::UndoCoup(player_idx, couper_player_idx, rescued_player_idx) => {
                f.write_fmt(format_args!("Player {player_idx} undoes the coup of {couper_player_idx} against {rescued_player_idx}"))
            }
            Action::BlockBribe(player_idx, target_player_idx) => {
                f.write_fmt(format_args!("Player {player_idx} blocks the bribe of {target_player_idx}"))
            }
            Action::Disable(player_idx, target_player_idx) => {
                f.write_fmt(format_args!("Player {player_idx} disables arrest for {target_player_idx}"))
            }
        }
    }
}

/// One line of the game journal. Flat so it can be written as a csv record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub turn: usize,
    pub player: String,
    pub action: String,
    pub target: Option<String>,
    // actor's coins after the action resolved
    pub coins: u8,
}

#[cfg(test)]
mod tests {
    use crate::action::{Action, ActionKind};

    #[test]
    fn abilities_have_no_kind() {
        assert_eq!(Action::Coup(0, 1).kind(), Some(ActionKind::Coup));
        assert_eq!(Action::Invest(0).kind(), None);
        assert_eq!(Action::UndoCoup(2, 0, 1).kind(), None);
    }

    #[test]
    fn actor_and_target() {
        assert_eq!(Action::Sanction(1, 3).actor(), 1);
        assert_eq!(Action::Sanction(1, 3).target(), Some(3));
        assert_eq!(Action::UndoCoup(2, 0, 1).target(), Some(1));
        assert_eq!(Action::Bribe(4).target(), None);
    }

    #[test]
    fn debug_reads_like_a_log_line() {
        assert_eq!(format!("{:?}", Action::Arrest(0, 2)), "Player 0 arrests 2");
    }
}
