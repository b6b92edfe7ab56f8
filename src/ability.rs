//! Role abilities. Unlike base actions they can be used out of turn, mostly to reverse
//! something another player just did.

use log::info;
use crate::action::{Action, ActionKind};
use crate::config::{FORCED_COUP, INVEST_MIN, INVEST_YIELD, UNDO_COUP_COST};
use crate::error::{GameError, Illegal};
use crate::player::Player;
use crate::role::Ability;
use crate::Game;

fn require_active(player: &Player) -> Result<(), Illegal> {
    if !player.is_active() {
        return Err(Illegal::Inactive);
    }
    Ok(())
}

fn expect_last(player: &Player, expected: ActionKind) -> Result<(), Illegal> {
    if player.last_action() != expected {
        return Err(Illegal::WrongCounter { expected });
    }
    Ok(())
}

impl Game {
    /// Baron: +3 coins while holding 3 to 9.
    pub fn invest(&mut self, baron_idx: usize) -> Result<(), GameError> {
        self.apply_action(Action::Invest(baron_idx))
    }

    /// Governor: takes back the tax `target_player_idx` just collected.
    pub fn block_tax(&mut self, governor_idx: usize, target_player_idx: usize) -> Result<(), GameError> {
        self.apply_action(Action::BlockTax(governor_idx, target_player_idx))
    }

    /// General: pays 5 to bring `rescued_idx` back after `couper_idx` couped.
    pub fn undo_coup(&mut self, general_idx: usize, couper_idx: usize, rescued_idx: usize) -> Result<(), GameError> {
        self.apply_action(Action::UndoCoup(general_idx, couper_idx, rescued_idx))
    }

    /// Judge: cancels the bonus turn of a player who just bribed.
    pub fn block_bribe(&mut self, judge_idx: usize, briber_idx: usize) -> Result<(), GameError> {
        self.apply_action(Action::BlockBribe(judge_idx, briber_idx))
    }

    /// Spy: the target can't arrest until their turn is over.
    pub fn disable_arrest(&mut self, spy_idx: usize, target_player_idx: usize) -> Result<(), GameError> {
        self.apply_action(Action::Disable(spy_idx, target_player_idx))
    }

    // any other seat, eliminated or not
    fn other_seat(&self, player_idx: usize, target_player_idx: usize) -> Result<&Player, Illegal> {
        if target_player_idx == player_idx {
            return Err(Illegal::SelfTarget);
        }
        self.player(target_player_idx)
    }

    fn ability_holder(&self, player_idx: usize, ability: Ability) -> Result<&Player, Illegal> {
        let player = self.player(player_idx)?;
        if player.role().ability() != Some(ability) {
            return Err(Illegal::WrongRole { role: player.role() });
        }
        Ok(player)
    }

    pub(crate) fn validate_invest(&self, baron_idx: usize) -> Result<(), GameError> {
        let baron = self.ability_holder(baron_idx, Ability::Invest)?;
        require_active(baron)?;
        baron.require_funds(INVEST_MIN)?;
        if baron.coins() >= FORCED_COUP {
            return Err(Illegal::MustCoup.into());
        }
        Ok(())
    }

    pub(crate) fn validate_block_tax(&self, governor_idx: usize, target_player_idx: usize) -> Result<(), GameError> {
        let governor = self.ability_holder(governor_idx, Ability::BlockTax)?;
        require_active(governor)?;
        let target = self.other_seat(governor_idx, target_player_idx)?;
        expect_last(target, ActionKind::Tax)?;
        let needed = target.role().tax_yield();
        if target.coins() < needed {
            return Err(Illegal::TargetTooPoor { needed, held: target.coins() }.into());
        }
        Ok(())
    }

    pub(crate) fn validate_undo_coup(&self, general_idx: usize, couper_idx: usize, rescued_idx: usize) -> Result<(), GameError> {
        let general = self.ability_holder(general_idx, Ability::UndoCoup)?;
        // a couped general can still rescue itself
        if !general.is_active() && rescued_idx != general_idx {
            return Err(Illegal::Inactive.into());
        }
        let couper = self.player(couper_idx)?;
        let rescued = self.player(rescued_idx)?;
        general.require_funds(UNDO_COUP_COST)?;
        expect_last(couper, ActionKind::Coup)?;
        if rescued.is_active() {
            return Err(Illegal::TargetActive.into());
        }
        Ok(())
    }

    pub(crate) fn validate_block_bribe(&self, judge_idx: usize, briber_idx: usize) -> Result<(), GameError> {
        let judge = self.ability_holder(judge_idx, Ability::BlockBribe)?;
        require_active(judge)?;
        let briber = self.other_seat(judge_idx, briber_idx)?;
        expect_last(briber, ActionKind::Bribe)?;
        if !self.bribe_pending() || briber_idx != self.get_turn() {
            return Err(Illegal::BonusSpent.into());
        }
        Ok(())
    }

    pub(crate) fn validate_disable(&self, spy_idx: usize, target_player_idx: usize) -> Result<(), GameError> {
        let spy = self.ability_holder(spy_idx, Ability::DisableArrest)?;
        require_active(spy)?;
        self.opponent(spy_idx, target_player_idx)?;
        Ok(())
    }

    pub(crate) fn resolve_invest(&mut self, baron_idx: usize) -> Result<(), GameError> {
        self.players[baron_idx].earn(INVEST_YIELD);
        self.settle(Action::Invest(baron_idx));
        Ok(())
    }

    pub(crate) fn resolve_block_tax(&mut self, governor_idx: usize, target_player_idx: usize) -> Result<(), GameError> {
        let target = &mut self.players[target_player_idx];
        let amount = target.role().tax_yield();
        target.spend(amount)?;
        target.last_action = ActionKind::None;
        self.settle(Action::BlockTax(governor_idx, target_player_idx));
        Ok(())
    }

    pub(crate) fn resolve_undo_coup(&mut self, general_idx: usize, couper_idx: usize, rescued_idx: usize) -> Result<(), GameError> {
        // a coup that left one survivor returned before passing the turn, so the couper
        // still holds it and the rescue has to pass it on
        let game_was_over = self.survivor().is_some();

        self.players[general_idx].spend(UNDO_COUP_COST)?;
        self.players[couper_idx].last_action = ActionKind::None;
        self.players[rescued_idx].active = true;
        self.settle(Action::UndoCoup(general_idx, couper_idx, rescued_idx));
        info!("{} is back in the game", self.players[rescued_idx].name());

        if game_was_over {
            return self.turn_manager();
        }
        Ok(())
    }

    pub(crate) fn resolve_block_bribe(&mut self, judge_idx: usize, briber_idx: usize) -> Result<(), GameError> {
        self.players[briber_idx].last_action = ActionKind::None;
        self.settle(Action::BlockBribe(judge_idx, briber_idx));
        // the advance clears the pending bonus
        self.turn_manager()
    }

    pub(crate) fn resolve_disable(&mut self, spy_idx: usize, target_player_idx: usize) -> Result<(), GameError> {
        self.players[target_player_idx].can_arrest = false;
        self.settle(Action::Disable(spy_idx, target_player_idx));
        Ok(())
    }
}
