pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod playout;
pub mod role;
mod ability;

pub use action::{Action, ActionKind, Entry};
pub use config::Setup;
pub use error::{GameError, Illegal, SetupError};
pub use player::Player;
pub use playout::playout;
pub use role::Role;

use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::config::{BRIBE_COST, COUP_COST, FORCED_COUP, GATHER_YIELD, SANCTION_COST, STARTING_COINS};

/// The turn coordinator. Owns every seat; all mutation goes through its methods.
#[derive(Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    turn: usize,
    current_player_idx: usize,
    players: Vec<Player>,
    bribe_pending: bool,
    history: Vec<Entry>,
}

impl Debug for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("T {} | P {} | bribe {}\n", self.turn, self.current_player_idx, self.bribe_pending).as_str())?;
        for (player_idx, player) in self.players.iter().enumerate() {
            f.write_str(format!(
                "\tP {player_idx}: {} ({}) ${} | active {} | sanctioned {} | arrest {} | {:?}\n",
                player.name(),
                player.role(),
                player.coins(),
                player.is_active(),
                player.is_sanctioned(),
                player.can_arrest(),
                player.last_action(),
            ).as_str())?;
        }
        Ok(())
    }
}

impl Game {
    /// Seats `names` in order and deals each a random role from the pool.
    pub fn new<R: Rng + Sized>(names: &[&str], rng: &mut R) -> Result<Self, GameError> {
        let roles = config::deal_roles(names.len(), rng)?;
        let players = names
            .iter()
            .zip(roles)
            .map(|(&name, role)| Player::new(name, role, STARTING_COINS))
            .collect();

        Self::from_players(players)
    }

    pub fn with_roles(seats: &[(&str, Role)]) -> Result<Self, GameError> {
        Self::from_players(seats
            .iter()
            .map(|&(name, role)| Player::new(name, role, STARTING_COINS))
            .collect())
    }

    pub fn from_players(players: Vec<Player>) -> Result<Self, GameError> {
        let mut names = HashSet::new();
        for player in &players {
            if !names.insert(player.name()) {
                return Err(SetupError::DuplicateName(player.name().to_string()).into());
            }
        }

        Ok(Self {
            players,
            ..Self::default()
        })
    }

    /// Starts over with a new roster.
    pub fn reset(&mut self, players: Vec<Player>) -> Result<(), GameError> {
        *self = Self::from_players(players)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_idx: usize) -> Result<&Player, Illegal> {
        self.players.get(player_idx).ok_or(Illegal::UnknownPlayer(player_idx))
    }

    fn player_mut(&mut self, player_idx: usize) -> Result<&mut Player, Illegal> {
        self.players.get_mut(player_idx).ok_or(Illegal::UnknownPlayer(player_idx))
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|player| player.name() == name)
    }

    /// Seat whose turn it is.
    pub fn get_turn(&self) -> usize {
        self.current_player_idx
    }

    /// Number of times the turn has passed.
    pub fn turns(&self) -> usize {
        self.turn
    }

    pub fn bribe_pending(&self) -> bool {
        self.bribe_pending
    }

    /// The current player bribed and has not used the extra action yet.
    pub fn has_bonus_turn(&self) -> bool {
        self.bribe_pending
    }

    pub fn history(&self) -> &[Entry] {
        &self.history
    }

    pub fn is_current(&self, player_idx: usize) -> Result<bool, GameError> {
        if self.players.is_empty() {
            return Err(SetupError::EmptyRoster.into());
        }
        Ok(player_idx == self.current_player_idx)
    }

    pub fn set_turn(&mut self, player_idx: usize) -> Result<(), GameError> {
        self.player(player_idx)?;
        self.current_player_idx = player_idx;
        Ok(())
    }

    pub fn set_coins(&mut self, player_idx: usize, coins: u8) -> Result<(), GameError> {
        self.player_mut(player_idx)?.coins = coins;
        Ok(())
    }

    pub fn set_active(&mut self, player_idx: usize, active: bool) -> Result<(), GameError> {
        self.player_mut(player_idx)?.active = active;
        Ok(())
    }

    pub fn set_sanctioned(&mut self, player_idx: usize, sanctioned: bool) -> Result<(), GameError> {
        self.player_mut(player_idx)?.sanctioned = sanctioned;
        Ok(())
    }

    pub fn set_can_arrest(&mut self, player_idx: usize, can_arrest: bool) -> Result<(), GameError> {
        self.player_mut(player_idx)?.can_arrest = can_arrest;
        Ok(())
    }

    pub fn set_last_arrested(&mut self, player_idx: usize, last_arrested: bool) -> Result<(), GameError> {
        self.player_mut(player_idx)?.last_arrested = last_arrested;
        Ok(())
    }

    pub fn set_last_action(&mut self, player_idx: usize, last_action: ActionKind) -> Result<(), GameError> {
        self.player_mut(player_idx)?.last_action = last_action;
        Ok(())
    }

    fn other_player_indexes(&self, exclude_idx: usize) -> Vec<usize> {
        (1..self.players.len())
            .map(|n| (exclude_idx + n) % self.players.len())
            .filter(|player_idx| self.players[*player_idx].is_active())
            .collect()
    }

    /// Fails if `player_idx` may not take a base action of `kind` right now.
    pub fn check_valid_move(&self, player_idx: usize, kind: ActionKind) -> Result<(), GameError> {
        self.check_seat(player_idx, kind, true).map(|_| ())
    }

    // `on_turn` is false when asking whether a seat could act once the turn reaches it
    fn check_seat(&self, player_idx: usize, kind: ActionKind, on_turn: bool) -> Result<&Player, GameError> {
        let player = self.player(player_idx)?;
        if !player.is_active() {
            return Err(Illegal::Inactive.into());
        }
        if on_turn && !self.is_current(player_idx)? {
            return Err(Illegal::OutOfTurn.into());
        }
        if player.coins() >= FORCED_COUP && kind != ActionKind::Coup {
            return Err(Illegal::MustCoup.into());
        }
        Ok(player)
    }

    // another seat that is still in the game
    fn opponent(&self, player_idx: usize, target_player_idx: usize) -> Result<&Player, Illegal> {
        let target = self.player(target_player_idx)?;
        if target_player_idx == player_idx {
            return Err(Illegal::SelfTarget);
        }
        if !target.is_active() {
            return Err(Illegal::TargetInactive);
        }
        Ok(target)
    }

    fn check_collect(&self, player_idx: usize, kind: ActionKind, on_turn: bool) -> Result<(), GameError> {
        if self.check_seat(player_idx, kind, on_turn)?.is_sanctioned() {
            return Err(Illegal::Sanctioned.into());
        }
        Ok(())
    }

    /// Checks `action` against the rules without touching the game.
    pub fn validate(&self, action: Action) -> Result<(), GameError> {
        self.check_action(action, true)
    }

    fn check_action(&self, action: Action, on_turn: bool) -> Result<(), GameError> {
        match action {
            Action::Gather(player_idx) => self.check_collect(player_idx, ActionKind::Gather, on_turn),
            Action::Tax(player_idx) => self.check_collect(player_idx, ActionKind::Tax, on_turn),
            Action::Bribe(player_idx) => {
                self.check_seat(player_idx, ActionKind::Bribe, on_turn)?.require_funds(BRIBE_COST)?;
                Ok(())
            }
            Action::Arrest(player_idx, target_player_idx) => {
                let player = self.check_seat(player_idx, ActionKind::Arrest, on_turn)?;
                let target = self.opponent(player_idx, target_player_idx)?;
                if !player.can_arrest() {
                    return Err(Illegal::ArrestDisabled.into());
                }
                if target.last_arrested() {
                    return Err(Illegal::RepeatArrest.into());
                }
                let needed = target.role().arrest_floor();
                if target.coins() < needed {
                    return Err(Illegal::TargetTooPoor { needed, held: target.coins() }.into());
                }
                Ok(())
            }
            Action::Sanction(player_idx, target_player_idx) => {
                let player = self.check_seat(player_idx, ActionKind::Sanction, on_turn)?;
                let target = self.opponent(player_idx, target_player_idx)?;
                player.require_funds(SANCTION_COST + target.role().sanction_surcharge())?;
                Ok(())
            }
            Action::Coup(player_idx, target_player_idx) => {
                let player = self.check_seat(player_idx, ActionKind::Coup, on_turn)?;
                self.opponent(player_idx, target_player_idx)?;
                player.require_funds(COUP_COST)?;
                Ok(())
            }
            Action::Invest(baron_idx) => self.validate_invest(baron_idx),
            Action::BlockTax(governor_idx, target_player_idx) => self.validate_block_tax(governor_idx, target_player_idx),
            Action::UndoCoup(general_idx, couper_idx, rescued_idx) => {
                self.validate_undo_coup(general_idx, couper_idx, rescued_idx)
            }
            Action::BlockBribe(judge_idx, briber_idx) => self.validate_block_bribe(judge_idx, briber_idx),
            Action::Disable(spy_idx, target_player_idx) => self.validate_disable(spy_idx, target_player_idx),
        }
    }

    /// Applies `action` if it is legal. On any error the game is left exactly as it was.
    pub fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        self.validate(action)?;

        let mut game = self.clone();
        game.resolve(action)?;
        // a counter-ability or a bribe can leave the seat holding the turn with nothing to do
        if game.survivor().is_none() && !game.can_take_action(game.current_player_idx) {
            game.turn_manager()?;
        }

        debug!("T{}: {:?}", self.turn, action);
        *self = game;
        Ok(())
    }

    pub fn gather(&mut self, player_idx: usize) -> Result<(), GameError> {
        self.apply_action(Action::Gather(player_idx))
    }

    pub fn tax(&mut self, player_idx: usize) -> Result<(), GameError> {
        self.apply_action(Action::Tax(player_idx))
    }

    pub fn bribe(&mut self, player_idx: usize) -> Result<(), GameError> {
        self.apply_action(Action::Bribe(player_idx))
    }

    pub fn arrest(&mut self, player_idx: usize, target_player_idx: usize) -> Result<(), GameError> {
        self.apply_action(Action::Arrest(player_idx, target_player_idx))
    }

    pub fn sanction(&mut self, player_idx: usize, target_player_idx: usize) -> Result<(), GameError> {
        self.apply_action(Action::Sanction(player_idx, target_player_idx))
    }

    pub fn coup(&mut self, player_idx: usize, target_player_idx: usize) -> Result<(), GameError> {
        self.apply_action(Action::Coup(player_idx, target_player_idx))
    }

    // runs on a scratch copy, after validation
    fn resolve(&mut self, action: Action) -> Result<(), GameError> {
        match action {
            Action::Gather(player_idx) => {
                self.players[player_idx].earn(GATHER_YIELD);
            }
            Action::Tax(player_idx) => {
                let amount = self.players[player_idx].role().tax_yield();
                self.players[player_idx].earn(amount);
            }
            Action::Bribe(player_idx) => {
                self.players[player_idx].spend(BRIBE_COST)?;
                self.bribe_pending = true;
                self.settle(action);
                // the turn stays with the briber for one more action
                return Ok(());
            }
            Action::Arrest(player_idx, target_player_idx) => {
                let settlement = self.players[target_player_idx].role().arrest_settlement();
                self.players[target_player_idx].spend(settlement.target_loss)?;
                self.players[player_idx].earn(settlement.arrester_gain);

                for (idx, player) in self.players.iter_mut().enumerate() {
                    player.last_arrested = idx == target_player_idx;
                }
            }
            Action::Sanction(player_idx, target_player_idx) => {
                let target_role = self.players[target_player_idx].role();
                self.players[player_idx].spend(SANCTION_COST + target_role.sanction_surcharge())?;
                self.players[target_player_idx].sanctioned = true;
                self.players[target_player_idx].earn(target_role.sanction_compensation());
            }
            Action::Coup(player_idx, target_player_idx) => {
                self.players[player_idx].spend(COUP_COST)?;
                self.players[target_player_idx].active = false;
                self.settle(action);

                // the winning coup keeps the turn on the couper, see `resolve_undo_coup`
                if let Ok(winner) = self.winner() {
                    info!("game over, winner is {winner}");
                    self.bribe_pending = false;
                    return Ok(());
                }
                return self.turn_manager();
            }
            Action::Invest(baron_idx) => return self.resolve_invest(baron_idx),
            Action::BlockTax(governor_idx, target_player_idx) => {
                return self.resolve_block_tax(governor_idx, target_player_idx);
            }
            Action::UndoCoup(general_idx, couper_idx, rescued_idx) => {
                return self.resolve_undo_coup(general_idx, couper_idx, rescued_idx);
            }
            Action::BlockBribe(judge_idx, briber_idx) => return self.resolve_block_bribe(judge_idx, briber_idx),
            Action::Disable(spy_idx, target_player_idx) => return self.resolve_disable(spy_idx, target_player_idx),
        }

        self.settle(action);
        self.turn_manager()
    }

    // remembers the action on the actor and in the journal
    fn settle(&mut self, action: Action) {
        let player_idx = action.actor();
        if let Some(kind) = action.kind() {
            self.players[player_idx].last_action = kind;
        }

        let entry = Entry {
            turn: self.turn,
            player: self.players[player_idx].name().to_string(),
            action: action.name().to_string(),
            target: action.target().map(|idx| self.players[idx].name().to_string()),
            coins: self.players[player_idx].coins(),
        };
        self.history.push(entry);
    }

    fn release_current(&mut self) {
        if let Some(player) = self.players.get_mut(self.current_player_idx) {
            player.release();
        }
    }

    /// Ends the current player's turn and hands it to the next player who can act.
    pub fn turn_manager(&mut self) -> Result<(), GameError> {
        if self.players.is_empty() {
            warn!("turn advance with an empty roster");
            return Err(SetupError::EmptyRoster.into());
        }

        self.release_current();

        if self.bribe_pending {
            self.bribe_pending = false;
            debug!("{} used the bonus action", self.players[self.current_player_idx].name());
        }

        let seats = self.players.len();
        for _ in 0..seats {
            self.current_player_idx = self.next_living_player()?;
            self.turn += 1;

            let player = &mut self.players[self.current_player_idx];
            let bonus = player.role().turn_bonus(player.coins());
            player.earn(bonus);

            if self.survivor().is_some() || self.can_take_action(self.current_player_idx) {
                debug!("T{}: {} to act", self.turn, self.players[self.current_player_idx].name());
                return Ok(());
            }

            info!("{} has no legal action, skipping", self.players[self.current_player_idx].name());
            self.release_current();
        }

        warn!("no seat out of {seats} can act");
        Err(SetupError::Deadlock { seats }.into())
    }

    // when every other seat is empty this lands back on the current one
    fn next_living_player(&self) -> Result<usize, SetupError> {
        let seats = self.players.len();
        (1..=seats)
            .map(|step| (self.current_player_idx + step) % seats)
            .find(|&idx| self.players[idx].is_active())
            .ok_or(SetupError::NoActivePlayer)
    }

    /// Whether someone else is worth arresting for `player_idx`.
    pub fn has_arrest_options(&self, player_idx: usize) -> bool {
        match self.players.get(player_idx) {
            Some(player) if player.can_arrest() => self.players
                .iter()
                .enumerate()
                .any(|(idx, other)| {
                    idx != player_idx
                        && other.is_active()
                        && !other.last_arrested()
                        && other.coins() >= other.role().arrest_floor()
                }),
            _ => false,
        }
    }

    /// Whether `player_idx` has at least one legal base action once the turn is theirs.
    pub fn can_take_action(&self, player_idx: usize) -> bool {
        self.base_moves(player_idx)
            .into_iter()
            .any(|action| self.check_action(action, false).is_ok())
    }

    // every base action `player_idx` might try, legal or not
    fn base_moves(&self, player_idx: usize) -> Vec<Action> {
        let mut moves = vec![Action::Gather(player_idx), Action::Tax(player_idx), Action::Bribe(player_idx)];
        for opponent_idx in self.other_player_indexes(player_idx) {
            moves.push(Action::Arrest(player_idx, opponent_idx));
            moves.push(Action::Sanction(player_idx, opponent_idx));
            moves.push(Action::Coup(player_idx, opponent_idx));
        }
        moves
    }

    /// Seat of the sole remaining player.
    pub fn survivor(&self) -> Option<usize> {
        let mut survivors = self.players
            .iter()
            .enumerate()
            .filter(|(_, player)| player.is_active());

        match (survivors.next(), survivors.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }

    pub fn winner(&self) -> Result<&str, GameError> {
        match self.survivor() {
            Some(idx) => Ok(self.players[idx].name()),
            None => Err(Illegal::NoWinner.into()),
        }
    }

    /// Every base action, and the baron's investment, the current player may take now.
    pub fn actions(&self) -> Vec<Action> {
        let me = self.current_player_idx;
        let mut actions = self.base_moves(me);
        actions.push(Action::Invest(me));

        actions.retain(|action| self.validate(*action).is_ok());
        actions
    }
}
