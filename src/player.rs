use serde::{Deserialize, Serialize};
use crate::action::ActionKind;
use crate::error::Illegal;
use crate::role::Role;

/// One seat at the table. Only the coordinator mutates it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    role: Role,
    pub(crate) coins: u8,
    pub(crate) active: bool,
    pub(crate) sanctioned: bool,
    pub(crate) can_arrest: bool,
    pub(crate) last_arrested: bool,
    pub(crate) last_action: ActionKind,
}

impl Player {
    pub fn new(name: impl Into<String>, role: Role, coins: u8) -> Self {
        Self {
            name: name.into(),
            role,
            coins,
            active: true,
            sanctioned: false,
            can_arrest: true,
            last_arrested: false,
            last_action: ActionKind::None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn coins(&self) -> u8 {
        self.coins
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_sanctioned(&self) -> bool {
        self.sanctioned
    }

    pub fn can_arrest(&self) -> bool {
        self.can_arrest
    }

    pub fn last_arrested(&self) -> bool {
        self.last_arrested
    }

    pub fn last_action(&self) -> ActionKind {
        self.last_action
    }

    pub(crate) fn require_funds(&self, needed: u8) -> Result<(), Illegal> {
        if self.coins < needed {
            return Err(Illegal::InsufficientFunds { needed, held: self.coins });
        }
        Ok(())
    }

    pub(crate) fn earn(&mut self, amount: u8) {
        self.coins = self.coins.saturating_add(amount);
    }

    pub(crate) fn spend(&mut self, amount: u8) -> Result<(), Illegal> {
        self.require_funds(amount)?;
        self.coins -= amount;
        Ok(())
    }

    // ends this player's turn: statuses that last "until their next turn" run out here
    pub(crate) fn release(&mut self) {
        self.sanctioned = false;
        self.can_arrest = true;
    }
}

#[cfg(test)]
mod tests {
    use crate::action::ActionKind;
    use crate::error::Illegal;
    use crate::player::Player;
    use crate::role::Role;

    #[test]
    fn fresh_player() {
        let player = Player::new("TestPlayer", Role::Citizen, 0);
        assert_eq!(player.name(), "TestPlayer");
        assert_eq!(player.coins(), 0);
        assert!(player.is_active());
        assert!(!player.is_sanctioned());
        assert!(player.can_arrest());
        assert!(!player.last_arrested());
        assert_eq!(player.last_action(), ActionKind::None);
    }

    #[test]
    fn spend_never_goes_negative() {
        let mut player = Player::new("p", Role::Citizen, 3);
        assert_eq!(player.spend(4), Err(Illegal::InsufficientFunds { needed: 4, held: 3 }));
        assert_eq!(player.coins(), 3);
        player.spend(3).unwrap();
        assert_eq!(player.coins(), 0);
    }

    #[test]
    fn release_clears_turn_statuses() {
        let mut player = Player::new("p", Role::Spy, 2);
        player.sanctioned = true;
        player.can_arrest = false;
        player.release();
        assert!(!player.is_sanctioned());
        assert!(player.can_arrest());
    }
}
