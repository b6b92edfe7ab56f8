//! Role dispatch table.
//!
//! Every rule that depends on who a player is lives here, keyed by [`Role`], so the
//! coordinator never has to ask "is this a Merchant" at its call sites.

use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::config::{GOVERNOR_TAX_YIELD, TAX_YIELD, MERCHANT_THRESHOLD};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Citizen,
    Governor,
    Spy,
    Baron,
    General,
    Judge,
    Merchant,
}

/// The roles dealt at setup. Citizens only appear when assigned explicitly.
pub static ROLE_POOL: [Role; 6] = [
    Role::Governor,
    Role::Spy,
    Role::Baron,
    Role::General,
    Role::Judge,
    Role::Merchant,
];

/// Coin movement of an arrest, from the point of view of the arrested role.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArrestSettlement {
    pub arrester_gain: u8,
    pub target_loss: u8,
}

/// The unique ability a role brings to the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ability {
    Invest,
    BlockTax,
    UndoCoup,
    BlockBribe,
    DisableArrest,
}

impl Role {
    /// Unknown names fall back to a plain citizen.
    pub fn from_name(name: &str) -> Role {
        match name {
            "Governor" => Role::Governor,
            "Spy" => Role::Spy,
            "Baron" => Role::Baron,
            "General" => Role::General,
            "Judge" => Role::Judge,
            "Merchant" => Role::Merchant,
            _ => Role::Citizen,
        }
    }

    pub fn tax_yield(self) -> u8 {
        match self {
            Role::Governor => GOVERNOR_TAX_YIELD,
            _ => TAX_YIELD,
        }
    }

    /// Fewest coins this role must hold to be a legal arrest target.
    pub fn arrest_floor(self) -> u8 {
        match self {
            Role::Merchant => 2,
            _ => 1,
        }
    }

    pub fn arrest_settlement(self) -> ArrestSettlement {
        match self {
            // the transfer is reversed
            Role::General => ArrestSettlement { arrester_gain: 0, target_loss: 0 },
            // merchant pays the treasury instead of the arrester, on top of the normal penalty
            Role::Merchant => ArrestSettlement { arrester_gain: 0, target_loss: 2 },
            _ => ArrestSettlement { arrester_gain: 1, target_loss: 1 },
        }
    }

    /// Extra coins the sanctioning player pays when this role is the target.
    pub fn sanction_surcharge(self) -> u8 {
        match self {
            Role::Judge => 1,
            _ => 0,
        }
    }

    /// Coins this role receives for being sanctioned.
    pub fn sanction_compensation(self) -> u8 {
        match self {
            Role::Baron => 1,
            _ => 0,
        }
    }

    /// Coins granted when this role's turn begins.
    pub fn turn_bonus(self, coins: u8) -> u8 {
        match self {
            Role::Merchant if coins > MERCHANT_THRESHOLD => 1,
            _ => 0,
        }
    }

    pub fn ability(self) -> Option<Ability> {
        match self {
            Role::Citizen | Role::Merchant => None,
            Role::Governor => Some(Ability::BlockTax),
            Role::Spy => Some(Ability::DisableArrest),
            Role::Baron => Some(Ability::Invest),
            Role::General => Some(Ability::UndoCoup),
            Role::Judge => Some(Ability::BlockBribe),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::role::{Ability, Role, ROLE_POOL};

    #[test]
    fn factory_names() {
        for role in ROLE_POOL {
            assert_eq!(Role::from_name(&role.to_string()), role);
        }
        assert_eq!(Role::from_name("Duke"), Role::Citizen);
    }

    #[test]
    fn only_governor_taxes_more() {
        assert_eq!(Role::Governor.tax_yield(), 3);
        assert_eq!(Role::Citizen.tax_yield(), 2);
        assert_eq!(Role::Merchant.tax_yield(), 2);
    }

    #[test]
    fn merchant_bonus_needs_more_than_two() {
        assert_eq!(Role::Merchant.turn_bonus(2), 0);
        assert_eq!(Role::Merchant.turn_bonus(3), 1);
        assert_eq!(Role::Baron.turn_bonus(9), 0);
    }

    #[test]
    fn passive_roles_have_no_ability() {
        assert_eq!(Role::Merchant.ability(), None);
        assert_eq!(Role::Citizen.ability(), None);
        assert_eq!(Role::Spy.ability(), Some(Ability::DisableArrest));
    }
}
