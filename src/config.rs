//! Rule constants and game setup.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, thread_rng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use crate::error::{GameError, SetupError};
use crate::player::Player;
use crate::role::{Role, ROLE_POOL};
use crate::Game;

pub const STARTING_COINS: u8 = 2;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

pub const GATHER_YIELD: u8 = 1;
pub const TAX_YIELD: u8 = 2;
pub const GOVERNOR_TAX_YIELD: u8 = 3;
pub const BRIBE_COST: u8 = 4;
pub const SANCTION_COST: u8 = 3;
pub const COUP_COST: u8 = 7;
// at this many coins coup is the only legal action
pub const FORCED_COUP: u8 = 10;

pub const INVEST_MIN: u8 = 3;
pub const INVEST_YIELD: u8 = 3;
pub const UNDO_COUP_COST: u8 = 5;
pub const MERCHANT_THRESHOLD: u8 = 2;

/// How to seat a new game. Deserializable so a front end can keep it in a json file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Setup {
    pub names: Vec<String>,
    // role names by seat; shuffled from the pool when absent
    pub roles: Option<Vec<String>>,
    pub starting_coins: u8,
    pub seed: Option<u64>,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            roles: None,
            starting_coins: STARTING_COINS,
            seed: None,
        }
    }
}

impl Setup {
    /// `count` seats named "Player 1", "Player 2", ...
    pub fn seats(count: usize) -> Self {
        Self {
            names: (1..=count).map(|n| format!("Player {n}")).collect(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn roles(&self) -> Result<Vec<Role>, SetupError> {
        match &self.roles {
            Some(roles) => {
                if roles.len() != self.names.len() {
                    return Err(SetupError::RoleCount { names: self.names.len(), roles: roles.len() });
                }
                Ok(roles.iter().map(|name| Role::from_name(name)).collect())
            }
            None => match self.seed {
                Some(seed) => deal_roles(self.names.len(), &mut Pcg64::seed_from_u64(seed)),
                None => deal_roles(self.names.len(), &mut thread_rng()),
            },
        }
    }

    pub fn build(&self) -> Result<Game, GameError> {
        check_seat_count(self.names.len())?;

        let players = self.names
            .iter()
            .zip(self.roles()?)
            .map(|(name, role)| Player::new(name.as_str(), role, self.starting_coins))
            .collect();

        Game::from_players(players)
    }
}

pub(crate) fn check_seat_count(count: usize) -> Result<(), SetupError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        return Err(SetupError::SeatCount { count, min: MIN_PLAYERS, max: MAX_PLAYERS });
    }
    Ok(())
}

/// Shuffles the role pool and hands out the first `count` roles.
pub fn deal_roles<R: Rng + Sized>(count: usize, rng: &mut R) -> Result<Vec<Role>, SetupError> {
    check_seat_count(count)?;
    let mut pool = ROLE_POOL.to_vec();
    pool.shuffle(rng);
    pool.truncate(count);
    Ok(pool)
}
