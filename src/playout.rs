// random playouts, used by the simulator binary and the benchmarks

use rand::Rng;
use rand::seq::SliceRandom;
use crate::action::Action;
use crate::role::Ability;
use crate::{Game, GameError};

// chance per step of trying a counter-ability instead of a base action
const REACTION_RATE: f64 = 0.1;

impl Game {
    /// Counter-abilities any seat could use right now.
    pub fn reactions(&self) -> Vec<Action> {
        let seats = self.players().len();
        let mut actions = Vec::new();

        for (player_idx, player) in self.players().iter().enumerate() {
            let others = (0..seats).filter(move |&idx| idx != player_idx);
            match player.role().ability() {
                Some(Ability::BlockTax) => {
                    actions.extend(others.map(|target_idx| Action::BlockTax(player_idx, target_idx)));
                }
                Some(Ability::BlockBribe) => {
                    actions.extend(others.map(|target_idx| Action::BlockBribe(player_idx, target_idx)));
                }
                Some(Ability::DisableArrest) => {
                    actions.extend(others.map(|target_idx| Action::Disable(player_idx, target_idx)));
                }
                Some(Ability::UndoCoup) => {
                    for couper_idx in 0..seats {
                        for rescued_idx in 0..seats {
                            actions.push(Action::UndoCoup(player_idx, couper_idx, rescued_idx));
                        }
                    }
                }
                Some(Ability::Invest) | None => {}
            }
        }

        actions.retain(|action| self.validate(*action).is_ok());
        actions
    }
}

/// Picks a legal action uniformly, occasionally preferring a counter-ability.
pub fn random_action<R: Rng + Sized>(game: &Game, rng: &mut R) -> Option<Action> {
    if rng.gen_bool(REACTION_RATE) {
        if let Some(&action) = game.reactions().choose(rng) {
            return Some(action);
        }
    }
    game.actions().choose(rng).copied()
}

/// Plays random legal actions until someone wins or `max_steps` actions were taken.
/// Returns the winning seat, if any.
pub fn playout<R: Rng + Sized>(game: &mut Game, rng: &mut R, max_steps: usize) -> Result<Option<usize>, GameError> {
    for _ in 0..max_steps {
        if let Some(winner) = game.survivor() {
            return Ok(Some(winner));
        }

        match random_action(game, rng) {
            Some(action) => game.apply_action(action)?,
            None => break,
        }
    }

    Ok(game.survivor())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use crate::action::Action;
    use crate::playout::{playout, random_action};
    use crate::role::Role::{Citizen, General, Judge, Spy};
    use crate::Game;

    #[test]
    fn reactions_follow_the_table() {
        let mut game = Game::with_roles(&[("J", Judge), ("B", Citizen), ("S", Spy)]).unwrap();
        // only the spy has something to do
        assert_eq!(game.reactions(), vec![Action::Disable(2, 0), Action::Disable(2, 1)]);

        game.set_turn(1).unwrap();
        game.set_coins(1, 4).unwrap();
        game.bribe(1).unwrap();
        assert!(game.reactions().contains(&Action::BlockBribe(0, 1)));
    }

    #[test]
    fn general_reacts_to_a_coup() {
        let mut game = Game::with_roles(&[("A", Citizen), ("G", General), ("C", Citizen)]).unwrap();
        game.set_coins(0, 7).unwrap();
        game.set_coins(1, 5).unwrap();
        game.coup(0, 2).unwrap();
        assert_eq!(game.reactions(), vec![Action::UndoCoup(1, 0, 2)]);
    }

    #[test]
    fn finished_game_stops_immediately() {
        let mut rng = Pcg64::seed_from_u64(1);
        let mut game = Game::with_roles(&[("A", Citizen), ("B", Citizen)]).unwrap();
        game.set_active(1, false).unwrap();

        assert_eq!(playout(&mut game, &mut rng, 100).unwrap(), Some(0));
        assert!(game.history().is_empty());
    }

    #[test]
    fn random_actions_are_legal() {
        let mut rng = Pcg64::seed_from_u64(3);
        let game = Game::with_roles(&[("A", Citizen), ("B", Citizen), ("C", Citizen)]).unwrap();
        for _ in 0..50 {
            let action = random_action(&game, &mut rng).unwrap();
            assert!(game.validate(action).is_ok());
        }
    }
}
