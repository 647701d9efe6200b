//! Defeat, death-swap and swap-signal checkers.

use crate::error::{EngineError, Result};
use crate::event::Informable;
use crate::processing;
use crate::signal::TriggeringSignal;
use crate::state::{Character, GameState, Phase, PlayerAct};
use crate::target::{PlayerId, StaticTarget};

use super::Effect;

pub(super) fn alive_mark(state: GameState) -> Result<GameState> {
    let first = state.active_player;
    let newly_defeated: Vec<StaticTarget> = first
        .this_then_other()
        .into_iter()
        .flat_map(|pid| {
            state
                .player(pid)
                .characters
                .iter()
                .filter(|c| c.alive && c.is_defeated())
                .map(move |c| StaticTarget::character(pid, c.id))
                .collect::<Vec<_>>()
        })
        .collect();
    if newly_defeated.is_empty() {
        return Ok(state);
    }

    let mut state = state;
    for target in &newly_defeated {
        tracing::debug!(%target, "character defeated");
        state = state.map_character(*target, Character::defeated);
    }
    for target in newly_defeated {
        state = processing::inform(state, first, &Informable::CharacterDefeated { target })?;
    }
    Ok(state.push_one(Effect::AllStatusTriggerer {
        pid: first,
        signal: TriggeringSignal::DeathEvent,
    }))
}

pub(super) fn defeated(state: GameState) -> GameState {
    if state.phase == Phase::GameEnd {
        return state;
    }
    let lost = [PlayerId::P1, PlayerId::P2]
        .into_iter()
        .find(|pid| state.player(*pid).characters.all_defeated());
    match lost {
        Some(pid) => {
            tracing::debug!(loser = %pid, "game over");
            state.with_phase(Phase::GameEnd)
        }
        None => state,
    }
}

pub(super) fn death_check(state: GameState) -> GameState {
    let fallen: Vec<PlayerId> = [PlayerId::P1, PlayerId::P2]
        .into_iter()
        .filter(|pid| state.active_character(*pid).is_some_and(Character::is_defeated))
        .collect();
    let [pid] = fallen.as_slice() else {
        return state;
    };
    let pid = *pid;
    if state.player(pid).characters.all_defeated() {
        return state;
    }

    tracing::debug!(%pid, "death swap forced");
    let end = Effect::DeathSwapPhaseEnd {
        pid,
        p1_act: state.player1.act,
        p2_act: state.player2.act,
        active_player: state.active_player,
    };
    state
        .map_player(pid, |p| p.with_act(PlayerAct::ActionPhase))
        .map_player(pid.other(), |p| p.with_act(PlayerAct::PassiveWaitPhase))
        .with_active_player(pid)
        .push_many_first_to_last([Effect::DeathSwapPhaseStart { pid }, end])
}

pub(super) fn swap_character_check(
    state: GameState,
    p1_active: Option<u32>,
    p2_active: Option<u32>,
) -> GameState {
    let queued: Vec<Effect> = state
        .active_player
        .this_then_other()
        .into_iter()
        .filter(|pid| {
            let before = match pid {
                PlayerId::P1 => p1_active,
                PlayerId::P2 => p2_active,
            };
            state.player(*pid).characters.active_id() != before
        })
        .flat_map(|pid| {
            [
                Effect::PlayerStatusTriggerer {
                    pid,
                    signal: TriggeringSignal::SelfSwap,
                },
                Effect::PlayerStatusTriggerer {
                    pid: pid.other(),
                    signal: TriggeringSignal::OppoSwap,
                },
            ]
        })
        .collect();
    state.push_many_first_to_last(queued)
}

pub(super) fn death_swap_phase_start() -> Result<GameState> {
    tracing::warn!("death-swap sentinel executed directly");
    Err(EngineError::SentinelExecuted {
        name: "DeathSwapPhaseStartEffect",
    })
}

pub(super) fn death_swap_phase_end(
    state: GameState,
    pid: PlayerId,
    p1_act: PlayerAct,
    p2_act: PlayerAct,
    active_player: PlayerId,
) -> GameState {
    tracing::debug!(%pid, "death swap resolved");
    state
        .map_player(PlayerId::P1, |p| p.with_act(p1_act))
        .map_player(PlayerId::P2, |p| p.with_act(p2_act))
        .with_active_player(active_player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::{duel, p1, p2, with_hp};

    #[test]
    fn alive_mark_defeats_and_broadcasts() {
        let state = alive_mark(with_hp(duel(), p2(3), 0)).unwrap();
        let fallen = state.character(p2(3)).unwrap();
        assert!(!fallen.alive);
        assert_eq!(fallen.energy, 0);
        assert_eq!(
            state.effect_stack.peek(),
            Ok(&Effect::AllStatusTriggerer {
                pid: PlayerId::P1,
                signal: TriggeringSignal::DeathEvent,
            })
        );
    }

    #[test]
    fn alive_mark_without_deaths_is_noop() {
        let state = duel();
        assert_eq!(alive_mark(state.clone()), Ok(state));
    }

    #[test]
    fn death_check_ignores_benched_deaths() {
        let state = with_hp(duel(), p1(2), 0);
        assert_eq!(death_check(state.clone()), state);
    }

    #[test]
    fn simultaneous_active_deaths_do_not_pause() {
        let state = with_hp(with_hp(duel(), p1(1), 0), p2(1), 0);
        assert!(death_check(state).effect_stack.is_empty());
    }

    #[test]
    fn defeated_checker_ends_the_game() {
        let state = [1, 2, 3]
            .into_iter()
            .fold(duel(), |state, id| state.map_character(p1(id), Character::defeated));
        assert_eq!(defeated(state).phase, Phase::GameEnd);
        assert_eq!(defeated(duel()).phase, Phase::Action);
    }

    #[test]
    fn swap_check_signals_only_the_swapping_player() {
        let state = duel().map_player(PlayerId::P2, |p| {
            let chars = p.characters.clone().with_active(3);
            p.with_characters(chars)
        });
        let state = swap_character_check(state, Some(1), Some(1));
        let queued: Vec<&Effect> = state.effect_stack.iter_top_down().collect();
        assert_eq!(
            queued,
            vec![
                &Effect::PlayerStatusTriggerer {
                    pid: PlayerId::P2,
                    signal: TriggeringSignal::SelfSwap,
                },
                &Effect::PlayerStatusTriggerer {
                    pid: PlayerId::P1,
                    signal: TriggeringSignal::OppoSwap,
                },
            ]
        );
    }
}
