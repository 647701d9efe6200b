//! Dice pool effects.

use crate::element::Element;
use crate::error::{EngineError, Result};
use crate::random::RandomSource;
use crate::state::GameState;
use crate::target::PlayerId;

pub(super) fn add_dice(state: GameState, pid: PlayerId, element: Element, num: u32) -> GameState {
    state.map_player(pid, |p| {
        let dice = p.dice.clone().with_added(element, num);
        p.with_dice(dice)
    })
}

pub(super) fn remove_dice(
    state: GameState,
    pid: PlayerId,
    element: Element,
    num: u32,
) -> Result<GameState> {
    let Some(dice) = state.player(pid).dice.clone().checked_remove(element, num) else {
        tracing::warn!(%pid, %element, num, "paying dice the pool does not hold");
        return Err(EngineError::InsufficientDice {
            pid,
            elem: element,
            num,
        });
    };
    Ok(state.map_player(pid, |p| p.with_dice(dice)))
}

pub(super) fn roll_dice(
    state: GameState,
    pid: PlayerId,
    num: u32,
    rng: &mut dyn RandomSource,
) -> GameState {
    let rolled: Vec<Element> = (0..num).map(|_| rng.roll_die()).collect();
    tracing::debug!(%pid, ?rolled, "dice rolled");
    state.map_player(pid, |p| {
        let dice = rolled
            .into_iter()
            .fold(p.dice.clone(), |dice, face| dice.with_added(face, 1));
        p.with_dice(dice)
    })
}
