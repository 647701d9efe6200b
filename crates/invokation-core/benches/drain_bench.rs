use criterion::{black_box, criterion_group, criterion_main, Criterion};
use invokation_core::event::DamageKind;
use invokation_core::prelude::*;
use invokation_core::effect::SpecificDamageEffect;

fn team(elements: [Element; 3]) -> PlayerState {
    let chars = elements
        .into_iter()
        .zip(1..)
        .map(|(element, id)| {
            Character::new(id, format!("bench {id}"), element, 30, 2).with_skill(SkillSpec::new(
                SkillType::ElementalSkill,
                element,
                1,
                Dice::new(),
            ))
        })
        .collect();
    PlayerState::new(Characters::new(chars, Some(1)))
}

fn duel() -> GameState {
    GameState::new(
        team([Element::Pyro, Element::Electro, Element::Anemo]),
        team([Element::Hydro, Element::Cryo, Element::Dendro]),
    )
}

fn bench_skill_exchange(c: &mut Criterion) {
    // Alternating skills so auras keep reacting
    let casts: Vec<Effect> = (0..10)
        .flat_map(|_| {
            [PlayerId::P1, PlayerId::P2].map(|pid| Effect::CastSkill {
                target: StaticTarget::character(pid, 1),
                skill: SkillType::ElementalSkill,
            })
        })
        .collect();
    let state = duel().push_many_first_to_last(casts);

    c.bench_function("skill_exchange_drain", |b| {
        b.iter(|| {
            let mut engine = Engine::new(EngineConfig::default());
            black_box(engine.drain(state.clone()))
        })
    });
}

fn bench_swirl_spread(c: &mut Criterion) {
    let hits: Vec<Effect> = [Element::Pyro, Element::Anemo, Element::Hydro, Element::Anemo]
        .into_iter()
        .map(|element| {
            Effect::SpecificDamage(SpecificDamageEffect::new(
                StaticTarget::character(PlayerId::P1, 3),
                StaticTarget::character(PlayerId::P2, 1),
                element,
                1,
                DamageKind::ElementalSkill,
            ))
        })
        .collect();
    let state = duel().push_many_first_to_last(hits);

    c.bench_function("swirl_spread_drain", |b| {
        b.iter(|| {
            let mut engine = Engine::new(EngineConfig::default());
            black_box(engine.drain(state.clone()))
        })
    });
}

fn bench_dice_roll(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default().with_seed(7));
    let state = duel().push_one(engine.roll_dice_effect(PlayerId::P1));

    c.bench_function("roll_dice", |b| b.iter(|| black_box(engine.drain(state.clone()))));
}

criterion_group!(benches, bench_skill_exchange, bench_swirl_spread, bench_dice_roll);
criterion_main!(benches);
