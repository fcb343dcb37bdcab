//! Forward projection of combat at each factory.
//!
//! Snapshots only show where troops are, not what happens when they land.
//! For every destination, incoming troops are walked in arrival order and
//! each arrival batch is fought against the garrison, with production
//! accrued between batches. The result is written to the perceived table.
//!
//! Neutral factories only ever lose cyborgs to a batch: the batch's net force
//! is subtracted as an absolute value, so opposing arrivals cancel each
//! other before touching the garrison.

use crate::board::{Factory, Owner, Troop, WorldModel};

/// Recomputes the perceived table from the ground truth and this turn's troops.
///
/// Runs from scratch every time, so repeated calls on an unchanged snapshot
/// give the same result.
pub fn project(world: &mut WorldModel) {
    world.reset_perception();
    let destinations: Vec<_> = world.troop_destinations().collect();
    for dst in destinations {
        let troops = world.troops_to(dst);
        project_factory(&mut world.perceived_mut()[dst], &troops);
    }
}

/// Resolves every troop heading to one factory, in arrival order.
pub fn project_factory(factory: &mut Factory, troops: &[Troop]) {
    let mut arrivals = troops.to_vec();
    arrivals.sort_by_key(|t| t.turns_left);

    let mut last_update = 0;
    for batch in arrivals.chunk_by(|a, b| a.turns_left == b.turns_left) {
        let arrival = batch[0].turns_left;
        let delta: i32 = batch.iter().map(|t| t.cyborgs * t.owner.sign()).sum();
        resolve_batch(factory, delta, arrival - last_update);
        last_update = arrival;
    }
}

/// Fights one simultaneous arrival batch with net force `delta` (positive
/// favours us) after `elapsed` turns of production.
fn resolve_batch(factory: &mut Factory, delta: i32, elapsed: i32) {
    let before = factory.owner;
    if before == Owner::Neutral {
        factory.cyborgs -= delta.abs();
    } else {
        factory.cyborgs += factory.production * elapsed;
        factory.cyborgs += delta * before.sign();
    }

    if factory.cyborgs < 0 {
        factory.cyborgs = -factory.cyborgs;
        factory.owner = match before {
            Owner::Neutral => Owner::from_sign(delta),
            owner => owner.opposite(),
        };
    }
}
