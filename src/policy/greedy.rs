//! Greedy target selection.
//!
//! Each owned factory, strongest first, picks the affordable target with the
//! best distance-to-production ratio and sends exactly what the route costs.
//! Targets farther than one edge get their first leg now and the rest queued
//! on the scheduler.

use std::cmp::Reverse;

use tracing::{debug, warn};

use super::cost::{cyborgs_needed, Sizing};
use crate::board::{BoardError, FactoryId, Order, Owner, WorldModel, UNREACHABLE};
use crate::schedule::CommandScheduler;

/// Turns the current world into this turn's orders.
pub trait Policy {
    /// Picks orders, applying each to `world` and queueing follow-up legs on
    /// `scheduler`. An empty result means nothing worth doing.
    fn decide(
        &mut self,
        world: &mut WorldModel,
        scheduler: &mut CommandScheduler,
    ) -> Result<Vec<Order>, BoardError>;
}

/// A chosen target for one source.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Choice {
    target: FactoryId,
    cyborgs: i32,
    score: f64,
}

/// Default policy: cheapest production per turn of travel.
#[derive(Debug, Clone, Default)]
pub struct GreedyPolicy {
    sizing: Sizing,
}

impl GreedyPolicy {
    pub fn new(sizing: Sizing) -> Self {
        GreedyPolicy { sizing }
    }

    /// Best affordable target for `src` among `pool`, skipping `claimed`.
    fn best_target(
        &self,
        world: &WorldModel,
        src: FactoryId,
        pool: &[FactoryId],
        claimed: &[FactoryId],
    ) -> Result<Option<Choice>, BoardError> {
        let budget = world.actual()[src].cyborgs;
        let mut best: Option<Choice> = None;

        for &target in pool {
            if target == src || claimed.contains(&target) {
                continue;
            }
            let distance = world.graph().distance(src, target);
            if distance == UNREACHABLE {
                continue;
            }
            let cyborgs = cyborgs_needed(world, src, target, self.sizing)?;
            if cyborgs > budget {
                continue;
            }
            let production = world.perceived()[target].production;
            let score = if production > 0 {
                distance as f64 / production as f64
            } else {
                distance as f64
            };
            if best.map_or(true, |b| score < b.score) {
                best = Some(Choice {
                    target,
                    cyborgs,
                    score,
                });
            }
        }
        Ok(best)
    }

    /// Sends `src` at its best target, if any.
    fn dispatch(
        &self,
        world: &mut WorldModel,
        scheduler: &mut CommandScheduler,
        src: FactoryId,
        claimed: &[FactoryId],
    ) -> Result<Option<(Order, FactoryId)>, BoardError> {
        let pool = world.target_pool();
        let Some(choice) = self.best_target(world, src, &pool, claimed)? else {
            return Ok(None);
        };
        let Some(next) = world.graph().next_hop(src, choice.target)? else {
            return Ok(None);
        };

        world.commit_move(src, next, choice.cyborgs, self.sizing.margin_turns)?;
        if next != choice.target {
            let travel = world.graph().distance(src, next) as i32;
            scheduler.defer(next, choice.target, travel);
        }
        debug!(
            from = src,
            next,
            target = choice.target,
            cyborgs = choice.cyborgs,
            "target chosen"
        );
        let order = Order::Move {
            from: src,
            to: next,
            cyborgs: choice.cyborgs,
        };
        Ok(Some((order, choice.target)))
    }
}

impl Policy for GreedyPolicy {
    /// Never fails as a whole: a source whose evaluation errors is logged and
    /// skipped, and the orders of the other sources stand.
    fn decide(
        &mut self,
        world: &mut WorldModel,
        scheduler: &mut CommandScheduler,
    ) -> Result<Vec<Order>, BoardError> {
        let mut sources = world.player_factories(Owner::Me);
        sources.sort_by_key(|&id| Reverse(world.actual()[id].cyborgs));

        let mut orders = Vec::new();
        let mut claimed = Vec::new();
        for src in sources {
            if world.actual()[src].cyborgs <= 0 {
                continue;
            }
            match self.dispatch(world, scheduler, src, &claimed) {
                Ok(Some((order, target))) => {
                    orders.push(order);
                    claimed.push(target);
                }
                Ok(None) => {}
                Err(e) => warn!(from = src, error = %e, "skipping source"),
            }
        }
        Ok(orders)
    }
}
