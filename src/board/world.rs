//! Ground-truth and perceived world state.
//!
//! The world keeps two independent factory tables. `actual` is exactly what
//! the last snapshot reported (minus cyborgs we have already sent this
//! turn); `perceived` starts as a copy of it and is then pushed forward by
//! combat projection and by the orders we issue, so later decisions in the
//! same turn see a consistent "what if" picture.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use super::error::BoardError;
use super::factory::{Factory, FactoryId, Owner};
use super::graph::DistanceIndex;
use super::troop::{Route, Troop, TroopId};

/// Everything the bot knows about the match.
#[derive(Debug, Clone)]
pub struct WorldModel {
    graph: DistanceIndex,
    actual: Vec<Factory>,
    perceived: Vec<Factory>,
    /// In-flight troops keyed by destination, then by troop id.
    troops: BTreeMap<FactoryId, BTreeMap<TroopId, Troop>>,
    /// Routes of the troops seen last turn, for consistency checks.
    last_routes: HashMap<TroopId, Route>,
}

impl WorldModel {
    /// Creates a world over a prepared distance index. All factories start neutral.
    pub fn new(graph: DistanceIndex) -> Self {
        let factories: Vec<Factory> = (0..graph.len()).map(Factory::new).collect();
        WorldModel {
            graph,
            perceived: factories.clone(),
            actual: factories,
            troops: BTreeMap::new(),
            last_routes: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &DistanceIndex {
        &self.graph
    }

    pub fn factory_count(&self) -> usize {
        self.actual.len()
    }

    fn check(&self, id: FactoryId) -> Result<(), BoardError> {
        if id < self.actual.len() {
            Ok(())
        } else {
            Err(BoardError::UnknownFactory {
                id,
                count: self.actual.len(),
            })
        }
    }

    /// Ground-truth factory table.
    pub fn actual(&self) -> &[Factory] {
        &self.actual
    }

    /// Projected factory table.
    pub fn perceived(&self) -> &[Factory] {
        &self.perceived
    }

    pub fn perceived_mut(&mut self) -> &mut [Factory] {
        &mut self.perceived
    }

    /// Overwrites both copies of a factory from the snapshot.
    pub fn update_node(
        &mut self,
        id: FactoryId,
        owner: Owner,
        cyborgs: i32,
        production: i32,
    ) -> Result<(), BoardError> {
        self.check(id)?;
        let factory = Factory {
            id,
            owner,
            cyborgs,
            production,
        };
        self.actual[id] = factory;
        self.perceived[id] = factory;
        Ok(())
    }

    /// Adds a troop to this turn's in-flight set.
    ///
    /// If the same troop id was seen last turn on a different route, the
    /// mismatch is logged and the new report wins. Re-registering an id in
    /// the same turn replaces the earlier record.
    pub fn register_troop(&mut self, troop: Troop) -> Result<(), BoardError> {
        self.check(troop.from)?;
        self.check(troop.to)?;

        let route = troop.route();
        if let Some(previous) = self.last_routes.get(&troop.id) {
            if *previous != route {
                warn!(
                    troop = troop.id,
                    ?previous,
                    current = ?route,
                    "troop changed route between turns, keeping latest report"
                );
            }
        }

        for bucket in self.troops.values_mut() {
            bucket.remove(&troop.id);
        }
        self.troops.entry(troop.to).or_default().insert(troop.id, troop);
        Ok(())
    }

    /// Drops the in-flight set before a new snapshot is registered.
    pub fn clear_troops(&mut self) {
        self.last_routes = self
            .troops
            .values()
            .flat_map(|bucket| bucket.values())
            .map(|t| (t.id, t.route()))
            .collect();
        self.troops.clear();
    }

    /// Destinations that have at least one troop heading to them.
    pub fn troop_destinations(&self) -> impl Iterator<Item = FactoryId> + '_ {
        self.troops
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(&dst, _)| dst)
    }

    /// Troops heading to `dst`, in troop id order.
    pub fn troops_to(&self, dst: FactoryId) -> Vec<Troop> {
        self.troops
            .get(&dst)
            .map(|bucket| bucket.values().copied().collect())
            .unwrap_or_default()
    }

    pub fn troop_count(&self) -> usize {
        self.troops.values().map(|bucket| bucket.len()).sum()
    }

    /// Restores the perceived table to the ground truth.
    pub fn reset_perception(&mut self) {
        self.perceived.clone_from(&self.actual);
    }

    /// Removes cyborgs that have just been ordered out of `src`.
    pub fn debit_actual(&mut self, src: FactoryId, cyborgs: i32) -> Result<(), BoardError> {
        self.check(src)?;
        self.actual[src].cyborgs -= cyborgs;
        Ok(())
    }

    /// Reflects an order in the perceived table.
    ///
    /// The source loses the cyborgs at once. A friendly destination simply
    /// gains them. Otherwise they attack: they must beat the garrison, plus
    /// for an opponent factory the production it accrues over the trip and
    /// `margin_turns` extra turns, before the factory flips to us with the
    /// leftover as its garrison.
    pub fn apply_move_to_perceived(
        &mut self,
        src: FactoryId,
        dst: FactoryId,
        cyborgs: i32,
        margin_turns: i32,
    ) -> Result<(), BoardError> {
        self.check(src)?;
        self.check(dst)?;
        self.perceived[src].cyborgs -= cyborgs;

        let travel = self.graph.distance(src, dst) as i32;
        let target = &mut self.perceived[dst];
        match target.owner {
            Owner::Me => target.cyborgs += cyborgs,
            owner => {
                let mut defenders = target.cyborgs;
                if owner == Owner::Opponent {
                    defenders += target.production * (travel + margin_turns);
                }
                let remaining = defenders - cyborgs;
                if remaining < 0 {
                    target.owner = Owner::Me;
                    target.cyborgs = -remaining;
                } else {
                    target.cyborgs = remaining;
                }
            }
        }
        Ok(())
    }

    /// Applies an order to both tables: ground truth loses the cyborgs,
    /// perception sees the move play out.
    pub fn commit_move(
        &mut self,
        src: FactoryId,
        dst: FactoryId,
        cyborgs: i32,
        margin_turns: i32,
    ) -> Result<(), BoardError> {
        self.debit_actual(src, cyborgs)?;
        self.apply_move_to_perceived(src, dst, cyborgs, margin_turns)
    }

    /// Ground-truth factories held by `owner`.
    pub fn player_factories(&self, owner: Owner) -> Vec<FactoryId> {
        self.actual
            .iter()
            .filter(|f| f.owner == owner)
            .map(|f| f.id)
            .collect()
    }

    /// Perceived factories not held by us that produce cyborgs.
    pub fn producing_targets(&self) -> Vec<FactoryId> {
        self.perceived
            .iter()
            .filter(|f| f.production != 0 && f.owner != Owner::Me)
            .map(|f| f.id)
            .collect()
    }

    /// Perceived factories not held by us that produce nothing.
    pub fn idle_targets(&self) -> Vec<FactoryId> {
        self.perceived
            .iter()
            .filter(|f| f.production == 0 && f.owner != Owner::Me)
            .map(|f| f.id)
            .collect()
    }

    /// Producing targets, or the idle ones when nothing producing is left.
    pub fn target_pool(&self) -> Vec<FactoryId> {
        let producing = self.producing_targets();
        if producing.is_empty() {
            self.idle_targets()
        } else {
            producing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_world() -> WorldModel {
        let mut g = DistanceIndex::new(3);
        g.create_edge(0, 1, 1).unwrap();
        g.create_edge(1, 2, 1).unwrap();
        g.calculate();
        g.cache_all_paths();
        let mut world = WorldModel::new(g);
        world.update_node(0, Owner::Me, 10, 1).unwrap();
        world.update_node(1, Owner::Neutral, 0, 0).unwrap();
        world.update_node(2, Owner::Opponent, 3, 2).unwrap();
        world
    }

    fn troop(id: TroopId, owner: Owner, from: FactoryId, to: FactoryId) -> Troop {
        Troop {
            id,
            owner,
            cyborgs: 2,
            from,
            to,
            turns_left: 1,
        }
    }

    #[test]
    fn update_sets_both_tables() {
        let world = line_world();
        assert_eq!(world.actual()[2], world.perceived()[2]);
        assert_eq!(world.actual()[2].owner, Owner::Opponent);
        assert_eq!(world.actual()[2].cyborgs, 3);
    }

    #[test]
    fn update_unknown_factory_fails() {
        let mut world = line_world();
        assert_eq!(
            world.update_node(9, Owner::Me, 1, 1),
            Err(BoardError::UnknownFactory { id: 9, count: 3 })
        );
    }

    #[test]
    fn perceived_changes_do_not_leak() {
        let mut world = line_world();
        world.perceived_mut()[0].cyborgs = 99;
        assert_eq!(world.actual()[0].cyborgs, 10);
        world.reset_perception();
        assert_eq!(world.perceived()[0].cyborgs, 10);
    }

    #[test]
    fn troops_grouped_by_destination() {
        let mut world = line_world();
        world.register_troop(troop(1, Owner::Me, 0, 1)).unwrap();
        world.register_troop(troop(2, Owner::Opponent, 2, 1)).unwrap();
        world.register_troop(troop(3, Owner::Opponent, 1, 0)).unwrap();
        assert_eq!(world.troop_count(), 3);
        assert_eq!(world.troops_to(1).len(), 2);
        assert_eq!(world.troops_to(0).len(), 1);
        assert!(world.troops_to(2).is_empty());
        assert_eq!(world.troop_destinations().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn reregistered_troop_keeps_latest() {
        let mut world = line_world();
        world.register_troop(troop(7, Owner::Me, 0, 1)).unwrap();
        world.clear_troops();
        // Same id, different destination: logged, latest wins.
        world.register_troop(troop(7, Owner::Me, 0, 2)).unwrap();
        world.register_troop(troop(7, Owner::Me, 1, 2)).unwrap();
        assert_eq!(world.troop_count(), 1);
        assert!(world.troops_to(1).is_empty());
        assert_eq!(world.troops_to(2)[0].from, 1);
    }

    #[test]
    fn clear_troops_empties_set() {
        let mut world = line_world();
        world.register_troop(troop(1, Owner::Me, 0, 1)).unwrap();
        world.clear_troops();
        assert_eq!(world.troop_count(), 0);
        assert_eq!(world.troop_destinations().count(), 0);
    }

    #[test]
    fn move_to_friendly_reinforces() {
        let mut world = line_world();
        world.update_node(1, Owner::Me, 4, 0).unwrap();
        world.apply_move_to_perceived(0, 1, 3, 1).unwrap();
        assert_eq!(world.perceived()[0].cyborgs, 7);
        assert_eq!(world.perceived()[1].cyborgs, 7);
        assert_eq!(world.actual()[0].cyborgs, 10);
    }

    #[test]
    fn move_captures_neutral() {
        let mut world = line_world();
        world.update_node(1, Owner::Neutral, 2, 0).unwrap();
        world.apply_move_to_perceived(0, 1, 5, 1).unwrap();
        assert_eq!(world.perceived()[1].owner, Owner::Me);
        assert_eq!(world.perceived()[1].cyborgs, 3);
    }

    #[test]
    fn move_too_weak_leaves_owner() {
        let mut world = line_world();
        world.update_node(1, Owner::Neutral, 6, 0).unwrap();
        world.apply_move_to_perceived(0, 1, 4, 1).unwrap();
        assert_eq!(world.perceived()[1].owner, Owner::Neutral);
        assert_eq!(world.perceived()[1].cyborgs, 2);
    }

    #[test]
    fn move_against_opponent_counts_production() {
        let mut world = line_world();
        // 3 defenders + 2 * (2 + 1) production = 9 to beat.
        world.apply_move_to_perceived(0, 2, 9, 1).unwrap();
        assert_eq!(world.perceived()[2].owner, Owner::Opponent);
        assert_eq!(world.perceived()[2].cyborgs, 0);

        world.reset_perception();
        world.apply_move_to_perceived(0, 2, 10, 1).unwrap();
        assert_eq!(world.perceived()[2].owner, Owner::Me);
        assert_eq!(world.perceived()[2].cyborgs, 1);
    }

    #[test]
    fn commit_move_debits_ground_truth() {
        let mut world = line_world();
        world.commit_move(0, 1, 4, 1).unwrap();
        assert_eq!(world.actual()[0].cyborgs, 6);
        assert_eq!(world.perceived()[0].cyborgs, 6);
        assert_eq!(world.actual()[1].owner, Owner::Neutral);
        assert_eq!(world.perceived()[1].owner, Owner::Me);
    }

    #[test]
    fn factory_queries() {
        let world = line_world();
        assert_eq!(world.player_factories(Owner::Me), vec![0]);
        assert_eq!(world.player_factories(Owner::Opponent), vec![2]);
        assert_eq!(world.producing_targets(), vec![2]);
        assert_eq!(world.idle_targets(), vec![1]);
        assert_eq!(world.target_pool(), vec![2]);
    }

    #[test]
    fn target_pool_falls_back_to_idle() {
        let mut world = line_world();
        world.update_node(2, Owner::Me, 3, 2).unwrap();
        assert_eq!(world.target_pool(), vec![1]);
    }
}
