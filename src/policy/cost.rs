//! How many cyborgs a route costs.

use crate::board::{BoardError, DistanceIndex, Factory, FactoryId, Owner, WorldModel};

/// Sizing knobs for outgoing troops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizing {
    /// Added on top of the route cost so a capture never ends at zero.
    pub spare_cyborgs: i32,
    /// Extra turns of opponent production to beat beyond the travel time.
    pub margin_turns: i32,
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing {
            spare_cyborgs: 1,
            margin_turns: 1,
        }
    }
}

/// Cyborgs lost along `path` (source excluded): every factory we do not hold
/// costs its garrison, and opponent factories also cost the production they
/// make during the hop plus `margin_turns`.
pub fn cyborgs_on_path(
    path: &[FactoryId],
    factories: &[Factory],
    graph: &DistanceIndex,
    margin_turns: i32,
) -> i32 {
    path.windows(2)
        .map(|hop| {
            let target = &factories[hop[1]];
            match target.owner {
                Owner::Me => 0,
                Owner::Neutral => target.cyborgs,
                Owner::Opponent => {
                    let dist = graph.distance(hop[0], hop[1]) as i32;
                    target.cyborgs + target.production * (dist + margin_turns)
                }
            }
        })
        .sum()
}

/// Troop size to send from `from` so that it takes `to`, judged on the
/// perceived table.
pub fn cyborgs_needed(
    world: &WorldModel,
    from: FactoryId,
    to: FactoryId,
    sizing: Sizing,
) -> Result<i32, BoardError> {
    let path = world.graph().path(from, to)?;
    let cost = cyborgs_on_path(path, world.perceived(), world.graph(), sizing.margin_turns);
    Ok(cost + sizing.spare_cyborgs)
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

    #[test]
    fn line_scenario_needs_eight() {
        let world = line_world();
        assert_eq!(world.graph().path(0, 2).unwrap(), &[0, 1, 2]);
        assert_eq!(world.graph().distance(0, 2), 2);
        let path = world.graph().path(0, 2).unwrap();
        assert_eq!(cyborgs_on_path(path, world.perceived(), world.graph(), 1), 7);
        assert_eq!(cyborgs_needed(&world, 0, 2, Sizing::default()).unwrap(), 8);
    }

    #[test]
    fn own_factories_on_path_are_free() {
        let mut world = line_world();
        world.update_node(1, Owner::Me, 50, 3).unwrap();
        assert_eq!(cyborgs_needed(&world, 0, 2, Sizing::default()).unwrap(), 8);
        world.update_node(2, Owner::Me, 3, 2).unwrap();
        assert_eq!(cyborgs_needed(&world, 0, 2, Sizing::default()).unwrap(), 1);
    }

    #[test]
    fn neutral_garrisons_add_up() {
        let mut world = line_world();
        world.update_node(1, Owner::Neutral, 4, 2).unwrap();
        world.update_node(2, Owner::Neutral, 6, 2).unwrap();
        assert_eq!(cyborgs_needed(&world, 0, 2, Sizing::default()).unwrap(), 11);
    }

    #[test]
    fn sizing_is_configurable() {
        let world = line_world();
        let sizing = Sizing {
            spare_cyborgs: 3,
            margin_turns: 0,
        };
        // 3 garrison + 2 * 1 travel + 3 spare.
        assert_eq!(cyborgs_needed(&world, 0, 2, sizing).unwrap(), 8);
    }

    #[test]
    fn uses_perceived_table() {
        let mut world = line_world();
        world.perceived_mut()[2].owner = Owner::Me;
        assert_eq!(cyborgs_needed(&world, 0, 2, Sizing::default()).unwrap(), 1);
    }
}
