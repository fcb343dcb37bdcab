//! Per-match session.
//!
//! Owns the world model, the deferred-command scheduler and the decision
//! policy, and runs one turn at a time: ingest the snapshot, project combat,
//! replay due legs, then let the policy pick new targets. A turn always
//! produces a reply; failures inside a turn are logged and answered with
//! whatever orders were already safe to send, or `WAIT`.

use std::io::{self, Write};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::board::{BoardError, DistanceIndex, Order, Owner, WorldModel};
use crate::config::{ConfigError, EngineConfig};
use crate::policy::{GreedyPolicy, Policy};
use crate::protocol::{format_orders, Entity, MatchInit, ProtocolError};
use crate::resolve::project;
use crate::schedule::CommandScheduler;

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Holds everything that lives for the duration of one match.
pub struct Engine {
    world: WorldModel,
    scheduler: CommandScheduler,
    policy: Box<dyn Policy>,
    config: EngineConfig,
    turn: u32,
}

impl Engine {
    /// Builds the shortest-path index for the match and an empty world.
    pub fn new(init: &MatchInit, config: EngineConfig) -> Result<Self, EngineError> {
        let mut graph = DistanceIndex::new(init.factory_count);
        for link in &init.links {
            graph.create_edge(link.from, link.to, link.distance)?;
        }
        graph.calculate();
        graph.cache_all_paths();
        info!(
            factories = init.factory_count,
            links = init.links.len(),
            "match graph indexed"
        );

        Ok(Engine {
            world: WorldModel::new(graph),
            scheduler: CommandScheduler::new(),
            policy: Box::new(GreedyPolicy::new(config.sizing())),
            config,
            turn: 0,
        })
    }

    /// Replaces the decision policy.
    pub fn with_policy(mut self, policy: Box<dyn Policy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn world(&self) -> &WorldModel {
        &self.world
    }

    pub fn scheduler(&self) -> &CommandScheduler {
        &self.scheduler
    }

    /// Number of turns started so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Starts a new turn: the previous troop snapshot is dropped.
    pub fn begin_turn(&mut self) {
        self.turn += 1;
        self.world.clear_troops();
    }

    /// Applies one entity of the current snapshot.
    pub fn ingest(&mut self, entity: Entity) -> Result<(), EngineError> {
        match entity {
            Entity::Factory {
                id,
                owner,
                cyborgs,
                production,
            } => self.world.update_node(id, owner, cyborgs, production)?,
            Entity::Troop(troop) => self.world.register_troop(troop)?,
            Entity::Bomb {
                id, owner, from, to, ..
            } => debug!(id, ?owner, from, to, "bomb sighted"),
        }
        Ok(())
    }

    /// Decides this turn's orders. Never fails: a failing deferred leg or
    /// policy is logged, and the orders decided before it are kept.
    pub fn play_turn(&mut self) -> Vec<Order> {
        project(&mut self.world);

        let mut orders = self.scheduler.advance(&mut self.world, self.config.sizing());

        if self.world.player_factories(Owner::Me).is_empty() {
            debug!(turn = self.turn, "no factories held");
            return orders;
        }

        match self.policy.decide(&mut self.world, &mut self.scheduler) {
            Ok(decided) => orders.extend(decided),
            Err(e) => error!(turn = self.turn, error = %e, "decision failed"),
        }
        debug!(
            turn = self.turn,
            moves = orders.iter().filter(|o| o.is_move()).count(),
            deferred = self.scheduler.len(),
            "turn decided"
        );
        orders
    }

    /// Runs a whole turn from parsed entity lines and writes the reply line.
    /// Malformed entities are logged and skipped.
    pub fn handle_turn<W: Write>(
        &mut self,
        entities: Vec<Result<Entity, ProtocolError>>,
        out: &mut W,
    ) -> io::Result<()> {
        self.begin_turn();
        for entity in entities {
            let applied = entity
                .map_err(EngineError::from)
                .and_then(|e| self.ingest(e));
            if let Err(e) = applied {
                warn!(turn = self.turn, error = %e, "skipping entity");
            }
        }

        let orders = self.play_turn();
        writeln!(out, "{}", format_orders(&orders))?;
        out.flush()
    }
}
