//! Replays multi-hop moves one edge per leg.
//!
//! The protocol only moves troops along a single edge, so a plan to reach a
//! distant factory is held here and re-validated each time a leg comes due:
//! combat in the meantime may have taken or drained the leg's source.

use tracing::{debug, warn};

use super::command::{CommandId, CommandIds, DeferredCommand, Status};
use crate::board::{BoardError, FactoryId, Order, Owner, WorldModel};
use crate::policy::cost::{cyborgs_needed, Sizing};

/// Active deferred commands and the id sequence that names them.
#[derive(Debug, Clone, Default)]
pub struct CommandScheduler {
    pending: Vec<DeferredCommand>,
    ids: CommandIds,
}

impl CommandScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler drawing ids from the given sequence.
    pub fn with_ids(ids: CommandIds) -> Self {
        CommandScheduler {
            pending: Vec::new(),
            ids,
        }
    }

    /// Queues a move from `from` toward `to`, due after `turns_left` more turns.
    pub fn defer(&mut self, from: FactoryId, to: FactoryId, turns_left: i32) -> CommandId {
        let id = self.ids.next_id();
        self.pending.push(DeferredCommand::new(id, from, to, turns_left));
        debug!(id, from, to, turns_left, "deferred command queued");
        id
    }

    pub fn pending(&self) -> &[DeferredCommand] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Ticks every command, runs the legs that came due, and drops the
    /// completed and cancelled ones. Returns the orders emitted this turn.
    ///
    /// A leg that fails cancels only its own command; legs already applied to
    /// the world keep their orders and later commands still run.
    pub fn advance(&mut self, world: &mut WorldModel, sizing: Sizing) -> Vec<Order> {
        let mut orders = Vec::new();
        for cmd in self.pending.iter_mut() {
            cmd.turns_left -= 1;
            if !cmd.is_due() {
                continue;
            }
            match run_leg(cmd, world, sizing) {
                Ok(Some(order)) => orders.push(order),
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        id = cmd.id,
                        from = cmd.from,
                        to = cmd.to,
                        error = %e,
                        "deferred leg failed"
                    );
                    cmd.status = Status::Cancelled;
                }
            }
        }
        self.pending.retain(|cmd| cmd.status == Status::Pending);
        orders
    }
}

/// Executes the due leg of `cmd`, updating its status in place.
fn run_leg(
    cmd: &mut DeferredCommand,
    world: &mut WorldModel,
    sizing: Sizing,
) -> Result<Option<Order>, BoardError> {
    let path = world.graph().path(cmd.from, cmd.to)?.to_vec();
    let source = world.actual()[cmd.from];

    if source.owner != Owner::Me {
        debug!(
            id = cmd.id,
            from = cmd.from,
            owner = ?source.owner,
            "source not held, cancelling command"
        );
        cmd.status = Status::Cancelled;
        return Ok(None);
    }

    let Some(&next) = path.get(1) else {
        cmd.status = Status::Completed;
        return Ok(None);
    };

    let needed = cyborgs_needed(world, cmd.from, cmd.to, sizing)?;
    if source.cyborgs < needed {
        debug!(
            id = cmd.id,
            from = cmd.from,
            have = source.cyborgs,
            needed,
            "source too weak, cancelling command"
        );
        cmd.status = Status::Cancelled;
        return Ok(None);
    }

    world.commit_move(cmd.from, next, needed, sizing.margin_turns)?;
    let order = Order::Move {
        from: cmd.from,
        to: next,
        cyborgs: needed,
    };

    match path.get(2) {
        Some(&after) => {
            cmd.turns_left = world.graph().distance(next, after) as i32;
            cmd.from = next;
            debug!(
                id = cmd.id,
                from = cmd.from,
                turns_left = cmd.turns_left,
                "command reissued"
            );
        }
        None => cmd.status = Status::Completed,
    }
    Ok(Some(order))
}
