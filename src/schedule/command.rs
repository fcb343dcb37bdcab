//! Deferred multi-hop commands.

use crate::board::FactoryId;

/// Identifier handed out by a [`CommandIds`] sequence.
pub type CommandId = u64;

/// Monotonic id sequence owned by a scheduler.
#[derive(Debug, Clone, Default)]
pub struct CommandIds {
    next: CommandId,
}

impl CommandIds {
    /// Starts a sequence whose first id is `first`.
    pub fn starting_at(first: CommandId) -> Self {
        CommandIds { next: first }
    }

    pub fn next_id(&mut self) -> CommandId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Where a deferred command is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Waiting for its current leg to become due.
    Pending,
    /// Last leg emitted.
    Completed,
    /// Source lost or too weak when the leg came due.
    Cancelled,
}

/// A move toward `to` that is replayed one edge at a time across turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredCommand {
    pub id: CommandId,
    /// Source of the next leg.
    pub from: FactoryId,
    /// Final destination.
    pub to: FactoryId,
    /// Turns until the next leg is due; due once negative.
    pub turns_left: i32,
    pub status: Status,
}

impl DeferredCommand {
    pub fn new(id: CommandId, from: FactoryId, to: FactoryId, turns_left: i32) -> Self {
        DeferredCommand {
            id,
            from,
            to,
            turns_left,
            status: Status::Pending,
        }
    }

    pub fn is_due(&self) -> bool {
        self.status == Status::Pending && self.turns_left < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_per_generator() {
        let mut a = CommandIds::default();
        let mut b = CommandIds::starting_at(100);
        assert_eq!(a.next_id(), 0);
        assert_eq!(a.next_id(), 1);
        assert_eq!(b.next_id(), 100);
        assert_eq!(a.next_id(), 2);
    }

    #[test]
    fn due_only_when_negative() {
        let mut cmd = DeferredCommand::new(0, 1, 2, 0);
        assert!(!cmd.is_due());
        cmd.turns_left = -1;
        assert!(cmd.is_due());
        cmd.status = Status::Cancelled;
        assert!(!cmd.is_due());
    }
}
