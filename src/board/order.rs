//! Orders the bot can emit in a turn.

use super::factory::FactoryId;

/// A single order. The protocol only allows one-edge moves, so a multi-hop
/// plan is always emitted one `Move` per leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// `MOVE <from> <to> <cyborgs>`
    Move {
        from: FactoryId,
        to: FactoryId,
        cyborgs: i32,
    },

    /// `WAIT`
    Wait,
}

impl Order {
    pub fn is_move(&self) -> bool {
        matches!(self, Order::Move { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_and_wait_are_distinct() {
        let mv = Order::Move {
            from: 0,
            to: 1,
            cyborgs: 4,
        };
        assert!(mv.is_move());
        assert!(!Order::Wait.is_move());
        assert_ne!(mv, Order::Wait);
    }
}
