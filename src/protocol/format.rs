//! Order output formatting.
//!
//! A turn is answered with exactly one line: the orders joined by `;`.
//! The referee rejects an empty line, so no orders renders as `WAIT`.

use std::fmt;

use crate::board::Order;

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Move { from, to, cyborgs } => write!(f, "MOVE {} {} {}", from, to, cyborgs),
            Order::Wait => write!(f, "WAIT"),
        }
    }
}

/// Formats a single order.
pub fn format_order(order: &Order) -> String {
    order.to_string()
}

/// Formats a turn's orders as one protocol line.
pub fn format_orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return Order::Wait.to_string();
    }
    orders
        .iter()
        .map(format_order)
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_move() {
        let order = Order::Move {
            from: 3,
            to: 7,
            cyborgs: 12,
        };
        assert_eq!(format_order(&order), "MOVE 3 7 12");
    }

    #[test]
    fn empty_turn_is_wait() {
        assert_eq!(format_orders(&[]), "WAIT");
    }

    #[test]
    fn orders_joined_with_semicolons() {
        let orders = [
            Order::Move {
                from: 0,
                to: 1,
                cyborgs: 8,
            },
            Order::Wait,
            Order::Move {
                from: 2,
                to: 1,
                cyborgs: 1,
            },
        ];
        assert_eq!(format_orders(&orders), "MOVE 0 1 8;WAIT;MOVE 2 1 1");
    }
}
