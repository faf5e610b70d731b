//! Order queue
//!
//! The single FIFO of pending orders shared by every driver in a run.
//!
//! # Critical Invariants
//!
//! 1. Orders leave the queue in input order
//! 2. The only reordering is `push_front` of the order just popped
//! 3. The queue is owned by one run and never outlives it

use crate::models::order::RoutedOrder;
use std::collections::VecDeque;

/// FIFO queue of routed orders with front reinsertion
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::{Order, OrderQueue, RoutedOrder};
///
/// let mut queue = OrderQueue::new(vec![
///     RoutedOrder::unresolved(Order::new("A".to_string(), 100.0, "R1".to_string())),
///     RoutedOrder::unresolved(Order::new("B".to_string(), 100.0, "R1".to_string())),
/// ]);
///
/// let head = queue.pop_front().unwrap();
/// assert_eq!(head.id(), "A");
/// queue.push_front(head);
/// assert_eq!(queue.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderQueue {
    orders: VecDeque<RoutedOrder>,
}

impl OrderQueue {
    /// Build a queue holding `orders` in their given order
    pub fn new(orders: Vec<RoutedOrder>) -> Self {
        Self {
            orders: orders.into(),
        }
    }

    /// Remove and return the head order
    pub fn pop_front(&mut self) -> Option<RoutedOrder> {
        self.orders.pop_front()
    }

    /// Put an order back at the head
    pub fn push_front(&mut self, order: RoutedOrder) {
        self.orders.push_front(order);
    }

    /// Peek at the head order
    pub fn front(&self) -> Option<&RoutedOrder> {
        self.orders.front()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Consume the queue, yielding the remaining orders front to back
    pub fn into_remaining(self) -> Vec<RoutedOrder> {
        self.orders.into()
    }
}
