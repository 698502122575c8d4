//! Rotating try-order of the four cardinal directions.

use std::collections::VecDeque;

use crate::types::Direction;

/// Always a permutation of [`Direction::ALL`]; only ever rotated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectionQueue {
    order: VecDeque<Direction>,
}

impl Default for DirectionQueue {
    fn default() -> Self {
        Self { order: VecDeque::from(Direction::ALL) }
    }
}

impl DirectionQueue {
    pub fn front(&self) -> Direction {
        self.order[0]
    }

    /// Snapshot of the current order, front first.
    pub fn order(&self) -> [Direction; 4] {
        [self.order[0], self.order[1], self.order[2], self.order[3]]
    }

    pub fn rotate_to_front(&mut self, direction: Direction) {
        while self.order[0] != direction {
            self.order.rotate_left(1);
        }
    }

    pub fn shuffle_one_step(&mut self) {
        self.order.rotate_left(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::{Down, Left, Right, Up};

    #[test]
    fn starts_left_up_right_down() {
        assert_eq!(DirectionQueue::default().order(), [Left, Up, Right, Down]);
    }

    #[test]
    fn rotate_to_front_keeps_cyclic_order() {
        let mut queue = DirectionQueue::default();
        queue.rotate_to_front(Right);
        assert_eq!(queue.order(), [Right, Down, Left, Up]);

        queue.rotate_to_front(Up);
        assert_eq!(queue.order(), [Up, Right, Down, Left]);

        queue.rotate_to_front(Up);
        assert_eq!(queue.order(), [Up, Right, Down, Left]);
    }

    #[test]
    fn shuffle_moves_front_to_back_once() {
        let mut queue = DirectionQueue::default();
        queue.shuffle_one_step();
        assert_eq!(queue.order(), [Up, Right, Down, Left]);
        assert_eq!(queue.front(), Up);
    }

    #[test]
    fn order_stays_a_permutation() {
        let mut queue = DirectionQueue::default();
        for step in 0..20 {
            if step % 3 == 0 {
                queue.shuffle_one_step();
            } else {
                queue.rotate_to_front(Direction::ALL[step % 4]);
            }
            let mut sorted = queue.order();
            sorted.sort();
            assert_eq!(sorted, [Left, Up, Right, Down]);
        }
    }
}
