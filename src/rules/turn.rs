//! Seat arithmetic.

use crate::core::state::Direction;

/// Seat reached from `current` after skipping `skip_count` seats.
///
/// `(current + step * (skip_count + 1)) mod player_count`, normalised into
/// `0..player_count`.
///
/// ```
/// use uno_engine::core::Direction;
/// use uno_engine::rules::next_seat;
///
/// assert_eq!(next_seat(3, Direction::Clockwise, 0, 4), 0);
/// assert_eq!(next_seat(0, Direction::CounterClockwise, 0, 4), 3);
/// assert_eq!(next_seat(1, Direction::Clockwise, 1, 4), 3);
/// ```
#[must_use]
pub fn next_seat(current: usize, direction: Direction, skip_count: usize, player_count: usize) -> usize {
    debug_assert!(player_count > 0, "table has no seats");
    let n = player_count as isize;
    let offset = direction.step() * (skip_count as isize + 1);
    (current as isize + offset).rem_euclid(n) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_both_directions() {
        assert_eq!(next_seat(3, Direction::Clockwise, 0, 4), 0);
        assert_eq!(next_seat(0, Direction::CounterClockwise, 0, 4), 3);
    }

    #[test]
    fn test_skip_counts() {
        assert_eq!(next_seat(1, Direction::Clockwise, 1, 4), 3);
        assert_eq!(next_seat(1, Direction::CounterClockwise, 1, 4), 3);
        assert_eq!(next_seat(2, Direction::CounterClockwise, 2, 3), 2);
    }

    #[test]
    fn test_two_player_skip_returns_to_self() {
        for seat in 0..2 {
            assert_eq!(next_seat(seat, Direction::Clockwise, 1, 2), seat);
            assert_eq!(next_seat(seat, Direction::CounterClockwise, 1, 2), seat);
        }
    }

    #[test]
    fn test_always_in_range() {
        for n in 2..=4 {
            for current in 0..n {
                for skip in 0..6 {
                    for dir in [Direction::Clockwise, Direction::CounterClockwise] {
                        assert!(next_seat(current, dir, skip, n) < n);
                    }
                }
            }
        }
    }
}
