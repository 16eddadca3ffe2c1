//! Tests for grid directions, their indices, opposites and offsets

#[cfg(test)]
mod tests {
    use tilecollapse::AlgorithmError;
    use tilecollapse::spatial::direction::{DIRECTION_COUNT, Direction};

    // Tests every direction round-trips through its table index
    // Verified by swapping Up and Down in from_index
    #[test]
    fn test_index_round_trip() {
        for (index, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), index);
            assert!(matches!(Direction::from_index(index), Ok(d) if d == *direction));
        }
        assert_eq!(Direction::ALL.len(), DIRECTION_COUNT);
    }

    // Tests out-of-range indices are rejected as construction errors
    // Verified by mapping index 4 to Right
    #[test]
    fn test_from_index_rejects_out_of_range() {
        assert!(matches!(
            Direction::from_index(4),
            Err(AlgorithmError::InvalidDirection { index: 4 })
        ));
        assert!(Direction::from_index(usize::MAX).is_err());
    }

    // Tests the opposite direction is two steps around the table
    // Verified by returning self from opposite
    #[test]
    fn test_opposite_is_index_plus_two() {
        for direction in Direction::ALL {
            assert_eq!(
                direction.opposite().index(),
                (direction.index() + 2) % DIRECTION_COUNT
            );
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    // Tests opposite offsets cancel and y grows downward
    // Verified by negating the Up offset
    #[test]
    fn test_offsets() {
        assert_eq!(Direction::Right.offset(), (1, 0));
        assert_eq!(Direction::Up.offset(), (0, -1));
        assert_eq!(Direction::Left.offset(), (-1, 0));
        assert_eq!(Direction::Down.offset(), (0, 1));

        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            let (ox, oy) = direction.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Direction::Right.to_string(), "right");
        assert_eq!(Direction::Down.to_string(), "down");
    }
}
