//! Round-robin turn cursor

/// Strict round-robin selection over a fixed participant list.
///
/// Participants are visited in construction order, wrapping back to the
/// first after the last. There is no re-prioritization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRobinCursor {
    len: usize,
    next: usize,
}

impl RoundRobinCursor {
    /// Create a cursor over `len` participants. Returns `None` when `len` is 0.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, next: 0 })
    }

    /// Index of the participant whose turn is next, without advancing.
    pub fn peek(&self) -> usize {
        self.next
    }

    /// Return the index of the participant whose turn it is and advance.
    pub fn advance(&mut self) -> usize {
        let current = self.next;
        self.next = (self.next + 1) % self.len;
        current
    }

    /// Index of the participant that produces turn `turn` (1-based; 0 is the seed).
    pub fn speaker_for_turn(&self, turn: u64) -> Option<usize> {
        if turn == 0 {
            return None;
        }
        Some(((turn - 1) % self.len as u64) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cursor_rejected() {
        assert!(RoundRobinCursor::new(0).is_none());
    }

    #[test]
    fn test_wraps_in_construction_order() {
        let mut cursor = RoundRobinCursor::new(3).unwrap();
        let order: Vec<usize> = (0..7).map(|_| cursor.advance()).collect();
        assert_eq!(order, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(cursor.peek(), 1);
    }

    #[test]
    fn test_speaker_for_turn_matches_advance() {
        let mut cursor = RoundRobinCursor::new(4).unwrap();
        let reference = cursor.clone();
        for turn in 1..=10u64 {
            assert_eq!(reference.speaker_for_turn(turn), Some(cursor.advance()));
        }
        assert_eq!(reference.speaker_for_turn(0), None);
    }
}
