/// Deterministic seatings for one deck: rotation `r` puts agent
/// `(seat + r) % players` in each seat, so every agent gets a turn at every
/// position once `count == players`.
pub struct SeatRotations {
    rotations: Vec<Vec<usize>>,
}

impl SeatRotations {
    pub fn new(players: usize, count: usize) -> Self {
        let limit = count.min(players);
        let rotations = (0..limit)
            .map(|shift| (0..players).map(|seat| (seat + shift) % players).collect())
            .collect();
        Self { rotations }
    }

    pub fn as_slice(&self) -> &[Vec<usize>] {
        &self.rotations
    }

    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rotation_is_identity() {
        let rotations = SeatRotations::new(4, 1);
        assert_eq!(rotations.as_slice(), &[vec![0, 1, 2, 3]]);
    }

    #[test]
    fn every_agent_visits_every_seat() {
        let rotations = SeatRotations::new(3, 3);
        assert_eq!(
            rotations.as_slice(),
            &[vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 1]]
        );
    }

    #[test]
    fn caps_at_player_count() {
        assert_eq!(SeatRotations::new(2, 10).len(), 2);
    }
}
