/// Which wall, if any, the player is pressing into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallContact {
    #[default]
    None,
    Left,
    Right,
}

impl WallContact {
    /// -1 for a wall on the left, +1 on the right, 0 for none.
    pub fn direction(self) -> i32 {
        match self {
            WallContact::None => 0,
            WallContact::Left => -1,
            WallContact::Right => 1,
        }
    }

    pub fn is_touching(self) -> bool {
        self != WallContact::None
    }

    /// Whether horizontal input `h` points away from this wall.
    pub fn is_away(self, h: f32) -> bool {
        match self {
            WallContact::None => false,
            WallContact::Left => h > 0.0,
            WallContact::Right => h < 0.0,
        }
    }
}

/// The velocity policy selected for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locomotion {
    /// On a ladder: both axes driven by input, gravity off.
    Climbing,
    /// Airborne and pressing into a wall: gravity drags the player down.
    WallSliding,
    /// Walking or in the air.
    #[default]
    Free,
}

/// What the jump step did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpOutcome {
    #[default]
    NotRequested,
    /// Jump performed; `count` is the jump number since the last landing.
    Jumped { count: u32 },
    BlockedByTrap,
    BlockedByLadder,
    /// All jumps used up before landing.
    Exhausted,
}

/// Snapshot of the player's situation, rebuilt from fresh queries every tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementState {
    pub grounded: bool,
    pub wall: WallContact,
    pub on_ladder: bool,
    pub on_trap: bool,
    pub sprinting: bool,
    pub locomotion: Locomotion,
    pub last_jump: JumpOutcome,
}

impl MovementState {
    /// Pick the velocity policy from the detected flags.
    pub fn resolve_locomotion(&self) -> Locomotion {
        if self.on_ladder {
            Locomotion::Climbing
        } else if self.wall.is_touching() && !self.grounded {
            Locomotion::WallSliding
        } else {
            Locomotion::Free
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_direction_matches_contact() {
        assert_eq!(WallContact::None.direction(), 0);
        assert_eq!(WallContact::Left.direction(), -1);
        assert_eq!(WallContact::Right.direction(), 1);
        assert!(!WallContact::None.is_touching());
        assert!(WallContact::Left.is_touching());
    }

    #[test]
    fn away_from_wall() {
        assert!(WallContact::Right.is_away(-0.5));
        assert!(!WallContact::Right.is_away(0.5));
        assert!(WallContact::Left.is_away(1.0));
        assert!(!WallContact::Left.is_away(0.0));
        assert!(!WallContact::None.is_away(1.0));
    }

    #[test]
    fn ladder_wins_over_wall() {
        let state = MovementState {
            on_ladder: true,
            wall: WallContact::Right,
            ..MovementState::default()
        };
        assert_eq!(state.resolve_locomotion(), Locomotion::Climbing);
    }

    #[test]
    fn wall_slide_needs_air() {
        let mut state = MovementState {
            wall: WallContact::Left,
            grounded: true,
            ..MovementState::default()
        };
        assert_eq!(state.resolve_locomotion(), Locomotion::Free);
        state.grounded = false;
        assert_eq!(state.resolve_locomotion(), Locomotion::WallSliding);
    }
}
