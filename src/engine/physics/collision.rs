use rapier3d::prelude::*;

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// The player character capsule
    Character = 0b0000_0001,

    /// Static level geometry
    Ground = 0b0000_0010,

    /// Moving platforms the character can ride
    Platform = 0b0000_0100,

    /// Loose dynamic props pushed around by actuators
    Prop = 0b0000_1000,
}

impl CollisionGroups {
    fn bit(self) -> u32 {
        self as u32
    }

    /// Convert to rapier3d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self.bit());

        let filter = match self {
            // Character sweeps stop on level geometry only; props don't block it
            CollisionGroups::Character => {
                Group::from_bits_truncate(CollisionGroups::Ground.bit() | CollisionGroups::Platform.bit())
            }

            // Level geometry blocks everything
            CollisionGroups::Ground | CollisionGroups::Platform => Group::ALL,

            // Props collide with level geometry and each other
            CollisionGroups::Prop => Group::from_bits_truncate(
                CollisionGroups::Ground.bit()
                    | CollisionGroups::Platform.bit()
                    | CollisionGroups::Prop.bit(),
            ),
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Set of collision groups the ground probe treats as walkable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroundMask(u32);

impl GroundMask {
    /// Matches nothing; a character with this mask is never grounded
    pub const NONE: GroundMask = GroundMask(0);

    /// Static ground and moving platforms
    pub const LEVEL: GroundMask =
        GroundMask(CollisionGroups::Ground as u32 | CollisionGroups::Platform as u32);

    pub fn from_groups(groups: &[CollisionGroups]) -> Self {
        Self(groups.iter().fold(0, |bits, group| bits | group.bit()))
    }

    pub fn contains(&self, group: CollisionGroups) -> bool {
        self.0 & group.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Query groups for casting from the character against this mask
    pub fn query_groups(&self) -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_truncate(CollisionGroups::Character.bit()),
            Group::from_bits_truncate(self.0),
        )
    }
}
