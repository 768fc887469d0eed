use rapier2d::prelude::*;

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Heroes and monsters
    Character = 0b0000_0010,

    /// Projectiles fired by characters
    Projectile = 0b0000_0100,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Characters pass through each other but are hit by projectiles
            CollisionGroups::Character => {
                Group::from_bits_truncate(CollisionGroups::Projectile as u32)
            }

            // Projectiles never interact with other projectiles
            CollisionGroups::Projectile => {
                Group::from_bits_truncate(CollisionGroups::Character as u32)
            }

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}
