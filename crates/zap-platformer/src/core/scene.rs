use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Tag the camera looks for when no follow target is configured.
pub const PLAYER_TAG: &str = "player";

/// Simple entity storage using a flat Vec.
/// Designed for small entity counts: a player, terrain pieces, a few props.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    /// Add an entity to the scene and return its ID.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.swap_remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// World position of an active entity.
    pub fn position_of(&self, id: EntityId) -> Option<Vec2> {
        self.get(id).filter(|e| e.active).map(|e| e.pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first active entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.active && e.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_returns_id_and_stores_position() {
        let mut scene = Scene::new();
        let id = scene.spawn(Entity::new(EntityId(7)).with_pos(Vec2::new(1.0, 2.0)));
        assert_eq!(id, EntityId(7));
        assert_eq!(scene.position_of(id), Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn despawn_removes_entity() {
        let mut scene = Scene::new();
        let id = scene.spawn(Entity::new(EntityId(1)));
        assert!(scene.despawn(id).is_some());
        assert!(scene.is_empty());
        assert!(scene.despawn(id).is_none());
    }

    #[test]
    fn find_by_tag_finds_player() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("ground"));
        scene.spawn(Entity::new(EntityId(2)).with_tag(PLAYER_TAG));
        let player = scene.find_by_tag(PLAYER_TAG).unwrap();
        assert_eq!(player.id, EntityId(2));
    }

    #[test]
    fn inactive_entities_are_not_found() {
        let mut scene = Scene::new();
        let id = scene.spawn(Entity::new(EntityId(1)).with_tag(PLAYER_TAG));
        scene.get_mut(id).unwrap().active = false;
        assert!(scene.find_by_tag(PLAYER_TAG).is_none());
        assert!(scene.position_of(id).is_none());
        assert_eq!(scene.len(), 1);
    }
}
