//! Collision tilemaps for cell-based gameplay queries.
//!
//! A tilemap is a grid of occupied/empty cells anchored at a world-space
//! origin. Ladders and traps are each authored as their own map; the movement
//! controller only asks "is there a tile in the cell I am standing in".

use glam::{IVec2, Vec2};

/// Presence grid for one kind of special terrain.
///
/// Cells are stored in row-major order: index = y * width + x, with y growing
/// upward from the bottom-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionTilemap {
    /// Width of the tilemap in cells.
    pub width: u32,
    /// Height of the tilemap in cells.
    pub height: u32,
    /// Size of each cell in world units.
    pub tile_size: f32,
    /// Position of the tilemap's bottom-left corner in world space.
    pub origin: Vec2,
    cells: Vec<bool>,
}

impl CollisionTilemap {
    /// Create an empty tilemap. `tile_size` must be finite and positive.
    pub fn new(width: u32, height: u32, tile_size: f32) -> Self {
        debug_assert!(
            tile_size.is_finite() && tile_size > 0.0,
            "tile size must be finite and positive, got {tile_size}"
        );
        Self {
            width,
            height,
            tile_size,
            origin: Vec2::ZERO,
            cells: vec![false; cell_count(width, height)],
        }
    }

    /// Build a map from text rows, top row first. `#` marks an occupied cell,
    /// anything else is empty. Short rows are padded with empty cells.
    pub fn from_rows(rows: &[&str], tile_size: f32, origin: Vec2) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut map = Self::new(width, height, tile_size).with_origin(origin);
        for (row_idx, row) in rows.iter().enumerate() {
            let y = (height - 1 - row_idx as u32) as i32;
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    map.set(IVec2::new(x as i32, y), true);
                }
            }
        }
        map
    }

    /// Set the world-space origin (bottom-left corner).
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let (x, y) = (cell.x as u32, cell.y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Whether the cell holds a tile. Cells outside the grid are empty.
    pub fn has_tile(&self, cell: IVec2) -> bool {
        self.index(cell).map(|i| self.cells[i]).unwrap_or(false)
    }

    /// Occupy or clear a cell. Out-of-range cells are ignored.
    pub fn set(&mut self, cell: IVec2, occupied: bool) {
        if let Some(i) = self.index(cell) {
            self.cells[i] = occupied;
        }
    }

    /// Fill a rectangular region, clipped to the grid.
    pub fn fill_rect(&mut self, min: IVec2, size: IVec2, occupied: bool) {
        for y in min.y..min.y + size.y {
            for x in min.x..min.x + size.x {
                self.set(IVec2::new(x, y), occupied);
            }
        }
    }

    /// Cell containing a world position. The result may lie outside the grid.
    pub fn world_to_cell(&self, world_pos: Vec2) -> IVec2 {
        let local = (world_pos - self.origin) / self.tile_size;
        local.floor().as_ivec2()
    }

    /// Whether the cell under a world position holds a tile. A map with a
    /// degenerate tile size has no cells to stand in.
    pub fn has_tile_at(&self, world_pos: Vec2) -> bool {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return false;
        }
        self.has_tile(self.world_to_cell(world_pos))
    }

    /// Count of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

fn cell_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// The special-terrain maps the movement controller consults.
/// A missing map means "that terrain does not exist in this level".
#[derive(Debug, Clone, Default)]
pub struct CollisionMaps {
    pub climb: Option<CollisionTilemap>,
    pub trap: Option<CollisionTilemap>,
}

impl CollisionMaps {
    pub fn is_climbable(&self, world_pos: Vec2) -> bool {
        self.climb.as_ref().is_some_and(|m| m.has_tile_at(world_pos))
    }

    pub fn is_trap(&self, world_pos: Vec2) -> bool {
        self.trap.as_ref().is_some_and(|m| m.has_tile_at(world_pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_is_empty() {
        let map = CollisionTilemap::new(8, 4, 1.0);
        assert_eq!(map.tile_count(), 0);
        assert!(!map.has_tile(IVec2::new(3, 2)));
    }

    #[test]
    fn set_and_query_cell() {
        let mut map = CollisionTilemap::new(5, 5, 1.0);
        map.set(IVec2::new(2, 3), true);
        assert!(map.has_tile(IVec2::new(2, 3)));
        assert!(!map.has_tile(IVec2::new(3, 2)));
        assert_eq!(map.tile_count(), 1);
        map.set(IVec2::new(2, 3), false);
        assert_eq!(map.tile_count(), 0);
    }

    #[test]
    fn out_of_range_cells_are_empty() {
        let mut map = CollisionTilemap::new(2, 2, 1.0);
        map.fill_rect(IVec2::ZERO, IVec2::new(2, 2), true);
        assert!(!map.has_tile(IVec2::new(-1, 0)));
        assert!(!map.has_tile(IVec2::new(0, 2)));
        map.set(IVec2::new(5, 5), true);
        assert_eq!(map.tile_count(), 4);
    }

    #[test]
    fn fill_rect_clips_to_grid() {
        let mut map = CollisionTilemap::new(4, 4, 1.0);
        map.fill_rect(IVec2::new(2, 2), IVec2::new(5, 5), true);
        assert_eq!(map.tile_count(), 4);
    }

    #[test]
    fn world_to_cell_floors_toward_negative() {
        let map = CollisionTilemap::new(4, 4, 2.0).with_origin(Vec2::new(-4.0, -4.0));
        assert_eq!(map.world_to_cell(Vec2::new(-4.0, -4.0)), IVec2::new(0, 0));
        assert_eq!(map.world_to_cell(Vec2::new(-0.1, 0.1)), IVec2::new(1, 2));
        assert_eq!(map.world_to_cell(Vec2::new(-4.5, -4.5)), IVec2::new(-1, -1));
    }

    #[test]
    fn cell_count_does_not_wrap_at_u32() {
        assert_eq!(cell_count(70_000, 70_000), 4_900_000_000);
    }

    #[test]
    fn far_cells_index_past_u32_range() {
        let map = CollisionTilemap {
            width: 70_000,
            height: 70_000,
            tile_size: 1.0,
            origin: Vec2::ZERO,
            cells: Vec::new(),
        };
        assert_eq!(map.index(IVec2::new(5, 69_999)), Some(4_899_930_005));
    }

    #[test]
    fn zero_tile_size_never_reports_tiles() {
        let mut map = CollisionTilemap::new(2, 2, 1.0);
        map.fill_rect(IVec2::ZERO, IVec2::new(2, 2), true);
        map.tile_size = 0.0;
        assert!(!map.has_tile_at(Vec2::ZERO));
        assert!(!map.has_tile_at(Vec2::new(0.5, 0.5)));
        map.tile_size = f32::NAN;
        assert!(!map.has_tile_at(Vec2::ZERO));
    }

    #[test]
    #[should_panic(expected = "tile size must be finite and positive")]
    #[cfg(debug_assertions)]
    fn zero_tile_size_is_rejected_on_construction() {
        CollisionTilemap::new(2, 2, 0.0);
    }

    #[test]
    fn from_rows_puts_first_row_on_top() {
        let map = CollisionTilemap::from_rows(&["#..", "..", ".##"], 1.0, Vec2::ZERO);
        assert_eq!((map.width, map.height), (3, 3));
        assert!(map.has_tile(IVec2::new(0, 2)));
        assert!(map.has_tile(IVec2::new(1, 0)));
        assert!(map.has_tile(IVec2::new(2, 0)));
        assert_eq!(map.tile_count(), 3);
    }

    #[test]
    fn missing_maps_never_report_terrain() {
        let maps = CollisionMaps::default();
        assert!(!maps.is_climbable(Vec2::ZERO));
        assert!(!maps.is_trap(Vec2::ZERO));
    }

    #[test]
    fn maps_answer_by_world_position() {
        let maps = CollisionMaps {
            climb: Some(CollisionTilemap::from_rows(&["#"], 1.0, Vec2::ZERO)),
            trap: Some(CollisionTilemap::from_rows(&[".#"], 1.0, Vec2::ZERO)),
        };
        assert!(maps.is_climbable(Vec2::new(0.5, 0.5)));
        assert!(!maps.is_trap(Vec2::new(0.5, 0.5)));
        assert!(maps.is_trap(Vec2::new(1.5, 0.5)));
    }
}
