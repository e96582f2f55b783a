//! Bounded 2D grid of blocks.

use cellsim_core::{OrganismId, Position};

/// One addressable location of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    position: Position,
    occupant: Option<OrganismId>,
}

impl Block {
    fn new(position: Position) -> Self {
        Self {
            position,
            occupant: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn occupant(&self) -> Option<OrganismId> {
        self.occupant
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// A fixed-size grid stored as a flat, row-major arena.
///
/// Coordinates outside `0..width` × `0..height` are walls: every accessor
/// bounds-checks before indexing and reports them as absent.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    blocks: Vec<Block>,
}

impl Grid {
    /// Create an empty grid. Negative dimensions yield an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let blocks = (0..height)
            .flat_map(|y| (0..width).map(move |x| Block::new(Position::new(x, y))))
            .collect();

        Self {
            width,
            height,
            blocks,
        }
    }

    pub fn is_valid(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Block at position, `None` for off-grid coordinates
    pub fn get(&self, pos: Position) -> Option<&Block> {
        self.index(pos).map(|i| &self.blocks[i])
    }

    pub fn occupant(&self, pos: Position) -> Option<OrganismId> {
        self.get(pos).and_then(Block::occupant)
    }

    /// True only for on-grid, unoccupied blocks
    pub fn is_free(&self, pos: Position) -> bool {
        self.get(pos).map_or(false, Block::is_empty)
    }

    /// Put `id` into an on-grid block, returning the previous occupant.
    pub(crate) fn place(&mut self, pos: Position, id: OrganismId) -> Option<OrganismId> {
        let index = self.index(pos)?;
        self.blocks[index].occupant.replace(id)
    }

    /// Empty a block, returning whoever was in it.
    pub(crate) fn clear(&mut self, pos: Position) -> Option<OrganismId> {
        let index = self.index(pos)?;
        self.blocks[index].occupant.take()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn occupied_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_empty()).count()
    }

    /// Iterator over all blocks in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_valid(pos) {
            Some((pos.y * self.width + pos.x) as usize)
        } else {
            None
        }
    }
}
