//! Organism state.

use crate::genome::{Genome, GENOME_LENGTH};
use cellsim_core::{CellType, Direction, LineageId, OrganismId, Position};
use serde::{Deserialize, Serialize};

/// Why an organism was taken out of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Starved,
    OldAge,
    /// Photosynthetic organism holding more than its energy cap
    Overcharged,
    Eaten,
}

/// An organism in the simulation.
///
/// Identity, placement, type, lineage and genome are fixed by the world;
/// the remaining state is public so callers can stage scenarios.
#[derive(Debug, Clone)]
pub struct Organism {
    id: OrganismId,
    pub(crate) position: Position,
    cell_type: CellType,
    lineage_id: LineageId,
    genome: Genome,
    pub energy: i32,
    pub max_energy: i32,
    pub age: u32,
    pub direction: Direction,
    pub genome_cursor: usize,
}

impl Organism {
    pub(crate) fn new(
        id: OrganismId,
        position: Position,
        cell_type: CellType,
        lineage_id: LineageId,
        genome: Genome,
        energy: i32,
        max_energy: i32,
    ) -> Self {
        Self {
            id,
            position,
            cell_type,
            lineage_id,
            genome,
            energy,
            max_energy,
            age: 0,
            direction: Direction::North,
            genome_cursor: 0,
        }
    }

    pub fn id(&self) -> OrganismId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    pub fn lineage_id(&self) -> LineageId {
        self.lineage_id
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn max_energy(&self) -> i32 {
        self.max_energy
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Kinship is exact genome equality.
    pub fn is_kin(&self, other: &Organism) -> bool {
        self.genome == other.genome
    }

    /// Gene under the cursor
    pub fn current_gene(&self) -> u8 {
        self.genome.gene(self.genome_cursor)
    }

    /// Gene `offset` loci past the cursor, without moving it
    pub fn peek_gene(&self, offset: usize) -> u8 {
        self.genome.gene(self.genome_cursor + offset)
    }

    pub fn advance_cursor(&mut self, step: usize) {
        self.genome_cursor = (self.genome_cursor + step) % GENOME_LENGTH;
    }

    /// Condition that ends this organism's life before its next action, if any.
    pub fn terminal_condition(&self, max_age: u32) -> Option<DeathCause> {
        if self.energy <= 0 {
            Some(DeathCause::Starved)
        } else if self.age >= max_age {
            Some(DeathCause::OldAge)
        } else if self.energy > self.max_energy && self.cell_type.dies_from_excess() {
            Some(DeathCause::Overcharged)
        } else {
            None
        }
    }

    pub fn is_alive(&self) -> bool {
        self.energy > 0
    }
}
