//! Gene → action decoding.
//!
//! Genes are decoded through one static table per cell type, indexed by gene
//! value. The two types share every range except 25..33 and 41..49.

use cellsim_core::CellType;

/// What an organism does on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    LookForward,
    MoveForward,
    Turn,
    Photosynthesize,
    Attack,
    Reproduce,
    GiveEnergy,
    StealEnergy,
    /// Unmapped gene; the gene value itself becomes the cursor step
    Idle(u8),
}

impl Action {
    /// Decode a gene for an organism of the given type.
    pub fn decode(cell_type: CellType, gene: u8) -> Action {
        let table = match cell_type {
            CellType::Photosynthetic => &PHOTOSYNTHETIC_TABLE,
            CellType::Predator => &PREDATOR_TABLE,
        };
        table[gene as usize]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::LookForward => "look_forward",
            Action::MoveForward => "move_forward",
            Action::Turn => "turn",
            Action::Photosynthesize => "photosynthesize",
            Action::Attack => "attack",
            Action::Reproduce => "reproduce",
            Action::GiveEnergy => "give_energy",
            Action::StealEnergy => "steal_energy",
            Action::Idle(_) => "idle",
        }
    }
}

static PHOTOSYNTHETIC_TABLE: [Action; 256] = build_table(CellType::Photosynthetic);
static PREDATOR_TABLE: [Action; 256] = build_table(CellType::Predator);

const fn build_table(cell_type: CellType) -> [Action; 256] {
    let mut table = [Action::Idle(0); 256];
    let mut gene = 0usize;
    while gene < 256 {
        table[gene] = decode_range(cell_type, gene as u8);
        gene += 1;
    }
    table
}

const fn decode_range(cell_type: CellType, gene: u8) -> Action {
    let is_predator = matches!(cell_type, CellType::Predator);
    match gene {
        1..=8 => Action::LookForward,
        9..=16 => Action::MoveForward,
        17..=24 => Action::Turn,
        25..=32 if is_predator => Action::Attack,
        25..=32 => Action::Photosynthesize,
        33..=40 => Action::Reproduce,
        41..=48 if is_predator => Action::StealEnergy,
        41..=48 => Action::GiveEnergy,
        _ => Action::Idle(gene),
    }
}

/// Heading change requested by the gene following a turn gene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Left,
    Right,
    Straight,
}

impl TurnKind {
    pub fn from_gene(gene: u8) -> TurnKind {
        match gene {
            17..=20 => TurnKind::Left,
            21..=24 => TurnKind::Right,
            _ => TurnKind::Straight,
        }
    }
}

/// What lies one block ahead of an organism, as reported by look-forward.
///
/// The discriminant doubles as the cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sighting {
    Empty = 1,
    Wall = 2,
    Photosynthetic = 3,
    Predator = 4,
    Kin = 5,
}

impl Sighting {
    /// Sighting of a non-kin organism of the given type.
    pub fn stranger(cell_type: CellType) -> Sighting {
        match cell_type {
            CellType::Photosynthetic => Sighting::Photosynthetic,
            CellType::Predator => Sighting::Predator,
        }
    }

    pub fn step(&self) -> usize {
        *self as usize
    }
}

/// Step taken by an action that found no target or could not proceed
pub const STEP_FAILED: usize = 1;
/// Step after a completed move or kill
pub const STEP_MOVED: usize = 2;
/// Step after a turn, whether or not the heading changed
pub const STEP_TURNED: usize = 2;
/// Step after a successful birth
pub const STEP_REPRODUCED: usize = 3;
/// Step after photosynthesis
pub const STEP_PHOTOSYNTHESIZED: usize = 1;
