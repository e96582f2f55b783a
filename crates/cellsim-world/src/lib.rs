//! World simulation engine.
//!
//! A fixed 2D grid where genome-driven organisms photosynthesize, hunt,
//! share energy and reproduce. Each tick every organism decodes one gene
//! and acts on the shared grid, strictly one after another.

pub mod action;
pub mod behavior;
pub mod genome;
pub mod grid;
pub mod organism;
pub mod world;

pub use action::{Action, Sighting, TurnKind};
pub use behavior::Facing;
pub use genome::{Genome, Mutator, PointMutation, GENOME_LENGTH};
pub use grid::{Block, Grid};
pub use organism::{DeathCause, Organism};
pub use world::World;
