//! Fixed-length genomes and their inheritance.

use cellsim_core::{CellType, Error, MutationConfig, Result};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::ops::Range;

pub const GENOME_LENGTH: usize = 64;
pub const MIN_GENE: u8 = 1;
pub const MAX_GENE: u8 = 64;

/// Loci zeroed in fresh predator genomes.
pub const SEALED_LOCI: Range<usize> = 25..33;

/// An organism's behaviour program: exactly 64 genes.
///
/// Randomly drawn and mutated genes lie in `MIN_GENE..=MAX_GENE`. The only
/// other value is 0, written into [`SEALED_LOCI`] of predators created without
/// a parent. A 0 gene is a no-op with a zero step, so the cursor parks on it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Genome([u8; GENOME_LENGTH]);

impl Genome {
    /// Build a genome from explicit genes, rejecting values above `MAX_GENE`.
    pub fn new(genes: [u8; GENOME_LENGTH]) -> Result<Self> {
        if let Some(bad) = genes.iter().find(|&&g| g > MAX_GENE) {
            return Err(Error::Validation(format!(
                "gene value {bad} exceeds {MAX_GENE}"
            )));
        }
        Ok(Self(genes))
    }

    pub fn from_slice(genes: &[u8]) -> Result<Self> {
        let genes: [u8; GENOME_LENGTH] = genes.try_into().map_err(|_| {
            Error::Validation(format!(
                "genome needs {GENOME_LENGTH} genes, got {}",
                genes.len()
            ))
        })?;
        Self::new(genes)
    }

    /// Every locus set to `gene`.
    pub fn filled(gene: u8) -> Result<Self> {
        Self::new([gene; GENOME_LENGTH])
    }

    pub fn random(rng: &mut ChaCha8Rng) -> Self {
        let mut genes = [0u8; GENOME_LENGTH];
        for gene in genes.iter_mut() {
            *gene = random_gene(rng);
        }
        Self(genes)
    }

    /// Fresh genome for a parentless organism of the given type.
    pub fn random_for(cell_type: CellType, config: &MutationConfig, rng: &mut ChaCha8Rng) -> Self {
        let mut genome = Self::random(rng);
        if cell_type == CellType::Predator && config.seal_predator_photosynthesis {
            genome.0[SEALED_LOCI].fill(0);
        }
        genome
    }

    /// Gene at `index`, wrapping around the end of the genome.
    pub fn gene(&self, index: usize) -> u8 {
        self.0[index % GENOME_LENGTH]
    }

    pub fn genes(&self) -> &[u8; GENOME_LENGTH] {
        &self.0
    }

    pub fn len(&self) -> usize {
        GENOME_LENGTH
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of loci at which the two genomes differ
    pub fn distance(&self, other: &Genome) -> usize {
        self.0.iter().zip(other.0.iter()).filter(|(a, b)| a != b).count()
    }
}

impl fmt::Debug for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Genome({:?})", &self.0[..])
    }
}

fn random_gene(rng: &mut ChaCha8Rng) -> u8 {
    rng.gen_range(MIN_GENE..=MAX_GENE)
}

/// A point mutation applied during replication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointMutation {
    pub locus: usize,
    pub value: u8,
}

/// Copies genomes for offspring, occasionally rewriting one locus.
#[derive(Debug, Clone)]
pub struct Mutator {
    config: MutationConfig,
}

impl Mutator {
    pub fn new(config: MutationConfig) -> Self {
        Self { config }
    }

    /// Copy `parent`; with probability `mutation_rate` overwrite one uniformly
    /// chosen locus with a uniformly drawn gene.
    pub fn replicate(
        &self,
        parent: &Genome,
        rng: &mut ChaCha8Rng,
    ) -> (Genome, Option<PointMutation>) {
        let mut child = parent.clone();

        if rng.gen::<f64>() < self.config.mutation_rate {
            let mutation = PointMutation {
                locus: rng.gen_range(0..GENOME_LENGTH),
                value: random_gene(rng),
            };
            child.0[mutation.locus] = mutation.value;
            return (child, Some(mutation));
        }

        (child, None)
    }
}
