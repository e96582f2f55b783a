//! The world: grid, organism registry and tick orchestration.

use crate::genome::{Genome, Mutator};
use crate::grid::{Block, Grid};
use crate::organism::{DeathCause, Organism};
use cellsim_core::{
    CellType, Error, LineageId, OrganismId, PopulationStats, Position, Result, SimConfig,
    TickReport,
};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use tracing::{debug, instrument, trace};

pub struct World {
    pub(crate) grid: Grid,
    // Keyed by monotonically issued handles, so iteration is registration order.
    pub(crate) organisms: BTreeMap<OrganismId, Organism>,
    next_id: u64,
    pub(crate) config: SimConfig,
    pub(crate) mutator: Mutator,
    pub(crate) rng: ChaCha8Rng,
    tick: u64,
    pub(crate) report: TickReport,
}

impl World {
    /// Empty world of the given size with default tunables and an OS-seeded RNG.
    pub fn new(width: i32, height: i32) -> Self {
        let mut config = SimConfig::default();
        config.world.width = width;
        config.world.height = height;
        config.world.seed = None;
        Self::build(config)
    }

    /// Validated construction from a full configuration.
    pub fn from_config(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        let rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            grid: Grid::new(config.world.width, config.world.height),
            organisms: BTreeMap::new(),
            next_id: 0,
            mutator: Mutator::new(config.mutation.clone()),
            config,
            rng,
            tick: 0,
            report: TickReport::default(),
        }
    }

    pub fn width(&self) -> i32 {
        self.grid.width
    }

    pub fn height(&self) -> i32 {
        self.grid.height
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        self.grid.is_valid(Position::new(x, y))
    }

    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Block> {
        self.grid.get(Position::new(x, y))
    }

    /// Place a parentless organism with a fresh genome and lineage.
    ///
    /// Returns `None` when the position is off-grid or already occupied.
    pub fn spawn(&mut self, x: i32, y: i32, cell_type: CellType) -> Option<OrganismId> {
        let pos = Position::new(x, y);
        if !self.grid.is_free(pos) {
            return None;
        }

        let genome = Genome::random_for(cell_type, &self.config.mutation, &mut self.rng);
        let lineage = LineageId::random(&mut self.rng);
        let energy = self.config.energy.initial_energy;
        self.insert(pos, cell_type, lineage, genome, energy)
    }

    /// Place an organism with an explicit genome. A missing lineage is drawn fresh.
    pub fn spawn_with_genome(
        &mut self,
        x: i32,
        y: i32,
        cell_type: CellType,
        genome: Genome,
        lineage: Option<LineageId>,
    ) -> Option<OrganismId> {
        let pos = Position::new(x, y);
        if !self.grid.is_free(pos) {
            return None;
        }

        let lineage = lineage.unwrap_or_else(|| LineageId::random(&mut self.rng));
        let energy = self.config.energy.initial_energy;
        self.insert(pos, cell_type, lineage, genome, energy)
    }

    /// Scatter parentless organisms over random positions. Picks that land on
    /// an occupied block are skipped, so fewer may be placed than requested.
    #[instrument(skip(self))]
    pub fn seed_population(&mut self, photosynthetic: usize, predators: usize) -> usize {
        if self.grid.is_empty() {
            return 0;
        }

        let mut placed = 0;
        let batches = [
            (CellType::Photosynthetic, photosynthetic),
            (CellType::Predator, predators),
        ];
        for (cell_type, count) in batches {
            for _ in 0..count {
                let x = self.rng.gen_range(0..self.grid.width);
                let y = self.rng.gen_range(0..self.grid.height);
                if self.spawn(x, y, cell_type).is_some() {
                    placed += 1;
                }
            }
        }

        debug!(
            requested = photosynthetic + predators,
            placed = placed,
            "Seeded initial population"
        );
        placed
    }

    /// Register a new organism on a free block; callers check the block first.
    pub(crate) fn insert(
        &mut self,
        pos: Position,
        cell_type: CellType,
        lineage: LineageId,
        genome: Genome,
        energy: i32,
    ) -> Option<OrganismId> {
        if !self.grid.is_free(pos) {
            return None;
        }

        let id = OrganismId(self.next_id);
        self.next_id += 1;

        let organism = Organism::new(
            id,
            pos,
            cell_type,
            lineage,
            genome,
            energy,
            self.config.energy.max_energy,
        );
        self.grid.place(pos, id);
        self.organisms.insert(id, organism);

        trace!(
            organism_id = %id,
            lineage_id = %lineage,
            %cell_type,
            x = pos.x,
            y = pos.y,
            "Organism registered"
        );
        Some(id)
    }

    /// Detach an organism from its block and drop it from the registry.
    ///
    /// Removing an organism that is no longer registered is a no-op.
    pub fn remove(&mut self, id: OrganismId) -> Option<Organism> {
        let organism = self.organisms.remove(&id)?;
        if self.grid.occupant(organism.position) == Some(id) {
            self.grid.clear(organism.position);
        }
        Some(organism)
    }

    /// Remove an organism and account for its death in the current tick.
    pub(crate) fn retire(&mut self, id: OrganismId, cause: DeathCause) {
        let Some(organism) = self.remove(id) else {
            return;
        };

        match cause {
            DeathCause::Eaten => self.report.kills += 1,
            _ => self.report.deaths += 1,
        }

        debug!(
            event = "organism_death",
            organism_id = %id,
            lineage_id = %organism.lineage_id(),
            cell_type = %organism.cell_type(),
            cause = ?cause,
            age = organism.age,
            energy = organism.energy,
            tick = self.report.tick,
            "Organism died"
        );
    }

    /// Advance the whole population by one synchronous pass.
    ///
    /// Organisms act one after another in registration order against the
    /// live grid, so earlier organisms win contested blocks. Offspring born
    /// during the pass first act on the next tick; organisms eaten before
    /// their turn are skipped.
    pub fn tick(&mut self) -> TickReport {
        self.report = TickReport {
            tick: self.tick + 1,
            ..Default::default()
        };

        let snapshot: Vec<OrganismId> = self.organisms.keys().copied().collect();
        for id in snapshot {
            let Some(organism) = self.organisms.get(&id) else {
                continue;
            };

            if !organism.is_alive() {
                self.retire(id, DeathCause::Starved);
                continue;
            }

            self.act(id);
        }

        self.tick += 1;
        self.report
    }

    /// Run up to `ticks` ticks, stopping early once the population is gone.
    pub fn run(&mut self, ticks: u64) -> TickReport {
        let mut total = TickReport::default();
        for _ in 0..ticks {
            if self.organisms.is_empty() {
                break;
            }
            let report = self.tick();
            total.accumulate(&report);
        }
        total
    }

    /// Live organisms in registration order
    pub fn organisms(&self) -> impl Iterator<Item = &Organism> + '_ {
        self.organisms.values()
    }

    /// Stable list of live handles in registration order
    pub fn organism_ids(&self) -> Vec<OrganismId> {
        self.organisms.keys().copied().collect()
    }

    pub fn get(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.get(&id)
    }

    pub fn get_mut(&mut self, id: OrganismId) -> Option<&mut Organism> {
        self.organisms.get_mut(&id)
    }

    pub fn organism_at(&self, x: i32, y: i32) -> Option<&Organism> {
        self.grid
            .occupant(Position::new(x, y))
            .and_then(|id| self.organisms.get(&id))
    }

    pub fn contains(&self, id: OrganismId) -> bool {
        self.organisms.contains_key(&id)
    }

    /// Kinship between two registered organisms, `None` if either is gone
    pub fn is_kin(&self, a: OrganismId, b: OrganismId) -> Option<bool> {
        let a = self.organisms.get(&a)?;
        let b = self.organisms.get(&b)?;
        Some(a.is_kin(b))
    }

    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    pub fn stats(&self) -> PopulationStats {
        PopulationStats::from_samples(
            self.organisms
                .values()
                .map(|o| (o.cell_type(), o.lineage_id(), o.energy, o.age)),
        )
    }

    /// Verify that registry and grid agree in both directions.
    pub fn check_consistency(&self) -> Result<()> {
        for (id, organism) in &self.organisms {
            if organism.id() != *id {
                return Err(Error::InvalidState(format!(
                    "organism {} registered under {}",
                    organism.id(),
                    id
                )));
            }
            if self.grid.occupant(organism.position) != Some(*id) {
                return Err(Error::InvalidState(format!(
                    "organism {} at ({}, {}) is not the occupant of its block",
                    id, organism.position.x, organism.position.y
                )));
            }
        }

        for block in self.grid.iter() {
            if let Some(id) = block.occupant() {
                match self.organisms.get(&id) {
                    Some(organism) if organism.position == block.position() => {}
                    Some(organism) => {
                        return Err(Error::InvalidState(format!(
                            "block ({}, {}) holds {} which records ({}, {})",
                            block.position().x,
                            block.position().y,
                            id,
                            organism.position.x,
                            organism.position.y
                        )));
                    }
                    None => {
                        return Err(Error::InvalidState(format!(
                            "block ({}, {}) holds unregistered organism {}",
                            block.position().x,
                            block.position().y,
                            id
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
