//! Genome-driven behaviour: one action per organism per tick.

use crate::action::{
    Action, Sighting, TurnKind, STEP_FAILED, STEP_MOVED, STEP_PHOTOSYNTHESIZED, STEP_REPRODUCED,
    STEP_TURNED,
};
use crate::organism::DeathCause;
use crate::world::World;
use cellsim_core::{OrganismId, Position};
use tracing::{debug, trace};

/// Contents of the block in front of an organism
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Wall,
    Empty(Position),
    Occupied(Position, OrganismId),
}

/// `percent`% of `value`, truncated toward zero.
fn percent_of(value: i32, percent: i32) -> i32 {
    (value as i64 * percent as i64 / 100) as i32
}

impl World {
    /// Run one turn of `id`: terminal checks, then decode and perform the
    /// gene under its cursor, advance the cursor and pay the metabolic cost.
    pub fn act(&mut self, id: OrganismId) {
        let Some(organism) = self.organisms.get(&id) else {
            return;
        };

        if let Some(cause) = organism.terminal_condition(self.config.lifecycle.max_age) {
            self.retire(id, cause);
            return;
        }

        let action = Action::decode(organism.cell_type(), organism.current_gene());
        trace!(organism_id = %id, action = action.name(), "Performing action");
        let step = self.perform(id, action);
        self.report.acted += 1;

        let metabolic_cost = self.config.energy.metabolic_cost;
        let Some(organism) = self.organisms.get_mut(&id) else {
            return;
        };
        organism.advance_cursor(step);
        organism.energy = organism.energy.saturating_sub(metabolic_cost);
        organism.age += 1;

        // Overdrawn organisms do not stay registered with negative energy.
        if organism.energy < 0 {
            self.retire(id, DeathCause::Starved);
        }
    }

    /// What `id` would see one block ahead, `None` if it is not registered.
    pub fn facing(&self, id: OrganismId) -> Option<Facing> {
        let organism = self.organisms.get(&id)?;
        let target = organism.position().step(organism.direction());

        let facing = match self.grid.get(target) {
            None => Facing::Wall,
            Some(block) => match block.occupant() {
                None => Facing::Empty(target),
                Some(other) => Facing::Occupied(target, other),
            },
        };
        Some(facing)
    }

    fn perform(&mut self, id: OrganismId, action: Action) -> usize {
        match action {
            Action::LookForward => self.look_forward(id),
            Action::MoveForward => self.move_forward(id),
            Action::Turn => self.turn(id),
            Action::Photosynthesize => self.photosynthesize(id),
            Action::Attack => self.attack(id),
            Action::Reproduce => self.reproduce(id),
            Action::GiveEnergy => self.give_energy(id),
            Action::StealEnergy => self.steal_energy(id),
            Action::Idle(gene) => gene as usize,
        }
    }

    /// Classify a neighbour as seen by `observer`.
    fn sighting_of(&self, observer: OrganismId, other: OrganismId) -> Option<Sighting> {
        let observer = self.organisms.get(&observer)?;
        let other = self.organisms.get(&other)?;
        if observer.is_kin(other) {
            Some(Sighting::Kin)
        } else {
            Some(Sighting::stranger(other.cell_type()))
        }
    }

    fn look_forward(&mut self, id: OrganismId) -> usize {
        let sighting = match self.facing(id) {
            None | Some(Facing::Wall) => Sighting::Wall,
            Some(Facing::Empty(_)) => Sighting::Empty,
            Some(Facing::Occupied(_, other)) => {
                self.sighting_of(id, other).unwrap_or(Sighting::Empty)
            }
        };
        sighting.step()
    }

    fn move_forward(&mut self, id: OrganismId) -> usize {
        let movement_cost = self.config.energy.movement_cost;
        let Some(organism) = self.organisms.get(&id) else {
            return STEP_FAILED;
        };
        if organism.energy < movement_cost {
            return STEP_FAILED;
        }

        match self.facing(id) {
            Some(Facing::Empty(target)) => {
                self.relocate(id, target);
                if let Some(organism) = self.organisms.get_mut(&id) {
                    organism.energy = organism.energy.saturating_sub(movement_cost);
                }
                STEP_MOVED
            }
            _ => STEP_FAILED,
        }
    }

    fn turn(&mut self, id: OrganismId) -> usize {
        if let Some(organism) = self.organisms.get_mut(&id) {
            organism.direction = match TurnKind::from_gene(organism.peek_gene(1)) {
                TurnKind::Left => organism.direction.left(2),
                TurnKind::Right => organism.direction.right(2),
                TurnKind::Straight => organism.direction,
            };
        }
        STEP_TURNED
    }

    fn photosynthesize(&mut self, id: OrganismId) -> usize {
        let gain = self.config.energy.photosynthesis_gain;
        if let Some(organism) = self.organisms.get_mut(&id) {
            organism.energy = organism.energy.saturating_add(gain);
        }
        STEP_PHOTOSYNTHESIZED
    }

    fn reproduce(&mut self, id: OrganismId) -> usize {
        let Some(parent) = self.organisms.get(&id) else {
            return STEP_FAILED;
        };
        if parent.energy < self.config.energy.reproduction_threshold {
            trace!(
                organism_id = %id,
                energy = parent.energy,
                "Reproduction refused: insufficient energy"
            );
            return STEP_FAILED;
        }
        if parent.cell_type().dies_from_excess() && parent.energy >= parent.max_energy {
            trace!(
                organism_id = %id,
                energy = parent.energy,
                "Reproduction refused: at energy cap"
            );
            return STEP_FAILED;
        }

        let Some(Facing::Empty(target)) = self.facing(id) else {
            return STEP_FAILED;
        };

        let cell_type = parent.cell_type();
        let lineage = parent.lineage_id();
        let energy_before = parent.energy;
        let share = energy_before / 2;
        let (genome, mutation) = self.mutator.replicate(parent.genome(), &mut self.rng);

        let Some(child) = self.insert(target, cell_type, lineage, genome, share) else {
            return STEP_FAILED;
        };
        if let Some(parent) = self.organisms.get_mut(&id) {
            parent.energy = share;
        }
        self.report.births += 1;

        debug!(
            event = "reproduction",
            parent_id = %id,
            offspring_id = %child,
            lineage_id = %lineage,
            %cell_type,
            parent_energy_before = energy_before,
            share = share,
            mutated_locus = ?mutation.map(|m| m.locus),
            offspring_x = target.x,
            offspring_y = target.y,
            tick = self.report.tick,
            "Organism reproduced"
        );
        STEP_REPRODUCED
    }

    fn attack(&mut self, id: OrganismId) -> usize {
        let Some(Facing::Occupied(target, victim)) = self.facing(id) else {
            return STEP_FAILED;
        };
        match self.sighting_of(id, victim) {
            None | Some(Sighting::Kin) => return STEP_FAILED,
            Some(_) => {}
        }

        let Some(prey) = self.organisms.get(&victim) else {
            return STEP_FAILED;
        };
        let gained = prey.energy;
        let prey_lineage = prey.lineage_id();

        self.retire(victim, DeathCause::Eaten);
        self.relocate(id, target);

        let movement_cost = self.config.energy.movement_cost;
        if let Some(predator) = self.organisms.get_mut(&id) {
            predator.energy = predator
                .energy
                .saturating_add(gained)
                .saturating_sub(movement_cost);
        }

        debug!(
            event = "predation",
            predator_id = %id,
            prey_id = %victim,
            prey_lineage_id = %prey_lineage,
            energy_gained = gained,
            x = target.x,
            y = target.y,
            tick = self.report.tick,
            "Predator consumed prey"
        );
        STEP_MOVED
    }

    /// Take a share of a stranger's energy. The thief's gain and the victim's
    /// loss are separate percentages of the victim's energy, so a theft need
    /// not conserve energy.
    fn steal_energy(&mut self, id: OrganismId) -> usize {
        let Some(Facing::Occupied(_, target)) = self.facing(id) else {
            return STEP_FAILED;
        };
        let Some(sighting) = self.sighting_of(id, target) else {
            return STEP_FAILED;
        };
        if sighting == Sighting::Kin {
            return sighting.step();
        }

        let (gain_percent, loss_percent) = (
            self.config.energy.steal_gain_percent,
            self.config.energy.steal_loss_percent,
        );
        let Some(victim) = self.organisms.get_mut(&target) else {
            return STEP_FAILED;
        };
        let victim_energy = victim.energy;
        let gain = percent_of(victim_energy, gain_percent);
        let loss = percent_of(victim_energy, loss_percent);
        victim.energy = victim_energy.saturating_sub(loss);

        if let Some(thief) = self.organisms.get_mut(&id) {
            thief.energy = thief.energy.saturating_add(gain);
        }

        trace!(thief_id = %id, victim_id = %target, gain, loss, "Energy stolen");
        sighting.step()
    }

    /// Hand a share of the giver's energy to any neighbour below its cap.
    fn give_energy(&mut self, id: OrganismId) -> usize {
        let Some(Facing::Occupied(_, target)) = self.facing(id) else {
            return STEP_FAILED;
        };
        let Some(recipient) = self.organisms.get(&target) else {
            return STEP_FAILED;
        };
        if recipient.energy >= recipient.max_energy {
            return STEP_FAILED;
        }
        let Some(sighting) = self.sighting_of(id, target) else {
            return STEP_FAILED;
        };

        let give_percent = self.config.energy.give_percent;
        let Some(giver) = self.organisms.get_mut(&id) else {
            return STEP_FAILED;
        };
        let amount = percent_of(giver.energy, give_percent);
        giver.energy = giver.energy.saturating_sub(amount);

        if let Some(recipient) = self.organisms.get_mut(&target) {
            recipient.energy = recipient.energy.saturating_add(amount);
        }

        trace!(giver_id = %id, recipient_id = %target, amount, "Energy given");
        sighting.step()
    }

    /// Move a registered organism onto a free block.
    fn relocate(&mut self, id: OrganismId, target: Position) {
        let Some(organism) = self.organisms.get_mut(&id) else {
            return;
        };
        let from = organism.position;
        organism.position = target;
        self.grid.clear(from);
        self.grid.place(target, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{Genome, GENOME_LENGTH};
    use cellsim_core::{CellType, Direction, SimConfig};

    const IDLE: u8 = 50;

    fn test_config(width: i32, height: i32) -> SimConfig {
        let mut config = SimConfig::default();
        config.world.width = width;
        config.world.height = height;
        config.world.seed = Some(42);
        config.mutation.mutation_rate = 0.0;
        config
    }

    fn new_world(width: i32, height: i32) -> World {
        World::from_config(test_config(width, height)).unwrap()
    }

    /// Genome starting with `prefix`, padded with `fill`
    fn genome(prefix: &[u8], fill: u8) -> Genome {
        let mut genes = [fill; GENOME_LENGTH];
        genes[..prefix.len()].copy_from_slice(prefix);
        Genome::new(genes).unwrap()
    }

    fn place(world: &mut World, x: i32, y: i32, cell_type: CellType, genome: Genome) -> OrganismId {
        world
            .spawn_with_genome(x, y, cell_type, genome, None)
            .expect("block should be free")
    }

    #[test]
    fn test_photosynthesis_tick() {
        let mut world = new_world(10, 10);
        let id = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 25));

        let report = world.tick();

        let org = world.get(id).unwrap();
        assert_eq!(org.energy, 50 + 5 - 1);
        assert_eq!(org.genome_cursor, 1);
        assert_eq!(org.age, 1);
        assert_eq!(report.acted, 1);
    }

    #[test]
    fn test_photosynthesis_gain_is_exact() {
        let mut config = test_config(10, 10);
        config.energy.metabolic_cost = 0;
        let mut world = World::from_config(config).unwrap();
        let id = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 25));

        world.tick();
        assert_eq!(world.get(id).unwrap().energy, 50 + 5);
    }

    #[test]
    fn test_predator_attack_scenario() {
        let mut world = new_world(10, 10);
        let predator = place(&mut world, 0, 0, CellType::Predator, genome(&[], 25));
        let prey = place(&mut world, 1, 0, CellType::Photosynthetic, genome(&[], 1));
        world.get_mut(predator).unwrap().direction = Direction::East;

        let report = world.tick();

        assert!(!world.contains(prey));
        assert_eq!(report.kills, 1);
        assert_eq!(report.acted, 1);

        let org = world.get(predator).unwrap();
        assert_eq!(org.position(), Position::new(1, 0));
        assert_eq!(org.energy, 50 + 50 - 2 - 1);
        assert_eq!(org.genome_cursor, 2);
        assert!(world.get_cell(0, 0).unwrap().is_empty());
        assert_eq!(world.get_cell(1, 0).unwrap().occupant(), Some(predator));
        assert!(world.check_consistency().is_ok());
    }

    #[test]
    fn test_attack_spares_kin() {
        let mut world = new_world(10, 10);
        let predator = place(&mut world, 0, 0, CellType::Predator, genome(&[], 25));
        let kin = place(&mut world, 1, 0, CellType::Photosynthetic, genome(&[], 25));
        world.get_mut(predator).unwrap().direction = Direction::East;

        world.tick();

        assert!(world.contains(kin));
        let org = world.get(predator).unwrap();
        assert_eq!(org.position(), Position::new(0, 0));
        assert_eq!(org.genome_cursor, 1);
        assert_eq!(org.energy, 49);
    }

    #[test]
    fn test_attack_ignores_shared_lineage() {
        let mut world = new_world(10, 10);
        let predator = place(&mut world, 0, 0, CellType::Predator, genome(&[], 25));
        let lineage = world.get(predator).unwrap().lineage_id();
        let cousin = world
            .spawn_with_genome(1, 0, CellType::Predator, genome(&[7], 25), Some(lineage))
            .unwrap();
        world.get_mut(predator).unwrap().direction = Direction::East;
        assert_eq!(world.is_kin(predator, cousin), Some(false));

        let report = world.tick();

        assert!(!world.contains(cousin));
        assert_eq!(report.kills, 1);
        assert_eq!(world.get(predator).unwrap().position(), Position::new(1, 0));
    }

    #[test]
    fn test_energy_saturates_instead_of_overflowing() {
        let mut world = new_world(10, 10);
        let predator = place(&mut world, 0, 0, CellType::Predator, genome(&[], 25));
        let prey = place(&mut world, 1, 0, CellType::Photosynthetic, genome(&[], 1));
        world.get_mut(predator).unwrap().energy = i32::MAX;
        world.get_mut(predator).unwrap().direction = Direction::East;
        world.get_mut(prey).unwrap().energy = i32::MAX - 10;

        world.tick();

        assert!(!world.contains(prey));
        assert_eq!(world.get(predator).unwrap().energy, i32::MAX - 2 - 1);

        let thief = place(&mut world, 5, 5, CellType::Predator, genome(&[41], 25));
        let mark = place(&mut world, 5, 4, CellType::Photosynthetic, genome(&[], 1));
        world.get_mut(thief).unwrap().energy = i32::MAX;
        world.get_mut(mark).unwrap().energy = 100;
        world.act(thief);
        assert_eq!(world.get(thief).unwrap().energy, i32::MAX - 1);
        assert_eq!(world.get(mark).unwrap().energy, 60);
    }

    #[test]
    fn test_attack_into_wall_or_empty() {
        let mut world = new_world(10, 10);
        let predator = place(&mut world, 0, 0, CellType::Predator, genome(&[], 25));

        // Facing north off the grid
        world.tick();
        assert_eq!(world.get(predator).unwrap().genome_cursor, 1);

        world.get_mut(predator).unwrap().direction = Direction::South;
        world.tick();
        let org = world.get(predator).unwrap();
        assert_eq!(org.genome_cursor, 2);
        assert_eq!(org.position(), Position::new(0, 0));
    }

    #[test]
    fn test_contested_block_goes_to_first_registered() {
        let mut world = new_world(10, 10);
        let first = place(&mut world, 0, 1, CellType::Photosynthetic, genome(&[], 9));
        let second = place(&mut world, 2, 1, CellType::Photosynthetic, genome(&[], 9));
        world.get_mut(first).unwrap().direction = Direction::East;
        world.get_mut(second).unwrap().direction = Direction::West;

        world.tick();

        assert_eq!(world.get_cell(1, 1).unwrap().occupant(), Some(first));
        let winner = world.get(first).unwrap();
        assert_eq!(winner.genome_cursor, 2);
        assert_eq!(winner.energy, 50 - 2 - 1);

        let loser = world.get(second).unwrap();
        assert_eq!(loser.position(), Position::new(2, 1));
        assert_eq!(loser.genome_cursor, 1);
        assert_eq!(loser.energy, 49);
    }

    #[test]
    fn test_move_requires_energy() {
        let mut world = new_world(10, 10);
        let id = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 9));
        world.get_mut(id).unwrap().energy = 1;

        world.tick();

        // Stayed put and spent its last unit on metabolism
        assert_eq!(world.get_cell(5, 5).unwrap().occupant(), Some(id));
        assert!(world.get_cell(5, 4).unwrap().is_empty());
        let org = world.get(id).unwrap();
        assert_eq!(org.energy, 0);
        assert_eq!(org.genome_cursor, 1);

        // Zero energy is removed at the start of its next turn
        world.tick();
        assert!(!world.contains(id));
        assert!(world.get_cell(5, 5).unwrap().is_empty());
    }

    #[test]
    fn test_exhausted_organism_removed_before_acting() {
        let mut world = new_world(10, 10);
        let id = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 25));
        world.get_mut(id).unwrap().energy = 0;

        let report = world.tick();

        assert!(!world.contains(id));
        assert_eq!(report.deaths, 1);
        assert_eq!(report.acted, 0);
    }

    #[test]
    fn test_overdrawn_organism_is_removed() {
        let mut world = new_world(10, 10);
        let id = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 9));
        world.get_mut(id).unwrap().energy = 2;

        let report = world.tick();

        assert!(!world.contains(id));
        assert_eq!(report.deaths, 1);
        assert_eq!(world.grid().occupied_count(), 0);
    }

    #[test]
    fn test_move_off_grid_is_blocked() {
        let mut world = new_world(10, 10);
        let id = place(&mut world, 3, 0, CellType::Predator, genome(&[], 9));

        world.tick();

        let org = world.get(id).unwrap();
        assert_eq!(org.position(), Position::new(3, 0));
        assert_eq!(org.genome_cursor, 1);
        assert_eq!(org.energy, 49);
    }

    #[test]
    fn test_look_forward_outcomes() {
        let cases: Vec<(Option<(CellType, Genome)>, usize)> = vec![
            (None, 1),
            (Some((CellType::Photosynthetic, genome(&[], 1))), 5),
            (Some((CellType::Photosynthetic, genome(&[], IDLE))), 3),
            (Some((CellType::Predator, genome(&[], IDLE))), 4),
        ];

        for (neighbour, expected) in cases {
            let mut world = new_world(10, 10);
            let observer = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 1));
            if let Some((cell_type, genome)) = neighbour {
                place(&mut world, 5, 4, cell_type, genome);
            }

            world.tick();
            assert_eq!(world.get(observer).unwrap().genome_cursor, expected);
        }

        let mut world = new_world(10, 10);
        let observer = place(&mut world, 5, 0, CellType::Predator, genome(&[], 1));
        world.tick();
        assert_eq!(world.get(observer).unwrap().genome_cursor, 2);
    }

    #[test]
    fn test_turn_reads_following_gene() {
        let cases = [
            (18, Direction::West),
            (20, Direction::West),
            (21, Direction::East),
            (24, Direction::East),
            (30, Direction::North),
            (9, Direction::North),
        ];

        for (next, expected) in cases {
            let mut world = new_world(10, 10);
            let id = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[17, next], IDLE));

            world.tick();

            let org = world.get(id).unwrap();
            assert_eq!(org.direction(), expected, "next gene {next}");
            assert_eq!(org.genome_cursor, 2);
        }
    }

    #[test]
    fn test_reproduction_splits_energy() {
        let mut world = new_world(10, 10);
        let parent = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 33));
        world.get_mut(parent).unwrap().energy = 80;
        let lineage = world.get(parent).unwrap().lineage_id();

        let report = world.tick();
        assert_eq!(report.births, 1);

        let child = world.organism_at(5, 4).expect("offspring ahead of parent");
        assert_eq!(child.energy, 40);
        assert_eq!(child.age, 0);
        assert_eq!(child.genome_cursor, 0);
        assert_eq!(child.cell_type(), CellType::Photosynthetic);
        assert_eq!(child.lineage_id(), lineage);
        assert_eq!(child.genome().len(), GENOME_LENGTH);

        let parent_org = world.get(parent).unwrap();
        assert_eq!(parent_org.genome_cursor, 3);
        // Halves sum to the energy before reproducing; metabolism comes after
        assert_eq!(parent_org.energy + 1 + child.energy, 80);
        assert!(parent_org.is_kin(child));

        assert_eq!(world.len(), 2);
        assert!(world.check_consistency().is_ok());
    }

    #[test]
    fn test_reproduction_odd_energy_truncates() {
        let mut world = new_world(10, 10);
        let parent = place(&mut world, 5, 5, CellType::Predator, genome(&[], 33));
        world.get_mut(parent).unwrap().energy = 81;

        world.tick();

        assert_eq!(world.organism_at(5, 4).unwrap().energy, 40);
        assert_eq!(world.get(parent).unwrap().energy, 40 - 1);
    }

    #[test]
    fn test_reproduction_blocked() {
        // Occupied block ahead
        let mut world = new_world(10, 10);
        let parent = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 33));
        place(&mut world, 5, 4, CellType::Photosynthetic, genome(&[], IDLE));
        world.get_mut(parent).unwrap().energy = 100;

        let report = world.tick();
        assert_eq!(report.births, 0);
        assert_eq!(world.len(), 2);
        let org = world.get(parent).unwrap();
        assert_eq!(org.energy, 99);
        assert_eq!(org.genome_cursor, 1);

        // Wall ahead
        let mut world = new_world(10, 10);
        let parent = place(&mut world, 5, 0, CellType::Photosynthetic, genome(&[], 33));
        world.get_mut(parent).unwrap().energy = 100;
        world.tick();
        assert_eq!(world.len(), 1);
        assert_eq!(world.get(parent).unwrap().energy, 99);
    }

    #[test]
    fn test_reproduction_energy_gates() {
        // Below threshold
        let mut world = new_world(10, 10);
        let parent = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 33));
        world.get_mut(parent).unwrap().energy = 59;
        world.tick();
        assert_eq!(world.len(), 1);

        // Photosynthetic at the cap may not reproduce
        let mut world = new_world(10, 10);
        let parent = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 33));
        world.get_mut(parent).unwrap().energy = 150;
        world.tick();
        assert_eq!(world.len(), 1);
        assert_eq!(world.get(parent).unwrap().genome_cursor, 1);

        // Predators have no cap
        let mut world = new_world(10, 10);
        let parent = place(&mut world, 5, 5, CellType::Predator, genome(&[], 33));
        world.get_mut(parent).unwrap().energy = 500;
        world.tick();
        assert_eq!(world.len(), 2);
        assert_eq!(world.organism_at(5, 4).unwrap().energy, 250);
    }

    #[test]
    fn test_steal_is_asymmetric() {
        let mut world = new_world(10, 10);
        let thief = place(&mut world, 5, 5, CellType::Predator, genome(&[], 41));
        let victim = place(&mut world, 5, 4, CellType::Photosynthetic, genome(&[], IDLE));

        world.tick();

        // Thief gains 20% of 50, victim loses 40% of 50
        let thief_org = world.get(thief).unwrap();
        assert_eq!(thief_org.energy, 50 + 10 - 1);
        assert_eq!(thief_org.genome_cursor, 3);
        assert_eq!(world.get(victim).unwrap().energy, 50 - 20 - 1);
    }

    #[test]
    fn test_steal_outcomes() {
        let mut world = new_world(10, 10);
        let thief = place(&mut world, 5, 5, CellType::Predator, genome(&[], 41));
        place(&mut world, 5, 4, CellType::Predator, genome(&[], IDLE));
        world.tick();
        assert_eq!(world.get(thief).unwrap().genome_cursor, 4);

        // Kin are left alone
        let mut world = new_world(10, 10);
        let thief = place(&mut world, 5, 5, CellType::Predator, genome(&[], 41));
        let kin = place(&mut world, 5, 4, CellType::Predator, genome(&[], 41));
        world.tick();
        assert_eq!(world.get(thief).unwrap().genome_cursor, 5);
        assert_eq!(world.get(thief).unwrap().energy, 49);
        assert_eq!(world.get(kin).unwrap().energy, 49);

        // Nothing ahead
        let mut world = new_world(10, 10);
        let thief = place(&mut world, 5, 5, CellType::Predator, genome(&[], 41));
        world.tick();
        assert_eq!(world.get(thief).unwrap().genome_cursor, 1);
    }

    #[test]
    fn test_give_energy() {
        let mut world = new_world(10, 10);
        let giver = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 41));
        let recipient = place(&mut world, 5, 4, CellType::Photosynthetic, genome(&[], IDLE));

        world.tick();

        let giver_org = world.get(giver).unwrap();
        assert_eq!(giver_org.energy, 50 - 10 - 1);
        assert_eq!(giver_org.genome_cursor, 3);
        assert_eq!(world.get(recipient).unwrap().energy, 50 + 10 - 1);
    }

    #[test]
    fn test_give_energy_outcomes() {
        // Recipient at its cap
        let mut world = new_world(10, 10);
        let giver = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 41));
        let full = place(&mut world, 5, 4, CellType::Predator, genome(&[], IDLE));
        world.get_mut(full).unwrap().energy = 150;
        world.tick();
        assert_eq!(world.get(giver).unwrap().genome_cursor, 1);
        assert_eq!(world.get(giver).unwrap().energy, 49);

        // Predator recipient
        let mut world = new_world(10, 10);
        let giver = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 41));
        place(&mut world, 5, 4, CellType::Predator, genome(&[], IDLE));
        world.tick();
        assert_eq!(world.get(giver).unwrap().genome_cursor, 4);

        // Kin recipient
        let mut world = new_world(10, 10);
        let giver = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[], 41));
        let kin = place(&mut world, 5, 4, CellType::Photosynthetic, genome(&[], 41));
        world.tick();
        assert_eq!(world.get(giver).unwrap().genome_cursor, 5);
        assert_eq!(world.get(kin).unwrap().energy, 50 + 10 - 1);
    }

    #[test]
    fn test_idle_gene_jumps_cursor() {
        let mut world = new_world(10, 10);
        let id = place(&mut world, 5, 5, CellType::Photosynthetic, genome(&[55], 1));
        world.tick();
        assert_eq!(world.get(id).unwrap().genome_cursor, 55);

        // A zero gene parks the cursor
        let mut world = new_world(10, 10);
        let id = place(&mut world, 5, 5, CellType::Predator, genome(&[0], 1));
        world.tick();
        world.tick();
        let org = world.get(id).unwrap();
        assert_eq!(org.genome_cursor, 0);
        assert_eq!(org.age, 2);
    }

    #[test]
    fn test_old_age_removal() {
        let mut world = new_world(10, 10);
        let elder = place(&mut world, 1, 1, CellType::Photosynthetic, genome(&[], IDLE));
        let nearly = place(&mut world, 3, 3, CellType::Photosynthetic, genome(&[], IDLE));
        world.get_mut(elder).unwrap().age = 1000;
        world.get_mut(elder).unwrap().energy = 140;
        world.get_mut(nearly).unwrap().age = 999;

        let report = world.tick();
        assert!(!world.contains(elder));
        assert!(world.get_cell(1, 1).unwrap().is_empty());
        assert_eq!(world.get(nearly).unwrap().age, 1000);
        assert_eq!(report.deaths, 1);

        world.tick();
        assert!(!world.contains(nearly));
        assert!(world.is_empty());
    }

    #[test]
    fn test_excess_energy_kills_only_photosynthetic() {
        let mut world = new_world(10, 10);
        let plant = place(&mut world, 1, 1, CellType::Photosynthetic, genome(&[], IDLE));
        let predator = place(&mut world, 3, 3, CellType::Predator, genome(&[], IDLE));
        world.get_mut(plant).unwrap().energy = 151;
        world.get_mut(predator).unwrap().energy = 10_000;

        world.tick();

        assert!(!world.contains(plant));
        assert!(world.contains(predator));
    }

    #[test]
    fn test_prey_eaten_before_its_turn_is_skipped() {
        let mut world = new_world(10, 10);
        let predator = place(&mut world, 5, 5, CellType::Predator, genome(&[], 25));
        let prey = place(&mut world, 5, 4, CellType::Photosynthetic, genome(&[], 1));
        let bystander = place(&mut world, 0, 9, CellType::Photosynthetic, genome(&[], 25));

        let report = world.tick();

        assert_eq!(report.kills, 1);
        assert!(!world.contains(prey));
        // Predator and bystander acted, the prey did not
        assert_eq!(report.acted, 2);
        assert_eq!(world.get(bystander).unwrap().age, 1);
        assert_eq!(world.get(predator).unwrap().position(), Position::new(5, 4));
    }

    #[test]
    fn test_facing() {
        let mut world = new_world(4, 4);
        let a = place(&mut world, 0, 1, CellType::Photosynthetic, genome(&[], IDLE));
        let b = place(&mut world, 0, 0, CellType::Photosynthetic, genome(&[], IDLE));

        assert_eq!(world.facing(a), Some(Facing::Occupied(Position::new(0, 0), b)));
        assert_eq!(world.facing(b), Some(Facing::Wall));

        world.get_mut(a).unwrap().direction = Direction::East;
        assert_eq!(world.facing(a), Some(Facing::Empty(Position::new(1, 1))));

        world.remove(a);
        assert_eq!(world.facing(a), None);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(50, 20), 10);
        assert_eq!(percent_of(7, 40), 2);
        assert_eq!(percent_of(0, 40), 0);
        assert_eq!(percent_of(i32::MAX, 100), i32::MAX);
    }
}
