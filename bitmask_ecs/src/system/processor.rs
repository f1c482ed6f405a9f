//! Utilities for registration and execution of *systems*.

use std::collections::HashSet;
use std::fmt;

use crate::command::Commands;
use crate::component::{ComponentManager, ComponentMask, ComponentRegistry};
use crate::error::{EcsError, Result};
use crate::Entity;

use super::{AnySystem, Context, Signature, System};

/// Unique identifier of the system registered in [`SystemProcessor`].
///
/// Identifiers follow registration order, which is also execution order.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SystemId(usize);

impl SystemId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of [`SystemProcessor`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProcessorState {
    /// No system was registered yet.
    Idle,
    /// Systems are registered, but no tick was processed yet.
    Registering,
    /// At least one tick was processed.
    Running,
}

struct RegisteredSystem {
    system: Box<dyn AnySystem>,
    mask: ComponentMask,
    /// Enrolled entities in order of enrollment.
    entities: Vec<Entity>,
    enrolled: HashSet<Entity>,
}

impl RegisteredSystem {
    /// Returns `true` if the entity was not enrolled before.
    fn enroll(&mut self, entity: Entity, mask: ComponentMask) -> bool {
        if !mask.contains_all(self.mask) || !self.enrolled.insert(entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }
}

/// Owner of all systems of ECS.
///
/// Tracks which entities are eligible for which system and runs systems every tick.
///
pub struct SystemProcessor {
    systems: Vec<RegisteredSystem>,
    state: ProcessorState,
}

impl SystemProcessor {
    /// Creates processor without any systems.
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            state: ProcessorState::Idle,
        }
    }

    /// Registers the system, placing it after all previously registered ones.
    ///
    /// Component types of the system signature are registered in `registry` if needed.
    /// Every entity of `existing` which already satisfies the signature is enrolled at once.
    ///
    pub fn register<S, I>(
        &mut self,
        system: S,
        registry: &mut ComponentRegistry,
        existing: I,
    ) -> Result<SystemId>
    where
        S: System,
        I: IntoIterator<Item = (Entity, ComponentMask)>,
    {
        let mask = S::Signature::register(registry)?;
        let id = SystemId(self.systems.len());
        let mut registered = RegisteredSystem {
            system: Box::new(system),
            mask,
            entities: Vec::new(),
            enrolled: HashSet::new(),
        };
        for (entity, entity_mask) in existing {
            registered.enroll(entity, entity_mask);
        }
        log::debug!(
            "system `{}` registered as #{} with {:?} requiring {:?}, {} entities enrolled",
            registered.system.name(),
            id,
            mask,
            S::Signature::type_names(),
            registered.entities.len(),
        );

        self.systems.push(registered);
        if self.state == ProcessorState::Idle {
            self.state = ProcessorState::Registering;
        }
        Ok(id)
    }

    /// Enrolls the entity into every system whose required mask is a subset of `mask`.
    ///
    /// Entities which are already enrolled are left as is.
    ///
    pub fn entity_changed_mask(&mut self, entity: Entity, mask: ComponentMask) {
        for registered in &mut self.systems {
            if registered.enroll(entity, mask) {
                log::trace!("{} enrolled into `{}`", entity, registered.system.name());
            }
        }
    }

    /// Runs every system once, in registration order,
    /// over its enrolled entities in enrollment order.
    ///
    /// # Errors
    ///
    /// Processing is aborted at the first error returned by a system.
    ///
    pub fn process(
        &mut self,
        delta_time: f32,
        components: &ComponentManager,
        commands: &mut Commands,
    ) -> Result<()> {
        self.state = ProcessorState::Running;
        let mut ctx = Context::new(delta_time, components, commands);
        for registered in &mut self.systems {
            let RegisteredSystem {
                system, entities, ..
            } = registered;
            for &entity in entities.iter() {
                system.process_entity(&mut ctx, entity)?;
            }
        }
        Ok(())
    }

    /// Enrolled entities of the system in order of enrollment.
    pub fn entities(&self, id: SystemId) -> Result<&[Entity]> {
        self.get(id).map(|registered| registered.entities.as_slice())
    }

    /// Component mask required by the system.
    pub fn mask(&self, id: SystemId) -> Result<ComponentMask> {
        self.get(id).map(|registered| registered.mask)
    }

    /// Name of the system.
    pub fn name(&self, id: SystemId) -> Result<&str> {
        self.get(id).map(|registered| registered.system.name())
    }

    /// Count of registered systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn state(&self) -> ProcessorState {
        self.state
    }

    fn get(&self, id: SystemId) -> Result<&RegisteredSystem> {
        self.systems.get(id.0).ok_or(EcsError::UnknownSystem(id))
    }
}

impl Default for SystemProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::entity::EntityRegistry;
    use crate::FnSystem;

    struct Position;
    struct Velocity;

    fn recording<S>(name: &'static str, log: &Rc<RefCell<Vec<(&'static str, u32)>>>) -> impl System
    where
        S: Signature,
    {
        let log = Rc::clone(log);
        FnSystem::<S, _>::new(name, move |_, entity| {
            log.borrow_mut().push((name, entity.id()));
            Ok(())
        })
    }

    #[test]
    fn test_enrollment_is_idempotent() {
        let mut registry = ComponentRegistry::new();
        let mut entities = EntityRegistry::new();
        let mut processor = SystemProcessor::new();
        assert_eq!(processor.state(), ProcessorState::Idle);

        let log = Rc::new(RefCell::new(Vec::new()));
        let id = processor
            .register(recording::<(Position,)>("pos", &log), &mut registry, entities.iter())
            .unwrap();
        assert_eq!(processor.state(), ProcessorState::Registering);

        let entity = entities.create();
        let mask = registry.mask_of::<Position>().unwrap();
        processor.entity_changed_mask(entity, mask);
        processor.entity_changed_mask(entity, mask);
        assert_eq!(processor.entities(id).unwrap(), &[entity]);

        let components = ComponentManager::new();
        let mut commands = Commands::new();
        processor.process(0.0, &components, &mut commands).unwrap();
        assert_eq!(processor.state(), ProcessorState::Running);
        assert_eq!(*log.borrow(), vec![("pos", entity.id())]);
    }

    #[test]
    fn test_subset_matching() {
        let mut registry = ComponentRegistry::new();
        let mut entities = EntityRegistry::new();
        let mut processor = SystemProcessor::new();

        let log = Rc::new(RefCell::new(Vec::new()));
        let both = processor
            .register(
                recording::<(Position, Velocity)>("both", &log),
                &mut registry,
                entities.iter(),
            )
            .unwrap();
        let position = registry.mask_of::<Position>().unwrap();
        let velocity = registry.mask_of::<Velocity>().unwrap();
        assert_eq!(processor.mask(both), Ok(position | velocity));

        let entity = entities.create();
        processor.entity_changed_mask(entity, velocity);
        assert!(processor.entities(both).unwrap().is_empty());
        processor.entity_changed_mask(entity, velocity | position);
        assert_eq!(processor.entities(both).unwrap(), &[entity]);
    }

    #[test]
    fn test_existing_entities_are_enrolled() {
        let mut registry = ComponentRegistry::new();
        let mut entities = EntityRegistry::new();
        let mut processor = SystemProcessor::new();

        let position = registry.mask_of::<Position>().unwrap();
        let first = entities.create();
        let second = entities.create();
        entities.insert_bits(second, position).unwrap();

        let log = Rc::new(RefCell::new(Vec::new()));
        let id = processor
            .register(recording::<(Position,)>("pos", &log), &mut registry, entities.iter())
            .unwrap();
        assert_eq!(processor.entities(id).unwrap(), &[second]);

        let all = processor
            .register(recording::<()>("all", &log), &mut registry, entities.iter())
            .unwrap();
        assert_eq!(processor.entities(all).unwrap(), &[first, second]);
        assert_eq!(processor.name(all), Ok("all"));
        assert_eq!(processor.len(), 2);
    }

    #[test]
    fn test_unknown_system() {
        let processor = SystemProcessor::new();
        let id = SystemId(3);
        assert_eq!(processor.entities(id), Err(EcsError::UnknownSystem(id)));
    }
}
