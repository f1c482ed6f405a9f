//! Configuration of ECS world.

/// Configuration of component storages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Count of components each storage reserves space for up front.
    pub initial_capacity: usize,
    /// Upper bound of components in each storage. Storages grow without bound if `None`.
    pub capacity_limit: Option<usize>,
}

impl StorageConfig {
    /// Default count of components reserved by each storage.
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates new configuration with given initial capacity and capacity limit.
    pub const fn new(initial_capacity: usize, capacity_limit: Option<usize>) -> Self {
        Self {
            initial_capacity,
            capacity_limit,
        }
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_capacity_limit(mut self, capacity_limit: Option<usize>) -> Self {
        self.capacity_limit = capacity_limit;
        self
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY, None)
    }
}

/// General configuration of ECS [`World`](crate::World).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldConfig {
    /// Configuration of every component storage of the world.
    pub storage: StorageConfig,
}

impl WorldConfig {
    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }
}
