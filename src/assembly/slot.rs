type Factory<T, C> = Box<dyn FnOnce(&C) -> anyhow::Result<T>>;

/// One component field of [`CommandLineOptions`](super::options::CommandLineOptions).
///
/// `C` is the stage record handed to a factory: it holds exactly the
/// dependencies resolved before this field.
pub enum Slot<T, C> {
    Unset,
    Factory(Factory<T, C>),
    Instance(T),
}

impl<T, C> Slot<T, C> {
    pub fn factory(factory: impl FnOnce(&C) -> anyhow::Result<T> + 'static) -> Self {
        Self::Factory(Box::new(factory))
    }

    pub fn instance(instance: T) -> Self {
        Self::Instance(instance)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Slot::Unset => "default",
            Slot::Factory(_) => "factory",
            Slot::Instance(_) => "instance",
        }
    }

    /// Unset builds the default, a factory is called, an instance is kept as is.
    pub fn resolve<D>(self, context: &C, default: D) -> anyhow::Result<T>
    where
        D: FnOnce(&C) -> anyhow::Result<T>,
    {
        match self {
            Slot::Unset => default(context),
            Slot::Factory(factory) => factory(context),
            Slot::Instance(instance) => Ok(instance),
        }
    }
}

impl<T, C> Default for Slot<T, C> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T, C> From<T> for Slot<T, C> {
    fn from(instance: T) -> Self {
        Self::Instance(instance)
    }
}

impl<T, C> std::fmt::Debug for Slot<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot::{}", self.kind())
    }
}
