//! Example catalog construction.
//!
//! [`RegistryBuilder`] is the only way to add examples. Calling
//! [`RegistryBuilder::build`] seals the catalog into an immutable [`Registry`]
//! that the dispatcher borrows.

use std::{collections::HashMap, fmt};

use crate::error::{ExampleFault, RegistryError};

/// Callable bound to one catalog name.
///
/// Receives the arguments that followed the example name and returns the
/// example's exit status.
pub type EntryPoint = Box<dyn Fn(&[String]) -> Result<i32, ExampleFault> + Send + Sync>;

/// A registered example: its name, one-line help text, and entry point.
pub struct ExampleDescriptor {
    name: String,
    description: String,
    entry_point: EntryPoint,
}

impl ExampleDescriptor {
    /// Returns the unique name used to select the example.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the one-line description shown in usage listings.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Invokes the entry point with `args`.
    ///
    /// # Errors
    /// Propagates the [`ExampleFault`] returned by the entry point.
    pub fn invoke(&self, args: &[String]) -> Result<i32, ExampleFault> {
        (self.entry_point)(args)
    }
}

impl fmt::Debug for ExampleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExampleDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Collects examples in registration order before sealing them into a
/// [`Registry`].
///
/// # Examples
/// ```
/// use exdriver_core::{RegistryBuilder, RegistryError};
///
/// let registry = RegistryBuilder::new()
///     .register("wordcount", "Counts words.", |_args| Ok(0))?
///     .register("sort", "Sorts records.", |_args| Ok(0))?
///     .build();
/// let names: Vec<&str> = registry.iter().map(|example| example.name()).collect();
/// assert_eq!(names, ["wordcount", "sort"]);
/// # Ok::<(), RegistryError>(())
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<ExampleDescriptor>,
    index: HashMap<String, usize>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an example to the catalog.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateName`] when `name` was already
    /// registered; the builder is consumed in that case.
    ///
    /// # Examples
    /// ```
    /// use exdriver_core::{RegistryBuilder, RegistryError};
    ///
    /// let err = RegistryBuilder::new()
    ///     .register("sort", "Sorts records.", |_args| Ok(0))
    ///     .and_then(|builder| builder.register("sort", "Again.", |_args| Ok(1)))
    ///     .expect_err("duplicate names are rejected");
    /// assert_eq!(err, RegistryError::DuplicateName { name: "sort".into() });
    /// ```
    pub fn register<F>(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        entry_point: F,
    ) -> Result<Self, RegistryError>
    where
        F: Fn(&[String]) -> Result<i32, ExampleFault> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateName { name });
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(ExampleDescriptor {
            name,
            description: description.into(),
            entry_point: Box::new(entry_point),
        });
        Ok(self)
    }

    /// Seals the catalog. No examples can be added afterwards.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
            index: self.index,
        }
    }
}

/// Immutable, insertion-ordered catalog of examples.
#[derive(Debug)]
pub struct Registry {
    entries: Vec<ExampleDescriptor>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Looks up the example registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ExampleDescriptor> {
        self.index
            .get(name)
            .and_then(|position| self.entries.get(*position))
    }

    /// Iterates over the examples in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ExampleDescriptor> {
        self.entries.iter()
    }

    /// Returns the number of registered examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no examples were registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
