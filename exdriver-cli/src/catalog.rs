//! The bundled example programs.

use exdriver_core::{ExampleFault, Registry, RegistryBuilder, RegistryError};

use crate::launcher::Launcher;

/// Name and one-line description of a bundled example.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CatalogEntry {
    /// Name used on the command line.
    pub name: &'static str,
    /// Help text shown in the usage listing.
    pub description: &'static str,
}

const fn entry(name: &'static str, description: &'static str) -> CatalogEntry {
    CatalogEntry { name, description }
}

/// Bundled examples in listing order.
pub const CATALOG: [CatalogEntry; 15] = [
    entry(
        "wordcount",
        "A map/reduce program that counts the words in the input files.",
    ),
    entry(
        "mapredwordcount",
        "A map/reduce program that counts the words in the input files using the mapred apis.",
    ),
    entry(
        "wordcountmrrtest",
        "A map/reduce program that counts the words in the input files. \
         Map splits on spaces. First reduce splits on \".\"",
    ),
    entry(
        "randomwriter",
        "A map/reduce program that writes 10GB of random data per node.",
    ),
    entry(
        "randomtextwriter",
        "A map/reduce program that writes 10GB of random textual data per node.",
    ),
    entry(
        "sort",
        "A map/reduce program that sorts the data written by the random writer.",
    ),
    entry(
        "secondarysort",
        "An example defining a secondary sort to the reduce.",
    ),
    entry(
        "join",
        "A job that effects a join over sorted, equally partitioned datasets",
    ),
    entry("teragen", "Generate data for the terasort"),
    entry("terasort", "Run the terasort"),
    entry("teravalidate", "Checking results of terasort"),
    entry(
        "groupbyorderbymrrtest",
        "A map-reduce-reduce program that does groupby-order by. Takes input \
         containing employee_name department name per line of input and generates \
         count of employees per department and sorted on employee count",
    ),
    entry("mrrsleep", "MRR Sleep Job"),
    entry(
        "orderedwordcount",
        "Word Count with words sorted on frequency",
    ),
    entry("filterLinesByWord", "Filters lines by the specified word"),
];

/// Registers every [`CATALOG`] entry, bound to `launcher`.
///
/// # Errors
/// Returns [`RegistryError::DuplicateName`] if the catalog repeats a name.
///
/// # Examples
/// ```
/// use exdriver_cli::{catalog::build_registry, launcher::Launcher};
///
/// let registry = build_registry(&Launcher::new())?;
/// assert_eq!(registry.len(), 15);
/// assert!(registry.get("terasort").is_some());
/// # Ok::<(), exdriver_core::RegistryError>(())
/// ```
pub fn build_registry(launcher: &Launcher) -> Result<Registry, RegistryError> {
    CATALOG
        .iter()
        .try_fold(RegistryBuilder::new(), |builder, listed| {
            let launcher = launcher.clone();
            let name = listed.name;
            builder.register(name, listed.description, move |args: &[String]| {
                launcher.run(name, args).map_err(ExampleFault::from)
            })
        })
        .map(RegistryBuilder::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use rstest::rstest;

    #[rstest]
    fn catalog_names_are_unique() {
        let names: HashSet<&str> = CATALOG.iter().map(|entry| entry.name).collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[rstest]
    fn registry_preserves_catalog_order() {
        let registry = build_registry(&Launcher::new()).expect("catalog must register");
        let registered: Vec<(&str, &str)> = registry
            .iter()
            .map(|example| (example.name(), example.description()))
            .collect();
        let expected: Vec<(&str, &str)> = CATALOG
            .iter()
            .map(|entry| (entry.name, entry.description))
            .collect();
        assert_eq!(registered, expected);
    }

    #[rstest]
    #[case("wordcount")]
    #[case("filterLinesByWord")]
    #[case("groupbyorderbymrrtest")]
    fn catalog_contains_expected_examples(#[case] name: &str) {
        assert!(CATALOG.iter().any(|entry| entry.name == name));
    }

    #[rstest]
    fn descriptions_are_single_lines() {
        assert!(
            CATALOG
                .iter()
                .all(|entry| !entry.description.is_empty() && !entry.description.contains('\n'))
        );
    }

    #[cfg(unix)]
    #[rstest]
    fn entry_points_launch_prefixed_programs() -> Result<(), ExampleFault> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new()?;
        let script = dir.path().join("exdriver-secondarysort");
        std::fs::write(&script, "#!/bin/sh\nexit $#\n")?;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;

        let registry = build_registry(&Launcher::with_program_dir(dir.path()))?;
        let example = registry.get("secondarysort").expect("example must exist");
        let args = vec!["a".to_owned(), "b".to_owned()];
        assert_eq!(example.invoke(&args)?, 2);

        let missing = registry.get("join").expect("example must exist");
        assert!(missing.invoke(&[]).is_err());
        Ok(())
    }
}
