//! Display table for the three pipeline stages.

/// Pairs an engine-internal stage identifier with the name shown to users.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StageDisplay {
    /// Identifier the engine uses for the stage.
    pub id: &'static str,
    /// Name rendered in progress output.
    pub display_name: &'static str,
}

/// Stages in rendering order. `ivertex1` is the only aliased identifier.
pub const STAGE_DISPLAY_TABLE: [StageDisplay; 3] = [
    StageDisplay {
        id: "initialmap",
        display_name: "initialmap",
    },
    StageDisplay {
        id: "ivertex1",
        display_name: "intermediate-reducer",
    },
    StageDisplay {
        id: "finalreduce",
        display_name: "finalreduce",
    },
];

/// Returns the display name for `stage_id`, or `None` for stages outside the
/// table.
///
/// # Examples
/// ```
/// use exdriver_core::stage_display_name;
///
/// assert_eq!(stage_display_name("ivertex1"), Some("intermediate-reducer"));
/// assert_eq!(stage_display_name("initialmap"), Some("initialmap"));
/// assert_eq!(stage_display_name("ivertex2"), None);
/// ```
#[must_use]
pub fn stage_display_name(stage_id: &str) -> Option<&'static str> {
    STAGE_DISPLAY_TABLE
        .iter()
        .find(|stage| stage.id == stage_id)
        .map(|stage| stage.display_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn table_order_is_map_intermediate_reduce() {
        let ids: Vec<&str> = STAGE_DISPLAY_TABLE.iter().map(|stage| stage.id).collect();
        assert_eq!(ids, ["initialmap", "ivertex1", "finalreduce"]);
    }

    #[test]
    fn only_the_intermediate_stage_is_aliased() {
        let aliased: Vec<&StageDisplay> = STAGE_DISPLAY_TABLE
            .iter()
            .filter(|stage| stage.id != stage.display_name)
            .collect();
        assert_eq!(aliased.len(), 1);
        assert_eq!(
            aliased.first().map(|stage| stage.display_name),
            Some("intermediate-reducer")
        );
    }

    #[test]
    fn display_names_are_unique() {
        let names: HashSet<&str> = STAGE_DISPLAY_TABLE
            .iter()
            .map(|stage| stage.display_name)
            .collect();
        assert_eq!(names.len(), STAGE_DISPLAY_TABLE.len());
    }
}
