//! Identifier lookup command

use projsync_core::{DigestIdentifiers, IdentifierGenerator};

use crate::error::Result;

/// Run the id command
///
/// Prints the unit's project id, or the aggregate's project-type id when no
/// unit is given.
pub fn run_id(aggregate: &str, unit: Option<&str>, extension: &str) -> Result<()> {
    println!("{}", identifier(aggregate, unit, extension));
    Ok(())
}

fn identifier(aggregate: &str, unit: Option<&str>, extension: &str) -> String {
    let ids = DigestIdentifiers::new();
    match unit {
        Some(unit) => ids.unit_id(aggregate, unit),
        None => ids.aggregate_id(aggregate, extension.trim_start_matches('.')),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csharp_aggregate_id_is_fixed() {
        assert_eq!(
            identifier("Game", None, ".cs"),
            projsync_core::ident::CSHARP_PROJECT_TYPE_ID
        );
    }

    #[test]
    fn test_unit_id_matches_engine_ids() {
        assert_eq!(
            identifier("Game", Some("Tools"), "cs"),
            DigestIdentifiers::new().unit_id("Game", "Tools")
        );
    }
}
