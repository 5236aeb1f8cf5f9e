//! Font discovery
//!
//! Uses fontdb to list the monospace families installed on the system for the
//! settings dialog's font picker.

use std::sync::OnceLock;

use fontdb::Database;

/// Generic family resolved by the platform's font configuration
pub const GENERIC_MONOSPACE: &str = "Monospace";

/// Installed monospace families (scanned once)
static MONOSPACE_FAMILIES: OnceLock<Vec<String>> = OnceLock::new();

/// Monospace families offered by the font picker
///
/// The generic family always comes first so a picker never runs empty.
pub fn monospace_families() -> &'static [String] {
    MONOSPACE_FAMILIES.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Loaded {} system fonts", db.faces().count());

        let families = family_list(
            db.faces()
                .filter(|face| face.monospaced)
                .filter_map(|face| face.families.first().map(|(name, _)| name.as_str())),
        );
        log::debug!("Monospace families: {:?}", families);
        families
    })
}

/// Generic family first, then the distinct names in sorted order
pub fn family_list<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut families: Vec<String> = Vec::new();
    for name in names {
        let name = name.trim();
        if name.is_empty()
            || name.eq_ignore_ascii_case(GENERIC_MONOSPACE)
            || families.iter().any(|f| f == name)
        {
            continue;
        }
        families.push(name.to_string());
    }
    families.sort();
    families.insert(0, GENERIC_MONOSPACE.to_string());
    families
}
