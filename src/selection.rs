//! Currently selected kind, clamped to the catalog.

use crate::catalog::{Catalog, KindId};

/// Index of the kind the next canvas click will paint.
///
/// Every mutation clamps to the catalog's valid range; out-of-range
/// requests from hotkeys or menu clicks are an ergonomics case, not an
/// error. The bounds come from the catalog length, so growing the catalog
/// never strands the clamp.
#[derive(Debug, Clone, Copy)]
pub struct Selection {
    index: usize,
}

impl Selection {
    /// Selection starting at the first catalog entry.
    pub fn new() -> Self {
        Selection { index: 0 }
    }

    /// The selected kind.
    pub fn kind(&self) -> KindId {
        KindId(self.index)
    }

    /// Move the selection by `delta` entries, clamped to both catalog
    /// ends.
    pub fn step(&mut self, delta: i32, catalog: &Catalog) {
        let stepped = self.index as i64 + delta as i64;
        let max = (catalog.len() as i64 - 1).max(0);
        self.index = stepped.clamp(0, max) as usize;
    }

    /// Select a kind directly (menu click), clamped into the catalog.
    pub fn set(&mut self, kind: KindId, catalog: &Catalog) {
        self.index = kind.0.min(catalog.len().saturating_sub(1));
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_clamps_at_both_catalog_ends() {
        let catalog = Catalog::editor_default();
        let mut sel = Selection::new();

        sel.step(-1, &catalog);
        assert_eq!(sel.kind(), KindId(0));

        sel.step(catalog.len() as i32 + 10, &catalog);
        assert_eq!(sel.kind(), KindId(catalog.len() - 1));

        sel.step(1, &catalog);
        assert_eq!(sel.kind(), KindId(catalog.len() - 1));
    }

    #[test]
    fn direct_set_clamps_into_the_catalog() {
        let catalog = Catalog::editor_default();
        let mut sel = Selection::new();

        sel.set(KindId(3), &catalog);
        assert_eq!(sel.kind(), KindId(3));

        sel.set(KindId(usize::MAX), &catalog);
        assert_eq!(sel.kind(), KindId(catalog.len() - 1));
    }
}
