//! Static catalog of placeable tile kinds.
//!
//! Every paintable thing in the editor is one entry here; the entry's
//! index is its [`KindId`]. The menu, the selection clamp and the canvas
//! paint dispatch all derive from this table, so growing the catalog never
//! touches any of them.

use crate::error::EditorError;

/// Index into the kind catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindId(pub usize);

/// What painting a kind does to a cell.
///
/// Terrain and water are layered boolean flags; coin and enemy carry a
/// variant id and are single-slot per cell (latest paint wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindCategory {
    /// Solid land; participates in neighbour auto-tiling.
    Terrain,
    Water,
    Coin(u8),
    Enemy(u8),
}

impl KindCategory {
    /// Whether two categories belong to the same menu group (same variant
    /// family), ignoring the variant id.
    pub fn same_group(&self, other: &KindCategory) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// One placeable kind.
#[derive(Debug, Clone, Copy)]
pub struct KindDef {
    pub label: &'static str, // doubles as the menu preview sprite key
    pub category: KindCategory,
}

const EDITOR_KINDS: &[KindDef] = &[
    KindDef {
        label: "land",
        category: KindCategory::Terrain,
    },
    KindDef {
        label: "water",
        category: KindCategory::Water,
    },
    KindDef {
        label: "gold",
        category: KindCategory::Coin(0),
    },
    KindDef {
        label: "silver",
        category: KindCategory::Coin(1),
    },
    KindDef {
        label: "diamond",
        category: KindCategory::Coin(2),
    },
    KindDef {
        label: "spikes",
        category: KindCategory::Enemy(0),
    },
    KindDef {
        label: "tooth",
        category: KindCategory::Enemy(1),
    },
    KindDef {
        label: "shell_left",
        category: KindCategory::Enemy(2),
    },
    KindDef {
        label: "shell_right",
        category: KindCategory::Enemy(3),
    },
];

/// The closed table of placeable kinds.
#[derive(Debug, Clone)]
pub struct Catalog {
    kinds: &'static [KindDef],
}

impl Catalog {
    /// The editor's built-in catalog.
    pub fn editor_default() -> Self {
        Catalog {
            kinds: EDITOR_KINDS,
        }
    }

    /// Number of kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// True when the catalog holds no kinds.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Look up a kind definition; out-of-range ids are a contract
    /// violation, never silently ignored.
    pub fn get(&self, id: KindId) -> Result<&KindDef, EditorError> {
        self.kinds.get(id.0).ok_or(EditorError::UnknownKind(id.0))
    }

    /// The single kind-id → category dispatch point.
    pub fn category_of(&self, id: KindId) -> Result<KindCategory, EditorError> {
        self.get(id).map(|def| def.category)
    }

    /// All kind ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = KindId> + '_ {
        (0..self.kinds.len()).map(KindId)
    }

    /// Label of the kind with exactly this category, if any. The draw
    /// pass uses this to turn a stored coin/enemy variant back into a
    /// sprite key.
    pub fn label_for(&self, category: KindCategory) -> Option<&'static str> {
        self.kinds
            .iter()
            .find(|def| def.category == category)
            .map(|def| def.label)
    }

    /// Kind ids sharing `category`'s menu group, in catalog order. Used to
    /// fill one menu button with its cyclable variants.
    pub fn ids_in_group(&self, category: KindCategory) -> Vec<KindId> {
        self.kinds
            .iter()
            .enumerate()
            .filter(|(_, def)| def.category.same_group(&category))
            .map(|(i, _)| KindId(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_id_is_a_typed_error() {
        let catalog = Catalog::editor_default();
        let err = catalog.category_of(KindId(catalog.len())).unwrap_err();
        assert!(matches!(err, EditorError::UnknownKind(_)));
    }

    #[test]
    fn every_group_has_at_least_one_kind() {
        let catalog = Catalog::editor_default();
        for category in [
            KindCategory::Terrain,
            KindCategory::Water,
            KindCategory::Coin(0),
            KindCategory::Enemy(0),
        ] {
            assert!(
                !catalog.ids_in_group(category).is_empty(),
                "no kinds for {:?}",
                category
            );
        }
    }

    #[test]
    fn coin_variants_are_distinct_within_their_group() {
        let catalog = Catalog::editor_default();
        let coins: Vec<_> = catalog
            .ids_in_group(KindCategory::Coin(0))
            .into_iter()
            .map(|id| catalog.category_of(id).unwrap())
            .collect();
        for (i, a) in coins.iter().enumerate() {
            for b in &coins[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
