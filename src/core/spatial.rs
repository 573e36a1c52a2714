//! Spatial-Index (KD-Tree) für schnelle Abstandsabfragen auf Szenen-Objekten.

use glam::Vec3;
use indexmap::IndexMap;
use kiddo::{KdTree, SquaredEuclidean};

use super::{ItemId, SceneItem};

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// ID des gefundenen Objekts
    pub item: ItemId,
    /// Euklidische Distanz Mittelpunkt ↔ Suchpunkt
    pub distance: f32,
}

/// Read-only Spatial-Index über den Mittelpunkten aller Szenen-Objekte.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 3>,
    item_ids: Vec<ItemId>,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 3]>::new()).into(),
            item_ids: Vec::new(),
        }
    }

    /// Baut einen neuen Index aus den übergebenen Objekten.
    pub fn from_items(items: &IndexMap<ItemId, SceneItem>) -> Self {
        let item_ids: Vec<ItemId> = items.keys().copied().collect();
        let entries: Vec<[f64; 3]> = items.values().map(|item| to_point(item.position)).collect();
        let tree: KdTree<f64, 3> = (&entries).into();

        Self { tree, item_ids }
    }

    /// Gibt die Anzahl indexierter Objekte zurück.
    pub fn len(&self) -> usize {
        self.item_ids.len()
    }

    /// Gibt `true` zurück, wenn keine Objekte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }

    /// Findet das Objekt mit dem nächstgelegenen Mittelpunkt.
    pub fn nearest(&self, query: Vec3) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self.tree.nearest_one::<SquaredEuclidean>(&to_point(query));
        let item = *self.item_ids.get(result.item as usize)?;

        Some(SpatialMatch {
            item,
            distance: (result.distance as f32).sqrt(),
        })
    }

    /// Findet alle Objekte, deren Mittelpunkt innerhalb von `radius` liegt.
    /// Ergebnis ist aufsteigend nach Distanz sortiert.
    pub fn within_radius(&self, query: Vec3, radius: f32) -> Vec<SpatialMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&to_point(query), (radius as f64) * (radius as f64))
            .into_iter()
            .filter_map(|entry| {
                let item = *self.item_ids.get(entry.item as usize)?;
                Some(SpatialMatch {
                    item,
                    distance: (entry.distance as f32).sqrt(),
                })
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }
}

fn to_point(v: Vec3) -> [f64; 3] {
    [v.x as f64, v.y as f64, v.z as f64]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> IndexMap<ItemId, SceneItem> {
        let mut items = IndexMap::new();
        for (id, pos) in [
            (1, Vec3::new(0.0, 0.0, 0.0)),
            (2, Vec3::new(10.0, 0.0, 0.0)),
            (3, Vec3::new(4.0, 3.0, 0.0)),
        ] {
            items.insert(ItemId(id), SceneItem::new(ItemId(id), "probe", pos, 0.5));
        }
        items
    }

    #[test]
    fn test_nearest_returns_expected_item() {
        let index = SpatialIndex::from_items(&sample_items());
        let nearest = index
            .nearest(Vec3::new(3.9, 2.9, 0.0))
            .expect("Treffer erwartet");

        assert_eq!(nearest.item, ItemId(3));
        assert!(nearest.distance < 0.2);
    }

    #[test]
    fn test_radius_query_returns_sorted_matches() {
        let index = SpatialIndex::from_items(&sample_items());
        let matches = index.within_radius(Vec3::ZERO, 6.0);

        let ids: Vec<ItemId> = matches.into_iter().map(|m| m.item).collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(3)]);
    }

    #[test]
    fn test_empty_index_has_no_entries() {
        let index = SpatialIndex::empty();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.nearest(Vec3::ZERO).is_none());
        assert!(index.within_radius(Vec3::ZERO, 1.0).is_empty());
    }
}
