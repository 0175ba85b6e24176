//! Free-space catalog with guillotine splitting.
//!
//! Free space is kept as three lists of cuboids keyed by the split that
//! produced them. A search scans the Right list, then Top, then Front, and
//! accepts the first cuboid that admits any orientation of the product.
//! Searching never mutates the catalog; the accepted hit is applied
//! afterwards with [`FreeSpaceCatalog::commit`].

use crate::rotation::distinct_orientations;
use crate::structs::{
    Dimensions, FreeSpaceCuboid, Orientation, Position, Product, Provenance, Vehicle,
};

impl FreeSpaceCuboid {
    pub fn new(origin: Position, extents: Dimensions, provenance: Provenance) -> Self {
        Self {
            origin,
            extents,
            provenance,
        }
    }

    /// Whether a box of `dims` fits inside this cuboid. Cuboids with a
    /// non-positive extent never admit anything.
    pub fn admits(&self, dims: &Dimensions) -> bool {
        dims.length <= self.extents.length
            && dims.breadth <= self.extents.breadth
            && dims.height <= self.extents.height
    }

    pub fn volume(&self) -> f64 {
        self.extents.volume()
    }

    /// Three-way guillotine split around a box of `placed` size at the origin.
    /// Returns the Top, Front and Right children.
    pub fn split(&self, placed: &Dimensions) -> [FreeSpaceCuboid; 3] {
        let Position { x, y, z } = self.origin;
        let s = self.extents;
        [
            FreeSpaceCuboid::new(
                Position::new(x, y, z + placed.height),
                Dimensions::new(placed.length, placed.breadth, s.height - placed.height),
                Provenance::Top,
            ),
            FreeSpaceCuboid::new(
                Position::new(x, y + placed.breadth, z),
                Dimensions::new(placed.length, s.breadth - placed.breadth, s.height),
                Provenance::Front,
            ),
            FreeSpaceCuboid::new(
                Position::new(x + placed.length, y, z),
                Dimensions::new(s.length - placed.length, s.breadth, s.height),
                Provenance::Right,
            ),
        ]
    }
}

/// Location of an accepted (cuboid, orientation) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogHit {
    pub provenance: Provenance,
    pub index: usize,
    pub cuboid: FreeSpaceCuboid,
    pub orientation: Orientation,
}

#[derive(Debug, Clone)]
pub struct FreeSpaceCatalog {
    lists: [Vec<FreeSpaceCuboid>; 3],
}

impl FreeSpaceCatalog {
    /// A catalog holding one cuboid spanning the whole vehicle, in Right.
    pub fn new(vehicle: &Vehicle) -> Self {
        let root = FreeSpaceCuboid::new(
            Position::default(),
            vehicle.dimensions(),
            Provenance::Right,
        );
        Self {
            lists: [vec![root], Vec::new(), Vec::new()],
        }
    }

    pub fn list(&self, provenance: Provenance) -> &[FreeSpaceCuboid] {
        &self.lists[provenance.index()]
    }

    pub fn len(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cuboids in search order.
    pub fn iter(&self) -> impl Iterator<Item = &FreeSpaceCuboid> + '_ {
        Provenance::SEARCH_ORDER
            .into_iter()
            .flat_map(move |p| self.list(p).iter())
    }

    /// First-fit search over every list and every distinct orientation.
    pub fn find(&self, product: &Product) -> Option<CatalogHit> {
        let orientations = distinct_orientations(product.padded());
        for provenance in Provenance::SEARCH_ORDER {
            for (index, cuboid) in self.list(provenance).iter().enumerate() {
                if let Some(orientation) = orientations.iter().find(|o| cuboid.admits(&o.dims)) {
                    return Some(CatalogHit {
                        provenance,
                        index,
                        cuboid: *cuboid,
                        orientation: *orientation,
                    });
                }
            }
        }
        None
    }

    /// Removes the hit cuboid and appends its Top, Front and Right children
    /// to their lists. Returns the removed cuboid.
    pub fn commit(&mut self, hit: &CatalogHit) -> FreeSpaceCuboid {
        let consumed = self.lists[hit.provenance.index()].remove(hit.index);
        debug_assert_eq!(consumed, hit.cuboid);
        for child in consumed.split(&hit.orientation.dims) {
            self.lists[child.provenance.index()].push(child);
        }
        consumed
    }
}
