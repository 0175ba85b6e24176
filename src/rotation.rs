use crate::structs::{Dimensions, Orientation};

///---------------------orientation constant -------------------
/// Axis assignments in lexicographic order. This is also the order in which
/// orientations are tried during placement.
pub const ORIENTS: [(usize, usize, usize); 6] = [
    (0, 1, 2),
    (0, 2, 1),
    (1, 0, 2),
    (1, 2, 0),
    (2, 0, 1),
    (2, 1, 0),
];

/// Returns the distinct orientations of `dims`, keeping the first axis
/// assignment that produces each distinct size.
pub fn distinct_orientations(dims: Dimensions) -> Vec<Orientation> {
    let d = dims.as_array();
    let mut out: Vec<Orientation> = Vec::with_capacity(ORIENTS.len());
    for &(a, b, c) in ORIENTS.iter() {
        let oriented = Dimensions::new(d[a], d[b], d[c]);
        if out.iter().any(|o| o.dims == oriented) {
            continue;
        }
        out.push(Orientation {
            axes: (a, b, c),
            dims: oriented,
        });
    }
    out
}
