/// Single coordinate axis used for board width, height, and positions.
///
/// Signed so that the neighbors of edge cells can be named and resolved to the
/// invalid sentinel instead of being special-cased.
pub type Coord = i32;

/// Count type used for mine counts, flag counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Row-major index into a `(height, width)` array. Only meaningful for in-bounds coordinates.
    fn to_nd_index(self) -> Self::Output {
        [self.1 as usize, self.0 as usize]
    }
}

/// Number of cells on a `a × b` board, `None` when a side is negative or the product overflows.
pub fn mult(a: Coord, b: Coord) -> Option<CellCount> {
    let a = CellCount::try_from(a).ok()?;
    let b = CellCount::try_from(b).ok()?;
    a.checked_mul(b)
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn apply_delta((x, y): Coord2, (dx, dy): (Coord, Coord)) -> Option<Coord2> {
    Some((x.checked_add(dx)?, y.checked_add(dy)?))
}

/// Iterates over the eight coordinates surrounding `center`.
///
/// No bounds are applied here: coordinates off the board are yielded as-is and
/// resolve to [`CellKind::Invalid`](crate::CellKind::Invalid) through
/// [`Board::get`](crate::Board::get).
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    index: u8,
}

impl NeighborIter {
    pub const fn new(center: Coord2) -> Self {
        Self { center, index: 0 }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta) {
                return Some(next_item);
            }
        }
    }
}
