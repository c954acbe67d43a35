/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u16;

/// Count type wide enough for `width * height` on any representable board.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    a as CellCount * b as CellCount
}

/// Flat cell index for `coords` on a board `width` cells wide, `y * width + x`.
pub const fn cell_index((x, y): Coord2, width: Coord) -> CellCount {
    y as CellCount * width as CellCount + x as CellCount
}

/// Inverse of [`cell_index`].
pub const fn cell_coords(index: CellCount, width: Coord) -> Coord2 {
    (
        (index % width as CellCount) as Coord,
        (index / width as CellCount) as Coord,
    )
}

pub(crate) trait GridIndex {
    fn nd(self) -> [usize; 2];
}

impl GridIndex for Coord2 {
    fn nd(self) -> [usize; 2] {
        [self.0.into(), self.1.into()]
    }
}

const OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterates the up-to-8 in-bounds neighbors of `center`, clipped at every
/// edge. The center cell itself is never yielded.
pub(crate) fn neighbors(
    (x, y): Coord2,
    (width, height): Coord2,
) -> impl Iterator<Item = Coord2> {
    OFFSETS.into_iter().filter_map(move |(dx, dy)| {
        let nx = i32::from(x) + dx;
        let ny = i32::from(y) + dy;
        let in_bounds = (0..i32::from(width)).contains(&nx) && (0..i32::from(height)).contains(&ny);
        in_bounds.then(|| (nx as Coord, ny as Coord))
    })
}
