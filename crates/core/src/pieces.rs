//! Pieces module - shape catalog and the falling piece
//!
//! Each shape is described by its spawn layout inside a small local box, the
//! pivot it turns about, and where that box sits on the board at spawn.
//! Local offsets are `(col, row)` with row growing upward, like the board.
//!
//! Pivots are stored doubled so that the half-cell centre of the I box stays
//! an integer: `(2, 2)` is the middle cell of a 3x3 box, `(3, 3)` the centre
//! of a 4x4 box.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the piece anchor, `(col, row)`
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the anchor
pub type PieceShape = [MinoOffset; 4];

/// Which kick table a shape uses, and whether it turns at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeClass {
    /// The I bar, with its own kick table
    I,
    /// J, L, S, T and Z
    Standard,
    /// The O square, which never turns
    O,
}

/// Static description of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDef {
    pub kind: PieceKind,
    pub class: ShapeClass,
    /// Spawn orientation offsets
    pub cells: PieceShape,
    /// Doubled pivot coordinate, `(col * 2, row * 2)`
    pub pivot2: (i8, i8),
    /// Anchor `(col, row)` at spawn
    pub spawn: (i8, i8),
}

const I_DEF: PieceDef = PieceDef {
    kind: PieceKind::I,
    class: ShapeClass::I,
    cells: [(0, 2), (1, 2), (2, 2), (3, 2)],
    pivot2: (3, 3),
    spawn: (3, 16),
};

const J_DEF: PieceDef = PieceDef {
    kind: PieceKind::J,
    class: ShapeClass::Standard,
    cells: [(0, 2), (0, 1), (1, 1), (2, 1)],
    pivot2: (2, 2),
    spawn: (3, 17),
};

const L_DEF: PieceDef = PieceDef {
    kind: PieceKind::L,
    class: ShapeClass::Standard,
    cells: [(2, 2), (0, 1), (1, 1), (2, 1)],
    pivot2: (2, 2),
    spawn: (3, 17),
};

const O_DEF: PieceDef = PieceDef {
    kind: PieceKind::O,
    class: ShapeClass::O,
    cells: [(0, 0), (1, 0), (0, 1), (1, 1)],
    pivot2: (1, 1),
    spawn: (4, 18),
};

const S_DEF: PieceDef = PieceDef {
    kind: PieceKind::S,
    class: ShapeClass::Standard,
    cells: [(0, 1), (1, 1), (1, 2), (2, 2)],
    pivot2: (2, 2),
    spawn: (3, 17),
};

const T_DEF: PieceDef = PieceDef {
    kind: PieceKind::T,
    class: ShapeClass::Standard,
    cells: [(0, 1), (1, 1), (2, 1), (1, 2)],
    pivot2: (2, 2),
    spawn: (3, 17),
};

const Z_DEF: PieceDef = PieceDef {
    kind: PieceKind::Z,
    class: ShapeClass::Standard,
    cells: [(0, 2), (1, 2), (1, 1), (2, 1)],
    pivot2: (2, 2),
    spawn: (3, 17),
};

/// Look up the static definition of a shape
pub fn piece_def(kind: PieceKind) -> &'static PieceDef {
    match kind {
        PieceKind::I => &I_DEF,
        PieceKind::J => &J_DEF,
        PieceKind::L => &L_DEF,
        PieceKind::O => &O_DEF,
        PieceKind::S => &S_DEF,
        PieceKind::T => &T_DEF,
        PieceKind::Z => &Z_DEF,
    }
}

/// Spawn anchor `(col, row)` for a shape
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    piece_def(kind).spawn
}

/// Spawn orientation offsets for a shape
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    piece_def(kind).cells
}

/// Turn a single offset a quarter turn about a doubled pivot.
///
/// With row growing upward, clockwise maps `(x, y)` to `(y, -x)` relative
/// to the pivot.
#[inline]
pub fn rotate_offset(offset: MinoOffset, pivot2: (i8, i8), clockwise: bool) -> MinoOffset {
    let (px, py) = pivot2;
    let rx = offset.0 * 2 - px;
    let ry = offset.1 * 2 - py;
    let (nx, ny) = if clockwise { (ry, -rx) } else { (-ry, rx) };
    ((nx + px) / 2, (ny + py) / 2)
}

/// Turn a whole shape a quarter turn about a doubled pivot
pub fn rotate_shape(shape: &PieceShape, pivot2: (i8, i8), clockwise: bool) -> PieceShape {
    shape.map(|offset| rotate_offset(offset, pivot2, clockwise))
}

/// Offsets of `kind` in the given orientation, derived from the spawn layout
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let def = piece_def(kind);
    if def.class == ShapeClass::O {
        return def.cells;
    }
    let mut shape = def.cells;
    for _ in 0..rotation.index() {
        shape = rotate_shape(&shape, def.pivot2, true);
    }
    shape
}

/// A falling piece instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Anchor column
    pub col: i8,
    /// Anchor row (row 0 is the bottom)
    pub row: i8,
    pub rotation: Rotation,
    /// Current offsets relative to the anchor
    pub cells: PieceShape,
}

impl Piece {
    /// Create a piece in spawn orientation at its spawn anchor
    pub fn spawn(kind: PieceKind) -> Self {
        let def = piece_def(kind);
        Self {
            kind,
            col: def.spawn.0,
            row: def.spawn.1,
            rotation: Rotation::North,
            cells: def.cells,
        }
    }

    pub fn def(&self) -> &'static PieceDef {
        piece_def(self.kind)
    }

    /// Absolute `(row, col)` board positions of the four minos
    pub fn positions(&self) -> [(i8, i8); 4] {
        self.positions_at(0, 0)
    }

    /// Positions after shifting the anchor by `(dcol, drow)`
    pub fn positions_at(&self, dcol: i8, drow: i8) -> [(i8, i8); 4] {
        self.cells
            .map(|(x, y)| (self.row + drow + y, self.col + dcol + x))
    }

    /// True when every mino, shifted by `(dcol, drow)`, lands on a free cell
    pub fn fits(&self, dcol: i8, drow: i8, is_occupied: impl Fn(i8, i8) -> bool) -> bool {
        self.positions_at(dcol, drow)
            .iter()
            .all(|&(row, col)| !is_occupied(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_cells_are_inside_the_top_of_the_board() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind);
            for (row, col) in piece.positions() {
                assert!((0..10).contains(&col), "{kind:?} col {col}");
                assert!((17..20).contains(&row), "{kind:?} row {row}");
            }
        }
    }

    #[test]
    fn t_turns_clockwise_to_point_right() {
        let east = get_shape(PieceKind::T, Rotation::East);
        assert_eq!(east, [(1, 2), (1, 1), (1, 0), (2, 1)]);
    }

    #[test]
    fn i_turns_about_box_centre() {
        let east = get_shape(PieceKind::I, Rotation::East);
        assert_eq!(east, [(2, 3), (2, 2), (2, 1), (2, 0)]);
        let west = get_shape(PieceKind::I, Rotation::West);
        assert_eq!(west, [(1, 0), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn quarter_turns_cancel() {
        for kind in PieceKind::ALL {
            let def = piece_def(kind);
            let cw = rotate_shape(&def.cells, def.pivot2, true);
            assert_eq!(rotate_shape(&cw, def.pivot2, false), def.cells);
        }
    }

    #[test]
    fn o_shape_ignores_rotation() {
        for i in 0..4 {
            assert_eq!(
                get_shape(PieceKind::O, Rotation::from_index(i)),
                get_spawn_shape(PieceKind::O)
            );
        }
    }
}
