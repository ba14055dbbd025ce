//! Rotation with wall kicks.
//!
//! Kick data follows the Super Rotation System: for every shape class and
//! rotation transition there is an ordered list of `(dcol, drow)` offsets,
//! and the first one that gives a legal placement wins. Offsets use the
//! board's orientation (positive row is up).
//! Reference: https://tetris.wiki/SRS

use crate::pieces::{rotate_shape, Piece, ShapeClass};
use crate::types::Rotation;
use crate::types::Rotation::{East as R, North as N, South as S, West as L};

/// Candidate anchor offset `(dcol, drow)`
pub type Kick = (i8, i8);

/// Kick candidates for one rotation transition, tried in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KickRow {
    pub from: Rotation,
    pub to: Rotation,
    pub tests: [Kick; 5],
}

const fn row(from: Rotation, to: Rotation, tests: [Kick; 5]) -> KickRow {
    KickRow { from, to, tests }
}

/// J, L, S, T, Z
pub const STANDARD_KICKS: [KickRow; 8] = [
    row(N, R, [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]),
    row(R, N, [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),
    row(R, S, [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),
    row(S, R, [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]),
    row(S, L, [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),
    row(L, S, [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),
    row(L, N, [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),
    row(N, L, [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),
];

/// I
pub const I_KICKS: [KickRow; 8] = [
    row(N, R, [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]),
    row(R, N, [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]),
    row(R, S, [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]),
    row(S, R, [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]),
    row(S, L, [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]),
    row(L, S, [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]),
    row(L, N, [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]),
    row(N, L, [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]),
];

/// Kick candidates for `class` turning `from → to`.
///
/// Returns `None` for the O class and for transitions that are not a single
/// quarter turn.
pub fn kick_candidates(class: ShapeClass, from: Rotation, to: Rotation) -> Option<&'static [Kick; 5]> {
    let table: &'static [KickRow; 8] = match class {
        ShapeClass::I => &I_KICKS,
        ShapeClass::Standard => &STANDARD_KICKS,
        ShapeClass::O => return None,
    };
    table
        .iter()
        .find(|entry| entry.from == from && entry.to == to)
        .map(|entry| &entry.tests)
}

/// Try to rotate `piece` a quarter turn, resolving collisions with kicks.
///
/// `is_occupied(row, col)` must report walls and floor as occupied.
///
/// On success the piece's offsets, anchor and rotation are committed and the
/// function returns true. On failure the piece is left exactly as it was.
/// The O piece always succeeds without changing anything, including its
/// rotation state.
pub fn try_rotate(piece: &mut Piece, clockwise: bool, is_occupied: impl Fn(i8, i8) -> bool) -> bool {
    let def = piece.def();
    if def.class == ShapeClass::O {
        return true;
    }

    let from = piece.rotation;
    let to = if clockwise {
        from.rotate_cw()
    } else {
        from.rotate_ccw()
    };

    let Some(kicks) = kick_candidates(def.class, from, to) else {
        return false;
    };

    let original = piece.cells;
    piece.cells = rotate_shape(&original, def.pivot2, clockwise);

    for &(dcol, drow) in kicks.iter() {
        if piece.fits(dcol, drow, &is_occupied) {
            piece.col += dcol;
            piece.row += drow;
            piece.rotation = to;
            return true;
        }
    }

    piece.cells = original;
    false
}
