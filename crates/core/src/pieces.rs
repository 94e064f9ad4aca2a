//! Pieces module - tetromino layouts for every rotation state
//!
//! Each kind has a fixed table of rotation layouts. A layout is four cell
//! offsets from the piece anchor, the top-left corner of a 4x4 box shared by
//! every rotation of that kind. Rotating only switches tables; the anchor stays
//! put. There are no wall kicks.
//!
//! Layouts are written as 4-bit row masks (`0b1000` is the leftmost column) and
//! decoded at compile time.

use crate::types::PieceKind;

/// Offset of a single mino relative to the piece anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the anchor
pub type PieceShape = [MinoOffset; 4];

/// Decode four row masks into mino offsets, row by row, left to right
const fn decode(rows: [u8; 4]) -> PieceShape {
    let mut out = [(0i8, 0i8); 4];
    let mut count = 0;
    let mut y = 0;
    while y < 4 {
        let mut x = 0;
        while x < 4 {
            if rows[y] & (0b1000 >> x) != 0 {
                assert!(count < 4, "layout has more than four cells");
                out[count] = (x as i8, y as i8);
                count += 1;
            }
            x += 1;
        }
        y += 1;
    }
    assert!(count == 4, "layout has fewer than four cells");
    out
}

const I_STATES: [PieceShape; 2] = [
    decode([0b0000, 0b1111, 0b0000, 0b0000]),
    decode([0b0010, 0b0010, 0b0010, 0b0010]),
];

const O_STATES: [PieceShape; 1] = [decode([0b0110, 0b0110, 0b0000, 0b0000])];

const T_STATES: [PieceShape; 4] = [
    decode([0b0100, 0b1110, 0b0000, 0b0000]),
    decode([0b0100, 0b0110, 0b0100, 0b0000]),
    decode([0b0000, 0b1110, 0b0100, 0b0000]),
    decode([0b0100, 0b1100, 0b0100, 0b0000]),
];

const S_STATES: [PieceShape; 2] = [
    decode([0b0110, 0b1100, 0b0000, 0b0000]),
    decode([0b0100, 0b0110, 0b0010, 0b0000]),
];

const Z_STATES: [PieceShape; 2] = [
    decode([0b1100, 0b0110, 0b0000, 0b0000]),
    decode([0b0010, 0b0110, 0b0100, 0b0000]),
];

const J_STATES: [PieceShape; 4] = [
    decode([0b1000, 0b1110, 0b0000, 0b0000]),
    decode([0b0110, 0b0100, 0b0100, 0b0000]),
    decode([0b0000, 0b1110, 0b0010, 0b0000]),
    decode([0b0100, 0b0100, 0b1100, 0b0000]),
];

const L_STATES: [PieceShape; 4] = [
    decode([0b0010, 0b1110, 0b0000, 0b0000]),
    decode([0b0100, 0b0100, 0b0110, 0b0000]),
    decode([0b0000, 0b1110, 0b1000, 0b0000]),
    decode([0b1100, 0b0100, 0b0100, 0b0000]),
];

/// All rotation layouts of a kind, indexed by rotation state
pub fn layouts(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
    }
}

/// Get the shape for a kind and rotation index
///
/// The index wraps modulo the kind's state count, so callers can add rotation
/// steps without normalizing first.
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    let states = layouts(kind);
    states[rotation as usize % states.len()]
}

/// Rotation index after `steps` clockwise rotations
pub fn rotate_index(kind: PieceKind, rotation: u8, steps: i8) -> u8 {
    let count = kind.rotation_states() as i16;
    (rotation as i16 + steps as i16).rem_euclid(count) as u8
}

/// Layout a new piece spawns with
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, 0)
}
