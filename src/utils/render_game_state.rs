//! Plain-text board renderer.
//!
//! Draws the board top rank first, for debugging and tests. White pieces are
//! uppercase, every other owner lowercase.

use crate::game_state::chess_types::{same_type, BISHOP, KING, KNIGHT, PAWN, QUEEN, ROOK};
use crate::game_state::coord::Coord;
use crate::game_state::game_state::GameState;
use crate::game_state::piece::Piece;
use crate::move_generation::piece_catalog::{
    ALFIL, CAMEL, CANNON, DABBABA, FERZ, GRASSHOPPER, JOKER, NIGHTRIDER, WAZIR, ZEBRA,
};

const EMPTY: char = '·';
const MASKED: char = '#';

const GLYPHS: [(&str, char); 16] = [
    (PAWN, 'P'),
    (KNIGHT, 'N'),
    (BISHOP, 'B'),
    (ROOK, 'R'),
    (QUEEN, 'Q'),
    (KING, 'K'),
    (CANNON, 'C'),
    (NIGHTRIDER, 'H'),
    (GRASSHOPPER, 'G'),
    (JOKER, 'J'),
    (CAMEL, 'L'),
    (ZEBRA, 'Z'),
    (FERZ, 'F'),
    (WAZIR, 'W'),
    (ALFIL, 'A'),
    (DABBABA, 'D'),
];

/// Glyph for a piece: a fixed letter for built-in types, the first letter of
/// the type name otherwise.
pub fn piece_glyph(piece: &Piece) -> char {
    let name = piece.type_name();
    let upper = GLYPHS
        .iter()
        .find(|(type_name, _)| same_type(type_name, name))
        .map(|&(_, glyph)| glyph)
        .or_else(|| name.chars().next().map(|c| c.to_ascii_uppercase()))
        .unwrap_or('?');
    if piece.owner().is_white() {
        upper
    } else {
        upper.to_ascii_lowercase()
    }
}

/// Render the board as text, file letters along the top and bottom when the
/// board is at most 26 files wide.
pub fn render_game_state(game_state: &GameState) -> String {
    let geometry = game_state.geometry();
    let (width, height) = (geometry.width(), geometry.height());
    let label_width = height.to_string().len();
    let mut out = String::new();

    let files = file_labels(width, label_width);
    if let Some(files) = &files {
        out.push_str(files);
        out.push('\n');
    }

    for y in (0..height).rev() {
        out.push_str(&format!("{:>label_width$} ", y + 1));
        for x in 0..width {
            let cell = Coord::new(x, y);
            let glyph = if !geometry.contains(cell) {
                MASKED
            } else {
                game_state.get(cell).map_or(EMPTY, piece_glyph)
            };
            out.push(glyph);
            if x + 1 < width {
                out.push(' ');
            }
        }
        out.push_str(&format!(" {}\n", y + 1));
    }

    if let Some(files) = &files {
        out.push_str(files);
    }
    out
}

fn file_labels(width: i32, label_width: usize) -> Option<String> {
    if width > 26 {
        return None;
    }
    let letters: Vec<String> = (0..width)
        .map(|x| char::from(b'a' + x as u8).to_string())
        .collect();
    Some(format!("{} {}", " ".repeat(label_width), letters.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::grid_geometry::GridGeometry;
    use crate::utils::standard_setup::{standard_setup, variant_setup};

    #[test]
    fn renders_standard_start() {
        let state = standard_setup().expect("fits");
        let rendered = render_game_state(&state);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[1], "8 r n b q k b n r 8");
        assert_eq!(lines[4], "5 · · · · · · · · 5");
        assert_eq!(lines[8], "1 R N B Q K B N R 1");
    }

    #[test]
    fn masked_cells_are_hashes() {
        let state = variant_setup().expect("fits");
        let rendered = render_game_state(&state);
        let line = rendered
            .lines()
            .find(|l| l.starts_with("4 "))
            .expect("rank 4");
        assert_eq!(line, "4 · · · · # # · · · · 4");
    }

    #[test]
    fn unknown_types_use_their_initial() {
        let mut state = GameState::new(GridGeometry::new(2, 1).expect("valid"));
        state
            .set(Coord::new(0, 0), Some(Piece::new("white", "dragon")))
            .expect("on board");
        state
            .set(Coord::new(1, 0), Some(Piece::new("red", "Elephant")))
            .expect("on board");
        assert!(render_game_state(&state).contains("1 D e 1"));
    }
}
