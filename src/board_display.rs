use std::fmt::{self, Display, Formatter};

use trenchess::{board::Board, color::Color, coord::Coord, piece::ColoredPieceKind};

const WHITE: &str = "\x1b[30;107m";
const BLACK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

/// Board drawing with one figurine and one modifier glyph per square, and
/// `info` lines printed beside it.
pub struct BoardDisplay<'a, 'b> {
    pub board: &'a Board,
    pub view: Color,
    pub highlighted: &'b [Coord],
    pub info: &'b str,
}
impl Display for BoardDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for row in 0..8 {
            let y = match self.view {
                Color::White => 7 - row,
                Color::Black => row,
            };
            for column in 0..8 {
                let x = match self.view {
                    Color::White => column,
                    Color::Black => 7 - column,
                };
                let position = Coord::new(x, y);
                let color = if self.highlighted.contains(&position) {
                    HIGHLIGHTED
                } else {
                    match position.color() {
                        Color::White => WHITE,
                        Color::Black => BLACK,
                    }
                };
                let square = self.board[position];
                let figurine = match square.en_passant() {
                    Some(_) => '·',
                    None => square.piece().map_or(' ', ColoredPieceKind::figurine),
                };
                let glyph = square.glyph().unwrap_or(' ');
                write!(f, "{color}{figurine}{glyph}{RESET}")?;
            }
            write!(f, "{}", y + 1)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
