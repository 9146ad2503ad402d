use kudosu::{grid, Grid, Pos, Solver};
use pretty_assertions::assert_eq;

const EASY: &str = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

#[test]
fn parse_compact_and_round_trip() {
    let g = Grid::parse(EASY).unwrap();
    assert_eq!(g.to_compact(), EASY);
}

#[test]
fn parse_nine_line_form() {
    let lines = "530070000\n600195000\n098000060\n800060003\n400803001\n700020006\n060000280\n000419005\n000080079\n";
    let g = Grid::parse(lines).unwrap();
    assert_eq!(g.to_compact(), EASY);
}

#[test]
fn parse_rejects_wrong_length() {
    assert!(Grid::parse("123").is_err());
    assert!(Grid::parse(&"5".repeat(82)).is_err());
    assert!(Grid::parse("").is_err());
}

#[test]
fn display_is_nine_rows_of_digits() {
    let g = Grid::parse(EASY).unwrap();
    let text = g.to_string();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0], "530070000");
    assert_eq!(rows[8], "000080079");
    assert!(rows.iter().all(|row| row.len() == 9));
}

#[test]
fn set_enforces_grid_constraints() {
    let mut g = Grid::empty();
    g.set(Pos { r: 0, c: 0 }, 5).unwrap();
    // same digit again is fine, another digit in an occupied cell is not
    assert!(g.set(Pos { r: 0, c: 0 }, 5).is_ok());
    assert!(g.set(Pos { r: 0, c: 0 }, 6).is_err());
    // the 5 was eliminated along its row, column and box
    assert!(g.set(Pos { r: 0, c: 8 }, 5).is_err());
    assert!(g.set(Pos { r: 8, c: 0 }, 5).is_err());
    assert!(g.set(Pos { r: 2, c: 2 }, 5).is_err());
    // digits outside 1..=9 are rejected outright
    assert!(g.set(Pos { r: 1, c: 1 }, 0).is_err());
    assert!(g.set(Pos { r: 1, c: 1 }, 10).is_err());
}

#[test]
fn peers_and_candidates_track_placements() {
    let mut g = Grid::empty();
    assert_eq!(grid::peers_of(Pos { r: 4, c: 4 }).len(), 20);
    assert_eq!(g.candidates(Pos { r: 4, c: 4 }), grid::all_candidates());
    g.set(Pos { r: 4, c: 0 }, 7).unwrap();
    // the row peer lost 7, a cell sharing no unit kept it
    assert_eq!(g.candidates(Pos { r: 4, c: 4 }) & (1 << 7), 0);
    assert_ne!(g.candidates(Pos { r: 5, c: 4 }) & (1 << 7), 0);
    // the settled cell itself no longer carries candidates
    assert_eq!(g.candidates(Pos { r: 4, c: 0 }), 0);
}

#[test]
fn every_cell_has_twenty_peers() {
    for r in 0..9 {
        for c in 0..9 {
            assert_eq!(grid::peers_of(Pos { r, c }).len(), 20, "cell r{r},c{c}");
        }
    }
}

#[test]
fn solve_easy_puzzle() {
    let g = Grid::parse(EASY).unwrap();
    let mut solver = Solver::new(Some(1));
    let solved = solver.solve(&g).unwrap();
    assert!(solved.is_solved());
    assert!(solved.is_valid());
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() {
    let g = Grid::parse(EASY).unwrap();
    let json = serde_json::to_string(&g).unwrap();
    let back: Grid = serde_json::from_str(&json).unwrap();
    assert_eq!(g, back);
}
