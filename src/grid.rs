use anyhow::{bail, Result};
use itertools::Itertools;
use once_cell::sync::Lazy;

pub type Digit = u8; // 1..=9

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos { pub r: usize, pub c: usize }

impl Pos { pub fn idx(self) -> usize { self.r * 9 + self.c } }

// The 20 peers of each cell (same row, column, or box), as flat indices.
static PEERS: Lazy<Vec<Vec<usize>>> = Lazy::new(|| (0..81).map(peer_indices).collect());

fn peer_indices(idx: usize) -> Vec<usize> {
    let (r, c) = (idx / 9, idx % 9);
    let (br, bc) = ((r / 3) * 3, (c / 3) * 3);
    let mut v = Vec::with_capacity(20);
    for i in 0..9 { if i != c { v.push(r * 9 + i); } }
    for i in 0..9 { if i != r { v.push(i * 9 + c); } }
    for (rr, cc) in (br..br + 3).cartesian_product(bc..bc + 3) {
        if rr != r || cc != c { v.push(rr * 9 + cc); }
    }
    v.sort_unstable(); v.dedup();
    v
}

pub fn peers_of(p: Pos) -> &'static [usize] { &PEERS[p.idx()] }

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    // 0 = empty; 1..=9 digits
    pub(crate) cells: [Digit; 81],
    // candidate bitset per cell; bit d means digit d (1..=9) still legal,
    // 0 marks a settled cell. For every empty cell the mask is exactly
    // {1..9} minus the digits among its 20 peers.
    pub(crate) cands: [u16; 81],
}

impl Grid {
    pub fn empty() -> Self { Self { cells: [0; 81], cands: [all_candidates(); 81] } }

    /// Reads a puzzle out of arbitrary text: `1`-`9` are clues, `0` and `.`
    /// are blanks, everything else (newlines, spaces, frames) is skipped.
    /// Exactly 81 puzzle characters must remain, so both the 9-line form and
    /// the 81-char compact form parse. Clues that contradict each other are
    /// taken as given; reporting those is the solver's job.
    pub fn parse(text: &str) -> Result<Self> {
        let digits: Vec<Digit> = text
            .chars()
            .filter_map(|ch| match ch {
                '1'..='9' => Some(ch as u8 - b'0'),
                '0' | '.' => Some(0),
                _ => None,
            })
            .collect();
        if digits.len() != 81 { bail!("expected 81 puzzle characters, got {}", digits.len()) }
        let mut g = Grid::empty();
        for (i, &d) in digits.iter().enumerate() {
            if d != 0 { g.settle(i, d); }
        }
        Ok(g)
    }

    pub fn get(&self, p: Pos) -> Digit { self.cells[p.idx()] }
    pub fn candidates(&self, p: Pos) -> u16 { self.cands[p.idx()] }
    pub fn is_solved(&self) -> bool { self.cells.iter().all(|&d| d != 0) }

    /// Guarded placement: the digit must still be a candidate of the cell.
    pub fn set(&mut self, p: Pos, d: Digit) -> Result<()> {
        let idx = p.idx();
        if d < 1 || d > 9 { bail!("digit {d} out of range") }
        if self.cells[idx] == d { return Ok(()); }
        if self.cells[idx] != 0 { bail!("cell r{},c{} already holds {}", p.r + 1, p.c + 1, self.cells[idx]) }
        if self.cands[idx] & (1 << d) == 0 { bail!("digit {d} is not a candidate at r{},c{}", p.r + 1, p.c + 1) }
        self.settle(idx, d);
        Ok(())
    }

    // Write d into the cell and propagate: the cell's own mask drops to the
    // settled sentinel, and d is cleared from every peer mask. Peers that are
    // settled (mask 0) or never had d are untouched.
    pub(crate) fn settle(&mut self, idx: usize, d: Digit) {
        self.cells[idx] = d;
        self.cands[idx] = 0;
        for &q in &PEERS[idx] {
            self.cands[q] &= !(1 << d);
        }
    }

    /// True when no row, column, or box holds the same digit twice; empty
    /// cells are ignored. On a partial grid this says the clues are mutually
    /// consistent, on a full grid it says the fill is a valid Sudoku.
    pub fn is_valid(&self) -> bool {
        let rows = (0..9).all(|r| no_dupes((0..9).map(|c| self.cells[r * 9 + c])));
        let cols = (0..9).all(|c| no_dupes((0..9).map(|r| self.cells[r * 9 + c])));
        let boxes = (0..3).cartesian_product(0..3).all(|(br, bc)| {
            no_dupes(
                (br * 3..br * 3 + 3)
                    .cartesian_product(bc * 3..bc * 3 + 3)
                    .map(|(r, c)| self.cells[r * 9 + c]),
            )
        });
        rows && cols && boxes
    }

    pub fn to_compact(&self) -> String {
        self.cells.iter().map(|&d| if d == 0 { '.' } else { (b'0' + d) as char }).collect()
    }
}

// Nine lines, each row's nine digits concatenated, empty cells as 0.
impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..9 {
            if r != 0 { writeln!(f)?; }
            for c in 0..9 {
                write!(f, "{}", self.cells[r * 9 + c])?;
            }
        }
        Ok(())
    }
}

// A grid travels as its compact form; candidate masks are rebuilt on the
// way back in, so the two representations never drift apart.
#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_compact())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text: String = serde::Deserialize::deserialize(d)?;
        Grid::parse(&text).map_err(serde::de::Error::custom)
    }
}

fn no_dupes(unit: impl Iterator<Item = Digit>) -> bool {
    unit.filter(|&d| d != 0).all_unique()
}

pub fn bitcount(mask: u16) -> u32 { mask.count_ones() }

/// Digits named by a candidate mask, ascending.
pub fn mask_digits(mask: u16) -> Vec<Digit> {
    (1..=9).filter(|&d| mask & (1 << d) != 0).collect()
}

#[inline]
pub const fn all_candidates() -> u16 { 0b11_1111_1110 } // bits 1..=9 set (1022)
