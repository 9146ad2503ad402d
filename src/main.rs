use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use kudosu::{Grid, Pos, Solver};
use std::{fs, io::Read, path::PathBuf};

#[derive(Parser, Debug)]
#[command(name = "kudosu", version, about = "Fills the empty cells of a 9x9 Sudoku grid")]
struct Cli {
    /// Path to a puzzle file (9 rows of 9 digits, 0 or . for blanks). If omitted, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Seed for the randomized branch order. Runs with the same seed pick the same solution.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Draw the solution as a framed grid, searched-in digits highlighted
    #[arg(long)]
    pretty: bool,
}

fn read_puzzle(input: &Option<PathBuf>) -> Result<String> {
    match input {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn render_framed(clues: &Grid, solved: &Grid) -> String {
    let mut s = String::new();
    for r in 0..9 {
        if r % 3 == 0 { s.push_str("+-------+-------+-------+\n"); }
        for c in 0..9 {
            if c % 3 == 0 { s.push_str("| "); }
            let p = Pos { r, c };
            let d = (b'0' + solved.get(p)) as char;
            if clues.get(p) == 0 {
                s.push_str(&format!("{} ", d.to_string().green()));
            } else {
                s.push(d);
                s.push(' ');
            }
        }
        s.push_str("|\n");
    }
    s.push_str("+-------+-------+-------+\n");
    s
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let text = read_puzzle(&cli.input)?;
    let grid = Grid::parse(&text).context("parse puzzle")?;

    let mut solver = Solver::new(cli.seed);
    let solved = solver.solve(&grid)?;

    if cli.pretty {
        print!("{}", render_framed(&grid, &solved));
    } else {
        println!("{solved}");
    }
    Ok(())
}
