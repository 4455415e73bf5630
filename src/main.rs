use toroidal_life::{
    draw::{self, App},
    proc::Field,
};

use std::io::{stdin, IsTerminal};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEMO: [&str; 8] = [
    "..........",
    ".#.....#.#",
    "..#....#..",
    "...#.####.",
    "...#...#..",
    "...###....",
    "...#...#..",
    "..#......#",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let (field, source) = if stdin().is_terminal() {
        (Field::parse(DEMO), "demo")
    } else {
        (readlines()?.parse::<Field>(), "stdin")
    };
    let field = field.map_err(|e| {
        error!(error = %e, source, "rejected pattern");
        e
    })?;

    info!(
        width = field.size().w(),
        height = field.size().h(),
        population = field.population(),
        source,
        "starting simulation"
    );
    draw::run(App::new(field))?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn readlines() -> std::io::Result<String> {
    let mut s = String::new();
    for w in stdin().lines() {
        let w = w?;
        if !w.is_empty() {
            s.push_str(&w);
            s.push('\n')
        } else if !s.is_empty() {
            break
        }
    }
    Ok(s)
}
