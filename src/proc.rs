use std::{fmt, str::FromStr};

use crate::error::{FieldError, Result};

/// Display symbol of a dead cell.
pub const DEAD: char = '.';
/// Display symbol of a live cell.
pub const ALIVE: char = '#';

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Rect {
    w: usize, // col
    h: usize, // row
}

impl Rect {
    #[inline]
    pub fn new(width: usize, height: usize) -> Self {
        Rect { w: width, h: height }
    }

    #[inline]
    pub fn w(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn h(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn unwrap(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// True if a `self`-sized block fits inside `other` in both directions.
    #[inline]
    pub fn fits_in(&self, other: &Rect) -> bool {
        self.w <= other.w && self.h <= other.h
    }
}

/// One generation on a toroidal board.
///
/// Rows are stored top to bottom, every row has the same length. A field is
/// never modified after construction: [`Field::tick`] builds the next
/// generation as a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    size: Rect,
    data: Vec<Vec<bool>>,
}

impl Field {
    /// Builds a field from raw cells, rejecting ragged rows.
    pub fn new(data: Vec<Vec<bool>>) -> Result<Self> {
        let size = Self::data_size(&data);

        if let Some((row, r)) = data.iter().enumerate().find(|(_, r)| r.len() != size.w()) {
            return Err(FieldError::RaggedInput {
                row,
                expected: size.w(),
                found: r.len(),
            });
        }

        Ok(Field { size, data })
    }

    /// Parses rows made of [`DEAD`] and [`ALIVE`] symbols.
    ///
    /// The result is `rows × len(first row)`. An empty sequence gives an
    /// empty field. Any other character, or a row whose length differs from
    /// the first one, is an error and no field is produced.
    pub fn parse<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut data: Vec<Vec<bool>> = vec![];

        for (i, line) in rows.into_iter().enumerate() {
            let mut r: Vec<bool> = vec![];
            for (j, ch) in line.as_ref().chars().enumerate() {
                let b = match ch {
                    DEAD => false,
                    ALIVE => true,
                    ch => return Err(FieldError::InvalidCharacter { row: i, col: j, ch }),
                };
                r.push(b);
            }
            data.push(r);
        }

        Self::new(data)
    }

    #[inline]
    pub fn size(&self) -> &Rect {
        &self.size
    }

    #[inline]
    pub fn data(&self) -> &[Vec<bool>] {
        &self.data
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<bool> {
        self.data.get(i).and_then(|r| r.get(j)).copied()
    }

    pub fn population(&self) -> usize {
        self.data.iter().flatten().filter(|c| **c).count()
    }

    /// Number of live cells among the 8 neighbours of `(i, j)`, wrapping
    /// around every edge.
    ///
    /// Each of the 8 positions is counted on its own, so on a 1-wide or
    /// 1-high field a cell can be its own neighbour several times: a single
    /// live cell on a 1×1 field has 8 neighbours.
    pub fn neighbours(&self, i: usize, j: usize) -> Result<u8> {
        self.check(i, j)?;
        Ok(self.count_neighbours(i, j))
    }

    /// State of `(i, j)` in the next generation.
    pub fn next_cell(&self, i: usize, j: usize) -> Result<bool> {
        self.check(i, j)?;
        Ok(Self::produce_value(self.data[i][j], self.count_neighbours(i, j)))
    }

    /// Computes the next generation. Every cell is evaluated against `self`
    /// only, and the dimensions never change.
    pub fn tick(&self) -> Self {
        let (w, h) = self.size.unwrap();

        let data = (0..h)
            .map(|i| {
                (0..w)
                    .map(|j| Self::produce_value(self.data[i][j], self.count_neighbours(i, j)))
                    .collect()
            })
            .collect();

        Field { size: self.size, data }
    }

    pub fn render(&self) -> Vec<String> {
        self.data
            .iter()
            .map(|r| r.iter().map(|&c| if c { ALIVE } else { DEAD }).collect())
            .collect()
    }

    fn data_size(data: &[Vec<bool>]) -> Rect {
        Rect::new(data.first().map_or(0, Vec::len), data.len())
    }

    fn check(&self, i: usize, j: usize) -> Result<()> {
        let (w, h) = self.size.unwrap();
        if i >= h || j >= w {
            return Err(FieldError::OutOfBounds { row: i, col: j, h, w });
        }
        Ok(())
    }

    // Caller guarantees (i, j) is in bounds, which also means w, h > 0.
    fn count_neighbours(&self, i: usize, j: usize) -> u8 {
        let (w, h) = self.size.unwrap();
        let up = (i + h - 1) % h;
        let down = (i + 1) % h;
        let left = (j + w - 1) % w;
        let right = (j + 1) % w;

        [
            (up, left),
            (up, j),
            (up, right),
            (i, left),
            (i, right),
            (down, left),
            (down, j),
            (down, right),
        ]
        .iter()
        .filter(|&&(r, c)| self.data[r][c])
        .count() as u8
    }

    fn produce_value(current: bool, n: u8) -> bool {
        matches!((current, n), (true, 2) | (true, 3) | (false, 3))
    }
}

impl FromStr for Field {
    type Err = FieldError;

    /// One row per line; blank lines are skipped and `\r\n` endings accepted.
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(
            s.lines()
                .map(|l| l.trim_end_matches('\r'))
                .filter(|l| !l.is_empty()),
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render().join("\n"))
    }
}
