use itertools::Itertools;
use std::str::FromStr;

/// Number of steps in the dihedral walk produced by [`Grid::orientations`].
pub const ORIENTATION_STEPS: usize = 8;
/// Step at which the walk reflects once before continuing to rotate.
pub const REFLECT_STEP: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    g: Vec<T>,
}
pub type GridPos = (usize, usize);

pub struct GridPosIter<'a, T> {
    grid: &'a Grid<T>,
    next_index: Option<usize>,
}

/// Lazily walks the 8 orientations of a grid and leaves the source grid untouched.
///
/// Step `i` reflects left-right when `i == REFLECT_STEP` and then rotates one
/// quarter turn anticlockwise, so every yielded grid is the cumulative result
/// of all the steps before it.
pub struct GridOrientationsIter<T> {
    current: Grid<T>,
    next_step: Option<usize>,
}

impl<T> std::ops::Index<GridPos> for Grid<T> {
    type Output = T;
    fn index(&self, index: GridPos) -> &Self::Output {
        let i = self.cols * index.0 + index.1;
        &self.g[i]
    }
}

impl<T> std::ops::IndexMut<GridPos> for Grid<T> {
    fn index_mut(&mut self, index: GridPos) -> &mut Self::Output {
        let i = self.cols * index.0 + index.1;
        &mut self.g[i]
    }
}

impl<T> FromStr for Grid<T>
where
    T: FromStr,
    anyhow::Error: From<T::Err>,
{
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Only line breaks are trimmed, leading spaces can be pixels.
        let s = s.trim_matches(|c| c == '\n' || c == '\r');
        let cols = s
            .lines()
            .next()
            .map(|l| l.chars().count())
            .ok_or_else(|| anyhow::anyhow!("Row has no tiles"))?;
        if let Some(bad_row) = s.lines().position(|l| l.chars().count() != cols) {
            anyhow::bail!("Row {} is not {} characters wide", bad_row, cols);
        }
        let g = s
            .lines()
            .flat_map(|l| l.chars().map(|c| c.to_string().parse::<T>()))
            .try_collect()?;
        let rows = s.lines().count();
        Ok(Grid { rows, cols, g })
    }
}

impl<T> std::fmt::Display for Grid<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                write!(f, "{}", self[(r, c)])?;
            }
            if r != self.rows - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl<'a, T> std::iter::Iterator for GridPosIter<'_, T> {
    type Item = GridPos;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_index
            .and_then(|i| if i < self.grid.g.len() { Some(i) } else { None })
            .map(|i| {
                let current_index = i;
                self.next_index = Some(i + 1);
                let r = current_index / self.grid.cols;
                let c = current_index % self.grid.cols;
                (r, c)
            })
    }
}

impl<T: Clone> std::iter::Iterator for GridOrientationsIter<T> {
    type Item = (Grid<T>, usize);
    fn next(&mut self) -> Option<Self::Item> {
        self.next_step
            .and_then(|i| if i < ORIENTATION_STEPS { Some(i) } else { None })
            .map(|i| {
                if i == REFLECT_STEP {
                    self.current.reflect_horizontal();
                }
                self.current.rotate_ccw();
                self.next_step = Some(i + 1);
                (self.current.clone(), i)
            })
    }
}

impl<T> Grid<T> {
    pub fn new(rows: usize, cols: usize, g: Vec<T>) -> Self {
        debug_assert_eq!(rows * cols, g.len());
        Grid { rows, cols, g }
    }

    pub fn filled(rows: usize, cols: usize, value: T) -> Self
    where
        T: Clone,
    {
        Grid::new(rows, cols, vec![value; rows * cols])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn pos_iter(&self) -> GridPosIter<T> {
        GridPosIter {
            grid: self,
            next_index: Some(0),
        }
    }

    pub fn get(&self, pos: GridPos) -> Option<&T> {
        let r = pos.0;
        let c = pos.1;
        if r >= self.rows || c >= self.cols {
            return None;
        };
        Some(&self[pos])
    }

    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut T> {
        let r = pos.0;
        let c = pos.1;
        if r >= self.rows || c >= self.cols {
            return None;
        };
        Some(&mut self[pos])
    }

    pub fn row(&self, r: usize) -> Vec<T>
    where
        T: Clone,
    {
        (0..self.cols).map(|c| self[(r, c)].clone()).collect_vec()
    }

    pub fn col(&self, c: usize) -> Vec<T>
    where
        T: Clone,
    {
        (0..self.rows).map(|r| self[(r, c)].clone()).collect_vec()
    }

    pub fn count(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.g.iter().filter(|v| *v == value).count()
    }

    /*
    1 2 3      3 6 9
    4 5 6  ->  2 5 8
    7 8 9      1 4 7
    */
    /// Rotates a quarter turn anticlockwise.
    pub fn rotate_ccw(&mut self)
    where
        T: Clone,
    {
        let g = (0..self.cols)
            .cartesian_product(0..self.rows)
            .map(|(r, c)| self[(c, self.cols - 1 - r)].clone())
            .collect_vec();
        std::mem::swap(&mut self.rows, &mut self.cols);
        self.g = g;
    }

    pub fn rotate(&mut self, quarter_turns: usize)
    where
        T: Clone,
    {
        for _ in 0..quarter_turns % 4 {
            self.rotate_ccw()
        }
    }

    /// Mirrors across the horizontal axis: the first row becomes the last.
    pub fn reflect_vertical(&mut self) {
        for r in 0..(self.rows / 2) {
            for c in 0..self.cols {
                let src = self.cols * r + c;
                let tgt = self.cols * (self.rows - 1 - r) + c;
                self.g.swap(src, tgt);
            }
        }
    }

    /// Mirrors across the vertical axis: the first column becomes the last.
    pub fn reflect_horizontal(&mut self) {
        for r in 0..self.rows {
            for c in 0..(self.cols / 2) {
                let src = self.cols * r + c;
                let tgt = self.cols * r + (self.cols - 1 - c);
                self.g.swap(src, tgt);
            }
        }
    }

    pub fn orientations(&self) -> GridOrientationsIter<T>
    where
        T: Clone,
    {
        GridOrientationsIter {
            current: self.clone(),
            next_step: Some(0),
        }
    }

    /// Copies a `size` block starting at `src_origin` in `src` to `dst_origin` in `self`.
    ///
    /// Panics if either block reaches outside its grid.
    pub fn copy_block_from(
        &mut self,
        src: &Grid<T>,
        src_origin: GridPos,
        size: (usize, usize),
        dst_origin: GridPos,
    ) where
        T: Clone,
    {
        (0..size.0).cartesian_product(0..size.1).for_each(|(r, c)| {
            self[(dst_origin.0 + r, dst_origin.1 + c)] =
                src[(src_origin.0 + r, src_origin.1 + c)].clone();
        });
    }
}
