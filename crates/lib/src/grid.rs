//! Two-dimensional views over flat slices.

#[cfg(test)]
mod tests;

use core::ops::Range;

mod sealed {
    pub trait Sealed {}
    impl<T> Sealed for [T] {}
}

use self::sealed::Sealed;

pub trait GridExt<T>: Sealed {
    /// Convert type into grid with a stride of `0`.
    ///
    /// See [GridExt::as_grid_with_stride].
    #[inline]
    fn as_grid(&self, columns: usize) -> Grid<'_, T> {
        self.as_grid_with_stride(columns, 0)
    }

    /// Convert type into a grid with the given topology.
    ///
    /// The `columns` is the width of a row while `stride` is the number of
    /// elements skipped between each row, like the newline at the end of
    /// each line of puzzle input.
    fn as_grid_with_stride(&self, columns: usize, stride: usize) -> Grid<'_, T>;
}

impl<T> GridExt<T> for [T] {
    #[inline]
    fn as_grid_with_stride(&self, columns: usize, stride: usize) -> Grid<'_, T> {
        Grid::new(self, columns, stride)
    }
}

/// An immutable grid over a slice.
///
/// The last row is allowed to be short, which happens when the input is
/// missing its final newline. Cells past the end of the data are treated as
/// missing.
#[derive(Debug, Clone, Copy)]
pub struct Grid<'a, T> {
    data: &'a [T],
    rows: usize,
    columns: usize,
    stride: usize,
}

impl<'a, T> Grid<'a, T> {
    fn new(data: &'a [T], columns: usize, stride: usize) -> Self {
        let width = columns + stride;

        let rows = if width == 0 {
            0
        } else {
            (data.len() + stride) / width
        };

        Self {
            data,
            rows,
            columns,
            stride,
        }
    }

    /// Get number of rows in the grid.
    #[inline]
    pub fn rows_len(&self) -> usize {
        self.rows
    }

    /// Get number of columns in the grid.
    #[inline]
    pub fn columns_len(&self) -> usize {
        self.columns
    }

    /// Access the specified row in the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::prelude::*;
    ///
    /// let data: &[u8] = b"123\n456\n";
    /// let grid = data.as_grid_with_stride(3, 1);
    ///
    /// assert_eq!(grid.rows_len(), 2);
    /// assert_eq!(grid.row(1), Some(&b"456"[..]));
    /// assert_eq!(grid.row(2), None);
    /// ```
    #[inline]
    pub fn row(&self, row: usize) -> Option<&'a [T]> {
        if row >= self.rows {
            return None;
        }

        let start = row * (self.columns + self.stride);
        let end = (start + self.columns).min(self.data.len());
        self.data.get(start..end)
    }

    /// Iterate over rows in the grid.
    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.rows).filter_map(move |row| self.row(row))
    }

    /// Get the element at the given row and column.
    #[inline]
    #[track_caller]
    pub fn get(&self, row: usize, column: usize) -> &'a T {
        match self.try_get(row, column) {
            Some(value) => value,
            None => panic!("missing row `{row}`, column `{column}`"),
        }
    }

    /// Get the element at the given row and column.
    #[inline]
    pub fn try_get(&self, row: usize, column: usize) -> Option<&'a T> {
        self.row(row)?.get(column)
    }

    /// Iterate over the cells surrounding the given span of columns on a row,
    /// clipped to the grid. The cells of the span itself are not included.
    ///
    /// Yields `(row, column, value)`.
    pub fn around(
        &self,
        row: usize,
        columns: Range<usize>,
    ) -> impl Iterator<Item = (usize, usize, &'a T)> + '_ {
        let rows = row.saturating_sub(1)..row.saturating_add(2).min(self.rows);
        let start = columns.start.saturating_sub(1);
        let end = columns.end.saturating_add(1).min(self.columns);

        rows.flat_map(move |y| (start..end).map(move |x| (y, x)))
            .filter(move |&(y, x)| y != row || !columns.contains(&x))
            .filter_map(move |(y, x)| Some((y, x, self.try_get(y, x)?)))
    }
}
