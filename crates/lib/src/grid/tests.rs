use super::GridExt;

const DATA: &[u8] = b"467..\n...*.\n..35.\n";

#[test]
fn test_dimensions() {
    let grid = DATA.as_grid_with_stride(5, 1);
    assert_eq!(grid.rows_len(), 3);
    assert_eq!(grid.columns_len(), 5);
    assert_eq!(*grid.get(1, 3), b'*');
    assert_eq!(grid.try_get(3, 0), None);
    assert_eq!(grid.try_get(0, 5), None);
}

#[test]
fn test_missing_trailing_newline() {
    let data: &[u8] = b"467..\n...*.";
    let grid = data.as_grid_with_stride(5, 1);
    assert_eq!(grid.rows_len(), 2);
    assert_eq!(grid.row(1), Some(&b"...*."[..]));
}

#[test]
fn test_rows() {
    let values = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
    let grid = values.as_grid(4);
    assert!(grid.rows().flatten().copied().eq(1..=12));
    assert_eq!(grid.row(2), Some(&[9, 10, 11, 12][..]));
}

#[test]
fn test_around_clips_to_grid() {
    let grid = DATA.as_grid_with_stride(5, 1);

    let cells = grid
        .around(0, 0..3)
        .map(|(y, x, _)| (y, x))
        .collect::<Vec<_>>();

    assert_eq!(cells, [(0, 3), (1, 0), (1, 1), (1, 2), (1, 3)]);

    let symbols = grid
        .around(2, 2..4)
        .filter(|(_, _, c)| **c == b'*')
        .map(|(y, x, _)| (y, x))
        .collect::<Vec<_>>();

    assert_eq!(symbols, [(1, 3)]);
}

#[test]
fn test_around_interior() {
    let data: &[u8] = b"abc\ndef\nghi\n";
    let grid = data.as_grid_with_stride(3, 1);
    let cells = grid.around(1, 1..2).map(|(_, _, c)| *c).collect::<Vec<_>>();
    assert_eq!(cells, b"abcdfghi");
}
