//! Plain text patterns: `#` is alive, a newline starts the next row.

use crate::{point, Point, Set};

pub fn parse(text: &str) -> Vec<Point> {
    let mut result = vec![];
    let mut cursor = point!(0, 0);
    for c in text.chars() {
        match c {
            '#' => {
                result.push(cursor);
                cursor.x += 1
            }
            '\n' => cursor = point!(0, cursor.y + 1),
            _ => cursor.x += 1,
        }
    }
    result
}

/// draws `set` over the board, one line per row.
pub fn render(set: &Set, grid_size_x: u32, grid_size_y: u32) -> String {
    let mut result = String::new();
    for y in 0..=grid_size_y {
        for x in 0..=grid_size_x {
            result.push(if set.contains(point!(x, y)) { '#' } else { '.' });
        }
        result.push('\n');
    }
    result
}

#[test]
fn test_parse() {
    let points = parse(".#.\n..#\n###\n");
    assert_eq!(
        points,
        vec![point!(1, 0), point!(2, 1), point!(0, 2), point!(1, 2), point!(2, 2)]
    );
}

#[test]
fn test_parse_ignores_other_characters() {
    assert_eq!(parse("ab#\r\n\n  #"), vec![point!(2, 0), point!(2, 2)]);
    assert!(parse("").is_empty());
}

#[test]
fn test_render_inverts_parse() {
    let text = ".#.\n..#\n###\n";
    let set: Set = parse(text).into_iter().collect();
    assert_eq!(render(&set, 2, 2), text);
}
