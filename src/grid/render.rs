use std::fmt::{self, Display, Write};

use super::{Cell, Grid};
use crate::rrt::Node;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

impl Grid {
    /// Legend followed by one line per row. With `color`, obstacles are red,
    /// tree cells blue and path cells green.
    pub fn render(&self, color: bool) -> String {
        Colored { grid: self, color }.to_string()
    }

    fn write_to(&self, out: &mut impl Write, color: bool) -> fmt::Result {
        writeln!(out, "Grid: ")?;
        writeln!(out, "1. Points not considered ---> 0")?;
        writeln!(out, "2. Obstacles             ---> 1")?;
        writeln!(out, "3. Points considered     ---> 2")?;
        writeln!(out, "4. Points in final path  ---> 3")?;
        let rule = "---".repeat(self.size);
        writeln!(out, "{rule}")?;
        for row in self.cells.chunks(self.size) {
            for &cell in row {
                let value = cell as u8;
                let tint = match cell {
                    Cell::Obstacle => RED,
                    Cell::Visited => BLUE,
                    Cell::Path => GREEN,
                    Cell::Free => "",
                };
                if color && !tint.is_empty() {
                    write!(out, "{tint}{value}{RESET} , ")?;
                } else {
                    write!(out, "{value} , ")?;
                }
            }
            writeln!(out)?;
            writeln!(out)?;
        }
        writeln!(out, "{rule}")
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, false)
    }
}

struct Colored<'a> {
    grid: &'a Grid,
    color: bool,
}

impl Display for Colored<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.grid.write_to(f, self.color)
    }
}

struct CostTable<'a> {
    size: usize,
    nodes: &'a [Node],
}

impl Display for CostTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in 0..self.size as i32 {
            for y in 0..self.size as i32 {
                match self.nodes.iter().find(|n| n.x == x && n.y == y) {
                    Some(node) => write!(f, "{:>10} , ", format!("{:.3}", node.cost))?,
                    None => write!(f, "{:>10}", "  , ")?,
                }
            }
            write!(f, "\n\n")?;
        }
        Ok(())
    }
}

/// Table of accumulated costs laid out like the grid. Cells no node
/// reached are left blank.
pub fn render_costs(size: usize, nodes: &[Node]) -> String {
    CostTable { size, nodes }.to_string()
}

#[cfg(test)]
mod tests {
    use super::render_costs;
    use crate::grid::{Cell, Grid};
    use crate::rrt::Node;

    #[test]
    fn plain_render_lists_values() {
        let mut grid = Grid::from_rows(vec![vec![0, 1], vec![0, 0]]).unwrap();
        grid.set(1, 1, Cell::Path).unwrap();
        let text = grid.to_string();
        assert!(text.starts_with("Grid: "));
        assert!(text.contains("0 , 1 , \n"));
        assert!(text.contains("0 , 3 , \n"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn colored_render_tints_obstacles() {
        let grid = Grid::from_rows(vec![vec![0, 1], vec![0, 0]]).unwrap();
        assert!(grid.render(true).contains("\x1b[31m1\x1b[0m"));
    }

    #[test]
    fn cost_table_blanks_unvisited() {
        let mut node = Node::at(0, 1, 2);
        node.cost = 1.5;
        let table = render_costs(2, &[node]);
        let first_line = table.lines().next().unwrap();
        assert!(first_line.contains("1.500 , "));
        assert!(first_line.starts_with("        , "));
    }

    #[test]
    fn colored_render_keeps_layout() {
        let mut grid = Grid::from_rows(vec![vec![0, 1], vec![2, 0]]).unwrap();
        grid.set(1, 1, Cell::Path).unwrap();
        let plain = grid.render(false);
        assert_eq!(plain, grid.to_string());
        let colored = grid.render(true);
        assert_eq!(colored.lines().count(), plain.lines().count());
        assert!(colored.contains("\x1b[34m2\x1b[0m , \x1b[32m3\x1b[0m , \n"));
    }

    #[test]
    fn cost_table_has_a_line_pair_per_row() {
        let mut node = Node::at(1, 0, 3);
        node.cost = 2.25;
        let table = render_costs(3, &[node]);
        assert_eq!(table.matches("\n\n").count(), 3);
        let rows: Vec<_> = table.split("\n\n").collect();
        assert_eq!(rows[0], "        , ".repeat(3));
        assert!(rows[1].starts_with("     2.250 , "));
    }
}
