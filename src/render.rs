use crate::ast::Expr;

/// Columns left between the two subtrees of a node.
const GAP: usize = 3;

/// A rendered subtree: a rectangle of text and the column of its root.
struct Block {
    lines: Vec<Vec<char>>,
    width: usize,
    anchor: usize,
}

impl Block {
    fn leaf(text: &str) -> Self {
        let line: Vec<char> = text.chars().collect();
        let width = line.len();
        Self {
            lines: vec![line],
            width,
            anchor: width.saturating_sub(1) / 2,
        }
    }

    fn row(&self, index: usize) -> Vec<char> {
        let mut row = self.lines.get(index).cloned().unwrap_or_default();
        row.resize(self.width, ' ');
        row
    }
}

/// Lays the tree out as text: each operator sits above a `/ \`, with its
/// left and right operands side by side underneath.
///
/// ```text
///    +
///   / \
/// 1     *
///      / \
///     2   3
/// ```
pub fn render_tree(expr: &Expr) -> String {
    layout(expr)
        .lines
        .iter()
        .map(|line| line.iter().collect::<String>().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn layout(expr: &Expr) -> Block {
    match expr {
        Expr::Literal(value) => Block::leaf(&value.to_string()),
        Expr::Binary {
            operator,
            left,
            right,
        } => {
            let left = layout(left);
            let right = layout(right);

            let right_offset = left.width + GAP;
            let right_anchor = right_offset + right.anchor;
            let root = (left.anchor + right_anchor) / 2;
            let width = right_offset + right.width;

            let mut head = vec![' '; width];
            head[root] = operator.symbol();
            let mut branches = vec![' '; width];
            branches[root - 1] = '/';
            branches[root + 1] = '\\';

            let mut lines = vec![head, branches];
            for index in 0..left.lines.len().max(right.lines.len()) {
                let mut row = left.row(index);
                row.extend(std::iter::repeat(' ').take(GAP));
                row.extend(right.row(index));
                lines.push(row);
            }

            Block {
                lines,
                width,
                anchor: root,
            }
        }
    }
}
