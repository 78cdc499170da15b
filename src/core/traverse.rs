//! Addressing blocks inside a body.
//!
//! The table pass needs to remember where each placeholder paragraph and
//! its target table live while the tree is being rewritten. A [`BlockPath`]
//! is an index trail from the body down through table cells; paths are
//! rebased whenever a populate shifts rows under them.

use docmerge_ir::Block;

/// One step into a table: row, cell, then block within the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStep {
    pub row: usize,
    pub cell: usize,
    pub block: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPath {
    /// Index among the body's blocks
    pub root: usize,
    /// Descent through nested tables, outermost first
    pub steps: Vec<CellStep>,
}

impl BlockPath {
    pub fn top(root: usize) -> Self {
        Self {
            root,
            steps: Vec::new(),
        }
    }

    fn child(&self, step: CellStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self {
            root: self.root,
            steps,
        }
    }

    /// Whether `self` lies strictly inside the table at `table`.
    fn is_inside(&self, table: &BlockPath) -> bool {
        self.root == table.root
            && self.steps.len() > table.steps.len()
            && self.steps[..table.steps.len()] == table.steps[..]
    }

    /// Where this path points after `table` had its template row (index 1)
    /// replaced by `inserted` rows right after the header.
    ///
    /// Returns `None` when the path pointed into the removed template row.
    pub fn rebase_after_populate(&self, table: &BlockPath, inserted: usize) -> Option<BlockPath> {
        if !self.is_inside(table) {
            return Some(self.clone());
        }
        let depth = table.steps.len();
        let mut rebased = self.clone();
        let row = &mut rebased.steps[depth].row;
        match *row {
            0 => {}
            1 => return None,
            r => *row = r - 1 + inserted,
        }
        Some(rebased)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Table,
}

/// A block seen during a flattened walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatBlock {
    pub path: BlockPath,
    pub kind: BlockKind,
}

/// Every block under `blocks`, depth-first in document order.
///
/// A table is listed before the blocks inside its cells, at any depth.
pub fn flatten(blocks: &[Block]) -> Vec<FlatBlock> {
    let mut out = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        walk(block, BlockPath::top(index), &mut out);
    }
    out
}

fn walk(block: &Block, path: BlockPath, out: &mut Vec<FlatBlock>) {
    match block {
        Block::Paragraph(_) => out.push(FlatBlock {
            path,
            kind: BlockKind::Paragraph,
        }),
        Block::Table(table) => {
            out.push(FlatBlock {
                path: path.clone(),
                kind: BlockKind::Table,
            });
            for (row, r) in table.rows.iter().enumerate() {
                for (cell, c) in r.cells.iter().enumerate() {
                    for (index, inner) in c.blocks.iter().enumerate() {
                        let step = CellStep {
                            row,
                            cell,
                            block: index,
                        };
                        walk(inner, path.child(step), out);
                    }
                }
            }
        }
    }
}

pub fn block_at<'a>(blocks: &'a [Block], path: &BlockPath) -> Option<&'a Block> {
    let mut current = blocks.get(path.root)?;
    for step in &path.steps {
        current = current
            .as_table()?
            .rows
            .get(step.row)?
            .cells
            .get(step.cell)?
            .blocks
            .get(step.block)?;
    }
    Some(current)
}

pub fn block_at_mut<'a>(blocks: &'a mut [Block], path: &BlockPath) -> Option<&'a mut Block> {
    let mut current = blocks.get_mut(path.root)?;
    for step in &path.steps {
        current = current
            .as_table_mut()?
            .rows
            .get_mut(step.row)?
            .cells
            .get_mut(step.cell)?
            .blocks
            .get_mut(step.block)?;
    }
    Some(current)
}
