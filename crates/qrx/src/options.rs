use crate::limits::DEFAULT_MAX_CELLS;

/// Knobs that shape how a pattern is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompileOptions {
    /// Maximum size of the compiled program in 16-bit cells, the final
    /// `END` included. Exceeding it is reported as an overflow.
    pub max_cells: usize,
}

impl CompileOptions {
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}
