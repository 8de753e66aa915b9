/// Axis a kd-tree node splits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitAxis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl SplitAxis {
    pub fn from_dim(dim: usize) -> Self {
        match dim {
            0 => SplitAxis::X,
            1 => SplitAxis::Y,
            2 => SplitAxis::Z,
            _ => panic!("split axis dimension {} out of range", dim),
        }
    }

    pub fn dim(self) -> usize {
        self as usize
    }

    pub fn next_axis(self) -> Self {
        Self::from_dim((self.dim() + 1) % 3)
    }
}
