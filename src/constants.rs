//! Shared constants for the portal core

/// Spatial index limits
pub mod kd_tree {
    /// Leaf capacity before a node is split
    pub const MAX_INDICES_PER_NODE: usize = 8;

    /// Recursion limit for the build, nodes deeper than this become leaves
    pub const KD_TREE_MAX_DEPTH: u32 = 32;

    /// Bits reserved in a packed node for the axis/leaf tag
    pub const SPLIT_AXIS_BITS: u32 = 2;
}

/// Ray tracing tolerances
pub mod ray {
    /// Floor of the slack on the [tmin, tmax] interval of a kd-tree cell
    pub const RAY_EPSILON: f32 = 1e-7;

    /// Slack per unit of ray extent, about eight f32 ulps
    pub const RAY_RELATIVE_EPSILON: f32 = 1e-6;

    /// Determinant threshold below which a ray counts as parallel to a triangle
    pub const TRIANGLE_PARALLEL_EPSILON: f32 = 1e-7;
}

/// Stencil buffer layout
pub mod stencil {
    /// Bits available in a single stencil byte
    pub const STENCIL_BIT_COUNT: u32 = 8;
}
