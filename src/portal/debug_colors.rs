//! Debug tint per virtual camera, cycled by camera tree index

pub const DEBUG_COLORS: [[f32; 4]; 14] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [0.75, 0.25, 0.0, 1.0],
    [0.5, 0.5, 0.0, 1.0],
    [0.25, 0.75, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.75, 0.25, 1.0],
    [0.0, 0.5, 0.5, 1.0],
    [0.0, 0.25, 0.75, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [0.25, 0.0, 1.0, 0.75],
    [0.5, 0.0, 1.0, 0.5],
    [0.75, 0.0, 1.0, 0.25],
];

pub fn debug_color_for_camera(camera_index: usize) -> [f32; 4] {
    DEBUG_COLORS[camera_index % DEBUG_COLORS.len()]
}
