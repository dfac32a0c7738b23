/// Failures raised while turning a module grid into pixels.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Cannot fit a {matrix_size}x{matrix_size} matrix into {size}px")]
    InvalidDimensions { matrix_size: u32, size: u32 },

    #[error("Failed to allocate a {width}x{height} image buffer")]
    Allocation { width: u32, height: u32 },
}
