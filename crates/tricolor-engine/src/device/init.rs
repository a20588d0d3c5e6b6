/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when `true`, a linear (non-sRGB) one when `false`.
    ///
    /// Colors in this crate are written to the framebuffer as-is, so the default
    /// is a non-sRGB surface. Falls back to the first supported format.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO paces frames to the display refresh.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode; ignored when the surface does not support it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    /// Limits requested from the device. The demo needs nothing beyond WebGL2-level limits.
    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::LowPower,
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
