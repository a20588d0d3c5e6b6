/// What the frame loop should do after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame can render normally.
    Reconfigured,
    /// Transient; drop this frame and keep the loop going.
    SkipFrame,
    /// Unrecoverable (commonly OOM); end the session.
    Fatal,
}
