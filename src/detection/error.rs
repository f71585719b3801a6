/// Reasons a screenshot cannot be turned into pass arrows.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("pitch not detected")]
    PitchNotDetected,
    #[error("degenerate pitch box ({width}x{height} px)")]
    DegeneratePitch { width: u32, height: u32 },
}
