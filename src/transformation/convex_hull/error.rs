/// Errors generated by the convex-hull computation.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvexHullError {
    /// The convex-hull computation reached a state that should never happen.
    #[error("Internal convex hull error: {0}")]
    InternalError(&'static str),
    /// No support point could be found in the query direction.
    ///
    /// This happens when the input points contain invalid coordinates (NaN),
    /// or when they all lie on a common plane, line, or point.
    #[error("Input points are either invalid (NaN) or are almost coplanar.")]
    MissingSupportPoint,
    /// Fewer than four points were given.
    #[error("Fewer than four points were given to the convex-hull algorithm.")]
    IncompleteInput,
}
