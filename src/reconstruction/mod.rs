//! Closed-surface reconstruction from fiducial point sets.

pub use self::surface_reconstructor::{ReconstructionMethod, SurfaceReconstructor};

mod surface_reconstructor;
