//! The interactive clip pipeline: preview surfaces, apply, and edit restore.

pub use self::clip_tool::{
    ApplySummary, ClipError, ClipTool, PointSource, PreviewUpdate, SegmentHandle,
};
pub use self::segment_tag::{SegmentTag, TagError, TAG_VERSION};

mod clip_tool;
mod segment_tag;
