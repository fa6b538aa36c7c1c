//! Scaffold layout: catalog members, bays and support posts.

mod posts;
mod segments;
mod structure;

pub use posts::{
    create_all_support_posts, create_support_posts, PostId, SupportPost, CORNER_DEDUP_RADII,
    JOINT_DEDUP_RADII, POST_DIAMETER_MM, POST_RADIUS_PX,
};
pub use segments::{decompose, Segment};
pub use structure::{
    build_structure, decompose_bay_side, Structure, StructureId, BAY_HEIGHT_TOLERANCE_MM,
    JOINT_TOLERANCE_PX,
};
