//! Integer geometry shared by every level of a hierarchy.

pub mod ivec3;
pub mod region;

pub use ivec3::IVec3;
pub use region::Region;
