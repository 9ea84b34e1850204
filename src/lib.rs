//! ROSTRY Genealogy Engine
//!
//! Family-tree construction, generation numbering, 2D layout and
//! viewport-culled draw-list building for the fowl registry. The engine is
//! UI-toolkit agnostic: the host screen feeds gestures in and paints the
//! draw instructions it gets back.

pub mod breeds;
pub mod components;
pub mod error;
pub mod genealogy;
pub mod layout;
pub mod loader;
pub mod persistence;
pub mod registry;
pub mod render;
pub mod view;

pub use components::{FowlId, FowlSnapshot, OwnerId, Sex};
pub use error::GenealogyError;
pub use genealogy::{FamilySubgraph, TreeStatistics, DEFAULT_MAX_DEPTH};
pub use registry::{FowlRegistry, FowlSource, Registration};
pub use view::{FamilyTreeView, LoadState, ViewConfig};
