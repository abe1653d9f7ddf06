//! # FormCheck-Agents
//!
//! Turns joint-angle deviations into short coaching feedback.
//!
//! ## Flow
//!
//! ```text
//! pose_type + user Pose
//!     ↓
//! [Orchestrator] ← ReferenceStore + PoseLoader
//!     → normalized reference and user poses
//!     ↓
//! [Deviation Engine]
//!     → DeviationReport
//!     ↓
//! [Coach] → prompt (praise or correction)
//!     ↓
//! [TextGenerator]
//!     → "왼쪽 무릎이 안쪽으로 모여 있어요. ..."
//! ```

pub mod agent;
pub mod coach;
pub mod generator;
pub mod orchestrator;
pub mod prompts;

pub use agent::*;
pub use coach::*;
pub use generator::*;
pub use orchestrator::*;
pub use prompts::*;
