//! Export a policy computed for a finite MDP as a PRISM model file.
//!
//! Fixing the policy's action in every state leaves one probabilistic
//! command per state, which [`prism::encode`] renders in PRISM's `mdp`
//! language. [`naming::derive_paths`] decides where the file goes.

pub mod error;
pub mod mdp;
pub mod naming;
pub mod numeric;
pub mod output;
pub mod policy;
pub mod prism;
pub mod probe;
pub mod problem;
pub mod timings;

pub use error::ExportError;
pub use mdp::{MdpModel, TabularMdp};
pub use policy::PolicyVector;
