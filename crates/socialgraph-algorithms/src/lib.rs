//! Pure topology algorithms over a dense follow-graph view.
//!
//! The root `socialgraph` crate builds a [`GraphView`] from whatever backend
//! holds the users and follow edges; everything here is storage-agnostic.

pub mod common;
pub mod social;

pub use common::{GraphView, NodeId};
pub use social::{friends_of_friends, in_degrees, influential_followers, InfluenceScore};
