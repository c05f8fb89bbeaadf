// Skill self-rating evaluation: threshold gap detection, persisted evaluations,
// and AI gap analysis against a target role.

pub mod gap_analysis;
pub mod handlers;
pub mod prompts;
pub mod role_gaps;
pub mod store;
