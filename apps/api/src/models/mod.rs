pub mod assessment;
pub mod recommendation;
pub mod skill_evaluation;
pub mod user;
