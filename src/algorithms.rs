pub mod action_selection;
pub mod policy_update;
