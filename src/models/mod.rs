pub mod account_action;
pub mod ad_user;
