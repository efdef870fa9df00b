pub mod ad_service;
pub mod audit_service;
