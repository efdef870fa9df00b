pub mod account_dto;
