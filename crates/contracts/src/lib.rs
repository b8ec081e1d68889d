//! Контракты (DTO) общие для backend и любых клиентов API.

pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
