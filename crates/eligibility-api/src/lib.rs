//! 资格规则 REST API 服务库
//!
//! 对外暴露规则的创建、查询、合并与求值接口。

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
