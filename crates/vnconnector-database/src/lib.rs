#![doc = include_str!("../README.md")]

mod create;
pub use create::CreateError;
mod customer;
pub use customer::CustomerVerificationError;
mod database_client;
pub use database_client::{DatabaseClient, DatabaseClientExt};
mod delete;
pub use delete::DeleteError;
mod model_name;
pub use model_name::normalize_model_name;
mod query;
pub use query::{
    Condition, ConditionValue, Pagination, QueryResult, RawQuery, RelationLink, WhereClause,
    WhereFragment,
};
mod remote_model;
pub use remote_model::RemoteModel;
mod scope;
pub use scope::ScopeParams;
mod select;
mod update;
pub use update::UpdateError;
