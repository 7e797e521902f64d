pub mod response;
pub mod scope;
