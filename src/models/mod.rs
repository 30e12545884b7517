pub mod loan_request;
pub mod nominee;
pub mod resource;
pub mod user;

pub use loan_request::*;
pub use nominee::*;
pub use resource::*;
pub use user::*;
