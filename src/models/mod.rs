pub mod comment;
pub mod movie;
pub mod theater;

pub use comment::{Comment, CommentUpdate};
pub use movie::Movie;
pub use theater::Theater;
