pub mod prelude;

pub mod comments;
pub mod likes;
pub mod photos;
pub mod profiles;
pub mod slideshow_photos;
pub mod user_roles;
pub mod users;
pub mod videos;
