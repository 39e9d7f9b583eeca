pub use super::comments::Entity as Comments;
pub use super::likes::Entity as Likes;
pub use super::photos::Entity as Photos;
pub use super::profiles::Entity as Profiles;
pub use super::slideshow_photos::Entity as SlideshowPhotos;
pub use super::user_roles::Entity as UserRoles;
pub use super::users::Entity as Users;
pub use super::videos::Entity as Videos;
