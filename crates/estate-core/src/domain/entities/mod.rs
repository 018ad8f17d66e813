mod house;
mod user;

pub use house::House;
pub use user::User;
