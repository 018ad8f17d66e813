//! Entity service implementations.

mod house_service_impl;
mod user_service_impl;

#[cfg(test)]
pub(crate) mod test_support;

pub use house_service_impl::HouseServiceImpl;
pub use user_service_impl::UserServiceImpl;
