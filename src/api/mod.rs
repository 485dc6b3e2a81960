pub mod auth;
pub mod classes;
pub mod enrollments;
pub mod health;
pub mod payments;
pub mod swagger;
pub mod users;
