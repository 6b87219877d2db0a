pub mod health;
pub mod tests_badge;
