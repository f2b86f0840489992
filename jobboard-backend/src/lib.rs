pub mod app;
pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod state;
pub mod validation;

pub use app::build_router;
pub use app::build_router_with_cors;
