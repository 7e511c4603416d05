//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{create_mailer, MollieAdapter, NoopMailer, ResendAdapter, ServerDeps};
pub use test_dependencies::{
    gateway_payment, MockMailer, MockPaymentGateway, SentEmail, TestDependencies,
};
pub use traits::*;
