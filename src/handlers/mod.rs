pub mod health_handlers;
pub mod invoke_handlers;
pub mod lambda_handler;
