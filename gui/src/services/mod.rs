// Engine access: the gRPC client and the dashboard actions built on it
pub mod actions;
pub mod engine_client;
