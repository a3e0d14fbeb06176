use serde::Serialize;

/// Liveness check payload served at `/health`.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
