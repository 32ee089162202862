use serde::Serialize;

/// Liveness payload returned by `GET /health`.
#[derive(Serialize, Debug, PartialEq)]
pub struct Health {
    pub status: &'static str,
    pub products: usize,
}

impl Health {
    pub fn ok(products: usize) -> Self {
        Self { status: "ok", products }
    }
}
