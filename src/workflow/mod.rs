pub mod retrieval_ctx;
pub mod retrieval_flow;

pub use retrieval_ctx::{ItemState, RetrievalCtx};
pub use retrieval_flow::{Retrieved, RetrievalFlow};
