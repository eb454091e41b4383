use crate::llm::LlmClient;
use crate::store::Store;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
    pub llm: LlmClient,
}

impl AppState {
    pub fn new(store: Store, llm: LlmClient) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            llm,
        }
    }
}
