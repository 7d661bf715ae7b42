use std::sync::Arc;

use tracing::debug;

use crate::database::models::CountEntry;
use crate::database::prelude::*;

use super::error::ServiceResult;

pub struct DashboardService {
    store: Arc<dyn Store>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn counts(&self) -> ServiceResult<Vec<CountEntry>> {
        let counts = self.store.count_all().await?;
        debug!(?counts, "Dashboard counts");
        Ok(counts.entries())
    }
}
