use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::RemoteCallClient;

/// Contract creation request as the Contract Directory accepts it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContract {
    pub net_id: String,
    pub course_id: String,
    pub max_hours: i32,
    pub duties: String,
}

/// The directory is a sibling instance of this service and wraps every
/// response in the standard `{"success": ..., "data": ...}` envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Narrow interface onto the Contract Directory service. Failures collapse
/// to safe defaults: an empty rating map, a refused contract creation.
#[async_trait]
pub trait ContractDirectory: Send + Sync {
    /// Historical TA ratings per net_id. Net IDs without a rating on record
    /// are absent from the map. Empty on any failure.
    async fn get_ta_ratings(
        &self,
        authorization: Option<&str>,
        net_ids: &[String],
    ) -> HashMap<String, f64>;

    /// Ask the directory to create a contract record. False on any failure.
    async fn create_contract(&self, authorization: Option<&str>, contract: &NewContract) -> bool;
}

pub struct HttpContractDirectory {
    client: RemoteCallClient,
}

impl HttpContractDirectory {
    pub fn new(client: RemoteCallClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContractDirectory for HttpContractDirectory {
    async fn get_ta_ratings(
        &self,
        authorization: Option<&str>,
        net_ids: &[String],
    ) -> HashMap<String, f64> {
        if net_ids.is_empty() {
            return HashMap::new();
        }

        let ids = net_ids.join(",");
        match self
            .client
            .get_json::<Envelope<HashMap<String, f64>>>(
                "ratings?net_ids={ids}",
                &[&ids],
                authorization,
            )
            .await
        {
            Ok(envelope) => envelope.data,
            Err(err) => {
                tracing::warn!(
                    "rating lookup against contract directory failed, answering empty: {err}"
                );
                HashMap::new()
            }
        }
    }

    async fn create_contract(&self, authorization: Option<&str>, contract: &NewContract) -> bool {
        match self
            .client
            .post_json::<NewContract, serde_json::Value>("contracts", &[], authorization, contract)
            .await
        {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(
                    net_id = %contract.net_id,
                    course_id = %contract.course_id,
                    "contract creation against contract directory failed: {err}"
                );
                false
            }
        }
    }
}
