//! [`RecordApi`] implementation over the Porkbun endpoints.

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::traits::RecordApi;
use crate::types::{ObservedRecord, RecordPayload};

use super::PorkbunClient;
use super::types::{AuthBody, CreateResponse, Envelope, RecordBody, RetrieveResponse};

impl PorkbunClient {
    pub(crate) fn auth(&self) -> AuthBody<'_> {
        AuthBody {
            apikey: &self.credentials.api_key,
            secretapikey: &self.credentials.secret_api_key,
        }
    }

    fn authed<'a>(&'a self, record: &'a RecordPayload) -> RecordBody<'a> {
        RecordBody {
            apikey: &self.credentials.api_key,
            secretapikey: &self.credentials.secret_api_key,
            record,
        }
    }
}

#[async_trait]
impl RecordApi for PorkbunClient {
    async fn create_record(&self, domain: &str, record: &RecordPayload) -> ApiResult<i64> {
        let path = format!("/dns/create/{}", urlencoding::encode(domain));
        let response: CreateResponse = self.post(&path, &self.authed(record)).await?;
        Ok(response.id)
    }

    async fn retrieve_records(&self, domain: &str) -> ApiResult<Vec<ObservedRecord>> {
        let path = format!("/dns/retrieve/{}", urlencoding::encode(domain));
        let response: RetrieveResponse = self.post(&path, &self.auth()).await?;
        Ok(response.records)
    }

    async fn edit_record(
        &self,
        domain: &str,
        record_id: i64,
        record: &RecordPayload,
    ) -> ApiResult<()> {
        let path = format!("/dns/edit/{}/{record_id}", urlencoding::encode(domain));
        let _: Envelope = self.post(&path, &self.authed(record)).await?;
        Ok(())
    }

    async fn delete_record(&self, domain: &str, record_id: i64) -> ApiResult<()> {
        let path = format!("/dns/delete/{}/{record_id}", urlencoding::encode(domain));
        let _: Envelope = self.post(&path, &self.auth()).await?;
        Ok(())
    }
}
