// Collection endpoints: public listing and admin CRUD.
//
// GET    /api/{resource}
// POST   /api/{resource}
// PUT    /api/{resource}/{id}
// DELETE /api/{resource}/{id}

use secrecy::SecretString;

use crate::client::{ContentClient, handle_empty};
use crate::error::Error;
use crate::models::{RawRecord, Record};
use crate::payload::{Encoding, Payload};
use crate::resource::Resource;

impl ContentClient {
    /// List a collection as typed records (public, unauthenticated).
    pub async fn list<T: Record>(&self) -> Result<Vec<T>, Error> {
        let url = self.resource_url(T::RESOURCE, None)?;
        self.get(url, None).await
    }

    /// List a collection as raw records, authenticated with `token`.
    pub async fn list_raw(
        &self,
        resource: Resource,
        token: &SecretString,
    ) -> Result<Vec<RawRecord>, Error> {
        let url = self.resource_url(resource, None)?;
        self.get(url, Some(token)).await
    }

    /// Create a record. Sent as multipart when the payload carries an image.
    pub async fn create(
        &self,
        resource: Resource,
        payload: Payload,
        token: &SecretString,
    ) -> Result<(), Error> {
        let encoding = payload.encoding_for(resource)?;
        let url = self.resource_url(resource, None)?;

        match encoding {
            Encoding::Json => {
                let resp = self.post_json(url, &payload.fields, Some(token)).await?;
                handle_empty(resp).await
            }
            Encoding::Multipart => {
                let form = payload.into_multipart()?;
                self.post_multipart(url, form, Some(token)).await
            }
        }
    }

    /// Replace the fields of record `id`.
    pub async fn update(
        &self,
        resource: Resource,
        id: &str,
        payload: Payload,
        token: &SecretString,
    ) -> Result<(), Error> {
        let encoding = payload.encoding_for(resource)?;
        let url = self.resource_url(resource, Some(id))?;

        match encoding {
            Encoding::Json => self.put_json(url, &payload.fields, Some(token)).await,
            Encoding::Multipart => {
                let form = payload.into_multipart()?;
                self.put_multipart(url, form, Some(token)).await
            }
        }
    }

    /// Delete record `id`.
    pub async fn delete_record(
        &self,
        resource: Resource,
        id: &str,
        token: &SecretString,
    ) -> Result<(), Error> {
        let url = self.resource_url(resource, Some(id))?;
        self.delete(url, Some(token)).await
    }
}
