use atrium_core::Record;
use atrium_table::RecordBackend;

use crate::{ApiClient, Error};

impl<R: Record> RecordBackend<R> for ApiClient {
  type Error = Error;

  async fn list(&self) -> Result<Vec<R>, Error> { self.list_records::<R>().await }

  async fn update_status(&self, id: String, status: R::Status) -> Result<Option<R>, Error> {
    self.set_status::<R>(&id, status).await.map(Some)
  }

  async fn update_fields(&self, id: String, fields: R::Fields) -> Result<Option<R>, Error> {
    self.set_fields::<R>(&id, &fields).await.map(Some)
  }

  async fn delete(&self, id: String) -> Result<(), Error> {
    self.delete_record(R::KIND, &id).await
  }
}
