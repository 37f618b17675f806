//! Read-time projection: merges a record with its externally addressable
//! image URL. Pure, no side effects; every read and every mutation response
//! goes through here so clients never see raw relative paths.

use serde::Serialize;

use crate::domain::records::Record;
use crate::infrastructure::image_store::{ImageStore, RequestOrigin};

#[derive(Debug, Serialize)]
pub struct Projected<T: Serialize> {
    #[serde(flatten)]
    record: T,
    #[serde(rename = "imageUrl")]
    image_url: Option<String>,
}

pub fn project<T: Record>(origin: &RequestOrigin, record: T) -> Projected<T> {
    let image_url = ImageStore::to_url(origin, record.image_path());
    Projected { record, image_url }
}

pub fn project_all<T: Record>(origin: &RequestOrigin, records: Vec<T>) -> Vec<Projected<T>> {
    records
        .into_iter()
        .map(|record| project(origin, record))
        .collect()
}
