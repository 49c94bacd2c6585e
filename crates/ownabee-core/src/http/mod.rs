//! Transport seam between the API client and the network.

pub mod multipart;
pub mod transport;

pub use multipart::{MultipartForm, MultipartPart, PartValue, UploadFile};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport};
