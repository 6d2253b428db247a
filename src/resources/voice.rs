use std::sync::Arc;

use crate::clients::{HttpClient, HttpError, HttpMethod, RequestOptions, Route};
use crate::models::VoiceRegion;

/// Client for the voice endpoints.
#[derive(Clone, Debug)]
pub struct VoiceClient {
    http: Arc<HttpClient>,
}

impl VoiceClient {
    /// Creates a client on top of a shared transport.
    #[must_use]
    pub const fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Lists the voice regions available when creating a guild.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get_voice_regions(&self) -> Result<Vec<VoiceRegion>, HttpError> {
        let route = Route::builder(HttpMethod::Get, "/voice/regions").build()?;

        self.http.request_json(&route, RequestOptions::new()).await
    }
}
