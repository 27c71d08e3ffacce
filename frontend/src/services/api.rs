use gloo::net::http::{Request, Response};
use shared::{
    CreateVaccinationRequest, DeleteVaccinationRequest, DeleteVaccinationResponse, ErrorResponse,
    UpdateVaccinationRequest, Vaccination,
};

/// API client for communicating with the backend server
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Fetch all vaccination records, ordered by due date
    pub async fn list_vaccinations(&self) -> Result<Vec<Vaccination>, String> {
        let url = format!("{}/api/vaccinations", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Vec<Vaccination>>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse vaccinations: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Create a new vaccination record
    pub async fn create_vaccination(
        &self,
        request: CreateVaccinationRequest,
    ) -> Result<Vaccination, String> {
        let url = format!("{}/api/vaccinations", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Vaccination>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Mark a vaccination complete with the given dates
    pub async fn mark_complete(
        &self,
        request: UpdateVaccinationRequest,
    ) -> Result<Vaccination, String> {
        let url = format!("{}/api/vaccinations", self.base_url);

        match Request::patch(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Vaccination>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Delete a vaccination record by id
    pub async fn delete_vaccination(&self, id: String) -> Result<DeleteVaccinationResponse, String> {
        let url = format!("{}/api/vaccinations", self.base_url);
        let request = DeleteVaccinationRequest { id: Some(id) };

        match Request::delete(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<DeleteVaccinationResponse>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

/// Pull the message out of the API's `{error}` envelope
async fn error_text(response: Response) -> String {
    match response.json::<ErrorResponse>().await {
        Ok(envelope) => envelope.error,
        Err(_) => "Unknown error".to_string(),
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
