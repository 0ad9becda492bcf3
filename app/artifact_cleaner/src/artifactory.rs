use framework::exception;
use framework::exception::Exception;
use framework::exception::error_code;
use framework::http::HttpClient;
use framework::http::HttpMethod::DELETE;
use framework::http::HttpMethod::POST;
use framework::http::HttpRequest;
use tracing::Instrument;
use tracing::debug;
use tracing::debug_span;

use crate::job::ArtifactRepository;

pub struct Artifactory {
    uri: String,
    access_token: String,
    client: HttpClient,
}

impl Artifactory {
    pub fn new(uri: &str, access_token: &str) -> Self {
        Self {
            uri: uri.trim_end_matches('/').to_owned(),
            access_token: access_token.to_owned(),
            client: HttpClient::default(),
        }
    }
}

impl ArtifactRepository for Artifactory {
    // returns the raw response body, it is archived verbatim before decoding results are acted on
    async fn search(&self, query: &str) -> Result<String, Exception> {
        let span = debug_span!("artifactory");
        async {
            debug!("search artifacts");
            let uri = &self.uri;
            let mut request = HttpRequest::new(POST, format!("{uri}/api/search/aql"));
            request.body(query.to_owned(), "text/plain");
            request.bearer_auth(&self.access_token);
            let response = self.client.execute(request).await?;
            if response.status != 200 {
                return Err(exception!(
                    code = error_code::QUERY_ERROR,
                    message = format!("failed to search artifacts, status={}", response.status)
                ));
            }
            Ok(response.body)
        }
        .instrument(span)
        .await
    }

    async fn delete(&self, location: &str) -> Result<(), Exception> {
        let span = debug_span!("artifactory");
        async {
            debug!(location, "delete artifact");
            let uri = &self.uri;
            let mut request = HttpRequest::new(DELETE, format!("{uri}/{location}"));
            request.bearer_auth(&self.access_token);
            let response = self.client.execute(request).await?;
            if response.status != 200 && response.status != 204 {
                return Err(exception!(
                    code = error_code::PURGE_ERROR,
                    message = format!(
                        "failed to delete artifact, location={location}, status={}",
                        response.status
                    )
                ));
            }
            Ok(())
        }
        .instrument(span)
        .await
    }
}
