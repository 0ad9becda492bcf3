use chrono::DateTime;
use chrono::Utc;
use framework::exception;
use framework::exception::JanitorResult;
use framework::exception::error_code;
use framework::json;
use serde::Deserialize;

/// one artifact matched by the retention query, identified by repo/path/name
#[derive(Debug, PartialEq)]
pub struct ArtifactRecord {
    pub repo: String,
    pub path: String,
    pub name: String,
    pub file_type: String,
    pub size: i64,
    pub created: DateTime<Utc>,
    pub created_by: String,
    pub modified: DateTime<Utc>,
    pub modified_by: String,
    pub sha1: String,
    pub download_stats: Option<DownloadStats>,
}

#[derive(Debug, PartialEq)]
pub struct DownloadStats {
    pub last_downloaded: DateTime<Utc>,
}

impl ArtifactRecord {
    pub fn location(&self) -> String {
        format!("{}/{}/{}", self.repo, self.path, self.name)
    }
}

// AQL response schema, tied to the include list in aql::unused_artifacts
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<FileResult>,
}

#[derive(Debug, Deserialize)]
struct FileResult {
    repo: String,
    path: String,
    name: String,
    #[serde(rename = "type")]
    file_type: String,
    size: i64,
    created: DateTime<Utc>,
    created_by: String,
    modified: DateTime<Utc>,
    modified_by: String,
    actual_sha1: String,
    #[serde(default)]
    stats: Vec<StatEntry>, // absent for artifacts never downloaded
}

#[derive(Debug, Deserialize)]
struct StatEntry {
    downloaded: DateTime<Utc>,
}

pub fn decode(report: &str) -> JanitorResult<Vec<ArtifactRecord>> {
    let response: SearchResponse = json::from_json(report).map_err(|err| {
        exception!(
            code = error_code::DECODE_ERROR,
            message = "failed to decode search report",
            source = err
        )
    })?;
    response.results.into_iter().map(record).collect()
}

fn record(result: FileResult) -> JanitorResult<ArtifactRecord> {
    // only one stat entry per artifact is meaningful, refuse to guess otherwise
    if result.stats.len() > 1 {
        return Err(exception!(
            code = error_code::DECODE_ERROR,
            message = format!(
                "artifact has multiple stat entries, name={}, entries={}",
                result.name,
                result.stats.len()
            )
        ));
    }
    let download_stats = result.stats.into_iter().next().map(|entry| DownloadStats {
        last_downloaded: entry.downloaded,
    });
    Ok(ArtifactRecord {
        repo: result.repo,
        path: result.path,
        name: result.name,
        file_type: result.file_type,
        size: result.size,
        created: result.created,
        created_by: result.created_by,
        modified: result.modified,
        modified_by: result.modified_by,
        sha1: result.actual_sha1,
        download_stats,
    })
}
