use chrono::Utc;
use framework::exception::Exception;
use framework::exception::JanitorResult;
use tracing::debug;
use tracing::info;

use crate::aql;
use crate::archive;
use crate::config::JobConfig;
use crate::report;

pub trait ArtifactRepository {
    async fn search(&self, query: &str) -> Result<String, Exception>;
    async fn delete(&self, location: &str) -> Result<(), Exception>;
}

pub trait ArchiveStore {
    async fn put(&self, bucket: &str, region: &str, key: &str, content: &str) -> Result<(), Exception>;
}

// search -> archive -> purge, any failure aborts the remaining stages
pub async fn run<R, S>(config: &JobConfig, repository: &R, store: &S) -> JanitorResult<()>
where
    R: ArtifactRepository,
    S: ArchiveStore,
{
    let query = aql::unused_artifacts(
        &config.repo,
        config.created_months,
        config.modified_months,
        config.downloaded_months,
    );
    let report = repository.search(&query).await?;
    let artifacts = report::decode(&report)?;
    info!("matched artifacts, repo={}, count={}", config.repo, artifacts.len());

    // the archive is the only audit record of what gets deleted, purge must not run without it
    let key = archive::archive_key(Utc::now(), &config.repo);
    store.put(&config.bucket, &config.region, &key, &report).await?;

    if config.dry_run {
        for artifact in &artifacts {
            let last_downloaded = artifact.download_stats.as_ref().map(|stats| stats.last_downloaded);
            info!(
                "dry run, would delete artifact, location={}, created={}, modified={}, last_downloaded={last_downloaded:?}",
                artifact.location(),
                artifact.created,
                artifact.modified
            );
        }
        info!("dry run, skipped deletion, count={}", artifacts.len());
        return Ok(());
    }

    for artifact in &artifacts {
        let location = artifact.location();
        debug!(
            "deleting artifact, location={location}, type={}, size={}, created_by={}, modified_by={}, sha1={}",
            artifact.file_type, artifact.size, artifact.created_by, artifact.modified_by, artifact.sha1
        );
        repository.delete(&location).await?;
        info!("deleted artifact, location={location}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use framework::exception;
    use framework::exception::Exception;
    use framework::exception::error_code;

    use super::ArchiveStore;
    use super::ArtifactRepository;
    use crate::config::JobConfig;

    #[tokio::test]
    async fn dry_run_uploads_report_and_skips_deletion() {
        let repository = FakeRepository::new(two_item_report());
        let store = FakeStore::new(false);

        super::run(&config(true), &repository, &store).await.unwrap();

        let puts = store.puts.lock().unwrap();
        assert_eq!(puts.len(), 1);
        let (bucket, key, content) = &puts[0];
        assert_eq!(bucket, "archive-bucket");
        assert!(key.ends_with("-libs-release"));
        assert_eq!(content, &two_item_report());

        assert!(repository.attempts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn purge_deletes_in_query_order() {
        let repository = FakeRepository::new(two_item_report());
        let store = FakeStore::new(false);

        super::run(&config(false), &repository, &store).await.unwrap();

        assert_eq!(store.puts.lock().unwrap().len(), 1);
        assert_eq!(
            *repository.attempts.lock().unwrap(),
            vec![
                "libs-release/org/demo/app-1.0.jar".to_owned(),
                "libs-release/org/demo/app-1.1.jar".to_owned(),
            ]
        );
    }

    #[tokio::test]
    async fn purge_stops_at_first_failed_deletion() {
        let mut repository = FakeRepository::new(report(&["app-1.0.jar", "app-1.1.jar", "app-1.2.jar"]));
        repository.fail_delete_at = Some(1);
        let store = FakeStore::new(false);

        let error = super::run(&config(false), &repository, &store).await.unwrap_err();
        assert!(error.message.contains("delete rejected"));

        // the third artifact is never attempted
        assert_eq!(
            *repository.attempts.lock().unwrap(),
            vec![
                "libs-release/org/demo/app-1.0.jar".to_owned(),
                "libs-release/org/demo/app-1.1.jar".to_owned(),
            ]
        );
    }

    #[tokio::test]
    async fn archive_failure_aborts_purge() {
        let repository = FakeRepository::new(two_item_report());
        let store = FakeStore::new(true);

        let error = super::run(&config(false), &repository, &store).await.unwrap_err();
        assert_eq!(error.code.as_deref(), Some(error_code::ARCHIVE_ERROR));

        assert!(repository.attempts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn decode_failure_aborts_archive_and_purge() {
        let repository = FakeRepository::new(r#"{"unexpected":true}"#.to_owned());
        let store = FakeStore::new(false);

        let error = super::run(&config(false), &repository, &store).await.unwrap_err();
        assert_eq!(error.code.as_deref(), Some(error_code::DECODE_ERROR));

        assert!(store.puts.lock().unwrap().is_empty());
        assert!(repository.attempts.lock().unwrap().is_empty());
    }

    struct FakeRepository {
        report: String,
        fail_delete_at: Option<usize>,
        attempts: Mutex<Vec<String>>,
    }

    impl FakeRepository {
        fn new(report: String) -> Self {
            Self {
                report,
                fail_delete_at: None,
                attempts: Mutex::new(Vec::new()),
            }
        }
    }

    impl ArtifactRepository for FakeRepository {
        async fn search(&self, query: &str) -> Result<String, Exception> {
            assert!(query.contains(r#"{"repo":"libs-release"}"#));
            Ok(self.report.clone())
        }

        async fn delete(&self, location: &str) -> Result<(), Exception> {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(location.to_owned());
            if self.fail_delete_at == Some(attempts.len() - 1) {
                return Err(exception!(message = format!("delete rejected, location={location}")));
            }
            Ok(())
        }
    }

    struct FakeStore {
        fail: bool,
        puts: Mutex<Vec<(String, String, String)>>,
    }

    impl FakeStore {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                puts: Mutex::new(Vec::new()),
            }
        }
    }

    impl ArchiveStore for FakeStore {
        async fn put(&self, bucket: &str, _region: &str, key: &str, content: &str) -> Result<(), Exception> {
            if self.fail {
                return Err(exception!(
                    code = error_code::ARCHIVE_ERROR,
                    message = format!("bucket not found, bucket={bucket}")
                ));
            }
            self.puts
                .lock()
                .unwrap()
                .push((bucket.to_owned(), key.to_owned(), content.to_owned()));
            Ok(())
        }
    }

    fn config(dry_run: bool) -> JobConfig {
        JobConfig {
            artifactory_url: "http://localhost:8081/artifactory".to_owned(),
            artifactory_token: "test-token".to_owned(),
            repo: "libs-release".to_owned(),
            bucket: "archive-bucket".to_owned(),
            region: "us-east-1".to_owned(),
            dry_run,
            created_months: 12,
            modified_months: 12,
            downloaded_months: 6,
        }
    }

    // first artifact has a download stat entry, second was never downloaded
    fn two_item_report() -> String {
        format!(
            r#"{{"results":[{},{}]}}"#,
            result("app-1.0.jar", true),
            result("app-1.1.jar", false)
        )
    }

    fn report(names: &[&str]) -> String {
        let results: Vec<String> = names.iter().map(|name| result(name, false)).collect();
        format!(r#"{{"results":[{}]}}"#, results.join(","))
    }

    fn result(name: &str, downloaded: bool) -> String {
        let stats = if downloaded {
            r#","stats":[{"downloaded":"2024-06-01T12:30:00Z"}]"#
        } else {
            ""
        };
        format!(
            r#"{{"repo":"libs-release","path":"org/demo","name":"{name}","type":"file","size":10240,"created":"2024-01-05T08:00:00Z","created_by":"ci","modified":"2024-02-01T08:00:00Z","modified_by":"ci","actual_sha1":"da39a3ee5e6b4b0d3255bfef95601890afd80709"{stats}}}"#
        )
    }
}
