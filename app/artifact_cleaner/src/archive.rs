use std::env;
use std::fs;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use framework::exception;
use framework::exception::Exception;
use framework::exception::error_code;
use framework::shell;
use tracing::info;

use crate::job::ArchiveStore;

pub struct S3Store;

impl ArchiveStore for S3Store {
    async fn put(&self, bucket: &str, region: &str, key: &str, content: &str) -> Result<(), Exception> {
        let path = env::temp_dir().join(key);
        fs::write(&path, content).map_err(|err| archive_error(bucket, key, err))?;
        let result = shell::run(&format!(
            "aws s3 cp --quiet --region {region} {} s3://{bucket}/{key}",
            path.to_string_lossy()
        ))
        .await;
        fs::remove_file(&path).map_err(|err| archive_error(bucket, key, err))?;
        result.map_err(|err| archive_error(bucket, key, err))?;
        info!("uploaded report, bucket={bucket}, key={key}");
        Ok(())
    }
}

fn archive_error(bucket: &str, key: &str, err: impl Into<Exception>) -> Exception {
    exception!(
        code = error_code::ARCHIVE_ERROR,
        message = format!("failed to upload report, bucket={bucket}, key={key}"),
        source = err
    )
}

// runs for the same repo collide only within the same second, accepted for a low frequency job
pub fn archive_key(time: DateTime<Utc>, repo: &str) -> String {
    format!("{}-{repo}", time.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use chrono::Utc;
    use framework::exception::error_code;

    use crate::job::ArchiveStore;

    #[tokio::test]
    async fn put_reports_archive_error_when_staging_fails() {
        let store = super::S3Store;

        // key points into a directory that does not exist under the temp dir
        let error = store
            .put(
                "archive-bucket",
                "us-east-1",
                "no-such-dir/2026-08-23T01:00:00Z-libs-release",
                "{}",
            )
            .await
            .unwrap_err();

        assert_eq!(error.code.as_deref(), Some(error_code::ARCHIVE_ERROR));
    }

    #[test]
    fn archive_key() {
        let time: DateTime<Utc> = "2026-08-23T01:00:00Z".parse().unwrap();
        assert_eq!(super::archive_key(time, "libs-release"), "2026-08-23T01:00:00Z-libs-release");
    }

    #[test]
    fn archive_key_is_distinct_across_runs() {
        let first: DateTime<Utc> = "2026-08-23T01:00:00Z".parse().unwrap();
        let second: DateTime<Utc> = "2026-08-23T01:00:01Z".parse().unwrap();

        assert_ne!(
            super::archive_key(first, "libs-release"),
            super::archive_key(second, "libs-release")
        );
    }
}
