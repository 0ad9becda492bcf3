use framework::env;
use framework::exception;
use framework::exception::JanitorResult;
use framework::exception::error_code;

// read once at startup, immutable for the rest of the run
#[derive(Debug)]
pub struct JobConfig {
    pub artifactory_url: String,
    pub artifactory_token: String,
    pub repo: String,
    pub bucket: String,
    pub region: String,
    pub dry_run: bool,
    pub created_months: u32,
    pub modified_months: u32,
    pub downloaded_months: u32,
}

impl JobConfig {
    pub fn from_env() -> JanitorResult<Self> {
        Ok(JobConfig {
            artifactory_url: env::required("ARTIFACTORY_URL")?,
            artifactory_token: env::required("ARTIFACTORY_TOKEN")?,
            repo: env::required("repo")?,
            bucket: env::required("bucket")?,
            region: env::required("region")?,
            dry_run: parse_bool("dry_run", &env::required("dry_run")?)?,
            created_months: parse_months("created", &env::required("created")?)?,
            modified_months: parse_months("modified", &env::required("modified")?)?,
            downloaded_months: parse_months("downloaded", &env::required("downloaded")?)?,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> JanitorResult<bool> {
    value.parse().map_err(|err: std::str::ParseBoolError| {
        exception!(
            code = error_code::CONFIG_ERROR,
            message = format!("env value must be a boolean, name={name}, value={value}"),
            source = err
        )
    })
}

fn parse_months(name: &str, value: &str) -> JanitorResult<u32> {
    value.parse().map_err(|err: std::num::ParseIntError| {
        exception!(
            code = error_code::CONFIG_ERROR,
            message = format!("env value must be a non-negative integer, name={name}, value={value}"),
            source = err
        )
    })
}

#[cfg(test)]
mod tests {
    use framework::exception::error_code;

    #[test]
    fn from_env_fails_when_value_is_missing() {
        // the job variables are not defined in the test environment,
        // the run must abort with a config error before any request is made
        let error = super::JobConfig::from_env().unwrap_err();

        assert_eq!(error.code.as_deref(), Some(error_code::CONFIG_ERROR));
    }

    #[test]
    fn parse_bool() {
        assert!(super::parse_bool("dry_run", "true").unwrap());
        assert!(!super::parse_bool("dry_run", "false").unwrap());

        let error = super::parse_bool("dry_run", "yes").unwrap_err();
        assert_eq!(error.code.as_deref(), Some(error_code::CONFIG_ERROR));
    }

    #[test]
    fn parse_months() {
        assert_eq!(super::parse_months("created", "12").unwrap(), 12);
        assert_eq!(super::parse_months("created", "0").unwrap(), 0);

        // negative thresholds are a configuration error
        let error = super::parse_months("created", "-1").unwrap_err();
        assert_eq!(error.code.as_deref(), Some(error_code::CONFIG_ERROR));

        assert!(super::parse_months("created", "12mo").is_err());
    }
}
