use framework::exception::JanitorResult;
use framework::log;

use crate::archive::S3Store;
use crate::artifactory::Artifactory;
use crate::config::JobConfig;

mod aql;
mod archive;
mod artifactory;
mod config;
mod job;
mod report;

#[tokio::main]
async fn main() -> JanitorResult<()> {
    log::init();

    let config = JobConfig::from_env()?;
    let repository = Artifactory::new(&config.artifactory_url, &config.artifactory_token);
    let store = S3Store;

    log::start_action("cleanup-unused-artifacts", job::run(&config, &repository, &store)).await
}
