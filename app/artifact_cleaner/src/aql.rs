// the include list is the response schema contract, report::decode depends on it
pub fn unused_artifacts(repo: &str, created_months: u32, modified_months: u32, downloaded_months: u32) -> String {
    format!(
        r#"items.find({{"$and": [{{"repo":"{repo}"}},{{"created": {{"$before": "{created_months}mo"}}}},{{"modified": {{"$before": "{modified_months}mo"}}}},{{"stat.downloaded": {{"$before": "{downloaded_months}mo"}}}}]}}).include("updated","created_by","repo","type","size","name","modified_by","path","modified","id","actual_sha1","created","stat.downloaded")"#
    )
}
