use serde::de::Deserialize;

use crate::exception::JanitorResult;

pub fn from_json<'a, T>(json: &'a str) -> JanitorResult<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str(json)
        .map_err(|err| exception!(message = format!("failed to deserialize, json={json}"), source = err))
}
