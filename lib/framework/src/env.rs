use std::env;

use crate::exception;
use crate::exception::JanitorResult;
use crate::exception::error_code;

pub fn required(name: &str) -> JanitorResult<String> {
    env::var(name).map_err(|err| {
        exception!(
            code = error_code::CONFIG_ERROR,
            message = format!("env value is required, name={name}"),
            source = err
        )
    })
}
